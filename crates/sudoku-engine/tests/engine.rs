use rand::rngs::StdRng;
use rand::SeedableRng;
use sudoku_engine::completion::{is_board_solved, is_digit_fully_placed};
use sudoku_engine::validation::{is_valid_placement, matches_solution};
use sudoku_engine::{Difficulty, GameSession, Grid, Placement};

fn medium_session(seed: u64) -> GameSession {
    GameSession::new_with_rng(Difficulty::Medium, &mut StdRng::seed_from_u64(seed))
}

#[test]
fn medium_game_played_to_completion() {
    let mut session = medium_session(7);

    let filled = session
        .board()
        .iter()
        .flatten()
        .filter(|cell| !cell.is_empty())
        .count();
    assert_eq!(filled, 31);

    for row in 0..9 {
        for col in 0..9 {
            if session.value(row, col).is_none() {
                let digit = session.solution()[row][col];
                assert_eq!(
                    session.place_digit(row, col, digit),
                    Ok(Placement::Correct)
                );
            }
        }
    }

    assert!(session.is_won());
    assert!(is_board_solved(session.board(), session.solution()));
    assert!(session.completed_digits().iter().all(|&done| done));
    assert!(session.invalid_cells().is_empty());
    for digit in 1..=9 {
        assert!(is_digit_fully_placed(
            session.board(),
            session.solution(),
            digit
        ));
    }
}

// A digit can fit the grid structurally and still be wrong for this puzzle.
// The two predicates must disagree somewhere on any real board.
#[test]
fn structural_validity_and_correctness_are_independent() {
    let session = medium_session(21);

    let mut exercised = false;
    'search: for row in 0..9 {
        for col in 0..9 {
            if session.value(row, col).is_some() {
                continue;
            }
            for digit in 1..=9 {
                if digit != session.solution()[row][col]
                    && is_valid_placement(session.board(), digit, row, col)
                {
                    assert!(!matches_solution(session.solution(), digit, row, col));
                    exercised = true;
                    break 'search;
                }
            }
        }
    }
    assert!(
        exercised,
        "expected some structurally valid digit that disagrees with the solution"
    );
}

#[test]
fn clearing_a_wrong_digit_unwinds_the_tracking() {
    let mut session = medium_session(5);

    // Solve everything except one cell.
    let mut last = None;
    for row in 0..9 {
        for col in 0..9 {
            if session.value(row, col).is_none() {
                last = Some((row, col));
            }
        }
    }
    let (hold_r, hold_c) = last.expect("fresh medium puzzle has empty cells");
    for row in 0..9 {
        for col in 0..9 {
            if (row, col) != (hold_r, hold_c) && session.value(row, col).is_none() {
                let digit = session.solution()[row][col];
                session.place_digit(row, col, digit).unwrap();
            }
        }
    }
    assert!(!session.is_won());

    // Wrong digit in the last hole: board is full but not won.
    let wrong = session.solution()[hold_r][hold_c] % 9 + 1;
    assert_eq!(
        session.place_digit(hold_r, hold_c, wrong),
        Ok(Placement::Incorrect)
    );
    assert!(!session.is_won());
    assert!(!is_board_solved(session.board(), session.solution()));
    assert_eq!(session.invalid_cells().len(), 1);

    session.clear_cell(hold_r, hold_c).unwrap();
    assert!(session.invalid_cells().is_empty());
    assert!(!session.is_won());

    // The right digit finishes the game.
    let right = session.solution()[hold_r][hold_c];
    assert_eq!(
        session.place_digit(hold_r, hold_c, right),
        Ok(Placement::Correct)
    );
    assert!(session.is_won());
}

#[test]
fn grids_cross_the_serde_boundary_intact() {
    let session = medium_session(13);

    let json = serde_json::to_string(session.board()).unwrap();
    let grid: Grid = serde_json::from_str(&json).unwrap();
    assert_eq!(&grid, session.board());

    let json = serde_json::to_string(&Difficulty::Hard).unwrap();
    let difficulty: Difficulty = serde_json::from_str(&json).unwrap();
    assert_eq!(difficulty, Difficulty::Hard);
}
