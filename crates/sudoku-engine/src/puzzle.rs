use rand::rng;
use rand::seq::SliceRandom;
use rand::RngExt;

use crate::board::{empty_grid, Cell, Grid, SolvedBoard};
use crate::difficulty::Difficulty;

/// Fresh-board re-rolls before carving settles for the closest attempt.
const MAX_CARVE_ATTEMPTS: usize = 10;

/// Check `val` against row, column, and box on a raw digit grid.
fn fits(grid: &[[u8; 9]; 9], row: usize, col: usize, val: u8) -> bool {
    for c in 0..9 {
        if grid[row][c] == val {
            return false;
        }
    }
    for r in 0..9 {
        if grid[r][col] == val {
            return false;
        }
    }
    let box_r = (row / 3) * 3;
    let box_c = (col / 3) * 3;
    for r in box_r..box_r + 3 {
        for c in box_c..box_c + 3 {
            if grid[r][c] == val {
                return false;
            }
        }
    }
    true
}

/// Fill the first empty cell (row-major) with a randomly ordered candidate
/// and recurse; backtrack on dead ends. Returns true once no empty cell
/// remains. Recursion depth is bounded by the 81 cells.
fn fill_backtracking<R: RngExt>(grid: &mut [[u8; 9]; 9], rng: &mut R) -> bool {
    for row in 0..9 {
        for col in 0..9 {
            if grid[row][col] == 0 {
                let mut digits: [u8; 9] = [1, 2, 3, 4, 5, 6, 7, 8, 9];
                digits.shuffle(rng);
                for val in digits {
                    if fits(grid, row, col, val) {
                        grid[row][col] = val;
                        if fill_backtracking(grid, rng) {
                            return true;
                        }
                        grid[row][col] = 0;
                    }
                }
                return false;
            }
        }
    }
    true
}

/// Count completions of `grid`, giving up once `limit` is reached. Carving
/// only needs to tell "exactly one" from "more than one". The grid is
/// restored before returning.
fn count_solutions(grid: &mut [[u8; 9]; 9], limit: usize) -> usize {
    for row in 0..9 {
        for col in 0..9 {
            if grid[row][col] == 0 {
                let mut count = 0;
                for val in 1..=9 {
                    if fits(grid, row, col, val) {
                        grid[row][col] = val;
                        count += count_solutions(grid, limit - count);
                        grid[row][col] = 0;
                        if count >= limit {
                            return count;
                        }
                    }
                }
                return count;
            }
        }
    }
    1
}

/// Generate a fully solved board by randomized backtracking from an empty
/// grid. Always succeeds: every state this search reaches extends to a full
/// solution.
pub fn generate_solved_board() -> SolvedBoard {
    generate_solved_board_with_rng(&mut rng())
}

/// Seeded variant of [`generate_solved_board`].
pub fn generate_solved_board_with_rng<R: RngExt>(rng: &mut R) -> SolvedBoard {
    let mut grid = [[0u8; 9]; 9];
    fill_backtracking(&mut grid, rng);
    grid
}

/// One carving pass: clear cells in uniform random order, keeping only
/// removals that leave exactly one completion. A rejected cell can never
/// become removable later (clearing more cells only adds completions), so a
/// single pass over all 81 positions is exhaustive.
fn carve_unique<R: RngExt>(
    solution: &SolvedBoard,
    remove_count: usize,
    rng: &mut R,
) -> ([[u8; 9]; 9], usize) {
    let mut positions: Vec<(usize, usize)> = Vec::with_capacity(81);
    for r in 0..9 {
        for c in 0..9 {
            positions.push((r, c));
        }
    }
    positions.shuffle(rng);

    let mut grid = *solution;
    let mut removed = 0;
    for (r, c) in positions {
        if removed == remove_count {
            break;
        }
        let backup = grid[r][c];
        grid[r][c] = 0;
        if count_solutions(&mut grid, 2) == 1 {
            removed += 1;
        } else {
            grid[r][c] = backup;
        }
    }
    (grid, removed)
}

/// Freeze surviving digits as givens.
fn freeze_givens(grid: &[[u8; 9]; 9]) -> Grid {
    let mut out = empty_grid();
    for r in 0..9 {
        for c in 0..9 {
            if grid[r][c] != 0 {
                out[r][c] = Cell::Given(grid[r][c]);
            }
        }
    }
    out
}

/// Carve a puzzle out of a freshly generated solution.
///
/// Exactly `difficulty.cells_to_remove()` cells are cleared. Each removal is
/// vetted by the solution counter so the puzzle keeps a unique completion;
/// a board that runs out of safely removable cells before the quota is met
/// is re-rolled from a new solution, and as a last resort unvetted cells are
/// cleared so the quota always holds.
pub fn generate_puzzle(difficulty: Difficulty) -> (Grid, SolvedBoard) {
    generate_puzzle_with_rng(difficulty, &mut rng())
}

/// Seeded variant of [`generate_puzzle`].
pub fn generate_puzzle_with_rng<R: RngExt>(
    difficulty: Difficulty,
    rng: &mut R,
) -> (Grid, SolvedBoard) {
    let remove_count = difficulty.cells_to_remove();

    let mut best_grid = [[0u8; 9]; 9];
    let mut best_solution = [[0u8; 9]; 9];
    let mut best_removed = 0;

    for _ in 0..MAX_CARVE_ATTEMPTS {
        let solution = generate_solved_board_with_rng(rng);
        let (grid, removed) = carve_unique(&solution, remove_count, rng);
        if removed == remove_count {
            return (freeze_givens(&grid), solution);
        }
        if removed >= best_removed {
            best_grid = grid;
            best_solution = solution;
            best_removed = removed;
        }
    }

    // Every attempt stalled. Top up the closest attempt with unvetted
    // removals so the quota still holds exactly; uniqueness is best-effort
    // past this point.
    let mut removed = best_removed;
    while removed < remove_count {
        let row: usize = rng.random_range(0..9);
        let col: usize = rng.random_range(0..9);
        if best_grid[row][col] != 0 {
            best_grid[row][col] = 0;
            removed += 1;
        }
    }
    (freeze_givens(&best_grid), best_solution)
}
