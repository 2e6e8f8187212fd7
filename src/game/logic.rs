//! Chain Reaction rules: cascade resolution, win detection, and the
//! place → resolve → check → switch turn sequence.

use super::types::{Grid, Position, Side};
use crate::constants::WIN_ORB_THRESHOLD;
use std::collections::VecDeque;

/// Result of playing one full move via [`play_move`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The cell was not playable; the grid is unchanged.
    Illegal,
    /// The move resolved and the turn passed to the opponent.
    Continue,
    /// The move ended the game.
    Won(Side),
}

/// Resolve every pending explosion breadth-first.
///
/// All cells at or above critical mass are queued up front; neighbors that
/// reach critical mass are queued as they fill up. A cell is queued at most
/// once per call, so any cell left unstable explodes on the next call.
/// Afterwards the termination rule runs and may set `is_game_over`.
/// Returns the number of explosions.
pub fn resolve_explosions(grid: &mut Grid) -> usize {
    if grid.is_game_over {
        return 0;
    }

    let (rows, cols) = (grid.rows(), grid.cols());
    let mut scheduled = vec![false; rows * cols];
    let mut queue: VecDeque<Position> = VecDeque::new();

    for ((r, c), cell) in grid.iter() {
        if cell.orbs >= grid.critical_mass(r, c) {
            queue.push_back((r, c));
            scheduled[r * cols + c] = true;
        }
    }

    let mut explosions = 0;
    while let Some((r, c)) = queue.pop_front() {
        if grid.is_game_over {
            break;
        }

        let critical = grid.critical_mass(r, c);
        let cell = grid.cell_mut(r, c);
        let color = cell.owner;
        if cell.orbs <= critical {
            cell.orbs = 0;
            cell.owner = None;
        } else {
            cell.orbs -= critical;
        }
        explosions += 1;

        let neighbors: Vec<Position> = grid.neighbors(r, c).collect();
        for (nr, nc) in neighbors {
            let neighbor_critical = grid.critical_mass(nr, nc);
            let neighbor = grid.cell_mut(nr, nc);
            neighbor.orbs += 1;
            neighbor.owner = color;

            let idx = nr * cols + nc;
            if neighbor.orbs >= neighbor_critical && !scheduled[idx] {
                queue.push_back((nr, nc));
                scheduled[idx] = true;
            }
        }
    }

    if check_winner(grid).is_some() {
        grid.is_game_over = true;
    }

    explosions
}

/// Decide whether the game has a winner.
///
/// Once more than three orbs are on the board, the only side still holding
/// orbs wins. A completely empty board is scored as a win for the side that
/// is not to move; play can never reach it because every placement adds an
/// orb and explosions only move them.
pub fn check_winner(grid: &Grid) -> Option<Side> {
    let red = grid.orbs_of(Side::Red);
    let blue = grid.orbs_of(Side::Blue);
    let total = red + blue;

    if total > WIN_ORB_THRESHOLD {
        match (red > 0, blue > 0) {
            (true, false) => Some(Side::Red),
            (false, true) => Some(Side::Blue),
            _ => None,
        }
    } else if total == 0 {
        Some(grid.current_player.opponent())
    } else {
        None
    }
}

/// Play a full move for the current player: place, resolve, check for a
/// winner, and hand the turn over if the game goes on.
pub fn play_move(grid: &mut Grid, (row, col): Position) -> MoveOutcome {
    if !grid.place(row, col) {
        return MoveOutcome::Illegal;
    }
    resolve_explosions(grid);
    match check_winner(grid) {
        Some(winner) => {
            grid.is_game_over = true;
            MoveOutcome::Won(winner)
        }
        None => {
            grid.switch_player();
            MoveOutcome::Continue
        }
    }
}
