//! Chain Reaction board, rules, and text notation.

pub mod logic;
pub mod notation;
pub mod types;

pub use logic::{check_winner, play_move, resolve_explosions, MoveOutcome};
pub use types::{new_game, Cell, Grid, Position, Side};
