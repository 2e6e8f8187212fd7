//! Match simulator for AI-vs-AI analysis.
//!
//! Plays configured agents against each other to compare:
//! - Heuristic weightings
//! - Search depths
//! - Search players against the random baseline
//!
//! Games run through `game::play_move`, so results match real play.

mod config;
mod report;
mod runner;

pub use config::MatchConfig;
pub use report::{GameRecord, MatchReport};
pub use runner::{play_game, run_matches};
