//! Chain Reaction - Game Engine and Adversarial AI Library
//!
//! Grid model, explosion engine and win rule in `game`; heuristic
//! evaluation, alpha-beta search and a random baseline in `ai`; AI-vs-AI
//! match running in `simulator`.

pub mod ai;
pub mod constants;
pub mod error;
pub mod game;
pub mod simulator;

pub use ai::{AdversarialAgent, Agent, AgentSpec, Heuristic, HeuristicWeights, ReflexAgent};
pub use error::{GameError, Result};
pub use game::{play_move, Grid, MoveOutcome, Position, Side};
