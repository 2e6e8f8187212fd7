//! Match configuration.

use crate::ai::{AgentSpec, HeuristicWeights};
use crate::constants::{DEFAULT_COLS, DEFAULT_MAX_TURNS, DEFAULT_ROWS, DEFAULT_SEARCH_DEPTH};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Configuration for a series of AI-vs-AI games.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Number of games to play
    pub num_games: u32,

    /// Random seed for reproducibility (None = random)
    pub seed: Option<u64>,

    /// Board size
    pub rows: usize,
    pub cols: usize,

    /// Moves per game before it is called unfinished
    pub max_turns: u32,

    /// Red moves first
    pub red: AgentSpec,
    pub blue: AgentSpec,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            num_games: 20,
            seed: None,
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            max_turns: DEFAULT_MAX_TURNS,
            red: AgentSpec::minimax(HeuristicWeights::material_focus(), DEFAULT_SEARCH_DEPTH),
            blue: AgentSpec::minimax(HeuristicWeights::threat_focus(), DEFAULT_SEARCH_DEPTH),
        }
    }
}

impl MatchConfig {
    /// Short run with shallow search on both sides
    pub fn quick() -> Self {
        Self {
            num_games: 10,
            red: AgentSpec::minimax(HeuristicWeights::material_focus(), 2),
            blue: AgentSpec::minimax(HeuristicWeights::threat_focus(), 2),
            ..Default::default()
        }
    }

    /// Search player (Red) against the random baseline (Blue)
    pub fn baseline(depth: u32) -> Self {
        Self {
            red: AgentSpec::minimax(HeuristicWeights::uniform(), depth),
            blue: AgentSpec::Random,
            ..Default::default()
        }
    }

    /// Load a config from JSON. Missing fields take their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }
}
