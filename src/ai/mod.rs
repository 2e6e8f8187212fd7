//! Computer players: alpha-beta search over weighted heuristics, and a
//! random baseline.

pub mod heuristics;
pub mod minimax;
pub mod reflex;

pub use heuristics::{Heuristic, HeuristicWeights};
pub use minimax::{search, AdversarialAgent, SearchOutcome};
pub use reflex::ReflexAgent;

use crate::constants::DEFAULT_SEARCH_DEPTH;
use crate::game::{Grid, Position, Side};
use serde::{Deserialize, Serialize};

/// A player that picks moves for one side.
pub trait Agent {
    fn side(&self) -> Side;

    /// Choose a move for this agent's side, whoever the grid says is to
    /// move. `None` means the side has nothing to play (stuck, or the game
    /// is over) and forfeits the turn.
    fn best_move(&mut self, grid: &Grid) -> Option<Position>;
}

/// Serializable description of a player, used by match configs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AgentSpec {
    Random,
    Minimax {
        weights: HeuristicWeights,
        depth: u32,
    },
}

impl Default for AgentSpec {
    fn default() -> Self {
        AgentSpec::minimax(HeuristicWeights::uniform(), DEFAULT_SEARCH_DEPTH)
    }
}

impl AgentSpec {
    pub fn minimax(weights: HeuristicWeights, depth: u32) -> Self {
        AgentSpec::Minimax { weights, depth }
    }

    /// Parse a player name: `random`, `minimax`, `material`, `threat`, or
    /// `h1`..`h5` for a single heuristic. Search players use `depth`.
    pub fn from_name(name: &str, depth: u32) -> Option<Self> {
        let weights = match name.to_ascii_lowercase().as_str() {
            "random" => return Some(AgentSpec::Random),
            "minimax" => HeuristicWeights::uniform(),
            "material" => HeuristicWeights::material_focus(),
            "threat" => HeuristicWeights::threat_focus(),
            other => {
                let id = other.strip_prefix('h')?.parse().ok()?;
                HeuristicWeights::only(Heuristic::from_id(id)?)
            }
        };
        Some(AgentSpec::minimax(weights, depth))
    }

    /// Build a player for `side`. A seed makes its choices reproducible.
    pub fn build(&self, side: Side, seed: Option<u64>) -> Box<dyn Agent> {
        match (self, seed) {
            (AgentSpec::Random, Some(seed)) => Box::new(ReflexAgent::with_seed(side, seed)),
            (AgentSpec::Random, None) => Box::new(ReflexAgent::new(side)),
            (AgentSpec::Minimax { weights, depth }, Some(seed)) => Box::new(
                AdversarialAgent::with_seed(side, weights.clone(), *depth, seed),
            ),
            (AgentSpec::Minimax { weights, depth }, None) => {
                Box::new(AdversarialAgent::new(side, weights.clone(), *depth))
            }
        }
    }

    /// Short label for reports.
    pub fn label(&self) -> String {
        match self {
            AgentSpec::Random => "Random".to_string(),
            AgentSpec::Minimax { depth, .. } => format!("Minimax (depth {depth})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name() {
        assert_eq!(AgentSpec::from_name("random", 3), Some(AgentSpec::Random));
        assert_eq!(
            AgentSpec::from_name("Threat", 2),
            Some(AgentSpec::minimax(HeuristicWeights::threat_focus(), 2))
        );
        assert_eq!(
            AgentSpec::from_name("h4", 3),
            Some(AgentSpec::minimax(HeuristicWeights::only(Heuristic::Control), 3))
        );
        assert_eq!(AgentSpec::from_name("h9", 3), None);
        assert_eq!(AgentSpec::from_name("human", 3), None);
    }

    #[test]
    fn test_build_sets_side() {
        let spec = AgentSpec::default();
        let agent = spec.build(Side::Blue, Some(1));
        assert_eq!(agent.side(), Side::Blue);
        let agent = AgentSpec::Random.build(Side::Red, None);
        assert_eq!(agent.side(), Side::Red);
    }

    #[test]
    fn test_built_agents_play_legal_moves() {
        let grid = Grid::default();
        for spec in [AgentSpec::Random, AgentSpec::minimax(HeuristicWeights::uniform(), 1)] {
            let mut agent = spec.build(Side::Red, Some(5));
            let mv = agent.best_move(&grid).unwrap();
            assert!(grid.is_legal_for(mv, Side::Red));
        }
    }

    #[test]
    fn test_agents_move_for_their_own_side() {
        // Red to move; Blue's only playable cell is (1,1)
        let grid: Grid = "1R 1R\n1R 1B\n".parse().unwrap();
        for spec in [AgentSpec::Random, AgentSpec::minimax(HeuristicWeights::uniform(), 2)] {
            let mut agent = spec.build(Side::Blue, Some(1));
            assert_eq!(agent.best_move(&grid), Some((1, 1)), "{}", spec.label());
        }
    }

    #[test]
    fn test_spec_json() {
        let spec = AgentSpec::minimax(HeuristicWeights::material_focus(), 4);
        let json = serde_json::to_string(&spec).unwrap();
        assert!(json.contains("\"kind\":\"minimax\""));
        let parsed: AgentSpec = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, spec);

        let random: AgentSpec = serde_json::from_str(r#"{"kind":"random"}"#).unwrap();
        assert_eq!(random, AgentSpec::Random);
    }

    #[test]
    fn test_labels() {
        assert_eq!(AgentSpec::Random.label(), "Random");
        assert_eq!(AgentSpec::default().label(), "Minimax (depth 3)");
    }
}
