//! Plays configured agents against each other using the real game rules.

use super::config::MatchConfig;
use super::report::{GameRecord, MatchReport};
use crate::ai::Agent;
use crate::constants::BLUE_SEED_OFFSET;
use crate::error::Result;
use crate::game::{play_move, Grid, MoveOutcome, Side};
use log::{debug, info, warn};
use std::time::Instant;

/// Play every game in the config and return the aggregated report.
pub fn run_matches(config: &MatchConfig) -> Result<MatchReport> {
    let mut records = Vec::with_capacity(config.num_games as usize);

    for game_idx in 0..config.num_games {
        let red_seed = config.seed.map(|seed| seed.wrapping_add(game_idx as u64));
        let blue_seed = red_seed.map(|seed| seed.wrapping_add(BLUE_SEED_OFFSET));
        let mut red = config.red.build(Side::Red, red_seed);
        let mut blue = config.blue.build(Side::Blue, blue_seed);

        let mut record = play_game(config, red.as_mut(), blue.as_mut())?;
        record.index = game_idx;

        info!(
            "Game {}/{}: {} after {} moves ({} ms)",
            game_idx + 1,
            config.num_games,
            record.winner.map_or("unfinished", |side| side.name()),
            record.turns,
            record.elapsed_ms
        );
        records.push(record);
    }

    Ok(MatchReport::from_records(
        config.red.label(),
        config.blue.label(),
        records,
    ))
}

/// Play one game from an empty board, Red first.
///
/// A side with no move forfeits its turn. The game ends unfinished after two
/// forfeits in a row or once `max_turns` moves have been played.
pub fn play_game(
    config: &MatchConfig,
    red: &mut dyn Agent,
    blue: &mut dyn Agent,
) -> Result<GameRecord> {
    let start = Instant::now();
    let mut grid = Grid::new(config.rows, config.cols)?;
    let mut turns = 0;
    let mut forfeits = [0u32; 2];
    let mut consecutive_forfeits = 0;

    let winner = loop {
        if turns >= config.max_turns {
            break None;
        }

        let side = grid.current_player;
        let agent: &mut dyn Agent = match side {
            Side::Red => &mut *red,
            Side::Blue => &mut *blue,
        };

        let outcome = match agent.best_move(&grid) {
            Some(pos) => {
                let outcome = play_move(&mut grid, pos);
                debug!("{} plays {:?}: {:?}", side.name(), pos, outcome);
                if outcome == MoveOutcome::Illegal {
                    warn!("{} chose illegal move {:?}, turn forfeited", side.name(), pos);
                }
                outcome
            }
            None => {
                warn!("{} has no valid moves, turn forfeited", side.name());
                MoveOutcome::Illegal
            }
        };

        match outcome {
            MoveOutcome::Won(side) => {
                turns += 1;
                break Some(side);
            }
            MoveOutcome::Continue => {
                turns += 1;
                consecutive_forfeits = 0;
            }
            MoveOutcome::Illegal => {
                forfeits[side_index(side)] += 1;
                consecutive_forfeits += 1;
                if consecutive_forfeits >= 2 {
                    break None;
                }
                grid.switch_player();
            }
        }
    };

    Ok(GameRecord {
        index: 0,
        winner,
        turns,
        red_forfeits: forfeits[side_index(Side::Red)],
        blue_forfeits: forfeits[side_index(Side::Blue)],
        red_orbs: grid.orbs_of(Side::Red),
        blue_orbs: grid.orbs_of(Side::Blue),
        elapsed_ms: start.elapsed().as_millis() as u64,
        final_board: grid.to_string(),
    })
}

fn side_index(side: Side) -> usize {
    match side {
        Side::Red => 0,
        Side::Blue => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::AgentSpec;
    use crate::game::Position;

    /// Agent that never finds a move.
    struct Passer(Side);

    impl Agent for Passer {
        fn side(&self) -> Side {
            self.0
        }

        fn best_move(&mut self, _grid: &Grid) -> Option<Position> {
            None
        }
    }

    /// Agent that always tries the same cell.
    struct Stubborn(Side, Position);

    impl Agent for Stubborn {
        fn side(&self) -> Side {
            self.0
        }

        fn best_move(&mut self, _grid: &Grid) -> Option<Position> {
            Some(self.1)
        }
    }

    fn small_config() -> MatchConfig {
        MatchConfig {
            num_games: 4,
            seed: Some(7),
            rows: 3,
            cols: 3,
            max_turns: 200,
            red: AgentSpec::Random,
            blue: AgentSpec::Random,
        }
    }

    #[test]
    fn test_two_forfeits_end_game() {
        let config = small_config();
        let record = play_game(&config, &mut Passer(Side::Red), &mut Passer(Side::Blue)).unwrap();
        assert_eq!(record.winner, None);
        assert_eq!(record.turns, 0);
        assert_eq!(record.red_forfeits, 1);
        assert_eq!(record.blue_forfeits, 1);
    }

    #[test]
    fn test_single_forfeit_passes_turn() {
        // Red never moves, so Blue alone gets past three orbs and wins
        let config = small_config();
        let mut blue = AgentSpec::Random.build(Side::Blue, Some(3));
        let record = play_game(&config, &mut Passer(Side::Red), blue.as_mut()).unwrap();
        assert_eq!(record.winner, Some(Side::Blue));
        assert_eq!(record.red_orbs, 0);
        assert!(record.red_forfeits >= 2);
    }

    #[test]
    fn test_illegal_move_is_forfeit() {
        // Both sides insist on (0,0); whoever does not hold it loses the turn
        let config = small_config();
        let mut red = Stubborn(Side::Red, (0, 0));
        let mut blue = Stubborn(Side::Blue, (0, 0));
        let record = play_game(&config, &mut red, &mut blue).unwrap();
        assert_eq!(record.winner, Some(Side::Blue));
        assert_eq!(record.turns, 4);
        assert_eq!(record.red_forfeits, 1);
        assert_eq!(record.blue_forfeits, 1);
    }

    #[test]
    fn test_max_turns_cuts_game() {
        let config = MatchConfig {
            max_turns: 3,
            ..small_config()
        };
        let mut red = AgentSpec::Random.build(Side::Red, Some(1));
        let mut blue = AgentSpec::Random.build(Side::Blue, Some(2));
        let record = play_game(&config, red.as_mut(), blue.as_mut()).unwrap();
        assert_eq!(record.turns, 3);
        assert_eq!(record.winner, None);
    }

    #[test]
    fn test_invalid_board_is_error() {
        let config = MatchConfig {
            rows: 1,
            ..small_config()
        };
        assert!(run_matches(&config).is_err());
    }

    #[test]
    fn test_run_matches_counts_games() {
        let report = run_matches(&small_config()).unwrap();
        assert_eq!(report.num_games, 4);
        assert_eq!(report.records.len(), 4);
        assert_eq!(
            report.red_wins + report.blue_wins + report.unfinished,
            report.num_games
        );
        for (idx, record) in report.records.iter().enumerate() {
            assert_eq!(record.index as usize, idx);
        }
    }

    #[test]
    fn test_seeded_runs_repeat() {
        let a = run_matches(&small_config()).unwrap();
        let b = run_matches(&small_config()).unwrap();
        let summary = |r: &MatchReport| {
            r.records
                .iter()
                .map(|g| (g.winner, g.turns, g.final_board.clone()))
                .collect::<Vec<_>>()
        };
        assert_eq!(summary(&a), summary(&b));
    }
}
