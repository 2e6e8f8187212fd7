//! Match report generation.

use crate::game::Side;
use serde::Serialize;

/// Result of a single game.
#[derive(Debug, Clone, Serialize)]
pub struct GameRecord {
    pub index: u32,
    /// None if the game hit the turn limit or both sides were stuck
    pub winner: Option<Side>,
    /// Moves actually played (forfeits excluded)
    pub turns: u32,
    pub red_forfeits: u32,
    pub blue_forfeits: u32,
    pub red_orbs: u32,
    pub blue_orbs: u32,
    pub elapsed_ms: u64,
    /// Final position in board notation
    pub final_board: String,
}

/// Aggregated results from a series of games.
#[derive(Debug, Clone, Serialize)]
pub struct MatchReport {
    pub red_label: String,
    pub blue_label: String,
    pub num_games: u32,
    pub red_wins: u32,
    pub blue_wins: u32,
    pub unfinished: u32,

    /// Average length of finished games
    pub avg_turns: f64,
    pub avg_elapsed_ms: f64,

    pub records: Vec<GameRecord>,
}

impl MatchReport {
    pub fn from_records(red_label: String, blue_label: String, records: Vec<GameRecord>) -> Self {
        let num_games = records.len() as u32;
        let wins_for = |side: Side| records.iter().filter(|r| r.winner == Some(side)).count() as u32;
        let red_wins = wins_for(Side::Red);
        let blue_wins = wins_for(Side::Blue);
        let finished = red_wins + blue_wins;

        let avg_turns = records
            .iter()
            .filter(|r| r.winner.is_some())
            .map(|r| r.turns as f64)
            .sum::<f64>()
            / finished.max(1) as f64;
        let avg_elapsed_ms =
            records.iter().map(|r| r.elapsed_ms as f64).sum::<f64>() / num_games.max(1) as f64;

        Self {
            red_label,
            blue_label,
            num_games,
            red_wins,
            blue_wins,
            unfinished: num_games - finished,
            avg_turns,
            avg_elapsed_ms,
            records,
        }
    }

    /// Fraction of all games won by `side`, 0.0 for an empty report.
    pub fn win_rate(&self, side: Side) -> f64 {
        if self.num_games == 0 {
            return 0.0;
        }
        let wins = match side {
            Side::Red => self.red_wins,
            Side::Blue => self.blue_wins,
        };
        wins as f64 / self.num_games as f64
    }

    /// Generate a text report.
    pub fn to_text(&self) -> String {
        let mut report = String::new();

        report.push_str("═══════════════════════════════════════════════════════════════\n");
        report.push_str("                       MATCH REPORT\n");
        report.push_str("═══════════════════════════════════════════════════════════════\n\n");

        report.push_str(&format!("  Red:  {}\n", self.red_label));
        report.push_str(&format!("  Blue: {}\n\n", self.blue_label));

        report.push_str("── RESULTS ──────────────────────────────────────────────────────\n");
        for side in Side::ALL {
            let wins = match side {
                Side::Red => self.red_wins,
                Side::Blue => self.blue_wins,
            };
            let pct = self.win_rate(side) * 100.0;
            let bar = "█".repeat((pct / 5.0) as usize);
            report.push_str(&format!(
                "  {:<5} {:4} wins {:>5.1}% {}\n",
                side.name(),
                wins,
                pct,
                bar
            ));
        }
        report.push_str(&format!("  Unfinished: {}\n\n", self.unfinished));

        report.push_str("── GAMES ────────────────────────────────────────────────────────\n");
        report.push_str(&format!("  Avg Moves (finished): {:.1}\n", self.avg_turns));
        report.push_str(&format!("  Avg Time per Game:    {:.1} ms\n", self.avg_elapsed_ms));
        let forfeits: u32 = self
            .records
            .iter()
            .map(|r| r.red_forfeits + r.blue_forfeits)
            .sum();
        if forfeits > 0 {
            report.push_str(&format!("  ⚠️  {} forfeited turns\n", forfeits));
        }

        report.push_str("\n═══════════════════════════════════════════════════════════════\n");

        report
    }

    /// Generate a JSON report for further analysis.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}
