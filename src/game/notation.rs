//! Plain-text board format.
//!
//! One line per row, cells separated by whitespace: `0` for an empty cell,
//! otherwise the orb count followed by the owner tag, e.g. `3R` or `1B`.
//!
//! ```text
//! 0 1R 0
//! 2B 0 0
//! ```

use super::types::{Grid, Side};
use crate::error::GameError;
use std::fmt;
use std::str::FromStr;

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.rows() {
            let line: Vec<String> = (0..self.cols())
                .map(|col| match self.cell(row, col) {
                    Some(cell) => match cell.owner {
                        Some(side) => format!("{}{}", cell.orbs, side.symbol()),
                        None => "0".to_string(),
                    },
                    None => "0".to_string(),
                })
                .collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}

impl FromStr for Grid {
    type Err = GameError;

    /// Parse a board. The result has Red to move and is not marked finished.
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let mut rows: Vec<Vec<(u32, Option<Side>)>> = Vec::new();

        for (idx, line) in text.lines().enumerate() {
            let line_no = idx + 1;
            if line.trim().is_empty() {
                continue;
            }
            let row = line
                .split_whitespace()
                .map(|token| parse_cell(token, line_no))
                .collect::<Result<Vec<_>, _>>()?;

            if let Some(first) = rows.first() {
                if first.len() != row.len() {
                    return Err(GameError::ParseBoard {
                        line: line_no,
                        reason: format!("expected {} cells, found {}", first.len(), row.len()),
                    });
                }
            }
            rows.push(row);
        }

        let cols = rows.first().map_or(0, Vec::len);
        let mut grid = Grid::new(rows.len(), cols)?;
        for (r, row) in rows.iter().enumerate() {
            for (c, &(orbs, owner)) in row.iter().enumerate() {
                grid.set_cell(r, c, orbs, owner);
            }
        }
        Ok(grid)
    }
}

fn parse_cell(token: &str, line: usize) -> Result<(u32, Option<Side>), GameError> {
    if token == "0" {
        return Ok((0, None));
    }

    let bad = |reason: String| GameError::ParseBoard { line, reason };

    let tag = token
        .chars()
        .last()
        .ok_or_else(|| bad("empty cell token".to_string()))?;
    let side = Side::from_symbol(tag).ok_or_else(|| bad(format!("unknown owner in {token:?}")))?;
    let count = &token[..token.len() - tag.len_utf8()];
    let orbs: u32 = count
        .parse()
        .map_err(|_| bad(format!("bad orb count in {token:?}")))?;
    if orbs == 0 {
        return Err(bad(format!("owned cell with no orbs: {token:?}")));
    }
    Ok((orbs, Some(side)))
}
