//! Positional heuristics for Chain Reaction and their weighted combination.
//!
//! Each heuristic scores a grid from one side's point of view; larger is
//! better for that side. The search only ever sees the weighted sum.

use crate::constants::DEFAULT_HEURISTIC_WEIGHT;
use crate::game::{Grid, Position, Side};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Flat bonus per owned cell on top of its orb count.
const MATERIAL_CELL_BONUS: f64 = 3.0;

/// The five available positional heuristics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Heuristic {
    /// Orbs plus a flat bonus per owned cell
    Material,
    /// Distance from exploding: own safe cells minus opponent safe cells
    Stability,
    /// Opponent cells about to explode next to our cells
    Threat,
    /// Neighbor count of owned cells, own minus opponent
    Control,
    /// Average spread of owned cells, own minus opponent
    Diversity,
}

impl Heuristic {
    pub const ALL: [Heuristic; 5] = [
        Heuristic::Material,
        Heuristic::Stability,
        Heuristic::Threat,
        Heuristic::Control,
        Heuristic::Diversity,
    ];

    /// Numeric id 1-5, as offered in player selection.
    pub fn id(&self) -> u8 {
        match self {
            Heuristic::Material => 1,
            Heuristic::Stability => 2,
            Heuristic::Threat => 3,
            Heuristic::Control => 4,
            Heuristic::Diversity => 5,
        }
    }

    pub fn from_id(id: u8) -> Option<Self> {
        Self::ALL.iter().copied().find(|h| h.id() == id)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Heuristic::Material => "Material",
            Heuristic::Stability => "Stability",
            Heuristic::Threat => "Threat",
            Heuristic::Control => "Control",
            Heuristic::Diversity => "Diversity",
        }
    }

    /// Score `grid` for `side` with this heuristic.
    pub fn score(&self, grid: &Grid, side: Side) -> f64 {
        match self {
            Heuristic::Material => material(grid, side),
            Heuristic::Stability => stability(grid, side),
            Heuristic::Threat => threat(grid, side),
            Heuristic::Control => control(grid, side),
            Heuristic::Diversity => diversity(grid, side),
        }
    }
}

/// Heuristic → weight table. Heuristics without an entry weigh 1.0.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HeuristicWeights(BTreeMap<Heuristic, f64>);

impl HeuristicWeights {
    /// Every heuristic at the default weight.
    pub fn uniform() -> Self {
        Self::default()
    }

    /// A single heuristic at 1.0; every other one switched off.
    pub fn only(heuristic: Heuristic) -> Self {
        Self(
            Heuristic::ALL
                .iter()
                .map(|&h| (h, if h == heuristic { 1.0 } else { 0.0 }))
                .collect(),
        )
    }

    /// Favors raw orb count and threats.
    pub fn material_focus() -> Self {
        Self::from_pairs(&[
            (Heuristic::Material, 1.5),
            (Heuristic::Stability, 1.0),
            (Heuristic::Threat, 1.2),
            (Heuristic::Control, 0.8),
            (Heuristic::Diversity, 0.5),
        ])
    }

    /// Favors threats and safe cells, barely cares about spread.
    pub fn threat_focus() -> Self {
        Self::from_pairs(&[
            (Heuristic::Material, 1.0),
            (Heuristic::Stability, 1.2),
            (Heuristic::Threat, 1.5),
            (Heuristic::Control, 1.0),
            (Heuristic::Diversity, 0.3),
        ])
    }

    pub fn from_pairs(pairs: &[(Heuristic, f64)]) -> Self {
        Self(pairs.iter().copied().collect())
    }

    pub fn weight(&self, heuristic: Heuristic) -> f64 {
        self.0
            .get(&heuristic)
            .copied()
            .unwrap_or(DEFAULT_HEURISTIC_WEIGHT)
    }

    /// Weighted sum of all heuristics for `side`.
    pub fn evaluate(&self, grid: &Grid, side: Side) -> f64 {
        Heuristic::ALL
            .iter()
            .map(|&h| (h, self.weight(h)))
            .filter(|&(_, w)| w != 0.0)
            .map(|(h, w)| w * h.score(grid, side))
            .sum()
    }
}

/// Sum of `orbs + 3` over cells owned by `side`.
pub fn material(grid: &Grid, side: Side) -> f64 {
    grid.iter()
        .filter(|(_, cell)| cell.owner == Some(side))
        .map(|(_, cell)| cell.orbs as f64 + MATERIAL_CELL_BONUS)
        .sum()
}

/// Own slack to critical mass minus the opponent's.
pub fn stability(grid: &Grid, side: Side) -> f64 {
    let mut score = 0.0;
    for ((r, c), cell) in grid.iter() {
        let Some(owner) = cell.owner else {
            continue;
        };
        let slack = (grid.critical_mass(r, c) as f64 - cell.orbs as f64).max(0.0);
        if owner == side {
            score += slack;
        } else {
            score -= slack;
        }
    }
    score
}

/// One point per opponent cell within one orb of exploding that touches at
/// least one of our cells.
pub fn threat(grid: &Grid, side: Side) -> f64 {
    let opponent = side.opponent();
    let mut score = 0.0;
    for ((r, c), cell) in grid.iter() {
        if cell.owner != Some(opponent) {
            continue;
        }
        if cell.orbs + 1 < grid.critical_mass(r, c) {
            continue;
        }
        let touches_us = grid
            .neighbors(r, c)
            .any(|(nr, nc)| grid.cell(nr, nc).is_some_and(|n| n.owner == Some(side)));
        if touches_us {
            score += 1.0;
        }
    }
    score
}

/// Sum of neighbor counts of own cells minus the opponent's.
pub fn control(grid: &Grid, side: Side) -> f64 {
    let mut own = 0.0;
    let mut other = 0.0;
    for ((r, c), cell) in grid.iter() {
        match cell.owner {
            Some(owner) if owner == side => own += grid.critical_mass(r, c) as f64,
            Some(_) => other += grid.critical_mass(r, c) as f64,
            None => {}
        }
    }
    own - other
}

/// Average pairwise Manhattan distance of own cells minus the opponent's.
pub fn diversity(grid: &Grid, side: Side) -> f64 {
    average_spread(&grid.cells_of(side)) - average_spread(&grid.cells_of(side.opponent()))
}

fn average_spread(cells: &[Position]) -> f64 {
    let n = cells.len();
    if n < 2 {
        return 0.0;
    }
    let mut total = 0usize;
    for (i, &(r1, c1)) in cells.iter().enumerate() {
        for &(r2, c2) in &cells[i + 1..] {
            total += r1.abs_diff(r2) + c1.abs_diff(c2);
        }
    }
    let pairs = n * (n - 1) / 2;
    total as f64 / pairs as f64
}
