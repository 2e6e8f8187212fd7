//! Depth-limited minimax with alpha-beta pruning.
//!
//! Every node works on its own clone of the grid, so the caller's grid is
//! never touched. Legal moves are shuffled before expansion; the shuffle
//! only decides between equally scored moves.

use super::heuristics::HeuristicWeights;
use super::Agent;
use crate::game::{check_winner, resolve_explosions, Grid, Position, Side};
use log::debug;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// What a search found, plus how much work it took.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchOutcome {
    /// Chosen move, `None` when the root is terminal or has no legal move
    pub best_move: Option<Position>,
    /// Minimax value of the root from the searching side's view
    pub score: f64,
    /// Nodes visited, root included
    pub nodes: u64,
    /// Sibling loops cut short by alpha-beta
    pub cutoffs: u64,
}

struct Searcher<'a, R: Rng> {
    side: Side,
    weights: &'a HeuristicWeights,
    rng: &'a mut R,
    nodes: u64,
    cutoffs: u64,
}

impl<R: Rng> Searcher<'_, R> {
    fn minimax(
        &mut self,
        grid: &Grid,
        depth: u32,
        mut alpha: f64,
        mut beta: f64,
        maximizing: bool,
    ) -> (f64, Option<Position>) {
        self.nodes += 1;

        if depth == 0 || grid.is_game_over {
            return (self.weights.evaluate(grid, self.side), None);
        }

        let mut moves = grid.legal_moves();
        if moves.is_empty() {
            return (self.weights.evaluate(grid, self.side), None);
        }
        moves.shuffle(&mut *self.rng);

        // Kept even if every move loses, so a side with moves always gets one
        let mut best_move = moves[0];
        let mut best_score = if maximizing {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };

        for mv in moves {
            let mut child = grid.clone();
            child.place(mv.0, mv.1);
            resolve_explosions(&mut child);

            let score = match check_winner(&child) {
                Some(winner) if winner == self.side => f64::INFINITY,
                Some(_) => f64::NEG_INFINITY,
                None => {
                    child.switch_player();
                    self.minimax(&child, depth - 1, alpha, beta, !maximizing).0
                }
            };

            if maximizing {
                if score > best_score {
                    best_score = score;
                    best_move = mv;
                }
                alpha = alpha.max(score);
            } else {
                if score < best_score {
                    best_score = score;
                    best_move = mv;
                }
                beta = beta.min(score);
            }

            if beta <= alpha {
                self.cutoffs += 1;
                break;
            }
        }

        (best_score, Some(best_move))
    }
}

/// Search `depth` plies ahead for the player to move in `grid`, scoring
/// leaves from `side`'s point of view. The root maximizes when `side` is to
/// move and minimizes otherwise.
pub fn search<R: Rng>(
    grid: &Grid,
    side: Side,
    weights: &HeuristicWeights,
    depth: u32,
    rng: &mut R,
) -> SearchOutcome {
    let mut searcher = Searcher {
        side,
        weights,
        rng,
        nodes: 0,
        cutoffs: 0,
    };
    let maximizing = grid.current_player == side;
    let (score, best_move) =
        searcher.minimax(grid, depth, f64::NEG_INFINITY, f64::INFINITY, maximizing);

    debug!(
        "{} search depth {}: move {:?}, score {:.2}, {} nodes, {} cutoffs",
        side.name(),
        depth,
        best_move,
        score,
        searcher.nodes,
        searcher.cutoffs
    );

    SearchOutcome {
        best_move,
        score,
        nodes: searcher.nodes,
        cutoffs: searcher.cutoffs,
    }
}

/// Minimax player with a weighted heuristic evaluation.
#[derive(Debug, Clone)]
pub struct AdversarialAgent {
    side: Side,
    weights: HeuristicWeights,
    depth: u32,
    rng: ChaCha8Rng,
    last_outcome: Option<SearchOutcome>,
}

impl AdversarialAgent {
    /// Agent with an entropy-seeded move shuffle. Depth is at least 1.
    pub fn new(side: Side, weights: HeuristicWeights, depth: u32) -> Self {
        Self::with_rng(side, weights, depth, ChaCha8Rng::from_entropy())
    }

    /// Agent whose move shuffle is reproducible from `seed`.
    pub fn with_seed(side: Side, weights: HeuristicWeights, depth: u32, seed: u64) -> Self {
        Self::with_rng(side, weights, depth, ChaCha8Rng::seed_from_u64(seed))
    }

    fn with_rng(side: Side, weights: HeuristicWeights, depth: u32, rng: ChaCha8Rng) -> Self {
        Self {
            side,
            weights,
            depth: depth.max(1),
            rng,
            last_outcome: None,
        }
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Stats from the most recent `best_move` call.
    pub fn last_outcome(&self) -> Option<&SearchOutcome> {
        self.last_outcome.as_ref()
    }
}

impl Agent for AdversarialAgent {
    fn side(&self) -> Side {
        self.side
    }

    fn best_move(&mut self, grid: &Grid) -> Option<Position> {
        let outcome = if grid.current_player == self.side {
            search(grid, self.side, &self.weights, self.depth, &mut self.rng)
        } else {
            let mut own_turn = grid.clone();
            own_turn.current_player = self.side;
            search(&own_turn, self.side, &self.weights, self.depth, &mut self.rng)
        };
        self.last_outcome = Some(outcome);
        outcome.best_move
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::heuristics::Heuristic;

    /// Red wins by playing (0,0): the corner explodes and captures the only Blue cell.
    fn one_move_from_red_win() -> Grid {
        let mut grid = Grid::default();
        grid.set_cell(0, 0, 1, Some(Side::Red));
        grid.set_cell(1, 0, 1, Some(Side::Blue));
        grid.set_cell(3, 5, 2, Some(Side::Red));
        grid.set_cell(4, 4, 1, Some(Side::Red));
        grid
    }

    /// Exhaustive minimax with the same rules and evaluation, no pruning.
    fn plain_minimax(
        grid: &Grid,
        side: Side,
        weights: &HeuristicWeights,
        depth: u32,
        maximizing: bool,
        nodes: &mut u64,
    ) -> f64 {
        *nodes += 1;
        if depth == 0 || grid.is_game_over {
            return weights.evaluate(grid, side);
        }
        let moves = grid.legal_moves();
        if moves.is_empty() {
            return weights.evaluate(grid, side);
        }
        let scores = moves.into_iter().map(|mv| {
            let mut child = grid.clone();
            child.place(mv.0, mv.1);
            resolve_explosions(&mut child);
            match check_winner(&child) {
                Some(w) if w == side => f64::INFINITY,
                Some(_) => f64::NEG_INFINITY,
                None => {
                    child.switch_player();
                    plain_minimax(&child, side, weights, depth - 1, !maximizing, nodes)
                }
            }
        });
        let scores: Vec<f64> = scores.collect();
        if maximizing {
            scores.into_iter().fold(f64::NEG_INFINITY, f64::max)
        } else {
            scores.into_iter().fold(f64::INFINITY, f64::min)
        }
    }

    #[test]
    fn test_takes_forced_win() {
        let grid = one_move_from_red_win();
        for depth in 1..=3 {
            let mut rng = ChaCha8Rng::seed_from_u64(depth as u64);
            let outcome = search(&grid, Side::Red, &HeuristicWeights::uniform(), depth, &mut rng);
            assert_eq!(outcome.best_move, Some((0, 0)), "depth {depth}");
            assert_eq!(outcome.score, f64::INFINITY);
        }
    }

    #[test]
    fn test_forced_win_beats_material_preference() {
        // Stacking (3,5) looks best on material alone; the win must still be taken
        let grid = one_move_from_red_win();
        let weights = HeuristicWeights::only(Heuristic::Material);
        let mut agent = AdversarialAgent::with_seed(Side::Red, weights, 1, 7);
        assert_eq!(agent.best_move(&grid), Some((0, 0)));
    }

    #[test]
    fn test_does_not_mutate_input() {
        let mut grid = one_move_from_red_win();
        grid.place(5, 8);
        grid.switch_player();
        let before = grid.clone();
        let mut agent = AdversarialAgent::with_seed(Side::Blue, HeuristicWeights::uniform(), 2, 3);
        agent.best_move(&grid);
        assert_eq!(grid, before);
    }

    #[test]
    fn test_no_move_when_game_over() {
        let mut grid = Grid::default();
        grid.set_cell(2, 2, 3, Some(Side::Red));
        grid.set_cell(2, 3, 2, Some(Side::Red));
        grid.is_game_over = true;
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let outcome = search(&grid, Side::Red, &HeuristicWeights::uniform(), 3, &mut rng);
        assert_eq!(outcome.best_move, None);
        assert_eq!(outcome.nodes, 1);
    }

    #[test]
    fn test_no_move_when_stuck() {
        // Every cell belongs to Blue, Red is to move
        let grid: Grid = "1B 1B\n1B 1B\n".parse().unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let outcome = search(&grid, Side::Red, &HeuristicWeights::uniform(), 2, &mut rng);
        assert_eq!(outcome.best_move, None);
    }

    #[test]
    fn test_returns_move_even_when_all_lose() {
        // Red's only cell is (1,1); whatever Red does, Blue's reply at (0,1) takes the board
        let grid: Grid = "1B 1B\n1B 0\n".parse().unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let outcome = search(&grid, Side::Red, &HeuristicWeights::uniform(), 2, &mut rng);
        assert_eq!(outcome.best_move, Some((1, 1)));
        assert_eq!(outcome.score, f64::NEG_INFINITY);
    }

    #[test]
    fn test_alpha_beta_matches_plain_minimax() {
        let positions = [
            "1R 0 0\n0 1B 0\n0 0 0\n",
            "1R 2B 0\n0 1R 0\n0 0 1B\n",
            "0 1R 0 1B\n2R 0 0 0\n0 0 2B 0\n",
        ];
        let weights = HeuristicWeights::threat_focus();
        for text in positions {
            let grid: Grid = text.parse().unwrap();
            for depth in 1..=3 {
                let mut plain_nodes = 0;
                let expected = plain_minimax(&grid, Side::Red, &weights, depth, true, &mut plain_nodes);
                let mut rng = ChaCha8Rng::seed_from_u64(depth as u64 + 100);
                let outcome = search(&grid, Side::Red, &weights, depth, &mut rng);
                assert_eq!(outcome.score, expected, "{text} depth {depth}");
                assert!(outcome.nodes <= plain_nodes);
            }
        }
    }

    #[test]
    fn test_pruning_happens() {
        let grid: Grid = "1R 2B 0\n0 1R 0\n0 0 1B\n".parse().unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let outcome = search(&grid, Side::Red, &HeuristicWeights::uniform(), 3, &mut rng);
        assert!(outcome.cutoffs > 0);
    }

    #[test]
    fn test_same_seed_same_move() {
        let mut grid = Grid::default();
        grid.place(2, 4);
        grid.switch_player();
        let mut a = AdversarialAgent::with_seed(Side::Blue, HeuristicWeights::uniform(), 2, 99);
        let mut b = AdversarialAgent::with_seed(Side::Blue, HeuristicWeights::uniform(), 2, 99);
        assert_eq!(a.best_move(&grid), b.best_move(&grid));
    }

    #[test]
    fn test_minimizing_root_when_opponent_to_move() {
        // Blue to move and can win at once; scored from Red's view that is -inf
        let mut grid = Grid::default();
        grid.set_cell(0, 0, 1, Some(Side::Blue));
        grid.set_cell(1, 0, 1, Some(Side::Red));
        grid.set_cell(3, 5, 3, Some(Side::Blue));
        grid.current_player = Side::Blue;
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let outcome = search(&grid, Side::Red, &HeuristicWeights::uniform(), 1, &mut rng);
        assert_eq!(outcome.best_move, Some((0, 0)));
        assert_eq!(outcome.score, f64::NEG_INFINITY);
    }

    #[test]
    fn test_plays_own_side_out_of_turn() {
        // Red to move, but a Blue agent still answers with a Blue move
        let grid: Grid = "1R 1R\n1R 1B\n".parse().unwrap();
        let mut agent = AdversarialAgent::with_seed(Side::Blue, HeuristicWeights::uniform(), 1, 1);
        let mv = agent.best_move(&grid);
        assert_eq!(mv, Some((1, 1)));
        assert!(grid.is_legal_for((1, 1), Side::Blue));
        assert_eq!(grid.current_player, Side::Red);
    }

    #[test]
    fn test_depth_clamped_to_one() {
        let agent = AdversarialAgent::with_seed(Side::Red, HeuristicWeights::uniform(), 0, 1);
        assert_eq!(agent.depth(), 1);
    }

    #[test]
    fn test_last_outcome_recorded() {
        let grid = Grid::default();
        let mut agent = AdversarialAgent::with_seed(Side::Red, HeuristicWeights::uniform(), 1, 4);
        assert!(agent.last_outcome().is_none());
        let mv = agent.best_move(&grid);
        assert!(mv.is_some());
        let outcome = agent.last_outcome().unwrap();
        assert_eq!(outcome.best_move, mv);
        assert_eq!(outcome.nodes, 1 + 54);
    }
}
