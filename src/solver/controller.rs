//! Turn Controller (spec §4.7): orchestrates reveal → analyze → select per
//! move and owns the solver's session state across a game.

use std::collections::HashSet;
use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::SeedableRng;

use super::board_view::BoardView;
use super::enumerator::enumerate_frontier;
use super::frontier::build_frontiers;
use super::propagator::propagate_to_fixpoint;
use super::reconciler::{reconcile, tally_frontier, Reconciliation};
use super::selector::select_move;
use super::types::{Coord, GameCell, GameOracle, RevealOutcome};
use crate::error::Result;

/// Aggregates produced by `play_game`, matching the teacher's original
/// `MinesweeperAI.playGame` timing/move-count shape.
#[derive(Debug, Clone, Copy)]
pub struct PlayResult {
    pub won: bool,
    pub moves: usize,
    pub duration: Duration,
}

/// Session state owned exclusively by the controller (spec §3 "Solver
/// session state"), rebuilt every `analyze_board` call except `mines` and
/// `safe_unrevealed`, which persist across moves.
struct SessionState {
    mines: HashSet<Coord>,
    safe_unrevealed: HashSet<Coord>,
    non_frontier: Vec<Coord>,
    reconciliation: Reconciliation,
    last_move: Option<Coord>,
}

impl SessionState {
    fn fresh() -> Self {
        Self {
            mines: HashSet::new(),
            safe_unrevealed: HashSet::new(),
            non_frontier: Vec::new(),
            reconciliation: Reconciliation {
                forced_mines: Vec::new(),
                forced_safe: Vec::new(),
                squares_by_prob: Vec::new(),
                outside_prob: f64::INFINITY,
                min_mine_total: 0,
                max_mine_total: 0,
                expected_mine_total: 0.0,
            },
            last_move: None,
        }
    }
}

/// Drives one `GameOracle` implementation to completion, maintaining the
/// solver's proven-mine/proven-safe annotations between moves.
pub struct Solver<G: GameOracle> {
    game: G,
    state: SessionState,
    rng: StdRng,
}

impl<G: GameOracle> Solver<G> {
    pub fn new(game: G) -> Self {
        Self {
            game,
            state: SessionState::fresh(),
            rng: StdRng::from_os_rng(),
        }
    }

    pub fn with_seed(game: G, seed: u64) -> Self {
        Self {
            game,
            state: SessionState::fresh(),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Resets solver session state and swaps in a freshly started game.
    pub fn next_game(&mut self, game: G) {
        self.game = game;
        self.state = SessionState::fresh();
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    /// Runs local propagation, frontier decomposition, per-frontier
    /// enumeration, and global reconciliation to a fixpoint, per the data
    /// flow in spec §2.
    pub fn analyze_board(&mut self) -> Result<()> {
        loop {
            let mut changed =
                propagate_to_fixpoint(&self.game, &mut self.state.mines, &mut self.state.safe_unrevealed)?;

            let frontiers = build_frontiers(&self.game, &self.state.mines, &self.state.safe_unrevealed);
            let mut tallies = Vec::with_capacity(frontiers.len());
            for frontier in &frontiers {
                let budget = self.game.total_mines().saturating_sub(self.state.mines.len());
                let solution = enumerate_frontier(
                    &self.game,
                    &self.state.mines,
                    &self.state.safe_unrevealed,
                    frontier,
                    budget,
                )?;
                let tally = tally_frontier(&solution);
                for (&coord, &prob) in &tally.probabilities {
                    if prob == 0.0 && self.state.safe_unrevealed.insert(coord) {
                        changed = true;
                    } else if prob == 1.0 && self.state.mines.insert(coord) {
                        changed = true;
                    }
                }
                tallies.push(tally);
            }

            let frontier_unknowns: HashSet<Coord> = frontiers
                .iter()
                .flat_map(|f| f.unknowns.iter().copied())
                .collect();
            let view = BoardView::new(&self.game, &self.state.mines, &self.state.safe_unrevealed);
            let non_frontier: Vec<Coord> = view
                .all_unknown()
                .into_iter()
                .filter(|c| !frontier_unknowns.contains(c))
                .collect();

            let reconciliation = reconcile(
                self.game.total_mines(),
                self.state.mines.len(),
                &tallies,
                &non_frontier,
            );
            for &coord in &reconciliation.forced_mines {
                changed |= self.state.mines.insert(coord);
            }
            for &coord in &reconciliation.forced_safe {
                changed |= self.state.safe_unrevealed.insert(coord);
            }

            self.state.non_frontier = non_frontier;
            self.state.reconciliation = reconciliation;

            if !changed {
                break;
            }
        }
        Ok(())
    }

    /// Picks the next coordinate to reveal, or `None` if the board is
    /// fully constrained with no remaining unknowns at all.
    pub fn determine_move(&mut self) -> Option<Coord> {
        let coord = select_move(
            &self.game,
            &self.state.mines,
            &mut self.state.safe_unrevealed,
            &self.state.reconciliation,
            &self.state.non_frontier,
            &mut self.rng,
        );
        self.state.last_move = coord;
        coord
    }

    pub fn last_move(&self) -> Option<Coord> {
        self.state.last_move
    }

    /// Prunes any coordinate the game has already revealed out of
    /// `safe_unrevealed` (spec §4.7), needed because a single reveal can
    /// flood-fill multiple coordinates at once.
    fn prune_revealed(&mut self) {
        let game = &self.game;
        self.state
            .safe_unrevealed
            .retain(|&(r, c)| matches!(game.get(r, c), Some(GameCell::Unrevealed)));
    }

    /// Plays one game to completion: reveal → analyze → select, repeated
    /// until the game reports it is over.
    pub fn play_game(&mut self) -> Result<PlayResult> {
        let start = Instant::now();
        let mut moves = 0usize;
        let mut won = true;

        while self.game.in_progress() {
            self.analyze_board()?;
            let Some(coord) = self.determine_move() else {
                break;
            };
            let outcome = self.game.reveal(coord.0, coord.1)?;
            moves += 1;
            self.prune_revealed();
            match outcome {
                RevealOutcome::Ok => continue,
                RevealOutcome::Won => {
                    won = true;
                    break;
                }
                RevealOutcome::Lost => {
                    won = false;
                    break;
                }
            }
        }

        Ok(PlayResult {
            won,
            moves,
            duration: start.elapsed(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::test_support::FixtureOracle;

    #[test]
    fn analyze_board_marks_sole_mine_and_safe_neighbors() {
        // Scenario B shape: one "1" in a 1x3 strip, one unknown neighbor.
        let oracle = FixtureOracle::from_rows(&["1??"], 1);
        let mut solver = Solver::with_seed(oracle, 42);
        solver.analyze_board().unwrap();
        let coord = solver.determine_move();
        assert_eq!(coord, Some((0, 2)));
    }

    #[test]
    fn scenario_d_reconciliation_surfaces_a_finite_outside_probability() {
        let oracle = FixtureOracle::from_rows(&["????", "?1??"], 2);
        let mut solver = Solver::with_seed(oracle, 7);
        solver.analyze_board().unwrap();
        assert!(solver.state.reconciliation.outside_prob.is_finite());
        assert!(!solver.state.reconciliation.squares_by_prob.is_empty());
    }
}
