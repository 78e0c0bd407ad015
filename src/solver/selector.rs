//! Move Selector (spec §4.6): chooses the next reveal coordinate from the
//! known-safe set, else the lowest-probability frontier square, else a
//! non-frontier square, preferring corners then edges, with remaining ties
//! broken uniformly at random.

use std::collections::HashSet;

use rand::seq::IndexedRandom;
use rand::Rng;

use super::board_view::BoardView;
use super::reconciler::Reconciliation;
use super::types::{is_corner, is_edge, Coord, GameOracle};

/// Picks and removes one element of `safe_unrevealed` if nonempty;
/// otherwise consults `reconciliation`'s probabilities and `non_frontier`;
/// otherwise falls back to any `Unknown` square on the board.
pub fn select_move<G: GameOracle>(
    game: &G,
    mines: &HashSet<Coord>,
    safe_unrevealed: &mut HashSet<Coord>,
    reconciliation: &Reconciliation,
    non_frontier: &[Coord],
    rng: &mut impl Rng,
) -> Option<Coord> {
    if let Some(&coord) = safe_unrevealed.iter().next() {
        safe_unrevealed.remove(&coord);
        return Some(coord);
    }

    let best_frontier = reconciliation.squares_by_prob.first();
    let best_frontier_prob = best_frontier.map_or(f64::INFINITY, |(p, _)| *p);
    let outside_prob = reconciliation.outside_prob;

    if best_frontier_prob.is_finite() && best_frontier_prob <= outside_prob {
        let (_, candidates) = best_frontier.expect("finite implies present");
        return Some(pick_preferring_corner_then_edge(
            game.rows(),
            game.cols(),
            candidates,
            rng,
        ));
    }

    if !non_frontier.is_empty() {
        return Some(pick_preferring_corner_then_edge(
            game.rows(),
            game.cols(),
            non_frontier,
            rng,
        ));
    }

    let view = BoardView::new(game, mines, safe_unrevealed);
    let all_unknown = view.all_unknown();
    all_unknown.choose(rng).copied()
}

/// Among `candidates`, prefers corners, then edges, then any; ties within
/// the chosen tier are broken uniformly at random.
fn pick_preferring_corner_then_edge(
    rows: usize,
    cols: usize,
    candidates: &[Coord],
    rng: &mut impl Rng,
) -> Coord {
    let corners: Vec<Coord> = candidates
        .iter()
        .copied()
        .filter(|&c| is_corner(rows, cols, c))
        .collect();
    if let Some(&c) = corners.choose(rng) {
        return c;
    }
    let edges: Vec<Coord> = candidates
        .iter()
        .copied()
        .filter(|&c| is_edge(rows, cols, c))
        .collect();
    if let Some(&c) = edges.choose(rng) {
        return c;
    }
    *candidates
        .choose(rng)
        .expect("candidates is nonempty by construction")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::test_support::FixtureOracle;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn empty_reconciliation() -> Reconciliation {
        Reconciliation {
            forced_mines: Vec::new(),
            forced_safe: Vec::new(),
            squares_by_prob: Vec::new(),
            outside_prob: f64::INFINITY,
            min_mine_total: 0,
            max_mine_total: 0,
            expected_mine_total: 0.0,
        }
    }

    #[test]
    fn known_safe_takes_priority_and_is_removed() {
        let oracle = FixtureOracle::from_rows(&["???"], 1);
        let mines = HashSet::new();
        let mut safe = HashSet::new();
        safe.insert((0, 1));
        let mut rng = StdRng::seed_from_u64(1);
        let reconciliation = empty_reconciliation();
        let chosen = select_move(&oracle, &mines, &mut safe, &reconciliation, &[], &mut rng);
        assert_eq!(chosen, Some((0, 1)));
        assert!(safe.is_empty());
    }

    #[test]
    fn scenario_d_tiebreak_never_picks_the_middle_square() {
        // 2x4 board; frontier squares (0,0),(0,1),(0,2) tie at equal
        // probability, but only (0,0) is a corner.
        let oracle = FixtureOracle::from_rows(&["????", "?1??"], 2);
        let mines = HashSet::new();
        let mut safe = HashSet::new();
        let reconciliation = Reconciliation {
            forced_mines: Vec::new(),
            forced_safe: Vec::new(),
            squares_by_prob: vec![(1.0 / 3.0, vec![(0, 0), (0, 1), (0, 2)])],
            outside_prob: 1.0 / 3.0,
            min_mine_total: 1,
            max_mine_total: 1,
            expected_mine_total: 1.0,
        };
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            let chosen =
                select_move(&oracle, &mines, &mut safe, &reconciliation, &[], &mut rng).unwrap();
            assert_ne!(chosen, (0, 1));
        }
    }

    #[test]
    fn falls_back_to_random_unknown_when_fully_constrained() {
        let oracle = FixtureOracle::from_rows(&["??"], 1);
        let mines = HashSet::new();
        let mut safe = HashSet::new();
        let reconciliation = empty_reconciliation();
        let mut rng = StdRng::seed_from_u64(3);
        let chosen = select_move(&oracle, &mines, &mut safe, &reconciliation, &[], &mut rng);
        assert!(chosen.is_some());
    }
}
