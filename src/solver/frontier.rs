//! Frontier Builder (spec §4.3): partitions the currently-constraining
//! numbered squares and their unknown neighbors into connected components.

use std::collections::{HashSet, VecDeque};

use super::board_view::{BoardView, Predicate};
use super::types::{CellKind, Coord, GameOracle};

/// One connected component of numbered squares (`numbers`) and the
/// unknowns adjacent to them (`unknowns`). `unknowns` is sorted, and that
/// order fixes the bit-vector layout used by the enumerator.
#[derive(Debug, Clone)]
pub struct Frontier {
    pub numbers: Vec<Coord>,
    pub unknowns: Vec<Coord>,
}

/// Seeded flood fill over `Number <-> shared Unknown <-> Number` edges.
/// `seen` is global across frontiers, so no numbered square or unknown
/// participates in more than one component.
pub fn build_frontiers<G: GameOracle>(
    game: &G,
    mines: &HashSet<Coord>,
    safe_unrevealed: &HashSet<Coord>,
) -> Vec<Frontier> {
    let view = BoardView::new(game, mines, safe_unrevealed);
    let mut seen_numbers: HashSet<Coord> = HashSet::new();
    let mut frontiers = Vec::new();

    for row in 0..game.rows() {
        for col in 0..game.cols() {
            let seed = (row, col);
            if seen_numbers.contains(&seed) {
                continue;
            }
            if !matches!(view.get(row, col), CellKind::Number(_)) {
                continue;
            }
            let has_unknown_neighbor = view.neighbors(row, col, &Predicate::IsUnknown).next().is_some();
            if !has_unknown_neighbor {
                continue;
            }

            let mut numbers: HashSet<Coord> = HashSet::new();
            let mut unknowns: HashSet<Coord> = HashSet::new();
            let mut queue: VecDeque<Coord> = VecDeque::new();
            numbers.insert(seed);
            seen_numbers.insert(seed);
            queue.push_back(seed);

            while let Some(number) = queue.pop_front() {
                for (ur, uc, _) in view.neighbors(number.0, number.1, &Predicate::IsUnknown) {
                    let unknown = (ur, uc);
                    if !unknowns.insert(unknown) {
                        continue;
                    }
                    for (nr, nc, _) in view.neighbors(ur, uc, &Predicate::IsNumber) {
                        let next = (nr, nc);
                        if seen_numbers.insert(next) {
                            numbers.insert(next);
                            queue.push_back(next);
                        }
                    }
                }
            }

            let mut numbers: Vec<Coord> = numbers.into_iter().collect();
            numbers.sort_unstable();
            let mut unknowns: Vec<Coord> = unknowns.into_iter().collect();
            unknowns.sort_unstable();
            frontiers.push(Frontier { numbers, unknowns });
        }
    }

    frontiers
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::test_support::FixtureOracle;

    #[test]
    fn single_isolated_constraint_is_one_frontier() {
        let oracle = FixtureOracle::from_rows(&["1??"], 1);
        let mines = HashSet::new();
        let safe = HashSet::new();
        let frontiers = build_frontiers(&oracle, &mines, &safe);
        assert_eq!(frontiers.len(), 1);
        assert_eq!(frontiers[0].numbers, vec![(0, 0)]);
        assert_eq!(frontiers[0].unknowns, vec![(0, 1), (0, 2)]);
    }

    #[test]
    fn disjoint_constraints_form_separate_frontiers() {
        // Scenario C shape: three independent "1"s each with one unknown,
        // far enough apart that their unknown sets never touch.
        let oracle = FixtureOracle::from_rows(
            &[
                "1???1",
                "?????",
                "?????",
                "?????",
                "1????",
            ],
            3,
        );
        let mines = HashSet::new();
        let safe = HashSet::new();
        let frontiers = build_frontiers(&oracle, &mines, &safe);
        assert_eq!(frontiers.len(), 3);
    }

    #[test]
    fn shared_unknown_merges_constraints() {
        // Two "1"s sharing an unknown neighbor belong to one frontier.
        let oracle = FixtureOracle::from_rows(&["1?1"], 2);
        let mines = HashSet::new();
        let safe = HashSet::new();
        let frontiers = build_frontiers(&oracle, &mines, &safe);
        assert_eq!(frontiers.len(), 1);
        assert_eq!(frontiers[0].numbers, vec![(0, 0), (0, 2)]);
        assert_eq!(frontiers[0].unknowns, vec![(0, 1)]);
    }

    #[test]
    fn fully_satisfied_numbers_are_excluded() {
        let oracle = FixtureOracle::from_rows(&["1 1"], 0);
        let mines = HashSet::new();
        let safe = HashSet::new();
        let frontiers = build_frontiers(&oracle, &mines, &safe);
        assert!(frontiers.is_empty());
    }
}
