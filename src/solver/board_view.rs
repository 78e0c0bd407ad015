//! The Board View (spec §4.1): a read-only adapter over the game oracle
//! that layers the solver's own `mines` / `safeUnrevealed` annotations on
//! top of the raw board, so propagation always sees a single, consistent
//! three-extra-kind view.

use std::collections::HashSet;

use super::types::{CellKind, Coord, GameCell, GameOracle};

const NEIGHBOR_OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// A composable filter over `CellKind`, used in place of closures (design
/// note: "composition is by enum, not by runtime function objects").
#[derive(Debug, Clone)]
pub enum Predicate {
    Any,
    Is(CellKind),
    IsUnknown,
    IsNumber,
    Not(Box<Predicate>),
    And(Box<Predicate>, Box<Predicate>),
}

impl Predicate {
    pub fn matches(&self, kind: CellKind) -> bool {
        match self {
            Predicate::Any => true,
            Predicate::Is(k) => *k == kind,
            Predicate::IsUnknown => matches!(kind, CellKind::Unknown),
            Predicate::IsNumber => matches!(kind, CellKind::Number(_)),
            Predicate::Not(p) => !p.matches(kind),
            Predicate::And(a, b) => a.matches(kind) && b.matches(kind),
        }
    }
}

pub struct BoardView<'a, G: GameOracle> {
    game: &'a G,
    mines: &'a HashSet<Coord>,
    safe_unrevealed: &'a HashSet<Coord>,
}

impl<'a, G: GameOracle> BoardView<'a, G> {
    pub fn new(game: &'a G, mines: &'a HashSet<Coord>, safe_unrevealed: &'a HashSet<Coord>) -> Self {
        Self {
            game,
            mines,
            safe_unrevealed,
        }
    }

    pub fn get(&self, row: usize, col: usize) -> CellKind {
        if row >= self.game.rows() || col >= self.game.cols() {
            return CellKind::OutOfBounds;
        }
        match self.game.get(row, col) {
            None => CellKind::OutOfBounds,
            Some(GameCell::Mine) => CellKind::RevealedMine,
            Some(GameCell::Number(n)) => CellKind::Number(n),
            Some(GameCell::Unrevealed) => {
                let coord = (row, col);
                if self.mines.contains(&coord) {
                    CellKind::KnownMine
                } else if self.safe_unrevealed.contains(&coord) {
                    CellKind::KnownSafe
                } else {
                    CellKind::Unknown
                }
            }
        }
    }

    /// The up-to-8 in-bounds neighbors of (row, col) matching `predicate`.
    pub fn neighbors(
        &self,
        row: usize,
        col: usize,
        predicate: &Predicate,
    ) -> impl Iterator<Item = (usize, usize, CellKind)> + '_ {
        NEIGHBOR_OFFSETS.iter().filter_map(move |&(dr, dc)| {
            let nr = row as isize + dr;
            let nc = col as isize + dc;
            if nr < 0 || nc < 0 {
                return None;
            }
            let (nr, nc) = (nr as usize, nc as usize);
            if nr >= self.game.rows() || nc >= self.game.cols() {
                return None;
            }
            let kind = self.get(nr, nc);
            if predicate.matches(kind) {
                Some((nr, nc, kind))
            } else {
                None
            }
        })
    }

    /// Every coordinate on the board still in `CellKind::Unknown`.
    pub fn all_unknown(&self) -> Vec<Coord> {
        let mut out = Vec::new();
        for row in 0..self.game.rows() {
            for col in 0..self.game.cols() {
                if matches!(self.get(row, col), CellKind::Unknown) {
                    out.push((row, col));
                }
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::test_support::FixtureOracle;

    #[test]
    fn out_of_bounds_is_distinct_from_unknown() {
        let oracle = FixtureOracle::from_rows(&["??", "??"], 1);
        let mines = HashSet::new();
        let safe = HashSet::new();
        let view = BoardView::new(&oracle, &mines, &safe);
        assert_eq!(view.get(5, 5), CellKind::OutOfBounds);
        assert_eq!(view.get(0, 0), CellKind::Unknown);
    }

    #[test]
    fn annotations_override_unrevealed() {
        let oracle = FixtureOracle::from_rows(&["??", "??"], 1);
        let mut mines = HashSet::new();
        mines.insert((0, 0));
        let mut safe = HashSet::new();
        safe.insert((0, 1));
        let view = BoardView::new(&oracle, &mines, &safe);
        assert_eq!(view.get(0, 0), CellKind::KnownMine);
        assert_eq!(view.get(0, 1), CellKind::KnownSafe);
        assert_eq!(view.get(1, 0), CellKind::Unknown);
    }

    #[test]
    fn neighbors_filters_by_predicate() {
        let oracle = FixtureOracle::from_rows(&["1??", "???", "???"], 3);
        let mines = HashSet::new();
        let safe = HashSet::new();
        let view = BoardView::new(&oracle, &mines, &safe);
        let unknowns: Vec<_> = view.neighbors(0, 0, &Predicate::IsUnknown).collect();
        assert_eq!(unknowns.len(), 3);
    }
}
