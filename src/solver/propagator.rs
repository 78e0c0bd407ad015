//! Local Propagator (spec §4.2): per-numbered-square deductions, iterated
//! forward then backward to a fixpoint.

use std::collections::HashSet;

use log::debug;

use super::board_view::{BoardView, Predicate};
use super::types::{CellKind, Coord, GameOracle};
use crate::error::{Error, Result};

/// Runs forward-then-backward sweeps over every numbered square until a
/// full pass makes no new mark. Returns whether any mark was added.
pub fn propagate_to_fixpoint<G: GameOracle>(
    game: &G,
    mines: &mut HashSet<Coord>,
    safe_unrevealed: &mut HashSet<Coord>,
) -> Result<bool> {
    let mut changed_overall = false;
    loop {
        let numbered = numbered_squares(game, mines, safe_unrevealed);
        let mut changed = false;

        for &coord in &numbered {
            changed |= analyze_num_square(game, mines, safe_unrevealed, coord)?;
        }
        for &coord in numbered.iter().rev() {
            changed |= analyze_num_square(game, mines, safe_unrevealed, coord)?;
        }

        changed_overall |= changed;
        if !changed {
            break;
        }
    }
    Ok(changed_overall)
}

fn numbered_squares<G: GameOracle>(
    game: &G,
    mines: &HashSet<Coord>,
    safe_unrevealed: &HashSet<Coord>,
) -> Vec<Coord> {
    let view = BoardView::new(game, mines, safe_unrevealed);
    let mut out = Vec::new();
    for row in 0..game.rows() {
        for col in 0..game.cols() {
            if matches!(view.get(row, col), CellKind::Number(_)) {
                out.push((row, col));
            }
        }
    }
    out
}

/// Single-cell deduction (spec §4.2 algorithm). Returns whether a new mark
/// was added.
fn analyze_num_square<G: GameOracle>(
    game: &G,
    mines: &mut HashSet<Coord>,
    safe_unrevealed: &mut HashSet<Coord>,
    coord: Coord,
) -> Result<bool> {
    let view = BoardView::new(game, mines, safe_unrevealed);
    let n = match view.get(coord.0, coord.1) {
        CellKind::Number(n) => i64::from(n),
        _ => return Ok(false),
    };

    let unknowns: Vec<Coord> = view
        .neighbors(coord.0, coord.1, &Predicate::IsUnknown)
        .map(|(r, c, _)| (r, c))
        .collect();
    let known_mines = view
        .neighbors(coord.0, coord.1, &Predicate::Is(CellKind::KnownMine))
        .count() as i64;

    let r = n - known_mines;
    let u = unknowns.len() as i64;
    if r < 0 || r > u {
        return Err(Error::board_contradiction(format!(
            "cell {coord:?}: number {n} minus {known_mines} known mines leaves r={r}, \
             but only {u} unknown neighbors"
        )));
    }

    // Captured before this call marks anything of its own: spec §4.2 treats
    // "all remaining game mines sit among this square's unknowns" as an
    // independent deduction over distant cells, not an alternative to the
    // r=0/r=|U| rules above it, so it must be checked against the mine
    // count this square's own marks start from, not the count after them.
    let remaining_game_mines = game.total_mines() as i64 - mines.len() as i64;

    let mut changed = false;

    if r == 0 {
        for unknown in unknowns {
            if safe_unrevealed.insert(unknown) {
                debug!("{coord:?}: r=0, marking {unknown:?} safe");
                changed = true;
            }
        }
    } else if r == u {
        for unknown in unknowns {
            if mines.insert(unknown) {
                debug!("{coord:?}: r=|U|, marking {unknown:?} a mine");
                changed = true;
            }
        }
    }

    if r == remaining_game_mines {
        let view = BoardView::new(game, mines, safe_unrevealed);
        let board_unknowns = view.all_unknown();
        for other in board_unknowns {
            if super::types::chebyshev(coord, other) > 1 && safe_unrevealed.insert(other) {
                debug!("{coord:?}: all remaining mines accounted for here, {other:?} safe");
                changed = true;
            }
        }
    }

    Ok(changed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::test_support::FixtureOracle;

    #[test]
    fn zero_remaining_marks_all_unknowns_safe() {
        let oracle = FixtureOracle::from_rows(&["1??", "???", "???"], 1);
        let mut mines = HashSet::new();
        mines.insert((0, 1));
        let mut safe = HashSet::new();
        let changed = propagate_to_fixpoint(&oracle, &mut mines, &mut safe).unwrap();
        assert!(changed);
        assert!(safe.contains(&(1, 0)));
        assert!(safe.contains(&(1, 1)));
    }

    #[test]
    fn all_unknowns_required_marks_mines() {
        // single "1" in a 1x3 strip with one unknown neighbor: scenario B.
        let oracle = FixtureOracle::from_rows(&["1??"], 1);
        let mut mines = HashSet::new();
        let mut safe = HashSet::new();
        propagate_to_fixpoint(&oracle, &mut mines, &mut safe).unwrap();
        assert!(mines.contains(&(0, 1)));
        assert!(safe.contains(&(0, 2)));
    }

    #[test]
    fn contradiction_is_surfaced() {
        // a "1" can have at most one known mine among its neighbors; two is
        // an impossible state the game collaborator must never produce.
        let oracle = FixtureOracle::from_rows(&["1??"], 1);
        let mut mines = HashSet::new();
        mines.insert((0, 1));
        mines.insert((0, 2));
        let mut safe = HashSet::new();
        let result = propagate_to_fixpoint(&oracle, &mut mines, &mut safe);
        assert!(result.is_err());
    }

    #[test]
    fn all_remaining_game_mines_forces_distant_safe() {
        // 5x5 board; one numbered "1" whose unknown neighbor set is the
        // entirety of the game's remaining mines, so far-away unknowns
        // become safe even without satisfying the first two rules.
        let oracle = FixtureOracle::from_rows(
            &[
                "?????",
                "?1???",
                "?????",
                "?????",
                "?????",
            ],
            1,
        );
        let mut mines = HashSet::new();
        let mut safe = HashSet::new();
        propagate_to_fixpoint(&oracle, &mut mines, &mut safe).unwrap();
        // (4,4) is chebyshev distance > 1 from (1,1).
        assert!(safe.contains(&(4, 4)));
        // but a close neighbor like (0,0) is not forced safe by this rule
        // alone (distance 1).
        assert!(!safe.contains(&(0, 0)));
    }
}
