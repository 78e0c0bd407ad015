//! Solution Enumerator (spec §4.4): per-frontier exhaustive bit-vector
//! enumeration of every {mine, safe} assignment consistent with every
//! numbered-square constraint in that frontier, built one constraint at a
//! time and combined by a distance-ordered pairwise merge with conflict
//! pruning.

use std::collections::{HashMap, HashSet};

use bitvec::prelude::*;

use super::board_view::{BoardView, Predicate};
use super::frontier::Frontier;
use super::types::{chebyshev, CellKind, Coord, GameOracle};
use crate::error::{Error, Result};

type Bits = BitVec<usize, Lsb0>;

/// A frontier's surviving assignments, keyed to `unknowns` by bit position.
pub struct FrontierSolution {
    pub unknowns: Vec<Coord>,
    pub survivors: Vec<Bits>,
}

/// Enumerates every assignment consistent with `frontier`'s constraints,
/// then prunes anything exceeding the remaining game-wide mine budget.
pub fn enumerate_frontier<G: GameOracle>(
    game: &G,
    mines: &HashSet<Coord>,
    safe_unrevealed: &HashSet<Coord>,
    frontier: &Frontier,
    mines_budget: usize,
) -> Result<FrontierSolution> {
    let view = BoardView::new(game, mines, safe_unrevealed);
    let k = frontier.unknowns.len();
    let index_of: HashMap<Coord, usize> = frontier
        .unknowns
        .iter()
        .enumerate()
        .map(|(i, c)| (*c, i))
        .collect();

    let anchor = frontier.numbers[0];
    let mut ordered_numbers = frontier.numbers.clone();
    ordered_numbers.sort_by_key(|c| chebyshev(anchor, *c));

    let mut sets: Vec<Vec<(Bits, Bits)>> = Vec::new();

    for &num_coord in &ordered_numbers {
        let n = match view.get(num_coord.0, num_coord.1) {
            CellKind::Number(n) => i64::from(n),
            _ => continue,
        };
        let known_mines = view
            .neighbors(num_coord.0, num_coord.1, &Predicate::Is(CellKind::KnownMine))
            .count() as i64;
        let positions: Vec<usize> = view
            .neighbors(num_coord.0, num_coord.1, &Predicate::IsUnknown)
            .map(|(r, c, _)| index_of[&(r, c)])
            .collect();

        if positions.is_empty() {
            continue;
        }

        let r = n - known_mines;
        if r < 0 || r as usize > positions.len() {
            return Err(Error::board_contradiction(format!(
                "frontier constraint at {num_coord:?} impossible: r={r}, |U|={}",
                positions.len()
            )));
        }

        let seeds = seed_subsets(k, &positions, r as usize);
        if seeds.is_empty() {
            return Err(Error::board_contradiction(format!(
                "frontier constraint at {num_coord:?} has no satisfying subset"
            )));
        }
        sets.push(seeds);
    }

    if sets.is_empty() {
        // Every constraint in this frontier was already fully satisfied;
        // the frontier's unknowns are unconstrained by it (shouldn't occur
        // once the builder has filtered satisfied squares, but stay total).
        return Ok(FrontierSolution {
            unknowns: frontier.unknowns.clone(),
            survivors: vec![bitvec![usize, Lsb0; 0; k]],
        });
    }

    while sets.len() > 1 {
        let mut next = Vec::with_capacity(sets.len().div_ceil(2));
        let mut it = sets.into_iter();
        while let Some(a) = it.next() {
            match it.next() {
                Some(b) => {
                    let merged = merge_pair(&a, &b);
                    if merged.is_empty() {
                        return Err(Error::board_contradiction(
                            "frontier has no consistent solution after merging overlapping constraints",
                        ));
                    }
                    next.push(merged);
                }
                None => next.push(a),
            }
        }
        sets = next;
    }

    let mut merged = sets.into_iter().next().expect("sets is nonempty");
    merged.retain(|(m, _)| m.count_ones() <= mines_budget);
    if merged.is_empty() {
        return Err(Error::board_contradiction(
            "frontier has no solution within the remaining mine budget",
        ));
    }

    let survivors = merged.into_iter().map(|(m, _)| m).collect();
    Ok(FrontierSolution {
        unknowns: frontier.unknowns.clone(),
        survivors,
    })
}

/// Every size-`r` subset of `positions`, each yielding one partial
/// solution: the subset's bits set in `Mines`, the rest of `positions` set
/// in `Forbidden`.
fn seed_subsets(k: usize, positions: &[usize], r: usize) -> Vec<(Bits, Bits)> {
    let mut result = Vec::new();
    for combo in combinations(positions, r) {
        let combo_set: HashSet<usize> = combo.iter().copied().collect();
        let mut m = bitvec![usize, Lsb0; 0; k];
        let mut f = bitvec![usize, Lsb0; 0; k];
        for &p in &combo {
            m.set(p, true);
        }
        for &p in positions {
            if !combo_set.contains(&p) {
                f.set(p, true);
            }
        }
        result.push((m, f));
    }
    result
}

fn combinations(items: &[usize], r: usize) -> Vec<Vec<usize>> {
    if r == 0 {
        return vec![Vec::new()];
    }
    if items.len() < r {
        return Vec::new();
    }
    let mut result = Vec::new();
    for i in 0..=(items.len() - r) {
        let first = items[i];
        for mut rest in combinations(&items[i + 1..], r - 1) {
            rest.insert(0, first);
            result.push(rest);
        }
    }
    result
}

/// `{ (a.M | b.M, a.F | b.F) : a in A, b in B, no conflict }`, deduplicated.
fn merge_pair(a: &[(Bits, Bits)], b: &[(Bits, Bits)]) -> Vec<(Bits, Bits)> {
    let mut seen: HashSet<(Vec<bool>, Vec<bool>)> = HashSet::new();
    let mut out = Vec::new();
    for (am, af) in a {
        for (bm, bf) in b {
            let m = bits_or(am, bm);
            let f = bits_or(af, bf);
            if conflicts(&m, &f) {
                continue;
            }
            let key = (to_vec_bool(&m), to_vec_bool(&f));
            if seen.insert(key) {
                out.push((m, f));
            }
        }
    }
    out
}

fn bits_or(a: &Bits, b: &Bits) -> Bits {
    let mut out = a.clone();
    for i in 0..out.len() {
        if b[i] {
            out.set(i, true);
        }
    }
    out
}

fn conflicts(mines: &Bits, forbidden: &Bits) -> bool {
    (0..mines.len()).any(|i| mines[i] && forbidden[i])
}

fn to_vec_bool(bits: &Bits) -> Vec<bool> {
    bits.iter().by_vals().collect()
}
