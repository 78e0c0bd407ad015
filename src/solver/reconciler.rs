//! Global Reconciler (spec §4.5): turns a frontier's surviving partial
//! solutions into per-square probabilities and min/max/expected mine
//! totals, then reconciles those totals against the game's remaining mine
//! budget to force marks on non-frontier unknowns.

use std::collections::HashMap;

use super::enumerator::FrontierSolution;
use super::types::Coord;

/// Per-unknown probabilities and aggregate mine-count bounds for one
/// frontier's surviving partial solutions.
pub struct FrontierTally {
    pub probabilities: HashMap<Coord, f64>,
    pub min_mines: usize,
    pub max_mines: usize,
    pub expected_mines: f64,
}

pub fn tally_frontier(solution: &FrontierSolution) -> FrontierTally {
    let survivors = solution.survivors.len();
    let mut counts = vec![0usize; solution.unknowns.len()];
    let mut min_mines = usize::MAX;
    let mut max_mines = 0usize;
    let mut total_mines = 0usize;

    for assignment in &solution.survivors {
        let popcount = assignment.count_ones();
        min_mines = min_mines.min(popcount);
        max_mines = max_mines.max(popcount);
        total_mines += popcount;
        for (i, count) in counts.iter_mut().enumerate() {
            if assignment[i] {
                *count += 1;
            }
        }
    }
    if survivors == 0 {
        min_mines = 0;
    }

    let probabilities = solution
        .unknowns
        .iter()
        .zip(counts.iter())
        .map(|(&coord, &count)| (coord, count as f64 / survivors as f64))
        .collect();

    FrontierTally {
        probabilities,
        min_mines,
        max_mines,
        expected_mines: total_mines as f64 / survivors as f64,
    }
}

/// Forced marks and probability data produced by reconciling every
/// frontier's tally against the game-wide mine budget.
pub struct Reconciliation {
    pub forced_mines: Vec<Coord>,
    pub forced_safe: Vec<Coord>,
    /// Sorted ascending by probability; coordinates sharing an exactly
    /// equal probability value are grouped together.
    pub squares_by_prob: Vec<(f64, Vec<Coord>)>,
    pub outside_prob: f64,
    pub min_mine_total: usize,
    pub max_mine_total: usize,
    pub expected_mine_total: f64,
}

/// `total_mines` is the game's total; `mines_marked` the current size of
/// the solver's `mines` set; `non_frontier` the board's unknowns with no
/// numbered neighbor (`X` in the spec).
pub fn reconcile(
    total_mines: usize,
    mines_marked: usize,
    tallies: &[FrontierTally],
    non_frontier: &[Coord],
) -> Reconciliation {
    let g = total_mines as i64 - mines_marked as i64;

    let mut min_mine_total = 0usize;
    let mut max_mine_total = 0usize;
    let mut expected_mine_total = 0.0f64;
    let mut by_prob: HashMap<u64, (f64, Vec<Coord>)> = HashMap::new();

    for tally in tallies {
        min_mine_total += tally.min_mines;
        max_mine_total += tally.max_mines;
        expected_mine_total += tally.expected_mines;
        for (&coord, &prob) in &tally.probabilities {
            by_prob
                .entry(prob.to_bits())
                .or_insert_with(|| (prob, Vec::new()))
                .1
                .push(coord);
        }
    }

    let mut forced_mines = Vec::new();
    let mut forced_safe = Vec::new();

    if !non_frontier.is_empty() {
        let outside_all_frontiers = g - max_mine_total as i64 == non_frontier.len() as i64;
        if outside_all_frontiers {
            forced_mines.extend_from_slice(non_frontier);
        } else if g == min_mine_total as i64 {
            forced_safe.extend_from_slice(non_frontier);
        }
    }

    let x_len = non_frontier.len() as i64;
    max_mine_total = max_mine_total.min(g.max(0) as usize);
    min_mine_total = min_mine_total.max((g - x_len).max(0) as usize);
    expected_mine_total = expected_mine_total.clamp(min_mine_total as f64, max_mine_total as f64);

    let outside_prob = if non_frontier.is_empty() {
        f64::INFINITY
    } else {
        (g as f64 - expected_mine_total) / non_frontier.len() as f64
    };

    let mut squares_by_prob: Vec<(f64, Vec<Coord>)> = by_prob.into_values().collect();
    squares_by_prob.sort_by(|a, b| a.0.partial_cmp(&b.0).expect("probabilities are finite"));
    for (_, coords) in &mut squares_by_prob {
        coords.sort_unstable();
    }

    Reconciliation {
        forced_mines,
        forced_safe,
        squares_by_prob,
        outside_prob,
        min_mine_total,
        max_mine_total,
        expected_mine_total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bitvec::prelude::*;

    fn solution(unknowns: Vec<Coord>, assignments: Vec<Vec<bool>>) -> FrontierSolution {
        let survivors = assignments
            .into_iter()
            .map(|bits| bits.into_iter().collect::<BitVec<usize, Lsb0>>())
            .collect();
        FrontierSolution { unknowns, survivors }
    }

    #[test]
    fn scenario_d_probabilities_are_uniform_thirds() {
        let unknowns = vec![(0, 0), (0, 1), (0, 2)];
        let sol = solution(
            unknowns,
            vec![
                vec![true, false, false],
                vec![false, true, false],
                vec![false, false, true],
            ],
        );
        let tally = tally_frontier(&sol);
        assert_eq!(tally.min_mines, 1);
        assert_eq!(tally.max_mines, 1);
        assert_eq!(tally.expected_mines, 1.0);
        for coord in &[(0, 0), (0, 1), (0, 2)] {
            assert_eq!(tally.probabilities[coord], 1.0 / 3.0);
        }

        let non_frontier = vec![(0, 3), (1, 0), (1, 3)];
        let reconciliation = reconcile(2, 0, &[tally], &non_frontier);
        assert_eq!(reconciliation.expected_mine_total, 1.0);
        assert!((reconciliation.outside_prob - 1.0 / 3.0).abs() < 1e-12);
        assert!(reconciliation.forced_mines.is_empty());
        assert!(reconciliation.forced_safe.is_empty());
    }

    #[test]
    fn case_a_forces_non_frontier_mines() {
        // one frontier square certain to be a mine (max=1), one non-frontier
        // unknown, game still has 2 remaining mines: G - max = 2 - 1 = 1 ==
        // |X|, so the lone non-frontier unknown is forced to be a mine.
        let unknowns = vec![(0, 0)];
        let sol = solution(unknowns, vec![vec![true]]);
        let tally = tally_frontier(&sol);
        let non_frontier = vec![(5, 5)];
        let reconciliation = reconcile(2, 0, &[tally], &non_frontier);
        assert_eq!(reconciliation.forced_mines, vec![(5, 5)]);
        assert!(reconciliation.forced_safe.is_empty());
    }

    #[test]
    fn case_b_forces_non_frontier_safe() {
        // the frontier alone accounts for every remaining mine (min ==
        // max == G), so non-frontier unknowns are forced safe.
        let unknowns = vec![(0, 0), (0, 1)];
        let sol = solution(unknowns, vec![vec![true, true]]);
        let tally = tally_frontier(&sol);
        let non_frontier = vec![(5, 5), (6, 6)];
        let reconciliation = reconcile(2, 0, &[tally], &non_frontier);
        assert!(reconciliation.forced_mines.is_empty());
        assert_eq!(reconciliation.forced_safe, vec![(5, 5), (6, 6)]);
    }

    #[test]
    fn no_non_frontier_unknowns_yields_infinite_outside_prob() {
        let reconciliation = reconcile(1, 0, &[], &[]);
        assert!(reconciliation.outside_prob.is_infinite());
    }
}
