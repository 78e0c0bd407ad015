//! Test-only fixture oracle: a static board described by a short string
//! grid, used to unit test the propagator/frontier/enumerator/reconciler
//! in isolation from the real game collaborator.

#![cfg(test)]

use super::types::{GameCell, GameOracle, RevealOutcome};
use crate::error::{Error, Result};

pub struct FixtureOracle {
    rows: usize,
    cols: usize,
    total_mines: usize,
    cells: Vec<Vec<GameCell>>,
}

impl FixtureOracle {
    /// `rows_src[i]` is one row, one char per column:
    /// `?` unrevealed, ` ` revealed zero, `1`-`8` revealed number, `*` a
    /// revealed mine (terminal-state fixture only).
    pub fn from_rows(rows_src: &[&str], total_mines: usize) -> Self {
        let cells: Vec<Vec<GameCell>> = rows_src
            .iter()
            .map(|row| {
                row.chars()
                    .map(|ch| match ch {
                        '?' => GameCell::Unrevealed,
                        ' ' => GameCell::Number(0),
                        '*' => GameCell::Mine,
                        d if d.is_ascii_digit() => {
                            GameCell::Number(d.to_digit(10).unwrap() as u8)
                        }
                        other => panic!("unexpected fixture char {other:?}"),
                    })
                    .collect()
            })
            .collect();
        let rows = cells.len();
        let cols = cells.first().map_or(0, |r| r.len());
        Self {
            rows,
            cols,
            total_mines,
            cells,
        }
    }
}

impl GameOracle for FixtureOracle {
    fn rows(&self) -> usize {
        self.rows
    }

    fn cols(&self) -> usize {
        self.cols
    }

    fn total_mines(&self) -> usize {
        self.total_mines
    }

    fn get(&self, row: usize, col: usize) -> Option<GameCell> {
        self.cells.get(row).and_then(|r| r.get(col)).copied()
    }

    fn reveal(&mut self, _row: usize, _col: usize) -> Result<RevealOutcome> {
        Err(Error::board_contradiction(
            "FixtureOracle is read-only; construct a new fixture instead",
        ))
    }

    fn in_progress(&self) -> bool {
        true
    }
}
