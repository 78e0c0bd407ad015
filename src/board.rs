use std::collections::{HashSet, VecDeque};

use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;

use crate::difficulty::Config;
use crate::error::{Error, Result};
use crate::solver::{Coord, GameCell, GameOracle, RevealOutcome};

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

/// What the UI draws for one cell; distinct from `GameCell`, which is the
/// solver-facing view (`Board` implements `GameOracle` via `get`/`reveal`,
/// not via `CellState`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellState {
    Hidden,
    Flagged,
    Revealed(u8),
    Mine,
}

#[derive(Debug, Clone, Copy, Default)]
struct Cell {
    revealed: bool,
    adjacent: u8,
}

/// The game collaborator (spec.md §6.1): owns mine placement, flood
/// reveal, flags, and chord, and reports its state through `GameOracle` so
/// the solver core never touches this struct's fields directly.
#[derive(Debug)]
pub struct Board {
    rows: usize,
    cols: usize,
    mines: usize,
    cells: Vec<Vec<Cell>>,
    mine_locations: HashSet<Coord>,
    flags: HashSet<Coord>,
    seen: usize,
    in_progress: bool,
    lost: bool,
    rng: StdRng,
}

impl Board {
    pub fn new(config: Config) -> Self {
        Self::with_rng(config, StdRng::from_os_rng())
    }

    pub fn with_seed(config: Config, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: Config, rng: StdRng) -> Self {
        Self {
            rows: config.rows,
            cols: config.cols,
            mines: config.mines,
            cells: vec![vec![Cell::default(); config.cols]; config.rows],
            mine_locations: HashSet::new(),
            flags: HashSet::new(),
            seen: 0,
            in_progress: true,
            lost: false,
            rng,
        }
    }

    /// Places `self.mines` mines uniformly at random, never at `exclude`
    /// (`original_source/minesweeper.py` `placeMines`, guaranteeing the
    /// first reveal is always safe).
    fn place_mines(&mut self, exclude: Coord) {
        while self.mine_locations.len() < self.mines {
            let candidate = (self.rng.random_range(0..self.rows), self.rng.random_range(0..self.cols));
            if candidate != exclude {
                self.mine_locations.insert(candidate);
            }
        }
    }

    fn neighbors(&self, row: usize, col: usize) -> impl Iterator<Item = Coord> + '_ {
        NEIGHBOR_OFFSETS.iter().filter_map(move |&(dr, dc)| {
            let nr = row as isize + dr;
            let nc = col as isize + dc;
            if nr < 0 || nc < 0 {
                return None;
            }
            let (nr, nc) = (nr as usize, nc as usize);
            (nr < self.rows && nc < self.cols).then_some((nr, nc))
        })
    }

    fn count_adjacent_mines(&self, row: usize, col: usize) -> u8 {
        self.neighbors(row, col)
            .filter(|c| self.mine_locations.contains(c))
            .count() as u8
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn total_mines(&self) -> usize {
        self.mines
    }

    pub fn remaining_flags(&self) -> usize {
        self.mines.saturating_sub(self.flags.len())
    }

    pub fn flags_placed(&self) -> usize {
        self.flags.len()
    }

    pub fn is_flagged(&self, row: usize, col: usize) -> bool {
        self.flags.contains(&(row, col))
    }

    /// Toggles a flag on an unrevealed cell; a no-op on revealed cells.
    pub fn toggle_flag(&mut self, row: usize, col: usize) {
        let coord = (row, col);
        if self.cells[row][col].revealed {
            return;
        }
        if !self.flags.remove(&coord) {
            self.flags.insert(coord);
        }
    }

    /// What the UI should draw at (row, col).
    pub fn cell_state(&self, row: usize, col: usize) -> CellState {
        let coord = (row, col);
        if self.lost && self.mine_locations.contains(&coord) {
            return CellState::Mine;
        }
        let cell = self.cells[row][col];
        if cell.revealed {
            CellState::Revealed(cell.adjacent)
        } else if self.flags.contains(&coord) {
            CellState::Flagged
        } else {
            CellState::Hidden
        }
    }

    /// Reveal-all-unflagged-neighbors of a satisfied numbered cell
    /// (`input.rs`'s `InputAction::Chord`). A no-op unless (row, col) is
    /// revealed and its flagged-neighbor count equals its number.
    pub fn chord(&mut self, row: usize, col: usize) -> Result<RevealOutcome> {
        let cell = self.cells[row][col];
        if !cell.revealed {
            return Ok(RevealOutcome::Ok);
        }
        let flagged = self.neighbors(row, col).filter(|c| self.flags.contains(c)).count() as u8;
        if flagged != cell.adjacent {
            return Ok(RevealOutcome::Ok);
        }

        let targets: Vec<Coord> = self
            .neighbors(row, col)
            .filter(|c| !self.flags.contains(c) && !self.cells[c.0][c.1].revealed)
            .collect();

        let mut outcome = RevealOutcome::Ok;
        for (tr, tc) in targets {
            if self.cells[tr][tc].revealed {
                continue;
            }
            match self.reveal(tr, tc)? {
                RevealOutcome::Ok => {}
                other => outcome = other,
            }
        }
        Ok(outcome)
    }

    fn total_safe_squares(&self) -> usize {
        self.rows * self.cols - self.mines
    }
}

impl GameOracle for Board {
    fn rows(&self) -> usize {
        self.rows
    }

    fn cols(&self) -> usize {
        self.cols
    }

    fn total_mines(&self) -> usize {
        self.mines
    }

    fn get(&self, row: usize, col: usize) -> Option<GameCell> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        let coord = (row, col);
        if self.lost && self.mine_locations.contains(&coord) {
            return Some(GameCell::Mine);
        }
        let cell = self.cells[row][col];
        if cell.revealed {
            Some(GameCell::Number(cell.adjacent))
        } else {
            Some(GameCell::Unrevealed)
        }
    }

    /// Flood-reveal from (row, col) (`original_source/minesweeper.py`
    /// `revealSquare`): mines are placed on the first call, excluding this
    /// coordinate; revealing a mine exposes every mine and ends the game.
    fn reveal(&mut self, row: usize, col: usize) -> Result<RevealOutcome> {
        if row >= self.rows || col >= self.cols {
            return Err(Error::board_contradiction(format!(
                "reveal out of bounds: ({row}, {col})"
            )));
        }
        if !self.in_progress {
            return Err(Error::board_contradiction("reveal requested on a terminal board"));
        }
        if self.cells[row][col].revealed {
            return Err(Error::board_contradiction(format!(
                "({row}, {col}) is already revealed"
            )));
        }

        if self.mine_locations.is_empty() {
            self.place_mines((row, col));
        }

        if self.mine_locations.contains(&(row, col)) {
            self.in_progress = false;
            self.lost = true;
            return Ok(RevealOutcome::Lost);
        }

        let mut queue: VecDeque<Coord> = VecDeque::new();
        queue.push_back((row, col));

        while let Some((r, c)) = queue.pop_front() {
            if self.cells[r][c].revealed {
                continue;
            }
            let adjacent = self.count_adjacent_mines(r, c);
            self.cells[r][c] = Cell {
                revealed: true,
                adjacent,
            };
            self.seen += 1;
            if adjacent == 0 {
                for neighbor in self.neighbors(r, c).collect::<Vec<_>>() {
                    if !self.cells[neighbor.0][neighbor.1].revealed {
                        queue.push_back(neighbor);
                    }
                }
            }
        }

        if self.seen == self.total_safe_squares() {
            self.in_progress = false;
            Ok(RevealOutcome::Won)
        } else {
            Ok(RevealOutcome::Ok)
        }
    }

    fn in_progress(&self) -> bool {
        self.in_progress
    }
}

#[cfg(test)]
impl Board {
    /// Test-only constructor with mines placed up front, for scenarios
    /// that need a known board layout instead of random placement.
    pub fn from_mines(rows: usize, cols: usize, mine_locations: HashSet<Coord>) -> Self {
        let mines = mine_locations.len();
        Self {
            rows,
            cols,
            mines,
            cells: vec![vec![Cell::default(); cols]; rows],
            mine_locations,
            flags: HashSet::new(),
            seen: 0,
            in_progress: true,
            lost: false,
            rng: StdRng::seed_from_u64(0),
        }
    }
}
