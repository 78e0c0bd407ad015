use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

/// Validated board parameters: `0 < rows, cols` and `0 < mines < rows*cols`
/// (spec.md §6.1). Generalizes `Difficulty` to arbitrary custom sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    pub rows: usize,
    pub cols: usize,
    pub mines: usize,
}

impl Config {
    pub fn new(rows: usize, cols: usize, mines: usize) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(Error::config_invalid("rows and cols must be positive"));
        }
        if mines == 0 || mines >= rows * cols {
            return Err(Error::config_invalid(
                "mines must be positive and less than rows*cols",
            ));
        }
        Ok(Self { rows, cols, mines })
    }

    pub fn from_difficulty(difficulty: Difficulty) -> Self {
        let (cols, rows, mines) = difficulty.parameters();
        Self { rows, cols, mines }
    }
}

impl Difficulty {
    /// Return the board parameters for this difficulty as (width, height, mines)
    /// Classic Minesweeper values:
    /// - Easy/Beginner: 9x9 with 10 mines
    /// - Medium/Intermediate: 16x16 with 40 mines
    /// - Hard/Expert: 30x16 with 99 mines
    pub const fn parameters(self) -> (usize, usize, usize) {
        match self {
            Self::Easy => (9, 9, 10),
            Self::Medium => (16, 16, 40),
            Self::Hard => (30, 16, 99),
        }
    }

    /// Cycle to the next difficulty in order: Easy -> Medium -> Hard -> Easy
    pub const fn cycle(self) -> Self {
        match self {
            Self::Easy => Self::Medium,
            Self::Medium => Self::Hard,
            Self::Hard => Self::Easy,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Difficulty;

    #[test]
    fn parameters_match_classic_values() {
        assert_eq!(Difficulty::Easy.parameters(), (9, 9, 10));
        assert_eq!(Difficulty::Medium.parameters(), (16, 16, 40));
        assert_eq!(Difficulty::Hard.parameters(), (30, 16, 99));
    }

    #[test]
    fn cycle_rotates_in_order() {
        assert_eq!(Difficulty::Easy.cycle(), Difficulty::Medium);
        assert_eq!(Difficulty::Medium.cycle(), Difficulty::Hard);
        assert_eq!(Difficulty::Hard.cycle(), Difficulty::Easy);
    }

    #[test]
    fn from_difficulty_matches_parameters() {
        let cfg = super::Config::from_difficulty(Difficulty::Hard);
        assert_eq!((cfg.cols, cfg.rows, cfg.mines), Difficulty::Hard.parameters());
    }

    #[test]
    fn rejects_zero_dimensions() {
        assert!(super::Config::new(0, 5, 1).is_err());
        assert!(super::Config::new(5, 0, 1).is_err());
    }

    #[test]
    fn rejects_too_many_mines() {
        assert!(super::Config::new(3, 3, 9).is_err());
        assert!(super::Config::new(3, 3, 0).is_err());
        assert!(super::Config::new(3, 3, 8).is_ok());
    }
}
