//! The interactive terminal session: spec.md §1's "interactive renderer"
//! and "input/prompt loop" collaborators, external to the solver core but
//! still part of this crate's shell (SPEC_FULL.md §A).

use std::io::{self, Stdout};
use std::time::{Duration, Instant};

use crossterm::event;
use crossterm::execute;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen};
use ratatui::backend::CrosstermBackend;
use ratatui::{Frame, Terminal};

use crate::board::Board;
use crate::difficulty::{Config, Difficulty};
use crate::error::Result;
use crate::input::{translate_event, Dir, InputAction};
use crate::solver::{GameOracle, RevealOutcome};
use crate::ui;

/// Game status as the UI needs it; distinct from `RevealOutcome`, which is
/// a one-shot return value rather than persisted state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Playing,
    Win,
    Lose,
}

pub struct App {
    board: Board,
    config: Config,
    difficulty: Difficulty,
    seed: Option<u64>,
    cursor: (usize, usize),
    status: Status,
    started_at: Option<Instant>,
}

impl App {
    pub fn new(config: Config, difficulty: Difficulty) -> Self {
        Self::build(config, difficulty, None)
    }

    /// Deterministic variant for reproducible sessions (spec.md §8 property 6).
    pub fn with_seed(config: Config, difficulty: Difficulty, seed: u64) -> Self {
        Self::build(config, difficulty, Some(seed))
    }

    fn build(config: Config, difficulty: Difficulty, seed: Option<u64>) -> Self {
        let board = match seed {
            Some(seed) => Board::with_seed(config, seed),
            None => Board::new(config),
        };
        Self {
            board,
            config,
            difficulty,
            seed,
            cursor: (0, 0),
            status: Status::Playing,
            started_at: None,
        }
    }

    pub fn run(&mut self) -> Result<()> {
        let mut terminal = setup_terminal()?;
        let result = self.event_loop(&mut terminal);
        restore_terminal(&mut terminal)?;
        result
    }

    fn event_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        loop {
            terminal.draw(|f| self.draw(f))?;
            if !event::poll(Duration::from_millis(100))? {
                continue;
            }
            let ev = event::read()?;
            let Some(action) = translate_event(ev) else {
                continue;
            };
            if action == InputAction::Quit {
                return Ok(());
            }
            self.handle_action(action)?;
        }
    }

    fn draw(&self, f: &mut Frame<'_>) {
        let elapsed = self.started_at.map_or(0, |t| t.elapsed().as_secs());
        ui::draw_app(
            f,
            self.board.total_mines(),
            self.board.flags_placed(),
            elapsed,
            self.board.cols(),
            self.board.rows(),
            |col, row| self.board.cell_state(row, col),
            Some((self.cursor.1, self.cursor.0)),
            self.status,
        );
    }

    fn handle_action(&mut self, action: InputAction) -> Result<()> {
        match action {
            InputAction::Move(dir) => self.move_cursor(dir),
            InputAction::Reveal => self.reveal_cursor()?,
            InputAction::Flag => {
                if self.status == Status::Playing {
                    self.board.toggle_flag(self.cursor.0, self.cursor.1);
                }
            }
            InputAction::Chord => self.chord_cursor()?,
            InputAction::Restart => self.restart(),
            InputAction::ChangeDifficulty => self.change_difficulty(),
            InputAction::Quit => {}
        }
        Ok(())
    }

    fn move_cursor(&mut self, dir: Dir) {
        let (rows, cols) = (self.board.rows(), self.board.cols());
        let (row, col) = self.cursor;
        self.cursor = match dir {
            Dir::Left => (row, col.saturating_sub(1)),
            Dir::Right => (row, (col + 1).min(cols - 1)),
            Dir::Up => (row.saturating_sub(1), col),
            Dir::Down => ((row + 1).min(rows - 1), col),
        };
    }

    fn reveal_cursor(&mut self) -> Result<()> {
        if self.status != Status::Playing {
            return Ok(());
        }
        self.started_at.get_or_insert_with(Instant::now);
        let (row, col) = self.cursor;
        let outcome = self.board.reveal(row, col)?;
        self.apply_outcome(outcome);
        Ok(())
    }

    fn chord_cursor(&mut self) -> Result<()> {
        if self.status != Status::Playing {
            return Ok(());
        }
        let (row, col) = self.cursor;
        let outcome = self.board.chord(row, col)?;
        self.apply_outcome(outcome);
        Ok(())
    }

    fn apply_outcome(&mut self, outcome: RevealOutcome) {
        self.status = match outcome {
            RevealOutcome::Ok => Status::Playing,
            RevealOutcome::Won => Status::Win,
            RevealOutcome::Lost => Status::Lose,
        };
    }

    fn restart(&mut self) {
        *self = Self::build(self.config, self.difficulty, self.seed);
    }

    fn change_difficulty(&mut self) {
        let difficulty = self.difficulty.cycle();
        let config = Config::from_difficulty(difficulty);
        *self = Self::build(config, difficulty, self.seed);
    }
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    Ok(Terminal::new(CrosstermBackend::new(stdout))?)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    Ok(())
}
