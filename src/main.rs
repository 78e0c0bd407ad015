#![deny(clippy::all, clippy::pedantic)]

use std::iter::Peekable;
use std::str::FromStr;
use std::time::Duration;

use minesweeper::app::App;
use minesweeper::board::Board;
use minesweeper::difficulty::{Config, Difficulty};
use minesweeper::solver::Solver;

/// Hand-rolled argument scan (SPEC_FULL.md §D): the teacher carries no
/// CLI-parsing dependency, and three flags don't warrant adding one.
struct Cli {
    difficulty: Difficulty,
    rows: Option<usize>,
    cols: Option<usize>,
    mines: Option<usize>,
    auto: Option<usize>,
    seed: Option<u64>,
}

impl Cli {
    fn parse(args: impl Iterator<Item = String>) -> anyhow::Result<Self> {
        let mut cli = Cli {
            difficulty: Difficulty::Easy,
            rows: None,
            cols: None,
            mines: None,
            auto: None,
            seed: None,
        };
        let mut args = args.skip(1).peekable();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--difficulty" => {
                    let value = next_value(&mut args, "--difficulty")?;
                    cli.difficulty = match value.as_str() {
                        "easy" => Difficulty::Easy,
                        "medium" => Difficulty::Medium,
                        "hard" => Difficulty::Hard,
                        other => anyhow::bail!("unknown difficulty {other:?}"),
                    };
                }
                "--rows" => cli.rows = Some(parse_value(&mut args, "--rows")?),
                "--cols" => cli.cols = Some(parse_value(&mut args, "--cols")?),
                "--mines" => cli.mines = Some(parse_value(&mut args, "--mines")?),
                "--seed" => cli.seed = Some(parse_value(&mut args, "--seed")?),
                "--auto" => cli.auto = Some(1),
                other if other.starts_with("--auto=") => {
                    let (_, n) = other.split_once('=').expect("starts_with checked '='");
                    cli.auto = Some(n.parse()?);
                }
                other => anyhow::bail!("unrecognized argument {other:?}"),
            }
        }
        Ok(cli)
    }

    /// Custom dimensions override the chosen difficulty's defaults field by
    /// field, mirroring `original_source/minesweeper.py`'s `getGameConfig`.
    fn config(&self) -> anyhow::Result<Config> {
        if self.rows.is_none() && self.cols.is_none() && self.mines.is_none() {
            return Ok(Config::from_difficulty(self.difficulty));
        }
        let defaults = Config::from_difficulty(self.difficulty);
        Ok(Config::new(
            self.rows.unwrap_or(defaults.rows),
            self.cols.unwrap_or(defaults.cols),
            self.mines.unwrap_or(defaults.mines),
        )?)
    }
}

fn next_value(args: &mut Peekable<impl Iterator<Item = String>>, flag: &str) -> anyhow::Result<String> {
    args.next().ok_or_else(|| anyhow::anyhow!("{flag} needs a value"))
}

fn parse_value<T>(args: &mut Peekable<impl Iterator<Item = String>>, flag: &str) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let value = next_value(args, flag)?;
    value
        .parse()
        .map_err(|e| anyhow::anyhow!("invalid value for {flag}: {e}"))
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse(std::env::args())?;
    let config = cli.config()?;

    if let Some(games) = cli.auto {
        run_autosolve(config, cli.seed, games)
    } else {
        let mut app = match cli.seed {
            Some(seed) => App::with_seed(config, cli.difficulty, seed),
            None => App::new(config, cli.difficulty),
        };
        app.run()?;
        Ok(())
    }
}

/// Mirrors `MinesweeperAI.playGames` in `original_source/minesweeper_ai.py`:
/// run the solver to completion `games` times and print aggregate stats.
fn run_autosolve(config: Config, seed: Option<u64>, games: usize) -> anyhow::Result<()> {
    let mut wins = 0usize;
    let mut total_moves = 0usize;
    let mut total_duration = Duration::ZERO;

    for i in 0..games {
        let game_seed = seed.map(|s| s.wrapping_add(i as u64));
        let board = match game_seed {
            Some(s) => Board::with_seed(config, s),
            None => Board::new(config),
        };
        let mut solver = match game_seed {
            Some(s) => Solver::with_seed(board, s),
            None => Solver::new(board),
        };
        let result = solver.play_game()?;
        wins += usize::from(result.won);
        total_moves += result.moves;
        total_duration += result.duration;
        log::info!(
            "game {}/{games}: {} in {} moves ({:?})",
            i + 1,
            if result.won { "won" } else { "lost" },
            result.moves,
            result.duration
        );
    }

    let win_rate = 100.0 * wins as f64 / games as f64;
    println!(
        "played {games} games: {wins} won ({win_rate:.1}% win rate), \
         {total_moves} total moves, {total_duration:?} total"
    );
    Ok(())
}
