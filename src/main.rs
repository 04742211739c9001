//! gomcts: Go on a small board against a Monte Carlo Tree Search player.
//!
//! ## Usage
//!
//! - `gomcts` - Show a demo
//! - `gomcts gtp` - Start GTP server for GUI integration
//! - `gomcts play --ai white` - Play a console game against the engine
//! - `gomcts demo` - Run the MCTS demo

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};

use gomcts::board::Color;
use gomcts::constants::{DEFAULT_BOARD_SIZE, DEFAULT_ITERATIONS, MAX_BOARD_SIZE};
use gomcts::game::{GameState, Move, Winner, parse_move, str_move};
use gomcts::gtp::GtpEngine;
use gomcts::mcts::{SearchConfig, SearchTree, Searcher, dump_children};

/// gomcts: Go rules engine with an MCTS player
#[derive(Parser)]
#[command(name = "gomcts")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the GTP (Go Text Protocol) server for use with GUI applications
    Gtp(EngineArgs),
    /// Play a game on the console, optionally against the engine
    Play {
        #[command(flatten)]
        engine: EngineArgs,
        /// Color played by the engine; omit for a two-player game
        #[arg(long, value_enum)]
        ai: Option<Side>,
    },
    /// Run a simple demo of the engine
    Demo(EngineArgs),
}

#[derive(Args, Clone)]
struct EngineArgs {
    /// Board size (NxN)
    #[arg(long, default_value_t = DEFAULT_BOARD_SIZE)]
    size: usize,
    /// MCTS iterations per engine move
    #[arg(long, default_value_t = DEFAULT_ITERATIONS)]
    iterations: usize,
    /// Seed for reproducible searches
    #[arg(long)]
    seed: Option<u64>,
    /// Print search statistics to stderr
    #[arg(long)]
    verbose: bool,
}

impl EngineArgs {
    fn size(&self) -> Result<usize> {
        if !(1..=MAX_BOARD_SIZE).contains(&self.size) {
            bail!("board size must be between 1 and {MAX_BOARD_SIZE}, got {}", self.size);
        }
        Ok(self.size)
    }

    fn search_config(&self) -> SearchConfig {
        SearchConfig {
            iterations: self.iterations,
            seed: self.seed,
            verbose: self.verbose,
        }
    }
}

#[derive(Copy, Clone, ValueEnum)]
enum Side {
    Black,
    White,
}

impl From<Side> for Color {
    fn from(side: Side) -> Self {
        match side {
            Side::Black => Color::Black,
            Side::White => Color::White,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Gtp(args)) => {
            let mut engine = GtpEngine::with_config(args.size()?, args.search_config());
            engine.run().context("GTP session failed")?;
        }
        Some(Commands::Play { engine, ai }) => {
            run_game(&engine, ai.map(Color::from))?;
        }
        Some(Commands::Demo(args)) => run_demo(&args)?,
        None => run_demo(&EngineArgs {
            size: DEFAULT_BOARD_SIZE,
            iterations: DEFAULT_ITERATIONS,
            seed: None,
            verbose: false,
        })?,
    }
    Ok(())
}

fn run_demo(args: &EngineArgs) -> Result<()> {
    println!("gomcts: Go MCTS Engine\n");

    let size = args.size()?;
    let mut game = GameState::new(size);
    let center = size / 2;
    for mv in [Move::at(center, center), Move::at(center, center.saturating_sub(1))] {
        if let Err(e) = game.make_move(mv) {
            println!("{}: {e}", str_move(mv, size));
        }
    }
    println!("{}", game.board());

    println!("Running {} MCTS iterations...", args.iterations);
    let mut rng = match args.seed {
        Some(seed) => fastrand::Rng::with_seed(seed),
        None => fastrand::Rng::new(),
    };
    let mut tree = SearchTree::new(&game);
    tree.run(args.iterations, &mut rng);
    let best = tree.best_action();
    println!("Best move for {}: {}", game.current_player(), str_move(best, size));
    println!("Root mean reward: {:.3}", tree.root().mean_reward());
    if args.verbose {
        dump_children(&tree);
    }
    Ok(())
}

/// Console game loop: human moves are read as vertices (`C3`) or `pass`.
fn run_game(args: &EngineArgs, ai: Option<Color>) -> Result<()> {
    let size = args.size()?;
    let mut game = GameState::new(size);
    let mut searcher = Searcher::new(args.search_config());
    if let Some(color) = ai {
        println!(
            "Engine plays {color} with {} iterations per move",
            searcher.config().iterations
        );
    }
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    while !game.is_over() {
        println!("\n{}", game.board());
        let player = game.current_player();

        if ai == Some(player) {
            let mv = searcher.search(&game);
            game.make_move(mv)
                .with_context(|| format!("engine chose illegal move {mv:?}"))?;
            println!("{player} plays {}", str_move(mv, size));
            continue;
        }

        print!("{player} to move (e.g. C3 or pass): ");
        io::stdout().flush().context("failed to flush stdout")?;
        let Some(line) = lines.next() else {
            println!();
            return Ok(());
        };
        let line = line.context("failed to read move")?;

        let mv = match parse_move(&line, size) {
            Ok(mv) => mv,
            Err(e) => {
                println!("{e}, try again.");
                continue;
            }
        };
        if let Err(e) = game.make_move(mv) {
            println!("Invalid move: {e}, try again.");
        }
    }

    let score = game.score();
    println!("\n{}", game.board());
    println!("Game over. Black {} - White {}", score.black, score.white);
    match score.winner {
        Winner::Black => println!("Black wins"),
        Winner::White => println!("White wins"),
        Winner::Tie => println!("Tie"),
    }
    Ok(())
}
