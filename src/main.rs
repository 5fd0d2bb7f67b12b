//! Terminal shell for the fading tic-tac-toe engine.
//!
//! Thin I/O glue: reads commands from stdin, forwards them to the engine,
//! and redraws the board whenever the engine reports a change.

use anyhow::Result;
use clap::{Parser, ValueEnum};
use fading_tictactoe::{CpuScheduler, GameEngine, GameEvent, GameMode, RandomCpu};
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Fading tic-tac-toe: only the six most recent marks stay on the board.
#[derive(Parser, Debug)]
#[command(name = "fading_tictactoe")]
#[command(about = "Tic-tac-toe with a fading six-move window", long_about = None)]
#[command(version)]
struct Cli {
    /// Game mode to start in.
    #[arg(short, long, value_enum, default_value_t = ModeArg::Pvp)]
    mode: ModeArg,

    /// RNG seed for reproducible games.
    #[arg(long)]
    seed: Option<u64>,
}

/// Game mode argument.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum ModeArg {
    /// Two humans sharing the board.
    Pvp,
    /// Play against the random CPU.
    Cpu,
}

impl From<ModeArg> for GameMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Pvp => GameMode::Pvp,
            ModeArg::Cpu => GameMode::VsCpu,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    let mut engine = match cli.seed {
        Some(seed) => GameEngine::seeded(seed),
        None => GameEngine::new(),
    }
    .with_events(event_tx);
    engine.set_mode(cli.mode.into());
    let engine = Arc::new(Mutex::new(engine));

    let policy = match cli.seed {
        Some(seed) => RandomCpu::seeded(seed),
        None => RandomCpu::new(),
    };
    let scheduler = CpuScheduler::new(Arc::clone(&engine), Box::new(policy)).spawn();

    // Redraw on every engine mutation.
    let printer_engine = Arc::clone(&engine);
    let printer = tokio::spawn(async move {
        while let Some(event) = event_rx.recv().await {
            match event {
                GameEvent::CpuThinking => println!("CPU is thinking..."),
                GameEvent::MarkFaded { index } => println!("The mark at cell {index} faded away"),
                _ => {
                    let (board, status) = {
                        let engine = printer_engine.lock().unwrap();
                        (engine.board().display(), engine.status_text())
                    };
                    println!("{board}\n{status}\n");
                }
            }
        }
    });

    println!("Commands: 0-8 place, r reset, m pvp / m cpu switch mode, s randomize start, q quit");
    {
        let engine = engine.lock().unwrap();
        println!("{}\n{}\n", engine.board().display(), engine.status_text());
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let input = line.trim();
        let mut engine = engine.lock().unwrap();
        match input {
            "" => {}
            "q" => break,
            "r" => engine.reset(),
            "s" => engine.randomize_starting_player(),
            "m pvp" => engine.set_mode(GameMode::Pvp),
            "m cpu" => engine.set_mode(GameMode::VsCpu),
            _ => match input.parse::<usize>() {
                Ok(index) => {
                    if !engine.place_move(index) {
                        println!("No move at {index}: {}", engine.status_text());
                    }
                }
                Err(_) => println!("Unrecognized command: {input}"),
            },
        }
    }

    info!("shutting down");
    scheduler.cancel();
    printer.abort();
    Ok(())
}
