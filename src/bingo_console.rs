// src/bingo_console.rs
//
// Terminal game master console: draws balls, keeps the master call sheet and shows the
// pattern card for the current game mode.
//
// Interactive Controls:
// - ENTER/SPACE: Draw the next ball
// - o / e: Tap all odd / even numbers
// - 0-9: Tap every number ending with that digit (wild number)
// - n: Tap a single number
// - m: Choose a game mode or enter a custom one
// - t: Toggle a cell of the pattern card
// - r: Reset the game
// - ESC/q: Exit the console
//
// CLI Options:
// - --config: Configuration file (default conf/console.conf)
// - --seed: Fix the draw sequence
// - --mode: Game mode to start with
// - --exit: Show the initial state and exit (no interactive loop)
// - --json: Print the final game state as JSON on exit

use std::path::PathBuf;

use clap::Parser;

use bingo_master::config::{ConsoleConfig, DEFAULT_CONFIG_PATH};
use bingo_master::events::{ConsoleEvent, DisplaySurface, EventOutcome};
use bingo_master::game::Game;
use bingo_master::input::{self, ConsoleKey};
use bingo_master::logging::{log_error, log_info};
use bingo_master::terminal::{self, TerminalSurface};

#[derive(Parser)]
#[command(name = env!("CARGO_BIN_NAME"))]
#[command(about = "Bingo Game Master Console - Draw balls, call numbers and show win patterns")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Args {
    /// Configuration file
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Seed for the ball draw (overrides the config file)
    #[arg(long)]
    seed: Option<u64>,

    /// Game mode to start with, e.g. "Four Corners" or any custom name
    #[arg(long)]
    mode: Option<String>,

    /// Exit after displaying the current state (no interactive loop)
    #[arg(long)]
    exit: bool,

    /// Print the final game state as JSON
    #[arg(long)]
    json: bool,
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = ConsoleConfig::load_or_default(&args.config);
    if args.seed.is_some() {
        config.seed = args.seed;
    }

    let mut game = Game::from_config(&config);
    log_info(&format!(
        "Console started (seed: {})",
        config.seed.map(|s| s.to_string()).unwrap_or_else(|| "random".to_string())
    ));

    if let Some(mode) = args.mode {
        game.dispatch(ConsoleEvent::ModeSelected(mode))?;
    }

    if args.exit {
        print!("{}", terminal::render_screen(&game.snapshot(), config.colors, config.show_card));
    } else {
        let mut surface = TerminalSurface {
            colors: config.colors,
            show_card: config.show_card,
        };
        surface.refresh(&game.snapshot());
        game.subscribe(Box::new(surface));
        interactive_loop(&mut game)?;
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&game.snapshot())?);
    }

    Ok(())
}

fn interactive_loop(game: &mut Game) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        let key = input::read_key()?;
        if key == ConsoleKey::Quit {
            println!("Exiting the game.");
            return Ok(());
        }

        let event = match input::key_to_event(key) {
            Ok(Some(event)) => event,
            Ok(None) => continue,
            Err(e) => {
                // Bad text at a prompt: report it and wait for the next key.
                log_error(&e.to_string());
                continue;
            }
        };

        match game.dispatch(event) {
            Ok(EventOutcome::Drawn(None)) => {
                println!("\nAll 75 numbers have been called. Press r to reset.");
            }
            Ok(_) => {}
            Err(e) => println!("\n{e}"),
        }
    }
}

fn main() {
    let args = Args::parse();
    if let Err(e) = run(args) {
        log_error(&format!("{e}"));
        std::process::exit(1);
    }
}
