//! Play - Interactive tic-tac-toe match against the UCT search engine
//!
//! The human plays X and moves first; the engine plays O. Each turn the
//! board is printed, the human enters a cell index (0-8, row-major from
//! top-left), and the engine answers with a searched move.

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use games_tictactoe::{Action, State, PLAYER_X};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use tracing::{debug, info};
use uct::run_uct;
use uct_core::GameState;

mod config;

use crate::config::{load_config, PlayConfig};

fn init_tracing(level: &str) -> Result<()> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    Ok(())
}

/// Prompt until the human enters a legal cell index.
fn read_human_action(state: &State, input: &mut impl BufRead) -> Result<Option<Action>> {
    let legal = state.legal_actions();

    loop {
        print!("Your move (0-8): ");
        io::stdout().flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(None); // EOF, quit the match
        }

        let trimmed = line.trim();
        if trimmed.eq_ignore_ascii_case("q") {
            return Ok(None);
        }

        match trimmed.parse::<u8>() {
            Ok(cell) if legal.contains(&Action::Place(cell)) => {
                return Ok(Some(Action::Place(cell)));
            }
            Ok(cell) => println!("Cell {cell} is not available."),
            Err(_) => println!("Enter a cell index 0-8, or q to quit."),
        }
    }
}

fn announce_result(state: &State) {
    match state.winning_agent() {
        Some(agent) if agent == PLAYER_X => println!("You win!"),
        Some(_) => println!("The engine wins."),
        None => println!("Draw."),
    }
}

fn run_match(config: &PlayConfig) -> Result<()> {
    let uct_config = config.search.to_uct_config();
    let mut rng = ChaCha20Rng::seed_from_u64(config.common.seed);

    let stdin = io::stdin();
    let mut input = stdin.lock();

    let mut state = State::new();
    println!("You are X. Cells are numbered 0-8, row-major from top-left.\n");

    while !state.is_terminal() {
        println!("{state}");

        if state.acting_agent() == PLAYER_X {
            let Some(action) = read_human_action(&state, &mut input)? else {
                println!("Match abandoned.");
                return Ok(());
            };
            state.apply_action(&action);
        } else {
            let result = run_uct(state.clone(), uct_config.clone(), &mut rng)
                .context("engine search failed")?;
            debug!(
                iterations = result.iterations,
                visits = result.action_visits,
                elapsed_ms = result.elapsed.as_millis() as u64,
                "search finished"
            );
            println!(
                "Engine plays cell {} ({} iterations).",
                result.action.position(),
                result.iterations
            );
            state.apply_action(&result.action);
        }
    }

    println!("{state}");
    announce_result(&state);
    Ok(())
}

fn main() -> Result<()> {
    // Tracing first so config loading can log its search
    let bootstrap_level =
        std::env::var("UCT_COMMON_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
    init_tracing(&bootstrap_level)?;

    let config = load_config();
    info!(
        max_iterations = config.search.max_iterations,
        max_time_millis = config.search.max_time_millis,
        rollout_depth = config.search.rollout_depth,
        "Configuration loaded"
    );

    run_match(&config)
}
