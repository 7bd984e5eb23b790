use anyhow::{Context, Result};
use chrono::Utc;
use std::io::BufRead;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use game_cli::command::HELP;
use game_cli::{CliCommand, Config, GameDriver, ParseError};
use game_core::{GameRng, GameSession, WordBank};

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so they never interleave with game output.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Config::new().context("Failed to read configuration")?;
    let word_bank = Arc::new(WordBank::standard().context("Built-in word bank is invalid")?);

    let rng = config.seed.map(GameRng::new).unwrap_or_else(GameRng::from_entropy);
    info!("Starting Sketch Guess with seed {}", rng.seed());

    let session = GameSession::new(word_bank, config.game_config(), rng, Utc::now());

    let (output_tx, mut output_rx) = mpsc::unbounded_channel::<String>();
    let printer = tokio::spawn(async move {
        while let Some(line) = output_rx.recv().await {
            println!("{}", line);
        }
    });

    let (command_tx, command_rx) = mpsc::channel(32);
    spawn_input_thread(command_tx);

    let _ = output_tx.send("AI 你画我猜 - 画出题目，让AI来猜！".to_string());
    let _ = output_tx.send(HELP.to_string());

    let driver = GameDriver::new(session, &config, output_tx);
    let final_state = driver.run(command_rx).await;

    printer.await.context("Output task failed")?;
    info!(
        "Finished after {} rounds with score {}",
        final_state.round_number, final_state.score
    );
    Ok(())
}

/// Stdin is read on a plain thread so runtime shutdown never waits on it.
fn spawn_input_thread(commands: mpsc::Sender<Result<CliCommand, ParseError>>) {
    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else {
                break;
            };
            if line.trim().is_empty() {
                continue;
            }
            if commands.blocking_send(line.parse()).is_err() {
                break;
            }
        }
    });
}
