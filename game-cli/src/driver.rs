use game_core::{GameEvent, GameEventHandler, GameRng, GameSession, RandomSource};
use game_types::{GameSnapshot, PlayerAction};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::command::{CliCommand, HELP, ParseError};
use crate::config::Config;
use crate::render;

/// Forwards rendered events to the output channel.
struct EventPrinter {
    output: mpsc::UnboundedSender<String>,
}

impl GameEventHandler for EventPrinter {
    fn handle_event(&mut self, event: GameEvent) {
        if let Some(line) = render::render_event(&event) {
            // Receiver gone means we are shutting down.
            let _ = self.output.send(line);
        }
    }
}

/// Runs a session in real time: a frame timer advances the game clock and
/// player commands arrive over a channel.
pub struct GameDriver<R: RandomSource = GameRng> {
    session: GameSession<R>,
    frame: Duration,
    json_output: bool,
    output: mpsc::UnboundedSender<String>,
    last_frame: Instant,
}

impl<R: RandomSource> GameDriver<R> {
    pub fn new(
        mut session: GameSession<R>,
        config: &Config,
        output: mpsc::UnboundedSender<String>,
    ) -> Self {
        if !config.json_output {
            session.add_event_handler(Box::new(EventPrinter {
                output: output.clone(),
            }));
        }

        Self {
            session,
            frame: Duration::from_millis(config.frame_millis),
            json_output: config.json_output,
            output,
            last_frame: Instant::now(),
        }
    }

    /// Process commands until `quit` or until the command channel closes,
    /// returning the final state.
    pub async fn run(
        mut self,
        mut commands: mpsc::Receiver<Result<CliCommand, ParseError>>,
    ) -> GameSnapshot {
        let mut interval = tokio::time::interval(self.frame);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        self.last_frame = Instant::now();

        info!("Driver running with {:?} frames", self.frame);

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    self.on_frame();
                }
                command = commands.recv() => {
                    self.catch_up();
                    match command {
                        None | Some(Ok(CliCommand::Quit)) => break,
                        Some(Ok(command)) => self.handle(command),
                        Some(Err(err)) => {
                            debug!("Unparseable input: {}", err);
                            self.emit(format!("{} ({})", err, HELP));
                        }
                    }
                }
            }
        }

        info!("Driver stopped");
        let snapshot = self.session.snapshot();
        self.emit_snapshot(&snapshot);
        snapshot
    }

    fn on_frame(&mut self) {
        let before = self.session.snapshot();
        let after = self.catch_up();

        if self.json_output
            && (before.status != after.status
                || before.guess_count != after.guess_count
                || before.time_remaining != after.time_remaining)
        {
            self.emit_snapshot(&after);
        }
    }

    /// Feed the wall-clock time since the last frame into the session.
    fn catch_up(&mut self) -> GameSnapshot {
        let now = Instant::now();
        let elapsed = now.saturating_duration_since(self.last_frame);
        self.last_frame = now;
        self.session.advance(elapsed)
    }

    fn handle(&mut self, command: CliCommand) {
        match command {
            CliCommand::Action(action) => {
                // Hints and reveals are already reported through events.
                let show_status = !matches!(
                    action,
                    PlayerAction::RequestHint | PlayerAction::RevealWord
                );
                match self.session.apply(action) {
                    Ok(result) => {
                        if self.json_output || show_status {
                            self.emit_snapshot(&result.snapshot);
                        }
                    }
                    Err(err) => {
                        warn!("Command rejected: {}", err);
                        self.emit(format!("无法执行: {}", err));
                    }
                }
            }
            CliCommand::Status => {
                let snapshot = self.session.snapshot();
                self.emit_snapshot(&snapshot);
            }
            CliCommand::Help => self.emit(HELP.to_string()),
            CliCommand::Quit => {}
        }
    }

    fn emit_snapshot(&self, snapshot: &GameSnapshot) {
        if self.json_output {
            match serde_json::to_string(snapshot) {
                Ok(json) => self.emit(json),
                Err(err) => warn!("Failed to serialize snapshot: {}", err),
            }
        } else {
            self.emit(render::render_status(snapshot));
        }
    }

    fn emit(&self, line: String) {
        let _ = self.output.send(line);
    }
}
