use game_types::PlayerAction;
use std::str::FromStr;
use thiserror::Error;

pub const HELP: &str = "commands: s(tart)  d(raw) [n]  h(int)  v (reveal word)  n(ext round)  r(eset)  p (status)  ? (help)  q(uit)";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliCommand {
    Action(PlayerAction),
    Status,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("empty command")]
    Empty,
    #[error("unknown command '{0}'")]
    Unknown(String),
    #[error("invalid stroke count '{0}'")]
    InvalidCount(String),
}

impl FromStr for CliCommand {
    type Err = ParseError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut parts = line.split_whitespace();
        let Some(name) = parts.next() else {
            return Err(ParseError::Empty);
        };

        let command = match name.to_lowercase().as_str() {
            "s" | "start" => CliCommand::Action(PlayerAction::Start),
            "d" | "draw" => {
                let count = match parts.next() {
                    Some(raw) => match raw.parse::<u32>() {
                        Ok(count) if count > 0 => count,
                        _ => return Err(ParseError::InvalidCount(raw.to_string())),
                    },
                    None => 1,
                };
                CliCommand::Action(PlayerAction::Draw { count })
            }
            "h" | "hint" => CliCommand::Action(PlayerAction::RequestHint),
            "v" | "reveal" => CliCommand::Action(PlayerAction::RevealWord),
            "n" | "next" => CliCommand::Action(PlayerAction::NextRound),
            "r" | "reset" => CliCommand::Action(PlayerAction::ResetGame),
            "p" | "status" => CliCommand::Status,
            "?" | "help" => CliCommand::Help,
            "q" | "quit" | "exit" => CliCommand::Quit,
            other => return Err(ParseError::Unknown(other.to_string())),
        };

        Ok(command)
    }
}
