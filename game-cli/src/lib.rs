//! Terminal front end for the drawing game.
//!
//! Stands in for the canvas: each `draw` command is one stroke, and a
//! frame timer feeds real elapsed time into the session.

pub mod command;
pub mod config;
pub mod driver;
pub mod render;

pub use command::{CliCommand, ParseError};
pub use config::Config;
pub use driver::GameDriver;
