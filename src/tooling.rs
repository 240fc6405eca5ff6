//! Tooling layer: the command-line surface over agents and the driver.

pub mod cli;

pub use cli::{Cli, CliContext};
