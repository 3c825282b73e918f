//! Command-line front end: argument handling, commands, and terminal output

pub mod commands;
pub mod display;

use clap::ValueEnum;

#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq)]
pub enum OutputFormat {
  #[default]
  Pretty,
  Json,
}
