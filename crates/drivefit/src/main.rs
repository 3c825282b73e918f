use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use drivefit::cli::{commands, OutputFormat};
use drivefit::config::{self, ClientConfig};
use drivefit::{ConstraintInput, HttpScoringClient};

#[derive(Parser)]
#[command(name = "drivefit")]
#[command(
  about = "drivefit - Weighted Vehicle Recommendations\nRank cars against your budget, usage, and what matters most to you"
)]
#[command(version)]
struct Cli {
  #[command(flatten)]
  global: GlobalArgs,

  #[command(subcommand)]
  command: Command,
}

#[derive(Args)]
struct GlobalArgs {
  /// Base URL of the recommendation service
  #[arg(long, global = true, env = "DRIVEFIT_API_URL")]
  api_url: Option<String>,

  /// Request timeout in seconds
  #[arg(
    long,
    global = true,
    env = "DRIVEFIT_TIMEOUT_SECS",
    value_parser = clap::value_parser!(u64).range(1..)
  )]
  timeout_secs: Option<u64>,

  /// Preset table file (JSON); defaults to the first one found, then built-in presets
  #[arg(long, global = true)]
  presets: Option<PathBuf>,

  /// Enable verbose logging
  #[arg(short, long, global = true)]
  verbose: bool,
}

/// Hard constraints as typed by the user; validated before anything is sent
#[derive(Args)]
struct ConstraintArgs {
  /// Maximum purchase budget
  #[arg(long, allow_hyphen_values = true)]
  budget: String,
  /// Region the vehicle will be driven in
  #[arg(long)]
  location: String,
  /// Expected distance driven per year
  #[arg(long, allow_hyphen_values = true)]
  annual_distance: String,
  /// Number of passengers to seat
  #[arg(long, allow_hyphen_values = true)]
  passengers: String,
  /// Only consider one fuel type (gas, diesel, hybrid, ev)
  #[arg(long)]
  fuel_type: Option<String>,
}

impl From<ConstraintArgs> for ConstraintInput {
  fn from(args: ConstraintArgs) -> Self {
    ConstraintInput {
      budget: args.budget,
      location: args.location,
      annual_distance: args.annual_distance,
      passengers: args.passengers,
      fuel_type: args.fuel_type,
    }
  }
}

#[derive(Subcommand)]
enum Command {
  /// Get ranked vehicle recommendations
  Recommend {
    #[command(flatten)]
    constraints: ConstraintArgs,
    /// Preference preset; empty or unknown names use the default preset
    #[arg(short, long, default_value = "")]
    preset: String,
    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Pretty)]
    format: OutputFormat,
  },
  /// List available preference presets
  Presets {
    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Pretty)]
    format: OutputFormat,
  },
  /// Check that the recommendation service is reachable
  Status,
}

async fn handle(global: GlobalArgs, command: Command) -> Result<()> {
  let client_config = ClientConfig::with_overrides(global.api_url, global.timeout_secs);
  let presets = config::load_presets(global.presets.as_deref()).context("Failed to load presets")?;

  match command {
    Command::Recommend { constraints, preset, format } => {
      let client = HttpScoringClient::try_new(client_config)?;
      let request =
        commands::RecommendRequest { constraints: constraints.into(), preset, format };
      commands::recommend(&client, &presets, request).await
    }
    Command::Presets { format } => commands::list_presets(&presets, format),
    Command::Status => {
      let client = HttpScoringClient::try_new(client_config)?;
      commands::status(&client).await
    }
  }
}

#[tokio::main]
async fn main() -> Result<()> {
  let cli = Cli::parse();
  drivefit::logging::init(cli.global.verbose);

  handle(cli.global, cli.command).await
}
