//! Display formatting utilities for CLI output

use colored::*;

use crate::error::InvalidConstraints;
use crate::presets::{Category, Preset};
use crate::render::{CandidateSummary, DataSource, ResultsBody, ResultsView};

pub fn format_status(source: &DataSource) -> String {
  match source {
    DataSource::Fallback => format!("{} {}", "⚠".yellow(), source.status_line().yellow()),
    DataSource::Catalog { .. } => source.status_line().dimmed().to_string(),
  }
}

/// One ranked candidate as a block of lines
pub fn format_candidate(candidate: &CandidateSummary) -> String {
  let header = format!(
    "{:>2}. {}  {} {}",
    candidate.rank,
    candidate.title().bold(),
    "Score:".dimmed(),
    candidate.total_score.to_string().green().bold()
  );

  let mut details = format!(
    "    Price: {}   Fuel: {}   0-60: {}",
    candidate.price_label().cyan(),
    candidate.fuel_label(),
    candidate.zero_to_sixty_label()
  );
  if let Some(drivetrain) = &candidate.drivetrain {
    details.push_str(&format!("   Drivetrain: {drivetrain}"));
  }

  let safety = format!("    Safety record: {}", candidate.safety_label());

  let metrics = Category::ALL
    .iter()
    .map(|c| format!("{}: {}", c.label(), candidate.points_label(*c)))
    .collect::<Vec<_>>()
    .join("  ");

  format!("{header}\n{details}\n{safety}\n    {}", metrics.dimmed())
}

pub fn format_results(view: &ResultsView) -> String {
  let mut out = format_status(&view.source);
  out.push('\n');

  match &view.body {
    ResultsBody::Empty => out.push_str("No results."),
    ResultsBody::Ranked(candidates) => {
      let blocks: Vec<String> = candidates.iter().map(format_candidate).collect();
      out.push('\n');
      out.push_str(&blocks.join("\n\n"));
    }
  }

  out
}

pub fn format_preset(preset: &Preset, is_default: bool) -> String {
  let marker = if is_default { format!(" {}", "(default)".green()) } else { String::new() };
  let weights = preset
    .weights()
    .iter()
    .map(|(c, w)| format!("{}={w}", c.weight_key()))
    .collect::<Vec<_>>()
    .join(" ");

  format!("{} {}{}\n   {}", "⚖".cyan(), preset.name().blue().bold(), marker, weights.dimmed())
}

/// Field-by-field validation messages
pub fn format_validation_errors(errors: &InvalidConstraints) -> String {
  errors
    .errors
    .iter()
    .map(|e| format!("{} {}", "✗".red(), e))
    .collect::<Vec<_>>()
    .join("\n")
}
