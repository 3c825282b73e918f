use anyhow::{anyhow, Context, Result};
use colored::*;

use crate::cli::display::{format_preset, format_results, format_validation_errors};
use crate::cli::OutputFormat;
use crate::client::{HttpScoringClient, ScoringService};
use crate::presets::PresetRegistry;
use crate::query::{ConstraintInput, RequestBuilder};
use crate::session::{SubmissionSession, ViewState};

/// Everything the user supplied for one recommendation
#[derive(Debug, Clone)]
pub struct RecommendRequest {
  pub constraints: ConstraintInput,
  pub preset: String,
  pub format: OutputFormat,
}

/// Build a query from the chosen preset, send it, and print the ranked results
pub async fn recommend<S>(
  service: &S,
  presets: &PresetRegistry,
  request: RecommendRequest,
) -> Result<()>
where
  S: ScoringService + ?Sized,
{
  let requested = request.preset.trim();
  let resolved = presets.resolve_preset(requested);
  if !requested.is_empty() && resolved.name() != requested {
    tracing::warn!(requested, fallback = resolved.name(), "unknown preset");
    eprintln!(
      "{} Unknown preset '{}', using '{}'",
      "⚠".yellow(),
      requested.yellow(),
      resolved.name().cyan()
    );
  }

  let builder = RequestBuilder::new(presets);
  let mut session = SubmissionSession::new();

  match session.submit(service, &builder, &request.constraints, requested).await {
    ViewState::Ready(view) => {
      match request.format {
        OutputFormat::Pretty => {
          println!("{} Preset: {}", "✓".green(), resolved.name().blue().bold());
          println!("{}", format_results(view));
        }
        OutputFormat::Json => {
          println!("{}", serde_json::to_string_pretty(view).context("Failed to encode results")?);
        }
      }
      Ok(())
    }
    ViewState::Invalid(errors) => {
      eprintln!("{}", format_validation_errors(errors));
      Err(anyhow!("Invalid constraints, nothing was sent"))
    }
    ViewState::Failed(message) => {
      eprintln!("{} {}", "✗".red(), message);
      Err(anyhow!("Recommendation request failed: {message}"))
    }
    ViewState::Idle | ViewState::Loading => Err(anyhow!("Submission did not complete")),
  }
}

/// List every registered preset with its weights
pub fn list_presets(presets: &PresetRegistry, format: OutputFormat) -> Result<()> {
  let default_name = presets.default_preset().name();

  match format {
    OutputFormat::Pretty => {
      for preset in presets.iter() {
        println!("{}", format_preset(preset, preset.name() == default_name));
      }
    }
    OutputFormat::Json => {
      let table: serde_json::Map<String, serde_json::Value> = presets
        .iter()
        .map(|p| serde_json::to_value(p.weights()).map(|w| (p.name().to_string(), w)))
        .collect::<Result<_, _>>()
        .context("Failed to encode presets")?;

      let out = serde_json::json!({ "default": default_name, "presets": table });
      println!("{}", serde_json::to_string_pretty(&out)?);
    }
  }

  Ok(())
}

/// Check that the recommendation service is reachable
pub async fn status(client: &HttpScoringClient) -> Result<()> {
  let base_url = &client.config().base_url;

  match client.health_check().await {
    Ok(health) => {
      println!("{} {} is {}", "✓".green(), base_url.cyan(), health.status.green());
      if let Some(message) = health.message {
        println!("   {}", message.dimmed());
      }
      Ok(())
    }
    Err(e) => {
      println!("{} {} is unreachable: {}", "✗".red(), base_url.cyan(), e);
      Err(e).with_context(|| format!("Health check against {base_url} failed"))
    }
  }
}
