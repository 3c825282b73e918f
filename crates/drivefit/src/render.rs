//! Projection of service responses into display records
//!
//! Rank order is whatever the service returned. Absent optional values stay
//! absent and are shown with [`NOT_AVAILABLE`], never as zero.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::presets::Category;
use crate::types::{RecommendResponse, ScoredCandidate};

pub const NOT_AVAILABLE: &str = "n/a";

/// Where the ranked data came from; the two states never combine
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DataSource {
  Fallback,
  Catalog { last_updated: Option<String> },
}

impl DataSource {
  pub fn status_line(&self) -> String {
    match self {
      DataSource::Fallback => "Using mock/seed data".to_string(),
      DataSource::Catalog { last_updated: Some(ts) } => {
        format!("Catalog updated: {}", format_timestamp(ts))
      }
      DataSource::Catalog { last_updated: None } => "Catalog updated: unknown".to_string(),
    }
  }
}

fn format_timestamp(raw: &str) -> String {
  if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
    return dt.with_timezone(&Utc).format("%Y-%m-%d %H:%M UTC").to_string();
  }
  if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
    return naive.format("%Y-%m-%d %H:%M").to_string();
  }
  raw.to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SafetyRecord {
  pub complaints: u32,
  pub recalls: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CategoryPoints {
  pub category: Category,
  pub points: Option<f64>,
}

/// Display-ready summary of one ranked candidate
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandidateSummary {
  pub rank: usize,
  pub make: String,
  pub model: String,
  pub year: i32,
  pub total_score: f64,
  pub price: Option<f64>,
  pub fuel_type: Option<String>,
  pub drivetrain: Option<String>,
  pub zero_to_sixty: Option<f64>,
  pub safety: Option<SafetyRecord>,
  pub breakdown: Vec<CategoryPoints>,
}

impl CandidateSummary {
  fn from_candidate(rank: usize, candidate: &ScoredCandidate) -> Self {
    let safety = match (candidate.complaints_count, candidate.recalls_count) {
      (Some(complaints), Some(recalls)) => Some(SafetyRecord { complaints, recalls }),
      _ => None,
    };

    Self {
      rank,
      make: candidate.make.clone(),
      model: candidate.model.clone(),
      year: candidate.year,
      total_score: candidate.total_score,
      price: candidate.price.filter(|p| *p > 0.0),
      fuel_type: candidate.fuel_type.clone().filter(|f| !f.trim().is_empty()),
      drivetrain: candidate.drivetrain.clone().filter(|d| !d.trim().is_empty()),
      zero_to_sixty: candidate.zero_to_sixty.filter(|t| *t > 0.0),
      safety,
      breakdown: Category::ALL
        .into_iter()
        .map(|category| CategoryPoints { category, points: candidate.points(category) })
        .collect(),
    }
  }

  pub fn title(&self) -> String {
    format!("{} {} {}", self.make, self.model, self.year)
  }

  pub fn price_label(&self) -> String {
    self.price.map(format_currency).unwrap_or_else(|| NOT_AVAILABLE.to_string())
  }

  pub fn fuel_label(&self) -> String {
    self.fuel_type.clone().unwrap_or_else(|| NOT_AVAILABLE.to_string())
  }

  pub fn zero_to_sixty_label(&self) -> String {
    self.zero_to_sixty.map(|t| format!("{t}s")).unwrap_or_else(|| NOT_AVAILABLE.to_string())
  }

  pub fn safety_label(&self) -> String {
    match self.safety {
      Some(s) => format!("{} complaints, {} recalls", s.complaints, s.recalls),
      None => NOT_AVAILABLE.to_string(),
    }
  }

  pub fn points(&self, category: Category) -> Option<f64> {
    self.breakdown.iter().find(|p| p.category == category).and_then(|p| p.points)
  }

  pub fn points_label(&self, category: Category) -> String {
    self.points(category).map(|p| p.to_string()).unwrap_or_else(|| NOT_AVAILABLE.to_string())
  }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "candidates", rename_all = "snake_case")]
pub enum ResultsBody {
  /// A valid response with no candidates
  Empty,
  Ranked(Vec<CandidateSummary>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultsView {
  pub source: DataSource,
  pub body: ResultsBody,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub weights_used: Option<BTreeMap<String, f64>>,
}

impl ResultsView {
  pub fn candidates(&self) -> &[CandidateSummary] {
    match &self.body {
      ResultsBody::Empty => &[],
      ResultsBody::Ranked(candidates) => candidates,
    }
  }
}

/// Project a service response for display, preserving rank order
pub fn render(response: &RecommendResponse) -> ResultsView {
  let source = if response.using_mock_data {
    DataSource::Fallback
  } else {
    let last_updated =
      response.catalog_last_updated.as_deref().map(str::trim).filter(|ts| !ts.is_empty());
    DataSource::Catalog { last_updated: last_updated.map(str::to_string) }
  };

  let body = if response.results.is_empty() {
    ResultsBody::Empty
  } else {
    ResultsBody::Ranked(
      response
        .results
        .iter()
        .enumerate()
        .map(|(i, candidate)| CandidateSummary::from_candidate(i + 1, candidate))
        .collect(),
    )
  };

  ResultsView { source, body, weights_used: response.weights_used.clone() }
}

/// Whole-dollar USD formatting, e.g. `$19,000`
pub fn format_currency(amount: f64) -> String {
  let rounded = amount.round();
  let sign = if rounded < 0.0 { "-" } else { "" };
  let digits = format!("{:.0}", rounded.abs());

  let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
  for (i, ch) in digits.chars().enumerate() {
    if i > 0 && (digits.len() - i) % 3 == 0 {
      grouped.push(',');
    }
    grouped.push(ch);
  }

  format!("{sign}${grouped}")
}
