//! Wire types for the recommendation service responses

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

use crate::presets::Category;

/// Response body of `POST /recommend`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecommendResponse {
  /// Candidates in rank order, as ranked by the service
  #[serde(default)]
  pub results: Vec<ScoredCandidate>,

  /// Whether the service answered from its fallback/seed dataset
  #[serde(default)]
  pub using_mock_data: bool,

  #[serde(default)]
  pub catalog_last_updated: Option<String>,

  /// Weights after the service's own normalization, when it reports them
  #[serde(default)]
  pub weights_used: Option<BTreeMap<String, f64>>,
}

/// One vehicle record scored by the service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredCandidate {
  pub make: String,
  pub model: String,
  pub year: i32,
  pub total_score: f64,

  #[serde(default)]
  pub price: Option<f64>,
  #[serde(default)]
  pub fuel_type: Option<String>,
  #[serde(default)]
  pub drivetrain: Option<String>,
  #[serde(default)]
  pub zero_to_sixty: Option<f64>,
  #[serde(default)]
  pub mpg: Option<f64>,
  #[serde(default)]
  pub l_per_100km: Option<f64>,
  #[serde(default)]
  pub annual_cost: Option<f64>,
  #[serde(default)]
  pub reliability_score: Option<f64>,
  #[serde(default)]
  pub safety_score: Option<f64>,
  #[serde(default)]
  pub complaints_count: Option<u32>,
  #[serde(default)]
  pub recalls_count: Option<u32>,

  /// Per-category points and any other fields the service adds
  #[serde(flatten)]
  pub breakdown: Map<String, Value>,
}

impl ScoredCandidate {
  /// Points for `category`, or `None` when the service did not report them
  pub fn points(&self, category: Category) -> Option<f64> {
    self.breakdown.get(category.points_key()).and_then(Value::as_f64)
  }
}

/// Response body of `GET /`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
  pub status: String,
  #[serde(default)]
  pub message: Option<String>,
}
