//! Outbound preference query construction
//!
//! Raw user input is validated into typed constraints and merged with a resolved
//! weight vector. The weights are attached exactly as resolved.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::{Field, InvalidConstraints, ValidationError};
use crate::presets::{PresetRegistry, WeightVector};

const MIN_LOCATION_LEN: usize = 2;

/// Fuel types as normalized by the recommendation service's catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FuelType {
  Gas,
  Diesel,
  Hybrid,
  Ev,
}

impl FuelType {
  pub fn as_str(&self) -> &'static str {
    match self {
      FuelType::Gas => "gas",
      FuelType::Diesel => "diesel",
      FuelType::Hybrid => "hybrid",
      FuelType::Ev => "ev",
    }
  }
}

impl FromStr for FuelType {
  type Err = ValidationError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_lowercase().as_str() {
      "gas" | "gasoline" | "petrol" => Ok(FuelType::Gas),
      "diesel" => Ok(FuelType::Diesel),
      "hybrid" => Ok(FuelType::Hybrid),
      "ev" | "electric" => Ok(FuelType::Ev),
      _ => Err(ValidationError::unknown_fuel_type(s.trim())),
    }
  }
}

impl std::fmt::Display for FuelType {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Constraints as entered by the user, before validation
#[derive(Debug, Clone, Default)]
pub struct ConstraintInput {
  pub budget: String,
  pub location: String,
  pub annual_distance: String,
  pub passengers: String,
  /// `None` or blank means no fuel-type filter
  pub fuel_type: Option<String>,
}

/// Validated hard constraints
#[derive(Debug, Clone, PartialEq)]
pub struct Constraints {
  pub budget: f64,
  pub location: String,
  pub annual_distance: f64,
  pub passengers: u32,
  pub fuel_type: Option<FuelType>,
}

impl Constraints {
  /// Validate every field, collecting all failures rather than stopping at the first
  pub fn parse(input: &ConstraintInput) -> Result<Self, InvalidConstraints> {
    let mut errors = Vec::new();

    let budget = positive_number(Field::Budget, &input.budget).map_err(|e| errors.push(e)).ok();
    let location = location(&input.location).map_err(|e| errors.push(e)).ok();
    let annual_distance = positive_number(Field::AnnualDistance, &input.annual_distance)
      .map_err(|e| errors.push(e))
      .ok();
    let passengers = passengers(&input.passengers).map_err(|e| errors.push(e)).ok();
    let fuel_type = fuel_type(input.fuel_type.as_deref()).map_err(|e| errors.push(e)).ok();

    match (budget, location, annual_distance, passengers, fuel_type) {
      (Some(budget), Some(location), Some(annual_distance), Some(passengers), Some(fuel_type))
        if errors.is_empty() =>
      {
        Ok(Self { budget, location, annual_distance, passengers, fuel_type })
      }
      _ => Err(InvalidConstraints { errors }),
    }
  }
}

fn number(field: Field, raw: &str) -> Result<f64, ValidationError> {
  let trimmed = raw.trim();
  if trimmed.is_empty() {
    return Err(ValidationError::missing(field));
  }

  let value: f64 = strip_grouping(trimmed)
    .and_then(|digits| digits.parse().ok())
    .ok_or_else(|| ValidationError::not_a_number(field, trimmed))?;

  if !value.is_finite() {
    return Err(ValidationError::not_a_number(field, trimmed));
  }

  Ok(value)
}

/// Remove thousands separators from the integer part. Commas are only valid as
/// a 1-3 digit leading group followed by exact 3-digit groups.
fn strip_grouping(raw: &str) -> Option<String> {
  if !raw.contains(',') {
    return Some(raw.to_string());
  }

  let (sign, unsigned) = match raw.strip_prefix(['-', '+']) {
    Some(rest) => raw.split_at(raw.len() - rest.len()),
    None => ("", raw),
  };
  let (integer, fraction) = unsigned.split_at(unsigned.find('.').unwrap_or(unsigned.len()));
  if fraction.contains(',') {
    return None;
  }

  let mut groups = integer.split(',');
  let leading = groups.next()?;
  let all_digits = |group: &str| group.bytes().all(|b| b.is_ascii_digit());
  if !(1..=3).contains(&leading.len()) || !all_digits(leading) {
    return None;
  }
  if !groups.all(|group| group.len() == 3 && all_digits(group)) {
    return None;
  }

  Some(format!("{sign}{}{fraction}", integer.replace(',', "")))
}

fn positive_number(field: Field, raw: &str) -> Result<f64, ValidationError> {
  let value = number(field, raw)?;
  if value <= 0.0 {
    return Err(ValidationError::out_of_range(field, raw.trim(), "must be greater than 0"));
  }
  Ok(value)
}

fn location(raw: &str) -> Result<String, ValidationError> {
  let trimmed = raw.trim();
  if trimmed.is_empty() {
    return Err(ValidationError::missing(Field::Location));
  }
  if trimmed.chars().count() < MIN_LOCATION_LEN {
    return Err(ValidationError::too_short(Field::Location, MIN_LOCATION_LEN));
  }
  Ok(trimmed.to_string())
}

fn passengers(raw: &str) -> Result<u32, ValidationError> {
  let value = number(Field::Passengers, raw)?;
  let trimmed = raw.trim();

  if value.fract() != 0.0 {
    return Err(ValidationError::not_an_integer(Field::Passengers, trimmed));
  }
  if value < 1.0 {
    return Err(ValidationError::out_of_range(Field::Passengers, trimmed, "must be at least 1"));
  }
  if value > u32::MAX as f64 {
    return Err(ValidationError::out_of_range(Field::Passengers, trimmed, "is too large"));
  }

  Ok(value as u32)
}

fn fuel_type(raw: Option<&str>) -> Result<Option<FuelType>, ValidationError> {
  match raw.map(str::trim) {
    None | Some("") => Ok(None),
    Some(value) => value.parse().map(Some),
  }
}

/// The single object sent to the recommendation service for one submission
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PreferenceQuery {
  pub budget: f64,
  pub location: String,
  pub annual_distance: f64,
  pub passengers: u32,
  pub fuel_type: Option<FuelType>,
  pub weights: WeightVector,
}

/// Assembles preference queries against an injected preset registry
pub struct RequestBuilder<'a> {
  presets: &'a PresetRegistry,
}

impl<'a> RequestBuilder<'a> {
  pub fn new(presets: &'a PresetRegistry) -> Self {
    Self { presets }
  }

  pub fn presets(&self) -> &PresetRegistry {
    self.presets
  }

  /// Merge validated constraints with `weights`, which are attached unchanged
  pub fn build(
    &self,
    input: &ConstraintInput,
    weights: &WeightVector,
  ) -> Result<PreferenceQuery, InvalidConstraints> {
    let constraints = Constraints::parse(input)?;

    Ok(PreferenceQuery {
      budget: constraints.budget,
      location: constraints.location,
      annual_distance: constraints.annual_distance,
      passengers: constraints.passengers,
      fuel_type: constraints.fuel_type,
      weights: weights.clone(),
    })
  }

  /// Resolve `preset` through the registry, then build
  pub fn build_for_preset(
    &self,
    input: &ConstraintInput,
    preset: &str,
  ) -> Result<PreferenceQuery, InvalidConstraints> {
    let resolved = self.presets.resolve_preset(preset);
    tracing::debug!(requested = preset, resolved = resolved.name(), "resolved preset");
    self.build(input, resolved.weights())
  }
}
