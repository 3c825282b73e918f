//! Error taxonomy for drivefit
//!
//! Validation failures are caught before any network call, transport failures
//! end a submission, and preset errors are configuration problems surfaced at
//! startup.

use thiserror::Error;

/// Constraint field names as they appear to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
  Budget,
  Location,
  AnnualDistance,
  Passengers,
  FuelType,
}

impl Field {
  pub fn name(&self) -> &'static str {
    match self {
      Field::Budget => "budget",
      Field::Location => "location",
      Field::AnnualDistance => "annual_distance",
      Field::Passengers => "passengers",
      Field::FuelType => "fuel_type",
    }
  }
}

impl std::fmt::Display for Field {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.name())
  }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
  #[error("{field}: a value is required")]
  Missing { field: Field },

  #[error("{field}: '{value}' is not a number")]
  NotANumber { field: Field, value: String },

  #[error("{field}: '{value}' is not a whole number")]
  NotAnInteger { field: Field, value: String },

  #[error("{field}: {value} {requirement}")]
  OutOfRange { field: Field, value: String, requirement: &'static str },

  #[error("{field}: must be at least {min} characters")]
  TooShort { field: Field, min: usize },

  #[error("fuel_type: unknown fuel type '{value}' (expected gas, diesel, hybrid or ev)")]
  UnknownFuelType { value: String },
}

impl ValidationError {
  pub fn missing(field: Field) -> Self {
    Self::Missing { field }
  }

  pub fn not_a_number(field: Field, value: impl Into<String>) -> Self {
    Self::NotANumber { field, value: value.into() }
  }

  pub fn not_an_integer(field: Field, value: impl Into<String>) -> Self {
    Self::NotAnInteger { field, value: value.into() }
  }

  pub fn out_of_range(field: Field, value: impl Into<String>, requirement: &'static str) -> Self {
    Self::OutOfRange { field, value: value.into(), requirement }
  }

  pub fn too_short(field: Field, min: usize) -> Self {
    Self::TooShort { field, min }
  }

  pub fn unknown_fuel_type(value: impl Into<String>) -> Self {
    Self::UnknownFuelType { value: value.into() }
  }

  /// The field this error should be shown next to
  pub fn field(&self) -> Field {
    match self {
      Self::Missing { field }
      | Self::NotANumber { field, .. }
      | Self::NotAnInteger { field, .. }
      | Self::OutOfRange { field, .. }
      | Self::TooShort { field, .. } => *field,
      Self::UnknownFuelType { .. } => Field::FuelType,
    }
  }
}

/// Every validation failure found in one submission
#[derive(Error, Debug, Clone, PartialEq)]
#[error("invalid constraints: {}", .errors.iter().map(|e| e.to_string()).collect::<Vec<_>>().join("; "))]
pub struct InvalidConstraints {
  pub errors: Vec<ValidationError>,
}

impl InvalidConstraints {
  pub fn for_field(&self, field: Field) -> impl Iterator<Item = &ValidationError> {
    self.errors.iter().filter(move |e| e.field() == field)
  }
}

#[derive(Error, Debug)]
pub enum TransportError {
  #[error("Request failed: {message}")]
  Request { message: String },

  #[error("Request timed out after {secs}s")]
  Timeout { secs: u64 },

  #[error("Request failed: {status}")]
  Status { status: u16, body: String },

  #[error("Could not read service response: {message}")]
  Decode { message: String },
}

impl TransportError {
  pub fn request(message: impl Into<String>) -> Self {
    Self::Request { message: message.into() }
  }

  pub fn status(status: u16, body: impl Into<String>) -> Self {
    Self::Status { status, body: body.into() }
  }

  pub fn decode(message: impl Into<String>) -> Self {
    Self::Decode { message: message.into() }
  }
}

#[derive(Error, Debug)]
pub enum PresetError {
  #[error("Preset table is empty")]
  EmptyTable,

  #[error("Preset name must not be empty")]
  EmptyName,

  #[error("Preset '{name}' is defined more than once")]
  DuplicateName { name: String },

  #[error("Preset '{preset}' is missing category '{category}'")]
  MissingCategory { preset: String, category: &'static str },

  #[error("Preset '{preset}' has unknown category '{key}'")]
  UnknownCategory { preset: String, key: String },

  #[error("Preset '{preset}' has invalid weight {weight} for '{category}' (must be finite and >= 0)")]
  InvalidWeight { preset: String, category: &'static str, weight: f64 },

  #[error("Default preset '{name}' is not registered")]
  UnknownDefault { name: String },

  #[error("Unsupported preset table version {version} (expected {expected})")]
  UnsupportedVersion { version: u32, expected: u32 },

  #[error("Failed to read preset file {path}: {message}")]
  Read { path: String, message: String },

  #[error("Failed to parse preset file {path}: {message}")]
  Parse { path: String, message: String },
}

impl PresetError {
  pub fn duplicate_name(name: impl Into<String>) -> Self {
    Self::DuplicateName { name: name.into() }
  }

  pub fn missing_category(preset: impl Into<String>, category: &'static str) -> Self {
    Self::MissingCategory { preset: preset.into(), category }
  }

  pub fn unknown_category(preset: impl Into<String>, key: impl Into<String>) -> Self {
    Self::UnknownCategory { preset: preset.into(), key: key.into() }
  }

  pub fn invalid_weight(preset: impl Into<String>, category: &'static str, weight: f64) -> Self {
    Self::InvalidWeight { preset: preset.into(), category, weight }
  }

  pub fn unknown_default(name: impl Into<String>) -> Self {
    Self::UnknownDefault { name: name.into() }
  }
}
