//! drivefit - weighted vehicle recommendations from the command line
//!
//! Turns a named preference preset and a handful of hard constraints into a
//! query for a remote recommendation service, then renders the ranked results.

pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod logging;
pub mod presets;
pub mod query;
pub mod render;
pub mod session;
pub mod types;

pub use client::{HttpScoringClient, ScoringService};
pub use error::{Field, InvalidConstraints, PresetError, TransportError, ValidationError};
pub use presets::{Category, Preset, PresetRegistry, PresetTable, WeightVector};
pub use query::{ConstraintInput, Constraints, FuelType, PreferenceQuery, RequestBuilder};
pub use render::{render, CandidateSummary, DataSource, ResultsBody, ResultsView};
pub use session::{SubmissionSession, ViewState};
pub use types::{RecommendResponse, ScoredCandidate};
