//! Submission lifecycle and the results display state
//!
//! Each submission clears the previous view before anything else happens, and
//! only a complete, successful response repopulates it. A generation ticket
//! makes sure a response to an older submission never overwrites a newer one.

use crate::client::ScoringService;
use crate::error::{InvalidConstraints, TransportError};
use crate::query::{ConstraintInput, RequestBuilder};
use crate::render::{render, ResultsView};
use crate::types::RecommendResponse;

#[derive(Debug, Clone, PartialEq)]
pub enum ViewState {
  Idle,
  Loading,
  /// Constraint input was rejected before any request was sent
  Invalid(InvalidConstraints),
  /// The request could not complete
  Failed(String),
  Ready(ResultsView),
}

/// Identifies one submission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

#[derive(Debug)]
pub struct SubmissionSession {
  generation: u64,
  view: ViewState,
}

impl Default for SubmissionSession {
  fn default() -> Self {
    Self::new()
  }
}

impl SubmissionSession {
  pub fn new() -> Self {
    Self { generation: 0, view: ViewState::Idle }
  }

  pub fn view(&self) -> &ViewState {
    &self.view
  }

  /// Start a submission: clear whatever was displayed and issue a new ticket
  pub fn begin(&mut self) -> Ticket {
    self.generation += 1;
    self.view = ViewState::Loading;
    Ticket(self.generation)
  }

  fn is_current(&self, ticket: Ticket) -> bool {
    ticket.0 == self.generation
  }

  /// Apply the outcome of a request; returns false when the ticket is stale
  pub fn complete(
    &mut self,
    ticket: Ticket,
    outcome: Result<RecommendResponse, TransportError>,
  ) -> bool {
    if !self.is_current(ticket) {
      tracing::debug!(ticket = ticket.0, current = self.generation, "discarding stale response");
      return false;
    }

    self.view = match outcome {
      Ok(response) => ViewState::Ready(render(&response)),
      Err(e) => ViewState::Failed(e.to_string()),
    };
    true
  }

  /// Record a validation failure for the submission identified by `ticket`
  pub fn reject(&mut self, ticket: Ticket, errors: InvalidConstraints) -> bool {
    if !self.is_current(ticket) {
      return false;
    }
    self.view = ViewState::Invalid(errors);
    true
  }

  /// Validate, query the service, and update the view
  pub async fn submit<S>(
    &mut self,
    service: &S,
    builder: &RequestBuilder<'_>,
    input: &ConstraintInput,
    preset: &str,
  ) -> &ViewState
  where
    S: ScoringService + ?Sized,
  {
    let ticket = self.begin();

    match builder.build_for_preset(input, preset) {
      Ok(query) => {
        let outcome = service.recommend(&query).await;
        self.complete(ticket, outcome);
      }
      Err(errors) => {
        tracing::debug!(count = errors.errors.len(), "constraints rejected");
        self.reject(ticket, errors);
      }
    }

    &self.view
  }
}
