//! Contact-form state machine: `idle → submitting → success`, or back to
//! `idle` on failure.
//!
//! The form hands out a validated [`NewSubmission`] only from `Idle`, so a
//! pending submission cannot be duplicated and a blank field never reaches
//! the store.

use serde::{Deserialize, Serialize};

use crate::{Error, Result, submission::NewSubmission};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormPhase {
  #[default]
  Idle,
  Submitting,
  Success,
}

/// Local state of one contact form.
#[derive(Debug, Clone, Default)]
pub struct ContactForm {
  pub full_name: String,
  pub email:     String,
  pub message:   String,
  phase:         FormPhase,
  /// User-visible message from the last failed attempt.
  last_error:    Option<String>,
}

impl ContactForm {
  pub fn new(
    full_name: impl Into<String>,
    email: impl Into<String>,
    message: impl Into<String>,
  ) -> Self {
    Self {
      full_name: full_name.into(),
      email: email.into(),
      message: message.into(),
      ..Self::default()
    }
  }

  pub fn phase(&self) -> FormPhase { self.phase }

  pub fn last_error(&self) -> Option<&str> { self.last_error.as_deref() }

  /// The submit control is enabled only while idle.
  pub fn can_submit(&self) -> bool { self.phase == FormPhase::Idle }

  /// Validate and move to `Submitting`, returning the insert input.
  ///
  /// Validation failures leave the form idle with the message recorded.
  pub fn begin_submit(&mut self) -> Result<NewSubmission> {
    match self.phase {
      FormPhase::Submitting => return Err(Error::SubmitInFlight),
      FormPhase::Success => return Err(Error::AlreadySubmitted),
      FormPhase::Idle => {}
    }

    let input = NewSubmission {
      full_name: self.full_name.clone(),
      email:     self.email.clone(),
      message:   self.message.clone(),
    };
    if let Err(e) = input.validate() {
      self.last_error = Some(e.to_string());
      return Err(e);
    }

    self.last_error = None;
    self.phase = FormPhase::Submitting;
    Ok(input)
  }

  /// Record the outcome of the store call started by
  /// [`begin_submit`](Self::begin_submit). A failure returns the form to
  /// `Idle` with the typed fields intact; there is no automatic retry.
  pub fn finish_submit<E: std::fmt::Display>(
    &mut self,
    outcome: Result<(), E>,
  ) {
    if self.phase != FormPhase::Submitting {
      return;
    }
    match outcome {
      Ok(()) => self.phase = FormPhase::Success,
      Err(e) => {
        self.last_error = Some(e.to_string());
        self.phase = FormPhase::Idle;
      }
    }
  }

  /// Clear the fields and start over.
  pub fn reset(&mut self) { *self = Self::default(); }
}
