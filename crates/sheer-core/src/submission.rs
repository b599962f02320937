//! A submission is one visitor-submitted contact/lead record.
//!
//! A submission is created exactly once from a contact form and afterwards
//! only its `status` and `notes` change, and only by an admin.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Status ──────────────────────────────────────────────────────────────────

/// The lifecycle tag of a submission.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Default,
  Serialize,
  Deserialize,
  Display,
  EnumIter,
  EnumString,
  IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Status {
  #[default]
  New,
  Contacted,
  Converted,
  Archived,
}

impl Status {
  /// The lowercase wire and column form, e.g. `"contacted"`.
  pub fn as_str(self) -> &'static str { self.into() }

  /// Parse the wire form. Any string outside the four statuses is rejected.
  pub fn parse(s: &str) -> Result<Self> {
    s.parse().map_err(|_| Error::UnknownStatus(s.to_owned()))
  }
}

// ─── Submission ──────────────────────────────────────────────────────────────

/// A persisted lead. `id` and `created_at` are assigned by the store and
/// never change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
  pub id:         Uuid,
  pub created_at: DateTime<Utc>,
  pub full_name:  String,
  pub email:      String,
  pub message:    String,
  pub status:     Status,
  /// Admin-authored free text; absent until first edit.
  pub notes:      Option<String>,
}

// ─── NewSubmission ───────────────────────────────────────────────────────────

/// A required contact-form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Field {
  #[strum(serialize = "full name")]
  FullName,
  #[strum(serialize = "email")]
  Email,
  #[strum(serialize = "message")]
  Message,
}

/// Input to [`crate::store::SubmissionStore::insert`].
///
/// `id`, `created_at` and `status` are always set by the store. No format
/// checks are applied to `email` beyond it being present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSubmission {
  pub full_name: String,
  pub email:     String,
  pub message:   String,
}

impl NewSubmission {
  /// Build and validate an insert input.
  pub fn new(
    full_name: impl Into<String>,
    email: impl Into<String>,
    message: impl Into<String>,
  ) -> Result<Self> {
    let input = Self {
      full_name: full_name.into(),
      email:     email.into(),
      message:   message.into(),
    };
    input.validate()?;
    Ok(input)
  }

  /// Every field must contain something other than whitespace. Reports the
  /// first missing field in form order.
  pub fn validate(&self) -> Result<()> {
    let fields = [
      (Field::FullName, &self.full_name),
      (Field::Email, &self.email),
      (Field::Message, &self.message),
    ];
    match fields.into_iter().find(|(_, v)| v.trim().is_empty()) {
      Some((field, _)) => Err(Error::MissingField(field)),
      None => Ok(()),
    }
  }
}

#[cfg(test)]
mod tests {
  use strum::IntoEnumIterator as _;

  use super::*;

  #[test]
  fn status_round_trips_through_wire_form() {
    for status in Status::iter() {
      assert_eq!(Status::parse(status.as_str()).unwrap(), status);
      let json = serde_json::to_string(&status).unwrap();
      assert_eq!(json, format!("\"{}\"", status.as_str()));
    }
  }

  #[test]
  fn unknown_status_is_rejected() {
    assert!(matches!(
      Status::parse("pending"),
      Err(Error::UnknownStatus(s)) if s == "pending"
    ));
    assert!(Status::parse("New").is_err());
    assert!(serde_json::from_str::<Status>("\"deleted\"").is_err());
  }

  #[test]
  fn default_status_is_new() {
    assert_eq!(Status::default(), Status::New);
  }

  #[test]
  fn new_submission_requires_every_field() {
    assert!(NewSubmission::new("Jane Doe", "jane@x.com", "Interested").is_ok());

    assert!(matches!(
      NewSubmission::new("", "jane@x.com", "Interested"),
      Err(Error::MissingField(Field::FullName))
    ));
    assert!(matches!(
      NewSubmission::new("Jane Doe", "  ", "Interested"),
      Err(Error::MissingField(Field::Email))
    ));
    assert!(matches!(
      NewSubmission::new("Jane Doe", "jane@x.com", "\n"),
      Err(Error::MissingField(Field::Message))
    ));
  }

  #[test]
  fn email_format_is_not_enforced() {
    assert!(NewSubmission::new("Jane", "not-an-email", "hi").is_ok());
  }

  #[test]
  fn missing_field_message_names_the_field() {
    let err = NewSubmission::new("", "a@b.c", "hi").unwrap_err();
    assert_eq!(err.to_string(), "full name is required");
  }
}
