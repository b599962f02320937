//! Error types for `sheer-core`.

use thiserror::Error;

use crate::submission::Field;

#[derive(Debug, Error)]
pub enum Error {
  #[error("{0} is required")]
  MissingField(Field),

  #[error("unknown status: {0:?}")]
  UnknownStatus(String),

  #[error("a submission is already in progress")]
  SubmitInFlight,

  #[error("this form has already been submitted")]
  AlreadySubmitted,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
