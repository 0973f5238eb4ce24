//! Error types for `powerup-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("invalid next-question value: {0:?}")]
  InvalidNextQuestion(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
