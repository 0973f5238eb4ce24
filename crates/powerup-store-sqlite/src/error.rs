//! Error type for `powerup-store-sqlite`.

use std::{fmt, io, path::PathBuf};

use powerup_core::accessory::{AccessoryId, AccessoryType};
use thiserror::Error;

/// A keyed row an operation needed but could not find or update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Record {
  Avatar,
  Score,
  Accessory { kind: AccessoryType, id: AccessoryId },
}

impl fmt::Display for Record {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Avatar => f.write_str("avatar"),
      Self::Score => f.write_str("score"),
      Self::Accessory { kind, id } => write!(f, "{kind} accessory {id}"),
    }
  }
}

/// Coarse classification of an [`Error`], for callers that only care which
/// step of the store contract failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
  /// Seeding or opening the store failed; retry `initialize`/`reset`.
  Init,
  /// The store was used while closed.
  NotOpen,
  /// A read failed or returned malformed rows.
  Query,
  /// A requested row does not exist.
  NotFound,
  /// A write failed or matched no row.
  Update,
}

#[derive(Debug, Error)]
pub enum Error {
  #[error("config error: {0}")]
  Config(#[from] config::ConfigError),

  #[error("template store not found at {0:?}")]
  TemplateMissing(PathBuf),

  #[error("failed to seed {path:?} from template: {source}")]
  Seed {
    path:   PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("failed to open store at {path:?}: {source}")]
  Open {
    path:   PathBuf,
    #[source]
    source: rusqlite::Error,
  },

  #[error("{path:?} is not a store of schema version {expected} (found {found})")]
  SchemaVersion {
    path:     PathBuf,
    expected: i64,
    found:    i64,
  },

  #[error("refusing to overwrite existing template at {0:?}")]
  TemplateExists(PathBuf),

  #[error("failed to write template at {path:?}: {source}")]
  Template {
    path:   PathBuf,
    #[source]
    source: rusqlite::Error,
  },

  #[error("store is not open")]
  NotOpen,

  #[error("query failed: {0}")]
  Query(#[source] rusqlite::Error),

  #[error("malformed {table} row: {source}")]
  Malformed {
    table:  &'static str,
    #[source]
    source: powerup_core::Error,
  },

  #[error("{0} not found")]
  NotFound(Record),

  #[error("update failed: {0}")]
  Update(#[source] rusqlite::Error),

  #[error("no {0} row to update")]
  NoRowsAffected(Record),

  #[error("avatar references missing {0}")]
  DanglingReference(Record),
}

impl Error {
  pub fn kind(&self) -> ErrorKind {
    match self {
      Self::Config(_)
      | Self::TemplateMissing(_)
      | Self::Seed { .. }
      | Self::Open { .. }
      | Self::SchemaVersion { .. }
      | Self::TemplateExists(_)
      | Self::Template { .. } => ErrorKind::Init,
      Self::NotOpen => ErrorKind::NotOpen,
      Self::Query(_) | Self::Malformed { .. } => ErrorKind::Query,
      Self::NotFound(_) => ErrorKind::NotFound,
      Self::Update(_) | Self::NoRowsAffected(_) | Self::DanglingReference(_) => {
        ErrorKind::Update
      }
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
