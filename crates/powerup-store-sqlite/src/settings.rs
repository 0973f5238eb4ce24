//! Where the template and the writable store live.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::Result;

pub const DEFAULT_FILE_NAME: &str = "mainDatabase.sqlite";

/// File locations for a [`crate::SqliteStore`].
///
/// Loadable from TOML:
///
/// ```toml
/// data_dir      = "/home/player/.local/share/powerup"
/// template_path = "/usr/share/powerup/mainDatabase.sqlite"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StoreConfig {
  /// Private per-user directory holding the writable store.
  pub data_dir:      PathBuf,
  /// Read-only template shipped with the game.
  pub template_path: PathBuf,
  #[serde(default = "default_file_name")]
  pub file_name:     String,
}

fn default_file_name() -> String { DEFAULT_FILE_NAME.to_owned() }

impl StoreConfig {
  pub fn new(data_dir: impl Into<PathBuf>, template_path: impl Into<PathBuf>) -> Self {
    Self {
      data_dir:      data_dir.into(),
      template_path: template_path.into(),
      file_name:     default_file_name(),
    }
  }

  /// Read the configuration from a TOML file.
  pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
    let settings = config::Config::builder()
      .add_source(config::File::from(path.as_ref()).format(config::FileFormat::Toml))
      .build()?;
    Ok(settings.try_deserialize()?)
  }

  /// Full path of the writable store file.
  pub fn store_path(&self) -> PathBuf { self.data_dir.join(&self.file_name) }
}
