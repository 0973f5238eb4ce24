//! SQLite backend for the Powerup game store.
//!
//! The writable database is a byte-for-byte copy of a packaged template.
//! [`SqliteStore`] seeds it on first run, replaces it on reset, and exposes
//! typed access to the dialogue tree, accessory catalog, avatar and score.

mod encode;
mod schema;
mod store;

pub mod error;
pub mod settings;
pub mod template;

pub use error::{Error, ErrorKind, Record, Result};
pub use settings::StoreConfig;
pub use store::SqliteStore;
pub use template::TemplateBuilder;
