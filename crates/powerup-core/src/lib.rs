//! Core types and trait definitions for the Powerup game store.
//!
//! This crate is deliberately free of database dependencies. The dialogue
//! engine and avatar UI depend on it; storage backends implement
//! [`store::GameStore`].

pub mod accessory;
pub mod avatar;
pub mod dialogue;
pub mod error;
pub mod score;
pub mod store;

pub use error::{Error, Result};
