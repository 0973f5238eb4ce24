//! The `GameStore` trait.
//!
//! Implemented by storage backends (e.g. `powerup-store-sqlite`). The dialogue
//! engine and UI depend on this abstraction, not on a concrete backend.

use std::collections::BTreeMap;

use crate::{
  accessory::{Accessory, AccessoryId, AccessoryType},
  avatar::Avatar,
  dialogue::{Answer, Question, QuestionId, ScenarioId},
  score::Score,
};

/// Persistent game state for the single player profile.
///
/// All calls are blocking and meant to be issued one at a time by the game's
/// main control flow. Reads return owned copies; nothing handed out aliases
/// store-internal state.
pub trait GameStore {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Lifecycle ─────────────────────────────────────────────────────────

  /// Seed the writable store from the template if it does not exist yet,
  /// then open it.
  fn initialize(&mut self) -> Result<(), Self::Error>;

  /// Whether a live connection is held.
  fn is_initialized(&self) -> bool;

  /// Replace the writable store with a fresh copy of the template and
  /// reopen it. Drops all purchases, the avatar and the score.
  fn reset(&mut self) -> Result<(), Self::Error>;

  /// Release the connection. Closing a closed store does nothing.
  fn close(&mut self);

  // ── Dialogue tree ─────────────────────────────────────────────────────

  /// All questions of a scenario, keyed by question id.
  fn get_questions(
    &self,
    scenario_id: ScenarioId,
  ) -> Result<BTreeMap<QuestionId, Question>, Self::Error>;

  /// Answers of a question, ordered by answer id.
  fn get_answers(&self, question_id: QuestionId) -> Result<Vec<Answer>, Self::Error>;

  // ── Accessory catalog ─────────────────────────────────────────────────

  /// Every accessory of `kind`, ordered by id.
  fn get_accessory_catalog(
    &self,
    kind: AccessoryType,
  ) -> Result<Vec<Accessory>, Self::Error>;

  fn get_accessory(
    &self,
    kind: AccessoryType,
    id: AccessoryId,
  ) -> Result<Accessory, Self::Error>;

  /// Mark an accessory as purchased. Purchasing twice is not an error; cost
  /// accounting is the caller's job.
  fn purchase_accessory(&self, accessory: &Accessory) -> Result<(), Self::Error>;

  // ── Avatar ────────────────────────────────────────────────────────────

  fn get_avatar(&self) -> Result<Avatar, Self::Error>;

  /// Overwrite every slot of the existing avatar. Does not create one.
  fn save_avatar(&self, avatar: &Avatar) -> Result<(), Self::Error>;

  /// Start a new game: reset the store, then create the avatar from the
  /// mandatory slots of `avatar` with a zeroed score.
  fn create_or_reset_avatar(&mut self, avatar: &Avatar) -> Result<(), Self::Error>;

  fn avatar_exists(&self) -> bool;

  // ── Score ─────────────────────────────────────────────────────────────

  fn get_score(&self) -> Result<Score, Self::Error>;

  /// Overwrite the existing score. Does not create one.
  fn save_score(&self, score: &Score) -> Result<(), Self::Error>;
}
