//! Decoding helpers between SQLite rows and domain types.
//!
//! Column reads happen inside rusqlite's row callbacks and only collect raw
//! values; turning those into domain types (which can fail on malformed
//! template data) happens afterwards, outside the statement borrow.

use powerup_core::{
  accessory::{Accessory, AccessoryId, AccessoryType},
  avatar::Avatar,
  dialogue::{Answer, NextQuestion, Question},
  score::Score,
};
use rusqlite::{Row, types::ValueRef};

use crate::{Error, Result};

// ─── Column lists ────────────────────────────────────────────────────────────

pub const QUESTION_COLUMNS: &str = "QuestionID, ScenarioID, QDescription";

pub const ANSWER_COLUMNS: &str =
  "AnswerID, QuestionID, ADescription, NextQID, Points";

pub const ACCESSORY_COLUMNS: &str = "ID, Name, Points, Purchased";

pub const AVATAR_COLUMNS: &str =
  "Face, Clothes, Hair, Eyes, Necklace, Glasses, Handbag, Hat";

pub const SCORE_COLUMNS: &str =
  "Points, Strength, Invisibility, Healing, Telepathy";

// ─── Question ────────────────────────────────────────────────────────────────

pub fn question_from_row(row: &Row<'_>) -> rusqlite::Result<Question> {
  Ok(Question {
    question_id: row.get(0)?,
    scenario_id: row.get(1)?,
    description: row.get(2)?,
  })
}

// ─── Answer ──────────────────────────────────────────────────────────────────

/// An `Answer` row whose `NextQID` value has not been interpreted yet.
pub struct RawAnswer {
  pub answer_id:     i64,
  pub question_id:   i64,
  pub description:   String,
  pub next_question: String,
  pub points:        i64,
}

impl RawAnswer {
  pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      answer_id:     row.get(0)?,
      question_id:   row.get(1)?,
      description:   row.get(2)?,
      next_question: next_question_text(row, 3)?,
      points:        row.get(4)?,
    })
  }

  pub fn into_answer(self) -> Result<Answer> {
    let next_question = self
      .next_question
      .parse::<NextQuestion>()
      .map_err(|source| Error::Malformed { table: "Answer", source })?;

    Ok(Answer {
      answer_id: self.answer_id,
      question_id: self.question_id,
      description: self.description,
      next_question,
      points: self.points,
    })
  }
}

/// `NextQID` as text. A column without TEXT affinity keeps numeric ids as
/// integers, so those are accepted too.
fn next_question_text(row: &Row<'_>, idx: usize) -> rusqlite::Result<String> {
  match row.get_ref(idx)? {
    ValueRef::Text(text) => std::str::from_utf8(text)
      .map(str::to_owned)
      .map_err(rusqlite::Error::Utf8Error),
    ValueRef::Integer(id) => Ok(id.to_string()),
    other => Err(rusqlite::Error::InvalidColumnType(
      idx,
      "NextQID".to_owned(),
      other.data_type(),
    )),
  }
}

// ─── Accessory ───────────────────────────────────────────────────────────────

pub fn accessory_from_row(
  kind: AccessoryType,
  row: &Row<'_>,
) -> rusqlite::Result<Accessory> {
  Ok(Accessory {
    kind,
    id: row.get(0)?,
    image_name: row.get(1)?,
    points: row.get(2)?,
    purchased: row.get(3)?,
  })
}

// ─── Avatar ──────────────────────────────────────────────────────────────────

/// Accessory ids read from the `Avatar` row, before resolution against the
/// catalog tables.
pub struct RawAvatar {
  pub face:     AccessoryId,
  pub clothes:  AccessoryId,
  pub hair:     AccessoryId,
  pub eyes:     AccessoryId,
  pub necklace: Option<AccessoryId>,
  pub glasses:  Option<AccessoryId>,
  pub handbag:  Option<AccessoryId>,
  pub hat:      Option<AccessoryId>,
}

impl RawAvatar {
  pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      face:     row.get(0)?,
      clothes:  row.get(1)?,
      hair:     row.get(2)?,
      eyes:     row.get(3)?,
      necklace: row.get(4)?,
      glasses:  row.get(5)?,
      handbag:  row.get(6)?,
      hat:      row.get(7)?,
    })
  }

  /// Build the avatar, looking each stored id up with `resolve`.
  pub fn into_avatar<F>(self, mut resolve: F) -> Result<Avatar>
  where
    F: FnMut(AccessoryType, AccessoryId) -> Result<Accessory>,
  {
    let mut optional = |kind, id: Option<AccessoryId>| {
      id.map(|id| resolve(kind, id)).transpose()
    };

    let necklace = optional(AccessoryType::Necklace, self.necklace)?;
    let glasses = optional(AccessoryType::Glasses, self.glasses)?;
    let handbag = optional(AccessoryType::Handbag, self.handbag)?;
    let hat = optional(AccessoryType::Hat, self.hat)?;

    Ok(Avatar {
      face: resolve(AccessoryType::Face, self.face)?,
      clothes: resolve(AccessoryType::Clothes, self.clothes)?,
      hair: resolve(AccessoryType::Hair, self.hair)?,
      eyes: resolve(AccessoryType::Eyes, self.eyes)?,
      necklace,
      glasses,
      handbag,
      hat,
    })
  }
}

// ─── Score ───────────────────────────────────────────────────────────────────

pub fn score_from_row(row: &Row<'_>) -> rusqlite::Result<Score> {
  Ok(Score {
    karma_points: row.get(0)?,
    strength:     row.get(1)?,
    invisibility: row.get(2)?,
    healing:      row.get(3)?,
    telepathy:    row.get(4)?,
  })
}
