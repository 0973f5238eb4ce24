//! Dialogue tree types: scenarios, questions and answers.
//!
//! The tree is shipped with the template store and is never written by the
//! application. A scenario is not a record of its own; it is only the integer
//! key questions are grouped by.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

pub type ScenarioId = i64;
pub type QuestionId = i64;
pub type AnswerId = i64;

/// On-disk marker for an answer that ends its scenario.
pub const END_OF_SCENARIO: &str = "END";

// ─── Question ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
  pub question_id: QuestionId,
  pub scenario_id: ScenarioId,
  pub description: String,
}

// ─── Answer ──────────────────────────────────────────────────────────────────

/// Where the dialogue goes after an answer is picked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum NextQuestion {
  Question(QuestionId),
  EndOfScenario,
}

impl FromStr for NextQuestion {
  type Err = Error;

  /// Parses the stored text: a decimal question id or [`END_OF_SCENARIO`].
  /// Surrounding whitespace is ignored; anything else is rejected.
  fn from_str(s: &str) -> Result<Self> {
    let trimmed = s.trim();
    if trimmed.eq_ignore_ascii_case(END_OF_SCENARIO) {
      return Ok(Self::EndOfScenario);
    }
    trimmed
      .parse::<QuestionId>()
      .map(Self::Question)
      .map_err(|_| Error::InvalidNextQuestion(s.to_owned()))
  }
}

impl fmt::Display for NextQuestion {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Question(id) => write!(f, "{id}"),
      Self::EndOfScenario => f.write_str(END_OF_SCENARIO),
    }
  }
}

/// A choice offered for a question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
  /// Unique within `question_id`; lists of answers are ordered by it.
  pub answer_id:     AnswerId,
  pub question_id:   QuestionId,
  pub description:   String,
  pub next_question: NextQuestion,
  /// Karma delta awarded when the answer is chosen. May be negative.
  pub points:        i64,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parses_numeric_next_question() {
    assert_eq!("2".parse::<NextQuestion>().unwrap(), NextQuestion::Question(2));
    assert_eq!(" 17 ".parse::<NextQuestion>().unwrap(), NextQuestion::Question(17));
  }

  #[test]
  fn parses_end_marker() {
    assert_eq!("END".parse::<NextQuestion>().unwrap(), NextQuestion::EndOfScenario);
    assert_eq!("end".parse::<NextQuestion>().unwrap(), NextQuestion::EndOfScenario);
  }

  #[test]
  fn rejects_garbage() {
    let err = "two".parse::<NextQuestion>().unwrap_err();
    assert!(matches!(err, Error::InvalidNextQuestion(ref s) if s == "two"));
    assert!("".parse::<NextQuestion>().is_err());
  }

  #[test]
  fn display_matches_stored_form() {
    assert_eq!(NextQuestion::Question(4).to_string(), "4");
    assert_eq!(NextQuestion::EndOfScenario.to_string(), "END");
  }

  #[test]
  fn serializes_as_tagged_value() {
    let json = serde_json::to_value(NextQuestion::Question(3)).unwrap();
    assert_eq!(json, serde_json::json!({ "kind": "question", "value": 3 }));

    let json = serde_json::to_value(NextQuestion::EndOfScenario).unwrap();
    assert_eq!(json, serde_json::json!({ "kind": "end_of_scenario" }));
  }
}
