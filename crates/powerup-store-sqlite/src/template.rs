//! Writing template store files.
//!
//! A template holds the dialogue tree and the locked accessory catalog, and
//! no avatar or score. The game copies it verbatim on first run and on reset.

use std::path::Path;

use powerup_core::{
  accessory::Accessory,
  dialogue::{Answer, Question},
};
use rusqlite::{Connection, params};

use crate::{Error, Result, schema::SCHEMA};

/// Collects template content and writes it to a new SQLite file.
#[derive(Debug, Clone, Default)]
pub struct TemplateBuilder {
  questions:   Vec<Question>,
  answers:     Vec<Answer>,
  accessories: Vec<Accessory>,
}

impl TemplateBuilder {
  pub fn new() -> Self { Self::default() }

  pub fn question(mut self, question: Question) -> Self {
    self.questions.push(question);
    self
  }

  pub fn answer(mut self, answer: Answer) -> Self {
    self.answers.push(answer);
    self
  }

  /// Add a catalog entry. Templates ship every accessory locked, whatever
  /// `accessory.purchased` says.
  pub fn accessory(mut self, accessory: Accessory) -> Self {
    self.accessories.push(accessory);
    self
  }

  /// Create the template at `path`. Fails if a file already exists there.
  pub fn write(&self, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if path.exists() {
      return Err(Error::TemplateExists(path.to_path_buf()));
    }

    let template_err = |source| Error::Template { path: path.to_path_buf(), source };

    let mut conn = Connection::open(path).map_err(template_err)?;
    conn.execute_batch(SCHEMA).map_err(template_err)?;

    let tx = conn.transaction().map_err(template_err)?;
    for q in &self.questions {
      tx.execute(
        "INSERT INTO Question (QuestionID, ScenarioID, QDescription) VALUES (?1, ?2, ?3)",
        params![q.question_id, q.scenario_id, q.description],
      )
      .map_err(template_err)?;
    }
    for a in &self.answers {
      tx.execute(
        "INSERT INTO Answer (AnswerID, QuestionID, ADescription, NextQID, Points)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
          a.answer_id,
          a.question_id,
          a.description,
          a.next_question.to_string(),
          a.points,
        ],
      )
      .map_err(template_err)?;
    }
    for acc in &self.accessories {
      // Table name comes from the closed AccessoryType enum.
      let sql = format!(
        "INSERT INTO {} (ID, Name, Points, Purchased) VALUES (?1, ?2, ?3, 0)",
        acc.kind.table()
      );
      tx.execute(&sql, params![acc.id, acc.image_name, acc.points])
        .map_err(template_err)?;
    }
    tx.commit().map_err(template_err)?;

    tracing::debug!(
      path = %path.display(),
      questions = self.questions.len(),
      answers = self.answers.len(),
      accessories = self.accessories.len(),
      "wrote template store"
    );
    Ok(())
  }
}
