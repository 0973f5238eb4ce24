//! [`SqliteStore`], the SQLite implementation of [`GameStore`].

use std::{
  collections::BTreeMap,
  fs::{self, File, OpenOptions},
  io::{self, ErrorKind as IoErrorKind},
  path::{Path, PathBuf},
};

use powerup_core::{
  accessory::{Accessory, AccessoryId, AccessoryType},
  avatar::{AVATAR_ID, Avatar},
  dialogue::{Answer, Question, QuestionId, ScenarioId},
  score::Score,
  store::GameStore,
};
use rusqlite::{Connection, OpenFlags, OptionalExtension as _, params};

use crate::{
  Error, Record, Result, StoreConfig,
  schema::SCHEMA_VERSION,
  encode::{
    ACCESSORY_COLUMNS, ANSWER_COLUMNS, AVATAR_COLUMNS, QUESTION_COLUMNS, RawAnswer,
    RawAvatar, SCORE_COLUMNS, accessory_from_row, question_from_row,
    score_from_row,
  },
};

/// Files SQLite may leave next to a database.
const SIDECAR_SUFFIXES: [&str; 3] = ["-journal", "-wal", "-shm"];

// ─── Store ───────────────────────────────────────────────────────────────────

/// The game's persistent state, backed by one SQLite file copied from a
/// packaged template.
///
/// Construct one at startup and pass it by reference. The store starts
/// closed; call [`GameStore::initialize`] before anything else. It holds a
/// single `rusqlite::Connection` and is therefore not `Sync`: share it
/// between threads only behind a `Mutex`.
pub struct SqliteStore {
  config: StoreConfig,
  conn:   Option<Connection>,
}

impl SqliteStore {
  /// A closed store for the given file locations.
  pub fn new(config: StoreConfig) -> Self { Self { config, conn: None } }

  /// Construct and initialize in one step.
  pub fn open(config: StoreConfig) -> Result<Self> {
    let mut store = Self::new(config);
    store.initialize()?;
    Ok(store)
  }

  /// Path of the writable store file.
  pub fn path(&self) -> PathBuf { self.config.store_path() }

  fn conn(&self) -> Result<&Connection> { self.conn.as_ref().ok_or(Error::NotOpen) }

  // ── File lifecycle ────────────────────────────────────────────────────

  fn open_template(&self) -> Result<File> {
    let template = &self.config.template_path;
    File::open(template).map_err(|source| {
      if source.kind() == IoErrorKind::NotFound {
        Error::TemplateMissing(template.clone())
      } else {
        Error::Seed { path: template.clone(), source }
      }
    })
  }

  /// Copy the opened `template` to `dest` through a file opened with
  /// `options`.
  ///
  /// Returns `Ok(false)` when `options` demands a new file and `dest`
  /// already exists.
  fn copy_template(
    &self,
    mut template: File,
    dest: &Path,
    options: &OpenOptions,
  ) -> Result<bool> {
    let seed_err = |source| Error::Seed { path: dest.to_path_buf(), source };

    fs::create_dir_all(&self.config.data_dir).map_err(seed_err)?;

    let mut out = match options.open(dest) {
      Ok(file) => file,
      Err(e) if e.kind() == IoErrorKind::AlreadyExists => return Ok(false),
      Err(e) => return Err(seed_err(e)),
    };

    let copied = io::copy(&mut template, &mut out).and_then(|_| out.sync_all());
    if let Err(source) = copied {
      drop(out);
      // A partial copy must not be mistaken for a seeded store next time.
      if let Err(e) = fs::remove_file(dest) {
        tracing::warn!(path = %dest.display(), error = %e, "failed to remove partial store copy");
      }
      return Err(seed_err(source));
    }

    tracing::debug!(
      template = %self.config.template_path.display(),
      path = %dest.display(),
      "copied template store"
    );
    Ok(true)
  }

  /// Seed the writable store unless it already exists.
  fn seed_if_absent(&self, dest: &Path) -> Result<bool> {
    if dest.exists() {
      return Ok(false);
    }
    let template = self.open_template()?;
    self.copy_template(template, dest, OpenOptions::new().write(true).create_new(true))
  }

  /// Best-effort removal of the writable store and its sidecars.
  fn remove_store_files(dest: &Path) {
    let sidecars = SIDECAR_SUFFIXES.iter().map(|suffix| {
      let mut name = dest.as_os_str().to_owned();
      name.push(suffix);
      PathBuf::from(name)
    });

    for file in std::iter::once(dest.to_path_buf()).chain(sidecars) {
      match fs::remove_file(&file) {
        Ok(()) => tracing::debug!(path = %file.display(), "removed store file"),
        Err(e) if e.kind() == IoErrorKind::NotFound => {}
        Err(e) => {
          tracing::warn!(path = %file.display(), error = %e, "failed to remove store file")
        }
      }
    }
  }

  fn open_connection(path: &Path) -> Result<Connection> {
    let open_err = |source| Error::Open { path: path.to_path_buf(), source };

    // No SQLITE_OPEN_CREATE: the file must come from the template.
    let conn = Connection::open_with_flags(
      path,
      OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )
    .map_err(open_err)?;

    conn.execute_batch("PRAGMA foreign_keys = ON;").map_err(open_err)?;

    // Opening is lazy; reading the header makes a corrupt file fail here.
    // An empty or foreign database reads as a different version.
    let found: i64 = conn
      .query_row("PRAGMA user_version", [], |r| r.get(0))
      .map_err(open_err)?;
    if found != SCHEMA_VERSION {
      return Err(Error::SchemaVersion {
        path: path.to_path_buf(),
        expected: SCHEMA_VERSION,
        found,
      });
    }

    Ok(conn)
  }
}

// ─── Row helpers ─────────────────────────────────────────────────────────────

fn fetch_accessory(
  conn: &Connection,
  kind: AccessoryType,
  id: AccessoryId,
) -> Result<Accessory> {
  // Table names come from the closed AccessoryType enum; values are bound.
  let sql = format!("SELECT {ACCESSORY_COLUMNS} FROM {} WHERE ID = ?1", kind.table());
  conn
    .query_row(&sql, params![id], |row| accessory_from_row(kind, row))
    .optional()
    .map_err(Error::Query)?
    .ok_or(Error::NotFound(Record::Accessory { kind, id }))
}

fn avatar_row_exists(conn: &Connection) -> Result<bool> {
  Ok(
    conn
      .query_row("SELECT 1 FROM Avatar WHERE ID = ?1", params![AVATAR_ID], |_| Ok(()))
      .optional()
      .map_err(Error::Query)?
      .is_some(),
  )
}

/// Fail with [`Error::DanglingReference`] unless every filled slot points at
/// an existing catalog row.
fn check_references(
  conn: &Connection,
  slots: impl IntoIterator<Item = (AccessoryType, Option<AccessoryId>)>,
) -> Result<()> {
  for (kind, id) in slots {
    let Some(id) = id else { continue };
    let sql = format!("SELECT 1 FROM {} WHERE ID = ?1", kind.table());
    let found = conn
      .query_row(&sql, params![id], |_| Ok(()))
      .optional()
      .map_err(Error::Update)?;
    if found.is_none() {
      return Err(Error::DanglingReference(Record::Accessory { kind, id }));
    }
  }
  Ok(())
}

fn update_avatar(conn: &Connection, avatar: &Avatar) -> Result<()> {
  check_references(conn, avatar.slot_ids())?;

  let ids = avatar.slot_ids().map(|(_, id)| id);
  let changed = conn
    .execute(
      "UPDATE Avatar
       SET Face = ?1, Clothes = ?2, Hair = ?3, Eyes = ?4,
           Necklace = ?5, Glasses = ?6, Handbag = ?7, Hat = ?8
       WHERE ID = ?9",
      params![ids[0], ids[1], ids[2], ids[3], ids[4], ids[5], ids[6], ids[7], AVATAR_ID],
    )
    .map_err(Error::Update)?;

  if changed == 0 {
    return Err(Error::NoRowsAffected(Record::Avatar));
  }
  Ok(())
}

/// Insert the zeroed score row, replacing any existing one.
fn zero_score(conn: &Connection) -> Result<()> {
  conn
    .execute(
      "INSERT OR REPLACE INTO Score (ID, Strength, Invisibility, Healing, Telepathy, Points)
       VALUES (?1, 0, 0, 0, 0, 0)",
      params![AVATAR_ID],
    )
    .map_err(Error::Update)?;
  Ok(())
}

// ─── GameStore impl ──────────────────────────────────────────────────────────

impl GameStore for SqliteStore {
  type Error = Error;

  // ── Lifecycle ─────────────────────────────────────────────────────────

  fn initialize(&mut self) -> Result<()> {
    self.close();

    let path = self.path();
    if self.seed_if_absent(&path)? {
      tracing::info!(path = %path.display(), "seeded store from template");
    }

    self.conn = Some(Self::open_connection(&path)?);
    tracing::info!(path = %path.display(), "opened store");
    Ok(())
  }

  fn is_initialized(&self) -> bool { self.conn.is_some() }

  fn reset(&mut self) -> Result<()> {
    self.close();

    // Without a template to copy, keep the current store rather than
    // deleting it.
    let template = self.open_template()?;

    let path = self.path();
    Self::remove_store_files(&path);
    self.copy_template(
      template,
      &path,
      OpenOptions::new().write(true).create(true).truncate(true),
    )?;

    self.conn = Some(Self::open_connection(&path)?);
    tracing::info!(path = %path.display(), "reset store to template");
    Ok(())
  }

  fn close(&mut self) {
    let Some(conn) = self.conn.take() else { return };
    match conn.close() {
      Ok(()) => tracing::info!(path = %self.path().display(), "closed store"),
      // The connection is dropped with the error either way.
      Err((_, e)) => tracing::warn!(error = %e, "error while closing store"),
    }
  }

  // ── Dialogue tree ─────────────────────────────────────────────────────

  fn get_questions(
    &self,
    scenario_id: ScenarioId,
  ) -> Result<BTreeMap<QuestionId, Question>> {
    let conn = self.conn()?;
    let mut stmt = conn
      .prepare(&format!(
        "SELECT {QUESTION_COLUMNS} FROM Question WHERE ScenarioID = ?1"
      ))
      .map_err(Error::Query)?;

    let questions = stmt
      .query_map(params![scenario_id], question_from_row)
      .map_err(Error::Query)?
      .collect::<rusqlite::Result<Vec<_>>>()
      .map_err(Error::Query)?;

    Ok(questions.into_iter().map(|q| (q.question_id, q)).collect())
  }

  fn get_answers(&self, question_id: QuestionId) -> Result<Vec<Answer>> {
    let conn = self.conn()?;
    let mut stmt = conn
      .prepare(&format!(
        "SELECT {ANSWER_COLUMNS} FROM Answer WHERE QuestionID = ?1 ORDER BY AnswerID"
      ))
      .map_err(Error::Query)?;

    let raws = stmt
      .query_map(params![question_id], RawAnswer::from_row)
      .map_err(Error::Query)?
      .collect::<rusqlite::Result<Vec<_>>>()
      .map_err(Error::Query)?;

    raws.into_iter().map(RawAnswer::into_answer).collect()
  }

  // ── Accessory catalog ─────────────────────────────────────────────────

  fn get_accessory_catalog(&self, kind: AccessoryType) -> Result<Vec<Accessory>> {
    let conn = self.conn()?;
    let mut stmt = conn
      .prepare(&format!(
        "SELECT {ACCESSORY_COLUMNS} FROM {} ORDER BY ID",
        kind.table()
      ))
      .map_err(Error::Query)?;

    let catalog = stmt
      .query_map([], |row| accessory_from_row(kind, row))
      .map_err(Error::Query)?
      .collect::<rusqlite::Result<Vec<_>>>()
      .map_err(Error::Query)?;

    Ok(catalog)
  }

  fn get_accessory(&self, kind: AccessoryType, id: AccessoryId) -> Result<Accessory> {
    fetch_accessory(self.conn()?, kind, id)
  }

  fn purchase_accessory(&self, accessory: &Accessory) -> Result<()> {
    let conn = self.conn()?;
    let sql = format!("UPDATE {} SET Purchased = 1 WHERE ID = ?1", accessory.kind.table());
    let changed = conn
      .execute(&sql, params![accessory.id])
      .map_err(Error::Update)?;

    if changed == 0 {
      return Err(Error::NoRowsAffected(Record::Accessory {
        kind: accessory.kind,
        id:   accessory.id,
      }));
    }
    tracing::debug!(kind = %accessory.kind, id = accessory.id, "purchased accessory");
    Ok(())
  }

  // ── Avatar ────────────────────────────────────────────────────────────

  fn get_avatar(&self) -> Result<Avatar> {
    let conn = self.conn()?;
    let raw = conn
      .query_row(
        &format!("SELECT {AVATAR_COLUMNS} FROM Avatar WHERE ID = ?1"),
        params![AVATAR_ID],
        RawAvatar::from_row,
      )
      .optional()
      .map_err(Error::Query)?
      .ok_or(Error::NotFound(Record::Avatar))?;

    raw.into_avatar(|kind, id| fetch_accessory(conn, kind, id))
  }

  fn save_avatar(&self, avatar: &Avatar) -> Result<()> {
    let conn = self.conn()?;
    let tx = conn.unchecked_transaction().map_err(Error::Update)?;
    update_avatar(&tx, avatar)?;
    tx.commit().map_err(Error::Update)?;
    tracing::debug!("saved avatar");
    Ok(())
  }

  fn create_or_reset_avatar(&mut self, avatar: &Avatar) -> Result<()> {
    // Creating an avatar starts a new game: purchases and score go too.
    self.reset()?;

    let conn = self.conn.as_mut().ok_or(Error::NotOpen)?;
    let tx = conn.transaction().map_err(Error::Update)?;

    if avatar_row_exists(&tx)? {
      update_avatar(&tx, avatar)?;
    } else {
      let mandatory = AccessoryType::mandatory()
        .map(|kind| (kind, avatar.slot(kind).map(|a| a.id)));
      check_references(&tx, mandatory)?;

      // A new avatar starts without optional accessories.
      tx.execute(
        "INSERT INTO Avatar (ID, Face, Clothes, Hair, Eyes, Necklace, Glasses, Handbag, Hat)
         VALUES (?1, ?2, ?3, ?4, ?5, NULL, NULL, NULL, NULL)",
        params![
          AVATAR_ID,
          avatar.face.id,
          avatar.clothes.id,
          avatar.hair.id,
          avatar.eyes.id,
        ],
      )
      .map_err(Error::Update)?;
    }
    zero_score(&tx)?;
    tx.commit().map_err(Error::Update)?;

    tracing::info!("created avatar for a new game");
    Ok(())
  }

  fn avatar_exists(&self) -> bool {
    let Some(conn) = self.conn.as_ref() else { return false };
    avatar_row_exists(conn).unwrap_or_else(|e| {
      tracing::warn!(error = %e, "could not check for avatar row");
      false
    })
  }

  // ── Score ─────────────────────────────────────────────────────────────

  fn get_score(&self) -> Result<Score> {
    let conn = self.conn()?;
    conn
      .query_row(
        &format!("SELECT {SCORE_COLUMNS} FROM Score WHERE ID = ?1"),
        params![AVATAR_ID],
        score_from_row,
      )
      .optional()
      .map_err(Error::Query)?
      .ok_or(Error::NotFound(Record::Score))
  }

  fn save_score(&self, score: &Score) -> Result<()> {
    let conn = self.conn()?;
    let changed = conn
      .execute(
        "UPDATE Score
         SET Strength = ?1, Invisibility = ?2, Healing = ?3, Telepathy = ?4, Points = ?5
         WHERE ID = ?6",
        params![
          score.strength,
          score.invisibility,
          score.healing,
          score.telepathy,
          score.karma_points,
          AVATAR_ID,
        ],
      )
      .map_err(Error::Update)?;

    if changed == 0 {
      return Err(Error::NoRowsAffected(Record::Score));
    }
    tracing::debug!(karma = score.karma_points, "saved score");
    Ok(())
  }
}
