//! SQL schema of the Powerup template store.
//!
//! The running game never executes this: it copies a prebuilt template file.
//! [`crate::TemplateBuilder`] uses it to produce that file.

/// `PRAGMA user_version` of every store this crate can open.
pub const SCHEMA_VERSION: i64 = 1;

/// Full schema DDL for a fresh template. Ends by stamping
/// [`SCHEMA_VERSION`].
pub const SCHEMA: &str = "
PRAGMA foreign_keys = ON;

CREATE TABLE Question (
    QuestionID   INTEGER PRIMARY KEY,
    ScenarioID   INTEGER NOT NULL,
    QDescription TEXT    NOT NULL
);

-- NextQID holds a question id or 'END'.
CREATE TABLE Answer (
    AnswerID     INTEGER NOT NULL,
    QuestionID   INTEGER NOT NULL REFERENCES Question(QuestionID),
    ADescription TEXT    NOT NULL,
    NextQID      TEXT    NOT NULL,
    Points       INTEGER NOT NULL DEFAULT 0,
    PRIMARY KEY (QuestionID, AnswerID)
);

CREATE TABLE Face     (ID INTEGER PRIMARY KEY, Name TEXT NOT NULL, Points INTEGER NOT NULL, Purchased INTEGER NOT NULL DEFAULT 0);
CREATE TABLE Clothes  (ID INTEGER PRIMARY KEY, Name TEXT NOT NULL, Points INTEGER NOT NULL, Purchased INTEGER NOT NULL DEFAULT 0);
CREATE TABLE Hair     (ID INTEGER PRIMARY KEY, Name TEXT NOT NULL, Points INTEGER NOT NULL, Purchased INTEGER NOT NULL DEFAULT 0);
CREATE TABLE Eyes     (ID INTEGER PRIMARY KEY, Name TEXT NOT NULL, Points INTEGER NOT NULL, Purchased INTEGER NOT NULL DEFAULT 0);
CREATE TABLE Necklace (ID INTEGER PRIMARY KEY, Name TEXT NOT NULL, Points INTEGER NOT NULL, Purchased INTEGER NOT NULL DEFAULT 0);
CREATE TABLE Glasses  (ID INTEGER PRIMARY KEY, Name TEXT NOT NULL, Points INTEGER NOT NULL, Purchased INTEGER NOT NULL DEFAULT 0);
CREATE TABLE Handbag  (ID INTEGER PRIMARY KEY, Name TEXT NOT NULL, Points INTEGER NOT NULL, Purchased INTEGER NOT NULL DEFAULT 0);
CREATE TABLE Hat      (ID INTEGER PRIMARY KEY, Name TEXT NOT NULL, Points INTEGER NOT NULL, Purchased INTEGER NOT NULL DEFAULT 0);

-- Single row, ID = 1. Optional slots are NULL when empty.
CREATE TABLE Avatar (
    ID       INTEGER PRIMARY KEY,
    Face     INTEGER NOT NULL REFERENCES Face(ID),
    Clothes  INTEGER NOT NULL REFERENCES Clothes(ID),
    Hair     INTEGER NOT NULL REFERENCES Hair(ID),
    Eyes     INTEGER NOT NULL REFERENCES Eyes(ID),
    Necklace INTEGER          REFERENCES Necklace(ID),
    Glasses  INTEGER          REFERENCES Glasses(ID),
    Handbag  INTEGER          REFERENCES Handbag(ID),
    Hat      INTEGER          REFERENCES Hat(ID)
);

-- Single row, ID = 1. Points holds the karma balance.
CREATE TABLE Score (
    ID           INTEGER PRIMARY KEY,
    Strength     INTEGER NOT NULL DEFAULT 0,
    Invisibility INTEGER NOT NULL DEFAULT 0,
    Healing      INTEGER NOT NULL DEFAULT 0,
    Telepathy    INTEGER NOT NULL DEFAULT 0,
    Points       INTEGER NOT NULL DEFAULT 0
);

CREATE INDEX Question_scenario_idx ON Question(ScenarioID);

PRAGMA user_version = 1;
";
