//! SQLite-backed storage of per-image label sets.
//!
//! The store owns its [`rusqlite::Connection`]: it is acquired at
//! construction and released on drop, never shared through a global handle.
//! Mutating calls take `&mut self`, which gives single-writer discipline for
//! free when an instance is shared behind a lock; reads only need `&self`.

use log::debug;
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::HashSet;
use std::path::Path;

use crate::error::Result;
use crate::types::{Label, NumberBox, Point};

/// Durable, queryable storage of per-image label sets plus a completeness
/// flag.
///
/// Labels are written with full-replace semantics: [`LabelStore::set_labels`]
/// deletes every existing label for the image (all three kinds) and inserts
/// the replacement set as one transaction. Nothing is merged incrementally
/// and no partial state is ever visible.
///
/// # Example
///
/// ```
/// use bug_eval::store::LabelStore;
/// use bug_eval::types::Label;
///
/// let mut store = LabelStore::open_in_memory().unwrap();
/// store.set_labels("a.png", &[Label::Bug { x: 10.0, y: 20.0 }]).unwrap();
/// assert_eq!(store.get_bugs("a.png").unwrap().len(), 1);
/// ```
pub struct LabelStore {
    conn: Connection,
}

impl LabelStore {
    /// Open (or create) a label database at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or the schema
    /// cannot be created.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path.as_ref())?;
        debug!("label db opened at {}", path.as_ref().display());
        let store = LabelStore { conn };
        store.init_schema()?;
        Ok(store)
    }

    /// Open an in-memory label database. Used by tests and throwaway runs.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = LabelStore { conn };
        store.init_schema()?;
        Ok(store)
    }

    /// Create all tables if they don't exist.
    fn init_schema(&self) -> Result<()> {
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS images (
                id        INTEGER PRIMARY KEY AUTOINCREMENT,
                filename  TEXT NOT NULL UNIQUE,
                complete  BOOLEAN NOT NULL DEFAULT 0
            )",
            [],
        )?;

        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS bugs (
                image_id  INTEGER NOT NULL,
                x         REAL NOT NULL,
                y         REAL NOT NULL
            )",
            [],
        )?;

        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS tickmarks (
                image_id  INTEGER NOT NULL,
                x         REAL NOT NULL,
                y         REAL NOT NULL
            )",
            [],
        )?;

        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS tickmark_numbers (
                image_id        INTEGER NOT NULL,
                x               REAL NOT NULL,
                y               REAL NOT NULL,
                width           REAL NOT NULL,
                height          REAL NOT NULL,
                tickmark_value  INTEGER NOT NULL
            )",
            [],
        )?;

        Ok(())
    }

    /// Get the id for a filename, creating the image row if absent.
    ///
    /// Idempotent: repeated calls for the same filename return the same id.
    pub fn ensure_image(&mut self, filename: &str) -> Result<i64> {
        if let Some(id) = self.image_id(filename)? {
            return Ok(id);
        }
        self.conn.execute(
            "INSERT INTO images (filename, complete) VALUES (?1, 0)",
            params![filename],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// All filenames known to the store.
    pub fn list_images(&self) -> Result<HashSet<String>> {
        let mut stmt = self.conn.prepare("SELECT filename FROM images")?;
        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;
        let mut filenames = HashSet::new();
        for row in rows {
            filenames.insert(row?);
        }
        Ok(filenames)
    }

    /// True iff the image is marked complete or at least one label row of
    /// any kind exists for it.
    ///
    /// The label queries guard against surfacing a half-entered label
    /// session: [`LabelStore::get_bugs`] and friends return empty until this
    /// is true.
    pub fn has_labels(&self, filename: &str) -> Result<bool> {
        let img_id = match self.image_id(filename)? {
            Some(id) => id,
            None => return Ok(false),
        };
        let any_row: bool = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM bugs WHERE image_id = ?1)
                 OR EXISTS(SELECT 1 FROM tickmarks WHERE image_id = ?1)
                 OR EXISTS(SELECT 1 FROM tickmark_numbers WHERE image_id = ?1)",
            params![img_id],
            |row| row.get(0),
        )?;
        if any_row {
            return Ok(true);
        }
        self.get_complete(filename)
    }

    /// Bug points for an image, empty when [`LabelStore::has_labels`] is
    /// false (even if the image row exists).
    pub fn get_bugs(&self, filename: &str) -> Result<Vec<Point>> {
        if !self.has_labels(filename)? {
            return Ok(Vec::new());
        }
        self.query_points(
            "SELECT b.x, b.y
             FROM bugs b JOIN images i ON b.image_id = i.id
             WHERE i.filename = ?1",
            filename,
        )
    }

    /// Tick-mark points for an image, empty when
    /// [`LabelStore::has_labels`] is false.
    pub fn get_tickmarks(&self, filename: &str) -> Result<Vec<Point>> {
        if !self.has_labels(filename)? {
            return Ok(Vec::new());
        }
        self.query_points(
            "SELECT t.x, t.y
             FROM tickmarks t JOIN images i ON t.image_id = i.id
             WHERE i.filename = ?1",
            filename,
        )
    }

    /// Valued number boxes for an image, empty when
    /// [`LabelStore::has_labels`] is false.
    pub fn get_tickmark_numbers(&self, filename: &str) -> Result<Vec<NumberBox>> {
        if !self.has_labels(filename)? {
            return Ok(Vec::new());
        }
        let mut stmt = self.conn.prepare(
            "SELECT t.x, t.y, t.width, t.height, t.tickmark_value
             FROM tickmark_numbers t JOIN images i ON t.image_id = i.id
             WHERE i.filename = ?1",
        )?;
        let rows = stmt.query_map(params![filename], |row| {
            Ok(NumberBox {
                x: row.get(0)?,
                y: row.get(1)?,
                width: row.get(2)?,
                height: row.get(3)?,
                value: row.get(4)?,
            })
        })?;
        let mut boxes = Vec::new();
        for row in rows {
            boxes.push(row?);
        }
        Ok(boxes)
    }

    /// Replace the full label set for an image.
    ///
    /// Deletes all existing labels for the image (all three kinds),
    /// classifies the new collection by kind and inserts it, as one atomic
    /// unit. Creates the image row if absent. Either the whole delete+insert
    /// completes or none of it is visible.
    pub fn set_labels(&mut self, filename: &str, labels: &[Label]) -> Result<()> {
        let img_id = self.ensure_image(filename)?;

        let tx = self.conn.transaction()?;
        tx.execute("DELETE FROM bugs WHERE image_id = ?1", params![img_id])?;
        tx.execute("DELETE FROM tickmarks WHERE image_id = ?1", params![img_id])?;
        tx.execute(
            "DELETE FROM tickmark_numbers WHERE image_id = ?1",
            params![img_id],
        )?;

        for label in labels {
            match *label {
                Label::Bug { x, y } => {
                    tx.execute(
                        "INSERT INTO bugs (image_id, x, y) VALUES (?1, ?2, ?3)",
                        params![img_id, x, y],
                    )?;
                }
                Label::Tickmark { x, y } => {
                    tx.execute(
                        "INSERT INTO tickmarks (image_id, x, y) VALUES (?1, ?2, ?3)",
                        params![img_id, x, y],
                    )?;
                }
                Label::TickmarkNumber {
                    x,
                    y,
                    width,
                    height,
                    value,
                } => {
                    tx.execute(
                        "INSERT INTO tickmark_numbers
                         (image_id, x, y, width, height, tickmark_value)
                         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                        params![img_id, x, y, width, height, value],
                    )?;
                }
            }
        }
        tx.commit()?;
        debug!("replaced {} labels for {}", labels.len(), filename);
        Ok(())
    }

    /// Set the completeness flag for an image, creating the row if absent.
    ///
    /// `complete` is independent of label presence; an image can be
    /// complete with zero labels.
    pub fn set_complete(&mut self, filename: &str, complete: bool) -> Result<()> {
        self.ensure_image(filename)?;
        self.conn.execute(
            "UPDATE images SET complete = ?1 WHERE filename = ?2",
            params![complete, filename],
        )?;
        Ok(())
    }

    /// The completeness flag for an image; false if the image is unknown.
    pub fn get_complete(&self, filename: &str) -> Result<bool> {
        let complete: Option<bool> = self
            .conn
            .query_row(
                "SELECT complete FROM images WHERE filename = ?1",
                params![filename],
                |row| row.get(0),
            )
            .optional()?;
        Ok(complete.unwrap_or(false))
    }

    fn image_id(&self, filename: &str) -> Result<Option<i64>> {
        let id = self
            .conn
            .query_row(
                "SELECT id FROM images WHERE filename = ?1",
                params![filename],
                |row| row.get(0),
            )
            .optional()?;
        Ok(id)
    }

    fn query_points(&self, sql: &str, filename: &str) -> Result<Vec<Point>> {
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt.query_map(params![filename], |row| {
            Ok(Point::new(row.get(0)?, row.get(1)?))
        })?;
        let mut points = Vec::new();
        for row in rows {
            points.push(row?);
        }
        Ok(points)
    }
}
