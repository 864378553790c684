//! QuoteStore — SQLite-backed storage for tagged quotes
//!
//! Tags live in a single TEXT column joined with `", "` and are split back
//! on read. Nothing here is reachable from the page handlers.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use log::{debug, info};
use rusqlite::{params, Connection, Row};

use crate::errors::WikiError;
use crate::types::Quote;

const TAG_SEPARATOR: &str = ", ";

pub struct QuoteStore {
    conn: Mutex<Connection>,
}

impl QuoteStore {
    /// Open (or create) the database file and make sure the table exists
    pub fn open(path: impl AsRef<Path>) -> Result<Self, WikiError> {
        let path = path.as_ref();
        debug!("Opening quote store at {:?}", path);
        Self::init(Connection::open(path)?)
    }

    pub fn open_in_memory() -> Result<Self, WikiError> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self, WikiError> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS quotes (id INTEGER PRIMARY KEY, body TEXT, tags TEXT)",
            [],
        )?;
        Ok(Self { conn: Mutex::new(conn) })
    }

    fn conn(&self) -> MutexGuard<'_, Connection> {
        // A panic while holding the lock leaves the connection itself usable.
        self.conn.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Insert a new quote and return its id
    pub fn insert(&self, body: &str, tags: &[String]) -> Result<i64, WikiError> {
        let conn = self.conn();
        conn.execute(
            "INSERT INTO quotes (body, tags) VALUES (?1, ?2)",
            params![body, join_tags(tags)],
        )?;
        let id = conn.last_insert_rowid();
        info!("[QUOTES] Inserted quote {}", id);
        Ok(id)
    }

    /// Rewrite body and tags of an existing quote
    pub fn update(&self, quote: &Quote) -> Result<(), WikiError> {
        let changed = self.conn().execute(
            "UPDATE quotes SET body = ?1, tags = ?2 WHERE id = ?3",
            params![quote.body, join_tags(&quote.tags), quote.id],
        )?;
        if changed == 0 {
            return Err(WikiError::NotFound);
        }
        debug!("[QUOTES] Updated quote {}", quote.id);
        Ok(())
    }

    pub fn get(&self, id: i64) -> Result<Quote, WikiError> {
        let quote = self.conn().query_row(
            "SELECT id, body, tags FROM quotes WHERE id = ?1",
            params![id],
            quote_from_row,
        )?;
        Ok(quote)
    }

    /// All quotes in id order
    pub fn list(&self) -> Result<Vec<Quote>, WikiError> {
        let conn = self.conn();
        let mut stmt = conn.prepare("SELECT id, body, tags FROM quotes ORDER BY id")?;
        let quotes = stmt
            .query_map([], quote_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(quotes)
    }

    pub fn delete(&self, id: i64) -> Result<(), WikiError> {
        let changed = self
            .conn()
            .execute("DELETE FROM quotes WHERE id = ?1", params![id])?;
        if changed == 0 {
            return Err(WikiError::NotFound);
        }
        info!("[QUOTES] Deleted quote {}", id);
        Ok(())
    }
}

fn quote_from_row(row: &Row<'_>) -> rusqlite::Result<Quote> {
    let body: Option<String> = row.get(1)?;
    let tags: Option<String> = row.get(2)?;
    Ok(Quote {
        id: row.get(0)?,
        body: body.unwrap_or_default(),
        tags: split_tags(tags.as_deref().unwrap_or("")),
    })
}

fn join_tags(tags: &[String]) -> String {
    tags.join(TAG_SEPARATOR)
}

fn split_tags(raw: &str) -> Vec<String> {
    if raw.is_empty() {
        return Vec::new();
    }
    raw.split(TAG_SEPARATOR).map(str::to_string).collect()
}
