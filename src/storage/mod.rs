use std::fs;
use std::path::{Path, PathBuf};

use rusqlite::{Connection, OptionalExtension, params};

use crate::auth::Session;

const DB_FILE: &str = "atv-admin.db";
pub const SESSION_KEY: &str = "session";

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Failed to create data directory `{path}`: {source}")]
    DataDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Failed to encode or decode stored state: {0}")]
    Json(#[from] serde_json::Error),
}

pub fn sqlite_path(data_dir: &Path) -> PathBuf {
    data_dir.join(DB_FILE)
}

pub fn open_db(data_dir: &Path) -> Result<Connection, StorageError> {
    fs::create_dir_all(data_dir).map_err(|source| StorageError::DataDir {
        path: data_dir.to_path_buf(),
        source,
    })?;

    let conn = Connection::open(sqlite_path(data_dir))?;
    conn.pragma_update(None, "journal_mode", "WAL")?;
    init_schema(&conn)?;
    Ok(conn)
}

pub fn init_schema(conn: &Connection) -> Result<(), StorageError> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS app_state (
         state_key TEXT PRIMARY KEY,
         state_json TEXT NOT NULL,
         updated_at INTEGER NOT NULL DEFAULT (strftime('%s','now'))
       );",
    )?;
    Ok(())
}

pub fn upsert_state(conn: &Connection, key: &str, state_json: &str) -> Result<(), StorageError> {
    conn.execute(
        "INSERT INTO app_state (state_key, state_json, updated_at)
       VALUES (?1, ?2, strftime('%s','now'))
       ON CONFLICT(state_key)
       DO UPDATE SET
         state_json = excluded.state_json,
         updated_at = excluded.updated_at;",
        params![key, state_json],
    )?;
    Ok(())
}

pub fn load_state(conn: &Connection, key: &str) -> Result<Option<String>, StorageError> {
    let state = conn
        .query_row(
            "SELECT state_json FROM app_state WHERE state_key = ?1 LIMIT 1;",
            params![key],
            |row| row.get(0),
        )
        .optional()?;
    Ok(state)
}

pub fn delete_state(conn: &Connection, key: &str) -> Result<(), StorageError> {
    conn.execute("DELETE FROM app_state WHERE state_key = ?1;", params![key])?;
    Ok(())
}

/// Restore the persisted session. A missing row yields a signed-out session.
pub fn load_session(conn: &Connection) -> Result<Session, StorageError> {
    match load_state(conn, SESSION_KEY)? {
        Some(raw) => Ok(serde_json::from_str(&raw)?),
        None => Ok(Session::default()),
    }
}

pub fn save_session(conn: &Connection, session: &Session) -> Result<(), StorageError> {
    if !session.is_signed_in() {
        return delete_state(conn, SESSION_KEY);
    }
    let raw = serde_json::to_string(session)?;
    upsert_state(conn, SESSION_KEY, &raw)
}
