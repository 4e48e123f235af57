//! Durable key/value storage for the client session.
//!
//! Three backends share one trait:
//! - [`KeyringStore`]: OS credential store (DPAPI / Keychain / Secret Service)
//! - [`SqliteStore`]: `local_settings` table in a local SQLite file
//! - [`MemoryStore`]: process-local map, for tests and throwaway sessions

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use keyring::Entry;
use rusqlite::{params, Connection};
use tracing::{info, warn};

use crate::error::ApiError;

const SERVICE_NAME: &str = "cafe-pos-client";
const SESSION_CATEGORY: &str = "session";
const DB_FILE: &str = "pos-client.db";

pub trait KeyValueStore: Send + Sync {
    /// `Ok(None)` when the key is absent.
    fn get(&self, key: &str) -> Result<Option<String>, ApiError>;
    fn set(&self, key: &str, value: &str) -> Result<(), ApiError>;
    /// Removing an absent key succeeds.
    fn remove(&self, key: &str) -> Result<(), ApiError>;
}

// ---------------------------------------------------------------------------
// OS keyring
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Clone)]
pub struct KeyringStore;

impl KeyringStore {
    fn entry(key: &str) -> Result<Entry, ApiError> {
        Entry::new(SERVICE_NAME, key).map_err(|e| {
            warn!(key, error = %e, "keyring: failed to create entry");
            ApiError::Storage(e.to_string())
        })
    }
}

impl KeyValueStore for KeyringStore {
    fn get(&self, key: &str) -> Result<Option<String>, ApiError> {
        match Self::entry(key)?.get_password() {
            Ok(value) => Ok(Some(value)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => {
                warn!(key, error = %e, "keyring: failed to read credential");
                Err(ApiError::Storage(e.to_string()))
            }
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), ApiError> {
        Self::entry(key)?
            .set_password(value)
            .map_err(|e| ApiError::Storage(e.to_string()))
    }

    fn remove(&self, key: &str) -> Result<(), ApiError> {
        match Self::entry(key)?.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(ApiError::Storage(e.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// SQLite local_settings
// ---------------------------------------------------------------------------

pub struct SqliteStore {
    conn: Mutex<Connection>,
    db_path: PathBuf,
}

impl SqliteStore {
    /// Open (or create) `{data_dir}/pos-client.db`.
    pub fn open(data_dir: &Path) -> Result<Self, ApiError> {
        fs::create_dir_all(data_dir)
            .map_err(|e| ApiError::Storage(format!("Failed to create data dir: {e}")))?;
        let db_path = data_dir.join(DB_FILE);
        info!("Opening session store at {}", db_path.display());

        let conn = Connection::open(&db_path)?;
        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA busy_timeout = 5000;
             PRAGMA synchronous = NORMAL;",
        )?;
        Self::from_connection(conn, db_path)
    }

    pub fn open_in_memory() -> Result<Self, ApiError> {
        let conn = Connection::open_in_memory()?;
        Self::from_connection(conn, PathBuf::from(":memory:"))
    }

    fn from_connection(conn: Connection, db_path: PathBuf) -> Result<Self, ApiError> {
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS local_settings (
                setting_category TEXT NOT NULL,
                setting_key TEXT NOT NULL,
                setting_value TEXT NOT NULL,
                updated_at TEXT DEFAULT (datetime('now')),
                UNIQUE(setting_category, setting_key)
            );",
        )?;
        Ok(Self {
            conn: Mutex::new(conn),
            db_path,
        })
    }

    pub fn path(&self) -> &Path {
        &self.db_path
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Connection>, ApiError> {
        self.conn.lock().map_err(|e| ApiError::Storage(e.to_string()))
    }
}

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<String>, ApiError> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(
            "SELECT setting_value FROM local_settings
             WHERE setting_category = ?1 AND setting_key = ?2",
        )?;
        let mut rows = stmt.query(params![SESSION_CATEGORY, key])?;
        match rows.next()? {
            Some(row) => Ok(Some(row.get(0)?)),
            None => Ok(None),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), ApiError> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO local_settings (setting_category, setting_key, setting_value, updated_at)
             VALUES (?1, ?2, ?3, datetime('now'))
             ON CONFLICT(setting_category, setting_key) DO UPDATE SET
                setting_value = excluded.setting_value,
                updated_at = excluded.updated_at",
            params![SESSION_CATEGORY, key, value],
        )?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), ApiError> {
        let conn = self.lock()?;
        conn.execute(
            "DELETE FROM local_settings WHERE setting_category = ?1 AND setting_key = ?2",
            params![SESSION_CATEGORY, key],
        )?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// In-memory
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, ApiError> {
        let values = self
            .values
            .lock()
            .map_err(|e| ApiError::Storage(e.to_string()))?;
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), ApiError> {
        self.values
            .lock()
            .map_err(|e| ApiError::Storage(e.to_string()))?
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), ApiError> {
        self.values
            .lock()
            .map_err(|e| ApiError::Storage(e.to_string()))?
            .remove(key);
        Ok(())
    }
}
