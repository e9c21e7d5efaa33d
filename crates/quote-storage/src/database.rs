//! Database connection and key-value operations

use chrono::Utc;
use parking_lot::Mutex;
use rusqlite::{Connection, OptionalExtension};
use std::path::Path;
use std::sync::Arc;

use crate::migrations::run_migrations;
use crate::Result;

/// Which key-value table an entry lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// Survives process restarts
    Local,
    /// Dropped when the connection closes
    Session,
}

impl Scope {
    fn table(&self) -> &'static str {
        match self {
            Scope::Local => "local_storage",
            Scope::Session => "session_storage",
        }
    }
}

pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)?;

        // WAL mode for better concurrent performance
        let _: String =
            conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))?;

        run_migrations(&conn)?;
        create_session_table(&conn)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        run_migrations(&conn)?;
        create_session_table(&conn)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn with_connection<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T>,
    {
        let conn = self.conn.lock();
        f(&conn)
    }

    pub fn transaction<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T>,
    {
        let mut conn = self.conn.lock();
        let tx = conn.transaction()?;
        let result = f(&tx)?;
        tx.commit()?;
        Ok(result)
    }

    pub fn get_item(&self, scope: Scope, key: &str) -> Result<Option<String>> {
        let sql = format!("SELECT value FROM {} WHERE key = ?1", scope.table());
        self.with_connection(|conn| {
            let value = conn
                .query_row(&sql, [key], |row| row.get(0))
                .optional()?;
            Ok(value)
        })
    }

    pub fn set_item(&self, scope: Scope, key: &str, value: &str) -> Result<()> {
        self.with_connection(|conn| {
            match scope {
                Scope::Local => {
                    let updated_at = Utc::now().to_rfc3339();
                    conn.execute(
                        "INSERT OR REPLACE INTO local_storage (key, value, updated_at)
                         VALUES (?1, ?2, ?3)",
                        rusqlite::params![key, value, updated_at],
                    )?;
                }
                Scope::Session => {
                    conn.execute(
                        "INSERT OR REPLACE INTO session_storage (key, value) VALUES (?1, ?2)",
                        rusqlite::params![key, value],
                    )?;
                }
            }
            Ok(())
        })
    }

    pub fn remove_item(&self, scope: Scope, key: &str) -> Result<()> {
        let sql = format!("DELETE FROM {} WHERE key = ?1", scope.table());
        self.with_connection(|conn| {
            conn.execute(&sql, [key])?;
            Ok(())
        })
    }

    /// Remove several entries in one transaction.
    pub fn remove_items(&self, items: &[(Scope, &str)]) -> Result<()> {
        self.transaction(|conn| {
            for (scope, key) in items {
                let sql = format!("DELETE FROM {} WHERE key = ?1", scope.table());
                conn.execute(&sql, [key])?;
            }
            Ok(())
        })?;

        tracing::debug!(count = items.len(), "Removed storage keys");
        Ok(())
    }
}

impl Clone for Database {
    fn clone(&self) -> Self {
        Self {
            conn: Arc::clone(&self.conn),
        }
    }
}

fn create_session_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TEMP TABLE IF NOT EXISTS session_storage (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL
        );
    "#,
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_in_memory() {
        let db = Database::open_in_memory().unwrap();
        db.with_connection(|conn| {
            let count: i32 =
                conn.query_row("SELECT COUNT(*) FROM local_storage", [], |row| row.get(0))?;
            assert_eq!(count, 0);
            Ok(())
        })
        .unwrap();
    }

    #[test]
    fn test_scopes_are_separate() {
        let db = Database::open_in_memory().unwrap();
        db.set_item(Scope::Local, "k", "local").unwrap();
        db.set_item(Scope::Session, "k", "session").unwrap();

        assert_eq!(db.get_item(Scope::Local, "k").unwrap().as_deref(), Some("local"));
        assert_eq!(
            db.get_item(Scope::Session, "k").unwrap().as_deref(),
            Some("session")
        );

        db.remove_item(Scope::Session, "k").unwrap();
        assert!(db.get_item(Scope::Session, "k").unwrap().is_none());
        assert!(db.get_item(Scope::Local, "k").unwrap().is_some());
    }

    #[test]
    fn test_set_item_overwrites() {
        let db = Database::open_in_memory().unwrap();
        db.set_item(Scope::Local, "filter", "all").unwrap();
        db.set_item(Scope::Local, "filter", "Life").unwrap();
        assert_eq!(
            db.get_item(Scope::Local, "filter").unwrap().as_deref(),
            Some("Life")
        );
    }

    #[test]
    fn test_remove_items() {
        let db = Database::open_in_memory().unwrap();
        db.set_item(Scope::Local, "a", "1").unwrap();
        db.set_item(Scope::Local, "b", "2").unwrap();
        db.set_item(Scope::Session, "c", "3").unwrap();

        db.remove_items(&[(Scope::Local, "a"), (Scope::Local, "b"), (Scope::Session, "c")])
            .unwrap();

        assert!(db.get_item(Scope::Local, "a").unwrap().is_none());
        assert!(db.get_item(Scope::Local, "b").unwrap().is_none());
        assert!(db.get_item(Scope::Session, "c").unwrap().is_none());
    }

    #[test]
    fn test_session_scope_does_not_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.db");

        {
            let db = Database::open(&path).unwrap();
            db.set_item(Scope::Local, "quotes", "[]").unwrap();
            db.set_item(Scope::Session, "lastViewedQuote", "{}").unwrap();
        }

        let db = Database::open(&path).unwrap();
        assert_eq!(
            db.get_item(Scope::Local, "quotes").unwrap().as_deref(),
            Some("[]")
        );
        assert!(db
            .get_item(Scope::Session, "lastViewedQuote")
            .unwrap()
            .is_none());
    }
}
