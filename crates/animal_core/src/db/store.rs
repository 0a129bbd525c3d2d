//! Shared store handle.
//!
//! # Responsibility
//! - Own one migrated SQLite connection behind a mutex.
//! - Let repositories share that connection across blocking workers.
//!
//! # Invariants
//! - Handles are acquired explicitly and released on drop or `close`.
//! - At most one statement runs on the connection at a time.

use super::{open_db, open_db_in_memory, DbError, DbResult};
use log::info;
use rusqlite::Connection;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

/// Cloneable handle to a single SQLite connection.
#[derive(Clone)]
pub struct AnimalStore {
    conn: Arc<Mutex<Connection>>,
}

impl AnimalStore {
    /// Opens (and migrates) a file-backed store.
    pub fn open(path: impl AsRef<Path>) -> DbResult<Self> {
        open_db(path).map(Self::from_connection)
    }

    /// Opens (and migrates) a private in-memory store.
    pub fn open_in_memory() -> DbResult<Self> {
        open_db_in_memory().map(Self::from_connection)
    }

    /// Wraps an already configured connection as-is.
    ///
    /// No migrations are applied; repositories verify the schema themselves.
    pub fn from_connection(conn: Connection) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
        }
    }

    /// Locks the connection for one unit of work.
    pub fn lock(&self) -> DbResult<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| DbError::Poisoned)
    }

    /// Number of live handles sharing this connection.
    pub fn handle_count(&self) -> usize {
        Arc::strong_count(&self.conn)
    }

    /// Closes the connection and reports any error SQLite returns on close.
    ///
    /// # Errors
    /// - `StoreInUse` when other clones of this handle are still alive.
    /// - `Poisoned` when a holder of the lock panicked.
    pub fn close(self) -> DbResult<()> {
        let mutex = Arc::try_unwrap(self.conn).map_err(|shared| DbError::StoreInUse {
            handles: Arc::strong_count(&shared) - 1,
        })?;
        let conn = mutex.into_inner().map_err(|_| DbError::Poisoned)?;
        conn.close().map_err(|(_, err)| DbError::Sqlite(err))?;
        info!("event=db_close module=db status=ok");
        Ok(())
    }
}

impl std::fmt::Debug for AnimalStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnimalStore")
            .field("handles", &self.handle_count())
            .finish()
    }
}
