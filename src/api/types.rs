//! Shared state for the HTTP layer.

use std::path::PathBuf;

use rusqlite::Connection;

use crate::db::{self, StoreError};

/// Shared context for all routes: where the record store lives and where
/// uploaded photos are written. Handlers open their own store connection,
/// so no mutable state is shared between requests.
#[derive(Clone)]
pub struct ApiContext {
    pub db_path: PathBuf,
    pub uploads_dir: PathBuf,
}

impl ApiContext {
    pub fn new(db_path: PathBuf, uploads_dir: PathBuf) -> Self {
        Self {
            db_path,
            uploads_dir,
        }
    }

    /// Open a store connection for the current request.
    pub fn open_db(&self) -> Result<Connection, StoreError> {
        db::open_database(&self.db_path)
    }
}
