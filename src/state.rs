use mongodb::Database;

use crate::services::file_store::FileStore;

#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub files: FileStore,
}

impl AppState {
    pub fn new(db: Database, files: FileStore) -> Self {
        AppState { db, files }
    }
}
