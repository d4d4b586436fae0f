// Application state module
// Shared by every connection task for the lifetime of the process

use super::types::Config;
use crate::movies::{MovieStore, StoreError};

/// Application state
pub struct AppState {
    pub config: Config,
    pub store: MovieStore,
}

impl AppState {
    /// Create `AppState` with the store built from `config.store`
    pub fn new(config: &Config) -> Result<Self, StoreError> {
        let store = MovieStore::from_config(&config.store)?;
        Ok(Self::with_store(config, store))
    }

    pub fn with_store(config: &Config, store: MovieStore) -> Self {
        Self {
            config: config.clone(),
            store,
        }
    }
}
