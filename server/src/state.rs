use std::sync::{Arc, RwLock};

use catalog::{Catalog, MergedFilm, Store};
use tracing::info;

use crate::{config::Config, error::AppError, session::Sessions, users::UserStore};

/// The loaded catalog plus the merged view served to clients.
///
/// `merged` is the one view the film and watchlist routes serve from, so
/// a pre-generated cache and the detail route can never disagree about
/// which films exist. The source `catalog` backs filter derivation,
/// groupings, and admin mutations.
#[derive(Debug)]
pub struct CatalogState {
    pub catalog: Catalog,
    pub merged: Vec<MergedFilm>,
}

impl CatalogState {
    pub fn merged_film(&self, id: &str) -> Option<MergedFilm> {
        self.merged.iter().find(|m| m.film.id == id).cloned()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.merged.iter().any(|m| m.film.id == id)
    }
}

pub struct AppState {
    pub config: Config,
    pub store: Store,
    pub catalog: RwLock<CatalogState>,
    pub users: UserStore,
    pub sessions: Sessions,
}

impl AppState {
    pub fn new() -> Arc<Self> {
        Self::with_config(Config::load())
    }

    pub fn with_config(config: Config) -> Arc<Self> {
        let store = Store::new(&config.data_dir);

        let catalog = store.load().expect("Data directory misconfigured!");
        info!("Loaded films: {}", catalog.len());

        // Prefer the pre-generated cache; fall back to merging here.
        let merged = match store
            .load_generated()
            .expect("Generated cache unreadable!")
        {
            Some(cached) => {
                info!("Using pre-generated merged cache ({} films)", cached.len());
                cached
            }
            None => {
                info!("No merged cache found, merging at startup");
                catalog.merged()
            }
        };

        let users = UserStore::load(&config.data_dir).expect("User file unreadable!");
        let sessions = Sessions::new(config.session_ttl_hours);

        Arc::new(Self {
            store,
            catalog: RwLock::new(CatalogState { catalog, merged }),
            users,
            sessions,
            config,
        })
    }

    /// Reload the catalog from its source files and rewrite the merged
    /// cache. Called after every admin mutation so neither the in-memory
    /// view nor the cache file can go stale through the API.
    pub fn refresh_catalog(&self) -> Result<(), AppError> {
        let catalog = self.store.load()?;
        let merged = catalog.merged();
        self.store.write_generated(&merged)?;

        *self.catalog.write().unwrap() = CatalogState { catalog, merged };
        Ok(())
    }
}
