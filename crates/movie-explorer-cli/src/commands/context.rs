use color_eyre::eyre::{eyre, Context};
use color_eyre::Result;
use movie_explorer_config::{Config, CredentialStore, PathManager};
use movie_explorer_core::{CollectionsStore, LocalStorage, MockAuthenticator, SearchHistoryStore, ThemeStore};
use movie_explorer_sources::{MovieSource, TmdbClient};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Simulated account round trip for the mock authenticator
const AUTH_LATENCY: Duration = Duration::from_millis(800);

/// Services shared by every command, built once per invocation
pub struct AppContext {
    pub paths: PathManager,
    pub config: Config,
    storage: Arc<LocalStorage>,
}

impl AppContext {
    pub fn new(paths: PathManager, config: Config) -> Result<Self> {
        paths
            .ensure_directories()
            .map_err(|e| eyre!("Failed to create {}: {}", paths.config_dir().display(), e))?;
        let storage = LocalStorage::from_paths(&paths).wrap_err("Failed to open local storage")?;
        Ok(Self {
            paths,
            config,
            storage: Arc::new(storage),
        })
    }

    pub fn storage(&self) -> &Arc<LocalStorage> {
        &self.storage
    }

    pub fn credentials(&self) -> Result<CredentialStore> {
        let mut store = CredentialStore::new(self.paths.credentials_file());
        store
            .load()
            .map_err(|e| eyre!("Failed to read {}: {}", self.paths.credentials_file().display(), e))?;
        Ok(store)
    }

    /// Metadata API client authenticated with the configured access token
    pub fn source(&self) -> Result<Arc<dyn MovieSource>> {
        let token = self.credentials()?.resolve_tmdb_access_token().ok_or_else(|| {
            eyre!("No TMDB access token configured. Run 'movie-explorer config set-token' or set TMDB_ACCESS_TOKEN")
        })?;
        let client = TmdbClient::new(&self.config.api, &token).wrap_err("Failed to create TMDB client")?;
        debug!("Using {} at {}", client.source_name(), self.config.api.base_url);
        Ok(Arc::new(client))
    }

    pub fn collections(&self) -> CollectionsStore {
        CollectionsStore::load(self.storage.clone())
    }

    pub fn history(&self) -> SearchHistoryStore {
        SearchHistoryStore::load(self.storage.clone(), self.config.history.max_entries)
    }

    pub fn theme(&self) -> ThemeStore {
        ThemeStore::load(self.storage.clone())
    }

    pub fn authenticator(&self) -> MockAuthenticator {
        MockAuthenticator::load(self.storage.clone()).with_latency(AUTH_LATENCY)
    }
}
