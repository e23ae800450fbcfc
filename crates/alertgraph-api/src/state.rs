use alertgraph_core::{AlertStore, EmployeeDirectory, Settings};
use alertgraph_graph::{
    AlertQueryService, DirectoryListing, DismissalHandler, InMemoryStore, SeedData,
};
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub struct AppState {
    pub alerts: AlertQueryService,
    pub dismissals: DismissalHandler,
    pub directory: DirectoryListing,
    pub allowed_origins: Arc<Vec<String>>,
}

impl AppState {
    pub fn new(directory: Arc<dyn EmployeeDirectory>, alerts: Arc<dyn AlertStore>) -> Self {
        Self {
            alerts: AlertQueryService::new(directory.clone(), alerts.clone()),
            dismissals: DismissalHandler::new(alerts),
            directory: DirectoryListing::new(directory),
            allowed_origins: Arc::new(Vec::new()),
        }
    }

    pub fn in_memory(store: Arc<InMemoryStore>) -> Self {
        Self::new(store.clone(), store)
    }

    pub fn with_allowed_origins(mut self, origins: Vec<String>) -> Self {
        self.allowed_origins = Arc::new(origins);
        self
    }

    /// Build an in-memory state, seeded from `data.seed_path` when set.
    pub async fn from_settings(settings: &Settings) -> alertgraph_core::Result<Self> {
        let store = Arc::new(InMemoryStore::new());
        if let Some(ref path) = settings.data.seed_path {
            info!("Loading seed data from {:?}", path);
            let seed = SeedData::from_path(path).await?;
            store.load_seed(&seed)?;
        }
        Ok(Self::in_memory(store).with_allowed_origins(settings.security.allowed_origins.clone()))
    }
}
