use std::sync::Arc;

use crate::catalog::{CatalogStore, SupabaseStore};
use crate::core::config::{AppConfig, AppPaths, ConfigService};
use crate::llm::GeminiProvider;
use crate::rag::DiscoveryPipeline;

pub mod error;

use error::InitializationError;

/// Application state shared across all routes.
///
/// Everything here is read-only after startup; requests share the
/// stateless capability clients and nothing else.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub catalog: Arc<dyn CatalogStore>,
    pub pipeline: Arc<DiscoveryPipeline>,
}

impl AppState {
    /// Initializes the application state.
    ///
    /// 1. Loads configuration (files, secrets, environment) under `paths`
    /// 2. Builds the Gemini completion/embedding client
    /// 3. Builds the Supabase client used for search and catalog reads
    /// 4. Assembles the discovery pipeline
    pub fn initialize(paths: Arc<AppPaths>) -> Result<Arc<Self>, InitializationError> {
        let config = ConfigService::new(paths)
            .load_config()
            .map_err(|e| InitializationError::Config(e.into()))?;

        let llm = Arc::new(
            GeminiProvider::new(&config.llm).map_err(|e| InitializationError::Llm(e.into()))?,
        );
        let store = Arc::new(
            SupabaseStore::new(&config.catalog)
                .map_err(|e| InitializationError::Catalog(e.into()))?,
        );

        let pipeline = Arc::new(DiscoveryPipeline::new(
            llm,
            store.clone(),
            config.retrieval,
            config.brand.clone(),
        ));

        Ok(Self::from_parts(config, store, pipeline))
    }

    pub fn from_parts(
        config: AppConfig,
        catalog: Arc<dyn CatalogStore>,
        pipeline: Arc<DiscoveryPipeline>,
    ) -> Arc<Self> {
        Arc::new(AppState {
            config: Arc::new(config),
            catalog,
            pipeline,
        })
    }
}
