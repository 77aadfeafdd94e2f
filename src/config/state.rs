// Application state: environment plus the shared table store handle

use std::sync::Arc;

use crate::config::environment::EnvironmentVariables;
use crate::store::postgrest::PostgrestStore;
use crate::store::TableStore;

#[derive(Clone)]
pub struct AppState {
    pub environment: Arc<EnvironmentVariables>,
    pub store: Arc<dyn TableStore>,
}

impl AppState {
    /// Builds the state for production use: environment from the process
    /// (and `.env`), store pointed at the configured hosted project.
    pub fn from_env() -> anyhow::Result<Self> {
        let environment: Arc<EnvironmentVariables> = Arc::new(EnvironmentVariables::load()?);
        let store: PostgrestStore = PostgrestStore::new(&environment)?;

        Ok(Self {
            environment,
            store: Arc::new(store),
        })
    }

    /// Builds the state around an arbitrary store implementation. Tests use
    /// this to run the real router against in-memory doubles.
    pub fn with_store(
        environment: Arc<EnvironmentVariables>,
        store: Arc<dyn TableStore>,
    ) -> Self {
        Self { environment, store }
    }
}
