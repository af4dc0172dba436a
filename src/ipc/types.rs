use crate::activity::ActivityLog;
use crate::config::Latency;
use crate::store::{SeedOptions, Store, StoreSource};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Request {
    pub id: String,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
}

pub struct AppState {
    pub store: Store,
    pub activity: ActivityLog,
    pub latency: Latency,
    /// Startup source; `store.reset` rebuilds from it unless told otherwise.
    pub source: StoreSource,
    pub seed: SeedOptions,
}

impl AppState {
    pub fn new(store: Store, source: StoreSource, seed: SeedOptions, latency: Latency) -> Self {
        Self {
            store,
            activity: ActivityLog::default(),
            latency,
            source,
            seed,
        }
    }
}
