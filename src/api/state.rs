use std::sync::Arc;

use crate::storage::MatchStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<MatchStore>,
}

impl AppState {
    pub fn new(store: MatchStore) -> Self {
        Self {
            store: Arc::new(store),
        }
    }
}
