// Application state shared across all modules

use super::store::Store;

/// Application state: the injected store handle
#[derive(Clone)]
pub struct AppState {
    pub store: Store,
}
