use std::sync::Arc;

use agenda_core::EventManager;
use tokio::sync::{Mutex, MutexGuard};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    // One manager for the process; each request holds the lock for its whole
    // read-validate-write pass over the document.
    manager: Arc<Mutex<EventManager>>,
}

impl AppState {
    pub fn new(manager: EventManager) -> Self {
        AppState {
            manager: Arc::new(Mutex::new(manager)),
        }
    }

    pub async fn manager(&self) -> MutexGuard<'_, EventManager> {
        self.manager.lock().await
    }
}
