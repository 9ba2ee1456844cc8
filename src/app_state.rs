use chrono::NaiveDateTime;
use std::sync::Arc;

use crate::auth::{SessionProvider, StoreSessionProvider};
use crate::clock::Clock;
use crate::db::DocumentStore;
use crate::policy::DeadlinePolicy;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DocumentStore>,
    pub sessions: Arc<dyn SessionProvider>,
    pub clock: Arc<dyn Clock>,
    pub deadlines: DeadlinePolicy,
}

impl AppState {
    pub fn new(
        store: Arc<dyn DocumentStore>,
        clock: Arc<dyn Clock>,
        deadlines: DeadlinePolicy,
    ) -> Self {
        let sessions = Arc::new(StoreSessionProvider::new(store.clone(), clock.clone()));
        Self {
            store,
            sessions,
            clock,
            deadlines,
        }
    }

    pub fn now(&self) -> NaiveDateTime {
        self.clock.now()
    }
}
