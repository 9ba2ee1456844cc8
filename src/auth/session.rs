use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

use crate::auth::CallerContext;
use crate::clock::Clock;
use crate::db::repositories::UserRepository;
use crate::db::{DocumentStore, StoreError};

/// Resolves a bearer token into the caller it was issued to.
///
/// Returns `Ok(None)` for unknown or expired tokens.
#[async_trait]
pub trait SessionProvider: Send + Sync + 'static {
    async fn resolve(&self, token: &str) -> Result<Option<CallerContext>, StoreError>;
}

/// Reads sessions issued by the external credential provider from the store.
pub struct StoreSessionProvider {
    store: Arc<dyn DocumentStore>,
    clock: Arc<dyn Clock>,
}

impl StoreSessionProvider {
    pub fn new(store: Arc<dyn DocumentStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }
}

#[async_trait]
impl SessionProvider for StoreSessionProvider {
    async fn resolve(&self, token: &str) -> Result<Option<CallerContext>, StoreError> {
        let store = self.store.as_ref();
        let Some(session) = UserRepository::get_session_by_token(store, token).await? else {
            return Ok(None);
        };

        if session.is_expired(self.clock.now()) {
            debug!(session_id = %session.id, "Rejected expired session");
            return Ok(None);
        }

        let user = UserRepository::get_user_by_id(store, session.user_id).await?;
        if user.is_none() {
            debug!(
                session_id = %session.id,
                user_id = %session.user_id,
                "Session references a missing user"
            );
        }
        Ok(user.as_ref().map(CallerContext::from_user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};
    use uuid::Uuid;

    use crate::clock::FixedClock;
    use crate::db::models::{Session, User, UserRole};
    use crate::db::InMemoryDocumentStore;

    fn at(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 4, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    #[tokio::test]
    async fn resolves_live_sessions_and_rejects_expired_ones() {
        let store: Arc<dyn DocumentStore> = Arc::new(InMemoryDocumentStore::new());
        let clock = Arc::new(FixedClock::new(at(6, 9)));
        let user = User {
            id: Uuid::new_v4(),
            name: "Asha Menon".to_string(),
            email: "asha@school.test".to_string(),
            role: UserRole::Admin,
            school_id: None,
            created_at: at(1, 9),
        };
        UserRepository::create_user(store.as_ref(), &user).await.unwrap();
        UserRepository::create_session(
            store.as_ref(),
            &Session {
                id: Uuid::new_v4(),
                token: "live".to_string(),
                user_id: user.id,
                expires_at: Some(at(6, 10)),
            },
        )
        .await
        .unwrap();

        let provider = StoreSessionProvider::new(store.clone(), clock.clone());
        let caller = provider.resolve("live").await.unwrap().unwrap();
        assert_eq!(caller.id, user.id);
        assert_eq!(caller.role, UserRole::Admin);

        assert!(provider.resolve("unknown").await.unwrap().is_none());

        clock.set(at(6, 10));
        assert!(provider.resolve("live").await.unwrap().is_none());
    }
}
