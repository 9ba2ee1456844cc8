use uuid::Uuid;

use crate::db::models::{Session, User};
use crate::db::store::{encode, find_as, find_one_as, Collection, DocumentStore, Filter};
use crate::db::StoreError;

pub struct UserRepository;

impl UserRepository {
    pub async fn create_user(store: &dyn DocumentStore, user: &User) -> Result<(), StoreError> {
        store.insert(Collection::Users, user.id, encode(user)?).await
    }

    pub async fn get_user_by_id(
        store: &dyn DocumentStore,
        user_id: Uuid,
    ) -> Result<Option<User>, StoreError> {
        find_one_as(store, Collection::Users, &Filter::new().eq("id", user_id)).await
    }

    pub async fn get_user_by_email(
        store: &dyn DocumentStore,
        email: &str,
    ) -> Result<Option<User>, StoreError> {
        let filter = Filter::new().eq("email", email.to_lowercase());
        find_one_as(store, Collection::Users, &filter).await
    }

    /// Full listing; callers build lookup maps from it.
    pub async fn list_all(store: &dyn DocumentStore) -> Result<Vec<User>, StoreError> {
        find_as(store, Collection::Users, &Filter::new()).await
    }

    // Session specific functions

    pub async fn create_session(
        store: &dyn DocumentStore,
        session: &Session,
    ) -> Result<(), StoreError> {
        store
            .insert(Collection::Sessions, session.id, encode(session)?)
            .await
    }

    pub async fn get_session_by_token(
        store: &dyn DocumentStore,
        token: &str,
    ) -> Result<Option<Session>, StoreError> {
        find_one_as(store, Collection::Sessions, &Filter::new().eq("token", token)).await
    }
}
