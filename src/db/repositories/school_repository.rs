use uuid::Uuid;

use crate::db::models::School;
use crate::db::store::{encode, find_as, find_one_as, Collection, DocumentStore, Filter};
use crate::db::StoreError;

const COLLECTION: Collection = Collection::Schools;

pub struct SchoolRepository;

impl SchoolRepository {
    pub async fn create_school(
        store: &dyn DocumentStore,
        school: &School,
    ) -> Result<(), StoreError> {
        store.insert(COLLECTION, school.id, encode(school)?).await
    }

    pub async fn get_school_by_id(
        store: &dyn DocumentStore,
        school_id: Uuid,
    ) -> Result<Option<School>, StoreError> {
        find_one_as(store, COLLECTION, &Filter::new().eq("id", school_id)).await
    }

    /// Full listing; callers build lookup maps from it.
    pub async fn list_all(store: &dyn DocumentStore) -> Result<Vec<School>, StoreError> {
        find_as(store, COLLECTION, &Filter::new()).await
    }
}
