use crate::db::models::AttendanceRecord;
use crate::db::store::{encode, find_as, Collection, DocumentStore, Filter};
use crate::db::StoreError;

const COLLECTION: Collection = Collection::Attendance;

pub struct AttendanceRepository;

impl AttendanceRepository {
    pub async fn create_record(
        store: &dyn DocumentStore,
        record: &AttendanceRecord,
    ) -> Result<(), StoreError> {
        store.insert(COLLECTION, record.id, encode(record)?).await
    }

    pub async fn list(
        store: &dyn DocumentStore,
        filter: &Filter,
    ) -> Result<Vec<AttendanceRecord>, StoreError> {
        find_as(store, COLLECTION, filter).await
    }
}
