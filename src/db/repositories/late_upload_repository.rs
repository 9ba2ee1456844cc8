use uuid::Uuid;

use crate::db::models::{DecisionRecord, LateUploadRequest, LateUploadStatus};
use crate::db::store::{encode, find_as, find_one_as, Collection, DocumentStore, Filter};
use crate::db::StoreError;

const COLLECTION: Collection = Collection::LateUploadRequests;

/// Result of a guarded insert.
#[derive(Debug, Clone, PartialEq)]
pub enum InsertOutcome {
    Inserted(LateUploadRequest),
    /// An existing `PENDING` or `APPROVED` request for the same trainer and month.
    Blocked(LateUploadRequest),
}

pub struct LateUploadRepository;

impl LateUploadRepository {
    pub async fn get_by_id(
        store: &dyn DocumentStore,
        id: Uuid,
    ) -> Result<Option<LateUploadRequest>, StoreError> {
        find_one_as(store, COLLECTION, &Filter::new().eq("id", id)).await
    }

    pub async fn find_for_month(
        store: &dyn DocumentStore,
        trainer_id: Uuid,
        month: &str,
        year: i32,
    ) -> Result<Vec<LateUploadRequest>, StoreError> {
        let filter = Filter::new()
            .eq("trainer_id", trainer_id)
            .eq("month", month)
            .eq("year", year);
        find_as(store, COLLECTION, &filter).await
    }

    /// Inserts `request` unless a blocking request already exists for its
    /// (trainer, month, year).
    ///
    /// This is a read-then-write with no guard between the two calls, so two
    /// concurrent submissions can both pass the check. A uniqueness
    /// constraint or transactional guard belongs here and nowhere else.
    pub async fn insert_if_unblocked(
        store: &dyn DocumentStore,
        request: LateUploadRequest,
    ) -> Result<InsertOutcome, StoreError> {
        let existing =
            Self::find_for_month(store, request.trainer_id, &request.month, request.year).await?;

        let blocking = existing
            .iter()
            .find(|r| r.status == LateUploadStatus::Approved)
            .or_else(|| existing.iter().find(|r| r.status.blocks_new_request()));
        if let Some(blocking) = blocking {
            return Ok(InsertOutcome::Blocked(blocking.clone()));
        }

        store
            .insert(COLLECTION, request.id, encode(&request)?)
            .await?;
        Ok(InsertOutcome::Inserted(request))
    }

    pub async fn record_decision(
        store: &dyn DocumentStore,
        id: Uuid,
        decision: &DecisionRecord,
    ) -> Result<bool, StoreError> {
        store.update_by_id(COLLECTION, id, encode(decision)?).await
    }

    pub async fn list(
        store: &dyn DocumentStore,
        filter: &Filter,
    ) -> Result<Vec<LateUploadRequest>, StoreError> {
        find_as(store, COLLECTION, filter).await
    }
}
