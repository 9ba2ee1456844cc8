use uuid::Uuid;

use crate::db::models::{Meeting, MeetingClick};
use crate::db::store::{encode, find_as, find_one_as, Collection, DocumentStore, Filter};
use crate::db::StoreError;

pub struct MeetingRepository;

impl MeetingRepository {
    pub async fn create_meeting(
        store: &dyn DocumentStore,
        meeting: &Meeting,
    ) -> Result<(), StoreError> {
        store
            .insert(Collection::Meetings, meeting.id, encode(meeting)?)
            .await
    }

    pub async fn get_meeting_by_id(
        store: &dyn DocumentStore,
        meeting_id: Uuid,
    ) -> Result<Option<Meeting>, StoreError> {
        find_one_as(store, Collection::Meetings, &Filter::new().eq("id", meeting_id)).await
    }

    pub async fn list(
        store: &dyn DocumentStore,
        filter: &Filter,
    ) -> Result<Vec<Meeting>, StoreError> {
        find_as(store, Collection::Meetings, filter).await
    }

    pub async fn record_click(
        store: &dyn DocumentStore,
        click: &MeetingClick,
    ) -> Result<(), StoreError> {
        store
            .insert(Collection::MeetingClicks, click.id, encode(click)?)
            .await
    }

    pub async fn count_clicks(
        store: &dyn DocumentStore,
        meeting_id: Uuid,
    ) -> Result<u64, StoreError> {
        store
            .count(
                Collection::MeetingClicks,
                &Filter::new().eq("meeting_id", meeting_id),
            )
            .await
    }

    pub async fn clicks_for(
        store: &dyn DocumentStore,
        meeting_id: Uuid,
    ) -> Result<Vec<MeetingClick>, StoreError> {
        find_as(
            store,
            Collection::MeetingClicks,
            &Filter::new().eq("meeting_id", meeting_id),
        )
        .await
    }
}
