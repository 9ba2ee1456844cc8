use chrono::NaiveDateTime;
use std::collections::HashSet;
use std::iter;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::auth::CallerContext;
use crate::db::models::{Meeting, MeetingAnalytics, MeetingClick, NewMeeting};
use crate::db::repositories::{MeetingRepository, SchoolRepository};
use crate::db::{DocumentStore, Filter};
use crate::error::{AppError, AppResult};

fn can_see(caller: &CallerContext, meeting: &Meeting) -> bool {
    caller.is_admin() || meeting.school_id.is_none() || meeting.school_id == caller.school_id
}

fn visible_filter(caller: &CallerContext) -> Filter {
    if caller.is_admin() {
        Filter::new()
    } else {
        let schools = iter::once(None).chain(caller.school_id.map(Some));
        Filter::new().is_in("school_id", schools)
    }
}

pub async fn schedule_meeting(
    store: &dyn DocumentStore,
    caller: &CallerContext,
    input: NewMeeting,
    now: NaiveDateTime,
) -> AppResult<Meeting> {
    caller.require_admin()?;
    input.validate()?;
    if let Some(school_id) = input.school_id {
        if SchoolRepository::get_school_by_id(store, school_id).await?.is_none() {
            return Err(AppError::NotFound("School not found".to_string()));
        }
    }

    let meeting = Meeting {
        id: Uuid::new_v4(),
        title: input.title.trim().to_string(),
        url: input.url,
        school_id: input.school_id,
        scheduled_at: input.scheduled_at,
        created_by: caller.id,
        created_at: now,
    };
    MeetingRepository::create_meeting(store, &meeting).await?;

    info!(meeting_id = %meeting.id, school_id = ?meeting.school_id, "Meeting scheduled");
    Ok(meeting)
}

/// Soonest first.
pub async fn list_meetings(
    store: &dyn DocumentStore,
    caller: &CallerContext,
) -> AppResult<Vec<Meeting>> {
    let mut meetings = MeetingRepository::list(store, &visible_filter(caller)).await?;
    meetings.sort_by(|a, b| a.scheduled_at.cmp(&b.scheduled_at).then_with(|| a.id.cmp(&b.id)));
    Ok(meetings)
}

/// Records that `caller` followed the meeting link.
pub async fn record_click(
    store: &dyn DocumentStore,
    caller: &CallerContext,
    meeting_id: Uuid,
    now: NaiveDateTime,
) -> AppResult<Meeting> {
    let meeting = MeetingRepository::get_meeting_by_id(store, meeting_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Meeting not found".to_string()))?;
    if !can_see(caller, &meeting) {
        return Err(AppError::Authorization(
            "This meeting is not open to your school".to_string(),
        ));
    }

    let click = MeetingClick {
        id: Uuid::new_v4(),
        meeting_id,
        user_id: caller.id,
        user_role: caller.role,
        school_id: caller.school_id,
        clicked_at: now,
    };
    MeetingRepository::record_click(store, &click).await?;
    Ok(meeting)
}

pub async fn meeting_analytics(
    store: &dyn DocumentStore,
    caller: &CallerContext,
) -> AppResult<Vec<MeetingAnalytics>> {
    caller.require_admin()?;

    let mut meetings = MeetingRepository::list(store, &Filter::new()).await?;
    meetings.sort_by(|a, b| b.scheduled_at.cmp(&a.scheduled_at).then_with(|| a.id.cmp(&b.id)));

    let mut analytics = Vec::with_capacity(meetings.len());
    for meeting in meetings {
        let total_clicks = MeetingRepository::count_clicks(store, meeting.id).await?;
        let clicks = MeetingRepository::clicks_for(store, meeting.id).await?;
        let unique_users = clicks.iter().map(|c| c.user_id).collect::<HashSet<_>>().len();
        analytics.push(MeetingAnalytics {
            meeting_id: meeting.id,
            title: meeting.title,
            scheduled_at: meeting.scheduled_at,
            total_clicks,
            unique_users,
            last_clicked_at: clicks.iter().map(|c| c.clicked_at).max(),
        });
    }
    Ok(analytics)
}
