use super::service::{list_sheets, register_sheet, upload_status};
use crate::db::models::{
    LateUploadDecision, LateUploadStatus, NewLateUploadRequest, NewUploadedSheet,
    UploadedSheetQuery, UserRole,
};
use crate::error::{AppError, RuleCode};
use crate::modules::fixtures::{add_school, add_user, ts, world};
use crate::modules::late_uploads::service::{decide_late_request, submit_late_request};
use crate::policy::DeadlinePolicy;

fn sheet(month: &str) -> NewUploadedSheet {
    NewUploadedSheet {
        month: month.to_string(),
        year: month[..4].parse().unwrap(),
        file_url: format!("https://files.test/{month}.pdf"),
        file_name: format!("{month}.pdf"),
        file_size: 48_213,
    }
}

#[tokio::test]
async fn upload_inside_the_window_is_direct() {
    let w = world().await;
    let policy = DeadlinePolicy::default();

    let uploaded = register_sheet(
        &w.store,
        &policy,
        &w.trainer,
        sheet("2025-03"),
        ts("2025-04-05T18:00:00"),
    )
    .await
    .unwrap();
    assert_eq!(uploaded.late_request_id, None);
    assert_eq!(uploaded.school_id, w.school.id);
    assert_eq!(uploaded.school_name, "Green Valley School");
}

#[tokio::test]
async fn late_upload_requires_an_approved_request() {
    let w = world().await;
    let policy = DeadlinePolicy::default();
    let now = ts("2025-04-06T10:00:00");

    let err = register_sheet(&w.store, &policy, &w.trainer, sheet("2025-03"), now)
        .await
        .unwrap_err();
    assert_eq!(err.code(), Some(RuleCode::DeadlinePassed));

    let request = submit_late_request(
        &w.store,
        &policy,
        &w.trainer,
        NewLateUploadRequest {
            month: "2025-03".to_string(),
            year: 2025,
            reason: "Was on sick leave all week".to_string(),
        },
        now,
    )
    .await
    .unwrap();

    let status = upload_status(&w.store, &policy, &w.trainer, "2025-03", now).await.unwrap();
    assert!(!status.window_open);
    assert!(!status.can_upload);
    assert_eq!(status.late_request_status, Some(LateUploadStatus::Pending));
    assert_eq!(status.deadline.to_string(), "2025-04-05 23:59:59.999");

    let err = register_sheet(&w.store, &policy, &w.trainer, sheet("2025-03"), now)
        .await
        .unwrap_err();
    assert_eq!(err.code(), Some(RuleCode::DeadlinePassed));

    decide_late_request(
        &w.store,
        &w.admin,
        request.id,
        LateUploadDecision {
            status: LateUploadStatus::Approved,
        },
        now,
    )
    .await
    .unwrap();

    let status = upload_status(&w.store, &policy, &w.trainer, "2025-03", now).await.unwrap();
    assert!(status.can_upload);

    let uploaded = register_sheet(&w.store, &policy, &w.trainer, sheet("2025-03"), now)
        .await
        .unwrap();
    assert_eq!(uploaded.late_request_id, Some(request.id));
}

#[tokio::test]
async fn registration_validates_input() {
    let w = world().await;
    let policy = DeadlinePolicy::default();
    let now = ts("2025-04-02T10:00:00");

    let mut empty = sheet("2025-03");
    empty.file_size = 0;
    empty.file_name = String::new();
    match register_sheet(&w.store, &policy, &w.trainer, empty, now).await.unwrap_err() {
        AppError::Validation(errors) => {
            let fields = errors.field_errors();
            assert!(fields.contains_key("file_size"));
            assert!(fields.contains_key("file_name"));
        }
        other => panic!("expected validation error, got {other:?}"),
    }

    let err = register_sheet(&w.store, &policy, &w.admin, sheet("2025-03"), now)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Authorization(_)));
}

#[tokio::test]
async fn sheet_and_status_reject_months_the_window_check_rejects() {
    let w = world().await;
    let policy = DeadlinePolicy::default();
    let now = ts("2025-04-02T10:00:00");

    for month in [" 2025-03", "2025-03 ", "2025-3"] {
        assert!(policy.is_submission_window_open(month, now).is_err());

        let err = upload_status(&w.store, &policy, &w.trainer, month, now)
            .await
            .unwrap_err();
        match err {
            AppError::Validation(errors) => assert!(errors.field_errors().contains_key("month")),
            other => panic!("expected validation error for {month:?}, got {other:?}"),
        }

        let mut padded = sheet("2025-03");
        padded.month = month.to_string();
        let err = register_sheet(&w.store, &policy, &w.trainer, padded, now)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    let mut mismatched = sheet("2025-03");
    mismatched.year = 2024;
    mismatched.file_url = String::new();
    match register_sheet(&w.store, &policy, &w.trainer, mismatched, now).await.unwrap_err() {
        AppError::Validation(errors) => {
            let fields = errors.field_errors();
            assert!(fields.contains_key("year"));
            assert!(fields.contains_key("file_url"));
        }
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[tokio::test]
async fn teachers_see_their_school_and_trainers_their_own() {
    let w = world().await;
    let policy = DeadlinePolicy::default();
    let now = ts("2025-04-02T10:00:00");
    let elsewhere = add_school(&w.store, "Riverside Academy").await;
    let colleague =
        add_user(&w.store, "Meera Iyer", UserRole::TrainerSchool, Some(w.school.id)).await;
    let outsider =
        add_user(&w.store, "Karan Das", UserRole::TrainerSchool, Some(elsewhere.id)).await;

    for trainer in [&w.trainer, &colleague, &outsider] {
        register_sheet(&w.store, &policy, trainer, sheet("2025-03"), now)
            .await
            .unwrap();
    }

    let query = UploadedSheetQuery::default();
    assert_eq!(list_sheets(&w.store, &w.admin, &query).await.unwrap().len(), 3);
    assert_eq!(list_sheets(&w.store, &w.teacher, &query).await.unwrap().len(), 2);

    let own = list_sheets(&w.store, &w.trainer, &query).await.unwrap();
    assert_eq!(own.len(), 1);
    assert_eq!(own[0].trainer_id, w.trainer.id);

    // A teacher's school pin wins over a requested school.
    let other_school = UploadedSheetQuery {
        school_id: Some(elsewhere.id),
        ..UploadedSheetQuery::default()
    };
    let pinned = list_sheets(&w.store, &w.teacher, &other_school).await.unwrap();
    assert!(pinned.iter().all(|s| s.school_id == w.school.id));
}
