use super::service::{file_report, list_reports};
use crate::db::models::{NewDailyReport, RecordQuery, ReportType};
use crate::error::AppError;
use crate::modules::fixtures::{ts, world};

fn report(report_type: ReportType, class_label: Option<&str>) -> NewDailyReport {
    NewDailyReport {
        report_type,
        class_label: class_label.map(str::to_string),
        topics: "Line-following robots".to_string(),
        summary: "Built and calibrated IR sensors".to_string(),
        notes: Some("  ".to_string()),
    }
}

#[tokio::test]
async fn class_reports_are_for_trainers_with_a_class() {
    let w = world().await;
    let now = ts("2025-04-06T09:10:00");

    let class_report = || report(ReportType::TrainerClass, Some("Grade 6A"));
    let filed = file_report(&w.store, &w.trainer, class_report(), now)
        .await
        .unwrap();
    assert_eq!(filed.school_id, Some(w.school.id));
    assert_eq!(filed.notes, None);

    assert!(matches!(
        file_report(&w.store, &w.trainer, report(ReportType::TrainerClass, None), now).await,
        Err(AppError::Validation(_))
    ));
    assert!(matches!(
        file_report(&w.store, &w.teacher, class_report(), now).await,
        Err(AppError::Authorization(_))
    ));
}

#[tokio::test]
async fn training_reports_are_for_teachers_and_trainers() {
    let w = world().await;
    let now = ts("2025-04-06T15:00:00");

    let filed = file_report(&w.store, &w.teacher, report(ReportType::TeacherTraining, None), now)
        .await
        .unwrap();
    assert_eq!(filed.author_id, w.teacher.id);
    assert!(file_report(&w.store, &w.trainer, report(ReportType::TeacherTraining, None), now)
        .await
        .is_ok());
    assert!(matches!(
        file_report(&w.store, &w.admin, report(ReportType::TeacherTraining, None), now).await,
        Err(AppError::Authorization(_))
    ));

    let mut blank = report(ReportType::TeacherTraining, None);
    blank.summary = String::new();
    assert!(matches!(
        file_report(&w.store, &w.teacher, blank, now).await,
        Err(AppError::Validation(_))
    ));
}

#[tokio::test]
async fn teachers_list_only_their_training_reports() {
    let w = world().await;
    let now = ts("2025-04-06T15:00:00");

    file_report(&w.store, &w.teacher, report(ReportType::TeacherTraining, None), now)
        .await
        .unwrap();
    file_report(&w.store, &w.trainer, report(ReportType::TeacherTraining, None), now)
        .await
        .unwrap();
    file_report(&w.store, &w.trainer, report(ReportType::TrainerClass, Some("Grade 6A")), now)
        .await
        .unwrap();

    let query = RecordQuery::default();
    let teacher_view = list_reports(&w.store, &w.teacher, &query).await.unwrap();
    assert_eq!(teacher_view.len(), 1);
    assert_eq!(teacher_view[0].author_id, w.teacher.id);

    let trainer_view = list_reports(&w.store, &w.trainer, &query).await.unwrap();
    assert_eq!(trainer_view.len(), 2);

    assert_eq!(list_reports(&w.store, &w.admin, &query).await.unwrap().len(), 3);
}
