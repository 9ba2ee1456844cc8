mod attendance_repository;
mod late_upload_repository;
mod meeting_repository;
mod report_repository;
mod school_repository;
mod sheet_repository;
mod user_repository;

pub use attendance_repository::AttendanceRepository;
pub use late_upload_repository::{InsertOutcome, LateUploadRepository};
pub use meeting_repository::MeetingRepository;
pub use report_repository::ReportRepository;
pub use school_repository::SchoolRepository;
pub use sheet_repository::SheetRepository;
pub use user_repository::UserRepository;
