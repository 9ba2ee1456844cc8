mod attendance;
mod daily_report;
mod late_upload_request;
mod meeting;
mod school;
mod session;
mod uploaded_sheet;
mod user;

pub use attendance::*;
pub use daily_report::*;
pub use late_upload_request::*;
pub use meeting::*;
pub use school::*;
pub use session::*;
pub use uploaded_sheet::*;
pub use user::*;
