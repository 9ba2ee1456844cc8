pub mod access;
pub mod deadline;

pub use access::{scope_for, AccessScope, Listing};
pub use deadline::{DeadlinePolicy, InvalidMonth, ReportingMonth};
