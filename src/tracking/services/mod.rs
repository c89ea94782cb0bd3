//! Application services for task and person tracking.

mod directory;
mod lifecycle;
mod reporting;

pub use directory::{PersonDirectoryError, PersonDirectoryResult, PersonDirectoryService};
pub use lifecycle::{
    CreateTaskRequest, TaskLifecycleError, TaskLifecycleResult, TaskLifecycleService,
};
pub use reporting::{DepartmentReportRow, ReportError, ReportResult, ReportingService};
