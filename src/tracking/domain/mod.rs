//! Domain model for task and person tracking.
//!
//! The tracking domain models task lifecycle transitions, task-to-person
//! assignment, and the incremental completion statistics carried by each
//! person, while keeping all infrastructure concerns outside of the domain
//! boundary.

mod error;
mod ids;
mod person;
mod task;

pub use error::ParseTaskStatusError;
pub use ids::{PersonId, TaskId};
pub use person::{PersistedPersonData, Person};
pub use task::{CompletionRecord, PersistedTaskData, Task, TaskDetails, TaskStatus};
