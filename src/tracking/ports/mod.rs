//! Port contracts for task and person tracking.
//!
//! Ports define infrastructure-agnostic interfaces used by tracking services.

pub mod repository;

pub use repository::{
    PersonRepository, PersonRepositoryError, PersonRepositoryResult, TaskRepository,
    TaskRepositoryError, TaskRepositoryResult,
};

#[cfg(test)]
pub use repository::{MockPersonRepository, MockTaskRepository};
