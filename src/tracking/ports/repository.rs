//! Repository ports for task and person persistence.

use crate::tracking::domain::{CompletionRecord, Person, PersonId, Task, TaskId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Result type for person repository operations.
pub type PersonRepositoryResult<T> = Result<T, PersonRepositoryError>;

/// Task persistence contract.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores a new task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::DuplicateTask`] when the task ID
    /// already exists.
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Persists changes to an existing task (status, timestamps, assignee).
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not
    /// exist.
    async fn update(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Persists a completed task and folds the completion into the
    /// assignee's statistics as one atomic unit.
    ///
    /// Implementations must execute the person read, the
    /// [`Person::record_completion`] fold, and both writes inside a single
    /// critical section keyed at least on the person, so that concurrent
    /// completions for the same person can never fold against a stale
    /// snapshot and lose an increment. Either both records are written or
    /// neither is: a task must never be left completed against an
    /// un-incremented statistic. Returns the updated person.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not
    /// exist, or [`TaskRepositoryError::AssigneeNotFound`] when the person
    /// does not; in both cases no write occurs.
    async fn update_recording_completion(
        &self,
        task: &Task,
        completion: CompletionRecord,
    ) -> TaskRepositoryResult<Person>;

    /// Finds a task by identifier.
    ///
    /// Returns `None` when the task does not exist.
    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>>;

    /// Removes a task. Removing an absent task is not an error.
    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()>;

    /// Returns all tasks belonging to the given department.
    async fn find_by_department(&self, department: &str) -> TaskRepositoryResult<Vec<Task>>;

    /// Returns all tasks ordered by deadline, most distant first.
    async fn list_by_deadline_desc(&self) -> TaskRepositoryResult<Vec<Task>>;
}

/// Person persistence contract.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PersonRepository: Send + Sync {
    /// Stores a new person.
    ///
    /// # Errors
    ///
    /// Returns [`PersonRepositoryError::DuplicatePerson`] when the person ID
    /// already exists.
    async fn store(&self, person: &Person) -> PersonRepositoryResult<()>;

    /// Persists changes to an existing person.
    ///
    /// # Errors
    ///
    /// Returns [`PersonRepositoryError::NotFound`] when the person does not
    /// exist.
    async fn update(&self, person: &Person) -> PersonRepositoryResult<()>;

    /// Finds a person by identifier.
    ///
    /// Returns `None` when the person does not exist.
    async fn find_by_id(&self, id: PersonId) -> PersonRepositoryResult<Option<Person>>;

    /// Returns all persons.
    async fn list_all(&self) -> PersonRepositoryResult<Vec<Person>>;

    /// Returns all persons belonging to the given department.
    async fn find_by_department(&self, department: &str) -> PersonRepositoryResult<Vec<Person>>;

    /// Removes a person together with every task assigned to them.
    ///
    /// Ownership cascades person-to-task; removing an absent person is not
    /// an error.
    async fn delete(&self, id: PersonId) -> PersonRepositoryResult<()>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// A task with the same identifier already exists.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// The assignee to be written alongside the task was not found.
    #[error("assigned person not found: {0}")]
    AssigneeNotFound(PersonId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}

/// Errors returned by person repository implementations.
#[derive(Debug, Clone, Error)]
pub enum PersonRepositoryError {
    /// A person with the same identifier already exists.
    #[error("duplicate person identifier: {0}")]
    DuplicatePerson(PersonId),

    /// The person was not found.
    #[error("person not found: {0}")]
    NotFound(PersonId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl PersonRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
