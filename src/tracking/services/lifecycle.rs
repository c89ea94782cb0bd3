//! Service layer for the task lifecycle and completion statistics.
//!
//! [`TaskLifecycleService`] owns the status state machine: it decides which
//! timestamps a transition stamps and whether the assignee's statistics must
//! absorb the completion. The statistics fold itself lives on the
//! [`Person`](crate::tracking::domain::Person) aggregate; on a first-time
//! completion the service hands the repository a
//! [`CompletionRecord`](crate::tracking::domain::CompletionRecord) and the
//! repository applies the fold and commits both records inside its own
//! critical section.

use crate::tracking::{
    domain::{PersonId, Task, TaskDetails, TaskId, TaskStatus},
    ports::{
        PersonRepository, PersonRepositoryError, TaskRepository, TaskRepositoryError,
    },
};
use chrono::NaiveDate;
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    title: String,
    description: String,
    deadline: NaiveDate,
    department: String,
    planned_minutes: u32,
    assignee: Option<PersonId>,
}

impl CreateTaskRequest {
    /// Creates a request with the mandatory task fields.
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        deadline: NaiveDate,
        department: impl Into<String>,
        planned_minutes: u32,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            deadline,
            department: department.into(),
            planned_minutes,
            assignee: None,
        }
    }

    /// Sets the person the task is created against.
    #[must_use]
    pub const fn with_assignee(mut self, person_id: PersonId) -> Self {
        self.assignee = Some(person_id);
        self
    }
}

/// Service-level errors for task lifecycle operations.
#[derive(Debug, Error)]
pub enum TaskLifecycleError {
    /// The referenced task does not exist.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),

    /// The referenced person does not exist. Raised distinctly from
    /// [`TaskLifecycleError::TaskNotFound`] so callers can tell a missing
    /// assignee apart from a missing task.
    #[error("person not found: {0}")]
    PersonNotFound(PersonId),

    /// Task repository operation failed.
    #[error(transparent)]
    TaskRepository(#[from] TaskRepositoryError),

    /// Person repository operation failed.
    #[error(transparent)]
    PersonRepository(#[from] PersonRepositoryError),
}

/// Result type for task lifecycle service operations.
pub type TaskLifecycleResult<T> = Result<T, TaskLifecycleError>;

/// Task lifecycle orchestration service.
pub struct TaskLifecycleService<T, P, C>
where
    T: TaskRepository,
    P: PersonRepository,
    C: Clock + Send + Sync,
{
    tasks: Arc<T>,
    persons: Arc<P>,
    clock: Arc<C>,
}

// Hand-written so cloning the service never demands `Clone` of the
// repositories or the clock themselves; only the `Arc` handles are cloned.
impl<T, P, C> Clone for TaskLifecycleService<T, P, C>
where
    T: TaskRepository,
    P: PersonRepository,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            tasks: Arc::clone(&self.tasks),
            persons: Arc::clone(&self.persons),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<T, P, C> TaskLifecycleService<T, P, C>
where
    T: TaskRepository,
    P: PersonRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new task lifecycle service.
    #[must_use]
    pub const fn new(tasks: Arc<T>, persons: Arc<P>, clock: Arc<C>) -> Self {
        Self {
            tasks,
            persons,
            clock,
        }
    }

    /// Creates a task in the `Idle` status, optionally assigned.
    ///
    /// When the request names an assignee, the person must resolve before
    /// anything is persisted; a dangling person id fails the whole
    /// operation and the task is not stored.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::PersonNotFound`] when the requested
    /// assignee does not exist, or a repository error when persistence
    /// fails.
    pub async fn create(&self, request: CreateTaskRequest) -> TaskLifecycleResult<Task> {
        let CreateTaskRequest {
            title,
            description,
            deadline,
            department,
            planned_minutes,
            assignee,
        } = request;

        let mut task = Task::new(TaskDetails::new(
            title,
            description,
            deadline,
            department,
            planned_minutes,
        ));
        if let Some(person_id) = assignee {
            self.persons
                .find_by_id(person_id)
                .await?
                .ok_or(TaskLifecycleError::PersonNotFound(person_id))?;
            task.assign_to(person_id);
        }
        self.tasks.store(&task).await?;
        Ok(task)
    }

    /// Applies a requested status to a task.
    ///
    /// Stamps the activation timestamp on `Active` and the finish timestamp
    /// on `Completed` or `Cancelled` (repeated transitions overwrite the
    /// stamps). When the task arrives at `Completed` for the first time and
    /// carries an assignee plus both timestamps, the assignee's statistics
    /// absorb the elapsed duration and both records commit atomically;
    /// retried completions only re-stamp the finish time and never
    /// double-count. Returns the updated task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::TaskNotFound`] when the task id does
    /// not resolve (no write occurs), or a repository error when persistence
    /// fails — including
    /// [`AssigneeNotFound`](TaskRepositoryError::AssigneeNotFound) when the
    /// recorded assignee has vanished by commit time.
    pub async fn transition_status(
        &self,
        task_id: TaskId,
        status: TaskStatus,
    ) -> TaskLifecycleResult<Task> {
        let mut task = self
            .tasks
            .find_by_id(task_id)
            .await?
            .ok_or(TaskLifecycleError::TaskNotFound(task_id))?;

        let previous = task.transition_to(status, &*self.clock);

        if let Some(record) = task.completion_to_record(previous) {
            self.tasks.update_recording_completion(&task, record).await?;
        } else {
            self.tasks.update(&task).await?;
        }
        Ok(task)
    }

    /// Replaces the task's assignee unconditionally.
    ///
    /// No status validation is applied: reassigning a completed task is
    /// permitted and produces no statistics correction.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::TaskNotFound`] or
    /// [`TaskLifecycleError::PersonNotFound`] when either id does not
    /// resolve, or a repository error when persistence fails.
    pub async fn assign_person(
        &self,
        task_id: TaskId,
        person_id: PersonId,
    ) -> TaskLifecycleResult<Task> {
        let mut task = self
            .tasks
            .find_by_id(task_id)
            .await?
            .ok_or(TaskLifecycleError::TaskNotFound(task_id))?;
        self.persons
            .find_by_id(person_id)
            .await?
            .ok_or(TaskLifecycleError::PersonNotFound(person_id))?;

        task.assign_to(person_id);
        self.tasks.update(&task).await?;
        Ok(task)
    }

    /// Finds a task by identifier.
    ///
    /// Returns `Ok(None)` when no task has the given id.
    ///
    /// # Errors
    ///
    /// Returns a repository error when persistence lookup fails.
    pub async fn find_by_id(&self, task_id: TaskId) -> TaskLifecycleResult<Option<Task>> {
        Ok(self.tasks.find_by_id(task_id).await?)
    }

    /// Removes a task. Removing an absent task succeeds silently.
    ///
    /// # Errors
    ///
    /// Returns a repository error when persistence fails.
    pub async fn delete(&self, task_id: TaskId) -> TaskLifecycleResult<()> {
        Ok(self.tasks.delete(task_id).await?)
    }
}
