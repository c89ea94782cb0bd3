//! Task aggregate root and the task status lifecycle.

use super::{ParseTaskStatusError, PersonId, TaskId};
use chrono::{DateTime, NaiveDate, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Task lifecycle status.
///
/// The nominal flow is `Idle → Active → {Completed, Cancelled}`, but any
/// requested status is accepted for any current status; `Completed` and
/// `Cancelled` are terminal only in the sense that they stamp the finish
/// timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Task has been created but work has not started.
    Idle,
    /// Task is being worked on.
    Active,
    /// Task has been completed.
    Completed,
    /// Task has been called off.
    Cancelled,
}

impl TaskStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Active => "active",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Returns whether this status stamps the finish timestamp.
    #[must_use]
    pub const fn is_finishing(self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "idle" => Ok(Self::Idle),
            "active" => Ok(Self::Active),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(ParseTaskStatusError(value.to_owned())),
        }
    }
}

/// Descriptive fields captured when a task is created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskDetails {
    /// Short task title.
    pub title: String,
    /// Longer free-text description.
    pub description: String,
    /// Calendar date the task is due.
    pub deadline: NaiveDate,
    /// Department the task belongs to.
    pub department: String,
    /// Planned effort in minutes.
    pub planned_minutes: u32,
}

impl TaskDetails {
    /// Creates task details from the mandatory descriptive fields.
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
        }
    }
}

/// Statistics update owed to an assignee after a first-time completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompletionRecord {
    /// Person whose statistics must absorb the completion.
    pub person_id: PersonId,
    /// Elapsed active-to-finished time in whole minutes, truncated.
    pub duration_minutes: i64,
}

/// Task aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    details: TaskDetails,
    status: TaskStatus,
    active_at: Option<DateTime<Utc>>,
    finished_at: Option<DateTime<Utc>>,
    assigned_person: Option<PersonId>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted descriptive fields.
    pub details: TaskDetails,
    /// Persisted lifecycle status.
    pub status: TaskStatus,
    /// Persisted activation timestamp, if any.
    pub active_at: Option<DateTime<Utc>>,
    /// Persisted finish timestamp, if any.
    pub finished_at: Option<DateTime<Utc>>,
    /// Persisted assignee, if any.
    pub assigned_person: Option<PersonId>,
}

impl Task {
    /// Creates a new unassigned task in the `Idle` status.
    #[must_use]
    pub fn new(details: TaskDetails) -> Self {
        Self {
            id: TaskId::new(),
            details,
            status: TaskStatus::Idle,
            active_at: None,
            finished_at: None,
            assigned_person: None,
        }
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            details: data.details,
            status: data.status,
            active_at: data.active_at,
            finished_at: data.finished_at,
            assigned_person: data.assigned_person,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the descriptive fields.
    #[must_use]
    pub const fn details(&self) -> &TaskDetails {
        &self.details
    }

    /// Returns the task title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.details.title
    }

    /// Returns the department the task belongs to.
    #[must_use]
    pub fn department(&self) -> &str {
        &self.details.department
    }

    /// Returns the deadline date.
    #[must_use]
    pub const fn deadline(&self) -> NaiveDate {
        self.details.deadline
    }

    /// Returns the current lifecycle status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the activation timestamp, if the task has been active.
    #[must_use]
    pub const fn active_at(&self) -> Option<DateTime<Utc>> {
        self.active_at
    }

    /// Returns the finish timestamp, if the task has finished.
    #[must_use]
    pub const fn finished_at(&self) -> Option<DateTime<Utc>> {
        self.finished_at
    }

    /// Returns the assigned person, if any.
    #[must_use]
    pub const fn assigned_person(&self) -> Option<PersonId> {
        self.assigned_person
    }

    /// Assigns the task to a person, replacing any previous assignee.
    ///
    /// No status validation is applied; reassigning a completed task is
    /// permitted and produces no statistics correction.
    pub fn assign_to(&mut self, person_id: PersonId) {
        self.assigned_person = Some(person_id);
    }

    /// Applies a requested status and stamps lifecycle timestamps.
    ///
    /// Any target status is accepted regardless of the current status.
    /// Moving to `Active` stamps the activation timestamp; moving to
    /// `Completed` or `Cancelled` stamps the finish timestamp. Repeated
    /// transitions overwrite the stamps. Returns the status the task held
    /// before the change, which gates statistics aggregation.
    pub fn transition_to(&mut self, status: TaskStatus, clock: &impl Clock) -> TaskStatus {
        let previous = self.status;
        self.status = status;
        if status == TaskStatus::Active {
            self.active_at = Some(clock.utc());
        } else if status.is_finishing() {
            self.finished_at = Some(clock.utc());
        }
        previous
    }

    /// Returns the statistics update owed after a transition, if any.
    ///
    /// A completion is recorded exactly once: the task must now be
    /// `Completed`, must not have been `Completed` before, must have an
    /// assignee, and must carry both lifecycle timestamps. Cancellations,
    /// repeated completions, unassigned tasks, and tasks completed without
    /// ever being activated all yield `None`.
    #[must_use]
    pub fn completion_to_record(&self, previous: TaskStatus) -> Option<CompletionRecord> {
        if self.status != TaskStatus::Completed || previous == TaskStatus::Completed {
            return None;
        }
        let person_id = self.assigned_person?;
        let active_at = self.active_at?;
        let finished_at = self.finished_at?;
        let duration_minutes = (finished_at - active_at).num_minutes();
        Some(CompletionRecord {
            person_id,
            duration_minutes,
        })
    }
}
