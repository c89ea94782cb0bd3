//! Person aggregate root and incremental completion statistics.

use super::PersonId;
use serde::{Deserialize, Serialize};

/// Person aggregate root.
///
/// Carries a derived, incrementally maintained aggregate: the average
/// duration (in minutes) of exactly the tasks counted in
/// `total_tasks_completed`. No per-task duration history is retained once a
/// completion is folded in, so the aggregate cannot be rebuilt from a query;
/// the two fields only ever move together through
/// [`Person::record_completion`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    id: PersonId,
    name: String,
    department: String,
    average_task_duration: f64,
    total_tasks_completed: u32,
}

/// Parameter object for reconstructing a persisted person aggregate.
#[derive(Debug, Clone, PartialEq)]
pub struct PersistedPersonData {
    /// Persisted person identifier.
    pub id: PersonId,
    /// Persisted display name.
    pub name: String,
    /// Persisted department.
    pub department: String,
    /// Persisted average completed-task duration in minutes.
    pub average_task_duration: f64,
    /// Persisted completed-task count.
    pub total_tasks_completed: u32,
}

impl Person {
    /// Creates a new person with zeroed completion statistics.
    #[must_use]
    pub fn new(name: impl Into<String>, department: impl Into<String>) -> Self {
        Self {
            id: PersonId::new(),
            name: name.into(),
            department: department.into(),
            average_task_duration: 0.0,
            total_tasks_completed: 0,
        }
    }

    /// Reconstructs a person from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedPersonData) -> Self {
        Self {
            id: data.id,
            name: data.name,
            department: data.department,
            average_task_duration: data.average_task_duration,
            total_tasks_completed: data.total_tasks_completed,
        }
    }

    /// Returns the person identifier.
    #[must_use]
    pub const fn id(&self) -> PersonId {
        self.id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the department.
    #[must_use]
    pub fn department(&self) -> &str {
        &self.department
    }

    /// Returns the average completed-task duration in minutes.
    #[must_use]
    pub const fn average_task_duration(&self) -> f64 {
        self.average_task_duration
    }

    /// Returns the number of completed tasks folded into the average.
    #[must_use]
    pub const fn total_tasks_completed(&self) -> u32 {
        self.total_tasks_completed
    }

    /// Returns the cumulative minutes spent across counted completions.
    #[must_use]
    pub fn minutes_spent(&self) -> f64 {
        self.average_task_duration * f64::from(self.total_tasks_completed)
    }

    /// Overwrites the mutable profile fields, leaving statistics untouched.
    pub fn update_details(&mut self, name: impl Into<String>, department: impl Into<String>) {
        self.name = name.into();
        self.department = department.into();
    }

    /// Folds one completed task of the given duration into the statistics.
    ///
    /// Incremental mean, O(1), no history retained: with a prior count of
    /// zero the new average equals the duration exactly. The caller is
    /// responsible for persisting the mutated person. Negative durations
    /// (activation stamped after the finish) are folded in unchecked.
    #[expect(
        clippy::cast_precision_loss,
        reason = "task durations in minutes sit far below 2^53"
    )]
    pub fn record_completion(&mut self, duration_minutes: i64) {
        let previous_total = f64::from(self.total_tasks_completed);
        let new_total = self.total_tasks_completed + 1;
        self.average_task_duration = (self.average_task_duration * previous_total
            + duration_minutes as f64)
            / f64::from(new_total);
        self.total_tasks_completed = new_total;
    }
}
