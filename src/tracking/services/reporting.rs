//! Service layer for task listings and free-text reports.

use crate::tracking::{
    domain::{Person, Task, TaskStatus},
    ports::{
        PersonRepository, PersonRepositoryError, TaskRepository, TaskRepositoryError,
    },
};
use minijinja::Environment;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::sync::Arc;
use thiserror::Error;

/// One rendered line block per task: title, deadline, assignment status and,
/// for assigned tasks, the assignee's cumulative minutes spent.
const SUMMARY_TEMPLATE: &str = "Title: {{ title }}\n Deadline: {{ deadline }}\n Status: \
{% if assignee %}Forwarded to {{ assignee }}\n Estimated minutes spent: {{ minutes_spent }}\
{% else %}Pending{% endif %}";

/// Service-level errors for reporting operations.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Task repository operation failed.
    #[error(transparent)]
    TaskRepository(#[from] TaskRepositoryError),

    /// Person repository operation failed.
    #[error(transparent)]
    PersonRepository(#[from] PersonRepositoryError),

    /// Summary template rendering failed.
    #[error("failed to render task summary: {reason}")]
    TemplateRender {
        /// Human-readable renderer failure.
        reason: String,
    },
}

/// Result type for reporting service operations.
pub type ReportResult<T> = Result<T, ReportError>;

/// Per-department completion counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepartmentReportRow {
    /// Department name.
    pub department: String,
    /// Number of tasks in the `Completed` status.
    pub completed: u32,
    /// Number of tasks in any other status.
    pub outstanding: u32,
}

/// Read-only reporting over tasks and their assignees.
#[derive(Clone)]
pub struct ReportingService<T, P>
where
    T: TaskRepository,
    P: PersonRepository,
{
    tasks: Arc<T>,
    persons: Arc<P>,
}

impl<T, P> ReportingService<T, P>
where
    T: TaskRepository,
    P: PersonRepository,
{
    /// Creates a new reporting service.
    #[must_use]
    pub const fn new(tasks: Arc<T>, persons: Arc<P>) -> Self {
        Self { tasks, persons }
    }

    /// Returns all tasks in the given department.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::TaskRepository`] when persistence lookup
    /// fails.
    pub async fn tasks_by_department(&self, department: &str) -> ReportResult<Vec<Task>> {
        Ok(self.tasks.find_by_department(department).await?)
    }

    /// Renders one free-text summary per task, ordered by deadline with the
    /// most distant deadline first.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::TemplateRender`] when the summary template
    /// fails to render, or a repository error when lookup fails.
    pub async fn task_summaries(&self) -> ReportResult<Vec<String>> {
        let tasks = self.tasks.list_by_deadline_desc().await?;
        let mut summaries = Vec::with_capacity(tasks.len());
        for task in tasks {
            let assignee = match task.assigned_person() {
                Some(person_id) => self.persons.find_by_id(person_id).await?,
                None => None,
            };
            summaries.push(render_summary(&task, assignee.as_ref())?);
        }
        Ok(summaries)
    }

    /// Returns per-department counts of completed versus outstanding tasks,
    /// ordered by department name.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::TaskRepository`] when persistence lookup
    /// fails.
    pub async fn department_report(&self) -> ReportResult<Vec<DepartmentReportRow>> {
        let tasks = self.tasks.list_by_deadline_desc().await?;
        let mut counts: BTreeMap<String, (u32, u32)> = BTreeMap::new();
        for task in tasks {
            let entry = counts.entry(task.department().to_owned()).or_default();
            if task.status() == TaskStatus::Completed {
                entry.0 += 1;
            } else {
                entry.1 += 1;
            }
        }
        Ok(counts
            .into_iter()
            .map(|(department, (completed, outstanding))| DepartmentReportRow {
                department,
                completed,
                outstanding,
            })
            .collect())
    }
}

fn render_summary(task: &Task, assignee: Option<&Person>) -> Result<String, ReportError> {
    let environment = Environment::new();
    let context = build_summary_context(task, assignee);
    environment
        .render_str(SUMMARY_TEMPLATE, context)
        .map_err(|error| ReportError::TemplateRender {
            reason: error.to_string(),
        })
}

fn build_summary_context(task: &Task, assignee: Option<&Person>) -> Map<String, Value> {
    let mut context = Map::new();
    context.insert("title".to_owned(), Value::String(task.title().to_owned()));
    context.insert(
        "deadline".to_owned(),
        Value::String(task.deadline().to_string()),
    );
    if let Some(person) = assignee {
        context.insert(
            "assignee".to_owned(),
            Value::String(person.name().to_owned()),
        );
        context.insert(
            "minutes_spent".to_owned(),
            Value::from(person.minutes_spent()),
        );
    }
    context
}
