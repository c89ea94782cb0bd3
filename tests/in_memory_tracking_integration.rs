//! Behavioural integration tests for [`InMemoryTrackingStore`].
//!
//! These tests exercise the in-memory store through the tracking services in
//! realistic higher-level flows: seeding people, driving tasks through their
//! lifecycle, folding completions into per-person statistics, rendering
//! reports, and cascading person deletion.

#![expect(
    clippy::expect_used,
    reason = "Test code uses expect for assertion clarity"
)]
#![expect(
    clippy::cognitive_complexity,
    reason = "Test functions may have higher complexity for full scenario coverage"
)]

mod test_helpers;

use std::sync::Arc;

use chrono::NaiveDate;
use taskdb::tracking::{
    adapters::memory::InMemoryTrackingStore,
    domain::{CompletionRecord, PersonId, TaskStatus},
    ports::{TaskRepository, TaskRepositoryError},
    services::{
        CreateTaskRequest, PersonDirectoryService, ReportingService, TaskLifecycleService,
    },
};
use test_helpers::ManualClock;
use tokio::runtime::Runtime;

/// Creates a tokio runtime for async operations in tests.
fn test_runtime() -> Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("failed to create test runtime")
}

fn deadline(month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, month, day).expect("valid deadline")
}

struct Services {
    lifecycle: TaskLifecycleService<InMemoryTrackingStore, InMemoryTrackingStore, ManualClock>,
    directory: PersonDirectoryService<InMemoryTrackingStore>,
    reporting: ReportingService<InMemoryTrackingStore, InMemoryTrackingStore>,
    clock: Arc<ManualClock>,
    store: InMemoryTrackingStore,
}

fn services() -> Services {
    let store = InMemoryTrackingStore::new();
    let clock = Arc::new(ManualClock::new());
    Services {
        lifecycle: TaskLifecycleService::new(
            Arc::new(store.clone()),
            Arc::new(store.clone()),
            Arc::clone(&clock),
        ),
        directory: PersonDirectoryService::new(Arc::new(store.clone())),
        reporting: ReportingService::new(Arc::new(store.clone()), Arc::new(store.clone())),
        clock,
        store,
    }
}

/// Walks one task through the whole lifecycle and verifies the assignee's
/// statistics, the rendered report, and the final state of the store.
#[test]
fn complete_tracking_flow_through_the_store() {
    let rt = test_runtime();
    let svc = services();

    rt.block_on(async {
        let alice = svc
            .directory
            .create("Alice", "engineering")
            .await
            .expect("person creation should succeed");

        let task = svc
            .lifecycle
            .create(
                CreateTaskRequest::new(
                    "Migrate billing jobs",
                    "move the nightly billing jobs to the new scheduler",
                    deadline(4, 15),
                    "engineering",
                    120,
                )
                .with_assignee(alice.id()),
            )
            .await
            .expect("task creation should succeed");
        assert_eq!(task.status(), TaskStatus::Idle);

        svc.lifecycle
            .transition_status(task.id(), TaskStatus::Active)
            .await
            .expect("activation should succeed");
        svc.clock.advance_minutes(90);
        let completed = svc
            .lifecycle
            .transition_status(task.id(), TaskStatus::Completed)
            .await
            .expect("completion should succeed");
        assert_eq!(completed.status(), TaskStatus::Completed);

        let alice = svc
            .directory
            .find_by_id(alice.id())
            .await
            .expect("lookup should succeed")
            .expect("person should exist");
        assert_eq!(alice.total_tasks_completed(), 1);
        assert!((alice.average_task_duration() - 90.0).abs() < f64::EPSILON);

        let summaries = svc
            .reporting
            .task_summaries()
            .await
            .expect("summaries should render");
        assert_eq!(
            summaries,
            vec![
                "Title: Migrate billing jobs\n Deadline: 2026-04-15\n Status: Forwarded to \
                 Alice\n Estimated minutes spent: 90.0"
                    .to_owned()
            ]
        );
    });
}

/// Deleting a person removes their tasks but leaves everyone else's alone.
#[test]
fn person_deletion_cascades_through_the_store() {
    let rt = test_runtime();
    let svc = services();

    rt.block_on(async {
        let alice = svc
            .directory
            .create("Alice", "engineering")
            .await
            .expect("person creation should succeed");
        let bruno = svc
            .directory
            .create("Bruno", "engineering")
            .await
            .expect("person creation should succeed");

        let alices_task = svc
            .lifecycle
            .create(
                CreateTaskRequest::new(
                    "Rotate credentials",
                    "rotate the service credentials",
                    deadline(4, 20),
                    "engineering",
                    30,
                )
                .with_assignee(alice.id()),
            )
            .await
            .expect("task creation should succeed");
        let brunos_task = svc
            .lifecycle
            .create(
                CreateTaskRequest::new(
                    "Patch hosts",
                    "apply the kernel patches",
                    deadline(4, 21),
                    "engineering",
                    45,
                )
                .with_assignee(bruno.id()),
            )
            .await
            .expect("task creation should succeed");

        svc.directory
            .delete(alice.id())
            .await
            .expect("delete should succeed");

        let gone = svc
            .lifecycle
            .find_by_id(alices_task.id())
            .await
            .expect("lookup should succeed");
        assert!(gone.is_none());
        let kept = svc
            .lifecycle
            .find_by_id(brunos_task.id())
            .await
            .expect("lookup should succeed");
        assert!(kept.is_some());
    });
}

/// The dual write refuses to commit either record when the assignee row is
/// missing, so a task can never be left completed against an un-incremented
/// statistic.
#[test]
fn statistics_write_commits_both_records_or_neither() {
    let rt = test_runtime();
    let svc = services();

    rt.block_on(async {
        let alice = svc
            .directory
            .create("Alice", "engineering")
            .await
            .expect("person creation should succeed");
        let task = svc
            .lifecycle
            .create(
                CreateTaskRequest::new(
                    "Doomed write",
                    "exercises the atomicity contract",
                    deadline(4, 22),
                    "engineering",
                    15,
                )
                .with_assignee(alice.id()),
            )
            .await
            .expect("task creation should succeed");
        let activated = svc
            .lifecycle
            .transition_status(task.id(), TaskStatus::Active)
            .await
            .expect("activation should succeed");

        // Build the completed image by hand, then claim the completion for a
        // person the store has never seen.
        let mut completed = activated.clone();
        svc.clock.advance_minutes(10);
        completed.transition_to(TaskStatus::Completed, &*svc.clock);
        let stranger = PersonId::new();
        let record = CompletionRecord {
            person_id: stranger,
            duration_minutes: 10,
        };

        let result = svc.store.update_recording_completion(&completed, record).await;
        assert!(matches!(
            result,
            Err(TaskRepositoryError::AssigneeNotFound(id)) if id == stranger
        ));

        let untouched = svc
            .lifecycle
            .find_by_id(task.id())
            .await
            .expect("lookup should succeed")
            .expect("task should exist");
        assert_eq!(untouched.status(), TaskStatus::Active);
        assert!(untouched.finished_at().is_none());
        let alice = svc
            .directory
            .find_by_id(alice.id())
            .await
            .expect("lookup should succeed")
            .expect("person should exist");
        assert_eq!(alice.total_tasks_completed(), 0);
    });
}
