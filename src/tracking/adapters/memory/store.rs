//! Thread-safe in-memory store for task and person tracking.

use async_trait::async_trait;
use std::cmp::Reverse;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::tracking::{
    domain::{CompletionRecord, Person, PersonId, Task, TaskId},
    ports::{
        PersonRepository, PersonRepositoryError, PersonRepositoryResult, TaskRepository,
        TaskRepositoryError, TaskRepositoryResult,
    },
};

/// In-memory store implementing both tracking repositories.
///
/// Tasks and persons share a single lock. `update_recording_completion`
/// reads the person, folds the completion, and writes both records while
/// holding that lock, so concurrent completions for the same person
/// serialize their whole read-modify-write and never lose an increment; the
/// person-to-task delete cascade is atomic for the same reason.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTrackingStore {
    state: Arc<RwLock<TrackingState>>,
}

#[derive(Debug, Default)]
struct TrackingState {
    tasks: HashMap<TaskId, Task>,
    persons: HashMap<PersonId, Person>,
}

impl InMemoryTrackingStore {
    /// Creates an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, TrackingState>, std::io::Error> {
        self.state
            .read()
            .map_err(|err| std::io::Error::other(err.to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, TrackingState>, std::io::Error> {
        self.state
            .write()
            .map_err(|err| std::io::Error::other(err.to_string()))
    }
}

#[async_trait]
impl TaskRepository for InMemoryTrackingStore {
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut state = self.write().map_err(TaskRepositoryError::persistence)?;
        if state.tasks.contains_key(&task.id()) {
            return Err(TaskRepositoryError::DuplicateTask(task.id()));
        }
        state.tasks.insert(task.id(), task.clone());
        Ok(())
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut state = self.write().map_err(TaskRepositoryError::persistence)?;
        if !state.tasks.contains_key(&task.id()) {
            return Err(TaskRepositoryError::NotFound(task.id()));
        }
        state.tasks.insert(task.id(), task.clone());
        Ok(())
    }

    async fn update_recording_completion(
        &self,
        task: &Task,
        completion: CompletionRecord,
    ) -> TaskRepositoryResult<Person> {
        let mut state = self.write().map_err(TaskRepositoryError::persistence)?;
        // Validate both records before touching either map.
        if !state.tasks.contains_key(&task.id()) {
            return Err(TaskRepositoryError::NotFound(task.id()));
        }
        let Some(person) = state.persons.get_mut(&completion.person_id) else {
            return Err(TaskRepositoryError::AssigneeNotFound(completion.person_id));
        };
        // Fold under the write lock: the person read, the increment, and
        // both writes form one critical section per store.
        person.record_completion(completion.duration_minutes);
        let updated = person.clone();
        state.tasks.insert(task.id(), task.clone());
        Ok(updated)
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        let state = self.read().map_err(TaskRepositoryError::persistence)?;
        Ok(state.tasks.get(&id).cloned())
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()> {
        let mut state = self.write().map_err(TaskRepositoryError::persistence)?;
        state.tasks.remove(&id);
        Ok(())
    }

    async fn find_by_department(&self, department: &str) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.read().map_err(TaskRepositoryError::persistence)?;
        let mut tasks: Vec<Task> = state
            .tasks
            .values()
            .filter(|task| task.department() == department)
            .cloned()
            .collect();
        tasks.sort_by_key(|task| Reverse(task.deadline()));
        Ok(tasks)
    }

    async fn list_by_deadline_desc(&self) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.read().map_err(TaskRepositoryError::persistence)?;
        let mut tasks: Vec<Task> = state.tasks.values().cloned().collect();
        tasks.sort_by_key(|task| Reverse(task.deadline()));
        Ok(tasks)
    }
}

#[async_trait]
impl PersonRepository for InMemoryTrackingStore {
    async fn store(&self, person: &Person) -> PersonRepositoryResult<()> {
        let mut state = self.write().map_err(PersonRepositoryError::persistence)?;
        if state.persons.contains_key(&person.id()) {
            return Err(PersonRepositoryError::DuplicatePerson(person.id()));
        }
        state.persons.insert(person.id(), person.clone());
        Ok(())
    }

    async fn update(&self, person: &Person) -> PersonRepositoryResult<()> {
        let mut state = self.write().map_err(PersonRepositoryError::persistence)?;
        if !state.persons.contains_key(&person.id()) {
            return Err(PersonRepositoryError::NotFound(person.id()));
        }
        state.persons.insert(person.id(), person.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: PersonId) -> PersonRepositoryResult<Option<Person>> {
        let state = self.read().map_err(PersonRepositoryError::persistence)?;
        Ok(state.persons.get(&id).cloned())
    }

    async fn list_all(&self) -> PersonRepositoryResult<Vec<Person>> {
        let state = self.read().map_err(PersonRepositoryError::persistence)?;
        let mut persons: Vec<Person> = state.persons.values().cloned().collect();
        persons.sort_by(|a, b| a.name().cmp(b.name()));
        Ok(persons)
    }

    async fn find_by_department(&self, department: &str) -> PersonRepositoryResult<Vec<Person>> {
        let state = self.read().map_err(PersonRepositoryError::persistence)?;
        let mut persons: Vec<Person> = state
            .persons
            .values()
            .filter(|person| person.department() == department)
            .cloned()
            .collect();
        persons.sort_by(|a, b| a.name().cmp(b.name()));
        Ok(persons)
    }

    async fn delete(&self, id: PersonId) -> PersonRepositoryResult<()> {
        let mut state = self.write().map_err(PersonRepositoryError::persistence)?;
        state.persons.remove(&id);
        state
            .tasks
            .retain(|_, task| task.assigned_person() != Some(id));
        Ok(())
    }
}
