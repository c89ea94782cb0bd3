//! Service layer for person records.

use crate::tracking::{
    domain::{Person, PersonId},
    ports::{PersonRepository, PersonRepositoryError},
};
use std::sync::Arc;
use thiserror::Error;

/// Service-level errors for person directory operations.
#[derive(Debug, Error)]
pub enum PersonDirectoryError {
    /// The referenced person does not exist.
    #[error("person not found: {0}")]
    PersonNotFound(PersonId),

    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] PersonRepositoryError),
}

/// Result type for person directory service operations.
pub type PersonDirectoryResult<T> = Result<T, PersonDirectoryError>;

/// Person record management service.
///
/// Statistics fields are deliberately outside this service's reach: they
/// move only through the lifecycle service's completion path, so profile
/// edits can never drift the aggregate.
#[derive(Clone)]
pub struct PersonDirectoryService<P>
where
    P: PersonRepository,
{
    persons: Arc<P>,
}

impl<P> PersonDirectoryService<P>
where
    P: PersonRepository,
{
    /// Creates a new person directory service.
    #[must_use]
    pub const fn new(persons: Arc<P>) -> Self {
        Self { persons }
    }

    /// Creates a person with zeroed completion statistics.
    ///
    /// # Errors
    ///
    /// Returns [`PersonDirectoryError::Repository`] when persistence fails.
    pub async fn create(
        &self,
        name: impl Into<String> + Send,
        department: impl Into<String> + Send,
    ) -> PersonDirectoryResult<Person> {
        let person = Person::new(name, department);
        self.persons.store(&person).await?;
        Ok(person)
    }

    /// Finds a person by identifier.
    ///
    /// Returns `Ok(None)` when no person has the given id.
    ///
    /// # Errors
    ///
    /// Returns [`PersonDirectoryError::Repository`] when persistence lookup
    /// fails.
    pub async fn find_by_id(&self, id: PersonId) -> PersonDirectoryResult<Option<Person>> {
        Ok(self.persons.find_by_id(id).await?)
    }

    /// Returns all persons.
    ///
    /// # Errors
    ///
    /// Returns [`PersonDirectoryError::Repository`] when persistence lookup
    /// fails.
    pub async fn list_all(&self) -> PersonDirectoryResult<Vec<Person>> {
        Ok(self.persons.list_all().await?)
    }

    /// Returns all persons in the given department.
    ///
    /// # Errors
    ///
    /// Returns [`PersonDirectoryError::Repository`] when persistence lookup
    /// fails.
    pub async fn list_by_department(
        &self,
        department: &str,
    ) -> PersonDirectoryResult<Vec<Person>> {
        Ok(self.persons.find_by_department(department).await?)
    }

    /// Overwrites a person's name and department, leaving statistics alone.
    ///
    /// # Errors
    ///
    /// Returns [`PersonDirectoryError::PersonNotFound`] when the id does not
    /// resolve, or [`PersonDirectoryError::Repository`] when persistence
    /// fails.
    pub async fn update_details(
        &self,
        id: PersonId,
        name: impl Into<String> + Send,
        department: impl Into<String> + Send,
    ) -> PersonDirectoryResult<Person> {
        let mut person = self
            .persons
            .find_by_id(id)
            .await?
            .ok_or(PersonDirectoryError::PersonNotFound(id))?;
        person.update_details(name, department);
        self.persons.update(&person).await?;
        Ok(person)
    }

    /// Removes a person and, by cascade, every task assigned to them.
    ///
    /// # Errors
    ///
    /// Returns [`PersonDirectoryError::Repository`] when persistence fails.
    pub async fn delete(&self, id: PersonId) -> PersonDirectoryResult<()> {
        Ok(self.persons.delete(id).await?)
    }
}
