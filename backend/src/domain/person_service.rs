//! Person domain service.
//!
//! Implements the [`PersonService`] driving port on top of any
//! [`PersonRepository`]. Each call is one unit of work against the
//! repository; the service keeps no per-request state.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::ports::{PersonRecord, PersonRepository, PersonRepositoryError, PersonService};
use crate::domain::{Error, Person, PersonDraft, PersonId};

fn map_repository_error(error: PersonRepositoryError) -> Error {
    match error {
        PersonRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("person repository unavailable: {message}"))
        }
        PersonRepositoryError::Query { message } => {
            Error::internal(format!("person repository error: {message}"))
        }
        PersonRepositoryError::Missing { id } => {
            Error::not_found(format!("person {id} does not exist"))
        }
    }
}

/// Treat a row that vanished between lookup and write as absent.
fn absent_if_missing(
    result: Result<Person, PersonRepositoryError>,
) -> Result<Option<Person>, Error> {
    match result {
        Ok(person) => Ok(Some(person)),
        Err(PersonRepositoryError::Missing { .. }) => Ok(None),
        Err(other) => Err(map_repository_error(other)),
    }
}

/// CRUD service for [`Person`] entities.
#[derive(Clone)]
pub struct PersonServiceImpl<R> {
    person_repo: Arc<R>,
}

impl<R> PersonServiceImpl<R> {
    /// Create a new service backed by the person repository.
    pub fn new(person_repo: Arc<R>) -> Self {
        Self { person_repo }
    }
}

#[async_trait]
impl<R> PersonService for PersonServiceImpl<R>
where
    R: PersonRepository,
{
    async fn create(&self, draft: PersonDraft) -> Result<Person, Error> {
        let person = self
            .person_repo
            .save(PersonRecord::Transient(draft))
            .await
            .map_err(map_repository_error)?;
        info!(person_id = %person.id(), "person created");
        Ok(person)
    }

    async fn read_by_id(&self, id: PersonId) -> Result<Option<Person>, Error> {
        self.person_repo
            .find_by_id(id)
            .await
            .map_err(map_repository_error)
    }

    async fn read_all(&self) -> Result<Vec<Person>, Error> {
        self.person_repo
            .find_all()
            .await
            .map_err(map_repository_error)
    }

    async fn update(&self, id: PersonId, draft: PersonDraft) -> Result<Option<Person>, Error> {
        let Some(existing) = self.read_by_id(id).await? else {
            return Ok(None);
        };

        let updated = absent_if_missing(
            self.person_repo
                .save(PersonRecord::Persisted(existing.with_details(draft)))
                .await,
        )?;
        if updated.is_some() {
            info!(person_id = %id, "person updated");
        }
        Ok(updated)
    }

    async fn delete(&self, id: PersonId) -> Result<Option<Person>, Error> {
        let Some(existing) = self.read_by_id(id).await? else {
            return Ok(None);
        };

        self.person_repo
            .delete(&existing)
            .await
            .map_err(map_repository_error)?;
        info!(person_id = %id, "person deleted");
        Ok(Some(existing))
    }
}

#[cfg(test)]
#[path = "person_service_tests.rs"]
mod tests;
