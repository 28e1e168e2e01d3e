//! Driving port for person CRUD operations.
//!
//! Inbound adapters call this port with validated drafts and identifiers and
//! never see repository details or persistence errors.

use async_trait::async_trait;

use crate::domain::{Error, Person, PersonDraft, PersonId};

/// Driving port for person lifecycle operations.
///
/// Lookups that target an absent identifier return `Ok(None)`; callers decide
/// how to surface the absence.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PersonService: Send + Sync {
    /// Store a new person and return it with its assigned identifier.
    async fn create(&self, draft: PersonDraft) -> Result<Person, Error>;

    /// Fetch one person.
    async fn read_by_id(&self, id: PersonId) -> Result<Option<Person>, Error>;

    /// Fetch every stored person.
    async fn read_all(&self) -> Result<Vec<Person>, Error>;

    /// Replace every mutable field of an existing person.
    async fn update(&self, id: PersonId, draft: PersonDraft) -> Result<Option<Person>, Error>;

    /// Remove a person, returning the entity as it was before removal.
    async fn delete(&self, id: PersonId) -> Result<Option<Person>, Error>;
}
