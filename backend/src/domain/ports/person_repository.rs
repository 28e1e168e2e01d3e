//! Driven port for person persistence adapters and their errors.
//!
//! Storage assigns identifiers on insert; adapters never accept a caller
//! supplied identifier for a new record.

use async_trait::async_trait;

use crate::domain::{Person, PersonDraft, PersonId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by person repository adapters.
    pub enum PersonRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "person repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "person repository query failed: {message}",
        /// An update targeted a row that no longer exists.
        Missing { id: i64 } => "person {id} does not exist",
    }
}

/// Value handed to [`PersonRepository::save`].
///
/// A transient record is inserted and receives a fresh identifier. A
/// persisted record overwrites every mutable column of the matching row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersonRecord {
    Transient(PersonDraft),
    Persisted(Person),
}

impl From<PersonDraft> for PersonRecord {
    fn from(value: PersonDraft) -> Self {
        Self::Transient(value)
    }
}

impl From<Person> for PersonRecord {
    fn from(value: Person) -> Self {
        Self::Persisted(value)
    }
}

/// Port for storing and loading [`Person`] entities.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PersonRepository: Send + Sync {
    /// Insert a transient record or overwrite a persisted one.
    ///
    /// Returns the stored entity. Overwriting a row that has disappeared
    /// yields [`PersonRepositoryError::Missing`].
    async fn save(&self, record: PersonRecord) -> Result<Person, PersonRepositoryError>;

    /// Fetch a person by identifier.
    async fn find_by_id(&self, id: PersonId) -> Result<Option<Person>, PersonRepositoryError>;

    /// Fetch every stored person.
    async fn find_all(&self) -> Result<Vec<Person>, PersonRepositoryError>;

    /// Remove the row backing `person`. Removing an absent row succeeds.
    async fn delete(&self, person: &Person) -> Result<(), PersonRepositoryError>;
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use chrono::NaiveDate;
    use rstest::{fixture, rstest};

    use super::*;

    #[fixture]
    fn draft() -> PersonDraft {
        let birth_date = NaiveDate::from_ymd_opt(1815, 12, 10).expect("valid date");
        PersonDraft::try_from_parts("Ada", "Lovelace", birth_date).expect("valid draft")
    }

    #[rstest]
    fn drafts_convert_to_transient_records(draft: PersonDraft) {
        let record = PersonRecord::from(draft.clone());
        assert_eq!(record, PersonRecord::Transient(draft));
    }

    #[rstest]
    fn people_convert_to_persisted_records(draft: PersonDraft) {
        let person = Person::new(PersonId::new(1), draft);
        let record = PersonRecord::from(person.clone());
        assert_eq!(record, PersonRecord::Persisted(person));
    }

    #[rstest]
    #[case(PersonRepositoryError::connection("refused"), "person repository connection failed: refused")]
    #[case(PersonRepositoryError::query("syntax"), "person repository query failed: syntax")]
    #[case(PersonRepositoryError::missing(9_i64), "person 9 does not exist")]
    fn errors_render_messages(#[case] err: PersonRepositoryError, #[case] expected: &str) {
        assert_eq!(err.to_string(), expected);
    }
}
