//! In-process `PersonRepository` for local runs and HTTP tests.
//!
//! Rows live in a mutex-guarded map keyed by identifier. Identifiers come
//! from a counter that only moves forward, so a deleted identifier is never
//! handed out again.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{PersonRecord, PersonRepository, PersonRepositoryError};
use crate::domain::{Person, PersonId};

#[derive(Debug)]
struct Store {
    next_id: i64,
    rows: BTreeMap<PersonId, Person>,
}

impl Default for Store {
    fn default() -> Self {
        Self {
            next_id: 1,
            rows: BTreeMap::new(),
        }
    }
}

/// Volatile person storage; contents are lost when the process exits.
#[derive(Debug, Default)]
pub struct InMemoryPersonRepository {
    store: Mutex<Store>,
}

impl InMemoryPersonRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Store> {
        // A panic while holding the lock cannot leave a half-written row.
        self.store
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

#[async_trait]
impl PersonRepository for InMemoryPersonRepository {
    async fn save(&self, record: PersonRecord) -> Result<Person, PersonRepositoryError> {
        let mut store = self.lock();
        match record {
            PersonRecord::Transient(draft) => {
                let id = PersonId::new(store.next_id);
                store.next_id += 1;
                let person = Person::new(id, draft);
                store.rows.insert(id, person.clone());
                Ok(person)
            }
            PersonRecord::Persisted(person) => match store.rows.get_mut(&person.id()) {
                Some(row) => {
                    *row = person.clone();
                    Ok(person)
                }
                None => Err(PersonRepositoryError::missing(person.id().get())),
            },
        }
    }

    async fn find_by_id(&self, id: PersonId) -> Result<Option<Person>, PersonRepositoryError> {
        Ok(self.lock().rows.get(&id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Person>, PersonRepositoryError> {
        Ok(self.lock().rows.values().cloned().collect())
    }

    async fn delete(&self, person: &Person) -> Result<(), PersonRepositoryError> {
        self.lock().rows.remove(&person.id());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    //! Contract coverage for the in-memory adapter.

    use chrono::NaiveDate;
    use rstest::{fixture, rstest};

    use super::*;
    use crate::domain::PersonDraft;

    fn draft(first: &str, last: &str) -> PersonDraft {
        let birth_date = NaiveDate::from_ymd_opt(1815, 12, 10).expect("valid date");
        PersonDraft::try_from_parts(first, last, birth_date).expect("valid draft")
    }

    #[fixture]
    fn repo() -> InMemoryPersonRepository {
        InMemoryPersonRepository::new()
    }

    #[rstest]
    #[tokio::test]
    async fn inserted_people_can_be_found(repo: InMemoryPersonRepository) {
        let created = repo
            .save(draft("Ada", "Lovelace").into())
            .await
            .expect("insert succeeds");

        let found = repo.find_by_id(created.id()).await.expect("lookup succeeds");
        assert_eq!(found, Some(created));
    }

    #[rstest]
    #[tokio::test]
    async fn identifiers_are_never_reused(repo: InMemoryPersonRepository) {
        let first = repo.save(draft("Ada", "Lovelace").into()).await.expect("insert");
        repo.delete(&first).await.expect("delete");
        let second = repo.save(draft("Grace", "Hopper").into()).await.expect("insert");

        assert_ne!(first.id(), second.id());
        assert!(second.id() > first.id());
    }

    #[rstest]
    #[tokio::test]
    async fn overwrite_replaces_fields(repo: InMemoryPersonRepository) {
        let created = repo.save(draft("Ada", "Lovelace").into()).await.expect("insert");
        let changed = created.clone().with_details(draft("Ada", "King"));

        let saved = repo.save(changed.clone().into()).await.expect("update");
        let found = repo.find_by_id(created.id()).await.expect("lookup");

        assert_eq!(saved, changed);
        assert_eq!(found, Some(changed));
    }

    #[rstest]
    #[tokio::test]
    async fn overwrite_of_absent_row_reports_missing(repo: InMemoryPersonRepository) {
        let ghost = Person::new(PersonId::new(42), draft("Ada", "Lovelace"));

        let err = repo.save(ghost.into()).await.expect_err("row absent");

        assert_eq!(err, PersonRepositoryError::missing(42_i64));
        assert!(repo.find_all().await.expect("list").is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn delete_is_idempotent(repo: InMemoryPersonRepository) {
        let created = repo.save(draft("Ada", "Lovelace").into()).await.expect("insert");

        repo.delete(&created).await.expect("first delete");
        repo.delete(&created).await.expect("second delete");

        assert!(repo.find_by_id(created.id()).await.expect("lookup").is_none());
    }

    #[rstest]
    #[tokio::test]
    async fn find_all_returns_live_set_in_id_order(repo: InMemoryPersonRepository) {
        let ada = repo.save(draft("Ada", "Lovelace").into()).await.expect("insert");
        let grace = repo.save(draft("Grace", "Hopper").into()).await.expect("insert");
        let alan = repo.save(draft("Alan", "Turing").into()).await.expect("insert");
        repo.delete(&grace).await.expect("delete");

        let all = repo.find_all().await.expect("list");

        assert_eq!(all, vec![ada, alan]);
    }
}
