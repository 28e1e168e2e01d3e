//! PostgreSQL-backed `PersonRepository` implementation using Diesel ORM.
//!
//! Every operation checks out one pooled connection and runs a single
//! statement on it, so each write commits as soon as it returns.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::ports::{PersonRecord, PersonRepository, PersonRepositoryError};
use crate::domain::{Person, PersonDraft, PersonId};

use super::models::{NewPersonRow, PersonRow, PersonUpdate};
use super::pool::{DbPool, PoolError};
use super::schema::persons;

/// Diesel-backed implementation of the `PersonRepository` port.
#[derive(Clone)]
pub struct DieselPersonRepository {
    pool: DbPool,
}

impl DieselPersonRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    async fn insert(&self, draft: &PersonDraft) -> Result<Person, PersonRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = diesel::insert_into(persons::table)
            .values(NewPersonRow::from(draft))
            .returning(PersonRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        row_to_person(row)
    }

    async fn overwrite(&self, person: &Person) -> Result<Person, PersonRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<PersonRow> = diesel::update(persons::table.find(person.id().get()))
            .set(PersonUpdate::from(person))
            .returning(PersonRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        match row {
            Some(row) => row_to_person(row),
            None => Err(PersonRepositoryError::missing(person.id().get())),
        }
    }
}

fn map_pool_error(error: PoolError) -> PersonRepositoryError {
    PersonRepositoryError::connection(error.into_message())
}

/// Map Diesel errors to domain person repository errors.
fn map_diesel_error(error: diesel::result::Error) -> PersonRepositoryError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::NotFound => PersonRepositoryError::query("record not found"),
        DieselError::QueryBuilderError(_) => PersonRepositoryError::query("database query error"),
        DieselError::DatabaseError(
            DatabaseErrorKind::ClosedConnection | DatabaseErrorKind::UnableToSendCommand,
            _,
        ) => PersonRepositoryError::connection("database connection error"),
        _ => PersonRepositoryError::query("database error"),
    }
}

fn row_to_person(row: PersonRow) -> Result<Person, PersonRepositoryError> {
    let id = row.id;
    Person::try_from(row).map_err(|err| {
        PersonRepositoryError::query(format!("stored person {id} is invalid: {err}"))
    })
}

#[async_trait]
impl PersonRepository for DieselPersonRepository {
    async fn save(&self, record: PersonRecord) -> Result<Person, PersonRepositoryError> {
        match record {
            PersonRecord::Transient(draft) => self.insert(&draft).await,
            PersonRecord::Persisted(person) => self.overwrite(&person).await,
        }
    }

    async fn find_by_id(&self, id: PersonId) -> Result<Option<Person>, PersonRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<PersonRow> = persons::table
            .find(id.get())
            .select(PersonRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_person).transpose()
    }

    async fn find_all(&self) -> Result<Vec<Person>, PersonRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<PersonRow> = persons::table
            .order(persons::id.asc())
            .select(PersonRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_person).collect()
    }

    async fn delete(&self, person: &Person) -> Result<(), PersonRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let removed = diesel::delete(persons::table.find(person.id().get()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        if removed == 0 {
            debug!(person_id = %person.id(), "delete matched no row");
        }
        Ok(())
    }
}
