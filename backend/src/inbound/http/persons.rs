//! Person CRUD HTTP handlers.
//!
//! ```text
//! POST   /person/        (alias: /person)
//! GET    /person/        (alias: /person)
//! GET    /person/{id}
//! PUT    /person/{id}
//! DELETE /person/{id}
//! ```

use actix_web::web;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Error, Person, PersonDraft, PersonId, parse_birth_date};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{json_config, path_config, person_validation_error};

const NOT_FOUND_MESSAGE: &str = "Person not found";

/// Request payload for creating or replacing a person.
///
/// Unknown keys, including a client-supplied `id`, are ignored.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct PersonRequest {
    #[schema(example = "Ada")]
    pub first_name: String,
    #[schema(example = "Lovelace")]
    pub last_name: String,
    #[schema(format = "date", example = "1815-12-10")]
    pub birth_date: String,
}

impl PersonRequest {
    /// Validate the payload and convert it into a domain draft.
    ///
    /// This is the only place where the textual birth date is parsed.
    pub fn into_draft(self) -> Result<PersonDraft, Error> {
        let birth_date = parse_birth_date(&self.birth_date).map_err(person_validation_error)?;
        PersonDraft::try_from_parts(self.first_name, self.last_name, birth_date)
            .map_err(person_validation_error)
    }
}

/// Response payload describing a stored person.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct PersonResponse {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "Ada")]
    pub first_name: String,
    #[schema(example = "Lovelace")]
    pub last_name: String,
    #[schema(format = "date", example = "1815-12-10")]
    pub birth_date: String,
}

impl From<Person> for PersonResponse {
    fn from(person: Person) -> Self {
        Self {
            id: person.id().get(),
            first_name: person.first_name().to_string(),
            last_name: person.last_name().to_string(),
            birth_date: person.birth_date().format("%Y-%m-%d").to_string(),
        }
    }
}

fn found(person: Option<Person>) -> ApiResult<web::Json<PersonResponse>> {
    person
        .map(|person| web::Json(PersonResponse::from(person)))
        .ok_or_else(|| Error::not_found(NOT_FOUND_MESSAGE))
}

/// Create a person; the identifier is assigned by storage.
#[utoipa::path(
    post,
    path = "/person/",
    request_body = PersonRequest,
    responses(
        (status = 200, description = "Person created", body = PersonResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 503, description = "Storage unavailable", body = ErrorSchema)
    ),
    tags = ["persons"],
    operation_id = "createPerson"
)]
pub async fn create_person(
    state: web::Data<HttpState>,
    payload: web::Json<PersonRequest>,
) -> ApiResult<web::Json<PersonResponse>> {
    let draft = payload.into_inner().into_draft()?;
    let person = state.persons.create(draft).await?;
    Ok(web::Json(PersonResponse::from(person)))
}

/// List every stored person.
#[utoipa::path(
    get,
    path = "/person/",
    responses(
        (status = 200, description = "Stored persons", body = [PersonResponse]),
        (status = 503, description = "Storage unavailable", body = ErrorSchema)
    ),
    tags = ["persons"],
    operation_id = "listPersons"
)]
pub async fn list_persons(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<PersonResponse>>> {
    let persons = state.persons.read_all().await?;
    Ok(web::Json(
        persons.into_iter().map(PersonResponse::from).collect(),
    ))
}

/// Fetch one person.
#[utoipa::path(
    get,
    path = "/person/{id}",
    params(("id" = i64, Path, description = "Person identifier")),
    responses(
        (status = 200, description = "Person found", body = PersonResponse),
        (status = 400, description = "Identifier is not an integer", body = ErrorSchema),
        (status = 404, description = "Person not found", body = ErrorSchema)
    ),
    tags = ["persons"],
    operation_id = "getPerson"
)]
pub async fn get_person(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<web::Json<PersonResponse>> {
    let id = PersonId::new(path.into_inner());
    found(state.persons.read_by_id(id).await?)
}

/// Replace the names and birth date of an existing person.
#[utoipa::path(
    put,
    path = "/person/{id}",
    params(("id" = i64, Path, description = "Person identifier")),
    request_body = PersonRequest,
    responses(
        (status = 200, description = "Person updated", body = PersonResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Person not found", body = ErrorSchema)
    ),
    tags = ["persons"],
    operation_id = "updatePerson"
)]
pub async fn update_person(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
    payload: web::Json<PersonRequest>,
) -> ApiResult<web::Json<PersonResponse>> {
    let id = PersonId::new(path.into_inner());
    let draft = payload.into_inner().into_draft()?;
    found(state.persons.update(id, draft).await?)
}

/// Delete a person, returning it as it was before removal.
#[utoipa::path(
    delete,
    path = "/person/{id}",
    params(("id" = i64, Path, description = "Person identifier")),
    responses(
        (status = 200, description = "Person deleted", body = PersonResponse),
        (status = 400, description = "Identifier is not an integer", body = ErrorSchema),
        (status = 404, description = "Person not found", body = ErrorSchema)
    ),
    tags = ["persons"],
    operation_id = "deletePerson"
)]
pub async fn delete_person(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<web::Json<PersonResponse>> {
    let id = PersonId::new(path.into_inner());
    found(state.persons.delete(id).await?)
}

/// Register the person routes and their extractor configuration.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use person_api::inbound::http::persons;
///
/// let _app = App::new().configure(persons::configure);
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .app_data(path_config())
        .service(
            web::resource(["/person/", "/person"])
                .route(web::post().to(create_person))
                .route(web::get().to(list_persons)),
        )
        .service(
            web::resource("/person/{id}")
                .route(web::get().to(get_person))
                .route(web::put().to(update_person))
                .route(web::delete().to(delete_person)),
        );
}

#[cfg(test)]
#[path = "persons_tests.rs"]
mod tests;
