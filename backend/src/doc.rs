//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] collects the person and health endpoints together with the
//! error schema wrappers from [`crate::inbound::http::schemas`]. The document
//! backs Swagger UI in debug builds and is printed by
//! `cargo run --bin openapi-dump`.

use utoipa::OpenApi;

use crate::inbound::http::persons::{PersonRequest, PersonResponse};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Person API",
        description = "Create, read, update and delete persons."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::persons::create_person,
        crate::inbound::http::persons::list_persons,
        crate::inbound::http::persons::get_person,
        crate::inbound::http::persons::update_person,
        crate::inbound::http::persons::delete_person,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(PersonRequest, PersonResponse, ErrorSchema, ErrorCodeSchema)),
    tags(
        (name = "persons", description = "Person lifecycle operations"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Tests verifying the generated document.

    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    use super::*;

    // utoipa replaces :: with . in schema names
    const ERROR_SCHEMA_NAME: &str = "crate.domain.Error";

    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[test]
    fn person_paths_are_documented() {
        let doc = ApiDoc::openapi();
        for path in ["/person/", "/person/{id}", "/health/ready", "/health/live"] {
            assert!(doc.paths.paths.contains_key(path), "missing path {path}");
        }
    }

    #[test]
    fn person_response_schema_uses_snake_case_fields() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let response = schemas.get("PersonResponse").expect("PersonResponse schema");

        for field in ["id", "first_name", "last_name", "birth_date"] {
            assert_object_schema_has_field(response, field);
        }
    }

    #[test]
    fn error_schema_has_required_fields() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let error_schema = schemas.get(ERROR_SCHEMA_NAME).expect("Error schema");

        assert_object_schema_has_field(error_schema, "code");
        assert_object_schema_has_field(error_schema, "message");
        assert_object_schema_has_field(error_schema, "traceId");
    }
}
