//! Domain primitives, services, and ports.
//!
//! Purpose: Define strongly typed domain entities used by the API and
//! persistence layers. Keep types immutable and document invariants and
//! serialisation contracts (serde) in each type's Rustdoc.
//!
//! Public surface:
//! - Error (alias to `error::Error`): transport-agnostic error payload.
//! - ErrorCode (alias to `error::ErrorCode`): stable error identifier.
//! - Person / PersonDraft: the stored entity and its creation-time subset.
//! - PersonServiceImpl: the CRUD service behind the `PersonService` port.
//! - TraceId: request-scoped correlation identifier.

pub mod error;
pub mod person;
mod person_service;
pub mod ports;
pub mod trace_id;

pub use self::error::{Error, ErrorCode, TRACE_ID_HEADER};
pub use self::person::{
    NameField, Person, PersonDraft, PersonId, PersonName, PersonValidationError, parse_birth_date,
};
pub use self::person_service::PersonServiceImpl;
pub use self::trace_id::TraceId;
