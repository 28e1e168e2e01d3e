//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod person_repository;
mod person_service;

#[cfg(test)]
pub use person_repository::MockPersonRepository;
pub use person_repository::{PersonRecord, PersonRepository, PersonRepositoryError};
#[cfg(test)]
pub use person_service::MockPersonService;
pub use person_service::PersonService;
