//! Shared HTTP adapter state.
//!
//! Handlers receive this state through `actix_web::web::Data` and depend only
//! on the driving port, so they stay testable without a database.

use std::sync::Arc;

use crate::domain::ports::PersonService;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub persons: Arc<dyn PersonService>,
}

impl HttpState {
    /// Construct state from the person service.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use person_api::domain::PersonServiceImpl;
    /// use person_api::inbound::http::state::HttpState;
    /// use person_api::outbound::memory::InMemoryPersonRepository;
    ///
    /// let service = PersonServiceImpl::new(Arc::new(InMemoryPersonRepository::new()));
    /// let _state = HttpState::new(Arc::new(service));
    /// ```
    pub fn new(persons: Arc<dyn PersonService>) -> Self {
        Self { persons }
    }
}
