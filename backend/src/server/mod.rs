//! Server construction and middleware wiring.

mod config;

pub use config::ServerConfig;

use std::sync::Arc;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tracing::{info, warn};

use person_api::Trace;
#[cfg(debug_assertions)]
use person_api::doc::ApiDoc;
use person_api::domain::PersonServiceImpl;
use person_api::domain::ports::PersonService;
use person_api::inbound::http::health::{HealthState, live, ready};
use person_api::inbound::http::persons;
use person_api::inbound::http::state::HttpState;
use person_api::outbound::memory::InMemoryPersonRepository;
use person_api::outbound::persistence::DieselPersonRepository;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

/// Build the person service for the configured storage.
///
/// Uses the Diesel repository when a pool is configured and the in-memory
/// repository otherwise.
fn build_person_service(config: &ServerConfig) -> Arc<dyn PersonService> {
    match &config.db_pool {
        Some(pool) => {
            info!("storing persons in PostgreSQL");
            Arc::new(PersonServiceImpl::new(Arc::new(DieselPersonRepository::new(
                pool.clone(),
            ))))
        }
        None => {
            warn!("no database configured; persons are kept in memory and lost on exit");
            Arc::new(PersonServiceImpl::new(Arc::new(
                InMemoryPersonRepository::new(),
            )))
        }
    }
}

fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .configure(persons::configure)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// The health state is marked ready once the listener is bound.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let http_state = web::Data::new(HttpState::new(build_person_service(&config)));
    let bind_addr = config.bind_addr();

    let server = HttpServer::new(move || build_app(server_health_state.clone(), http_state.clone()))
        .bind(bind_addr)?
        .run();

    info!(%bind_addr, "listening");
    health_state.mark_ready();
    Ok(server)
}
