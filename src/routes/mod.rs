use std::sync::Arc;

use actix_cors::Cors;
use actix_web::http::header;
use actix_web::middleware::from_fn;
use actix_web::web;

use crate::auth::{require_auth, Authenticator};
use crate::ports;

mod classes;
mod error;
mod heroes;

pub use error::ApiError;

pub type SharedHeroesRepository = Arc<dyn ports::HeroesRepository<Error = anyhow::Error>>;
pub type SharedClassesRepository = Arc<dyn ports::ClassesRepository<Error = anyhow::Error>>;

pub struct AppState {
    pub heroes: SharedHeroesRepository,
    pub classes: SharedClassesRepository,
}

/// Cross-origin policy for browser clients. An empty list allows any origin.
pub fn cors(allowed_origins: &[String]) -> Cors {
    let cors = Cors::default()
        .allowed_methods(vec!["GET", "POST"])
        .allowed_headers(vec![header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
        .max_age(3600);
    if allowed_origins.is_empty() {
        return cors.allow_any_origin();
    }
    allowed_origins
        .iter()
        .fold(cors, |cors, origin| cors.allowed_origin(origin))
}

/// Registers every route. All of them sit behind [`require_auth`].
pub fn configure(
    state: web::Data<AppState>,
    authenticator: web::Data<Authenticator>,
) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg| {
        cfg.app_data(state)
            .app_data(authenticator)
            .app_data(
                web::JsonConfig::default()
                    .error_handler(|err, _| ApiError::BadRequest(err.to_string()).into()),
            )
            .service(
                web::scope("/classes")
                    .wrap(from_fn(require_auth))
                    .route("/{name}", web::get().to(classes::get_class)),
            )
            .service(
                web::scope("/heroes")
                    .wrap(from_fn(require_auth))
                    .route("/player", web::get().to(heroes::list_player_heroes))
                    .route("/{id}/full", web::get().to(heroes::get_full_hero))
                    .route("/{id}/state", web::post().to(heroes::update_hero_state)),
            );
    }
}
