use std::io;
use std::sync::Arc;

use actix_web::{middleware, web, App, HttpServer};
use sqlx::postgres::PgPoolOptions;

use iron_scribe::adapters::{
    ClassesRepositoryImpl, HeroesRepositoryImpl, JwksIdentityProvider, SupabaseIdentityProvider,
};
use iron_scribe::app_config::{AppConfig, AuthConfig};
use iron_scribe::auth::Authenticator;
use iron_scribe::ports;
use iron_scribe::routes::{self, AppState};

fn identity_provider(auth: &AuthConfig) -> Arc<dyn ports::IdentityProvider> {
    match auth {
        AuthConfig::Supabase { url, anon_key } => {
            Arc::new(SupabaseIdentityProvider::new(url.as_str(), anon_key.as_str()))
        }
        AuthConfig::Jwks { url, audience } => {
            Arc::new(JwksIdentityProvider::new(url, audience.as_str()))
        }
    }
}

fn authenticator(config: &AppConfig) -> Authenticator {
    let authenticator = Authenticator::new(identity_provider(&config.auth));

    #[cfg(feature = "dev-bypass")]
    let authenticator = {
        if config.dev_bypass {
            log::warn!("dev bypass token is enabled");
        }
        authenticator.with_dev_bypass(config.dev_bypass)
    };
    #[cfg(not(feature = "dev-bypass"))]
    {
        if config.dev_bypass {
            log::warn!("AUTH_DEV_BYPASS ignored: built without the dev-bypass feature");
        }
    }

    authenticator
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    env_logger::init();
    let config = AppConfig::from_env().map_err(|err| io::Error::new(io::ErrorKind::Other, err))?;

    let pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .connect(&config.database_url)
        .await
        .map_err(|err| io::Error::new(io::ErrorKind::Other, err))?;

    let state = web::Data::new(AppState {
        heroes: Arc::new(HeroesRepositoryImpl::new(pool.clone())),
        classes: Arc::new(ClassesRepositoryImpl::new(pool)),
    });
    let authenticator = web::Data::new(authenticator(&config));
    let cors_allowed_origins = config.cors_allowed_origins.clone();

    log::info!("listening on http://{}:{}", config.host, config.port);
    HttpServer::new(move || {
        App::new()
            .wrap(routes::cors(&cors_allowed_origins))
            .wrap(middleware::Logger::default())
            .configure(routes::configure(state.clone(), authenticator.clone()))
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
