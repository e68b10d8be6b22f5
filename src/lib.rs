pub mod adapters;
pub mod app_config;
pub mod auth;
pub mod client;
#[cfg(any(test, feature = "dev-bypass"))]
pub mod dev_bypass;
pub mod entities;
pub mod ports;
pub mod routes;
mod shareable_error;
pub use shareable_error::ShareableError;
