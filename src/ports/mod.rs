mod classes_repository;
mod heroes_repository;
mod identity_provider;

pub use classes_repository::*;
pub use heroes_repository::*;
pub use identity_provider::*;
