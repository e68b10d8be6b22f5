mod classes_repository_impl;
mod heroes_repository_impl;
#[cfg(test)]
pub(crate) mod in_memory;
mod jwks_identity_provider;
mod jwks_provider;
mod supabase_identity_provider;

pub use classes_repository_impl::ClassesRepositoryImpl;
pub use heroes_repository_impl::HeroesRepositoryImpl;
pub use jwks_identity_provider::JwksIdentityProvider;
pub use jwks_provider::{JwksProvider, JwksProviderCommand};
pub use supabase_identity_provider::SupabaseIdentityProvider;
