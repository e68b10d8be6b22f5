use crate::entities;
use async_trait::async_trait;

#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Resolves a bearer token to the identity it was issued for.
    /// Any error means the token is not accepted.
    async fn verify(&self, token: &str) -> anyhow::Result<entities::AuthUser>;
}
