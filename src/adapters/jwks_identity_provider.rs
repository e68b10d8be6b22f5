use anyhow::{anyhow, Context};
use async_trait::async_trait;
use jsonwebtoken::jwk::JwkSet;
use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use serde::Deserialize;
use tokio::sync::{mpsc, oneshot};
use uuid::Uuid;

use super::jwks_provider::{JwksProvider, JwksProviderCommand};
use crate::{entities, ports};

const ASYMMETRIC_ALGORITHMS: [Algorithm; 7] = [
    Algorithm::RS256,
    Algorithm::RS384,
    Algorithm::RS512,
    Algorithm::PS256,
    Algorithm::ES256,
    Algorithm::ES384,
    Algorithm::EdDSA,
];

#[derive(Debug, Deserialize)]
struct Claims {
    sub: Uuid,
    #[serde(default)]
    email: Option<String>,
}

fn verify_token(
    jwks: &JwkSet,
    token: &str,
    audience: &str,
    issuer: &str,
) -> anyhow::Result<entities::AuthUser> {
    let header = jsonwebtoken::decode_header(token)?;
    if !ASYMMETRIC_ALGORITHMS.contains(&header.alg) {
        return Err(anyhow!("unsupported algorithm: {:?}", header.alg));
    }
    let kid = header
        .kid
        .ok_or_else(|| anyhow!("token doesn't have a `kid` header field"))?;
    let jwk = jwks
        .find(&kid)
        .ok_or_else(|| anyhow!("no matching JWK found for the given kid"))?;

    let decoding_key = DecodingKey::from_jwk(jwk)?;
    let mut validation = Validation::new(header.alg);
    validation.set_audience(&[audience]);
    validation.set_issuer(&[issuer]);
    let decoded = jsonwebtoken::decode::<Claims>(token, &decoding_key, &validation)?;

    Ok(entities::AuthUser {
        id: entities::UserId::from(decoded.claims.sub),
        email: decoded.claims.email,
    })
}

/// Verifies tokens locally against the identity provider's published keys.
#[derive(Debug, Clone)]
pub struct JwksIdentityProvider {
    keys: mpsc::Sender<JwksProviderCommand>,
    audience: String,
    issuer: String,
}

impl JwksIdentityProvider {
    pub fn new(url: &str, audience: impl Into<String>) -> Self {
        let url = url.trim_end_matches('/');
        Self {
            keys: JwksProvider::spawn(format!("{}/auth/v1/.well-known/jwks.json", url)),
            audience: audience.into(),
            issuer: format!("{}/auth/v1", url),
        }
    }
}

#[async_trait]
impl ports::IdentityProvider for JwksIdentityProvider {
    async fn verify(&self, token: &str) -> anyhow::Result<entities::AuthUser> {
        let (resp, receiver) = oneshot::channel();
        self.keys
            .send(JwksProviderCommand::Get { resp })
            .await
            .map_err(|_| anyhow!("jwks provider stopped"))?;
        let jwks = receiver.await.context("jwks provider dropped request")??;

        verify_token(&jwks, token, &self.audience, &self.issuer)
    }
}
