use anyhow::{anyhow, Context};
use async_trait::async_trait;
use reqwest::header;
use serde::Deserialize;
use uuid::Uuid;

use crate::{entities, ports};

#[derive(Debug, Deserialize)]
struct SupabaseUser {
    id: Uuid,
    email: Option<String>,
}

/// Verifies tokens by asking the identity provider who they belong to.
#[derive(Debug, Clone)]
pub struct SupabaseIdentityProvider {
    client: reqwest::Client,
    url: String,
    anon_key: String,
}

impl SupabaseIdentityProvider {
    pub fn new(url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into().trim_end_matches('/').to_string(),
            anon_key: anon_key.into(),
        }
    }
}

#[async_trait]
impl ports::IdentityProvider for SupabaseIdentityProvider {
    async fn verify(&self, token: &str) -> anyhow::Result<entities::AuthUser> {
        let res = self
            .client
            .get(format!("{}/auth/v1/user", self.url))
            .header("apikey", &self.anon_key)
            .header(header::AUTHORIZATION, format!("Bearer {}", token))
            .send()
            .await
            .context("request user")?;

        if !res.status().is_success() {
            return Err(anyhow!("identity provider rejected token: {}", res.status()));
        }

        let user = res.json::<SupabaseUser>().await.context("decode user")?;
        Ok(entities::AuthUser {
            id: entities::UserId::from(user.id),
            email: user.email,
        })
    }
}
