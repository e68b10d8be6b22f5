use anyhow::Context;
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use thiserror::Error;

use super::PlayerSession;
use crate::app_config::ClientConfig;
use crate::entities;

/// Backend operations the client store depends on.
#[async_trait]
pub trait HeroApi: Send + Sync + 'static {
    async fn list_heroes(&self) -> anyhow::Result<Vec<entities::HeroSummary>>;

    async fn get_hero(&self, hero_id: entities::HeroId) -> anyhow::Result<entities::Hero>;

    async fn save_hero_state(
        &self,
        hero_id: entities::HeroId,
        state: entities::HeroState,
    ) -> anyhow::Result<()>;

    async fn get_class(&self, name: &str) -> anyhow::Result<entities::HeroClass>;
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{method} {path} failed with {status}")]
pub struct RequestFailed {
    pub method: &'static str,
    pub path: String,
    pub status: StatusCode,
}

#[derive(Debug, Clone)]
pub struct HttpHeroApi {
    client: reqwest::Client,
    base_url: String,
    token: String,
}

impl HttpHeroApi {
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
        }
    }

    pub fn for_session(base_url: impl Into<String>, session: &PlayerSession) -> Self {
        Self::new(base_url, session.access_token.clone())
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(config.api_base_url.clone(), config.api_token.clone())
    }

    async fn get_json<T: DeserializeOwned>(&self, path: String) -> anyhow::Result<T> {
        let res = self
            .client
            .get(format!("{}{}", self.base_url, path))
            .bearer_auth(&self.token)
            .send()
            .await
            .with_context(|| format!("GET {}", path))?;
        if !res.status().is_success() {
            return Err(RequestFailed {
                method: "GET",
                status: res.status(),
                path,
            }
            .into());
        }
        res.json::<T>()
            .await
            .with_context(|| format!("decode GET {}", path))
    }
}

#[async_trait]
impl HeroApi for HttpHeroApi {
    async fn list_heroes(&self) -> anyhow::Result<Vec<entities::HeroSummary>> {
        self.get_json("/heroes/player".to_string()).await
    }

    async fn get_hero(&self, hero_id: entities::HeroId) -> anyhow::Result<entities::Hero> {
        self.get_json(format!("/heroes/{}/full", hero_id)).await
    }

    async fn save_hero_state(
        &self,
        hero_id: entities::HeroId,
        state: entities::HeroState,
    ) -> anyhow::Result<()> {
        let path = format!("/heroes/{}/state", hero_id);
        let res = self
            .client
            .post(format!("{}{}", self.base_url, path))
            .bearer_auth(&self.token)
            .json(&state)
            .send()
            .await
            .with_context(|| format!("POST {}", path))?;
        if !res.status().is_success() {
            return Err(RequestFailed {
                method: "POST",
                status: res.status(),
                path,
            }
            .into());
        }
        Ok(())
    }

    async fn get_class(&self, name: &str) -> anyhow::Result<entities::HeroClass> {
        self.get_json(format!("/classes/{}", name)).await
    }
}
