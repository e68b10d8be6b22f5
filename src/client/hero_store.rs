use std::sync::Arc;

use anyhow::{anyhow, Context};
use arc_swap::ArcSwap;
use tokio::task::JoinHandle;

use super::HeroApi;
use crate::{entities, ShareableError};

/// Immutable snapshot of what the client currently believes.
#[derive(Debug, Clone, Default)]
pub struct HeroStoreState {
    pub heroes: Vec<entities::HeroSummary>,
    pub active_hero: Option<entities::Hero>,
    pub is_loading: bool,
    pub error: Option<ShareableError>,
}

/// What happens to the local cache when a state write fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SyncFailurePolicy {
    /// Log and keep the optimistic value. Client and server stay diverged
    /// until the next successful fetch.
    #[default]
    KeepLocal,
    /// Re-read the hero and replace the cache if it is still the active one.
    Refetch,
}

/// Outcome of one fire-and-forget state write. Dropping it does not cancel the request.
#[derive(Debug)]
pub struct SyncHandle(JoinHandle<Result<(), ShareableError>>);

impl SyncHandle {
    pub async fn outcome(self) -> Result<(), ShareableError> {
        self.0
            .await
            .map_err(|e| ShareableError::from(anyhow!("sync task failed: {}", e)))?
    }
}

/// Hero cache for one signed-in session.
///
/// Writes are optimistic: the cache changes first, then one request carrying the
/// whole state is sent per call. Responses are never merged back except under
/// [`SyncFailurePolicy::Refetch`].
pub struct HeroStore<A> {
    api: Arc<A>,
    state: Arc<ArcSwap<HeroStoreState>>,
    policy: SyncFailurePolicy,
}

impl<A: HeroApi> HeroStore<A> {
    pub fn new(api: A) -> Self {
        Self {
            api: Arc::new(api),
            state: Arc::new(ArcSwap::from_pointee(HeroStoreState::default())),
            policy: SyncFailurePolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: SyncFailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn snapshot(&self) -> Arc<HeroStoreState> {
        self.state.load_full()
    }

    fn start_loading(&self) {
        self.state.rcu(|state| HeroStoreState {
            is_loading: true,
            error: None,
            ..HeroStoreState::clone(state)
        });
    }

    pub async fn fetch_hero_summaries(&self) -> Result<(), ShareableError> {
        self.start_loading();
        match self.api.list_heroes().await.context("fetch heroes") {
            Ok(heroes) => {
                self.state.rcu(|state| HeroStoreState {
                    heroes: heroes.clone(),
                    is_loading: false,
                    ..HeroStoreState::clone(state)
                });
                Ok(())
            }
            Err(e) => {
                log::error!("{:#}", e);
                let e = ShareableError::from(e);
                self.state.rcu(|state| HeroStoreState {
                    heroes: Vec::new(),
                    is_loading: false,
                    error: Some(e.clone()),
                    ..HeroStoreState::clone(state)
                });
                Err(e)
            }
        }
    }

    pub async fn fetch_active_hero(&self, hero_id: entities::HeroId) -> Result<(), ShareableError> {
        self.start_loading();
        match self.api.get_hero(hero_id).await.context("fetch hero") {
            Ok(hero) => {
                self.state.rcu(|state| HeroStoreState {
                    active_hero: Some(hero.clone()),
                    is_loading: false,
                    ..HeroStoreState::clone(state)
                });
                Ok(())
            }
            Err(e) => {
                log::error!("{:#}", e);
                let e = ShareableError::from(e);
                self.state.rcu(|state| HeroStoreState {
                    active_hero: None,
                    is_loading: false,
                    error: Some(e.clone()),
                    ..HeroStoreState::clone(state)
                });
                Err(e)
            }
        }
    }

    pub async fn fetch_class(&self, name: &str) -> anyhow::Result<entities::HeroClass> {
        self.api.get_class(name).await.context("fetch class")
    }

    /// Adds `delta` to one counter of the active hero, clamping at zero.
    /// `None` when no hero is active.
    pub fn adjust_resource(
        &self,
        field: entities::HeroStateField,
        delta: i64,
    ) -> Option<SyncHandle> {
        self.write_active_state(|state| state.adjusted(field, delta))
    }

    pub fn replace_active_hero_state(&self, new_state: entities::HeroState) -> Option<SyncHandle> {
        self.write_active_state(|_| new_state)
    }

    pub fn clear_active_hero(&self) {
        self.state.rcu(|state| HeroStoreState {
            active_hero: None,
            ..HeroStoreState::clone(state)
        });
    }

    fn write_active_state(
        &self,
        f: impl Fn(entities::HeroState) -> entities::HeroState,
    ) -> Option<SyncHandle> {
        let mut written = None;
        self.state.rcu(|state| {
            let mut next = HeroStoreState::clone(state);
            written = next.active_hero.as_mut().map(|hero| {
                hero.state = f(hero.state);
                (hero.id, hero.state)
            });
            next
        });
        let (hero_id, state) = written?;
        Some(self.spawn_sync(hero_id, state))
    }

    fn spawn_sync(&self, hero_id: entities::HeroId, hero_state: entities::HeroState) -> SyncHandle {
        let api = self.api.clone();
        let state = self.state.clone();
        let policy = self.policy;

        SyncHandle(tokio::spawn(async move {
            let result = api
                .save_hero_state(hero_id, hero_state)
                .await
                .with_context(|| format!("sync hero {} state", hero_id));
            if let Err(e) = &result {
                log::error!("{:#}", e);
                if policy == SyncFailurePolicy::Refetch {
                    refetch(&*api, &state, hero_id).await;
                }
            }
            result.map_err(ShareableError::from)
        }))
    }
}

async fn refetch<A: HeroApi>(api: &A, state: &ArcSwap<HeroStoreState>, hero_id: entities::HeroId) {
    match api.get_hero(hero_id).await {
        Ok(hero) => {
            state.rcu(|current| {
                let mut next = HeroStoreState::clone(current);
                if let Some(active) = next.active_hero.as_mut().filter(|h| h.id == hero_id) {
                    *active = hero.clone();
                }
                next
            });
        }
        Err(e) => log::warn!("refetch hero {} after failed sync: {:#}", hero_id, e),
    }
}
