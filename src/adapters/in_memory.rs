use std::collections::HashMap;
use std::sync::Mutex;

use anyhow::anyhow;
use async_trait::async_trait;

use crate::{entities, ports};

#[derive(Debug, Clone)]
struct StoredHero {
    owner: entities::UserId,
    hero: entities::Hero,
}

/// `HeroesRepository` over a map, for route and client tests.
#[derive(Debug, Default)]
pub struct InMemoryHeroesRepository {
    heroes: Mutex<Vec<StoredHero>>,
    fail_with: Mutex<Option<String>>,
}

impl InMemoryHeroesRepository {
    pub fn insert(&self, owner: entities::UserId, hero: entities::Hero) {
        self.heroes.lock().unwrap().push(StoredHero { owner, hero });
    }

    pub fn fail_with(&self, message: &str) {
        *self.fail_with.lock().unwrap() = Some(message.to_string());
    }

    fn check(&self) -> anyhow::Result<()> {
        match self.fail_with.lock().unwrap().as_ref() {
            Some(message) => Err(anyhow!("{}", message)),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl ports::HeroesRepository for InMemoryHeroesRepository {
    type Error = anyhow::Error;

    async fn list_by_user(
        &self,
        user_id: entities::UserId,
    ) -> Result<Vec<entities::HeroSummary>, Self::Error> {
        self.check()?;
        Ok(self
            .heroes
            .lock()
            .unwrap()
            .iter()
            .filter(|stored| stored.owner == user_id)
            .map(|stored| stored.hero.summary())
            .collect())
    }

    async fn get(
        &self,
        user_id: entities::UserId,
        hero_id: entities::HeroId,
    ) -> Result<Option<entities::Hero>, Self::Error> {
        self.check()?;
        Ok(self
            .heroes
            .lock()
            .unwrap()
            .iter()
            .find(|stored| stored.owner == user_id && stored.hero.id == hero_id)
            .map(|stored| stored.hero.clone()))
    }

    async fn save_state(
        &self,
        user_id: entities::UserId,
        hero_id: entities::HeroId,
        state: entities::HeroState,
    ) -> Result<bool, Self::Error> {
        self.check()?;
        let mut heroes = self.heroes.lock().unwrap();
        match heroes
            .iter_mut()
            .find(|stored| stored.owner == user_id && stored.hero.id == hero_id)
        {
            Some(stored) => {
                stored.hero.state = state;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[derive(Debug, Default)]
pub struct InMemoryClassesRepository {
    classes: Mutex<Vec<entities::HeroClass>>,
}

impl InMemoryClassesRepository {
    pub fn insert(&self, class: entities::HeroClass) {
        self.classes.lock().unwrap().push(class);
    }
}

#[async_trait]
impl ports::ClassesRepository for InMemoryClassesRepository {
    type Error = anyhow::Error;

    async fn get_by_name(&self, name: &str) -> Result<Option<entities::HeroClass>, Self::Error> {
        Ok(self
            .classes
            .lock()
            .unwrap()
            .iter()
            .find(|class| class.name == name)
            .cloned())
    }
}

/// Accepts exactly the tokens it was given.
#[derive(Debug, Default)]
pub struct StaticIdentityProvider {
    tokens: HashMap<String, entities::AuthUser>,
}

impl StaticIdentityProvider {
    pub fn with_token(mut self, token: &str, user: entities::AuthUser) -> Self {
        self.tokens.insert(token.to_string(), user);
        self
    }
}

#[async_trait]
impl ports::IdentityProvider for StaticIdentityProvider {
    async fn verify(&self, token: &str) -> anyhow::Result<entities::AuthUser> {
        self.tokens
            .get(token)
            .cloned()
            .ok_or_else(|| anyhow!("invalid token"))
    }
}
