use crate::entities;
use async_trait::async_trait;

#[async_trait]
pub trait HeroesRepository: Send + Sync {
    type Error;

    async fn list_by_user(
        &self,
        user_id: entities::UserId,
    ) -> Result<Vec<entities::HeroSummary>, Self::Error>;

    /// Returns `None` for a missing hero and for a hero owned by someone else.
    async fn get(
        &self,
        user_id: entities::UserId,
        hero_id: entities::HeroId,
    ) -> Result<Option<entities::Hero>, Self::Error>;

    /// Overwrites the whole state. Returns `false` when no owned hero matched.
    async fn save_state(
        &self,
        user_id: entities::UserId,
        hero_id: entities::HeroId,
        state: entities::HeroState,
    ) -> Result<bool, Self::Error>;
}
