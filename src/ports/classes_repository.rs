use crate::entities;
use async_trait::async_trait;

#[async_trait]
pub trait ClassesRepository: Send + Sync {
    type Error;

    async fn get_by_name(&self, name: &str) -> Result<Option<entities::HeroClass>, Self::Error>;
}
