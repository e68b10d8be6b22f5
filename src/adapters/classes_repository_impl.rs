use anyhow::Context;
use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{entities, ports};

#[derive(Debug, Clone, sqlx::FromRow)]
struct ClassModel {
    id: Uuid,
    name: String,
    stats: Json<entities::ClassStats>,
}

#[derive(Debug, Clone)]
pub struct ClassesRepositoryImpl {
    db: PgPool,
}

impl ClassesRepositoryImpl {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ports::ClassesRepository for ClassesRepositoryImpl {
    type Error = anyhow::Error;

    async fn get_by_name(&self, name: &str) -> Result<Option<entities::HeroClass>, Self::Error> {
        let record = sqlx::query_as::<_, ClassModel>(
            r#"
            SELECT
                id,
                name,
                stats
            FROM
                classes
            WHERE
                name = $1
            "#,
        )
        .bind(name)
        .fetch_optional(&self.db)
        .await
        .context("select class")?;

        Ok(record.map(|record| entities::HeroClass {
            id: record.id,
            name: record.name,
            stats: record.stats.0,
        }))
    }
}
