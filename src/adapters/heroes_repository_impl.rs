use anyhow::Context;
use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{entities, ports};

#[derive(Debug, Clone, sqlx::FromRow)]
struct HeroSummaryModel {
    id: Uuid,
    name: String,
    level: i32,
    class: Option<String>,
}

#[derive(Debug, Clone, sqlx::FromRow)]
struct HeroModel {
    id: Uuid,
    name: String,
    level: i32,
    class: Option<String>,
    state: Option<Json<serde_json::Value>>,
}

fn class_name(class: Option<String>) -> String {
    class.unwrap_or_else(|| entities::UNKNOWN_CLASS.to_string())
}

fn decode_state(state: Option<Json<serde_json::Value>>) -> anyhow::Result<entities::HeroState> {
    match state {
        None | Some(Json(serde_json::Value::Null)) => Ok(entities::HeroState::default()),
        Some(Json(value)) => serde_json::from_value(value).context("decode hero state"),
    }
}

#[derive(Debug, Clone)]
pub struct HeroesRepositoryImpl {
    db: PgPool,
}

impl HeroesRepositoryImpl {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ports::HeroesRepository for HeroesRepositoryImpl {
    type Error = anyhow::Error;

    async fn list_by_user(
        &self,
        user_id: entities::UserId,
    ) -> Result<Vec<entities::HeroSummary>, Self::Error> {
        let records = sqlx::query_as::<_, HeroSummaryModel>(
            r#"
            SELECT
                h.id,
                h.name,
                h.level,
                c.name AS class
            FROM
                heroes h
                LEFT JOIN classes c ON h.class_id = c.id
            WHERE
                h.user_id = $1
            ORDER BY
                h.name, h.id
            "#,
        )
        .bind(Uuid::from(user_id))
        .fetch_all(&self.db)
        .await
        .context("select heroes")?;

        records
            .into_iter()
            .map(|record| -> anyhow::Result<_> {
                Ok(entities::HeroSummary {
                    id: entities::HeroId::from(record.id),
                    name: record.name,
                    level: u32::try_from(record.level).context("level")?,
                    class: class_name(record.class),
                })
            })
            .collect()
    }

    async fn get(
        &self,
        user_id: entities::UserId,
        hero_id: entities::HeroId,
    ) -> Result<Option<entities::Hero>, Self::Error> {
        let record = sqlx::query_as::<_, HeroModel>(
            r#"
            SELECT
                h.id,
                h.name,
                h.level,
                c.name AS class,
                h.state
            FROM
                heroes h
                LEFT JOIN classes c ON h.class_id = c.id
            WHERE
                h.id = $1
                AND
                h.user_id = $2
            "#,
        )
        .bind(Uuid::from(hero_id))
        .bind(Uuid::from(user_id))
        .fetch_optional(&self.db)
        .await
        .context("select hero")?;

        record
            .map(|record| -> anyhow::Result<_> {
                Ok(entities::Hero {
                    id: entities::HeroId::from(record.id),
                    name: record.name,
                    level: u32::try_from(record.level).context("level")?,
                    class: class_name(record.class),
                    state: decode_state(record.state)?,
                    // features are not stored yet
                    features: Vec::new(),
                })
            })
            .transpose()
    }

    async fn save_state(
        &self,
        user_id: entities::UserId,
        hero_id: entities::HeroId,
        state: entities::HeroState,
    ) -> Result<bool, Self::Error> {
        let result = sqlx::query(
            r#"
            UPDATE heroes
                SET
                    state = $1
                WHERE
                    id = $2
                    AND
                    user_id = $3
            "#,
        )
        .bind(Json(state))
        .bind(Uuid::from(hero_id))
        .bind(Uuid::from(user_id))
        .execute(&self.db)
        .await
        .context("update hero state")?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::HeroesRepository;

    async fn insert_class(pool: &PgPool, name: &str) -> Uuid {
        sqlx::query_scalar::<_, Uuid>(
            "INSERT INTO classes (name, stats) VALUES ($1, $2) RETURNING id",
        )
        .bind(name)
        .bind(Json(entities::ClassStats::for_class(name)))
        .fetch_one(pool)
        .await
        .unwrap()
    }

    async fn insert_hero(
        pool: &PgPool,
        user_id: Uuid,
        class_id: Option<Uuid>,
        name: &str,
        state: Option<serde_json::Value>,
    ) -> entities::HeroId {
        let id = sqlx::query_scalar::<_, Uuid>(
            "INSERT INTO heroes (user_id, class_id, name, level, state) \
             VALUES ($1, $2, $3, 3, $4) RETURNING id",
        )
        .bind(user_id)
        .bind(class_id)
        .bind(name)
        .bind(state.map(Json))
        .fetch_one(pool)
        .await
        .unwrap();
        entities::HeroId::from(id)
    }

    #[sqlx::test]
    async fn test_heroes_repository(pool: PgPool) {
        let repo = HeroesRepositoryImpl::new(pool.clone());
        let owner = Uuid::new_v4();
        let other = Uuid::new_v4();
        let shadow = insert_class(&pool, "Shadow").await;

        assert!(repo
            .list_by_user(entities::UserId::from(owner))
            .await
            .unwrap()
            .is_empty());

        let hero_id = insert_hero(&pool, owner, Some(shadow), "Vex", None).await;
        let state = serde_json::json!({"victories": 2});
        insert_hero(&pool, owner, None, "Nameless", Some(state)).await;
        insert_hero(&pool, other, Some(shadow), "Someone else", None).await;

        let summaries = repo
            .list_by_user(entities::UserId::from(owner))
            .await
            .unwrap();
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].name, "Nameless");
        assert_eq!(summaries[0].class, entities::UNKNOWN_CLASS);
        assert_eq!(summaries[1].class, "Shadow");

        let hero = repo
            .get(entities::UserId::from(owner), hero_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(hero.level, 3);
        assert_eq!(hero.state, entities::HeroState::default());
        assert!(hero.features.is_empty());

        assert_eq!(
            repo.get(entities::UserId::from(other), hero_id).await.unwrap(),
            None
        );

        let state = entities::HeroState {
            stamina_damage: 7,
            recoveries_used: 2,
            victories: 1,
        };
        assert!(repo
            .save_state(entities::UserId::from(owner), hero_id, state)
            .await
            .unwrap());
        assert!(!repo
            .save_state(entities::UserId::from(other), hero_id, entities::HeroState::default())
            .await
            .unwrap());

        let fetched = repo
            .get(entities::UserId::from(owner), hero_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(fetched.state, state);
    }
}
