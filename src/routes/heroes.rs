use actix_web::{web, HttpResponse};
use serde::Serialize;

use super::{ApiError, AppState};
use crate::auth::CurrentUser;
use crate::entities;

const HERO_NOT_FOUND: &str = "Hero not found";

#[derive(Debug, Serialize)]
struct SuccessBody {
    success: bool,
}

// 不正なIDは存在しないヒーローと区別しない
fn parse_hero_id(raw: &str) -> Result<entities::HeroId, ApiError> {
    raw.parse().map_err(|_| ApiError::NotFound(HERO_NOT_FOUND))
}

pub async fn list_player_heroes(
    state: web::Data<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<web::Json<Vec<entities::HeroSummary>>, ApiError> {
    let heroes = state.heroes.list_by_user(user.id).await?;
    Ok(web::Json(heroes))
}

pub async fn get_full_hero(
    state: web::Data<AppState>,
    CurrentUser(user): CurrentUser,
    id: web::Path<String>,
) -> Result<web::Json<entities::Hero>, ApiError> {
    let hero_id = parse_hero_id(&id)?;
    state
        .heroes
        .get(user.id, hero_id)
        .await?
        .map(web::Json)
        .ok_or(ApiError::NotFound(HERO_NOT_FOUND))
}

pub async fn update_hero_state(
    state: web::Data<AppState>,
    CurrentUser(user): CurrentUser,
    id: web::Path<String>,
    body: web::Json<entities::HeroState>,
) -> Result<HttpResponse, ApiError> {
    let hero_id = parse_hero_id(&id)?;
    let saved = state
        .heroes
        .save_state(user.id, hero_id, body.into_inner())
        .await?;
    if !saved {
        return Err(ApiError::NotFound(HERO_NOT_FOUND));
    }
    log::debug!("hero {} state saved by {}", hero_id, user.id);

    Ok(HttpResponse::Ok().json(SuccessBody { success: true }))
}
