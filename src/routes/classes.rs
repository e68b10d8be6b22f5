use actix_web::web;

use super::{ApiError, AppState};
use crate::entities;

pub async fn get_class(
    state: web::Data<AppState>,
    name: web::Path<String>,
) -> Result<web::Json<entities::HeroClass>, ApiError> {
    state
        .classes
        .get_by_name(&name)
        .await?
        .map(web::Json)
        .ok_or(ApiError::NotFound("Class not found"))
}
