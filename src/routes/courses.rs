use axum::extract::Path;
use axum::Json;

use crate::catalog::{self, CourseId, CourseInfo};
use crate::error::AppError;

pub async fn list() -> Json<&'static [CourseInfo]> {
    Json(catalog::courses())
}

pub async fn get(Path(id): Path<String>) -> Result<Json<&'static CourseInfo>, AppError> {
    CourseId::parse(&id)
        .and_then(catalog::find)
        .map(Json)
        .ok_or_else(|| AppError::NotFound("コースが見つかりません。".to_string()))
}
