// src/handlers/schools.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::{
        i18n::Locale,
        rbac::{AdminOnly, RequireRole},
    },
    models::school::{CreateSchoolPayload, School},
};

// POST /api/schools
#[utoipa::path(
    post,
    path = "/api/schools",
    tag = "Schools",
    request_body = CreateSchoolPayload,
    responses(
        (status = 201, description = "Escola criada", body = School),
        (status = 409, description = "E-mail já cadastrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_school(
    State(app_state): State<AppState>,
    locale: Locale,
    _admin: RequireRole<AdminOnly>,
    Json(payload): Json<CreateSchoolPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale))?;

    let school = app_state
        .school_repo
        .create(&payload)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    tracing::info!(school_id = %school.id, "Escola criada");
    Ok((StatusCode::CREATED, Json(school)))
}

// GET /api/schools
#[utoipa::path(
    get,
    path = "/api/schools",
    tag = "Schools",
    responses((status = 200, description = "Todas as escolas", body = Vec<School>)),
    security(("api_jwt" = []))
)]
pub async fn list_schools(
    State(app_state): State<AppState>,
    locale: Locale,
    _admin: RequireRole<AdminOnly>,
) -> Result<impl IntoResponse, ApiError> {
    let schools = app_state
        .school_repo
        .list()
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(Json(schools))
}

// GET /api/schools/{id}
#[utoipa::path(
    get,
    path = "/api/schools/{id}",
    tag = "Schools",
    params(("id" = Uuid, Path, description = "ID da escola")),
    responses(
        (status = 200, description = "Escola", body = School),
        (status = 404, description = "Escola não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_school(
    State(app_state): State<AppState>,
    locale: Locale,
    _admin: RequireRole<AdminOnly>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let school = app_state
        .school_repo
        .find_by_id(id)
        .await
        .and_then(|found| found.ok_or_else(|| AppError::ResourceNotFound("Escola".into())))
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(Json(school))
}

// DELETE /api/schools/{id}
#[utoipa::path(
    delete,
    path = "/api/schools/{id}",
    tag = "Schools",
    params(("id" = Uuid, Path, description = "ID da escola")),
    responses(
        (status = 204, description = "Escola removida"),
        (status = 404, description = "Escola não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_school(
    State(app_state): State<AppState>,
    locale: Locale,
    _admin: RequireRole<AdminOnly>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let deleted = app_state
        .school_repo
        .delete(id)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    if !deleted {
        return Err(AppError::ResourceNotFound("Escola".into()).to_api_error(&locale));
    }

    tracing::warn!(school_id = %id, "Escola removida");
    Ok(StatusCode::NO_CONTENT)
}
