// src/handlers/teachers.rs

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
        rbac::{Faculty, RequireRole, SchoolStaff},
        tenancy::SchoolContext,
    },
    models::teacher::{Teacher, TeacherPayload},
};

// POST /api/teachers
#[utoipa::path(
    post,
    path = "/api/teachers",
    tag = "Teachers",
    request_body = TeacherPayload,
    params(("x-school-id" = Option<Uuid>, Header, description = "Escola (só para admin)")),
    responses(
        (status = 201, description = "Professor cadastrado", body = Teacher),
        (status = 409, description = "E-mail já cadastrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_teacher(
    State(app_state): State<AppState>,
    locale: Locale,
    _staff: RequireRole<SchoolStaff>,
    school: SchoolContext,
    Json(payload): Json<TeacherPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale))?;

    let teacher = app_state
        .teacher_repo
        .create(school.0, &payload)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok((StatusCode::CREATED, Json(teacher)))
}

// GET /api/teachers
#[utoipa::path(
    get,
    path = "/api/teachers",
    tag = "Teachers",
    params(("x-school-id" = Option<Uuid>, Header, description = "Escola (só para admin)")),
    responses((status = 200, description = "Professores da escola", body = Vec<Teacher>)),
    security(("api_jwt" = []))
)]
pub async fn list_teachers(
    State(app_state): State<AppState>,
    locale: Locale,
    _faculty: RequireRole<Faculty>,
    school: SchoolContext,
) -> Result<impl IntoResponse, ApiError> {
    let teachers = app_state
        .teacher_repo
        .list(school.0)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(Json(teachers))
}

// PUT /api/teachers/{id}
#[utoipa::path(
    put,
    path = "/api/teachers/{id}",
    tag = "Teachers",
    request_body = TeacherPayload,
    params(
        ("id" = Uuid, Path, description = "ID do professor"),
        ("x-school-id" = Option<Uuid>, Header, description = "Escola (só para admin)")
    ),
    responses(
        (status = 200, description = "Professor atualizado", body = Teacher),
        (status = 404, description = "Professor não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_teacher(
    State(app_state): State<AppState>,
    locale: Locale,
    _staff: RequireRole<SchoolStaff>,
    school: SchoolContext,
    Path(id): Path<Uuid>,
    Json(payload): Json<TeacherPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale))?;

    let teacher = app_state
        .teacher_repo
        .update(school.0, id, &payload)
        .await
        .and_then(|found| found.ok_or_else(|| AppError::ResourceNotFound("Professor".into())))
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(Json(teacher))
}

// DELETE /api/teachers/{id}
#[utoipa::path(
    delete,
    path = "/api/teachers/{id}",
    tag = "Teachers",
    params(
        ("id" = Uuid, Path, description = "ID do professor"),
        ("x-school-id" = Option<Uuid>, Header, description = "Escola (só para admin)")
    ),
    responses(
        (status = 204, description = "Professor removido"),
        (status = 404, description = "Professor não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_teacher(
    State(app_state): State<AppState>,
    locale: Locale,
    _staff: RequireRole<SchoolStaff>,
    school: SchoolContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let deleted = app_state
        .teacher_repo
        .delete(school.0, id)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    if !deleted {
        return Err(AppError::ResourceNotFound("Professor".into()).to_api_error(&locale));
    }
    Ok(StatusCode::NO_CONTENT)
}
