// src/handlers/schedules.rs

use axum::{
    extract::{Path, Query, State},
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
        rbac::{AnyMember, RequireRole, SchoolStaff},
        tenancy::SchoolContext,
    },
    models::schedule::{CalendarEntry, CalendarQuery, ClassSchedule, ScheduleFilter, SchedulePayload},
};

// POST /api/schedules
#[utoipa::path(
    post,
    path = "/api/schedules",
    tag = "Schedules",
    request_body = SchedulePayload,
    params(("x-school-id" = Option<Uuid>, Header, description = "Escola (só para admin)")),
    responses(
        (status = 201, description = "Aula adicionada à grade", body = ClassSchedule),
        (status = 400, description = "Horário inválido")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_schedule(
    State(app_state): State<AppState>,
    locale: Locale,
    _staff: RequireRole<SchoolStaff>,
    school: SchoolContext,
    Json(payload): Json<SchedulePayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale))?;

    let schedule = app_state
        .schedule_service
        .create(school.0, &payload)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok((StatusCode::CREATED, Json(schedule)))
}

// GET /api/schedules?className=&section=
#[utoipa::path(
    get,
    path = "/api/schedules",
    tag = "Schedules",
    params(
        ScheduleFilter,
        ("x-school-id" = Option<Uuid>, Header, description = "Escola (só para admin)")
    ),
    responses((status = 200, description = "Grade semanal", body = Vec<ClassSchedule>)),
    security(("api_jwt" = []))
)]
pub async fn list_schedules(
    State(app_state): State<AppState>,
    locale: Locale,
    _member: RequireRole<AnyMember>,
    school: SchoolContext,
    Query(filter): Query<ScheduleFilter>,
) -> Result<impl IntoResponse, ApiError> {
    let schedules = app_state
        .schedule_service
        .list(school.0, &filter)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(Json(schedules))
}

// GET /api/schedules/calendar?from=&to=&className=&section=
#[utoipa::path(
    get,
    path = "/api/schedules/calendar",
    tag = "Schedules",
    params(
        CalendarQuery,
        ("x-school-id" = Option<Uuid>, Header, description = "Escola (só para admin)")
    ),
    responses(
        (status = 200, description = "Aulas por data", body = Vec<CalendarEntry>),
        (status = 400, description = "Intervalo inválido ou turma ausente")
    ),
    security(("api_jwt" = []))
)]
pub async fn class_calendar(
    State(app_state): State<AppState>,
    locale: Locale,
    member: RequireRole<AnyMember>,
    school: SchoolContext,
    Query(query): Query<CalendarQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let entries = app_state
        .schedule_service
        .calendar(&member.user, school.0, &query)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(Json(entries))
}

// DELETE /api/schedules/{id}
#[utoipa::path(
    delete,
    path = "/api/schedules/{id}",
    tag = "Schedules",
    params(
        ("id" = Uuid, Path, description = "ID da aula"),
        ("x-school-id" = Option<Uuid>, Header, description = "Escola (só para admin)")
    ),
    responses(
        (status = 204, description = "Aula removida da grade"),
        (status = 404, description = "Aula não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_schedule(
    State(app_state): State<AppState>,
    locale: Locale,
    _staff: RequireRole<SchoolStaff>,
    school: SchoolContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    app_state
        .schedule_service
        .delete(school.0, id)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(StatusCode::NO_CONTENT)
}
