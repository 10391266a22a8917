// src/handlers/attendance.rs

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
        rbac::{Faculty, RequireRole, StudentOnly},
        tenancy::SchoolContext,
    },
    models::{
        attendance::{AttendancePayload, AttendanceRecord, StudentAttendance},
        class_session::SessionFilter,
    },
};

// POST /api/attendance
#[utoipa::path(
    post,
    path = "/api/attendance",
    tag = "Attendance",
    request_body = AttendancePayload,
    params(("x-school-id" = Option<Uuid>, Header, description = "Escola (só para admin)")),
    responses(
        (status = 201, description = "Chamada registrada", body = AttendanceRecord),
        (status = 400, description = "Lista vazia ou aluno repetido")
    ),
    security(("api_jwt" = []))
)]
pub async fn record_attendance(
    State(app_state): State<AppState>,
    locale: Locale,
    _faculty: RequireRole<Faculty>,
    school: SchoolContext,
    Json(payload): Json<AttendancePayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale))?;

    let record = app_state
        .attendance_service
        .record(school.0, &payload)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok((StatusCode::CREATED, Json(record)))
}

// GET /api/attendance?className=&section=&date=
#[utoipa::path(
    get,
    path = "/api/attendance",
    tag = "Attendance",
    params(
        SessionFilter,
        ("x-school-id" = Option<Uuid>, Header, description = "Escola (só para admin)")
    ),
    responses((status = 200, description = "Chamadas, da mais recente para a mais antiga", body = Vec<AttendanceRecord>)),
    security(("api_jwt" = []))
)]
pub async fn list_attendance(
    State(app_state): State<AppState>,
    locale: Locale,
    _faculty: RequireRole<Faculty>,
    school: SchoolContext,
    Query(filter): Query<SessionFilter>,
) -> Result<impl IntoResponse, ApiError> {
    let records = app_state
        .attendance_service
        .list(school.0, &filter)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(Json(records))
}

// GET /api/attendance/me
#[utoipa::path(
    get,
    path = "/api/attendance/me",
    tag = "Attendance",
    responses(
        (status = 200, description = "Chamadas da turma do aluno, só com a linha dele", body = Vec<StudentAttendance>),
        (status = 404, description = "Aluno não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn my_attendance(
    State(app_state): State<AppState>,
    locale: Locale,
    student: RequireRole<StudentOnly>,
    school: SchoolContext,
) -> Result<impl IntoResponse, ApiError> {
    let records = app_state
        .attendance_service
        .list_for_student(school.0, student.user.id)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(Json(records))
}

// PUT /api/attendance/{id}
#[utoipa::path(
    put,
    path = "/api/attendance/{id}",
    tag = "Attendance",
    request_body = AttendancePayload,
    params(
        ("id" = Uuid, Path, description = "ID da chamada"),
        ("x-school-id" = Option<Uuid>, Header, description = "Escola (só para admin)")
    ),
    responses(
        (status = 200, description = "Chamada substituída", body = AttendanceRecord),
        (status = 404, description = "Chamada não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn replace_attendance(
    State(app_state): State<AppState>,
    locale: Locale,
    _faculty: RequireRole<Faculty>,
    school: SchoolContext,
    Path(id): Path<Uuid>,
    Json(payload): Json<AttendancePayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale))?;

    let record = app_state
        .attendance_service
        .replace(school.0, id, &payload)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(Json(record))
}

// DELETE /api/attendance/{id}
#[utoipa::path(
    delete,
    path = "/api/attendance/{id}",
    tag = "Attendance",
    params(
        ("id" = Uuid, Path, description = "ID da chamada"),
        ("x-school-id" = Option<Uuid>, Header, description = "Escola (só para admin)")
    ),
    responses(
        (status = 204, description = "Chamada removida"),
        (status = 404, description = "Chamada não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_attendance(
    State(app_state): State<AppState>,
    locale: Locale,
    _faculty: RequireRole<Faculty>,
    school: SchoolContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    app_state
        .attendance_service
        .delete(school.0, id)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(StatusCode::NO_CONTENT)
}
