// src/handlers/students.rs

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
        rbac::{Faculty, RequireRole, SchoolStaff, StudentOnly},
        tenancy::SchoolContext,
    },
    models::student::{Student, StudentFilter, StudentPayload},
};

// POST /api/students
#[utoipa::path(
    post,
    path = "/api/students",
    tag = "Students",
    request_body = StudentPayload,
    params(("x-school-id" = Option<Uuid>, Header, description = "Escola (só para admin)")),
    responses(
        (status = 201, description = "Aluno matriculado", body = Student),
        (status = 409, description = "E-mail já cadastrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_student(
    State(app_state): State<AppState>,
    locale: Locale,
    _staff: RequireRole<SchoolStaff>,
    school: SchoolContext,
    Json(payload): Json<StudentPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale))?;

    let student = app_state
        .student_repo
        .create(school.0, &payload)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok((StatusCode::CREATED, Json(student)))
}

// GET /api/students?class=&sec=
#[utoipa::path(
    get,
    path = "/api/students",
    tag = "Students",
    params(
        StudentFilter,
        ("x-school-id" = Option<Uuid>, Header, description = "Escola (só para admin)")
    ),
    responses((status = 200, description = "Alunos da escola", body = Vec<Student>)),
    security(("api_jwt" = []))
)]
pub async fn list_students(
    State(app_state): State<AppState>,
    locale: Locale,
    _faculty: RequireRole<Faculty>,
    school: SchoolContext,
    Query(filter): Query<StudentFilter>,
) -> Result<impl IntoResponse, ApiError> {
    let students = app_state
        .student_repo
        .list(school.0, &filter)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(Json(students))
}

// GET /api/students/me
#[utoipa::path(
    get,
    path = "/api/students/me",
    tag = "Students",
    responses(
        (status = 200, description = "Cadastro do aluno logado", body = Student),
        (status = 404, description = "Aluno não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_my_profile(
    State(app_state): State<AppState>,
    locale: Locale,
    student: RequireRole<StudentOnly>,
    school: SchoolContext,
) -> Result<impl IntoResponse, ApiError> {
    let profile = app_state
        .student_repo
        .find_by_id(school.0, student.user.id)
        .await
        .and_then(|found| found.ok_or_else(|| AppError::ResourceNotFound("Aluno".into())))
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(Json(profile))
}

// PUT /api/students/{id}
#[utoipa::path(
    put,
    path = "/api/students/{id}",
    tag = "Students",
    request_body = StudentPayload,
    params(
        ("id" = Uuid, Path, description = "ID do aluno"),
        ("x-school-id" = Option<Uuid>, Header, description = "Escola (só para admin)")
    ),
    responses(
        (status = 200, description = "Aluno atualizado", body = Student),
        (status = 404, description = "Aluno não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_student(
    State(app_state): State<AppState>,
    locale: Locale,
    _staff: RequireRole<SchoolStaff>,
    school: SchoolContext,
    Path(id): Path<Uuid>,
    Json(payload): Json<StudentPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale))?;

    let student = app_state
        .student_repo
        .update(school.0, id, &payload)
        .await
        .and_then(|found| found.ok_or_else(|| AppError::ResourceNotFound("Aluno".into())))
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(Json(student))
}

// DELETE /api/students/{id}
#[utoipa::path(
    delete,
    path = "/api/students/{id}",
    tag = "Students",
    params(
        ("id" = Uuid, Path, description = "ID do aluno"),
        ("x-school-id" = Option<Uuid>, Header, description = "Escola (só para admin)")
    ),
    responses(
        (status = 204, description = "Aluno removido"),
        (status = 404, description = "Aluno não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_student(
    State(app_state): State<AppState>,
    locale: Locale,
    _staff: RequireRole<SchoolStaff>,
    school: SchoolContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let deleted = app_state
        .student_repo
        .delete(school.0, id)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    if !deleted {
        return Err(AppError::ResourceNotFound("Aluno".into()).to_api_error(&locale));
    }
    Ok(StatusCode::NO_CONTENT)
}
