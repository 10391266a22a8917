// src/handlers/results.rs

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
    models::{
        class_session::SessionFilter,
        result::{BackfillQuery, BackfillReport, ResultPayload, ResultRecord, StudentResult},
    },
};

// POST /api/results
#[utoipa::path(
    post,
    path = "/api/results",
    tag = "Results",
    request_body = ResultPayload,
    params(("x-school-id" = Option<Uuid>, Header, description = "Escola (só para admin)")),
    responses(
        (status = 201, description = "Notas publicadas", body = ResultRecord),
        (status = 400, description = "Lista vazia ou aluno repetido")
    ),
    security(("api_jwt" = []))
)]
pub async fn publish_results(
    State(app_state): State<AppState>,
    locale: Locale,
    _faculty: RequireRole<Faculty>,
    school: SchoolContext,
    Json(payload): Json<ResultPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale))?;

    let record = app_state
        .result_service
        .publish(school.0, &payload)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok((StatusCode::CREATED, Json(record)))
}

// GET /api/results?className=&section=&date=
#[utoipa::path(
    get,
    path = "/api/results",
    tag = "Results",
    params(
        SessionFilter,
        ("x-school-id" = Option<Uuid>, Header, description = "Escola (só para admin)")
    ),
    responses((status = 200, description = "Notas, da mais recente para a mais antiga", body = Vec<ResultRecord>)),
    security(("api_jwt" = []))
)]
pub async fn list_results(
    State(app_state): State<AppState>,
    locale: Locale,
    _faculty: RequireRole<Faculty>,
    school: SchoolContext,
    Query(filter): Query<SessionFilter>,
) -> Result<impl IntoResponse, ApiError> {
    let records = app_state
        .result_service
        .list(school.0, &filter)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(Json(records))
}

// GET /api/results/me
#[utoipa::path(
    get,
    path = "/api/results/me",
    tag = "Results",
    responses(
        (status = 200, description = "Notas da turma do aluno, só com a linha dele", body = Vec<StudentResult>),
        (status = 404, description = "Aluno não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn my_results(
    State(app_state): State<AppState>,
    locale: Locale,
    student: RequireRole<StudentOnly>,
    school: SchoolContext,
) -> Result<impl IntoResponse, ApiError> {
    let records = app_state
        .result_service
        .list_for_student(school.0, student.user.id)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(Json(records))
}

// PUT /api/results/{id}
#[utoipa::path(
    put,
    path = "/api/results/{id}",
    tag = "Results",
    request_body = ResultPayload,
    params(
        ("id" = Uuid, Path, description = "ID do lançamento"),
        ("x-school-id" = Option<Uuid>, Header, description = "Escola (só para admin)")
    ),
    responses(
        (status = 200, description = "Notas substituídas", body = ResultRecord),
        (status = 404, description = "Lançamento não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn replace_results(
    State(app_state): State<AppState>,
    locale: Locale,
    _faculty: RequireRole<Faculty>,
    school: SchoolContext,
    Path(id): Path<Uuid>,
    Json(payload): Json<ResultPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale))?;

    let record = app_state
        .result_service
        .replace(school.0, id, &payload)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(Json(record))
}

// DELETE /api/results/{id}
#[utoipa::path(
    delete,
    path = "/api/results/{id}",
    tag = "Results",
    params(
        ("id" = Uuid, Path, description = "ID do lançamento"),
        ("x-school-id" = Option<Uuid>, Header, description = "Escola (só para admin)")
    ),
    responses(
        (status = 204, description = "Lançamento removido"),
        (status = 404, description = "Lançamento não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_results(
    State(app_state): State<AppState>,
    locale: Locale,
    _faculty: RequireRole<Faculty>,
    school: SchoolContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    app_state
        .result_service
        .delete(school.0, id)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(StatusCode::NO_CONTENT)
}

// POST /api/results/backfill?dryRun=
/// Atribui a escola do chamador às notas antigas sem escola cujos alunos
/// pertencem todos a ela.
#[utoipa::path(
    post,
    path = "/api/results/backfill",
    tag = "Results",
    params(
        BackfillQuery,
        ("x-school-id" = Option<Uuid>, Header, description = "Escola (só para admin)")
    ),
    responses(
        (status = 200, description = "Resumo da reconciliação", body = BackfillReport),
        (status = 400, description = "Escola não identificada"),
        (status = 500, description = "Banco indisponível")
    ),
    security(("api_jwt" = []))
)]
pub async fn backfill_school_ids(
    State(app_state): State<AppState>,
    locale: Locale,
    staff: RequireRole<SchoolStaff>,
    school: SchoolContext,
    Query(query): Query<BackfillQuery>,
) -> Result<impl IntoResponse, ApiError> {
    tracing::info!(
        user_id = %staff.user.id,
        school_id = %school.0,
        dry_run = query.dry_run,
        "Reconciliação de escola solicitada"
    );

    let report = app_state
        .backfill_service
        .backfill_school_ids(school.0, query.dry_run)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(Json(report))
}
