// src/handlers/events.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::ToSchema;
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
    models::event::{EventRange, SchoolEvent},
};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventPayload {
    #[validate(length(min = 1, max = 200, message = "O título é obrigatório."))]
    pub title: String,
    pub description: Option<String>,
    pub date: NaiveDate,
    pub location: Option<String>,
}

// POST /api/events
#[utoipa::path(
    post,
    path = "/api/events",
    tag = "Events",
    request_body = CreateEventPayload,
    params(("x-school-id" = Option<Uuid>, Header, description = "Escola (só para admin)")),
    responses((status = 201, description = "Evento criado", body = SchoolEvent)),
    security(("api_jwt" = []))
)]
pub async fn create_event(
    State(app_state): State<AppState>,
    locale: Locale,
    _staff: RequireRole<SchoolStaff>,
    school: SchoolContext,
    Json(payload): Json<CreateEventPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale))?;

    let event = app_state
        .event_repo
        .create(
            school.0,
            &payload.title,
            payload.description.as_deref(),
            payload.date,
            payload.location.as_deref(),
        )
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok((StatusCode::CREATED, Json(event)))
}

// GET /api/events?from=&to=
#[utoipa::path(
    get,
    path = "/api/events",
    tag = "Events",
    params(
        EventRange,
        ("x-school-id" = Option<Uuid>, Header, description = "Escola (só para admin)")
    ),
    responses(
        (status = 200, description = "Eventos em ordem de data", body = Vec<SchoolEvent>),
        (status = 400, description = "Intervalo inválido")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_events(
    State(app_state): State<AppState>,
    locale: Locale,
    _member: RequireRole<AnyMember>,
    school: SchoolContext,
    Query(range): Query<EventRange>,
) -> Result<impl IntoResponse, ApiError> {
    if let (Some(from), Some(to)) = (range.from, range.to) {
        if from > to {
            return Err(AppError::InvalidDateRange.to_api_error(&locale));
        }
    }

    let events = app_state
        .event_repo
        .list(school.0, &range)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(Json(events))
}

// DELETE /api/events/{id}
#[utoipa::path(
    delete,
    path = "/api/events/{id}",
    tag = "Events",
    params(
        ("id" = Uuid, Path, description = "ID do evento"),
        ("x-school-id" = Option<Uuid>, Header, description = "Escola (só para admin)")
    ),
    responses(
        (status = 204, description = "Evento removido"),
        (status = 404, description = "Evento não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_event(
    State(app_state): State<AppState>,
    locale: Locale,
    _staff: RequireRole<SchoolStaff>,
    school: SchoolContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let deleted = app_state
        .event_repo
        .delete(school.0, id)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    if !deleted {
        return Err(AppError::ResourceNotFound("Evento".into()).to_api_error(&locale));
    }
    Ok(StatusCode::NO_CONTENT)
}
