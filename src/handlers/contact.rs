// src/handlers/contact.rs

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
    models::contact::{ContactMessage, ContactPayload},
};

// POST /api/contact (pública)
#[utoipa::path(
    post,
    path = "/api/contact",
    tag = "Contact",
    request_body = ContactPayload,
    responses(
        (status = 201, description = "Mensagem recebida", body = ContactMessage),
        (status = 400, description = "Dados inválidos")
    )
)]
pub async fn send_message(
    State(app_state): State<AppState>,
    locale: Locale,
    Json(payload): Json<ContactPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale))?;

    let message = app_state
        .contact_repo
        .create(&payload)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok((StatusCode::CREATED, Json(message)))
}

// GET /api/contact
#[utoipa::path(
    get,
    path = "/api/contact",
    tag = "Contact",
    responses((status = 200, description = "Mensagens, mais novas primeiro", body = Vec<ContactMessage>)),
    security(("api_jwt" = []))
)]
pub async fn list_messages(
    State(app_state): State<AppState>,
    locale: Locale,
    _admin: RequireRole<AdminOnly>,
) -> Result<impl IntoResponse, ApiError> {
    let messages = app_state
        .contact_repo
        .list()
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(Json(messages))
}

// DELETE /api/contact/{id}
#[utoipa::path(
    delete,
    path = "/api/contact/{id}",
    tag = "Contact",
    params(("id" = Uuid, Path, description = "ID da mensagem")),
    responses(
        (status = 204, description = "Mensagem removida"),
        (status = 404, description = "Mensagem não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_message(
    State(app_state): State<AppState>,
    locale: Locale,
    _admin: RequireRole<AdminOnly>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let deleted = app_state
        .contact_repo
        .delete(id)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    if !deleted {
        return Err(AppError::ResourceNotFound("Mensagem".into()).to_api_error(&locale));
    }
    Ok(StatusCode::NO_CONTENT)
}
