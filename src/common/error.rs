// src/common/error.rs

use std::collections::HashMap;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use thiserror::Error;
use uuid::Uuid;

use crate::middleware::i18n::Locale;

// Erro de domínio. Os handlers convertem para ApiError com o idioma do cliente.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Token inválido")]
    InvalidToken,

    #[error("Papel '{0}' sem acesso a este recurso")]
    Forbidden(String),

    #[error("Contexto de escola ausente")]
    MissingTenantContext,

    #[error("Recurso não encontrado: {0}")]
    ResourceNotFound(String),

    #[error("Aluno {0} repetido na lista da turma")]
    DuplicateStudentInRoster(Uuid),

    #[error("Intervalo de datas inválido")]
    InvalidDateRange,

    #[error("Horário de início deve ser antes do fim")]
    InvalidTimeRange,

    #[error("Parâmetro obrigatório ausente: {0}")]
    MissingQueryParameter(&'static str),

    #[error("E-mail já existe")]
    EmailAlreadyExists,

    // Falha de transporte (rede, TLS, pool esgotado/fechado)
    #[error("Banco de dados indisponível: {0}")]
    StoreUnavailable(String),

    #[error("Erro de banco de dados: {0}")]
    DatabaseError(sqlx::Error),
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed => AppError::StoreUnavailable(e.to_string()),
            other => AppError::DatabaseError(other),
        }
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_)
            | AppError::MissingTenantContext
            | AppError::DuplicateStudentInRoster(_)
            | AppError::InvalidDateRange
            | AppError::InvalidTimeRange
            | AppError::MissingQueryParameter(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidToken => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::ResourceNotFound(_) => StatusCode::NOT_FOUND,
            AppError::EmailAlreadyExists => StatusCode::CONFLICT,
            AppError::StoreUnavailable(_) | AppError::DatabaseError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn message(&self, lang: &str) -> String {
        let pt = lang == "pt";
        match self {
            AppError::ValidationError(_) if pt => "Um ou mais campos são inválidos.".into(),
            AppError::ValidationError(_) => "One or more fields are invalid.".into(),
            AppError::InvalidToken if pt => "Token de autenticação inválido ou ausente.".into(),
            AppError::InvalidToken => "Invalid or missing authentication token.".into(),
            AppError::Forbidden(role) if pt => {
                format!("O papel '{}' não tem acesso a este recurso.", role)
            }
            AppError::Forbidden(role) => format!("Role '{}' cannot access this resource.", role),
            AppError::MissingTenantContext if pt => {
                "Nenhuma escola associada à requisição.".into()
            }
            AppError::MissingTenantContext => "No school is associated with this request.".into(),
            AppError::ResourceNotFound(what) if pt => format!("{} não encontrado.", what),
            AppError::ResourceNotFound(what) => format!("{} not found.", what),
            AppError::DuplicateStudentInRoster(id) if pt => {
                format!("O aluno {} aparece mais de uma vez na lista.", id)
            }
            AppError::DuplicateStudentInRoster(id) => {
                format!("Student {} appears more than once in the roster.", id)
            }
            AppError::InvalidDateRange if pt => "Intervalo de datas inválido.".into(),
            AppError::InvalidDateRange => "Invalid date range.".into(),
            AppError::InvalidTimeRange if pt => {
                "O horário de início deve ser anterior ao de término.".into()
            }
            AppError::InvalidTimeRange => "Start time must be before end time.".into(),
            AppError::MissingQueryParameter(name) if pt => {
                format!("O parâmetro '{}' é obrigatório.", name)
            }
            AppError::MissingQueryParameter(name) => format!("Parameter '{}' is required.", name),
            AppError::EmailAlreadyExists if pt => "Este e-mail já está em uso.".into(),
            AppError::EmailAlreadyExists => "This e-mail is already in use.".into(),
            _ if pt => "Ocorreu um erro inesperado.".into(),
            _ => "An unexpected error occurred.".into(),
        }
    }

    pub fn to_api_error(self, locale: &Locale) -> ApiError {
        let status = self.status();

        // Os detalhes internos ficam só no log
        if status.is_server_error() {
            tracing::error!("Erro Interno do Servidor: {}", self);
        }

        let details = match &self {
            AppError::ValidationError(errors) => Some(validation_details(errors)),
            _ => None,
        };

        ApiError {
            status,
            error: self.message(&locale.0),
            details,
        }
    }
}

fn validation_details(errors: &validator::ValidationErrors) -> Value {
    let mut details = HashMap::new();
    for (field, field_errors) in errors.field_errors() {
        let messages: Vec<String> = field_errors
            .iter()
            .map(|e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string())
            })
            .collect();
        details.insert(field.to_string(), messages);
    }
    json!(details)
}

// Erro já traduzido, pronto para virar resposta HTTP.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub error: String,
    pub details: Option<Value>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut body = json!({
            "success": false,
            "error": self.error,
        });
        if let Some(details) = self.details {
            body["details"] = details;
        }
        (self.status, Json(body)).into_response()
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.to_api_error(&Locale::default()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Probe {
        #[validate(length(min = 1, message = "required"))]
        name: String,
    }

    async fn body_json(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn maps_domain_errors_to_status_codes() {
        assert_eq!(AppError::MissingTenantContext.status(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::InvalidToken.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::Forbidden("student".into()).status(), StatusCode::FORBIDDEN);
        assert_eq!(
            AppError::ResourceNotFound("Aluno".into()).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(AppError::EmailAlreadyExists.status(), StatusCode::CONFLICT);
        assert_eq!(
            AppError::StoreUnavailable("down".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::DatabaseError(sqlx::Error::RowNotFound).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn pool_timeouts_become_store_unavailable() {
        let err: AppError = sqlx::Error::PoolTimedOut.into();
        assert!(matches!(err, AppError::StoreUnavailable(_)));

        let err: AppError = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, AppError::DatabaseError(_)));
    }

    #[test]
    fn messages_follow_locale() {
        let en = AppError::InvalidDateRange.to_api_error(&Locale("en".into()));
        let pt = AppError::InvalidDateRange.to_api_error(&Locale("pt".into()));
        assert_eq!(en.error, "Invalid date range.");
        assert_eq!(pt.error, "Intervalo de datas inválido.");
    }

    #[tokio::test]
    async fn envelope_has_success_false_and_field_details() {
        let errors = Probe { name: String::new() }.validate().unwrap_err();
        let response = AppError::ValidationError(errors).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["success"], json!(false));
        assert_eq!(body["details"]["name"], json!(["required"]));
    }

    #[tokio::test]
    async fn server_errors_hide_internal_detail() {
        let response = AppError::StoreUnavailable("connection refused".into()).into_response();
        let body = body_json(response).await;
        assert_eq!(body["error"], json!("An unexpected error occurred."));
        assert!(body.get("details").is_none());
    }
}
