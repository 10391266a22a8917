// src/middleware/tenancy.rs

use axum::{extract::FromRequestParts, http::request::Parts};
use uuid::Uuid;

use crate::{
    common::error::{ApiError, AppError},
    middleware::{auth::AuthenticatedUser, i18n::Locale},
    models::auth::{CurrentUser, Role},
};

// Cabeçalho usado pelo admin para escolher a escola
const SCHOOL_ID_HEADER: &str = "x-school-id";

// A escola (tenant) em nome da qual a requisição age.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchoolContext(pub Uuid);

impl SchoolContext {
    /// Contas de escola, professor e aluno carregam a escola no token.
    /// O admin não pertence a nenhuma e precisa informar `x-school-id`.
    pub fn resolve(user: &CurrentUser, header: Option<&str>) -> Result<Self, AppError> {
        if user.role == Role::Admin {
            if let Some(raw) = header {
                return Uuid::parse_str(raw.trim()).map(SchoolContext).map_err(|_| {
                    tracing::debug!("x-school-id inválido: {}", raw);
                    AppError::MissingTenantContext
                });
            }
        }

        user.school_id
            .map(SchoolContext)
            .ok_or(AppError::MissingTenantContext)
    }
}

impl<S> FromRequestParts<S> for SchoolContext
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let locale = Locale::from_request_parts(parts, state).await.unwrap_or_default();
        let AuthenticatedUser(user) = AuthenticatedUser::from_request_parts(parts, state).await?;

        let header = parts
            .headers
            .get(SCHOOL_ID_HEADER)
            .and_then(|value| value.to_str().ok());

        SchoolContext::resolve(&user, header).map_err(|e| e.to_api_error(&locale))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(role: Role, school_id: Option<Uuid>) -> CurrentUser {
        CurrentUser { id: Uuid::new_v4(), role, school_id }
    }

    #[test]
    fn scoped_roles_use_school_from_token() {
        let school = Uuid::new_v4();
        let other = Uuid::new_v4().to_string();

        let ctx = SchoolContext::resolve(&user(Role::Teacher, Some(school)), Some(other.as_str())).unwrap();
        assert_eq!(ctx, SchoolContext(school));
    }

    #[test]
    fn admin_picks_school_by_header() {
        let school = Uuid::new_v4();
        let header = school.to_string();

        let ctx = SchoolContext::resolve(&user(Role::Admin, None), Some(header.as_str())).unwrap();
        assert_eq!(ctx, SchoolContext(school));
    }

    #[test]
    fn missing_school_is_rejected() {
        assert!(matches!(
            SchoolContext::resolve(&user(Role::Admin, None), None),
            Err(AppError::MissingTenantContext)
        ));
        assert!(matches!(
            SchoolContext::resolve(&user(Role::School, None), None),
            Err(AppError::MissingTenantContext)
        ));
        assert!(matches!(
            SchoolContext::resolve(&user(Role::Admin, None), Some("nao-e-uuid")),
            Err(AppError::MissingTenantContext)
        ));
    }
}
