// src/middleware/rbac.rs

use axum::{extract::FromRequestParts, http::request::Parts};
use std::marker::PhantomData;

use crate::{
    common::error::{ApiError, AppError},
    middleware::{auth::AuthenticatedUser, i18n::Locale},
    models::auth::{CurrentUser, Role},
};

/// Conjunto de papéis aceitos por uma rota.
pub trait RoleSet: Send + Sync + 'static {
    fn allowed() -> &'static [Role];
}

/// Extractor (Guardião): só passa se o papel do token estiver na lista de `T`.
pub struct RequireRole<T> {
    pub user: CurrentUser,
    _marker: PhantomData<T>,
}

impl<T: RoleSet> RequireRole<T> {
    pub fn check(user: CurrentUser) -> Result<Self, AppError> {
        if !T::allowed().contains(&user.role) {
            return Err(AppError::Forbidden(user.role.to_string()));
        }
        Ok(Self {
            user,
            _marker: PhantomData,
        })
    }
}

impl<T, S> FromRequestParts<S> for RequireRole<T>
where
    T: RoleSet,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let locale = Locale::from_request_parts(parts, state).await.unwrap_or_default();
        let AuthenticatedUser(user) = AuthenticatedUser::from_request_parts(parts, state).await?;

        Self::check(user).map_err(|e| e.to_api_error(&locale))
    }
}

// ---
// PAPÉIS POR ROTA
// ---

pub struct AdminOnly;
impl RoleSet for AdminOnly {
    fn allowed() -> &'static [Role] { &[Role::Admin] }
}

// Administração da escola
pub struct SchoolStaff;
impl RoleSet for SchoolStaff {
    fn allowed() -> &'static [Role] { &[Role::Admin, Role::School] }
}

// Quem lança chamada e notas
pub struct Faculty;
impl RoleSet for Faculty {
    fn allowed() -> &'static [Role] { &[Role::Admin, Role::School, Role::Teacher] }
}

pub struct AnyMember;
impl RoleSet for AnyMember {
    fn allowed() -> &'static [Role] { &[Role::Admin, Role::School, Role::Teacher, Role::Student] }
}

pub struct StudentOnly;
impl RoleSet for StudentOnly {
    fn allowed() -> &'static [Role] { &[Role::Student] }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn user(role: Role) -> CurrentUser {
        CurrentUser { id: Uuid::new_v4(), role, school_id: None }
    }

    #[test]
    fn role_lists_are_matched_exactly() {
        assert!(RequireRole::<Faculty>::check(user(Role::Teacher)).is_ok());
        assert!(RequireRole::<SchoolStaff>::check(user(Role::Admin)).is_ok());
        assert!(RequireRole::<StudentOnly>::check(user(Role::Student)).is_ok());

        let denied = RequireRole::<SchoolStaff>::check(user(Role::Teacher));
        assert!(matches!(denied, Err(AppError::Forbidden(role)) if role == "teacher"));
        assert!(RequireRole::<AdminOnly>::check(user(Role::School)).is_err());
        assert!(RequireRole::<Faculty>::check(user(Role::Student)).is_err());
    }
}
