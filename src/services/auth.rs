// src/services/auth.rs

use jsonwebtoken::{decode, DecodingKey, Validation};

use crate::{
    common::error::AppError,
    models::auth::{Claims, CurrentUser},
};

// Verifica tokens HS256 emitidos pelo serviço de login.
#[derive(Clone)]
pub struct AuthService {
    jwt_secret: String,
}

impl AuthService {
    pub fn new(jwt_secret: String) -> Self {
        Self { jwt_secret }
    }

    pub fn validate_token(&self, token: &str) -> Result<CurrentUser, AppError> {
        let validation = Validation::default();
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_ref()),
            &validation,
        )
        .map_err(|e| {
            tracing::debug!("Token rejeitado: {}", e);
            AppError::InvalidToken
        })?;

        Ok(token_data.claims.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::auth::Role;
    use chrono::Utc;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use uuid::Uuid;

    fn sign(secret: &str, role: Role, school_id: Option<Uuid>, ttl_secs: i64) -> String {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: Uuid::new_v4(),
            role,
            school_id,
            exp: (now + ttl_secs) as usize,
            iat: now as usize,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn accepts_token_signed_with_same_secret() {
        let school = Uuid::new_v4();
        let token = sign("segredo", Role::School, Some(school), 3600);

        let user = AuthService::new("segredo".into()).validate_token(&token).unwrap();
        assert_eq!(user.role, Role::School);
        assert_eq!(user.school_id, Some(school));
    }

    #[test]
    fn rejects_wrong_secret_and_expired_tokens() {
        let service = AuthService::new("segredo".into());

        let forged = sign("outro", Role::Admin, None, 3600);
        assert!(matches!(service.validate_token(&forged), Err(AppError::InvalidToken)));

        let expired = sign("segredo", Role::Admin, None, -3600);
        assert!(matches!(service.validate_token(&expired), Err(AppError::InvalidToken)));
    }

    #[test]
    fn rejects_unknown_role() {
        let now = Utc::now().timestamp();
        let claims = serde_json::json!({
            "sub": Uuid::new_v4(),
            "role": "janitor",
            "exp": now + 3600,
            "iat": now,
        });
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"segredo"),
        )
        .unwrap();

        let result = AuthService::new("segredo".into()).validate_token(&token);
        assert!(matches!(result, Err(AppError::InvalidToken)));
    }
}
