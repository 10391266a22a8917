// src/models/auth.rs

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// Papéis de acesso. Chegam no token como string ("admin", "school", ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    School,
    Teacher,
    Student,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Role::Admin => "admin",
            Role::School => "school",
            Role::Teacher => "teacher",
            Role::Student => "student",
        };
        f.write_str(name)
    }
}

// Estrutura de dados ("claims") dentro do JWT.
// O token é emitido pelo serviço de login; aqui só validamos.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claims {
    pub sub: Uuid, // ID do usuário (para alunos, o próprio ID do aluno)
    pub role: Role,
    #[serde(default)]
    pub school_id: Option<Uuid>,
    pub exp: usize,
    pub iat: usize,
}

// Quem está fazendo a requisição, já validado
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: Uuid,
    pub role: Role,
    pub school_id: Option<Uuid>,
}

impl From<Claims> for CurrentUser {
    fn from(claims: Claims) -> Self {
        Self {
            id: claims.sub,
            role: claims.role,
            school_id: claims.school_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn current_user_comes_from_claims() {
        let (id, school) = (Uuid::new_v4(), Uuid::new_v4());
        let claims: Claims = serde_json::from_value(serde_json::json!({
            "sub": id,
            "role": "teacher",
            "schoolId": school,
            "exp": 2_000_000_000u64,
            "iat": 1_700_000_000u64,
        }))
        .unwrap();

        let user = CurrentUser::from(claims);
        assert_eq!(user.id, id);
        assert_eq!(user.role, Role::Teacher);
        assert_eq!(user.school_id, Some(school));
    }
}
