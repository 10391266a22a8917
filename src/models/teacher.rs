// src/models/teacher.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Teacher {
    pub id: Uuid,
    #[schema(ignore)]
    pub school_id: Uuid,
    #[schema(example = "Carlos Lima")]
    pub name: String,
    pub email: String,
    #[schema(example = "Matemática")]
    pub subject: String,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TeacherPayload {
    #[validate(length(min = 1, message = "O nome do professor é obrigatório."))]
    pub name: String,
    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: String,
    #[validate(length(min = 1, message = "A disciplina é obrigatória."))]
    pub subject: String,
    pub phone: Option<String>,
}
