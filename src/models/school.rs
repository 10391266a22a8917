// src/models/school.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

// A escola é o tenant: dona dos alunos, professores e registros
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct School {
    pub id: Uuid,
    #[schema(example = "Escola Estadual Monteiro Lobato")]
    pub name: String,
    #[schema(example = "secretaria@monteirolobato.edu.br")]
    pub email: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateSchoolPayload {
    #[validate(length(min = 1, message = "O nome da escola é obrigatório."))]
    pub name: String,
    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: String,
    pub address: Option<String>,
    pub phone: Option<String>,
}
