// src/models/student.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: Uuid,
    #[schema(ignore)]
    pub school_id: Uuid,
    #[schema(example = "Ana Souza")]
    pub name: String,
    pub email: String,
    #[schema(example = "17")]
    pub roll_number: String,
    #[serde(rename = "class")]
    #[schema(example = "8")]
    pub class_name: String,
    #[serde(rename = "sec")]
    #[schema(example = "B")]
    pub section: String,
    pub parent_name: Option<String>,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Usado tanto na criação quanto na edição (substituição completa)
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StudentPayload {
    #[validate(length(min = 1, message = "O nome do aluno é obrigatório."))]
    pub name: String,
    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: String,
    #[validate(length(min = 1, message = "O número de chamada é obrigatório."))]
    pub roll_number: String,
    #[serde(rename = "class")]
    #[validate(length(min = 1, message = "A turma é obrigatória."))]
    pub class_name: String,
    #[serde(rename = "sec")]
    #[validate(length(min = 1, message = "A seção é obrigatória."))]
    pub section: String,
    pub parent_name: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct StudentFilter {
    #[serde(rename = "class")]
    pub class_name: Option<String>,
    #[serde(rename = "sec")]
    pub section: Option<String>,
}

// Dono de cada aluno, usado na reconciliação de notas antigas
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct StudentSchool {
    pub id: Uuid,
    pub school_id: Uuid,
}
