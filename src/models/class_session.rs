// src/models/class_session.rs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

// Campos escalares comuns a chamada e notas: uma aula de uma turma num dia.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClassSession {
    pub id: Uuid,
    // Registros antigos podem não ter escola
    pub school_id: Option<Uuid>,
    #[schema(example = "8")]
    pub class_name: String,
    #[schema(example = "B")]
    pub section: String,
    #[schema(example = "Matemática")]
    pub subject: String,
    #[schema(example = "Carlos Lima")]
    pub teacher: String,
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct SessionFilter {
    pub class_name: Option<String>,
    pub section: Option<String>,
    pub date: Option<NaiveDate>,
}
