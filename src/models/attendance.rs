// src/models/attendance.rs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::models::class_session::ClassSession;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum AttendanceStatus {
    Present,
    Absent,
    Late,
    // Chamadas antigas usam valores fora da lista; só aceito na leitura
    #[serde(other)]
    Unknown,
}

fn known_status(status: &AttendanceStatus) -> Result<(), ValidationError> {
    if *status == AttendanceStatus::Unknown {
        let mut err = ValidationError::new("status");
        err.message = Some("Use present, absent ou late.".into());
        return Err(err);
    }
    Ok(())
}

// Uma linha da chamada: um aluno da turma
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct AttendanceEntry {
    pub id: Uuid,
    #[serde(default)]
    #[validate(length(min = 1, message = "O nome do aluno é obrigatório."))]
    pub name: String,
    #[validate(custom(function = "known_status"))]
    pub status: AttendanceStatus,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    #[serde(flatten)]
    pub session: ClassSession,
    pub students: Vec<AttendanceEntry>,
}

// A chamada vista por um aluno: só a linha dele
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StudentAttendance {
    #[serde(flatten)]
    pub session: ClassSession,
    pub student_status: AttendanceEntry,
}

// Criação e edição enviam a turma inteira de uma vez
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AttendancePayload {
    #[validate(length(min = 1, message = "A turma é obrigatória."))]
    pub class_name: String,
    #[validate(length(min = 1, message = "A seção é obrigatória."))]
    pub section: String,
    #[validate(length(min = 1, message = "A disciplina é obrigatória."))]
    pub subject: String,
    #[validate(length(min = 1, message = "O professor é obrigatório."))]
    pub teacher: String,
    pub date: NaiveDate,
    #[validate(length(min = 1, message = "A lista de alunos não pode ser vazia."), nested)]
    pub students: Vec<AttendanceEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn legacy_entries_still_decode() {
        let id = Uuid::new_v4();
        let entries: Vec<AttendanceEntry> =
            serde_json::from_value(json!([{ "id": id, "status": "excused" }])).unwrap();

        assert_eq!(entries[0].id, id);
        assert_eq!(entries[0].status, AttendanceStatus::Unknown);
        assert_eq!(entries[0].name, "");
    }

    #[test]
    fn writes_only_accept_known_statuses() {
        let payload: AttendancePayload = serde_json::from_value(json!({
            "className": "8",
            "section": "B",
            "subject": "Matemática",
            "teacher": "Carlos Lima",
            "date": "2024-03-12",
            "students": [{ "id": Uuid::new_v4(), "name": "Ana", "status": "excused" }],
        }))
        .unwrap();
        assert!(payload.validate().is_err());

        let payload: AttendancePayload = serde_json::from_value(json!({
            "className": "8",
            "section": "B",
            "subject": "Matemática",
            "teacher": "Carlos Lima",
            "date": "2024-03-12",
            "students": [{ "id": Uuid::new_v4(), "name": "Ana", "status": "late" }],
        }))
        .unwrap();
        assert!(payload.validate().is_ok());
    }
}
