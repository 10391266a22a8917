// src/models/result.rs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::models::class_session::ClassSession;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct ResultEntry {
    pub id: Uuid,
    #[validate(length(min = 1, message = "O nome do aluno é obrigatório."))]
    pub name: String,
    #[schema(example = "90")]
    pub marks: String,
    #[schema(example = "A")]
    pub grade: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResultRecord {
    #[serde(flatten)]
    pub session: ClassSession,
    #[schema(example = "Prova Bimestral")]
    pub exam_type: String,
    pub students: Vec<ResultEntry>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StudentResult {
    #[serde(flatten)]
    pub session: ClassSession,
    pub exam_type: String,
    pub student_result: ResultEntry,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResultPayload {
    #[validate(length(min = 1, message = "A turma é obrigatória."))]
    pub class_name: String,
    #[validate(length(min = 1, message = "A seção é obrigatória."))]
    pub section: String,
    #[validate(length(min = 1, message = "A disciplina é obrigatória."))]
    pub subject: String,
    #[validate(length(min = 1, message = "O professor é obrigatório."))]
    pub teacher: String,
    #[validate(length(min = 1, message = "O tipo de avaliação é obrigatório."))]
    pub exam_type: String,
    pub date: NaiveDate,
    #[validate(length(min = 1, message = "A lista de alunos não pode ser vazia."), nested)]
    pub students: Vec<ResultEntry>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct BackfillQuery {
    #[serde(default)]
    pub dry_run: bool,
}

// Nota sem escola reduzida ao que a reconciliação usa: os IDs dos alunos.
// `unreadable_entries` conta linhas antigas sem um `id` válido.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackfillCandidate {
    pub result_id: Uuid,
    pub student_ids: Vec<Uuid>,
    pub unreadable_entries: usize,
}

impl BackfillCandidate {
    /// Lê só o `id` de cada linha da lista; nome, nota e conceito são ignorados.
    pub fn from_roster(result_id: Uuid, students: &serde_json::Value) -> Self {
        let entries = students.as_array().map(Vec::as_slice).unwrap_or_default();
        let student_ids: Vec<Uuid> = entries
            .iter()
            .filter_map(|entry| entry.get("id")?.as_str())
            .filter_map(|raw| Uuid::parse_str(raw).ok())
            .collect();

        Self {
            result_id,
            unreadable_entries: entries.len() - student_ids.len(),
            student_ids,
        }
    }
}

// Resultado da reconciliação: `updated` pode ser menor que `matched`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BackfillReport {
    pub matched: u64,
    pub updated: u64,
    pub candidates: u64,
    pub dry_run: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn candidate_reads_ids_from_incomplete_legacy_entries() {
        let (result_id, s1, s2) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
        let students = json!([
            { "id": s1.to_string(), "name": "x", "marks": 90 },
            { "id": s2.to_string() },
        ]);

        let candidate = BackfillCandidate::from_roster(result_id, &students);
        assert_eq!(candidate.result_id, result_id);
        assert_eq!(candidate.student_ids, vec![s1, s2]);
        assert_eq!(candidate.unreadable_entries, 0);
    }

    #[test]
    fn entries_without_valid_id_are_counted_as_unreadable() {
        let s1 = Uuid::new_v4();
        let students = json!([
            { "id": s1.to_string(), "grade": "A" },
            { "name": "sem id" },
            { "id": "aluno-7" },
            { "id": 42 },
        ]);

        let candidate = BackfillCandidate::from_roster(Uuid::new_v4(), &students);
        assert_eq!(candidate.student_ids, vec![s1]);
        assert_eq!(candidate.unreadable_entries, 3);
    }

    #[test]
    fn non_array_roster_is_empty() {
        let candidate = BackfillCandidate::from_roster(Uuid::new_v4(), &serde_json::Value::Null);
        assert!(candidate.student_ids.is_empty());
        assert_eq!(candidate.unreadable_entries, 0);
    }
}
