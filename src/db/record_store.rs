// src/db/record_store.rs

use async_trait::async_trait;
use sqlx::{types::Json, FromRow, PgPool};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::{result::BackfillCandidate, student::StudentSchool},
};

/// Acesso ao banco usado pela reconciliação de `school_id` das notas antigas.
/// Fica atrás de um trait para o serviço poder rodar contra um banco em memória.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Notas sem escola (coluna nula), só com os IDs dos alunos
    async fn find_results_without_school(&self) -> Result<Vec<BackfillCandidate>, AppError>;

    /// Escola dona de cada aluno; IDs inexistentes simplesmente não voltam.
    async fn find_student_schools(&self, student_ids: &[Uuid])
        -> Result<Vec<StudentSchool>, AppError>;

    /// Escrita em lote. Retorna quantas linhas mudaram de fato.
    async fn assign_results_to_school(
        &self,
        result_ids: &[Uuid],
        school_id: Uuid,
    ) -> Result<u64, AppError>;
}

// A lista vem como JSON cru: linhas antigas podem não ter nome, nota ou conceito
#[derive(FromRow)]
struct CandidateRow {
    id: Uuid,
    students: Json<serde_json::Value>,
}

#[derive(Clone)]
pub struct PgRecordStore {
    pool: PgPool,
}

impl PgRecordStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecordStore for PgRecordStore {
    async fn find_results_without_school(&self) -> Result<Vec<BackfillCandidate>, AppError> {
        let rows = sqlx::query_as::<_, CandidateRow>(
            "SELECT id, students FROM results WHERE school_id IS NULL ORDER BY created_at ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| BackfillCandidate::from_roster(row.id, &row.students.0))
            .collect())
    }

    async fn find_student_schools(
        &self,
        student_ids: &[Uuid],
    ) -> Result<Vec<StudentSchool>, AppError> {
        let owners = sqlx::query_as::<_, StudentSchool>(
            "SELECT id, school_id FROM students WHERE id = ANY($1)",
        )
        .bind(student_ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(owners)
    }

    async fn assign_results_to_school(
        &self,
        result_ids: &[Uuid],
        school_id: Uuid,
    ) -> Result<u64, AppError> {
        // `school_id IS NULL` de novo: outra execução pode ter chegado antes
        let result = sqlx::query(
            r#"
            UPDATE results
            SET school_id = $1
            WHERE id = ANY($2) AND school_id IS NULL
            "#,
        )
        .bind(school_id)
        .bind(result_ids)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }
}
