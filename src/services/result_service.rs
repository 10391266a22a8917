// src/services/result_service.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{ResultRepository, StudentRepository},
    models::{
        class_session::SessionFilter,
        result::{ResultPayload, ResultRecord, StudentResult},
    },
    services::roster::{ensure_unique_students, project_for_student},
};

#[derive(Clone)]
pub struct ResultService {
    repo: ResultRepository,
    student_repo: StudentRepository,
    pool: PgPool,
}

impl ResultService {
    pub fn new(repo: ResultRepository, student_repo: StudentRepository, pool: PgPool) -> Self {
        Self { repo, student_repo, pool }
    }

    pub async fn publish(
        &self,
        school_id: Uuid,
        input: &ResultPayload,
    ) -> Result<ResultRecord, AppError> {
        ensure_unique_students(&input.students)?;

        let record = self.repo.create(&self.pool, school_id, input).await?;
        tracing::info!(
            result_id = %record.session.id,
            class = %record.session.class_name,
            exam = %record.exam_type,
            "Notas publicadas"
        );
        Ok(record)
    }

    pub async fn list(
        &self,
        school_id: Uuid,
        filter: &SessionFilter,
    ) -> Result<Vec<ResultRecord>, AppError> {
        self.repo.list(&self.pool, school_id, filter).await
    }

    pub async fn list_for_student(
        &self,
        school_id: Uuid,
        student_id: Uuid,
    ) -> Result<Vec<StudentResult>, AppError> {
        let student = self
            .student_repo
            .find_by_id(school_id, student_id)
            .await?
            .ok_or_else(|| AppError::ResourceNotFound("Aluno".into()))?;

        let filter = SessionFilter {
            class_name: Some(student.class_name),
            section: Some(student.section),
            date: None,
        };
        let records = self.repo.list(&self.pool, school_id, &filter).await?;

        Ok(project_for_student(records, student_id))
    }

    pub async fn replace(
        &self,
        school_id: Uuid,
        id: Uuid,
        input: &ResultPayload,
    ) -> Result<ResultRecord, AppError> {
        ensure_unique_students(&input.students)?;

        self.repo
            .replace(&self.pool, school_id, id, input)
            .await?
            .ok_or_else(|| AppError::ResourceNotFound("Resultado".into()))
    }

    pub async fn delete(&self, school_id: Uuid, id: Uuid) -> Result<(), AppError> {
        if !self.repo.delete(&self.pool, school_id, id).await? {
            return Err(AppError::ResourceNotFound("Resultado".into()));
        }
        Ok(())
    }
}
