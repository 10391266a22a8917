// src/services/attendance_service.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{AttendanceRepository, StudentRepository},
    models::{
        attendance::{AttendancePayload, AttendanceRecord, StudentAttendance},
        class_session::SessionFilter,
    },
    services::roster::{ensure_unique_students, project_for_student},
};

#[derive(Clone)]
pub struct AttendanceService {
    repo: AttendanceRepository,
    student_repo: StudentRepository,
    pool: PgPool,
}

impl AttendanceService {
    pub fn new(repo: AttendanceRepository, student_repo: StudentRepository, pool: PgPool) -> Self {
        Self { repo, student_repo, pool }
    }

    // A turma inteira chega de uma vez
    pub async fn record(
        &self,
        school_id: Uuid,
        input: &AttendancePayload,
    ) -> Result<AttendanceRecord, AppError> {
        ensure_unique_students(&input.students)?;

        let record = self.repo.create(&self.pool, school_id, input).await?;
        tracing::info!(
            attendance_id = %record.session.id,
            class = %record.session.class_name,
            students = record.students.len(),
            "Chamada registrada"
        );
        Ok(record)
    }

    pub async fn list(
        &self,
        school_id: Uuid,
        filter: &SessionFilter,
    ) -> Result<Vec<AttendanceRecord>, AppError> {
        self.repo.list(&self.pool, school_id, filter).await
    }

    /// Chamadas da turma do aluno, cada uma reduzida à linha dele.
    pub async fn list_for_student(
        &self,
        school_id: Uuid,
        student_id: Uuid,
    ) -> Result<Vec<StudentAttendance>, AppError> {
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
        input: &AttendancePayload,
    ) -> Result<AttendanceRecord, AppError> {
        ensure_unique_students(&input.students)?;

        self.repo
            .replace(&self.pool, school_id, id, input)
            .await?
            .ok_or_else(|| AppError::ResourceNotFound("Chamada".into()))
    }

    pub async fn delete(&self, school_id: Uuid, id: Uuid) -> Result<(), AppError> {
        if !self.repo.delete(&self.pool, school_id, id).await? {
            return Err(AppError::ResourceNotFound("Chamada".into()));
        }
        Ok(())
    }
}
