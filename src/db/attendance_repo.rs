// src/db/attendance_repo.rs

use sqlx::{types::Json, Executor, FromRow, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::{
        attendance::{AttendanceEntry, AttendancePayload, AttendanceRecord},
        class_session::{ClassSession, SessionFilter},
    },
};

const ATTENDANCE_COLUMNS: &str =
    "id, school_id, class_name, section, subject, teacher, date, students, created_at";

// A lista de alunos fica numa coluna JSONB
#[derive(FromRow)]
struct AttendanceRow {
    #[sqlx(flatten)]
    session: ClassSession,
    students: Json<Vec<AttendanceEntry>>,
}

impl From<AttendanceRow> for AttendanceRecord {
    fn from(row: AttendanceRow) -> Self {
        Self {
            session: row.session,
            students: row.students.0,
        }
    }
}

#[derive(Clone, Default)]
pub struct AttendanceRepository;

impl AttendanceRepository {
    pub fn new() -> Self {
        Self
    }

    pub async fn create<'e, E>(
        &self,
        executor: E,
        school_id: Uuid,
        input: &AttendancePayload,
    ) -> Result<AttendanceRecord, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let row = sqlx::query_as::<_, AttendanceRow>(&format!(
            r#"
            INSERT INTO attendance (school_id, class_name, section, subject, teacher, date, students)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {ATTENDANCE_COLUMNS}
            "#
        ))
        .bind(school_id)
        .bind(&input.class_name)
        .bind(&input.section)
        .bind(&input.subject)
        .bind(&input.teacher)
        .bind(input.date)
        .bind(Json(&input.students))
        .fetch_one(executor)
        .await?;

        Ok(row.into())
    }

    // Mais recentes primeiro
    pub async fn list<'e, E>(
        &self,
        executor: E,
        school_id: Uuid,
        filter: &SessionFilter,
    ) -> Result<Vec<AttendanceRecord>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let rows = sqlx::query_as::<_, AttendanceRow>(&format!(
            r#"
            SELECT {ATTENDANCE_COLUMNS} FROM attendance
            WHERE school_id = $1
              AND ($2::text IS NULL OR class_name = $2)
              AND ($3::text IS NULL OR section = $3)
              AND ($4::date IS NULL OR date = $4)
            ORDER BY date DESC, created_at DESC
            "#
        ))
        .bind(school_id)
        .bind(filter.class_name.as_deref())
        .bind(filter.section.as_deref())
        .bind(filter.date)
        .fetch_all(executor)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    // Edição substitui a chamada inteira
    pub async fn replace<'e, E>(
        &self,
        executor: E,
        school_id: Uuid,
        id: Uuid,
        input: &AttendancePayload,
    ) -> Result<Option<AttendanceRecord>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let row = sqlx::query_as::<_, AttendanceRow>(&format!(
            r#"
            UPDATE attendance
            SET class_name = $3, section = $4, subject = $5, teacher = $6, date = $7, students = $8
            WHERE id = $1 AND school_id = $2
            RETURNING {ATTENDANCE_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(school_id)
        .bind(&input.class_name)
        .bind(&input.section)
        .bind(&input.subject)
        .bind(&input.teacher)
        .bind(input.date)
        .bind(Json(&input.students))
        .fetch_optional(executor)
        .await?;

        Ok(row.map(Into::into))
    }

    pub async fn delete<'e, E>(
        &self,
        executor: E,
        school_id: Uuid,
        id: Uuid,
    ) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM attendance WHERE id = $1 AND school_id = $2")
            .bind(id)
            .bind(school_id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
