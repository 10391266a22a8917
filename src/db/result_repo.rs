// src/db/result_repo.rs

use sqlx::{types::Json, Executor, FromRow, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::{
        class_session::{ClassSession, SessionFilter},
        result::{ResultEntry, ResultPayload, ResultRecord},
    },
};

const RESULT_COLUMNS: &str =
    "id, school_id, class_name, section, subject, teacher, date, created_at, exam_type, students";

#[derive(FromRow)]
struct ResultRow {
    #[sqlx(flatten)]
    session: ClassSession,
    exam_type: String,
    students: Json<Vec<ResultEntry>>,
}

impl From<ResultRow> for ResultRecord {
    fn from(row: ResultRow) -> Self {
        Self {
            session: row.session,
            exam_type: row.exam_type,
            students: row.students.0,
        }
    }
}

#[derive(Clone, Default)]
pub struct ResultRepository;

impl ResultRepository {
    pub fn new() -> Self {
        Self
    }

    pub async fn create<'e, E>(
        &self,
        executor: E,
        school_id: Uuid,
        input: &ResultPayload,
    ) -> Result<ResultRecord, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let row = sqlx::query_as::<_, ResultRow>(&format!(
            r#"
            INSERT INTO results (
                school_id, class_name, section, subject, teacher, exam_type, date, students
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {RESULT_COLUMNS}
            "#
        ))
        .bind(school_id)
        .bind(&input.class_name)
        .bind(&input.section)
        .bind(&input.subject)
        .bind(&input.teacher)
        .bind(&input.exam_type)
        .bind(input.date)
        .bind(Json(&input.students))
        .fetch_one(executor)
        .await?;

        Ok(row.into())
    }

    pub async fn list<'e, E>(
        &self,
        executor: E,
        school_id: Uuid,
        filter: &SessionFilter,
    ) -> Result<Vec<ResultRecord>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let rows = sqlx::query_as::<_, ResultRow>(&format!(
            r#"
            SELECT {RESULT_COLUMNS} FROM results
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

    pub async fn replace<'e, E>(
        &self,
        executor: E,
        school_id: Uuid,
        id: Uuid,
        input: &ResultPayload,
    ) -> Result<Option<ResultRecord>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let row = sqlx::query_as::<_, ResultRow>(&format!(
            r#"
            UPDATE results
            SET class_name = $3, section = $4, subject = $5, teacher = $6,
                exam_type = $7, date = $8, students = $9
            WHERE id = $1 AND school_id = $2
            RETURNING {RESULT_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(school_id)
        .bind(&input.class_name)
        .bind(&input.section)
        .bind(&input.subject)
        .bind(&input.teacher)
        .bind(&input.exam_type)
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
        let result = sqlx::query("DELETE FROM results WHERE id = $1 AND school_id = $2")
            .bind(id)
            .bind(school_id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
