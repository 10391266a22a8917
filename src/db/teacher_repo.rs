// src/db/teacher_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::map_unique_email,
    models::teacher::{Teacher, TeacherPayload},
};

#[derive(Clone)]
pub struct TeacherRepository {
    pool: PgPool,
}

impl TeacherRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        school_id: Uuid,
        input: &TeacherPayload,
    ) -> Result<Teacher, AppError> {
        sqlx::query_as::<_, Teacher>(
            r#"
            INSERT INTO teachers (school_id, name, email, subject, phone)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(school_id)
        .bind(&input.name)
        .bind(&input.email)
        .bind(&input.subject)
        .bind(input.phone.as_deref())
        .fetch_one(&self.pool)
        .await
        .map_err(map_unique_email)
    }

    pub async fn list(&self, school_id: Uuid) -> Result<Vec<Teacher>, AppError> {
        let teachers = sqlx::query_as::<_, Teacher>(
            "SELECT * FROM teachers WHERE school_id = $1 ORDER BY name ASC",
        )
        .bind(school_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(teachers)
    }

    pub async fn update(
        &self,
        school_id: Uuid,
        id: Uuid,
        input: &TeacherPayload,
    ) -> Result<Option<Teacher>, AppError> {
        sqlx::query_as::<_, Teacher>(
            r#"
            UPDATE teachers
            SET name = $3, email = $4, subject = $5, phone = $6, updated_at = NOW()
            WHERE id = $1 AND school_id = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(school_id)
        .bind(&input.name)
        .bind(&input.email)
        .bind(&input.subject)
        .bind(input.phone.as_deref())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_unique_email)
    }

    pub async fn delete(&self, school_id: Uuid, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM teachers WHERE id = $1 AND school_id = $2")
            .bind(id)
            .bind(school_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
