// src/db/student_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::map_unique_email,
    models::student::{Student, StudentFilter, StudentPayload},
};

#[derive(Clone)]
pub struct StudentRepository {
    pool: PgPool,
}

impl StudentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        school_id: Uuid,
        input: &StudentPayload,
    ) -> Result<Student, AppError> {
        sqlx::query_as::<_, Student>(
            r#"
            INSERT INTO students (
                school_id, name, email, roll_number, class_name, section, parent_name, phone
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(school_id)
        .bind(&input.name)
        .bind(&input.email)
        .bind(&input.roll_number)
        .bind(&input.class_name)
        .bind(&input.section)
        .bind(input.parent_name.as_deref())
        .bind(input.phone.as_deref())
        .fetch_one(&self.pool)
        .await
        .map_err(map_unique_email)
    }

    // Filtros opcionais: NULL no parâmetro desliga o filtro
    pub async fn list(
        &self,
        school_id: Uuid,
        filter: &StudentFilter,
    ) -> Result<Vec<Student>, AppError> {
        let students = sqlx::query_as::<_, Student>(
            r#"
            SELECT * FROM students
            WHERE school_id = $1
              AND ($2::text IS NULL OR class_name = $2)
              AND ($3::text IS NULL OR section = $3)
            ORDER BY class_name, section, roll_number
            "#,
        )
        .bind(school_id)
        .bind(filter.class_name.as_deref())
        .bind(filter.section.as_deref())
        .fetch_all(&self.pool)
        .await?;

        Ok(students)
    }

    pub async fn find_by_id(
        &self,
        school_id: Uuid,
        id: Uuid,
    ) -> Result<Option<Student>, AppError> {
        let student = sqlx::query_as::<_, Student>(
            "SELECT * FROM students WHERE id = $1 AND school_id = $2",
        )
        .bind(id)
        .bind(school_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(student)
    }

    pub async fn update(
        &self,
        school_id: Uuid,
        id: Uuid,
        input: &StudentPayload,
    ) -> Result<Option<Student>, AppError> {
        sqlx::query_as::<_, Student>(
            r#"
            UPDATE students
            SET name = $3, email = $4, roll_number = $5, class_name = $6,
                section = $7, parent_name = $8, phone = $9, updated_at = NOW()
            WHERE id = $1 AND school_id = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(school_id)
        .bind(&input.name)
        .bind(&input.email)
        .bind(&input.roll_number)
        .bind(&input.class_name)
        .bind(&input.section)
        .bind(input.parent_name.as_deref())
        .bind(input.phone.as_deref())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_unique_email)
    }

    pub async fn delete(&self, school_id: Uuid, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM students WHERE id = $1 AND school_id = $2")
            .bind(id)
            .bind(school_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
