// src/db/school_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::map_unique_email,
    models::school::{CreateSchoolPayload, School},
};

// Tabela 'schools' (só o admin mexe aqui)
#[derive(Clone)]
pub struct SchoolRepository {
    pool: PgPool,
}

impl SchoolRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, input: &CreateSchoolPayload) -> Result<School, AppError> {
        sqlx::query_as::<_, School>(
            r#"
            INSERT INTO schools (name, email, address, phone)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(&input.name)
        .bind(&input.email)
        .bind(input.address.as_deref())
        .bind(input.phone.as_deref())
        .fetch_one(&self.pool)
        .await
        .map_err(map_unique_email)
    }

    pub async fn list(&self) -> Result<Vec<School>, AppError> {
        let schools = sqlx::query_as::<_, School>("SELECT * FROM schools ORDER BY name ASC")
            .fetch_all(&self.pool)
            .await?;

        Ok(schools)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<School>, AppError> {
        let school = sqlx::query_as::<_, School>("SELECT * FROM schools WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(school)
    }

    // Apaga em cascata alunos, professores e registros
    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM schools WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
