// src/db/event_repo.rs

use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::event::{EventRange, SchoolEvent},
};

#[derive(Clone)]
pub struct EventRepository {
    pool: PgPool,
}

impl EventRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        school_id: Uuid,
        title: &str,
        description: Option<&str>,
        date: NaiveDate,
        location: Option<&str>,
    ) -> Result<SchoolEvent, AppError> {
        let event = sqlx::query_as::<_, SchoolEvent>(
            r#"
            INSERT INTO school_events (school_id, title, description, date, location)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(school_id)
        .bind(title)
        .bind(description)
        .bind(date)
        .bind(location)
        .fetch_one(&self.pool)
        .await?;

        Ok(event)
    }

    pub async fn list(
        &self,
        school_id: Uuid,
        range: &EventRange,
    ) -> Result<Vec<SchoolEvent>, AppError> {
        let events = sqlx::query_as::<_, SchoolEvent>(
            r#"
            SELECT * FROM school_events
            WHERE school_id = $1
              AND ($2::date IS NULL OR date >= $2)
              AND ($3::date IS NULL OR date <= $3)
            ORDER BY date ASC, created_at ASC
            "#,
        )
        .bind(school_id)
        .bind(range.from)
        .bind(range.to)
        .fetch_all(&self.pool)
        .await?;

        Ok(events)
    }

    pub async fn delete(&self, school_id: Uuid, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM school_events WHERE id = $1 AND school_id = $2")
            .bind(id)
            .bind(school_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
