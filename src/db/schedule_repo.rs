// src/db/schedule_repo.rs

use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::schedule::{ClassSchedule, ScheduleFilter, SchedulePayload},
};

#[derive(Clone, Default)]
pub struct ScheduleRepository;

impl ScheduleRepository {
    pub fn new() -> Self {
        Self
    }

    pub async fn create<'e, E>(
        &self,
        executor: E,
        school_id: Uuid,
        input: &SchedulePayload,
    ) -> Result<ClassSchedule, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let schedule = sqlx::query_as::<_, ClassSchedule>(
            r#"
            INSERT INTO class_schedules (
                school_id, class_name, section, subject, teacher, day_of_week, start_time, end_time
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, school_id, class_name, section, subject, teacher,
                      day_of_week, start_time, end_time
            "#,
        )
        .bind(school_id)
        .bind(&input.class_name)
        .bind(&input.section)
        .bind(&input.subject)
        .bind(&input.teacher)
        .bind(input.day_of_week)
        .bind(input.start_time)
        .bind(input.end_time)
        .fetch_one(executor)
        .await?;

        Ok(schedule)
    }

    pub async fn list<'e, E>(
        &self,
        executor: E,
        school_id: Uuid,
        filter: &ScheduleFilter,
    ) -> Result<Vec<ClassSchedule>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let schedules = sqlx::query_as::<_, ClassSchedule>(
            r#"
            SELECT id, school_id, class_name, section, subject, teacher,
                   day_of_week, start_time, end_time
            FROM class_schedules
            WHERE school_id = $1
              AND ($2::text IS NULL OR class_name = $2)
              AND ($3::text IS NULL OR section = $3)
            ORDER BY class_name, section, day_of_week, start_time
            "#,
        )
        .bind(school_id)
        .bind(filter.class_name.as_deref())
        .bind(filter.section.as_deref())
        .fetch_all(executor)
        .await?;

        Ok(schedules)
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
        let result = sqlx::query("DELETE FROM class_schedules WHERE id = $1 AND school_id = $2")
            .bind(id)
            .bind(school_id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
