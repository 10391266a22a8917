// src/services/schedule_service.rs

use chrono::{Datelike, NaiveDate, Weekday};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{ScheduleRepository, StudentRepository},
    models::{
        auth::{CurrentUser, Role},
        schedule::{CalendarEntry, CalendarQuery, ClassSchedule, ScheduleFilter, SchedulePayload},
    },
};

// Janela máxima do calendário (um ano, contando bissexto)
const MAX_CALENDAR_DAYS: i64 = 366;

#[derive(Clone)]
pub struct ScheduleService {
    repo: ScheduleRepository,
    student_repo: StudentRepository,
    pool: PgPool,
}

impl ScheduleService {
    pub fn new(repo: ScheduleRepository, student_repo: StudentRepository, pool: PgPool) -> Self {
        Self { repo, student_repo, pool }
    }

    pub async fn create(
        &self,
        school_id: Uuid,
        input: &SchedulePayload,
    ) -> Result<ClassSchedule, AppError> {
        if input.start_time >= input.end_time {
            return Err(AppError::InvalidTimeRange);
        }
        self.repo.create(&self.pool, school_id, input).await
    }

    pub async fn list(
        &self,
        school_id: Uuid,
        filter: &ScheduleFilter,
    ) -> Result<Vec<ClassSchedule>, AppError> {
        self.repo.list(&self.pool, school_id, filter).await
    }

    pub async fn delete(&self, school_id: Uuid, id: Uuid) -> Result<(), AppError> {
        if !self.repo.delete(&self.pool, school_id, id).await? {
            return Err(AppError::ResourceNotFound("Horário".into()));
        }
        Ok(())
    }

    /// Grade semanal projetada nas datas de `[from, to]`.
    /// Aluno vê a própria turma; os demais precisam informar turma e seção.
    pub async fn calendar(
        &self,
        user: &CurrentUser,
        school_id: Uuid,
        query: &CalendarQuery,
    ) -> Result<Vec<CalendarEntry>, AppError> {
        check_range(query.from, query.to)?;

        let filter = if user.role == Role::Student {
            let student = self
                .student_repo
                .find_by_id(school_id, user.id)
                .await?
                .ok_or_else(|| AppError::ResourceNotFound("Aluno".into()))?;
            ScheduleFilter {
                class_name: Some(student.class_name),
                section: Some(student.section),
            }
        } else {
            ScheduleFilter {
                class_name: Some(
                    query.class_name.clone().ok_or(AppError::MissingQueryParameter("className"))?,
                ),
                section: Some(
                    query.section.clone().ok_or(AppError::MissingQueryParameter("section"))?,
                ),
            }
        };

        let schedules = self.repo.list(&self.pool, school_id, &filter).await?;
        materialize(&schedules, query.from, query.to)
    }
}

fn check_range(from: NaiveDate, to: NaiveDate) -> Result<(), AppError> {
    let span = (to - from).num_days();
    if span < 0 || span >= MAX_CALENDAR_DAYS {
        return Err(AppError::InvalidDateRange);
    }
    Ok(())
}

/// Uma entrada por aula e por data cujo dia da semana coincide,
/// ordenadas por data e horário de início.
pub fn materialize(
    schedules: &[ClassSchedule],
    from: NaiveDate,
    to: NaiveDate,
) -> Result<Vec<CalendarEntry>, AppError> {
    check_range(from, to)?;

    let mut ordered: Vec<&ClassSchedule> = schedules.iter().collect();
    ordered.sort_by_key(|s| (s.start_time, s.end_time));

    let mut entries = Vec::new();
    for date in from.iter_days().take_while(|d| *d <= to) {
        let weekday = date.weekday();
        for schedule in ordered
            .iter()
            .filter(|s| Weekday::from(s.day_of_week) == weekday)
        {
            entries.push(CalendarEntry {
                schedule_id: schedule.id,
                date,
                start_time: schedule.start_time,
                end_time: schedule.end_time,
                class_name: schedule.class_name.clone(),
                section: schedule.section.clone(),
                subject: schedule.subject.clone(),
                teacher: schedule.teacher.clone(),
            });
        }
    }

    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::schedule::DayOfWeek;
    use chrono::NaiveTime;

    fn slot(day: DayOfWeek, start: (u32, u32), subject: &str) -> ClassSchedule {
        let start_time = NaiveTime::from_hms_opt(start.0, start.1, 0).unwrap();
        ClassSchedule {
            id: Uuid::new_v4(),
            school_id: Uuid::new_v4(),
            class_name: "8".into(),
            section: "B".into(),
            subject: subject.into(),
            teacher: "Carlos Lima".into(),
            day_of_week: day,
            start_time,
            end_time: start_time + chrono::Duration::minutes(50),
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn projects_weekly_slots_onto_matching_dates() {
        let schedules = vec![
            slot(DayOfWeek::Monday, (10, 0), "História"),
            slot(DayOfWeek::Monday, (8, 0), "Matemática"),
            slot(DayOfWeek::Wednesday, (9, 0), "Ciências"),
        ];

        // 2024-03-04 é segunda-feira
        let entries = materialize(&schedules, date(2024, 3, 4), date(2024, 3, 11)).unwrap();

        let summary: Vec<(String, &str)> = entries
            .iter()
            .map(|e| (e.date.to_string(), e.subject.as_str()))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("2024-03-04".to_string(), "Matemática"),
                ("2024-03-04".to_string(), "História"),
                ("2024-03-06".to_string(), "Ciências"),
                ("2024-03-11".to_string(), "Matemática"),
                ("2024-03-11".to_string(), "História"),
            ]
        );
    }

    #[test]
    fn single_day_range_is_inclusive() {
        let schedules = vec![slot(DayOfWeek::Friday, (8, 0), "Artes")];
        let entries = materialize(&schedules, date(2024, 3, 8), date(2024, 3, 8)).unwrap();
        assert_eq!(entries.len(), 1);

        let entries = materialize(&schedules, date(2024, 3, 9), date(2024, 3, 9)).unwrap();
        assert!(entries.is_empty());
    }

    #[test]
    fn rejects_inverted_or_oversized_ranges() {
        let schedules = vec![slot(DayOfWeek::Monday, (8, 0), "Matemática")];

        assert!(matches!(
            materialize(&schedules, date(2024, 3, 10), date(2024, 3, 1)),
            Err(AppError::InvalidDateRange)
        ));
        assert!(matches!(
            materialize(&schedules, date(2024, 1, 1), date(2025, 1, 1)),
            Err(AppError::InvalidDateRange)
        ));
        assert!(materialize(&schedules, date(2024, 1, 1), date(2024, 12, 31)).is_ok());
    }
}
