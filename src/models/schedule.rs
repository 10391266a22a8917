// src/models/schedule.rs

use chrono::{NaiveDate, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "day_of_week", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl From<DayOfWeek> for Weekday {
    fn from(day: DayOfWeek) -> Self {
        match day {
            DayOfWeek::Monday => Weekday::Mon,
            DayOfWeek::Tuesday => Weekday::Tue,
            DayOfWeek::Wednesday => Weekday::Wed,
            DayOfWeek::Thursday => Weekday::Thu,
            DayOfWeek::Friday => Weekday::Fri,
            DayOfWeek::Saturday => Weekday::Sat,
            DayOfWeek::Sunday => Weekday::Sun,
        }
    }
}

// Uma aula semanal fixa da grade horária
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClassSchedule {
    pub id: Uuid,
    #[schema(ignore)]
    pub school_id: Uuid,
    pub class_name: String,
    pub section: String,
    pub subject: String,
    pub teacher: String,
    pub day_of_week: DayOfWeek,
    #[schema(value_type = String, example = "08:00:00")]
    pub start_time: NaiveTime,
    #[schema(value_type = String, example = "08:50:00")]
    pub end_time: NaiveTime,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SchedulePayload {
    #[validate(length(min = 1, message = "A turma é obrigatória."))]
    pub class_name: String,
    #[validate(length(min = 1, message = "A seção é obrigatória."))]
    pub section: String,
    #[validate(length(min = 1, message = "A disciplina é obrigatória."))]
    pub subject: String,
    #[validate(length(min = 1, message = "O professor é obrigatório."))]
    pub teacher: String,
    pub day_of_week: DayOfWeek,
    #[schema(value_type = String, example = "08:00:00")]
    pub start_time: NaiveTime,
    #[schema(value_type = String, example = "08:50:00")]
    pub end_time: NaiveTime,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ScheduleFilter {
    pub class_name: Option<String>,
    pub section: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct CalendarQuery {
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub class_name: Option<String>,
    pub section: Option<String>,
}

// Uma aula da grade projetada numa data concreta do calendário
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEntry {
    pub schedule_id: Uuid,
    pub date: NaiveDate,
    #[schema(value_type = String)]
    pub start_time: NaiveTime,
    #[schema(value_type = String)]
    pub end_time: NaiveTime,
    pub class_name: String,
    pub section: String,
    pub subject: String,
    pub teacher: String,
}
