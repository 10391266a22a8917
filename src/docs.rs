// src/docs.rs

use utoipa::OpenApi;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Schools ---
        handlers::schools::create_school,
        handlers::schools::list_schools,
        handlers::schools::get_school,
        handlers::schools::delete_school,

        // --- Students ---
        handlers::students::create_student,
        handlers::students::list_students,
        handlers::students::get_my_profile,
        handlers::students::update_student,
        handlers::students::delete_student,

        // --- Teachers ---
        handlers::teachers::create_teacher,
        handlers::teachers::list_teachers,
        handlers::teachers::update_teacher,
        handlers::teachers::delete_teacher,

        // --- Attendance ---
        handlers::attendance::record_attendance,
        handlers::attendance::list_attendance,
        handlers::attendance::my_attendance,
        handlers::attendance::replace_attendance,
        handlers::attendance::delete_attendance,

        // --- Results ---
        handlers::results::publish_results,
        handlers::results::list_results,
        handlers::results::my_results,
        handlers::results::replace_results,
        handlers::results::delete_results,
        handlers::results::backfill_school_ids,

        // --- Schedules ---
        handlers::schedules::create_schedule,
        handlers::schedules::list_schedules,
        handlers::schedules::class_calendar,
        handlers::schedules::delete_schedule,

        // --- Events ---
        handlers::events::create_event,
        handlers::events::list_events,
        handlers::events::delete_event,

        // --- Contact ---
        handlers::contact::send_message,
        handlers::contact::list_messages,
        handlers::contact::delete_message,
    ),
    components(
        schemas(
            // --- Schools ---
            models::school::School,
            models::school::CreateSchoolPayload,

            // --- Students & Teachers ---
            models::student::Student,
            models::student::StudentPayload,
            models::teacher::Teacher,
            models::teacher::TeacherPayload,

            // --- Attendance ---
            models::class_session::ClassSession,
            models::attendance::AttendanceStatus,
            models::attendance::AttendanceEntry,
            models::attendance::AttendanceRecord,
            models::attendance::StudentAttendance,
            models::attendance::AttendancePayload,

            // --- Results ---
            models::result::ResultEntry,
            models::result::ResultRecord,
            models::result::StudentResult,
            models::result::ResultPayload,
            models::result::BackfillReport,

            // --- Schedules ---
            models::schedule::DayOfWeek,
            models::schedule::ClassSchedule,
            models::schedule::SchedulePayload,
            models::schedule::CalendarEntry,

            // --- Events ---
            models::event::SchoolEvent,
            handlers::events::CreateEventPayload,

            // --- Contact ---
            models::contact::ContactMessage,
            models::contact::ContactPayload,
        )
    ),
    tags(
        (name = "Schools", description = "Cadastro de Escolas (admin)"),
        (name = "Students", description = "Matrícula e Cadastro de Alunos"),
        (name = "Teachers", description = "Corpo Docente"),
        (name = "Attendance", description = "Chamadas por Turma"),
        (name = "Results", description = "Notas e Reconciliação de Escola"),
        (name = "Schedules", description = "Grade Horária e Calendário"),
        (name = "Events", description = "Eventos da Escola"),
        (name = "Contact", description = "Fale Conosco")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(
                Http::new(HttpAuthScheme::Bearer)
            ),
        );
    }
}
