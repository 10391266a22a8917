pub mod school_repo;
pub use school_repo::SchoolRepository;
pub mod student_repo;
pub use student_repo::StudentRepository;
pub mod teacher_repo;
pub use teacher_repo::TeacherRepository;
pub mod attendance_repo;
pub use attendance_repo::AttendanceRepository;
pub mod result_repo;
pub use result_repo::ResultRepository;
pub mod record_store;
pub use record_store::{PgRecordStore, RecordStore};
pub mod schedule_repo;
pub use schedule_repo::ScheduleRepository;
pub mod event_repo;
pub use event_repo::EventRepository;
pub mod contact_repo;
pub use contact_repo::ContactRepository;

use crate::common::error::AppError;

// Converte violação de chave única (e-mail repetido) num erro amigável
pub(crate) fn map_unique_email(e: sqlx::Error) -> AppError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            return AppError::EmailAlreadyExists;
        }
    }
    e.into()
}
