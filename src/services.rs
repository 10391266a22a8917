pub mod attendance_service;
pub mod auth;
pub mod backfill_service;
pub mod result_service;
pub mod roster;
pub mod schedule_service;
