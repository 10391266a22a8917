pub mod attendance;
pub mod contact;
pub mod events;
pub mod results;
pub mod schedules;
pub mod schools;
pub mod students;
pub mod teachers;
