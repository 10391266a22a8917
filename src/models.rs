pub mod attendance;
pub mod auth;
pub mod class_session;
pub mod contact;
pub mod event;
pub mod result;
pub mod schedule;
pub mod school;
pub mod student;
pub mod teacher;
