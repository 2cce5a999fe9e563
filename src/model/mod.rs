pub mod attendance;
pub mod course;
pub mod grade;
pub mod module;
pub mod role;
pub mod student;
