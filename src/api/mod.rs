pub mod attendance;
pub mod grades;
pub mod modules;
pub mod reports;
