pub mod core;
pub mod courses;
pub mod export;
pub mod grades;
pub mod reports;
pub mod students;
