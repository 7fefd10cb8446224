pub mod course;
pub mod health;
pub mod registration;
pub mod section;
pub mod student;
