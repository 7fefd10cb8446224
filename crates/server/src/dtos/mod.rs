pub mod course;
pub mod registration;
pub mod section;
pub mod student;
