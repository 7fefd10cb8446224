pub mod courses;
pub mod enrollments;
pub mod prerequisites;
pub mod professors;
pub mod schedules;
pub mod students;
pub mod teachings;
