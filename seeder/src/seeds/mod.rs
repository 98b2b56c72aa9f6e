pub mod apply_course;
pub mod course;
pub mod user;
