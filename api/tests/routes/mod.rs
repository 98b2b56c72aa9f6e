mod apply_course_test;
mod auth_test;
mod courses_test;
mod health_test;
