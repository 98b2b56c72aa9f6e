pub mod apply_course;
pub mod course;
pub mod user;

pub use apply_course::Entity as ApplyCourse;
pub use course::Entity as Course;
pub use user::Entity as User;
