//! Business logic of the course marketplace.
//!
//! Every operation validates, checks the caller's role, talks to the media
//! host and the database, and reports failures as [`AppError`]. Nothing here
//! knows about HTTP; the `api` crate maps errors to status codes.

pub mod apply_course_service;
pub mod course_service;
pub mod error;
pub mod media;
pub mod test_utils;
pub mod user_service;
pub mod validation;

pub use error::AppError;
