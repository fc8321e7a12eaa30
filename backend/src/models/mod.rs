pub mod auth;
pub mod course;
pub mod lenient;
pub mod transcript;
