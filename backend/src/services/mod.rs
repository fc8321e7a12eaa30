pub mod demo;
pub mod gpa;
