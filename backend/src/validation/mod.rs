//! Request validation for term, course and CRN inputs.
//!
//! Payload types derive `Validate` and point at the rules in [`rules`];
//! handlers convert validated payloads into normalized portal filters.

pub mod rules;

pub use validator::Validate;
