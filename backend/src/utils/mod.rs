pub mod encryption;
pub mod jwt;

pub use jwt::*;
