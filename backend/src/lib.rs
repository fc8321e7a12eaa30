pub mod config;
pub mod docs;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod portal;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;
pub mod validation;
