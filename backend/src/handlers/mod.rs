pub mod auth;
pub mod courses;
pub mod extract;
pub mod transcript;

pub use auth::*;
pub use courses::*;
pub use transcript::*;

use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;

use crate::{error::AppError, models::auth::Session, portal::PortalClient, state::AppState};

#[derive(Debug, Serialize, ToSchema)]
pub struct ServiceStatus {
    pub message: String,
    pub status: String,
}

pub async fn root() -> Json<ServiceStatus> {
    Json(ServiceStatus {
        message: "Welcome to Student Portal API Backend".to_string(),
        status: "online".to_string(),
    })
}

/// Opens a portal client bound to the caller's own credential.
pub(crate) fn portal_session(
    state: &AppState,
    session: &Session,
) -> Result<Box<dyn PortalClient>, AppError> {
    state
        .portal
        .connect(&session.credential)
        .map_err(|err| AppError::upstream("open portal session", err))
}
