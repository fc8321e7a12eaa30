use axum::{
    body::Bytes,
    extract::{Extension, State},
    Json,
};

use crate::{
    error::AppError,
    handlers::{extract::AppQuery, portal_session},
    models::{
        auth::Session,
        transcript::{TranscriptOverride, TranscriptResponse},
    },
    services::gpa,
    state::AppState,
};

pub async fn get_transcript(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    AppQuery(overrides): AppQuery<TranscriptOverride>,
) -> Result<Json<TranscriptResponse>, AppError> {
    load_transcript(&state, &session, overrides.wants_demo()).await
}

/// POST variant; an empty body is treated as `{}`.
pub async fn post_transcript(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    body: Bytes,
) -> Result<Json<TranscriptResponse>, AppError> {
    let overrides: TranscriptOverride = if body.iter().all(u8::is_ascii_whitespace) {
        TranscriptOverride::default()
    } else {
        serde_json::from_slice(&body)
            .map_err(|err| AppError::BadRequest(format!("Invalid JSON body: {}", err)))?
    };
    load_transcript(&state, &session, overrides.wants_demo()).await
}

async fn load_transcript(
    state: &AppState,
    session: &Session,
    override_demo: bool,
) -> Result<Json<TranscriptResponse>, AppError> {
    let courses = if session.is_demo || override_demo {
        state.demo.transcript()
    } else {
        portal_session(state, session)?
            .get_transcript()
            .await
            .map_err(|err| AppError::upstream("fetch transcript", err))?
    };

    let summary = gpa::aggregate(&courses);
    Ok(Json(TranscriptResponse { summary, courses }))
}
