use axum::{
    extract::{Extension, State},
    Json,
};

use crate::{
    error::AppError,
    handlers::extract::AppJson,
    models::auth::{Credential, LoginRequest, LoginResponse, LoginUser, Session, UserResponse},
    state::AppState,
    utils::jwt::create_session_token,
};

pub async fn login(
    State(state): State<AppState>,
    AppJson(payload): AppJson<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    if !payload.is_complete() {
        return Err(AppError::BadRequest(
            "Username and password are required".to_string(),
        ));
    }

    let credential = Credential::new(payload.username, payload.password);
    let is_demo = credential.is_demo();
    if !is_demo {
        ensure_portal_accepts(&state, &credential).await?;
    }

    let (token, _claims) = create_session_token(
        &credential,
        is_demo,
        &state.config.jwt_secret,
        state.config.token_expiration_days,
    )
    .map_err(|err| AppError::InternalServerError(err.context("Token creation error")))?;

    tracing::info!(username = %credential.username, demo = is_demo, "login succeeded");

    Ok(Json(LoginResponse {
        message: "Authentication successful".to_string(),
        token,
        user: LoginUser {
            username: credential.username,
        },
    }))
}

/// A throwaway transcript fetch is the only way to prove the portal accepts the pair.
async fn ensure_portal_accepts(state: &AppState, credential: &Credential) -> Result<(), AppError> {
    let rejected = |reason: String| {
        tracing::warn!(username = %credential.username, %reason, "portal login failed");
        AppError::UpstreamAuth("Invalid username or password".to_string())
    };

    let client = state
        .portal
        .connect(credential)
        .map_err(|err| rejected(err.to_string()))?;
    client
        .get_transcript()
        .await
        .map(|_| ())
        .map_err(|err| rejected(err.to_string()))
}

pub async fn me(Extension(session): Extension<Session>) -> Json<UserResponse> {
    Json(UserResponse::from(&session))
}
