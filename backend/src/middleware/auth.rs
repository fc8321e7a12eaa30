use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::{
    error::AppError,
    models::auth::Session,
    state::AppState,
    utils::jwt::{verify_session_token, TokenError},
};

/// Verifies the bearer token and attaches the decoded [`Session`] to the request.
pub async fn auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = extract_auth_header(request.headers());
    let session = authenticate_request(auth_header.as_deref(), &state.config.jwt_secret)?;
    tracing::debug!(
        username = %session.username(),
        demo = session.is_demo,
        "session verified"
    );
    request.extensions_mut().insert(session);

    Ok(next.run(request).await)
}

fn parse_bearer_token(header: &str) -> Option<&str> {
    if let Some(rest) = header.strip_prefix("Bearer ") {
        return Some(rest);
    }
    if let Some(rest) = header.strip_prefix("bearer ") {
        return Some(rest);
    }
    if let Some(space_idx) = header.find(' ') {
        let (scheme, rest) = header.split_at(space_idx);
        if scheme.eq_ignore_ascii_case("bearer") {
            return Some(rest.trim_start());
        }
    }
    None
}

fn authenticate_request(auth_header: Option<&str>, secret: &str) -> Result<Session, AppError> {
    let token = auth_header
        .and_then(parse_bearer_token)
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| AppError::Unauthorized("Authentication required".to_string()))?;

    verify_session_token(token, secret).map_err(|err| {
        match &err {
            TokenError::Expired => tracing::info!("rejected expired session token"),
            TokenError::Invalid(reason) => {
                tracing::warn!(%reason, "rejected invalid session token")
            }
        }
        AppError::Forbidden("Invalid or expired token".to_string())
    })
}

fn extract_auth_header(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.to_owned())
}
