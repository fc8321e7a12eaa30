use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::Value;

use crate::portal::PortalError;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

#[derive(Debug)]
pub enum AppError {
    NotFound(String),
    /// No credential presented.
    Unauthorized(String),
    /// Credential presented but rejected (bad signature, expired, undecryptable).
    Forbidden(String),
    BadRequest(String),
    InternalServerError(anyhow::Error),
    Validation(Vec<String>),
    /// The portal rejected the session credential.
    UpstreamAuth(String),
    /// The portal answered with data that does not have the expected shape.
    UpstreamData(String),
    /// The portal call itself failed.
    Upstream {
        context: String,
        message: String,
        code: Option<String>,
    },
}

impl AppError {
    /// Maps a portal failure to a response; `context` names the attempted operation.
    pub fn upstream(context: &str, err: PortalError) -> Self {
        match err {
            PortalError::Authentication(message) => {
                tracing::warn!(context, %message, "portal rejected credentials");
                AppError::UpstreamAuth("Portal rejected the session credentials".to_string())
            }
            PortalError::MalformedResponse(message) => {
                tracing::error!(context, %message, "portal returned malformed data");
                AppError::UpstreamData(format!("Invalid data received: {}", context))
            }
            PortalError::Request { message, code } => AppError::Upstream {
                context: context.to_string(),
                message,
                code,
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message, code, message, details) = match self {
            AppError::NotFound(msg) => (
                StatusCode::NOT_FOUND,
                msg,
                "NOT_FOUND".to_string(),
                None,
                None,
            ),
            AppError::Unauthorized(msg) => (
                StatusCode::UNAUTHORIZED,
                msg,
                "UNAUTHORIZED".to_string(),
                None,
                None,
            ),
            AppError::Forbidden(msg) => (
                StatusCode::FORBIDDEN,
                msg,
                "FORBIDDEN".to_string(),
                None,
                None,
            ),
            AppError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                msg,
                "BAD_REQUEST".to_string(),
                None,
                None,
            ),
            AppError::InternalServerError(err) => {
                tracing::error!("Internal server error: {:?}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                    "INTERNAL_SERVER_ERROR".to_string(),
                    None,
                    None,
                )
            }
            AppError::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                "Validation failed".to_string(),
                "VALIDATION_ERROR".to_string(),
                None,
                Some(serde_json::json!({ "errors": errors })),
            ),
            AppError::UpstreamAuth(msg) => (
                StatusCode::UNAUTHORIZED,
                msg,
                "UPSTREAM_AUTH_FAILED".to_string(),
                None,
                None,
            ),
            AppError::UpstreamData(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                msg,
                "UPSTREAM_DATA_ERROR".to_string(),
                None,
                None,
            ),
            AppError::Upstream {
                context,
                message,
                code,
            } => {
                tracing::error!(%context, %message, code = ?code, "portal call failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Failed to {}", context),
                    code.unwrap_or_else(|| "UNKNOWN_ERROR".to_string()),
                    Some(message),
                    None,
                )
            }
        };

        let body = Json(ErrorResponse {
            error: error_message,
            code,
            message,
            details,
        });

        (status, body).into_response()
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::InternalServerError(err)
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut messages: Vec<String> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| {
                    let code = e.code.as_ref();
                    format!("{}: {}", field, code)
                })
            })
            .collect();
        messages.sort();
        AppError::Validation(messages)
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn response_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("read body");
        serde_json::from_slice(&bytes).expect("json")
    }

    #[tokio::test]
    async fn app_error_into_response_maps_status_and_body() {
        let response = AppError::BadRequest("bad".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = response_json(response).await;
        assert_eq!(json["error"], "bad");
        assert_eq!(json["code"], "BAD_REQUEST");

        let response = AppError::Unauthorized("nope".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let json = response_json(response).await;
        assert_eq!(json["error"], "nope");
        assert_eq!(json["code"], "UNAUTHORIZED");

        let response = AppError::Forbidden("denied".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        let json = response_json(response).await;
        assert_eq!(json["error"], "denied");
        assert_eq!(json["code"], "FORBIDDEN");

        let response = AppError::NotFound("missing".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let json = response_json(response).await;
        assert_eq!(json["error"], "missing");
        assert_eq!(json["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn app_error_validation_includes_details() {
        let response = AppError::Validation(vec!["season: season_invalid".to_string()])
            .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = response_json(response).await;
        assert_eq!(json["error"], "Validation failed");
        assert_eq!(json["code"], "VALIDATION_ERROR");
        assert_eq!(json["details"]["errors"][0], "season: season_invalid");
    }

    #[tokio::test]
    async fn app_error_internal_maps_to_generic_message() {
        let response = AppError::InternalServerError(anyhow::anyhow!("boom")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = response_json(response).await;
        assert_eq!(json["error"], "Internal server error");
        assert_eq!(json["code"], "INTERNAL_SERVER_ERROR");
        assert!(json["details"].is_null());
    }

    #[tokio::test]
    async fn portal_failures_map_to_taxonomy() {
        let response = AppError::upstream(
            "fetch transcript",
            PortalError::Authentication("bad password".into()),
        )
        .into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(response_json(response).await["code"], "UPSTREAM_AUTH_FAILED");

        let response = AppError::upstream(
            "fetch transcript",
            PortalError::MalformedResponse("expected array".into()),
        )
        .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response_json(response).await["code"], "UPSTREAM_DATA_ERROR");

        let response = AppError::upstream(
            "add courses",
            PortalError::Request {
                message: "registration closed".into(),
                code: Some("REG_CLOSED".into()),
            },
        )
        .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = response_json(response).await;
        assert_eq!(json["error"], "Failed to add courses");
        assert_eq!(json["message"], "registration closed");
        assert_eq!(json["code"], "REG_CLOSED");

        let response = AppError::upstream(
            "drop courses",
            PortalError::Request {
                message: "timeout".into(),
                code: None,
            },
        )
        .into_response();
        assert_eq!(response_json(response).await["code"], "UNKNOWN_ERROR");
    }
}
