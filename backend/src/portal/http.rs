//! JSON-over-HTTP client for the portal bridge service.
//!
//! Every call is authenticated with HTTP basic auth using the session
//! credential; the bridge owns the portal login and scraping.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::{de::DeserializeOwned, Deserialize};
use serde_json::Value;
use url::Url;

use super::{PortalClient, PortalConnector, PortalError};
use crate::models::{
    auth::Credential,
    course::{
        CourseDetail, CourseListing, CourseRecord, CourseSearch, RegisteredCourse, Registration,
        TermFilter,
    },
};

const USER_AGENT: &str = "studentportal-backend/1.0";

#[derive(Clone)]
pub struct HttpPortalConnector {
    client: Client,
    base_url: Url,
}

impl HttpPortalConnector {
    pub fn new(mut base_url: Url) -> anyhow::Result<Self> {
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e: reqwest::Error| {
                anyhow::anyhow!("Failed to initialize portal HTTP client: {}", e)
            })?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }
}

impl PortalConnector for HttpPortalConnector {
    fn connect(&self, credential: &Credential) -> Result<Box<dyn PortalClient>, PortalError> {
        if credential.username.is_empty() || credential.password.is_empty() {
            return Err(PortalError::Authentication(
                "username and password are required".to_string(),
            ));
        }

        Ok(Box::new(HttpPortalSession {
            client: self.client.clone(),
            base_url: self.base_url.clone(),
            credential: credential.clone(),
        }))
    }
}

struct HttpPortalSession {
    client: Client,
    base_url: Url,
    credential: Credential,
}

/// Error body shape the bridge uses for non-2xx answers.
#[derive(Debug, Default, Deserialize)]
struct BridgeError {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    code: Option<String>,
}

impl HttpPortalSession {
    fn endpoint(&self, path: &str) -> Result<Url, PortalError> {
        self.base_url.join(path).map_err(|e| PortalError::Request {
            message: format!("invalid portal endpoint {}: {}", path, e),
            code: Some("INVALID_ENDPOINT".to_string()),
        })
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, PortalError> {
        let response = request
            .basic_auth(&self.credential.username, Some(&self.credential.password))
            .send()
            .await
            .map_err(|e: reqwest::Error| PortalError::Request {
                message: format!("portal bridge unreachable: {}", e),
                code: Some("PORTAL_UNREACHABLE".to_string()),
            })?;

        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|e: reqwest::Error| PortalError::Request {
                message: format!("failed to read portal response: {}", e),
                code: Some("PORTAL_READ_FAILED".to_string()),
            })?;

        if !status.is_success() {
            let bridge: BridgeError = serde_json::from_slice(&bytes).unwrap_or_default();
            let message = bridge
                .message
                .or(bridge.error)
                .unwrap_or_else(|| format!("portal bridge answered {}", status));
            if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
                return Err(PortalError::Authentication(message));
            }
            return Err(PortalError::Request {
                message,
                code: bridge.code.or_else(|| Some(status.as_u16().to_string())),
            });
        }

        serde_json::from_slice(&bytes).map_err(|e| PortalError::MalformedResponse(e.to_string()))
    }
}

#[async_trait]
impl PortalClient for HttpPortalSession {
    async fn get_transcript(&self) -> Result<Vec<CourseRecord>, PortalError> {
        let url = self.endpoint("transcript")?;
        self.send(self.client.get(url)).await
    }

    async fn get_courses(&self, search: &CourseSearch) -> Result<Vec<CourseListing>, PortalError> {
        let url = self.endpoint("courses/search")?;
        self.send(self.client.post(url).json(search)).await
    }

    async fn add_courses(&self, registration: &Registration) -> Result<Value, PortalError> {
        let url = self.endpoint("courses/add")?;
        self.send(self.client.post(url).json(registration)).await
    }

    async fn drop_courses(&self, registration: &Registration) -> Result<Value, PortalError> {
        let url = self.endpoint("courses/drop")?;
        self.send(self.client.post(url).json(registration)).await
    }

    async fn get_registered_courses(
        &self,
        filter: &TermFilter,
    ) -> Result<Vec<RegisteredCourse>, PortalError> {
        let url = self.endpoint("courses/registered")?;
        self.send(self.client.post(url).json(filter)).await
    }

    async fn view_course(
        &self,
        registration: &Registration,
    ) -> Result<CourseDetail, PortalError> {
        let url = self.endpoint("courses/view")?;
        self.send(self.client.post(url).json(registration)).await
    }
}
