//! Seam to the student-records portal.
//!
//! The gateway never talks to the portal directly: a [`PortalConnector`]
//! builds a [`PortalClient`] for one credential and every data operation goes
//! through that client. Credential checks happen implicitly on the first call.

pub mod http;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use crate::models::{
    auth::Credential,
    course::{
        CourseDetail, CourseListing, CourseRecord, CourseSearch, RegisteredCourse, Registration,
        TermFilter,
    },
};

pub use http::HttpPortalConnector;

#[derive(Debug, Error)]
pub enum PortalError {
    #[error("portal rejected credentials: {0}")]
    Authentication(String),

    #[error("portal returned malformed data: {0}")]
    MalformedResponse(String),

    #[error("portal request failed: {message}")]
    Request {
        message: String,
        code: Option<String>,
    },
}

/// Operations exposed by a portal session bound to one credential.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PortalClient: Send + Sync {
    async fn get_transcript(&self) -> Result<Vec<CourseRecord>, PortalError>;

    async fn get_courses(&self, search: &CourseSearch) -> Result<Vec<CourseListing>, PortalError>;

    /// Returns the portal's registration outcome; `Value::Null` means no result.
    async fn add_courses(&self, registration: &Registration) -> Result<Value, PortalError>;

    async fn drop_courses(&self, registration: &Registration) -> Result<Value, PortalError>;

    async fn get_registered_courses(
        &self,
        filter: &TermFilter,
    ) -> Result<Vec<RegisteredCourse>, PortalError>;

    async fn view_course(&self, registration: &Registration)
        -> Result<CourseDetail, PortalError>;
}

/// Builds portal sessions. Construction performs no I/O.
#[cfg_attr(test, mockall::automock)]
pub trait PortalConnector: Send + Sync {
    fn connect(&self, credential: &Credential) -> Result<Box<dyn PortalClient>, PortalError>;
}
