#![allow(dead_code)]
use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};
use studentportal_backend::{
    config::Config,
    models::{
        auth::Credential,
        course::{
            CourseDetail, CourseListing, CourseRecord, CourseSearch, RegisteredCourse,
            Registration, TermFilter,
        },
    },
    portal::{PortalClient, PortalConnector, PortalError},
    routes,
    state::AppState,
    utils::jwt::create_session_token,
};
use tower::ServiceExt;
use url::Url;

pub const TEST_SECRET: &str = "integration-test-secret";

pub fn test_config() -> Config {
    Config {
        portal_user: "admin".to_string(),
        portal_pass: "admin-pass".to_string(),
        portal_base_url: Url::parse("http://127.0.0.1:9/").expect("url"),
        jwt_secret: TEST_SECRET.to_string(),
        token_expiration_days: 7,
        port: 0,
        cors_allow_origins: Vec::new(),
    }
}

/// How the stub portal answers every call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PortalBehavior {
    Ok,
    RejectCredentials,
    Malformed,
    Fail,
}

/// Connector that records every session it opens.
pub struct RecordingConnector {
    behavior: PortalBehavior,
    connects: AtomicUsize,
    calls: Arc<AtomicUsize>,
}

impl RecordingConnector {
    pub fn new(behavior: PortalBehavior) -> Arc<Self> {
        Arc::new(Self {
            behavior,
            connects: AtomicUsize::new(0),
            calls: Arc::new(AtomicUsize::new(0)),
        })
    }

    pub fn connects(&self) -> usize {
        self.connects.load(Ordering::SeqCst)
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl PortalConnector for RecordingConnector {
    fn connect(&self, _credential: &Credential) -> Result<Box<dyn PortalClient>, PortalError> {
        self.connects.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(StubClient {
            behavior: self.behavior,
            calls: self.calls.clone(),
        }))
    }
}

struct StubClient {
    behavior: PortalBehavior,
    calls: Arc<AtomicUsize>,
}

impl StubClient {
    fn answer<T>(&self, value: T) -> Result<T, PortalError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.behavior {
            PortalBehavior::Ok => Ok(value),
            PortalBehavior::RejectCredentials => {
                Err(PortalError::Authentication("login refused".to_string()))
            }
            PortalBehavior::Malformed => {
                Err(PortalError::MalformedResponse("expected array".to_string()))
            }
            PortalBehavior::Fail => Err(PortalError::Request {
                message: "portal unavailable".to_string(),
                code: Some("PORTAL_DOWN".to_string()),
            }),
        }
    }
}

pub fn graded(department: &str, number: &str, grade: &str, credit: &str) -> CourseRecord {
    CourseRecord {
        department: department.to_string(),
        course_number: number.to_string(),
        grade: Some(grade.to_string()),
        credit: Some(credit.to_string()),
        ..Default::default()
    }
}

pub fn meeting(crn: &str, day: &str, time: &str) -> RegisteredCourse {
    RegisteredCourse {
        listing: CourseListing {
            crn: crn.to_string(),
            department: "COMP".to_string(),
            days: vec![day.to_string()],
            time: vec![time.to_string()],
            ..Default::default()
        },
        status: "Registered".to_string(),
        ..Default::default()
    }
}

#[async_trait]
impl PortalClient for StubClient {
    async fn get_transcript(&self) -> Result<Vec<CourseRecord>, PortalError> {
        self.answer(vec![
            graded("COMP", "202", "A", "3"),
            graded("MATH", "140", "B+", "3"),
            CourseRecord {
                grade: Some("A".to_string()),
                credit: Some("3".to_string()),
                completion_flag: Some("RW".to_string()),
                ..Default::default()
            },
        ])
    }

    async fn get_courses(&self, search: &CourseSearch) -> Result<Vec<CourseListing>, PortalError> {
        self.answer(vec![CourseListing {
            crn: "12345".to_string(),
            department: search.dep.clone(),
            course_number: search.number.clone().unwrap_or_else(|| "250".to_string()),
            ..Default::default()
        }])
    }

    async fn add_courses(&self, registration: &Registration) -> Result<Value, PortalError> {
        self.answer(json!({ "added": registration.crn }))
    }

    async fn drop_courses(&self, registration: &Registration) -> Result<Value, PortalError> {
        self.answer(json!({ "dropped": registration.crn }))
    }

    async fn get_registered_courses(
        &self,
        _filter: &TermFilter,
    ) -> Result<Vec<RegisteredCourse>, PortalError> {
        self.answer(vec![
            meeting("300", "Friday", "09:00-10:00"),
            meeting("100", "Tuesday", "13:00-14:30"),
            RegisteredCourse::default(),
            meeting("200", "Tuesday", "08:30-10:00"),
        ])
    }

    async fn view_course(&self, registration: &Registration) -> Result<CourseDetail, PortalError> {
        self.answer(CourseDetail {
            listing: CourseListing {
                crn: registration.crn.first().cloned().unwrap_or_default(),
                ..Default::default()
            },
            description: Some("Stub course".to_string()),
            ..Default::default()
        })
    }
}

pub fn app_with(connector: Arc<RecordingConnector>) -> Router {
    routes::app(AppState::new(test_config(), connector))
}

pub fn token_for(username: &str, password: &str, is_demo: bool) -> String {
    let (token, _) = create_session_token(
        &Credential::new(username, password),
        is_demo,
        TEST_SECRET,
        7,
    )
    .expect("create token");
    token
}

pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.expect("call app");
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    let json = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).expect("json body")
    };
    (status, json)
}

pub fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::empty()).expect("build request")
}

pub fn post_json(uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder
        .body(Body::from(body.to_string()))
        .expect("build request")
}
