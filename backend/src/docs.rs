#![allow(dead_code)] // OpenAPI doc stubs are only referenced by utoipa macros.

use crate::{
    handlers::{courses::RegistrationResponse, ServiceStatus},
    models::{
        auth::{LoginRequest, LoginResponse, LoginUser, UserResponse},
        course::{
            CourseDetail, CourseListing, CourseRecord, CourseSearchQuery, CrnInput,
            RegisteredCourse, RegistrationPayload, Season, TermPayload,
        },
        transcript::{GpaSummary, TranscriptOverride, TranscriptResponse},
    },
};
use utoipa::{
    openapi::security::{Http, HttpAuthScheme, SecurityScheme},
    Modify, OpenApi,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        root_doc,
        login_doc,
        me_doc,
        get_transcript_doc,
        post_transcript_doc,
        search_courses_doc,
        add_courses_doc,
        drop_courses_doc,
        registered_courses_doc,
        view_course_doc,
        schedule_doc
    ),
    components(
        schemas(
            ServiceStatus,
            // auth
            LoginRequest,
            LoginResponse,
            LoginUser,
            UserResponse,
            // transcript
            TranscriptOverride,
            TranscriptResponse,
            GpaSummary,
            CourseRecord,
            // courses
            Season,
            CrnInput,
            CourseListing,
            CourseDetail,
            RegisteredCourse,
            RegistrationPayload,
            TermPayload,
            RegistrationResponse
        )
    ),
    modifiers(&SecuritySchemes),
    tags(
        (name = "Auth", description = "Login and session identity"),
        (name = "Transcript", description = "Transcript and cumulative GPA"),
        (name = "Courses", description = "Catalogue search, registration and schedule")
    ),
    security(("BearerAuth" = []))
)]
pub struct ApiDoc;

struct SecuritySchemes;

impl Modify for SecuritySchemes {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_default();

        let mut bearer = Http::new(HttpAuthScheme::Bearer);
        bearer.bearer_format = Some("JWT".to_string());

        components.add_security_scheme("BearerAuth", SecurityScheme::Http(bearer));
    }
}

#[utoipa::path(
    get,
    path = "/",
    responses((status = 200, description = "Service status", body = ServiceStatus)),
    security(())
)]
fn root_doc() {}

#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Token issued", body = LoginResponse),
        (status = 400, description = "Username or password missing"),
        (status = 401, description = "Portal rejected the credentials")
    ),
    tag = "Auth",
    security(())
)]
fn login_doc() {}

#[utoipa::path(
    get,
    path = "/api/user",
    responses(
        (status = 200, description = "Identity carried by the token", body = UserResponse),
        (status = 401, description = "No token"),
        (status = 403, description = "Invalid or expired token")
    ),
    tag = "Auth"
)]
fn me_doc() {}

#[utoipa::path(
    get,
    path = "/api/transcript",
    params(TranscriptOverride),
    responses(
        (status = 200, body = TranscriptResponse),
        (status = 500, description = "Portal call failed")
    ),
    tag = "Transcript"
)]
fn get_transcript_doc() {}

#[utoipa::path(
    post,
    path = "/api/transcript",
    request_body = TranscriptOverride,
    responses((status = 200, body = TranscriptResponse)),
    tag = "Transcript"
)]
fn post_transcript_doc() {}

#[utoipa::path(
    get,
    path = "/api/courses",
    params(CourseSearchQuery),
    responses(
        (status = 200, body = Vec<CourseListing>),
        (status = 400, description = "Validation failed")
    ),
    tag = "Courses"
)]
fn search_courses_doc() {}

#[utoipa::path(
    post,
    path = "/api/courses/add",
    request_body = RegistrationPayload,
    responses(
        (status = 200, body = RegistrationResponse),
        (status = 400, description = "Validation failed")
    ),
    tag = "Courses"
)]
fn add_courses_doc() {}

#[utoipa::path(
    post,
    path = "/api/courses/drop",
    request_body = RegistrationPayload,
    responses(
        (status = 200, body = RegistrationResponse),
        (status = 400, description = "Validation failed")
    ),
    tag = "Courses"
)]
fn drop_courses_doc() {}

#[utoipa::path(
    post,
    path = "/api/courses/registered",
    request_body = TermPayload,
    responses((status = 200, body = Vec<RegisteredCourse>)),
    tag = "Courses"
)]
fn registered_courses_doc() {}

#[utoipa::path(
    post,
    path = "/api/courses/view",
    request_body = RegistrationPayload,
    responses(
        (status = 200, body = CourseDetail),
        (status = 404, description = "Unknown CRN in demo mode")
    ),
    tag = "Courses"
)]
fn view_course_doc() {}

#[utoipa::path(
    post,
    path = "/api/schedule",
    request_body = TermPayload,
    responses((status = 200, description = "Meeting courses ordered by weekday", body = Vec<RegisteredCourse>)),
    tag = "Courses"
)]
fn schedule_doc() {}
