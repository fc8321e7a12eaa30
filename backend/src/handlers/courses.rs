use axum::{
    extract::{Extension, State},
    Json,
};
use chrono::NaiveTime;
use serde::Serialize;
use serde_json::Value;
use utoipa::ToSchema;

use crate::{
    error::AppError,
    handlers::{
        extract::{AppJson, AppQuery},
        portal_session,
    },
    models::{
        auth::Session,
        course::{
            CourseDetail, CourseListing, CourseSearch, CourseSearchQuery, RegisteredCourse,
            Registration, RegistrationPayload, TermFilter, TermPayload,
        },
    },
    state::AppState,
};

#[derive(Debug, Serialize, ToSchema)]
pub struct RegistrationResponse {
    pub success: bool,
    pub result: Value,
}

pub async fn search_courses(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    AppQuery(query): AppQuery<CourseSearchQuery>,
) -> Result<Json<Vec<CourseListing>>, AppError> {
    let demo = session.is_demo || query.wants_demo();
    let search = CourseSearch::try_from(query)?;

    if demo {
        return Ok(Json(state.demo.courses(&search)));
    }
    let courses = portal_session(&state, &session)?
        .get_courses(&search)
        .await
        .map_err(|err| AppError::upstream("fetch courses", err))?;
    Ok(Json(courses))
}

pub async fn add_courses(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    AppJson(payload): AppJson<RegistrationPayload>,
) -> Result<Json<RegistrationResponse>, AppError> {
    let demo = session.is_demo || payload.wants_demo();
    let registration = Registration::try_from(payload)?;

    let result = if demo {
        state.demo.add_result(&registration)
    } else {
        let client = portal_session(&state, &session)?;
        let result = client
            .add_courses(&registration)
            .await
            .map_err(|err| AppError::upstream("add courses", err))?;
        tracing::info!(
            username = %session.username(),
            crn = ?registration.crn,
            season = %registration.season,
            year = %registration.year,
            "courses added"
        );
        result
    };
    registration_response("add courses", result)
}

pub async fn drop_courses(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    AppJson(payload): AppJson<RegistrationPayload>,
) -> Result<Json<RegistrationResponse>, AppError> {
    let demo = session.is_demo || payload.wants_demo();
    let registration = Registration::try_from(payload)?;

    let result = if demo {
        state.demo.drop_result(&registration)
    } else {
        let client = portal_session(&state, &session)?;
        let result = client
            .drop_courses(&registration)
            .await
            .map_err(|err| AppError::upstream("drop courses", err))?;
        tracing::info!(
            username = %session.username(),
            crn = ?registration.crn,
            season = %registration.season,
            year = %registration.year,
            "courses dropped"
        );
        result
    };
    registration_response("drop courses", result)
}

fn registration_response(
    context: &str,
    result: Value,
) -> Result<Json<RegistrationResponse>, AppError> {
    if result.is_null() {
        return Err(AppError::Upstream {
            context: context.to_string(),
            message: "no result returned".to_string(),
            code: None,
        });
    }
    Ok(Json(RegistrationResponse {
        success: true,
        result,
    }))
}

pub async fn registered_courses(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    AppJson(payload): AppJson<TermPayload>,
) -> Result<Json<Vec<RegisteredCourse>>, AppError> {
    let demo = session.is_demo || payload.wants_demo();
    let filter = TermFilter::try_from(payload)?;
    load_registered(&state, &session, &filter, demo, "fetch registered courses")
        .await
        .map(Json)
}

pub async fn view_course(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    AppJson(payload): AppJson<RegistrationPayload>,
) -> Result<Json<CourseDetail>, AppError> {
    let demo = session.is_demo || payload.wants_demo();
    let registration = Registration::try_from(payload)?;

    if demo {
        let crn = registration.crn.first().map(String::as_str).unwrap_or_default();
        return state
            .demo
            .view(crn)
            .map(Json)
            .ok_or_else(|| AppError::NotFound(format!("Course {} not found", crn)));
    }
    let detail = portal_session(&state, &session)?
        .view_course(&registration)
        .await
        .map_err(|err| AppError::upstream("view course", err))?;
    Ok(Json(detail))
}

/// Registered courses that meet at least once, ordered by first meeting day then start time.
pub async fn schedule(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    AppJson(payload): AppJson<TermPayload>,
) -> Result<Json<Vec<RegisteredCourse>>, AppError> {
    let demo = session.is_demo || payload.wants_demo();
    let filter = TermFilter::try_from(payload)?;
    let courses = load_registered(&state, &session, &filter, demo, "fetch schedule").await?;
    Ok(Json(build_schedule(courses)))
}

async fn load_registered(
    state: &AppState,
    session: &Session,
    filter: &TermFilter,
    demo: bool,
    context: &str,
) -> Result<Vec<RegisteredCourse>, AppError> {
    if demo {
        return Ok(state.demo.registered(filter));
    }
    portal_session(state, session)?
        .get_registered_courses(filter)
        .await
        .map_err(|err| AppError::upstream(context, err))
}

fn build_schedule(courses: Vec<RegisteredCourse>) -> Vec<RegisteredCourse> {
    let mut meeting: Vec<RegisteredCourse> = courses
        .into_iter()
        .filter(|course| course.first_meeting_day().is_some())
        .collect();
    meeting.sort_by_cached_key(|course| {
        let start = start_time(course);
        (
            course.first_meeting_day(),
            start.is_none(),
            start,
            first_time(course).to_string(),
        )
    });
    meeting
}

fn first_time(course: &RegisteredCourse) -> &str {
    course
        .listing
        .time
        .first()
        .map(String::as_str)
        .unwrap_or_default()
}

const START_FORMATS: [&str; 3] = ["%H:%M", "%I:%M %p", "%I:%M%p"];

/// Start of the first time slot; slots that don't parse sort after those that do.
fn start_time(course: &RegisteredCourse) -> Option<NaiveTime> {
    let start = first_time(course).split('-').next()?.trim();
    START_FORMATS
        .iter()
        .find_map(|format| NaiveTime::parse_from_str(start, format).ok())
}
