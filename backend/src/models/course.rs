//! Course entities returned by the portal and the term/CRN payloads that select them.

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::{
    error::AppError,
    models::{auth::overrides_to_demo, lenient},
    validation::rules,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
/// Academic season code used by the portal.
pub enum Season {
    #[serde(rename = "f")]
    Fall,
    #[serde(rename = "w")]
    Winter,
    #[serde(rename = "s")]
    Summer,
}

impl Season {
    pub fn code(&self) -> &'static str {
        match self {
            Season::Fall => "f",
            Season::Winter => "w",
            Season::Summer => "s",
        }
    }
}

impl FromStr for Season {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "f" => Ok(Season::Fall),
            "w" => Ok(Season::Winter),
            "s" => Ok(Season::Summer),
            _ => Err(AppError::BadRequest(
                "Valid season is required (f, w, s)".to_string(),
            )),
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
/// One transcript line item.
pub struct CourseRecord {
    pub department: String,
    pub course_number: String,
    pub section: String,
    #[serde(deserialize_with = "lenient::opt_string_or_number")]
    pub credit: Option<String>,
    pub grade: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string_or_number")]
    pub class_average: Option<String>,
    pub term: String,
    #[serde(deserialize_with = "lenient::string_or_number")]
    pub year: String,
    pub title: String,
    /// `RW` marks a course the student is currently registered in.
    pub completion_flag: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
/// Course section returned by a catalogue search.
pub struct CourseListing {
    #[serde(deserialize_with = "lenient::string_or_number")]
    pub crn: String,
    pub department: String,
    #[serde(deserialize_with = "lenient::string_or_number")]
    pub course_number: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub instructor: String,
    /// Weekday names, index-aligned with `time`.
    #[serde(default)]
    pub days: Vec<String>,
    #[serde(default)]
    pub time: Vec<String>,
    #[serde(default)]
    pub is_full: bool,
    #[serde(default)]
    pub section: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisteredCourse {
    #[serde(flatten)]
    pub listing: CourseListing,
    #[serde(default)]
    pub location: String,
    #[serde(default, deserialize_with = "lenient::string_or_number")]
    pub credits: String,
    #[serde(default)]
    pub status: String,
}

impl RegisteredCourse {
    /// Position of the earliest meeting day in a Monday-first week.
    pub fn first_meeting_day(&self) -> Option<usize> {
        self.listing
            .days
            .iter()
            .filter_map(|day| weekday_index(day))
            .min()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CourseDetail {
    #[serde(flatten)]
    pub listing: CourseListing,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::opt_string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub credits: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enrolled: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub waitlist: Option<u32>,
}

const WEEKDAYS: [&str; 7] = [
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
    "sunday",
];

fn weekday_index(day: &str) -> Option<usize> {
    let day = day.trim().to_ascii_lowercase();
    if day.is_empty() {
        return None;
    }
    // Single-letter registrar codes: R is Thursday, S Saturday, U Sunday.
    let code = match day.as_str() {
        "m" => Some(0),
        "t" => Some(1),
        "w" => Some(2),
        "r" => Some(3),
        "f" => Some(4),
        "s" => Some(5),
        "u" => Some(6),
        _ => None,
    };
    code.or_else(|| WEEKDAYS.iter().position(|name| name.starts_with(&day)))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
/// A single CRN or an ordered list of CRNs.
pub enum CrnInput {
    One(String),
    Number(u64),
    Many(Vec<String>),
}

impl Default for CrnInput {
    fn default() -> Self {
        CrnInput::Many(Vec::new())
    }
}

impl CrnInput {
    pub fn values(&self) -> Vec<String> {
        match self {
            CrnInput::One(value) => vec![value.clone()],
            CrnInput::Number(value) => vec![value.to_string()],
            CrnInput::Many(values) => values.clone(),
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, CrnInput::Many(values) if values.is_empty())
            || matches!(self, CrnInput::One(value) if value.is_empty())
    }
}

/// Normalized catalogue search handed to the portal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CourseSearch {
    pub dep: String,
    pub number: Option<String>,
    pub season: Season,
    pub year: String,
}

/// Term selector for registered-course lookups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TermFilter {
    pub season: Season,
    pub year: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub crn: Vec<String>,
}

/// Term plus CRNs for add, drop and view calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Registration {
    pub season: Season,
    pub year: String,
    pub crn: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
/// Query string accepted by `GET /api/courses`.
pub struct CourseSearchQuery {
    #[serde(default, alias = "department")]
    #[validate(custom(function = "rules::validate_department"))]
    pub dep: String,
    #[serde(default)]
    #[validate(custom(function = "rules::validate_course_number"))]
    pub number: String,
    #[serde(default)]
    #[validate(custom(function = "rules::validate_season"))]
    pub season: String,
    #[serde(default)]
    #[validate(custom(function = "rules::validate_year"))]
    pub year: String,
    #[serde(default, alias = "identity")]
    pub username: Option<String>,
    #[serde(default, alias = "secret")]
    pub password: Option<String>,
}

impl CourseSearchQuery {
    pub fn wants_demo(&self) -> bool {
        overrides_to_demo(self.username.as_deref(), self.password.as_deref())
    }
}

impl TryFrom<CourseSearchQuery> for CourseSearch {
    type Error = AppError;

    fn try_from(query: CourseSearchQuery) -> Result<Self, Self::Error> {
        query.validate()?;
        let number = Some(query.number.trim().to_string()).filter(|n| !n.is_empty());
        Ok(CourseSearch {
            dep: rules::normalize_department(&query.dep),
            number,
            season: query.season.parse()?,
            year: query.year,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
/// Body of the add, drop and view endpoints.
pub struct RegistrationPayload {
    #[serde(default)]
    #[validate(custom(function = "rules::validate_season"))]
    pub season: String,
    #[serde(default, deserialize_with = "lenient::string_or_number")]
    #[validate(custom(function = "rules::validate_year"))]
    pub year: String,
    #[serde(default, deserialize_with = "lenient::crn_or_absent")]
    #[validate(custom(function = "rules::validate_crn"))]
    pub crn: CrnInput,
    #[serde(default, alias = "identity")]
    pub username: Option<String>,
    #[serde(default, alias = "secret")]
    pub password: Option<String>,
}

impl RegistrationPayload {
    pub fn wants_demo(&self) -> bool {
        overrides_to_demo(self.username.as_deref(), self.password.as_deref())
    }
}

impl TryFrom<RegistrationPayload> for Registration {
    type Error = AppError;

    fn try_from(payload: RegistrationPayload) -> Result<Self, Self::Error> {
        payload.validate()?;
        Ok(Registration {
            season: payload.season.parse()?,
            year: payload.year,
            crn: payload.crn.values(),
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
/// Body of the registered-courses and schedule endpoints; `crn` narrows the result.
pub struct TermPayload {
    #[serde(default)]
    #[validate(custom(function = "rules::validate_season"))]
    pub season: String,
    #[serde(default, deserialize_with = "lenient::string_or_number")]
    #[validate(custom(function = "rules::validate_year"))]
    pub year: String,
    #[serde(default, deserialize_with = "lenient::crn_or_absent")]
    #[validate(custom(function = "rules::validate_optional_crn"))]
    pub crn: CrnInput,
    #[serde(default, alias = "identity")]
    pub username: Option<String>,
    #[serde(default, alias = "secret")]
    pub password: Option<String>,
}

impl TermPayload {
    pub fn wants_demo(&self) -> bool {
        overrides_to_demo(self.username.as_deref(), self.password.as_deref())
    }
}

impl TryFrom<TermPayload> for TermFilter {
    type Error = AppError;

    fn try_from(payload: TermPayload) -> Result<Self, Self::Error> {
        payload.validate()?;
        let crn = if payload.crn.is_absent() {
            Vec::new()
        } else {
            payload.crn.values()
        };
        Ok(TermFilter {
            season: payload.season.parse()?,
            year: payload.year,
            crn,
        })
    }
}
