use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::models::{auth::overrides_to_demo, course::CourseRecord, lenient};

/// Sentinel reported when no course contributes to the average.
pub const GPA_NOT_AVAILABLE: &str = "N/A";

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct GpaSummary {
    #[serde(rename = "cumGPA")]
    pub cum_gpa: String,
    #[serde(rename = "totalCredits", serialize_with = "lenient::credits")]
    pub total_credits: f64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TranscriptResponse {
    #[serde(flatten)]
    pub summary: GpaSummary,
    pub courses: Vec<CourseRecord>,
}

#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
/// Optional credentials on the transcript endpoints; only the demo pair has an effect.
pub struct TranscriptOverride {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

impl TranscriptOverride {
    pub fn wants_demo(&self) -> bool {
        overrides_to_demo(self.username.as_deref(), self.password.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn response_uses_portal_field_names() {
        let response = TranscriptResponse {
            summary: GpaSummary {
                cum_gpa: "3.65".into(),
                total_credits: 6.0,
            },
            courses: Vec::new(),
        };
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value, json!({"cumGPA": "3.65", "totalCredits": 6, "courses": []}));
    }
}
