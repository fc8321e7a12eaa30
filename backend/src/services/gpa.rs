//! Cumulative GPA over transcript records.

use crate::models::{
    course::CourseRecord,
    transcript::{GpaSummary, GPA_NOT_AVAILABLE},
};

/// Completion flag for courses the student is currently registered in.
pub const CURRENTLY_REGISTERED: &str = "RW";

/// Letter grade to grade points; anything outside the table has no value.
pub fn grade_points(grade: &str) -> Option<f64> {
    let points = match grade.trim() {
        "A" => 4.0,
        "A-" => 3.7,
        "B+" => 3.3,
        "B" => 3.0,
        "B-" => 2.7,
        "C+" => 2.3,
        "C" => 2.0,
        "D" => 1.0,
        "F" => 0.0,
        _ => return None,
    };
    Some(points)
}

/// Credit-weighted average of every graded, completed course.
///
/// Records without a grade, with an unknown grade letter, with unparseable
/// credit, or flagged `RW` are skipped. Division happens once at the end, so
/// zero-credit rows never skew the result.
pub fn aggregate(courses: &[CourseRecord]) -> GpaSummary {
    let (grade_points_total, total_credits) = courses
        .iter()
        .filter_map(weighted_points)
        .fold((0.0_f64, 0.0_f64), |(points, credits), (p, c)| {
            (points + p * c, credits + c)
        });

    let cum_gpa = if total_credits > 0.0 {
        format!("{:.2}", grade_points_total / total_credits)
    } else {
        GPA_NOT_AVAILABLE.to_string()
    };

    GpaSummary {
        cum_gpa,
        total_credits,
    }
}

fn weighted_points(course: &CourseRecord) -> Option<(f64, f64)> {
    if course.completion_flag.as_deref().map(str::trim) == Some(CURRENTLY_REGISTERED) {
        return None;
    }
    let grade = course.grade.as_deref().filter(|g| !g.trim().is_empty())?;
    let points = grade_points(grade)?;
    let credit = course
        .credit
        .as_deref()?
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|c| c.is_finite())?;
    Some((points, credit))
}
