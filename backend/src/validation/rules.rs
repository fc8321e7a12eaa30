//! Rules for term, course and CRN inputs. Each rule is pure and runs before
//! any portal session is opened.

use validator::ValidationError;

use crate::models::course::CrnInput;

/// Validates a season code.
///
/// Requirements:
/// - One of `f`, `w`, `s` (case-insensitive)
pub fn validate_season(season: &str) -> Result<(), ValidationError> {
    match season.to_ascii_lowercase().as_str() {
        "f" | "w" | "s" => Ok(()),
        "" => Err(ValidationError::new("season_required")),
        _ => Err(ValidationError::new("season_invalid")),
    }
}

/// Validates an academic year.
///
/// Requirements:
/// - Exactly four ASCII digits
pub fn validate_year(year: &str) -> Result<(), ValidationError> {
    if year.is_empty() {
        return Err(ValidationError::new("year_required"));
    }
    if year.len() != 4 || !year.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ValidationError::new("year_invalid"));
    }
    Ok(())
}

/// Validates CRNs for add, drop and view.
///
/// Requirements:
/// - At least one value
/// - Every value is one or more ASCII digits
pub fn validate_crn(crn: &CrnInput) -> Result<(), ValidationError> {
    if crn.is_absent() {
        return Err(ValidationError::new("crn_required"));
    }
    check_crn_values(crn)
}

/// Same as [`validate_crn`] but an absent CRN is allowed.
pub fn validate_optional_crn(crn: &CrnInput) -> Result<(), ValidationError> {
    if crn.is_absent() {
        return Ok(());
    }
    check_crn_values(crn)
}

fn check_crn_values(crn: &CrnInput) -> Result<(), ValidationError> {
    let all_digits = crn
        .values()
        .iter()
        .all(|value| !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit()));
    if all_digits {
        Ok(())
    } else {
        Err(ValidationError::new("crn_invalid"))
    }
}

pub fn validate_department(department: &str) -> Result<(), ValidationError> {
    if department.trim().is_empty() {
        return Err(ValidationError::new("department_required"));
    }
    Ok(())
}

/// Upper-cased, trimmed department code used as the portal lookup key.
pub fn normalize_department(department: &str) -> String {
    department.trim().to_ascii_uppercase()
}

/// Validates an optional course number; empty means "not given".
///
/// Requirements:
/// - One to three digits
/// - Optionally followed by one upper-case letter
/// - Optionally followed by one more digit
pub fn validate_course_number(number: &str) -> Result<(), ValidationError> {
    let number = number.trim();
    if number.is_empty() || matches_course_number(number.as_bytes()) {
        Ok(())
    } else {
        Err(ValidationError::new("course_number_invalid"))
    }
}

fn matches_course_number(bytes: &[u8]) -> bool {
    let is_core =
        |core: &[u8]| (1..=3).contains(&core.len()) && core.iter().all(u8::is_ascii_digit);
    let without_letter = |rest: &[u8]| match rest.split_last() {
        Some((last, head)) if last.is_ascii_uppercase() => is_core(head),
        _ => is_core(rest),
    };
    match bytes.split_last() {
        Some((last, head)) if last.is_ascii_digit() => {
            without_letter(head) || without_letter(bytes)
        }
        _ => without_letter(bytes),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn season_accepts_codes_in_any_case() {
        assert!(validate_season("F").is_ok());
        assert!(validate_season("f").is_ok());
        assert!(validate_season("W").is_ok());
        assert!(validate_season("s").is_ok());
    }

    #[test]
    fn season_rejects_words_and_unknown_codes() {
        assert!(validate_season("fall").is_err());
        assert!(validate_season("x").is_err());
        assert_eq!(validate_season("").unwrap_err().code, "season_required");
    }

    #[test]
    fn year_requires_four_digits() {
        assert!(validate_year("2024").is_ok());
        assert!(validate_year("24").is_err());
        assert!(validate_year("20245").is_err());
        assert!(validate_year("20a4").is_err());
        assert!(validate_year("").is_err());
    }

    #[test]
    fn crn_accepts_single_and_list() {
        assert!(validate_crn(&CrnInput::One("12345".into())).is_ok());
        assert!(validate_crn(&CrnInput::Many(vec!["12345".into(), "67890".into()])).is_ok());
        assert!(validate_crn(&CrnInput::Number(12345)).is_ok());
    }

    #[test]
    fn crn_rejects_non_digits_and_empty() {
        assert!(validate_crn(&CrnInput::Many(vec!["12a45".into()])).is_err());
        assert!(validate_crn(&CrnInput::Many(vec!["12345".into(), "x".into()])).is_err());
        assert!(validate_crn(&CrnInput::One(String::new())).is_err());
        assert!(validate_crn(&CrnInput::Many(Vec::new())).is_err());
    }

    #[test]
    fn optional_crn_allows_absence_but_not_garbage() {
        assert!(validate_optional_crn(&CrnInput::default()).is_ok());
        assert!(validate_optional_crn(&CrnInput::One("abc".into())).is_err());
    }

    #[test]
    fn department_is_required_and_upper_cased() {
        assert!(validate_department("  ").is_err());
        assert!(validate_department("comp").is_ok());
        assert_eq!(normalize_department(" comp "), "COMP");
    }

    #[test]
    fn course_number_follows_portal_format() {
        for ok in ["", "2", "250", "396", "199D1", "19D", "1234"] {
            assert!(validate_course_number(ok).is_ok(), "{ok} should pass");
        }
        for bad in ["12345", "abc", "25d1", "250DD", "D1", "250D12"] {
            assert!(validate_course_number(bad).is_err(), "{bad} should fail");
        }
    }
}
