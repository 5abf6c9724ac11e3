//! Domain validation for user-supplied fields. Every mutation validates
//! its inputs here before touching state, so a rejected value is never
//! partially applied.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

/// Longest allowed trip in days.
pub const MAX_TRIP_DAYS: i64 = 90;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ValidationError {
    #[error("{field} must not be empty")]
    Empty { field: &'static str },
    #[error("{field} must be at least {min} characters")]
    TooShort { field: &'static str, min: usize },
    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },
    #[error("{field} may only contain letters, spaces and hyphens")]
    BadCharacters { field: &'static str },
    #[error("invalid date {0:?}, expected YYYY-MM-DD")]
    BadDate(String),
    #[error("start date must not be after end date")]
    InvertedDates,
    #[error("trip length must not exceed {MAX_TRIP_DAYS} days")]
    TripTooLong,
    #[error("{field} must be a number of at least {min}")]
    TooSmall { field: &'static str, min: f64 },
    #[error("{field} must be at most {max}")]
    TooBig { field: &'static str, max: f64 },
    #[error("day must be between 1 and {duration}")]
    DayOutOfRange { duration: u32 },
    #[error("unknown {field} {value:?}")]
    UnknownVariant { field: &'static str, value: String },
}

static NAME_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\p{L} \-]+$").expect("static pattern"));

/// Collapse whitespace and lowercase, for case/whitespace-insensitive
/// matching of names.
pub fn normalize_name(value: &str) -> String {
    value
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

fn bounded(
    value: &str,
    field: &'static str,
    min: usize,
    max: usize,
) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Empty { field });
    }
    let chars = trimmed.chars().count();
    if chars < min {
        return Err(ValidationError::TooShort { field, min });
    }
    if chars > max {
        return Err(ValidationError::TooLong { field, max });
    }
    Ok(trimmed.to_string())
}

pub fn project_title(value: &str) -> Result<String, ValidationError> {
    bounded(value, "project title", 3, 100)
}

/// Parse and order-check a date range. Inverted ranges and trips past
/// `MAX_TRIP_DAYS` are rejected; past dates are allowed (trips get logged
/// after the fact too).
pub fn date_range(start: &str, end: &str) -> Result<(NaiveDate, NaiveDate), ValidationError> {
    let parse = |s: &str| {
        NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .map_err(|_| ValidationError::BadDate(s.to_string()))
    };
    let start = parse(start)?;
    let end = parse(end)?;
    if start > end {
        return Err(ValidationError::InvertedDates);
    }
    if (end - start).num_days() > MAX_TRIP_DAYS {
        return Err(ValidationError::TripTooLong);
    }
    Ok((start, end))
}

pub fn participant_name(value: &str) -> Result<String, ValidationError> {
    let name = bounded(value, "participant name", 2, 50)?;
    if !NAME_CHARS.is_match(&name) {
        return Err(ValidationError::BadCharacters {
            field: "participant name",
        });
    }
    Ok(name)
}

pub fn gear_name(value: &str) -> Result<String, ValidationError> {
    bounded(value, "gear name", 2, 100)
}

pub fn category(value: &str) -> Result<String, ValidationError> {
    bounded(value, "category", 1, 50)
}

pub fn hint(value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.chars().count() > 200 {
        return Err(ValidationError::TooLong {
            field: "hint",
            max: 200,
        });
    }
    Ok(trimmed.to_string())
}

pub fn chat_message(value: &str) -> Result<String, ValidationError> {
    bounded(value, "message", 1, 500)
}

pub fn template_name(value: &str) -> Result<String, ValidationError> {
    bounded(value, "template name", 1, 60)
}

pub fn diary_text(value: &str) -> Result<String, ValidationError> {
    bounded(value, "diary text", 1, 2000)
}

/// Gear weight in kg: finite, non-negative, bounded.
pub fn weight_kg(value: f64) -> Result<f64, ValidationError> {
    if !value.is_finite() || value < 0.0 {
        return Err(ValidationError::TooSmall {
            field: "weight",
            min: 0.0,
        });
    }
    if value > 200.0 {
        return Err(ValidationError::TooBig {
            field: "weight",
            max: 200.0,
        });
    }
    Ok((value * 100.0).round() / 100.0)
}

/// Servings multiplier: positive, bounded, rounded to one decimal.
pub fn servings(value: f64) -> Result<f64, ValidationError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(ValidationError::TooSmall {
            field: "servings",
            min: 0.1,
        });
    }
    if value > 20.0 {
        return Err(ValidationError::TooBig {
            field: "servings",
            max: 20.0,
        });
    }
    Ok((value * 10.0).round() / 10.0)
}

/// A meal day must fall inside the trip span.
pub fn meal_day(day: u32, duration: u32) -> Result<u32, ValidationError> {
    if day >= 1 && day <= duration {
        Ok(day)
    } else {
        Err(ValidationError::DayOutOfRange { duration })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn titles_are_trimmed_and_bounded() {
        assert_eq!(project_title("  Sarek loop  ").unwrap(), "Sarek loop");
        assert!(matches!(
            project_title("ab"),
            Err(ValidationError::TooShort { .. })
        ));
        assert!(matches!(
            project_title(&"x".repeat(101)),
            Err(ValidationError::TooLong { .. })
        ));
        assert!(matches!(
            project_title("   "),
            Err(ValidationError::Empty { .. })
        ));
    }

    #[test]
    fn date_ranges_parse_and_order() {
        let (start, end) = date_range("2024-06-01", "2024-06-03").unwrap();
        assert_eq!((end - start).num_days(), 2);

        assert_eq!(
            date_range("2024-06-05", "2024-06-01"),
            Err(ValidationError::InvertedDates)
        );
        assert!(matches!(
            date_range("June 1st", "2024-06-03"),
            Err(ValidationError::BadDate(_))
        ));
        assert_eq!(
            date_range("2024-01-01", "2024-06-01"),
            Err(ValidationError::TripTooLong)
        );
    }

    #[test]
    fn single_day_trip_is_valid() {
        assert!(date_range("2024-06-01", "2024-06-01").is_ok());
    }

    #[test]
    fn participant_names_allow_letters_across_scripts() {
        assert!(participant_name("Anna-Lena").is_ok());
        assert!(participant_name("Ольга").is_ok());
        assert!(matches!(
            participant_name("R2-D2"),
            Err(ValidationError::BadCharacters { .. })
        ));
        assert!(matches!(
            participant_name("A"),
            Err(ValidationError::TooShort { .. })
        ));
    }

    #[test]
    fn weight_bounds_and_rounding() {
        assert_eq!(weight_kg(1.256).unwrap(), 1.26);
        assert_eq!(weight_kg(0.0).unwrap(), 0.0);
        assert!(weight_kg(-0.1).is_err());
        assert!(weight_kg(201.0).is_err());
        assert!(weight_kg(f64::NAN).is_err());
    }

    #[test]
    fn servings_bounds_and_rounding() {
        assert_eq!(servings(1.25).unwrap(), 1.3);
        assert!(servings(0.0).is_err());
        assert!(servings(21.0).is_err());
    }

    #[test]
    fn meal_day_stays_inside_the_trip() {
        assert_eq!(meal_day(2, 3).unwrap(), 2);
        assert!(meal_day(0, 3).is_err());
        assert!(meal_day(4, 3).is_err());
    }

    #[test]
    fn normalize_name_collapses_case_and_whitespace() {
        assert_eq!(normalize_name("  Gas   Stove "), "gas stove");
        assert_eq!(normalize_name("GAS STOVE"), "gas stove");
    }

    #[test]
    fn chat_message_rejects_walls_of_text() {
        assert!(chat_message(&"x".repeat(500)).is_ok());
        assert!(chat_message(&"x".repeat(501)).is_err());
    }
}
