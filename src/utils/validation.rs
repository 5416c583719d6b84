//! Centralized validation and helper functions.

use thiserror::Error;

/// Maximum number of sections accepted from a single edition file (DOS protection)
pub const MAX_SECTIONS: usize = 100_000;

#[derive(Error, Debug, PartialEq)]
pub enum ValidationError {
    #[error("{name} must be between 0 and 1, got {value}")]
    ThresholdOutOfRange { name: &'static str, value: f64 },

    #[error("candidate threshold ({candidate}) must not exceed match threshold ({matched})")]
    ThresholdOrder { candidate: f64, matched: f64 },

    #[error("complexity ceiling must be greater than zero")]
    ZeroComplexityCeiling,
}

/// Parse the leading number of a section id.
///
/// Ids such as "12", "12/1" and "12.5 bis" all have a numeric prefix; ids
/// with no leading number return `None` so they sort after numbered ones.
///
/// # Examples
///
/// ```
/// use charter_diff::utils::validation::parse_section_number;
///
/// assert_eq!(parse_section_number("12"), Some(12.0));
/// assert_eq!(parse_section_number("12/1"), Some(12.0));
/// assert_eq!(parse_section_number("2.5"), Some(2.5));
/// assert_eq!(parse_section_number("preamble"), None);
/// ```
#[must_use]
pub fn parse_section_number(id: &str) -> Option<f64> {
    let trimmed = id.trim();
    let mut end = 0;
    let mut seen_digit = false;
    let mut seen_dot = false;

    for (i, c) in trimmed.char_indices() {
        match c {
            '0'..='9' => {
                seen_digit = true;
                end = i + 1;
            }
            '.' if !seen_dot => seen_dot = true,
            '+' | '-' if i == 0 => {}
            _ => break,
        }
    }

    if !seen_digit {
        return None;
    }
    trimmed[..end].parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Check whether adding another section would exceed the limit.
/// Returns an error message if exceeded, None otherwise.
#[must_use]
pub fn check_section_limit(current_count: usize) -> Option<String> {
    if current_count >= MAX_SECTIONS {
        Some(format!(
            "Too many sections (>{MAX_SECTIONS}), possible malformed input"
        ))
    } else {
        None
    }
}

/// Validate that a threshold lies within [0, 1]
///
/// # Errors
///
/// Returns `ValidationError::ThresholdOutOfRange` for values outside the unit
/// interval or NaN.
pub fn validate_threshold(name: &'static str, value: f64) -> Result<(), ValidationError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ValidationError::ThresholdOutOfRange { name, value })
    }
}
