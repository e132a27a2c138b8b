//! Input validation utilities
//!
//! Functions with a `ValidationError` result plug into
//! `#[validate(custom(function = ...))]` on request DTOs.

use std::borrow::Cow;

use validator::ValidationError;

use crate::constants::MAX_SOURCE_CODE_SIZE;

fn error(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::Borrowed(message));
    err
}

/// Validate source code size
pub fn validate_source_code(code: &str) -> Result<(), ValidationError> {
    if code.trim().is_empty() {
        return Err(error("source_code", "Source code cannot be empty"));
    }
    if code.len() as u64 > MAX_SOURCE_CODE_SIZE {
        return Err(error("source_code", "Source code exceeds maximum size of 64KB"));
    }
    Ok(())
}

/// Reject strings that are empty after trimming
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(error("blank", "Value cannot be blank"));
    }
    Ok(())
}

/// A question needs at least two distinct, non-blank options
pub fn validate_options(options: &[String]) -> Result<(), ValidationError> {
    if options.len() < 2 {
        return Err(error("options", "A question needs at least two options"));
    }
    if options.iter().any(|o| o.trim().is_empty()) {
        return Err(error("options", "Options cannot be blank"));
    }
    let mut seen: Vec<&str> = Vec::with_capacity(options.len());
    for option in options {
        if seen.contains(&option.as_str()) {
            return Err(error("options", "Options must be distinct"));
        }
        seen.push(option);
    }
    Ok(())
}

/// Both bounds present means `min <= max`
pub fn validate_salary_range(min: Option<i64>, max: Option<i64>) -> Result<(), ValidationError> {
    match (min, max) {
        (Some(min), Some(max)) if min > max => {
            Err(error("salary", "Minimum salary cannot exceed maximum salary"))
        }
        (Some(v), _) | (_, Some(v)) if v < 0 => Err(error("salary", "Salary cannot be negative")),
        _ => Ok(()),
    }
}

/// Trimmed value, or `None` when nothing is left
pub fn non_blank(input: Option<&str>) -> Option<&str> {
    input.map(str::trim).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_code_bounds() {
        assert!(validate_source_code("print(1)").is_ok());
        assert!(validate_source_code("   \n").is_err());
        let huge = "a".repeat(MAX_SOURCE_CODE_SIZE as usize + 1);
        assert!(validate_source_code(&huge).is_err());
    }

    #[test]
    fn test_options() {
        let opts = |v: &[&str]| v.iter().map(|s| s.to_string()).collect::<Vec<_>>();
        assert!(validate_options(&opts(&["let", "var", "const"])).is_ok());
        assert!(validate_options(&opts(&["let"])).is_err());
        assert!(validate_options(&opts(&["let", " "])).is_err());
        assert!(validate_options(&opts(&["let", "let"])).is_err());
    }

    #[test]
    fn test_salary_range() {
        assert!(validate_salary_range(Some(50_000), Some(80_000)).is_ok());
        assert!(validate_salary_range(None, Some(80_000)).is_ok());
        assert!(validate_salary_range(None, None).is_ok());
        assert!(validate_salary_range(Some(90_000), Some(80_000)).is_err());
        assert!(validate_salary_range(Some(-1), None).is_err());
    }

    #[test]
    fn test_non_blank() {
        assert_eq!(non_blank(Some("  Acme ")), Some("Acme"));
        assert_eq!(non_blank(Some("   ")), None);
        assert_eq!(non_blank(None), None);
    }
}
