use validator::ValidationError;

/// True for empty and whitespace-only input
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Validates that a string holds at least one non-whitespace character
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if is_blank(value) {
        let mut error = ValidationError::new("blank");
        error.message = Some("Value must not be blank".into());
        return Err(error);
    }
    Ok(())
}
