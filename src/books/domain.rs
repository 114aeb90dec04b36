use crate::core::library::{LibraryError, LibraryResult};

pub mod model;

pub(crate) fn validate_text(field: &str, value: &str) -> LibraryResult<()> {
    if value.trim().is_empty() {
        return Err(LibraryError::validation(
            format!("{} must not be empty", field).as_str(), Some(field.to_string())));
    }
    Ok(())
}

// isbn is free-form (the catalog accepts short keys such as "111"), but only digits,
// letters and hyphens are allowed so it stays usable as a URL path segment.
pub(crate) fn validate_isbn(isbn: &str) -> LibraryResult<()> {
    validate_text("isbn", isbn)?;
    if !isbn.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
        return Err(LibraryError::validation(
            format!("isbn {:?} contains invalid characters", isbn).as_str(), Some("isbn".to_string())));
    }
    Ok(())
}
