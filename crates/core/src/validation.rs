//! Form Validation

use thiserror::Error;

/// Client-side rejection of a draft before anything is sent to the server.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field was left blank.
    #[error("{0} is required")]
    Missing(&'static str),

    /// The price field does not hold a decimal number.
    #[error("price must be a decimal number, got {0:?}")]
    InvalidPrice(String),

    /// The quantity field does not hold a non-negative whole number.
    #[error("quantity must be a whole number of zero or more, got {0:?}")]
    InvalidQuantity(String),
}

/// Return the trimmed field, rejecting blanks.
pub(crate) fn required<'a>(field: &'static str, value: &'a str) -> Result<&'a str, ValidationError> {
    let trimmed = value.trim();

    if trimmed.is_empty() {
        return Err(ValidationError::Missing(field));
    }

    Ok(trimmed)
}
