//! Commerce error types.

use thiserror::Error;

/// Errors raised while validating commerce data at the API boundary.
///
/// The catalog filter and the cart editor themselves are total and never
/// produce these.
#[derive(Error, Debug)]
pub enum CommerceError {
    /// Price outside the accepted range.
    #[error("Invalid price: {0}")]
    InvalidPrice(String),

    /// Rating outside 0..=5.
    #[error("Invalid rating: {0}")]
    InvalidRating(f64),

    /// Discount percentage outside 0..=100.
    #[error("Invalid discount percentage: {0}")]
    InvalidDiscount(f64),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for CommerceError {
    fn from(e: serde_json::Error) -> Self {
        CommerceError::SerializationError(e.to_string())
    }
}
