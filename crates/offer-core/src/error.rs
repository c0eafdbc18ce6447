//! Offer resolution error types.
//!
//! Malformed section configuration is never an error: every resolver
//! degrades to a documented default so a marketing page keeps rendering.
//! Errors here cover customer input only.

use thiserror::Error;

/// Errors raised while mutating or validating a selection.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OfferError {
    /// Selected an axis that is not part of the active variant set.
    #[error("Unknown variant axis: {0}")]
    UnknownAxis(String),

    /// Selected an option the axis does not offer.
    #[error("Option {option:?} is not offered for {axis}")]
    InvalidOption { axis: String, option: String },

    /// One or more axes still need a selection before purchase.
    #[error("Missing selection for: {}", .0.join(", "))]
    IncompleteSelection(Vec<String>),

    /// Addressed a section the page does not contain.
    #[error("Unknown section: {0}")]
    UnknownSection(String),
}

impl OfferError {
    /// User-facing prompt for a blocked purchase attempt.
    pub fn prompt(&self) -> String {
        match self {
            OfferError::IncompleteSelection(axes) => {
                format!("Please select: {}", axes.join(", "))
            }
            other => other.to_string(),
        }
    }
}
