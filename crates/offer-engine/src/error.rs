//! Orchestration error types.
//!
//! All of these are recovered at the orchestrator boundary: the customer
//! sees a non-blocking notice and the page keeps its state, so a manual
//! retry stays possible. Nothing here is ever surfaced as a hard
//! failure.

use crate::boundary::CartApiError;
use thiserror::Error;

/// Failures while dispatching a CTA action.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CtaError {
    /// The external cart mutation call failed.
    #[error("cart call failed: {0}")]
    Cart(String),

    /// The cart mutation call exceeded its timeout.
    #[error("cart call timed out")]
    Timeout,
}

impl From<CartApiError> for CtaError {
    fn from(e: CartApiError) -> Self {
        CtaError::Cart(e.to_string())
    }
}
