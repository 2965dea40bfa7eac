//! Degraded-signal errors.
//!
//! Every analyzer adapter converts these into its neutral default value, so nothing in
//! this enum ever reaches the fusion step or the caller.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SignalError {
    /// The backing analyzer/model is not loaded.
    #[error("{0} is unavailable")]
    Unavailable(&'static str),

    /// Not enough words/sentences to compute the metric.
    #[error("insufficient text for {0}")]
    InsufficientText(&'static str),

    /// Transport-level failure talking to an external model.
    #[error("classifier request failed: {0}")]
    Request(String),

    /// The external model answered with something we could not interpret.
    #[error("unexpected classifier response: {0}")]
    Response(String),

    /// One-time initialization of a collaborator failed.
    #[error("initialization failed: {0}")]
    Init(String),
}

impl From<reqwest::Error> for SignalError {
    fn from(e: reqwest::Error) -> Self {
        SignalError::Request(e.to_string())
    }
}
