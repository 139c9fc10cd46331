//! Errors raised by the capture core.

use crate::label::ControlLabel;

/// Boxed error returned by a Learner implementation.
pub type LearnerFailure = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Failures that can interrupt a capture or confirmation step.
#[derive(Debug, thiserror::Error)]
pub enum CaptureError {
    /// The Learner refused or failed to ingest an example.
    /// Aborts whatever sequence was running.
    #[error("learner failed to add an example for `{label}`: {source}")]
    Learner {
        label: ControlLabel,
        #[source]
        source: LearnerFailure,
    },
    /// A class index outside `0..4`.
    #[error("class index {0} is out of range (expected 0..4)")]
    InvalidClass(usize),
    /// A pixel source with the wrong number of samples.
    #[error("image has {actual} samples, expected {expected}")]
    ImageSize { expected: usize, actual: usize },
}

impl CaptureError {
    /// Wrap an arbitrary Learner error for `label`.
    pub fn learner<E>(label: ControlLabel, err: E) -> Self
    where
        E: Into<LearnerFailure>,
    {
        CaptureError::Learner { label, source: err.into() }
    }
}
