//! Gesture confirmation sequencer.
//!
//! A single mis-classified frame must never unlock anything, so the
//! committed status only moves one stage at a time and only when the
//! predicted control is the one expected next.

use tracing::debug;

use crate::error::CaptureError;
use crate::label::{ControlLabel, PredictionStatus};
use crate::presenter::Presenter;

/// Transition table.  Returns the new status for `(last, candidate)`, or
/// `None` when the pair is not one of the three allowed steps.
pub fn advance(last: PredictionStatus, candidate: PredictionStatus) -> Option<PredictionStatus> {
    use crate::label::PredictionStatus::*;
    match (last, candidate) {
        (Initial, Stage1) | (Stage1, Stage2) | (Stage2, Confirmed) => Some(candidate),
        _ => None,
    }
}

/// Owns the committed status for one session.
#[derive(Debug, Default)]
pub struct GestureConfirmer {
    status: PredictionStatus,
}

impl GestureConfirmer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> PredictionStatus {
        self.status
    }

    /// Feed one prediction.
    ///
    /// The active-control highlight always follows the prediction; the
    /// committed status changes only on an allowed transition, in which case
    /// the new status is returned.
    pub fn submit_prediction<P: Presenter + ?Sized>(
        &mut self,
        label: ControlLabel,
        presenter: &mut P,
    ) -> Option<PredictionStatus> {
        presenter.set_active_control(Some(label));

        let next = advance(self.status, label.candidate_status())?;
        debug!(from = %self.status, to = %next, control = %label, "status advanced");
        self.status = next;
        presenter.set_status(next);
        Some(next)
    }

    /// Index-based entry point for Learners that report raw class ids.
    pub fn submit_class<P: Presenter + ?Sized>(
        &mut self,
        class_id: usize,
        presenter: &mut P,
    ) -> Result<Option<PredictionStatus>, CaptureError> {
        let label = ControlLabel::try_from(class_id)?;
        Ok(self.submit_prediction(label, presenter))
    }

    /// Back to `Initial` (logout).
    pub fn reset_status(&mut self) {
        if self.status != PredictionStatus::Initial {
            debug!(from = %self.status, "status reset");
        }
        self.status = PredictionStatus::Initial;
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
