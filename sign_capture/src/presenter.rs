//! Display and scheduling seams.
//!
//! The sequencers never touch a surface directly.  They report through a
//! [`Presenter`] and yield through a [`TickSource`]; a front end usually
//! implements both on one type.

use crate::label::{ControlLabel, PredictionStatus};

/// State of the "capture next sign" trigger control.
#[derive(Clone, Debug, PartialEq)]
pub enum TriggerState {
    /// Enabled, labelled with what the next press will record.
    Ready { prompt: String },
    /// Disabled while a sign is being recorded; `progress` is 0.0–1.0.
    Capturing { progress: f32 },
    /// Permanently disabled, all signs recorded.
    Done { message: String },
}

impl TriggerState {
    pub fn is_enabled(&self) -> bool {
        matches!(self, TriggerState::Ready { .. })
    }
}

/// Anything that can show the lock's state to the user.
///
/// Every method is fire-and-forget; last writer wins.
pub trait Presenter {
    /// Highlight `label`'s control, or clear the highlight with `None`.
    fn set_active_control(&mut self, label: Option<ControlLabel>);

    /// Show the committed confirmation status.
    fn set_status(&mut self, status: PredictionStatus);

    /// Show a capture count next to `label`'s control.
    fn set_total(&mut self, label: ControlLabel, count: usize);

    /// Update the capture trigger (prompt, progress bar or done).
    fn set_trigger(&mut self, trigger: &TriggerState);

    /// Free-form status line from the Learner's training run.
    fn set_training_status(&mut self, text: &str);

    /// Show or hide the "predicting" indicator.
    fn set_predicting(&mut self, predicting: bool);

    /// Reveal the capture controls once the Learner is ready.
    fn show_controller(&mut self) {
        self.set_predicting(false);
    }
}

/// Host frame clock.
pub trait TickSource {
    /// Suspend until the next display-frame opportunity.
    fn wait_for_next_tick(&mut self);
}
