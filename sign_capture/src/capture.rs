//! Example capture: the fixed-count "next sign" sequence and the
//! press-and-hold loop.
//!
//! Both loops hand one example at a time to the Learner through an
//! [`ExampleSink`] and yield to the host after every example, so the
//! Learner always sees a fresh camera frame.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::error::CaptureError;
use crate::label::ControlLabel;
use crate::presenter::{Presenter, TickSource, TriggerState};

/// Examples recorded per sign is `TARGET_COUNT + 1` (the counter runs
/// `0..=TARGET_COUNT`).
pub const TARGET_COUNT: usize = 10;

const ORDINALS: [&str; 3] = ["first", "second", "third"];
const NOISE_PROMPT: &str = "Record some noise for science";
const DONE_MESSAGE: &str = "Signs recorded. Train and enjoy secure living.";

// ════════════════════════════════════════════════════════════════════════════
// ExampleSink: the Learner hook
// ════════════════════════════════════════════════════════════════════════════

/// Receives "add one training example of this class" requests.
///
/// The Learner owns the camera; the example is whatever frame it currently
/// has buffered.
pub trait ExampleSink {
    fn add_example(&mut self, label: ControlLabel) -> Result<(), CaptureError>;
}

impl<S: ExampleSink + ?Sized> ExampleSink for &mut S {
    fn add_example(&mut self, label: ControlLabel) -> Result<(), CaptureError> {
        (**self).add_example(label)
    }
}

impl<S: ExampleSink + ?Sized> ExampleSink for Box<S> {
    fn add_example(&mut self, label: ControlLabel) -> Result<(), CaptureError> {
        (**self).add_example(label)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HoldFlag: press/release signal
// ════════════════════════════════════════════════════════════════════════════

/// Shared "button is held" flag.  Clones observe the same flag, so the
/// input side can release while the capture loop is running.
#[derive(Clone, Debug, Default)]
pub struct HoldFlag(Arc<AtomicBool>);

impl HoldFlag {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn press(&self)          { self.0.store(true, Ordering::SeqCst); }
    pub fn release(&self)        { self.0.store(false, Ordering::SeqCst); }
    pub fn is_held(&self) -> bool { self.0.load(Ordering::SeqCst) }
}

// ════════════════════════════════════════════════════════════════════════════
// CaptureTotals
// ════════════════════════════════════════════════════════════════════════════

/// Per-label running count of every example handed to the Learner, from
/// either capture path.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CaptureTotals {
    counts: [usize; ControlLabel::COUNT],
}

impl CaptureTotals {
    pub fn get(&self, label: ControlLabel) -> usize {
        self.counts[label.index()]
    }

    /// Post-increment: returns the count before this example.
    fn bump(&mut self, label: ControlLabel) -> usize {
        let before = self.counts[label.index()];
        self.counts[label.index()] += 1;
        before
    }
}

// ════════════════════════════════════════════════════════════════════════════
// SignSequence
// ════════════════════════════════════════════════════════════════════════════

/// Position in the guided "record each sign" walk.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SignSequence {
    current_sign:  usize,
    current_total: usize,
}

impl SignSequence {
    pub fn current_sign(&self)  -> usize { self.current_sign }
    pub fn current_total(&self) -> usize { self.current_total }

    pub fn is_done(&self) -> bool {
        self.current_sign >= ControlLabel::COUNT
    }

    /// Label the next `start_next_sign` will record, if any.
    pub fn next_label(&self) -> Option<ControlLabel> {
        ControlLabel::try_from(self.current_sign).ok()
    }

    /// Trigger state to show while idle.
    pub fn trigger(&self) -> TriggerState {
        match self.current_sign {
            i if i < ORDINALS.len() => TriggerState::Ready {
                prompt: format!("Capture {} sign", ORDINALS[i]),
            },
            i if i < ControlLabel::COUNT => TriggerState::Ready {
                prompt: NOISE_PROMPT.to_string(),
            },
            _ => TriggerState::Done { message: DONE_MESSAGE.to_string() },
        }
    }
}

/// What a `start_next_sign` call did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SignOutcome {
    /// A sign was recorded; `next` is the one the trigger now offers.
    Advanced { recorded: ControlLabel, next: ControlLabel },
    /// The last (noise) sign was recorded; the trigger is now done.
    Completed { recorded: ControlLabel },
    /// Everything was already recorded; nothing happened.
    AlreadyDone,
    /// An earlier run failed part-way; nothing happened.
    Halted,
}

// ════════════════════════════════════════════════════════════════════════════
// CaptureSession
// ════════════════════════════════════════════════════════════════════════════

/// Capture state for one user session.
///
/// Owns the Learner hook, so a session can never run unconfigured.
#[derive(Debug)]
pub struct CaptureSession<S: ExampleSink> {
    sink:     S,
    totals:   CaptureTotals,
    sequence: SignSequence,
    /// Set once a Learner error interrupts `start_next_sign`.
    halted:   bool,
}

impl<S: ExampleSink> CaptureSession<S> {
    pub fn new(sink: S) -> Self {
        CaptureSession {
            sink,
            totals:   CaptureTotals::default(),
            sequence: SignSequence::default(),
            halted:   false,
        }
    }

    pub fn sink(&self)         -> &S             { &self.sink }
    pub fn sink_mut(&mut self) -> &mut S         { &mut self.sink }
    pub fn into_sink(self)     -> S              { self.sink }
    pub fn totals(&self)       -> &CaptureTotals { &self.totals }
    pub fn sequence(&self)     -> &SignSequence  { &self.sequence }
    pub fn is_halted(&self)    -> bool           { self.halted }

    fn add(&mut self, label: ControlLabel) -> Result<(), CaptureError> {
        self.sink.add_example(label).inspect_err(|e| {
            warn!(control = %label, error = %e, "capture aborted");
        })
    }

    /// Record `TARGET_COUNT + 1` examples of the current sign, then move the
    /// trigger on to the next one.
    ///
    /// Runs to completion once started.  A Learner error aborts the loop,
    /// leaves the trigger disabled and halts the sequence: later calls return
    /// [`SignOutcome::Halted`] without touching the Learner or the display.
    ///
    /// The count shown is the label's running total before each example, so
    /// it continues from any earlier press-and-hold capture.
    pub fn start_next_sign<U>(&mut self, ui: &mut U) -> Result<SignOutcome, CaptureError>
    where
        U: Presenter + TickSource + ?Sized,
    {
        if self.halted {
            debug!("sign sequence halted; ignoring trigger");
            return Ok(SignOutcome::Halted);
        }
        let Some(label) = self.sequence.next_label() else {
            return Ok(SignOutcome::AlreadyDone);
        };

        ui.set_trigger(&TriggerState::Capturing { progress: 0.0 });
        self.sequence.current_total = 0;

        while self.sequence.current_total <= TARGET_COUNT {
            if let Err(e) = self.add(label) {
                self.halted = true;
                return Err(e);
            }
            ui.set_active_control(Some(label));
            let shown = self.totals.bump(label);
            ui.set_total(label, shown);
            let progress = self.sequence.current_total as f32 / TARGET_COUNT as f32;
            ui.set_trigger(&TriggerState::Capturing { progress });
            self.sequence.current_total += 1;
            ui.wait_for_next_tick();
        }

        ui.set_active_control(None);
        self.sequence.current_sign += 1;
        ui.set_trigger(&self.sequence.trigger());

        match self.sequence.next_label() {
            Some(next) => {
                debug!(recorded = %label, next = %next, "sign recorded");
                Ok(SignOutcome::Advanced { recorded: label, next })
            }
            None => {
                info!("all signs recorded");
                Ok(SignOutcome::Completed { recorded: label })
            }
        }
    }

    /// Record examples of `label` for as long as `hold` stays pressed.
    ///
    /// The flag is checked once per frame, so a release is seen at most one
    /// example late.  Returns how many examples were added.
    pub fn hold_capture<U>(
        &mut self,
        label: ControlLabel,
        hold: &HoldFlag,
        ui: &mut U,
    ) -> Result<usize, CaptureError>
    where
        U: Presenter + TickSource + ?Sized,
    {
        let mut added = 0;
        while hold.is_held() {
            self.add(label)?;
            ui.set_active_control(Some(label));
            let shown = self.totals.bump(label);
            ui.set_total(label, shown);
            added += 1;
            ui.wait_for_next_tick();
        }
        ui.set_active_control(None);
        debug!(control = %label, added, total = self.totals.get(label), "hold released");
        Ok(added)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
