//! # sign_capture
//!
//! State machines behind a four-sign "gesture lock": the user records
//! examples of three secret signs plus a noise class, an external Learner
//! trains on them, and predictions are then accepted only when they arrive
//! in the right order.
//!
//! Nothing here trains, infers or draws to a real screen.  Everything
//! outbound goes through small traits so the same logic runs under a
//! window, a browser bridge or a unit test:
//!
//! | Seam | Direction | Purpose |
//! |---|---|---|
//! | [`ExampleSink`] | → Learner | "add one example of this class" |
//! | [`Presenter`] | → display | active control, status, totals, trigger |
//! | [`TickSource`] | ← host | yield until the next display frame |
//! | [`Canvas`] / [`ThumbnailBoard`] | → display | decoded RGBA frames |
//!
//! ## Confirmation chain
//!
//! | Last status | Predicted control | New status |
//! |---|---|---|
//! | `Initial` | `Up` (stage 1) | `Stage1` |
//! | `Stage1` | `Right` (stage 2) | `Stage2` |
//! | `Stage2` | `Down` (confirmed) | `Confirmed` |
//!
//! Any other pair leaves the status alone.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use sign_capture::{CaptureSession, ExampleSink, ControlLabel, CaptureError};
//!
//! struct Counter(usize);
//! impl ExampleSink for Counter {
//!     fn add_example(&mut self, _label: ControlLabel) -> Result<(), CaptureError> {
//!         self.0 += 1;
//!         Ok(())
//!     }
//! }
//!
//! let session = CaptureSession::new(Counter(0));
//! assert_eq!(session.sequence().current_sign(), 0);
//! ```

pub mod error;
pub mod label;
pub mod presenter;
pub mod confirm;
pub mod capture;
pub mod render;
pub mod config;

#[cfg(test)]
mod test_support;

pub use error::CaptureError;
pub use label::{ControlLabel, PredictionStatus};
pub use presenter::{Presenter, TickSource, TriggerState};
pub use confirm::{advance, GestureConfirmer};
pub use capture::{
    CaptureSession, CaptureTotals, ExampleSink, HoldFlag, SignOutcome, SignSequence, TARGET_COUNT,
};
pub use render::{
    decode_rgba, render_image, Canvas, NormalizedImage, ThumbnailBoard, ThumbnailCache,
    IMAGE_HEIGHT, IMAGE_WIDTH,
};
pub use config::{ConfigError, TrainingParams};
