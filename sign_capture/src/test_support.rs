//! Recording fakes shared by the unit tests.

use std::collections::HashMap;

use image::RgbaImage;

use crate::capture::{ExampleSink, HoldFlag};
use crate::error::CaptureError;
use crate::label::{ControlLabel, PredictionStatus};
use crate::presenter::{Presenter, TickSource, TriggerState};
use crate::render::{Canvas, ThumbnailBoard};

/// Presenter + tick source that records every call.
#[derive(Debug, Default)]
pub struct Recorder {
    pub active:     Vec<Option<ControlLabel>>,
    pub statuses:   Vec<PredictionStatus>,
    pub totals:     Vec<(ControlLabel, usize)>,
    pub triggers:   Vec<TriggerState>,
    pub training:   Vec<String>,
    pub predicting: Vec<bool>,
    pub ticks:      usize,
    release:        Option<(usize, HoldFlag)>,
}

impl Recorder {
    /// Release `hold` on the `n`th tick.
    pub fn release_after(mut self, n: usize, hold: HoldFlag) -> Self {
        self.release = Some((n, hold));
        self
    }
}

impl Presenter for Recorder {
    fn set_active_control(&mut self, label: Option<ControlLabel>) { self.active.push(label); }
    fn set_status(&mut self, status: PredictionStatus)           { self.statuses.push(status); }
    fn set_total(&mut self, label: ControlLabel, count: usize)   { self.totals.push((label, count)); }
    fn set_trigger(&mut self, trigger: &TriggerState)            { self.triggers.push(trigger.clone()); }
    fn set_training_status(&mut self, text: &str)                { self.training.push(text.to_string()); }
    fn set_predicting(&mut self, predicting: bool)               { self.predicting.push(predicting); }
}

impl TickSource for Recorder {
    fn wait_for_next_tick(&mut self) {
        self.ticks += 1;
        if let Some((n, hold)) = &self.release {
            if self.ticks >= *n {
                hold.release();
            }
        }
    }
}

/// Sink that accepts everything and remembers the order.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub calls: Vec<ControlLabel>,
}

impl ExampleSink for RecordingSink {
    fn add_example(&mut self, label: ControlLabel) -> Result<(), CaptureError> {
        self.calls.push(label);
        Ok(())
    }
}

/// Sink that accepts `limit` examples and then fails.
#[derive(Debug)]
pub struct FailingSink {
    pub accepted: usize,
    limit:        usize,
}

impl FailingSink {
    pub fn after(limit: usize) -> Self {
        FailingSink { accepted: 0, limit }
    }
}

impl ExampleSink for FailingSink {
    fn add_example(&mut self, label: ControlLabel) -> Result<(), CaptureError> {
        if self.accepted >= self.limit {
            return Err(CaptureError::learner(label, "no frame buffered"));
        }
        self.accepted += 1;
        Ok(())
    }
}

/// Sink whose call number `fail_at` fails once; every other call succeeds.
#[derive(Debug)]
pub struct FlakySink {
    pub accepted: usize,
    calls:        usize,
    fail_at:      usize,
}

impl FlakySink {
    pub fn failing_at(fail_at: usize) -> Self {
        FlakySink { accepted: 0, calls: 0, fail_at }
    }
}

impl ExampleSink for FlakySink {
    fn add_example(&mut self, label: ControlLabel) -> Result<(), CaptureError> {
        let call = self.calls;
        self.calls += 1;
        if call == self.fail_at {
            return Err(CaptureError::learner(label, "frame dropped"));
        }
        self.accepted += 1;
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct FrameCanvas {
    pub frames: Vec<RgbaImage>,
}

impl Canvas for FrameCanvas {
    fn put_image_data(&mut self, frame: &RgbaImage) {
        self.frames.push(frame.clone());
    }
}

#[derive(Debug, Default)]
pub struct Board {
    canvases: HashMap<ControlLabel, FrameCanvas>,
}

impl Board {
    pub fn canvas(&self, label: ControlLabel) -> &FrameCanvas {
        &self.canvases[&label]
    }

    pub fn draws(&self) -> usize {
        self.canvases.values().map(|c| c.frames.len()).sum()
    }
}

impl ThumbnailBoard for Board {
    fn thumbnail_canvas(&mut self, label: ControlLabel) -> &mut dyn Canvas {
        self.canvases.entry(label).or_default()
    }
}
