//! Display state behind the controller window.
//!
//! `ControllerView` is what the [`Presenter`] calls write into; the
//! visualizer only reads it when drawing a frame.  Keeping it free of any
//! window handle lets the app logic be tested headless.

use image::imageops::{self, FilterType};
use image::RgbaImage;

use sign_capture::{
    Canvas, ControlLabel, PredictionStatus, Presenter, ThumbnailBoard, TriggerState,
};

/// Edge length of a thumbnail on screen (frames are scaled down to this).
pub const THUMB: usize = 112;

// ════════════════════════════════════════════════════════════════════════════
// ThumbSlot: one per-label canvas
// ════════════════════════════════════════════════════════════════════════════

/// Packed ARGB pixels of a scaled thumbnail, `THUMB × THUMB`.
#[derive(Clone, Debug, Default)]
pub struct ThumbSlot {
    pub pixels: Option<Vec<u32>>,
}

impl Canvas for ThumbSlot {
    fn put_image_data(&mut self, frame: &RgbaImage) {
        let scaled = imageops::resize(frame, THUMB as u32, THUMB as u32, FilterType::Nearest);
        let argb = scaled
            .pixels()
            .map(|p| {
                let [r, g, b, a] = p.0;
                (a as u32) << 24 | (r as u32) << 16 | (g as u32) << 8 | b as u32
            })
            .collect();
        self.pixels = Some(argb);
    }
}

// ════════════════════════════════════════════════════════════════════════════
// ControllerView
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Debug)]
pub struct ControllerView {
    pub controller_visible: bool,
    pub active:             Option<ControlLabel>,
    pub status:             PredictionStatus,
    pub totals:             [usize; ControlLabel::COUNT],
    pub trigger:            TriggerState,
    pub training_status:    String,
    pub predicting:         bool,
    pub thumbs:             [ThumbSlot; ControlLabel::COUNT],
}

impl Default for ControllerView {
    fn default() -> Self {
        ControllerView {
            controller_visible: false,
            active:             None,
            status:             PredictionStatus::Initial,
            totals:             [0; ControlLabel::COUNT],
            trigger:            TriggerState::Ready { prompt: String::new() },
            training_status:    String::new(),
            predicting:         true,
            thumbs:             Default::default(),
        }
    }
}

impl Presenter for ControllerView {
    fn set_active_control(&mut self, label: Option<ControlLabel>) {
        self.active = label;
    }

    fn set_status(&mut self, status: PredictionStatus) {
        self.status = status;
    }

    fn set_total(&mut self, label: ControlLabel, count: usize) {
        self.totals[label.index()] = count;
    }

    fn set_trigger(&mut self, trigger: &TriggerState) {
        self.trigger = trigger.clone();
    }

    fn set_training_status(&mut self, text: &str) {
        self.training_status = text.to_string();
    }

    fn set_predicting(&mut self, predicting: bool) {
        self.predicting = predicting;
    }

    fn show_controller(&mut self) {
        self.controller_visible = true;
        self.predicting = false;
    }
}

impl ThumbnailBoard for ControllerView {
    fn thumbnail_canvas(&mut self, label: ControlLabel) -> &mut dyn Canvas {
        &mut self.thumbs[label.index()]
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
