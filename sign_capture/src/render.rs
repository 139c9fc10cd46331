//! Thumbnail rendering.
//!
//! The Learner hands frames around as 224×224 RGB samples normalised to
//! [-1, 1].  This module turns them into 8-bit RGBA and paints them onto
//! whatever surface the front end provides.

use std::collections::HashSet;

use image::{Rgba, RgbaImage};
use tracing::debug;

use crate::error::CaptureError;
use crate::label::ControlLabel;

pub const IMAGE_WIDTH:  u32   = 224;
pub const IMAGE_HEIGHT: u32   = 224;
const CHANNELS:         usize = 3;

// ════════════════════════════════════════════════════════════════════════════
// NormalizedImage
// ════════════════════════════════════════════════════════════════════════════

/// Row-major RGB samples, three per pixel, nominally in [-1, 1].
#[derive(Clone, Debug, PartialEq)]
pub struct NormalizedImage {
    data: Vec<f32>,
}

impl NormalizedImage {
    /// Number of samples in a frame.
    pub const LEN: usize = IMAGE_WIDTH as usize * IMAGE_HEIGHT as usize * CHANNELS;

    pub fn from_vec(data: Vec<f32>) -> Result<Self, CaptureError> {
        if data.len() != Self::LEN {
            return Err(CaptureError::ImageSize { expected: Self::LEN, actual: data.len() });
        }
        Ok(NormalizedImage { data })
    }

    /// Build a frame pixel by pixel.
    pub fn from_fn<F>(mut f: F) -> Self
    where
        F: FnMut(u32, u32) -> [f32; 3],
    {
        let mut data = Vec::with_capacity(Self::LEN);
        for y in 0..IMAGE_HEIGHT {
            for x in 0..IMAGE_WIDTH {
                data.extend_from_slice(&f(x, y));
            }
        }
        NormalizedImage { data }
    }

    pub fn samples(&self) -> &[f32] {
        &self.data
    }

    fn rgb(&self, x: u32, y: u32) -> [f32; 3] {
        let i = (y as usize * IMAGE_WIDTH as usize + x as usize) * CHANNELS;
        [self.data[i], self.data[i + 1], self.data[i + 2]]
    }
}

/// Map one normalised sample to a byte: `(v + 1) * 127`, clamped.
fn to_byte(v: f32) -> u8 {
    ((v + 1.0) * 127.0).round().clamp(0.0, 255.0) as u8
}

/// Decode to opaque RGBA.
pub fn decode_rgba(image: &NormalizedImage) -> RgbaImage {
    RgbaImage::from_fn(IMAGE_WIDTH, IMAGE_HEIGHT, |x, y| {
        let [r, g, b] = image.rgb(x, y);
        Rgba([to_byte(r), to_byte(g), to_byte(b), 255])
    })
}

// ════════════════════════════════════════════════════════════════════════════
// Surfaces
// ════════════════════════════════════════════════════════════════════════════

/// A 2-D surface that accepts whole RGBA frames at its origin.
pub trait Canvas {
    fn put_image_data(&mut self, frame: &RgbaImage);
}

/// Looks up the per-label thumbnail canvas.
pub trait ThumbnailBoard {
    fn thumbnail_canvas(&mut self, label: ControlLabel) -> &mut dyn Canvas;
}

/// Decode `image` and paint it onto `canvas`.
pub fn render_image<C: Canvas + ?Sized>(image: &NormalizedImage, canvas: &mut C) {
    canvas.put_image_data(&decode_rgba(image));
}

// ════════════════════════════════════════════════════════════════════════════
// ThumbnailCache
// ════════════════════════════════════════════════════════════════════════════

/// Draws one example per label and never refreshes it.
#[derive(Debug, Default)]
pub struct ThumbnailCache {
    displayed: HashSet<ControlLabel>,
}

impl ThumbnailCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Paint `image` as `label`'s thumbnail unless one is already shown.
    /// Returns true if it drew.
    pub fn render_thumbnail<B: ThumbnailBoard + ?Sized>(
        &mut self,
        image: &NormalizedImage,
        label: ControlLabel,
        board: &mut B,
    ) -> bool {
        if !self.displayed.insert(label) {
            return false;
        }
        debug!(control = %label, "thumbnail drawn");
        render_image(image, board.thumbnail_canvas(label));
        true
    }

    pub fn is_displayed(&self, label: ControlLabel) -> bool {
        self.displayed.contains(&label)
    }

    /// Forget every drawn thumbnail.
    pub fn clear(&mut self) {
        self.displayed.clear();
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
