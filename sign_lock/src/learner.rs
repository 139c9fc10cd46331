//! Simulated Learner.
//!
//! Stands in for the camera + classifier: every requested example "grabs"
//! a synthetic frame (a per-label colour gradient with a little sensor
//! noise) and counts it.  It never trains; [`Learner::training_summary`]
//! only reports what a real training run would be given.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::trace;

use sign_capture::{CaptureError, ControlLabel, ExampleSink, NormalizedImage, TrainingParams};

const NOISE: f32 = 0.08;

/// What the front end needs from a Learner beyond ingesting examples.
pub trait Learner: ExampleSink {
    /// Frame most recently stored for `label`, if any.
    fn last_frame(&self, label: ControlLabel) -> Option<&NormalizedImage>;

    /// Number of examples stored for `label`.
    fn example_count(&self, label: ControlLabel) -> usize;

    /// One-line description of the training run `params` would start.
    fn training_summary(&self, params: &TrainingParams) -> String {
        let total: usize = ControlLabel::ALL.iter().map(|&l| self.example_count(l)).sum();
        if total == 0 {
            return "Add some examples before training!".to_string();
        }
        format!(
            "Ready to train on {} examples: batch {}, {} epochs, lr {}, {} units",
            total,
            params.batch_size(total),
            params.epochs,
            params.learning_rate,
            params.dense_units,
        )
    }
}

// ════════════════════════════════════════════════════════════════════════════
// SimLearner
// ════════════════════════════════════════════════════════════════════════════

pub struct SimLearner {
    rng:         StdRng,
    frame_no:    u64,
    counts:      [usize; ControlLabel::COUNT],
    last_frames: [Option<NormalizedImage>; ControlLabel::COUNT],
}

impl SimLearner {
    pub fn new(seed: u64) -> Self {
        SimLearner {
            rng:         StdRng::seed_from_u64(seed),
            frame_no:    0,
            counts:      [0; ControlLabel::COUNT],
            last_frames: Default::default(),
        }
    }

    /// Frames grabbed so far, across all labels.
    pub fn frames_grabbed(&self) -> u64 {
        self.frame_no
    }

    /// Synthesise the current camera frame for `label`.
    ///
    /// Each label gets its own hue and gradient direction; the gradient
    /// drifts slowly with the frame counter so consecutive examples differ.
    fn grab_frame(&mut self, label: ControlLabel) -> NormalizedImage {
        let base = match label {
            ControlLabel::Up    => [0.6, -0.2, -0.6],
            ControlLabel::Down  => [-0.6, 0.5, -0.2],
            ControlLabel::Left  => [-0.4, -0.3, 0.7],
            ControlLabel::Right => [0.5, 0.5, -0.5],
        };
        let drift = (self.frame_no % 64) as f32 / 64.0;
        let rng = &mut self.rng;
        NormalizedImage::from_fn(|x, y| {
            let (u, v) = (x as f32 / 224.0, y as f32 / 224.0);
            let t = match label {
                ControlLabel::Up    => 1.0 - v,
                ControlLabel::Down  => v,
                ControlLabel::Left  => 1.0 - u,
                ControlLabel::Right => u,
            };
            let shade = 0.6 * (t + drift).fract() - 0.3;
            base.map(|c| (c + shade + rng.random_range(-NOISE..NOISE)).clamp(-1.0, 1.0))
        })
    }
}

impl ExampleSink for SimLearner {
    fn add_example(&mut self, label: ControlLabel) -> Result<(), CaptureError> {
        self.frame_no += 1;
        let frame = self.grab_frame(label);
        self.last_frames[label.index()] = Some(frame);
        self.counts[label.index()] += 1;
        trace!(control = %label, frame = self.frame_no, "example stored");
        Ok(())
    }
}

impl Learner for SimLearner {
    fn last_frame(&self, label: ControlLabel) -> Option<&NormalizedImage> {
        self.last_frames[label.index()].as_ref()
    }

    fn example_count(&self, label: ControlLabel) -> usize {
        self.counts[label.index()]
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
