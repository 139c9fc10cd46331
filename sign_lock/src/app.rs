//! Top-level application state machine.
//!
//! `AppState` owns the capture session (and through it the Learner), the
//! gesture confirmer and the thumbnail cache.  It turns keyboard
//! [`Command`]s into core calls and routes all display through a
//! [`Frontend`].

use tracing::{error, info, warn};

use sign_capture::{
    CaptureError, CaptureSession, ConfigError, ControlLabel, GestureConfirmer, HoldFlag,
    PredictionStatus, Presenter, SignOutcome, ThumbnailBoard, ThumbnailCache, TickSource,
    TrainingParams,
};

use crate::learner::{Learner, SimLearner};
use crate::visualizer::Visualizer;

// ════════════════════════════════════════════════════════════════════════════
// AppConfig
// ════════════════════════════════════════════════════════════════════════════

/// Configuration for the full application.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub params: TrainingParams,
    /// Seed for the simulated camera noise.
    pub seed:   u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            params: TrainingParams::default(),
            seed:   0x5167_4C4F,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("failed to open window: {0}")]
    Window(String),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

// ════════════════════════════════════════════════════════════════════════════
// Commands and the frontend seam
// ════════════════════════════════════════════════════════════════════════════

/// A user action, as decoded from the keyboard.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Arrow key went down: capture that label until it is released.
    Hold(ControlLabel),
    /// Record the next sign of the guided sequence.
    CaptureNextSign,
    /// Feed a class index as if the Learner had predicted it.
    Predict(usize),
    TogglePredicting,
    /// Show what a training run would be given.
    Train,
    /// Reset the confirmation status.
    Logout,
    Quit,
}

/// Everything the app needs from a display: presenter, frame clock,
/// thumbnail canvases, and a way to end a hold when its key comes up.
pub trait Frontend: Presenter + TickSource + ThumbnailBoard {
    /// Release `hold` once the control for `label` is no longer pressed.
    fn watch_hold(&mut self, label: ControlLabel, hold: HoldFlag);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow { Continue, Quit }

// ════════════════════════════════════════════════════════════════════════════
// AppState
// ════════════════════════════════════════════════════════════════════════════

pub struct AppState<L: Learner> {
    session:    CaptureSession<L>,
    confirmer:  GestureConfirmer,
    thumbs:     ThumbnailCache,
    params:     TrainingParams,
    predicting: bool,
}

impl<L: Learner> AppState<L> {
    pub fn new(learner: L, params: TrainingParams) -> Self {
        AppState {
            session:    CaptureSession::new(learner),
            confirmer:  GestureConfirmer::new(),
            thumbs:     ThumbnailCache::new(),
            params,
            predicting: false,
        }
    }

    pub fn status(&self) -> PredictionStatus { self.confirmer.status() }
    pub fn session(&self) -> &CaptureSession<L> { &self.session }
    pub fn is_predicting(&self) -> bool { self.predicting }

    /// Reveal the controls and show the first prompt.
    pub fn start<F: Frontend + ?Sized>(&mut self, ui: &mut F) {
        ui.show_controller();
        ui.set_status(self.confirmer.status());
        ui.set_trigger(&self.session.sequence().trigger());
        for label in ControlLabel::ALL {
            ui.set_total(label, self.session.totals().get(label));
        }
    }

    // ── process one Command ───────────────────────────────────────────────

    pub fn handle<F: Frontend + ?Sized>(&mut self, cmd: Command, ui: &mut F) -> Flow {
        match cmd {
            Command::Hold(label) => {
                let hold = HoldFlag::new();
                hold.press();
                ui.watch_hold(label, hold.clone());
                let result = self.session.hold_capture(label, &hold, ui);
                self.report(result, ui);
                self.refresh_thumbnail(label, ui);
            }

            Command::CaptureNextSign => {
                let label = self.session.sequence().next_label();
                let result = self.session.start_next_sign(ui);
                match result {
                    Ok(SignOutcome::Completed { .. }) => info!("sign capture finished"),
                    Ok(SignOutcome::Halted) => warn!("capture trigger pressed after a failed run"),
                    _ => {}
                }
                self.report(result, ui);
                if let Some(label) = label {
                    self.refresh_thumbnail(label, ui);
                }
            }

            Command::Predict(class_id) => {
                let result = self.confirmer.submit_class(class_id, ui);
                if let Ok(Some(PredictionStatus::Confirmed)) = result {
                    info!("gesture sequence confirmed");
                }
                self.report(result, ui);
            }

            Command::TogglePredicting => {
                self.predicting = !self.predicting;
                info!(predicting = self.predicting, "predicting toggled");
                ui.set_predicting(self.predicting);
            }

            Command::Train => {
                let summary = self.session.sink().training_summary(&self.params);
                ui.set_training_status(&summary);
            }

            Command::Logout => {
                self.confirmer.reset_status();
                ui.set_status(self.confirmer.status());
            }

            Command::Quit => return Flow::Quit,
        }
        Flow::Continue
    }

    /// Draw the label's most recent frame, the first time it has one.
    fn refresh_thumbnail<F: Frontend + ?Sized>(&mut self, label: ControlLabel, ui: &mut F) {
        if let Some(frame) = self.session.sink().last_frame(label) {
            self.thumbs.render_thumbnail(frame, label, ui);
        }
    }

    /// Capture errors abort the running sequence and are shown to the user.
    fn report<T, F: Frontend + ?Sized>(&self, result: Result<T, CaptureError>, ui: &mut F) {
        if let Err(e) = result {
            error!(error = %e, "capture step failed");
            ui.set_training_status(&format!("Error: {}", e));
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// run(): the main application loop
// ════════════════════════════════════════════════════════════════════════════

/// Run the full application.
///
/// Creates the window and the simulated Learner, then drives the
/// input/render loop at ~60 fps until the window closes or `Q` is pressed.
pub fn run(cfg: AppConfig) -> Result<(), AppError> {
    cfg.params.validate()?;

    let mut vis = Visualizer::new().map_err(AppError::Window)?;
    let mut app = AppState::new(SimLearner::new(cfg.seed), cfg.params);
    app.start(&mut vis);
    info!("controller ready");

    while vis.is_open() {
        for cmd in vis.poll_commands() {
            if app.handle(cmd, &mut vis) == Flow::Quit {
                return Ok(());
            }
        }
        vis.wait_for_next_tick();
    }

    Ok(())
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use sign_capture::{Canvas, ExampleSink, NormalizedImage, TriggerState, TARGET_COUNT};

    use crate::view::ControllerView;

    /// Window-less frontend: releases a watched hold after `hold_ticks`.
    #[derive(Default)]
    struct Headless {
        view:       ControllerView,
        ticks:      usize,
        hold_ticks: usize,
        watch:      Option<HoldFlag>,
    }

    impl Presenter for Headless {
        fn set_active_control(&mut self, label: Option<ControlLabel>) { self.view.set_active_control(label); }
        fn set_status(&mut self, status: PredictionStatus)           { self.view.set_status(status); }
        fn set_total(&mut self, label: ControlLabel, count: usize)   { self.view.set_total(label, count); }
        fn set_trigger(&mut self, trigger: &TriggerState)            { self.view.set_trigger(trigger); }
        fn set_training_status(&mut self, text: &str)                { self.view.set_training_status(text); }
        fn set_predicting(&mut self, predicting: bool)               { self.view.set_predicting(predicting); }
        fn show_controller(&mut self)                                { self.view.show_controller(); }
    }

    impl ThumbnailBoard for Headless {
        fn thumbnail_canvas(&mut self, label: ControlLabel) -> &mut dyn Canvas {
            self.view.thumbnail_canvas(label)
        }
    }

    impl TickSource for Headless {
        fn wait_for_next_tick(&mut self) {
            self.ticks += 1;
            if self.ticks >= self.hold_ticks {
                if let Some(hold) = self.watch.take() {
                    hold.release();
                }
            }
        }
    }

    impl Frontend for Headless {
        fn watch_hold(&mut self, _label: ControlLabel, hold: HoldFlag) {
            self.ticks = 0;
            self.watch = Some(hold);
        }
    }

    /// Learner whose camera never delivers a frame.
    struct BrokenCamera;

    impl ExampleSink for BrokenCamera {
        fn add_example(&mut self, label: ControlLabel) -> Result<(), CaptureError> {
            Err(CaptureError::learner(label, "camera not ready"))
        }
    }

    impl Learner for BrokenCamera {
        fn last_frame(&self, _label: ControlLabel) -> Option<&NormalizedImage> { None }
        fn example_count(&self, _label: ControlLabel) -> usize { 0 }
    }

    /// Simulated Learner that drops a single frame at call `fail_at`.
    struct DroppedFrame {
        inner:   SimLearner,
        calls:   usize,
        fail_at: usize,
    }

    impl ExampleSink for DroppedFrame {
        fn add_example(&mut self, label: ControlLabel) -> Result<(), CaptureError> {
            let call = self.calls;
            self.calls += 1;
            if call == self.fail_at {
                return Err(CaptureError::learner(label, "frame dropped"));
            }
            self.inner.add_example(label)
        }
    }

    impl Learner for DroppedFrame {
        fn last_frame(&self, label: ControlLabel) -> Option<&NormalizedImage> {
            self.inner.last_frame(label)
        }
        fn example_count(&self, label: ControlLabel) -> usize {
            self.inner.example_count(label)
        }
    }

    fn make_app() -> (AppState<SimLearner>, Headless) {
        let mut app = AppState::new(SimLearner::new(3), TrainingParams::default());
        let mut ui = Headless { hold_ticks: 4, ..Headless::default() };
        app.start(&mut ui);
        (app, ui)
    }

    #[test]
    fn start_shows_first_prompt() {
        let (_, ui) = make_app();
        assert!(ui.view.controller_visible);
        assert!(!ui.view.predicting);
        assert_eq!(ui.view.trigger, TriggerState::Ready { prompt: "Capture first sign".into() });
    }

    #[test]
    fn hold_captures_until_release_and_draws_thumb() {
        let (mut app, mut ui) = make_app();
        app.handle(Command::Hold(ControlLabel::Left), &mut ui);
        assert_eq!(app.session().sink().example_count(ControlLabel::Left), 4);
        assert_eq!(app.session().totals().get(ControlLabel::Left), 4);
        assert_eq!(ui.view.totals[ControlLabel::Left.index()], 3);
        assert_eq!(ui.view.active, None);
        assert!(ui.view.thumbs[ControlLabel::Left.index()].pixels.is_some());
        assert!(ui.view.thumbs[ControlLabel::Up.index()].pixels.is_none());
    }

    #[test]
    fn capture_next_sign_walks_sequence() {
        let (mut app, mut ui) = make_app();
        for _ in 0..4 {
            app.handle(Command::CaptureNextSign, &mut ui);
        }
        for label in ControlLabel::ALL {
            assert_eq!(app.session().sink().example_count(label), TARGET_COUNT + 1);
            assert!(ui.view.thumbs[label.index()].pixels.is_some());
        }
        assert!(matches!(ui.view.trigger, TriggerState::Done { .. }));

        let grabbed = app.session().sink().frames_grabbed();
        app.handle(Command::CaptureNextSign, &mut ui);
        assert_eq!(app.session().sink().frames_grabbed(), grabbed);
    }

    #[test]
    fn predictions_unlock_and_logout_resets() {
        let (mut app, mut ui) = make_app();
        for c in [0, 3, 1] {
            app.handle(Command::Predict(c), &mut ui);
        }
        assert_eq!(app.status(), PredictionStatus::Confirmed);
        assert_eq!(ui.view.status, PredictionStatus::Confirmed);
        assert_eq!(ui.view.active, Some(ControlLabel::Down));

        app.handle(Command::Logout, &mut ui);
        assert_eq!(app.status(), PredictionStatus::Initial);
        assert_eq!(ui.view.status, PredictionStatus::Initial);
    }

    #[test]
    fn bad_prediction_index_is_reported() {
        let (mut app, mut ui) = make_app();
        assert_eq!(app.handle(Command::Predict(8), &mut ui), Flow::Continue);
        assert!(ui.view.training_status.contains("out of range"), "{}", ui.view.training_status);
        assert_eq!(app.status(), PredictionStatus::Initial);
    }

    #[test]
    fn toggle_predicting_and_train() {
        let (mut app, mut ui) = make_app();
        app.handle(Command::TogglePredicting, &mut ui);
        assert!(app.is_predicting());
        assert!(ui.view.predicting);

        app.handle(Command::Train, &mut ui);
        assert_eq!(ui.view.training_status, "Add some examples before training!");
        app.handle(Command::CaptureNextSign, &mut ui);
        app.handle(Command::Train, &mut ui);
        assert!(ui.view.training_status.starts_with("Ready to train on 11 examples"));
    }

    #[test]
    fn learner_failure_surfaces_and_halts() {
        let mut app = AppState::new(BrokenCamera, TrainingParams::default());
        let mut ui = Headless::default();
        app.start(&mut ui);
        assert_eq!(app.handle(Command::CaptureNextSign, &mut ui), Flow::Continue);
        assert!(ui.view.training_status.contains("camera not ready"));
        assert_eq!(app.session().sequence().current_sign(), 0);
        assert!(!ui.view.trigger.is_enabled());
    }

    #[test]
    fn capture_key_ignored_after_failed_run() {
        let learner = DroppedFrame { inner: SimLearner::new(5), calls: 0, fail_at: 3 };
        let mut app = AppState::new(learner, TrainingParams::default());
        let mut ui = Headless::default();
        app.start(&mut ui);

        app.handle(Command::CaptureNextSign, &mut ui);
        assert!(!ui.view.trigger.is_enabled());
        let trigger = ui.view.trigger.clone();
        let calls = app.session().sink().calls;

        assert_eq!(app.handle(Command::CaptureNextSign, &mut ui), Flow::Continue);
        assert_eq!(app.session().sink().calls, calls);
        assert_eq!(app.session().sink().example_count(ControlLabel::Up), 3);
        assert_eq!(app.session().sequence().current_sign(), 0);
        assert_eq!(ui.view.trigger, trigger);
    }

    #[test]
    fn hold_then_next_sign_keeps_count_rising() {
        let (mut app, mut ui) = make_app();
        app.handle(Command::Hold(ControlLabel::Up), &mut ui);
        assert_eq!(ui.view.totals[ControlLabel::Up.index()], 3);
        app.handle(Command::CaptureNextSign, &mut ui);
        assert_eq!(ui.view.totals[ControlLabel::Up.index()], 4 + TARGET_COUNT);
        assert_eq!(app.session().totals().get(ControlLabel::Up), 4 + TARGET_COUNT + 1);
    }

    #[test]
    fn quit_stops_loop() {
        let (mut app, mut ui) = make_app();
        assert_eq!(app.handle(Command::Quit, &mut ui), Flow::Quit);
    }
}
