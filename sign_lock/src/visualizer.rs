//! Software-rendered controller window using `minifb`.
//!
//! Layout:
//!
//! ```text
//! ┌──────────────┬──────────────┬──────────────┬──────────────┐
//! │  UP          │  DOWN        │  LEFT        │  RIGHT       │
//! │  [thumb]     │  [thumb]     │  [thumb]     │  [thumb]     │
//! │  n examples  │  n examples  │  n examples  │  n examples  │
//! ├──────────────┴──────────────┴──────────────┴──────────────┤
//! │  status badge                       predicting indicator  │
//! │  [ capture trigger / progress bar ──────────────────────] │
//! │  training status                                          │
//! │  key legend                                               │
//! └───────────────────────────────────────────────────────────┘
//! ```

use std::time::Duration;

use minifb::{Key, KeyRepeat, Window, WindowOptions};

use sign_capture::{
    Canvas, ControlLabel, HoldFlag, PredictionStatus, Presenter, ThumbnailBoard, TickSource,
    TriggerState,
};

use crate::app::{Command, Frontend};
use crate::view::{ControllerView, THUMB};

// ════════════════════════════════════════════════════════════════════════════
// Layout constants
// ════════════════════════════════════════════════════════════════════════════

pub const WIN_W:        usize = 800;
pub const WIN_H:        usize = 440;
const MARGIN:           usize = 20;
const PANEL_W:          usize = 180;
const PANEL_GAP:        usize = 10;
const PANEL_Y:          usize = 30;
const PANEL_H:          usize = 190;
const THUMB_Y:          usize = PANEL_Y + 34;
const STATUS_Y:         usize = PANEL_Y + PANEL_H + 20;
const TRIGGER_Y:        usize = STATUS_Y + 36;
const TRIGGER_H:        usize = 40;
const TRAINING_Y:       usize = TRIGGER_Y + TRIGGER_H + 20;
const FONT_SCALE:       usize = 2;
const BG_COLOR:         u32   = 0xFF1A1A2E;
const PANEL_BG:         u32   = 0xFF16213E;
const ACTIVE_COLOR:     u32   = 0xFFFFD700;
const BUTTON_BG:        u32   = 0xFF0F3460;
const PROGRESS_COLOR:   u32   = 0xFF3FA7D6;
const DONE_COLOR:       u32   = 0xFF2E8B57;
const TEXT_COLOR:       u32   = 0xFFEEEEEE;
const DIM_TEXT:         u32   = 0xFF888888;

// ════════════════════════════════════════════════════════════════════════════
// Visualizer
// ════════════════════════════════════════════════════════════════════════════

pub struct Visualizer {
    window: Window,
    buf:    Vec<u32>,
    view:   ControllerView,
    /// Label whose arrow key releases the running hold capture.
    watch:  Option<(ControlLabel, HoldFlag)>,
}

impl Visualizer {
    pub fn new() -> Result<Self, String> {
        let mut window = Window::new(
            "Sign Lock - gesture capture",
            WIN_W, WIN_H,
            WindowOptions {
                resize: false,
                ..WindowOptions::default()
            },
        ).map_err(|e| e.to_string())?;

        window.limit_update_rate(Some(Duration::from_millis(16))); // ~60fps

        Ok(Visualizer {
            window,
            buf: vec![BG_COLOR; WIN_W * WIN_H],
            view: ControllerView::default(),
            watch: None,
        })
    }

    pub fn is_open(&self) -> bool { self.window.is_open() }

    pub fn view(&self) -> &ControllerView { &self.view }

    /// Poll the keyboard and translate presses into commands.
    pub fn poll_commands(&mut self) -> Vec<Command> {
        let mut out = Vec::new();
        if !self.window.is_open() {
            out.push(Command::Quit);
            return out;
        }

        let pressed = |k: Key| self.window.is_key_pressed(k, KeyRepeat::No);

        if pressed(Key::Q) || pressed(Key::Escape) {
            out.push(Command::Quit);
            return out;
        }
        for label in ControlLabel::ALL {
            if pressed(arrow_key(label)) {
                out.push(Command::Hold(label));
            }
        }
        for (i, key) in [Key::Key1, Key::Key2, Key::Key3, Key::Key4].into_iter().enumerate() {
            if pressed(key) {
                out.push(Command::Predict(i));
            }
        }
        if pressed(Key::C) { out.push(Command::CaptureNextSign); }
        if pressed(Key::P) { out.push(Command::TogglePredicting); }
        if pressed(Key::T) { out.push(Command::Train); }
        if pressed(Key::L) { out.push(Command::Logout); }
        out
    }

    /// Draw the current view and push it to the window.
    fn render(&mut self) {
        self.buf.fill(BG_COLOR);

        if self.view.controller_visible {
            for label in ControlLabel::ALL {
                self.draw_panel(label);
            }
            self.draw_status();
            self.draw_trigger();
        } else {
            self.draw_label("Loading...", MARGIN, PANEL_Y, TEXT_COLOR);
        }

        let training = self.view.training_status.clone();
        self.draw_label(&training, MARGIN, TRAINING_Y, TEXT_COLOR);

        self.draw_label(
            "arrows=hold capture  c=next sign  1-4=predict  p=predicting  t=train  l=logout  q=quit",
            MARGIN / 2, WIN_H - 14, DIM_TEXT,
        );

        self.window.update_with_buffer(&self.buf, WIN_W, WIN_H).ok();
    }

    // ── Control panels ────────────────────────────────────────────────────

    fn draw_panel(&mut self, label: ControlLabel) {
        let x = MARGIN + label.index() * (PANEL_W + PANEL_GAP);
        self.fill_rect(x, PANEL_Y, PANEL_W, PANEL_H, PANEL_BG);
        if self.view.active == Some(label) {
            self.draw_border(x, PANEL_Y, PANEL_W, PANEL_H, ACTIVE_COLOR);
            self.draw_border(x + 1, PANEL_Y + 1, PANEL_W - 2, PANEL_H - 2, ACTIVE_COLOR);
        }

        self.draw_label(label.name(), x + 8, PANEL_Y + 8, TEXT_COLOR);

        let tx = x + (PANEL_W - THUMB) / 2;
        match self.view.thumbs[label.index()].pixels.take() {
            Some(px) => {
                self.blit(&px, tx, THUMB_Y, THUMB, THUMB);
                self.view.thumbs[label.index()].pixels = Some(px);
            }
            None => self.draw_border(tx, THUMB_Y, THUMB, THUMB, DIM_TEXT),
        }

        let total = format!("{} examples", self.view.totals[label.index()]);
        self.draw_label(&total, x + 8, THUMB_Y + THUMB + 10, TEXT_COLOR);
    }

    // ── Status badge + predicting indicator ───────────────────────────────

    fn draw_status(&mut self) {
        let status = self.view.status;
        let color = status_color(status);
        self.fill_rect(MARGIN, STATUS_Y, 160, 24, color);
        let text = format!("status {}", status);
        self.draw_label(&text, MARGIN + 8, STATUS_Y + 6, 0xFF000000);

        if self.view.predicting {
            self.draw_label("predicting...", WIN_W - MARGIN - 13 * 4 * FONT_SCALE, STATUS_Y + 6, ACTIVE_COLOR);
        }
    }

    // ── Capture trigger ───────────────────────────────────────────────────

    fn draw_trigger(&mut self) {
        let w = WIN_W - 2 * MARGIN;
        match self.view.trigger.clone() {
            TriggerState::Ready { prompt } => {
                self.fill_rect(MARGIN, TRIGGER_Y, w, TRIGGER_H, BUTTON_BG);
                self.draw_border(MARGIN, TRIGGER_Y, w, TRIGGER_H, TEXT_COLOR);
                self.draw_label(&prompt, MARGIN + 12, TRIGGER_Y + 14, TEXT_COLOR);
            }
            TriggerState::Capturing { progress } => {
                self.fill_rect(MARGIN, TRIGGER_Y, w, TRIGGER_H, BUTTON_BG);
                let filled = (w as f32 * progress.clamp(0.0, 1.0)) as usize;
                self.fill_rect(MARGIN, TRIGGER_Y, filled, TRIGGER_H, PROGRESS_COLOR);
                self.draw_border(MARGIN, TRIGGER_Y, w, TRIGGER_H, DIM_TEXT);
            }
            TriggerState::Done { message } => {
                self.fill_rect(MARGIN, TRIGGER_Y, w, TRIGGER_H, DONE_COLOR);
                self.draw_label(&message, MARGIN + 12, TRIGGER_Y + 14, TEXT_COLOR);
            }
        }
    }

    // ── Primitive drawing helpers ─────────────────────────────────────────

    /// Fill a rectangle, clipped to the window.
    fn fill_rect(&mut self, x: usize, y: usize, w: usize, h: usize, color: u32) {
        let x_end = (x + w).min(WIN_W);
        if x >= x_end { return; }
        for row in self.buf.chunks_exact_mut(WIN_W).skip(y).take(h) {
            row[x..x_end].fill(color);
        }
    }

    /// One-pixel outline drawn as four thin rectangles.
    fn draw_border(&mut self, x: usize, y: usize, w: usize, h: usize, color: u32) {
        if w == 0 || h == 0 { return; }
        self.fill_rect(x, y, w, 1, color);
        self.fill_rect(x, y + h - 1, w, 1, color);
        self.fill_rect(x, y, 1, h, color);
        self.fill_rect(x + w - 1, y, 1, h, color);
    }

    fn blit(&mut self, px: &[u32], x: usize, y: usize, w: usize, h: usize) {
        for row in 0..h {
            if y + row >= WIN_H { break; }
            for col in 0..w {
                if x + col >= WIN_W { break; }
                self.buf[(y + row) * WIN_W + x + col] = px[row * w + col];
            }
        }
    }

    /// 3×5 bitmap font, scaled by `FONT_SCALE`.
    fn draw_label(&mut self, text: &str, x: usize, y: usize, color: u32) {
        let advance = 4 * FONT_SCALE;
        let mut cx = x;
        for ch in text.chars() {
            let glyph = char_glyph(ch);
            for (row, &bits) in glyph.iter().enumerate() {
                for col in (0..3usize).filter(|&c| bits & (0b100 >> c) != 0) {
                    self.fill_rect(cx + col * FONT_SCALE, y + row * FONT_SCALE, FONT_SCALE, FONT_SCALE, color);
                }
            }
            cx += advance;
            if cx + advance > WIN_W { break; }
        }
    }
}

// ── Frontend plumbing ─────────────────────────────────────────────────────

impl Presenter for Visualizer {
    fn set_active_control(&mut self, label: Option<ControlLabel>) { self.view.set_active_control(label); }
    fn set_status(&mut self, status: PredictionStatus)           { self.view.set_status(status); }
    fn set_total(&mut self, label: ControlLabel, count: usize)   { self.view.set_total(label, count); }
    fn set_trigger(&mut self, trigger: &TriggerState)            { self.view.set_trigger(trigger); }
    fn set_training_status(&mut self, text: &str)                { self.view.set_training_status(text); }
    fn set_predicting(&mut self, predicting: bool)               { self.view.set_predicting(predicting); }
    fn show_controller(&mut self)                                { self.view.show_controller(); }
}

impl ThumbnailBoard for Visualizer {
    fn thumbnail_canvas(&mut self, label: ControlLabel) -> &mut dyn Canvas {
        self.view.thumbnail_canvas(label)
    }
}

impl TickSource for Visualizer {
    /// Render one frame (rate-limited to ~60fps by minifb), then release the
    /// watched hold if its arrow key is up or the window closed.
    fn wait_for_next_tick(&mut self) {
        self.render();
        let released = match &self.watch {
            Some((label, hold))
                if !self.window.is_open() || !self.window.is_key_down(arrow_key(*label)) =>
            {
                hold.release();
                true
            }
            _ => false,
        };
        if released {
            self.watch = None;
        }
    }
}

impl Frontend for Visualizer {
    fn watch_hold(&mut self, label: ControlLabel, hold: HoldFlag) {
        self.watch = Some((label, hold));
    }
}

fn arrow_key(label: ControlLabel) -> Key {
    match label {
        ControlLabel::Up    => Key::Up,
        ControlLabel::Down  => Key::Down,
        ControlLabel::Left  => Key::Left,
        ControlLabel::Right => Key::Right,
    }
}

fn status_color(status: PredictionStatus) -> u32 {
    match status {
        PredictionStatus::Initial   => 0xFF995555,
        PredictionStatus::Stage1    => 0xFFCC9900,
        PredictionStatus::Stage2    => 0xFFE0D040,
        PredictionStatus::Confirmed => 0xFF44CC77,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Minimal 3×5 bitmap font
//
// Training and error messages are free text, so the full lowercase alphabet
// is kept and lookups fold case.
// ────────────────────────────────────────────────────────────────────────────

fn char_glyph(c: char) -> [u8; 5] {
    match c.to_ascii_lowercase() {
        '0' => [0b111, 0b101, 0b101, 0b101, 0b111],
        '1' => [0b010, 0b110, 0b010, 0b010, 0b111],
        '2' => [0b111, 0b001, 0b111, 0b100, 0b111],
        '3' => [0b111, 0b001, 0b111, 0b001, 0b111],
        '4' => [0b101, 0b101, 0b111, 0b001, 0b001],
        '5' => [0b111, 0b100, 0b111, 0b001, 0b111],
        '6' => [0b111, 0b100, 0b111, 0b101, 0b111],
        '7' => [0b111, 0b001, 0b001, 0b001, 0b001],
        '8' => [0b111, 0b101, 0b111, 0b101, 0b111],
        '9' => [0b111, 0b101, 0b111, 0b001, 0b111],
        'a' => [0b111, 0b101, 0b111, 0b101, 0b101],
        'b' => [0b110, 0b101, 0b110, 0b101, 0b110],
        'c' => [0b111, 0b100, 0b100, 0b100, 0b111],
        'd' => [0b110, 0b101, 0b101, 0b101, 0b110],
        'e' => [0b111, 0b100, 0b111, 0b100, 0b111],
        'f' => [0b111, 0b100, 0b111, 0b100, 0b100],
        'g' => [0b111, 0b100, 0b101, 0b101, 0b111],
        'h' => [0b101, 0b101, 0b111, 0b101, 0b101],
        'i' => [0b111, 0b010, 0b010, 0b010, 0b111],
        'j' => [0b001, 0b001, 0b001, 0b101, 0b111],
        'k' => [0b101, 0b101, 0b110, 0b101, 0b101],
        'l' => [0b100, 0b100, 0b100, 0b100, 0b111],
        'm' => [0b101, 0b111, 0b101, 0b101, 0b101],
        'n' => [0b111, 0b101, 0b101, 0b101, 0b101],
        'o' => [0b111, 0b101, 0b101, 0b101, 0b111],
        'p' => [0b111, 0b101, 0b111, 0b100, 0b100],
        'q' => [0b111, 0b101, 0b101, 0b111, 0b001],
        'r' => [0b110, 0b101, 0b110, 0b101, 0b101],
        's' => [0b111, 0b100, 0b111, 0b001, 0b111],
        't' => [0b111, 0b010, 0b010, 0b010, 0b010],
        'u' => [0b101, 0b101, 0b101, 0b101, 0b111],
        'v' => [0b101, 0b101, 0b101, 0b010, 0b010],
        'w' => [0b101, 0b101, 0b101, 0b111, 0b101],
        'x' => [0b101, 0b101, 0b010, 0b101, 0b101],
        'y' => [0b101, 0b101, 0b111, 0b010, 0b010],
        'z' => [0b111, 0b001, 0b010, 0b100, 0b111],
        '/' => [0b001, 0b001, 0b010, 0b100, 0b100],
        '-' => [0b000, 0b000, 0b111, 0b000, 0b000],
        '.' => [0b000, 0b000, 0b000, 0b000, 0b010],
        ',' => [0b000, 0b000, 0b000, 0b010, 0b100],
        ':' => [0b000, 0b010, 0b000, 0b010, 0b000],
        '=' => [0b000, 0b111, 0b000, 0b111, 0b000],
        '!' => [0b010, 0b010, 0b010, 0b000, 0b010],
        ' ' => [0b000, 0b000, 0b000, 0b000, 0b000],
        _   => [0b000, 0b000, 0b010, 0b000, 0b000], // fallback dot
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn glyph_lookup_folds_case() {
        for (upper, lower) in ('A'..='Z').zip('a'..='z') {
            assert_eq!(char_glyph(upper), char_glyph(lower), "{}", upper);
        }
        assert_ne!(char_glyph('e'), char_glyph('?'));
    }

    #[test]
    fn every_drawn_prompt_has_glyphs() {
        let fallback = char_glyph('~');
        for text in ["Capture first sign", "Record some noise for science", "status yes1"] {
            for ch in text.chars().filter(|&c| c != ' ') {
                assert_ne!(char_glyph(ch), fallback, "{:?}", ch);
            }
        }
    }
}
