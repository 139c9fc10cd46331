//! # sign_lock
//!
//! Keyboard front end for the `sign_capture` core: record three secret
//! signs and a noise class, then unlock by "predicting" them in order.
//! A simulated Learner stands in for the camera and classifier.
//!
//! ## Keys
//!
//! | Key | Action |
//! |---|---|
//! | Arrow (hold) | Capture examples of that control while held |
//! | `C` | Record the next sign (11 examples) |
//! | `1`–`4` | Feed a prediction of class 0–3 |
//! | `P` | Toggle the predicting indicator |
//! | `T` | Show what a training run would be given |
//! | `L` | Log out (reset confirmation) |
//! | `Q` / `Esc` | Quit |
//!
//! ## Unlock order
//!
//! `Up` → `Right` → `Down` (classes 0, 3, 1).  A `Left` prediction never
//! advances the status.

pub mod learner;
pub mod view;
pub mod visualizer;
pub mod app;
pub mod logging;
