//! Class labels and the confirmation status they feed.

use std::fmt;

use crate::error::CaptureError;

// ════════════════════════════════════════════════════════════════════════════
// PredictionStatus
// ════════════════════════════════════════════════════════════════════════════

/// Committed recognition status.
///
/// Advances only along `Initial → Stage1 → Stage2 → Confirmed`; see
/// [`crate::confirm::advance`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PredictionStatus {
    #[default]
    Initial,
    Stage1,
    Stage2,
    Confirmed,
}

impl PredictionStatus {
    /// Short tag used by display surfaces (`fail`, `yes1`, `yes2`, `ok`).
    pub fn as_str(self) -> &'static str {
        match self {
            PredictionStatus::Initial   => "fail",
            PredictionStatus::Stage1    => "yes1",
            PredictionStatus::Stage2    => "yes2",
            PredictionStatus::Confirmed => "ok",
        }
    }
}

impl fmt::Display for PredictionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// ControlLabel
// ════════════════════════════════════════════════════════════════════════════

/// One of the four trainable classes, named after the control that
/// captures it.  Class index order is `Up, Down, Left, Right`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ControlLabel {
    Up,
    Down,
    Left,
    Right,
}

impl ControlLabel {
    pub const COUNT: usize = 4;

    /// All labels in class-index order.
    pub const ALL: [ControlLabel; Self::COUNT] =
        [ControlLabel::Up, ControlLabel::Down, ControlLabel::Left, ControlLabel::Right];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Control identifier (`up`, `down`, `left`, `right`).
    pub fn name(self) -> &'static str {
        match self {
            ControlLabel::Up    => "up",
            ControlLabel::Down  => "down",
            ControlLabel::Left  => "left",
            ControlLabel::Right => "right",
        }
    }

    /// Status this class stands for when it is predicted.
    ///
    /// The table is literal: `Left` maps back to `Initial`, which never
    /// appears as the target of a transition, so a `Left` prediction is
    /// always ignored.
    pub fn candidate_status(self) -> PredictionStatus {
        match self {
            ControlLabel::Up    => PredictionStatus::Stage1,
            ControlLabel::Down  => PredictionStatus::Confirmed,
            ControlLabel::Left  => PredictionStatus::Initial,
            ControlLabel::Right => PredictionStatus::Stage2,
        }
    }

    /// Legacy DOM key code of the matching arrow key.
    pub fn key_code(self) -> u32 {
        match self {
            ControlLabel::Up    => 38,
            ControlLabel::Down  => 40,
            ControlLabel::Left  => 37,
            ControlLabel::Right => 39,
        }
    }
}

impl TryFrom<usize> for ControlLabel {
    type Error = CaptureError;

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        Self::ALL.get(index).copied().ok_or(CaptureError::InvalidClass(index))
    }
}

impl fmt::Display for ControlLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_round_trips_for_every_label() {
        for (i, label) in ControlLabel::ALL.iter().enumerate() {
            assert_eq!(label.index(), i);
            assert_eq!(ControlLabel::try_from(i).unwrap(), *label);
        }
    }

    #[test]
    fn out_of_range_index_rejected() {
        assert!(matches!(
            ControlLabel::try_from(4),
            Err(CaptureError::InvalidClass(4))
        ));
    }

    #[test]
    fn candidate_table_is_literal() {
        let got: Vec<_> = ControlLabel::ALL.iter().map(|l| l.candidate_status()).collect();
        assert_eq!(
            got,
            vec![
                PredictionStatus::Stage1,
                PredictionStatus::Confirmed,
                PredictionStatus::Initial,
                PredictionStatus::Stage2,
            ]
        );
    }

    #[test]
    fn arrow_key_codes() {
        let codes: Vec<_> = ControlLabel::ALL.iter().map(|l| l.key_code()).collect();
        assert_eq!(codes, vec![38, 40, 37, 39]);
    }

    #[test]
    fn status_tags() {
        assert_eq!(PredictionStatus::default(), PredictionStatus::Initial);
        assert_eq!(PredictionStatus::Stage2.to_string(), "yes2");
        assert_eq!(ControlLabel::Right.to_string(), "right");
    }
}
