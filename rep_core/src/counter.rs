//! Hysteresis rep counter.
//!
//! A repetition is one full contraction (progress reaches the top extreme)
//! followed by one full extension (progress returns to the bottom extreme).
//! Each half is worth 0.5. The counter only advances when the extreme it is
//! waiting for is reached, so noise around any single value cannot count
//! twice.

use crate::{Direction, RepCounterState};

/// Largest band margin that keeps the top and bottom bands apart
pub const MAX_BAND_MARGIN: u8 = 49;

/// How the counter decides that progress has reached an extreme
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ExtremeDetection {
    /// Only exactly 100 and exactly 0 count as extremes
    #[default]
    Exact,
    /// `>= 100 - margin` is the top, `<= margin` the bottom
    Band { margin: u8 },
}

impl ExtremeDetection {
    fn margin(self) -> u8 {
        match self {
            ExtremeDetection::Exact => 0,
            ExtremeDetection::Band { margin } => margin.min(MAX_BAND_MARGIN),
        }
    }

    fn is_top(self, percentage: u8) -> bool {
        percentage >= 100 - self.margin()
    }

    fn is_bottom(self, percentage: u8) -> bool {
        percentage <= self.margin()
    }
}

/// The counting state machine; holds configuration only, never session state
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RepCounter {
    detection: ExtremeDetection,
}

impl RepCounter {
    pub fn new(detection: ExtremeDetection) -> Self {
        Self { detection }
    }

    pub fn detection(&self) -> ExtremeDetection {
        self.detection
    }

    /// Advance `state` with a new progress reading
    ///
    /// Records the percentage and angle unconditionally. Returns true when a
    /// half repetition was counted, in which case the direction has flipped.
    pub fn step(&self, state: &mut RepCounterState, percentage: u8, angle: f32) -> bool {
        let percentage = percentage.min(100);
        state.last_percentage = percentage;
        state.last_angle = angle;

        let next = match state.direction {
            Direction::Up if self.detection.is_top(percentage) => Direction::Down,
            Direction::Down if self.detection.is_bottom(percentage) => Direction::Up,
            _ => return false,
        };

        state.half_reps += 1;
        state.direction = next;

        tracing::debug!(
            "Rep boundary at {}%: count {} ({:?})",
            percentage,
            state.count(),
            next
        );
        true
    }
}
