//! Core domain types for the Repcount engine.
//!
//! This module defines the fundamental types used throughout the system:
//! - Landmarks and landmark frames (input from the pose source)
//! - Exercise profiles (declarative per-exercise configuration)
//! - Rep counter state (output to the display/telemetry layer)

use crate::skeleton::PoseLandmark;
use serde::{Deserialize, Serialize};

// ============================================================================
// Landmark Types
// ============================================================================

/// A single tracked body keypoint
///
/// `z` is carried for completeness but unused by the angle math.
/// `visibility` is the detector's confidence; `None` means the source did not
/// report one and the landmark is trusted.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
    #[serde(default)]
    pub z: f32,
    #[serde(default)]
    pub visibility: Option<f32>,
}

impl Landmark {
    /// Create a landmark with no reported visibility
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            z: 0.0,
            visibility: None,
        }
    }

    /// Create a landmark with a visibility score
    pub fn with_visibility(x: f32, y: f32, visibility: f32) -> Self {
        Self {
            x,
            y,
            z: 0.0,
            visibility: Some(visibility),
        }
    }
}

/// One snapshot of the skeleton, index-addressable by [`PoseLandmark`]
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
#[serde(transparent)]
pub struct LandmarkFrame {
    landmarks: Vec<Landmark>,
}

impl LandmarkFrame {
    pub fn new(landmarks: Vec<Landmark>) -> Self {
        Self { landmarks }
    }

    pub fn landmarks(&self) -> &[Landmark] {
        &self.landmarks
    }

    pub fn len(&self) -> usize {
        self.landmarks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.landmarks.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Landmark> {
        self.landmarks.get(index)
    }
}

impl From<Vec<Landmark>> for LandmarkFrame {
    fn from(landmarks: Vec<Landmark>) -> Self {
        Self::new(landmarks)
    }
}

// ============================================================================
// Exercise Profile Types
// ============================================================================

/// How increasing joint angle maps onto progress percentage
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PercentDirection {
    /// Domain minimum maps to 0%, maximum to 100%
    Forward,
    /// Domain minimum maps to 100%, maximum to 0%
    Reversed,
}

impl PercentDirection {
    /// Target range handed to the interpolator
    pub fn target_range(self) -> (f32, f32) {
        match self {
            PercentDirection::Forward => (0.0, 100.0),
            PercentDirection::Reversed => (100.0, 0.0),
        }
    }
}

/// Range of motion of the measured joint, in degrees
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct AngleDomain {
    pub min_deg: f32,
    pub max_deg: f32,
}

impl AngleDomain {
    pub fn new(min_deg: f32, max_deg: f32) -> Self {
        Self { min_deg, max_deg }
    }

    pub fn as_tuple(&self) -> (f32, f32) {
        (self.min_deg, self.max_deg)
    }
}

/// Declarative configuration for one exercise type
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ExerciseProfile {
    pub id: String,
    pub name: String,
    /// Landmark at the far end of the first segment (e.g. wrist for a curl)
    pub proximal: usize,
    /// Vertex of the measured angle (e.g. elbow)
    pub joint: usize,
    /// Landmark at the far end of the second segment (e.g. shoulder)
    pub distal: usize,
    pub angle_domain: AngleDomain,
    pub percent_direction: PercentDirection,
    pub visibility_threshold: f32,
}

impl ExerciseProfile {
    /// The three landmark indices in (proximal, joint, distal) order
    pub fn triplet(&self) -> [usize; 3] {
        [self.proximal, self.joint, self.distal]
    }

    /// Minimum number of landmarks a frame needs for this profile
    pub fn required_len(&self) -> usize {
        self.proximal.max(self.joint).max(self.distal) + 1
    }

    /// Validate the profile for consistency
    ///
    /// Returns a list of validation errors, or empty Vec if valid.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.id.is_empty() {
            errors.push("Profile has empty ID".to_string());
        }
        if self.name.is_empty() {
            errors.push(format!("Profile '{}' has empty name", self.id));
        }

        for index in self.triplet() {
            if PoseLandmark::from_index(index).is_none() {
                errors.push(format!(
                    "Profile '{}': landmark index {} outside the {}-point skeleton",
                    self.id,
                    index,
                    PoseLandmark::COUNT
                ));
            }
        }

        if self.proximal == self.joint
            || self.joint == self.distal
            || self.proximal == self.distal
        {
            errors.push(format!(
                "Profile '{}': landmark indices {:?} are not distinct",
                self.id,
                self.triplet()
            ));
        }

        let AngleDomain { min_deg, max_deg } = self.angle_domain;
        if !min_deg.is_finite() || !max_deg.is_finite() {
            errors.push(format!("Profile '{}': angle domain is not finite", self.id));
        } else if min_deg >= max_deg {
            errors.push(format!(
                "Profile '{}': angle domain min {} >= max {}",
                self.id, min_deg, max_deg
            ));
        }

        if !(0.0..=1.0).contains(&self.visibility_threshold) {
            errors.push(format!(
                "Profile '{}': visibility threshold {} outside [0, 1]",
                self.id, self.visibility_threshold
            ));
        }

        errors
    }
}

// ============================================================================
// Counter State Types
// ============================================================================

/// Which extreme the counter is waiting for next
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Waiting for the contracted extreme (100%)
    Up,
    /// Waiting for the extended extreme (0%)
    Down,
}

/// Per-session counter state, owned and threaded by the caller
///
/// The count is stored as half repetitions so it stays exact; [`count`]
/// exposes it as a multiple of 0.5.
///
/// [`count`]: RepCounterState::count
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct RepCounterState {
    pub half_reps: u32,
    pub direction: Direction,
    pub last_percentage: u8,
    pub last_angle: f32,
}

impl RepCounterState {
    /// State at session start: no reps, waiting to go up
    pub fn initial() -> Self {
        Self {
            half_reps: 0,
            direction: Direction::Up,
            last_percentage: 0,
            last_angle: 0.0,
        }
    }

    /// Repetitions completed so far, in steps of 0.5
    pub fn count(&self) -> f32 {
        self.half_reps as f32 / 2.0
    }

    /// Whole repetitions completed so far
    pub fn full_reps(&self) -> u32 {
        self.half_reps / 2
    }
}

impl Default for RepCounterState {
    fn default() -> Self {
        Self::initial()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn curl() -> ExerciseProfile {
        ExerciseProfile {
            id: "curl".into(),
            name: "Bicep Curl".into(),
            proximal: 16,
            joint: 14,
            distal: 12,
            angle_domain: AngleDomain::new(22.0, 170.0),
            percent_direction: PercentDirection::Forward,
            visibility_threshold: 0.5,
        }
    }

    #[test]
    fn test_initial_state() {
        let state = RepCounterState::initial();
        assert_eq!(state.count(), 0.0);
        assert_eq!(state.direction, Direction::Up);
        assert_eq!(state.last_percentage, 0);
        assert_eq!(state, RepCounterState::default());
    }

    #[test]
    fn test_count_is_half_steps() {
        let state = RepCounterState {
            half_reps: 3,
            ..RepCounterState::initial()
        };
        assert_eq!(state.count(), 1.5);
        assert_eq!(state.full_reps(), 1);
    }

    #[test]
    fn test_required_len_uses_highest_index() {
        assert_eq!(curl().required_len(), 17);
    }

    #[test]
    fn test_valid_profile_has_no_errors() {
        assert!(curl().validate().is_empty());
    }

    #[test]
    fn test_out_of_range_index_is_reported() {
        let profile = ExerciseProfile {
            distal: 40,
            ..curl()
        };
        let errors = profile.validate();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("40"));
    }

    #[test]
    fn test_inverted_domain_is_reported() {
        let profile = ExerciseProfile {
            angle_domain: AngleDomain::new(170.0, 22.0),
            ..curl()
        };
        assert!(!profile.validate().is_empty());
    }

    #[test]
    fn test_bad_threshold_and_duplicate_indices() {
        let profile = ExerciseProfile {
            joint: 16,
            visibility_threshold: 1.5,
            ..curl()
        };
        assert_eq!(profile.validate().len(), 2);
    }

    #[test]
    fn test_landmark_visibility_defaults_to_none() {
        let lm: Landmark = serde_json::from_str(r#"{"x": 0.5, "y": 0.25}"#).unwrap();
        assert_eq!(lm, Landmark::new(0.5, 0.25));
    }

    #[test]
    fn test_frame_parses_from_array() {
        let frame: LandmarkFrame =
            serde_json::from_str(r#"[{"x": 0.1, "y": 0.2, "visibility": 0.9}]"#).unwrap();
        assert_eq!(frame.len(), 1);
        assert_eq!(frame.get(0).unwrap().visibility, Some(0.9));
    }
}
