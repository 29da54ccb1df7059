//! Per-frame pipeline: validate → angle → percentage → count.
//!
//! A [`Tracker`] binds one exercise profile to a counting strategy. It holds
//! no session state; callers keep a [`RepCounterState`] per session and pass
//! it to every [`Tracker::step`] call, in frame order.

use crate::counter::RepCounter;
use crate::geometry::joint_angle;
use crate::interpolate::progress_percentage;
use crate::registry::ProfileRegistry;
use crate::validator::{validate, Rejected};
use crate::{Direction, Error, ExerciseProfile, Landmark, RepCounterState, Result};
use serde::Serialize;

/// Snapshot handed to the display/telemetry layer after an accepted frame
#[derive(Clone, Copy, Debug, Serialize, PartialEq)]
pub struct Reading {
    pub count: f32,
    pub percentage: u8,
    pub angle: f32,
    pub direction: Direction,
    /// True when this frame completed a half repetition
    pub boundary: bool,
}

impl Reading {
    fn from_state(state: &RepCounterState, boundary: bool) -> Self {
        Self {
            count: state.count(),
            percentage: state.last_percentage,
            angle: state.last_angle,
            direction: state.direction,
            boundary,
        }
    }
}

/// Counting engine for a single exercise profile
#[derive(Clone, Debug)]
pub struct Tracker {
    profile: ExerciseProfile,
    counter: RepCounter,
}

impl Tracker {
    /// Build a tracker, failing if the profile is misconfigured
    pub fn new(profile: ExerciseProfile, counter: RepCounter) -> Result<Self> {
        let errors = profile.validate();
        if !errors.is_empty() {
            return Err(Error::Profile(errors.join("; ")));
        }
        Ok(Self { profile, counter })
    }

    /// Build a tracker for a registered exercise
    pub fn for_exercise(
        registry: &ProfileRegistry,
        id: &str,
        counter: RepCounter,
    ) -> Result<Self> {
        let profile = registry.get(id)?.clone();
        tracing::debug!(
            "Tracking '{}' with {:?} extreme detection",
            id,
            counter.detection()
        );
        Self::new(profile, counter)
    }

    pub fn profile(&self) -> &ExerciseProfile {
        &self.profile
    }

    pub fn counter(&self) -> &RepCounter {
        &self.counter
    }

    /// Process one frame
    ///
    /// On rejection `state` is left untouched and the reason is returned;
    /// the caller should keep showing its previous reading.
    pub fn step(
        &self,
        state: &mut RepCounterState,
        frame: &[Landmark],
    ) -> std::result::Result<Reading, Rejected> {
        let (p1, p2, p3) = match validate(frame, &self.profile) {
            Ok(points) => points,
            Err(rejected) => {
                tracing::trace!("Frame rejected for '{}': {}", self.profile.id, rejected);
                return Err(rejected);
            }
        };

        let angle = joint_angle(p1, p2, p3);
        let percentage = progress_percentage(
            angle,
            self.profile.angle_domain,
            self.profile.percent_direction,
        );
        let boundary = self.counter.step(state, percentage, angle);

        Ok(Reading::from_state(state, boundary))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::counter::ExtremeDetection;
    use crate::registry::get_default_registry;
    use crate::skeleton::PoseLandmark;

    /// A full skeleton with the vertex at the origin, the distal point on the
    /// +x axis and the proximal point rotated `degrees` away from it
    fn frame_with_angle(profile: &ExerciseProfile, degrees: f32) -> Vec<Landmark> {
        let mut frame = vec![Landmark::with_visibility(0.5, 0.5, 0.99); PoseLandmark::COUNT];
        let r = degrees.to_radians();
        frame[profile.joint] = Landmark::with_visibility(0.0, 0.0, 0.99);
        frame[profile.distal] = Landmark::with_visibility(1.0, 0.0, 0.99);
        frame[profile.proximal] = Landmark::with_visibility(r.cos(), r.sin(), 0.99);
        frame
    }

    fn tracker(id: &str) -> Tracker {
        Tracker::for_exercise(get_default_registry(), id, RepCounter::default()).unwrap()
    }

    #[test]
    fn test_bicep_curl_scenario() {
        crate::logging::init_test();
        let tracker = tracker("curl");
        let mut state = RepCounterState::initial();

        let a = tracker
            .step(&mut state, &frame_with_angle(tracker.profile(), 170.0))
            .unwrap();
        assert_eq!(a.percentage, 100);
        assert_eq!(a.count, 0.5);
        assert_eq!(a.direction, Direction::Down);
        assert!(a.boundary);

        let b = tracker
            .step(&mut state, &frame_with_angle(tracker.profile(), 22.0))
            .unwrap();
        assert_eq!(b.percentage, 0);
        assert_eq!(b.count, 1.0);
        assert_eq!(b.direction, Direction::Up);
        assert!((state.last_angle - 22.0).abs() < 0.01);
    }

    #[test]
    fn test_squat_reversed_scenario() {
        let tracker = tracker("squat");
        let mut state = RepCounterState::initial();

        let standing = tracker
            .step(&mut state, &frame_with_angle(tracker.profile(), 170.0))
            .unwrap();
        assert_eq!(standing.percentage, 0);
        assert_eq!(standing.count, 0.0);

        let bottom = tracker
            .step(&mut state, &frame_with_angle(tracker.profile(), 100.0))
            .unwrap();
        assert_eq!(bottom.percentage, 100);
        assert_eq!(bottom.count, 0.5);
        assert_eq!(bottom.direction, Direction::Down);

        let up = tracker
            .step(&mut state, &frame_with_angle(tracker.profile(), 170.0))
            .unwrap();
        assert_eq!(up.count, 1.0);
        assert_eq!(up.direction, Direction::Up);
    }

    #[test]
    fn test_full_angle_sweep_counts_one_rep() {
        let tracker = tracker("curl");
        let mut state = RepCounterState::initial();
        let mut boundaries = 0;

        // 22..=170 in 10% steps of the 148 degree range, then back down
        let up: Vec<f32> = (0..=10).map(|i| 22.0 + 14.8 * i as f32).collect();
        let down: Vec<f32> = up.iter().rev().skip(1).copied().collect();
        for angle in up.into_iter().chain(down) {
            let reading = tracker
                .step(&mut state, &frame_with_angle(tracker.profile(), angle))
                .unwrap();
            if reading.boundary {
                boundaries += 1;
            }
        }

        assert_eq!(boundaries, 2);
        assert_eq!(state.count(), 1.0);
        assert_eq!(state.direction, Direction::Up);
    }

    #[test]
    fn test_rejected_frame_is_a_no_op() {
        let tracker = tracker("curl");
        let mut state = RepCounterState::initial();
        tracker
            .step(&mut state, &frame_with_angle(tracker.profile(), 170.0))
            .unwrap();
        tracker
            .step(&mut state, &frame_with_angle(tracker.profile(), 90.0))
            .unwrap();
        let before = state.clone();

        let mut hidden = frame_with_angle(tracker.profile(), 22.0);
        hidden[PoseLandmark::RightWrist.index()].visibility = Some(0.1);
        for _ in 0..5 {
            assert!(tracker.step(&mut state, &hidden).is_err());
            assert!(tracker.step(&mut state, &hidden[..10]).is_err());
        }

        assert_eq!(state, before);
    }

    #[test]
    fn test_processing_resumes_after_rejection() {
        let tracker = tracker("curl");
        let mut state = RepCounterState::initial();

        assert!(tracker.step(&mut state, &[]).is_err());
        let reading = tracker
            .step(&mut state, &frame_with_angle(tracker.profile(), 170.0))
            .unwrap();
        assert_eq!(reading.count, 0.5);
    }

    #[test]
    fn test_out_of_domain_angle_is_clamped() {
        let tracker = tracker("squat");
        let mut state = RepCounterState::initial();

        let reading = tracker
            .step(&mut state, &frame_with_angle(tracker.profile(), 40.0))
            .unwrap();
        assert_eq!(reading.percentage, 100);
        let reading = tracker
            .step(&mut state, &frame_with_angle(tracker.profile(), 180.0))
            .unwrap();
        assert_eq!(reading.percentage, 0);
    }

    #[test]
    fn test_band_detection_catches_shallow_rep() {
        let profile = get_default_registry().get("curl").unwrap().clone();
        let counter = RepCounter::new(ExtremeDetection::Band { margin: 5 });
        let tracker = Tracker::new(profile, counter).unwrap();
        let mut state = RepCounterState::initial();

        // 97% and 3% of the range
        for angle in [165.6, 26.4] {
            tracker
                .step(&mut state, &frame_with_angle(tracker.profile(), angle))
                .unwrap();
        }
        assert_eq!(state.count(), 1.0);
    }

    #[test]
    fn test_sessions_are_independent() {
        let curl = tracker("curl");
        let squat = tracker("squat");
        let mut curl_state = RepCounterState::initial();
        let mut squat_state = RepCounterState::initial();

        for (curl_angle, squat_angle) in [(170.0, 150.0), (22.0, 100.0), (170.0, 170.0)] {
            curl.step(&mut curl_state, &frame_with_angle(curl.profile(), curl_angle))
                .unwrap();
            squat
                .step(&mut squat_state, &frame_with_angle(squat.profile(), squat_angle))
                .unwrap();
        }

        assert_eq!(curl_state.count(), 1.5);
        assert_eq!(squat_state.count(), 1.0);
    }

    #[test]
    fn test_misconfigured_profile_fails_at_setup() {
        let mut profile = get_default_registry().get("squat").unwrap().clone();
        profile.distal = 33;
        assert!(matches!(
            Tracker::new(profile, RepCounter::default()),
            Err(Error::Profile(_))
        ));
    }

    #[test]
    fn test_unknown_exercise_fails_at_setup() {
        let result = Tracker::for_exercise(get_default_registry(), "plank", RepCounter::default());
        assert!(matches!(result, Err(Error::UnknownExercise(_))));
    }
}
