//! Registry of exercise profiles.
//!
//! This module provides the built-in profiles and the read-only lookup the
//! engine uses to find them. New exercises are data: add an entry here or a
//! `[[profiles]]` table in the config file.

use crate::config::Config;
use crate::skeleton::PoseLandmark;
use crate::types::*;
use crate::{Error, Result};
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Visibility below which a built-in profile rejects a landmark
const DEFAULT_VISIBILITY_THRESHOLD: f32 = 0.5;

/// Cached default registry - built once and shared by every session
static DEFAULT_REGISTRY: Lazy<ProfileRegistry> = Lazy::new(build_default_registry);

/// Get a reference to the cached default registry
pub fn get_default_registry() -> &'static ProfileRegistry {
    &DEFAULT_REGISTRY
}

/// Read-only lookup from exercise id to profile
#[derive(Clone, Debug, Default)]
pub struct ProfileRegistry {
    profiles: HashMap<String, ExerciseProfile>,
}

/// Builds the registry of built-in exercise profiles
///
/// **Note**: prefer `get_default_registry()` unless you need an owned copy
/// to extend with custom profiles.
pub fn build_default_registry() -> ProfileRegistry {
    let mut profiles = HashMap::new();

    let builtins = [
        ExerciseProfile {
            id: "curl".into(),
            name: "Bicep Curl (right arm)".into(),
            proximal: PoseLandmark::RightWrist.index(),
            joint: PoseLandmark::RightElbow.index(),
            distal: PoseLandmark::RightShoulder.index(),
            angle_domain: AngleDomain::new(22.0, 170.0),
            percent_direction: PercentDirection::Forward,
            visibility_threshold: DEFAULT_VISIBILITY_THRESHOLD,
        },
        ExerciseProfile {
            id: "curl_left".into(),
            name: "Bicep Curl (left arm)".into(),
            proximal: PoseLandmark::LeftWrist.index(),
            joint: PoseLandmark::LeftElbow.index(),
            distal: PoseLandmark::LeftShoulder.index(),
            angle_domain: AngleDomain::new(22.0, 170.0),
            percent_direction: PercentDirection::Forward,
            visibility_threshold: DEFAULT_VISIBILITY_THRESHOLD,
        },
        ExerciseProfile {
            id: "squat".into(),
            name: "Squat (right leg)".into(),
            proximal: PoseLandmark::RightHip.index(),
            joint: PoseLandmark::RightKnee.index(),
            distal: PoseLandmark::RightAnkle.index(),
            angle_domain: AngleDomain::new(100.0, 170.0),
            percent_direction: PercentDirection::Reversed,
            visibility_threshold: DEFAULT_VISIBILITY_THRESHOLD,
        },
        ExerciseProfile {
            id: "squat_left".into(),
            name: "Squat (left leg)".into(),
            proximal: PoseLandmark::LeftHip.index(),
            joint: PoseLandmark::LeftKnee.index(),
            distal: PoseLandmark::LeftAnkle.index(),
            angle_domain: AngleDomain::new(100.0, 170.0),
            percent_direction: PercentDirection::Reversed,
            visibility_threshold: DEFAULT_VISIBILITY_THRESHOLD,
        },
    ];

    for profile in builtins {
        profiles.insert(profile.id.clone(), profile);
    }

    ProfileRegistry { profiles }
}

impl ProfileRegistry {
    /// Built-in profiles plus any custom profiles from the config
    ///
    /// Custom profiles replace built-ins with the same id. Fails if any
    /// resulting profile is misconfigured.
    pub fn with_config(config: &Config) -> Result<Self> {
        let mut registry = build_default_registry();
        for custom in &config.profiles {
            registry.insert(custom.to_profile())?;
        }
        Ok(registry)
    }

    /// Add or replace a profile after validating it
    pub fn insert(&mut self, profile: ExerciseProfile) -> Result<()> {
        let errors = profile.validate();
        if !errors.is_empty() {
            return Err(Error::Profile(errors.join("; ")));
        }

        if self.profiles.contains_key(&profile.id) {
            tracing::info!("Overriding exercise profile '{}'", profile.id);
        } else {
            tracing::debug!("Registered exercise profile '{}'", profile.id);
        }
        self.profiles.insert(profile.id.clone(), profile);
        Ok(())
    }

    /// Look up a profile, failing with `UnknownExercise` if absent
    pub fn get(&self, id: &str) -> Result<&ExerciseProfile> {
        self.profiles
            .get(id)
            .ok_or_else(|| Error::UnknownExercise(id.to_string()))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.profiles.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    /// All profiles, sorted by id
    pub fn profiles(&self) -> Vec<&ExerciseProfile> {
        let mut profiles: Vec<_> = self.profiles.values().collect();
        profiles.sort_by(|a, b| a.id.cmp(&b.id));
        profiles
    }

    /// Validate the registry for consistency
    ///
    /// Returns a list of validation errors, or empty Vec if valid.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        for (key, profile) in &self.profiles {
            if key != &profile.id {
                errors.push(format!(
                    "Profile key '{}' doesn't match profile.id '{}'",
                    key, profile.id
                ));
            }
            errors.extend(profile.validate());
        }

        if self.profiles.is_empty() {
            errors.push("Registry has no profiles".to_string());
        }

        errors
    }
}
