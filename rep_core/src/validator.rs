//! Landmark frame validation.
//!
//! A frame is usable for a profile when it contains all three landmarks the
//! profile measures and none of them reports a visibility below the
//! profile's threshold. Landmarks without a visibility score are trusted.

use crate::{ExerciseProfile, Landmark};

/// Why a frame was not used for counting
///
/// Rejection is the normal outcome for frames where a limb is briefly out
/// of view. The caller holds its previous state and carries on.
#[derive(Clone, Copy, Debug, PartialEq, thiserror::Error)]
pub enum Rejected {
    #[error("frame has {actual} landmarks, profile needs {required}")]
    TooFewLandmarks { required: usize, actual: usize },

    #[error("landmark {index} visibility {visibility} below {threshold}")]
    LowVisibility {
        index: usize,
        visibility: f32,
        threshold: f32,
    },
}

/// Pick the profile's (proximal, joint, distal) landmarks out of a frame
pub fn validate<'a>(
    frame: &'a [Landmark],
    profile: &ExerciseProfile,
) -> Result<(&'a Landmark, &'a Landmark, &'a Landmark), Rejected> {
    let required = profile.required_len();
    if frame.len() < required {
        return Err(Rejected::TooFewLandmarks {
            required,
            actual: frame.len(),
        });
    }

    for index in profile.triplet() {
        if let Some(visibility) = frame[index].visibility {
            // NaN never clears the threshold
            if !(visibility >= profile.visibility_threshold) {
                return Err(Rejected::LowVisibility {
                    index,
                    visibility,
                    threshold: profile.visibility_threshold,
                });
            }
        }
    }

    Ok((
        &frame[profile.proximal],
        &frame[profile.joint],
        &frame[profile.distal],
    ))
}
