#![forbid(unsafe_code)]

//! Core repetition-counting engine for Repcount.
//!
//! This crate provides:
//! - Landmark and frame types for the 33-point pose skeleton
//! - Joint angle and progress percentage math
//! - Declarative exercise profiles and the profile registry
//! - Frame validation and the hysteresis rep counter
//! - Frame replay and per-frame trace output for host tools

pub mod types;
pub mod error;
pub mod skeleton;
pub mod geometry;
pub mod interpolate;
pub mod registry;
pub mod config;
pub mod logging;
pub mod validator;
pub mod counter;
pub mod tracker;
pub mod replay;
pub mod trace;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use skeleton::PoseLandmark;
pub use geometry::joint_angle;
pub use interpolate::{interpolate, progress_percentage};
pub use registry::{build_default_registry, get_default_registry, ProfileRegistry};
pub use config::Config;
pub use validator::{validate, Rejected};
pub use counter::{ExtremeDetection, RepCounter};
pub use tracker::{Reading, Tracker};
pub use replay::read_frames;
pub use trace::{TraceRow, TraceSink};
