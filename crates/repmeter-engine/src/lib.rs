//! # Repmeter Engine
//!
//! Real-time repetition counting and form scoring for bilateral,
//! single-joint exercises such as biceps curls.
//!
//! The engine consumes a stream of per-frame pose measurements
//! ([`FrameSample`](repmeter_core::FrameSample)) and maintains one state
//! machine per limb. Each machine:
//!
//! 1. classifies the raw joint angle into `Down`, `Transition`, or `Up`
//!    using hysteresis thresholds,
//! 2. debounces state changes with a dwell-time requirement so single-frame
//!    noise never commits,
//! 3. watches a short sliding window of torso deviation to flag swinging,
//! 4. counts a repetition only when the full ordered
//!    Down -> Up -> Down sequence is observed, splitting counted reps into
//!    correct and incorrect by the faults recorded during the cycle.
//!
//! ## Modules
//!
//! - [`config`]: [`EngineConfig`] thresholds and validation
//! - [`engine`]: [`RepEngine`], the bilateral front door
//! - [`tracker`]: [`LimbTracker`], the per-limb state machine
//! - [`window`]: bounded rolling windows used for smoothing
//!
//! ## Example
//!
//! ```rust
//! use repmeter_engine::RepEngine;
//! use repmeter_core::{FrameSample, Timestamp};
//!
//! let mut engine = RepEngine::with_defaults();
//!
//! // Simulate a held extended position at 30 fps.
//! for frame in 0..12 {
//!     let sample = FrameSample::new(Timestamp::from_secs_f64(frame as f64 / 30.0))
//!         .with_left_angle(170.0)
//!         .with_right_angle(170.0);
//!     engine.update(&sample);
//! }
//!
//! let status = engine.status();
//! assert!(status.is_active);
//! assert_eq!(status.total_reps, 0);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialization of configs and snapshots via serde

#![forbid(unsafe_code)]

pub mod config;
pub mod engine;
pub mod tracker;
pub mod window;

pub use config::EngineConfig;
pub use engine::RepEngine;
pub use tracker::LimbTracker;
pub use window::RollingWindow;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::config::EngineConfig;
    pub use crate::engine::RepEngine;
    pub use crate::tracker::LimbTracker;
    pub use repmeter_core::prelude::*;
}
