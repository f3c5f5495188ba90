//! # Repmeter Core
//!
//! Core types and errors for the repmeter exercise repetition engine.
//!
//! This crate provides the foundational building blocks shared between the
//! repetition engine and its hosts:
//!
//! - **Core Data Types**: [`FrameSample`], [`LimbState`], [`RepFault`],
//!   [`LimbSnapshot`], and [`StatusSnapshot`] for representing per-frame
//!   pose measurements and rep-counting results.
//!
//! - **Error Types**: [`EngineError`] and [`EngineResult`] via the
//!   [`error`] module.
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialization/deserialization via serde
//!
//! ## Example
//!
//! ```rust
//! use repmeter_core::{Confidence, FrameSample, LimbSide, Timestamp};
//!
//! let sample = FrameSample::new(Timestamp::from_secs_f64(0.033))
//!     .with_left_angle(165.0)
//!     .with_right_angle(162.0)
//!     .with_confidences(Confidence::new(0.95).unwrap(), Confidence::MAX);
//!
//! assert_eq!(sample.angle(LimbSide::Left), Some(165.0));
//! ```

#![forbid(unsafe_code)]

pub mod error;
pub mod types;

// Re-export commonly used types at the crate root
pub use error::{EngineError, EngineResult};
pub use types::{
    // Input types
    Confidence, FrameSample,
    // State types
    LimbSide, LimbState, RepFault,
    // Output types
    LimbSnapshot, StatusSnapshot,
    // Common types
    SessionId, Timestamp,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Confidence threshold upstream pipelines apply before presenting an angle
pub const DEFAULT_CONFIDENCE_THRESHOLD: f32 = 0.3;

/// Prelude module for convenient imports.
///
/// ```rust
/// use repmeter_core::prelude::*;
/// ```
pub mod prelude {

    pub use crate::error::{EngineError, EngineResult};
    pub use crate::types::{
        Confidence, FrameSample, LimbSide, LimbSnapshot, LimbState, RepFault, SessionId,
        StatusSnapshot, Timestamp,
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_valid() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_default_confidence_threshold() {
        assert!(DEFAULT_CONFIDENCE_THRESHOLD > 0.0);
        assert!(DEFAULT_CONFIDENCE_THRESHOLD < 1.0);
    }
}
