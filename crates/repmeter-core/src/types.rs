//! Core data types for the repmeter repetition engine.
//!
//! This module defines the fundamental data structures exchanged between the
//! upstream pose pipeline, the repetition engine, and downstream UI or
//! telemetry consumers.
//!
//! # Type Categories
//!
//! - **Input Types**: [`FrameSample`], [`Confidence`]
//! - **State Types**: [`LimbSide`], [`LimbState`], [`RepFault`]
//! - **Output Types**: [`LimbSnapshot`], [`StatusSnapshot`]
//! - **Common Types**: [`Timestamp`], [`SessionId`]

use chrono::{DateTime, Utc};
use uuid::Uuid;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

// =============================================================================
// Common Types
// =============================================================================

/// Unique identifier for an exercise session.
///
/// Issued when an engine is constructed and replaced on every `reset()`, so
/// telemetry rows from different sessions never collide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SessionId(Uuid);

impl SessionId {
    /// Creates a new unique session ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a session ID from an existing UUID.
    #[must_use]
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner UUID.
    #[must_use]
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// High-precision timestamp for frame samples.
///
/// The debounce logic requires timestamps to be monotonic non-decreasing
/// across consecutive samples of one session; the host is responsible for
/// providing a clock with that property (wall clock for live camera input,
/// the decode clock for recorded video).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Timestamp {
    /// Seconds since Unix epoch
    pub seconds: i64,
    /// Nanoseconds within the second
    pub nanos: u32,
}

impl Timestamp {
    /// Creates a new timestamp from seconds and nanoseconds.
    #[must_use]
    pub fn new(seconds: i64, nanos: u32) -> Self {
        Self { seconds, nanos }
    }

    /// Creates a timestamp from the current time.
    #[must_use]
    pub fn now() -> Self {
        let now = Utc::now();
        Self {
            seconds: now.timestamp(),
            nanos: now.timestamp_subsec_nanos(),
        }
    }

    /// Creates a timestamp from fractional seconds since epoch.
    ///
    /// Convenient for tests and for hosts that track video time as `f64`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn from_secs_f64(secs: f64) -> Self {
        let seconds = secs.floor() as i64;
        let nanos = ((secs - secs.floor()) * 1_000_000_000.0).round() as u32;
        Self { seconds, nanos }
    }

    /// Creates a timestamp from a `DateTime<Utc>`.
    #[must_use]
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self {
            seconds: dt.timestamp(),
            nanos: dt.timestamp_subsec_nanos(),
        }
    }

    /// Returns the timestamp as total nanoseconds since epoch.
    #[must_use]
    pub fn as_nanos(&self) -> i128 {
        i128::from(self.seconds) * 1_000_000_000 + i128::from(self.nanos)
    }

    /// Returns the duration between two timestamps in seconds.
    #[must_use]
    pub fn duration_since(&self, earlier: &Self) -> f64 {
        let diff_nanos = self.as_nanos() - earlier.as_nanos();
        diff_nanos as f64 / 1_000_000_000.0
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Self::now()
    }
}

/// Confidence score in the range [0.0, 1.0].
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Confidence(f32);

impl Confidence {
    /// Creates a new confidence value.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is not in the range [0.0, 1.0].
    pub fn new(value: f32) -> EngineResult<Self> {
        if !(0.0..=1.0).contains(&value) {
            return Err(EngineError::validation(format!(
                "Confidence must be in [0.0, 1.0], got {value}"
            )));
        }
        Ok(Self(value))
    }

    /// Returns the raw confidence value.
    #[must_use]
    pub fn value(&self) -> f32 {
        self.0
    }

    /// Returns `true` if the confidence exceeds the given threshold.
    #[must_use]
    pub fn exceeds(&self, threshold: f32) -> bool {
        self.0 >= threshold
    }

    /// Maximum confidence (1.0).
    pub const MAX: Self = Self(1.0);

    /// Minimum confidence (0.0).
    pub const MIN: Self = Self(0.0);
}

impl Default for Confidence {
    fn default() -> Self {
        Self(0.0)
    }
}

// =============================================================================
// State Types
// =============================================================================

/// Which limb a tracker or snapshot refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum LimbSide {
    /// Left limb
    Left,
    /// Right limb
    Right,
}

impl LimbSide {
    /// Returns the side name as a string.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

impl std::fmt::Display for LimbSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Committed state of one limb within the flexion/extension cycle.
///
/// Classification over the raw joint angle: above the down threshold the
/// limb is extended (`Down`), below the up threshold it is flexed (`Up`),
/// anything in between is `Transition`. A candidate state only becomes
/// committed after the dwell-time debounce passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum LimbState {
    /// No state committed yet (start of session or after reset).
    #[default]
    Unknown,
    /// Limb extended (angle above the down threshold).
    Down,
    /// Between the two thresholds.
    Transition,
    /// Limb flexed (angle below the up threshold).
    Up,
}

impl LimbState {
    /// Returns the state name as a string.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::Down => "down",
            Self::Transition => "transition",
            Self::Up => "up",
        }
    }
}

impl std::fmt::Display for LimbState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Reason a completed repetition was judged invalid.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[non_exhaustive]
pub enum RepFault {
    /// The full Down → Up → Down sequence was not observed.
    IncompleteCycle,
    /// Sustained torso swing: the 3-frame average torso angle exceeded the
    /// configured limit during the active portion of the cycle.
    TorsoSwing {
        /// Configured torso angle limit in degrees.
        limit_deg: f64,
    },
    /// The raw-angle range covered during the cycle fell short of the
    /// configured minimum range of motion.
    InsufficientRangeOfMotion {
        /// Observed angle range in degrees.
        observed_deg: f64,
        /// Required minimum range in degrees.
        required_deg: f64,
    },
}

impl std::fmt::Display for RepFault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IncompleteCycle => f.write_str("incomplete rep cycle"),
            Self::TorsoSwing { limit_deg } => {
                write!(f, "torso swung too much (>{limit_deg}\u{b0})")
            }
            Self::InsufficientRangeOfMotion {
                observed_deg,
                required_deg,
            } => write!(
                f,
                "insufficient range of motion ({observed_deg:.0}\u{b0} < {required_deg:.0}\u{b0})"
            ),
        }
    }
}

// =============================================================================
// Input Types
// =============================================================================

/// One per-frame measurement produced by the upstream pose pipeline.
///
/// An absent angle (`None`) means the joint was not confidently detected
/// this frame; that side's tracker is simply not updated. Torso angles and
/// alignment flags are always present (the upstream substitutes a sentinel
/// when landmarks are missing).
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FrameSample {
    /// Left joint angle in degrees, if confidently detected.
    pub left_angle: Option<f64>,
    /// Right joint angle in degrees, if confidently detected.
    pub right_angle: Option<f64>,
    /// Left torso deviation angle in degrees.
    pub left_torso_angle: f64,
    /// Right torso deviation angle in degrees.
    pub right_torso_angle: f64,
    /// Whether the left limb is aligned with the torso this frame.
    pub left_aligned: bool,
    /// Whether the right limb is aligned with the torso this frame.
    pub right_aligned: bool,
    /// Landmark confidence for the left limb.
    pub left_confidence: Confidence,
    /// Landmark confidence for the right limb.
    pub right_confidence: Confidence,
    /// When this frame was captured.
    pub timestamp: Timestamp,
}

impl FrameSample {
    /// Creates an empty sample at the given timestamp: no angles, aligned,
    /// zero torso deviation, full confidence.
    #[must_use]
    pub fn new(timestamp: Timestamp) -> Self {
        Self {
            left_angle: None,
            right_angle: None,
            left_torso_angle: 0.0,
            right_torso_angle: 0.0,
            left_aligned: true,
            right_aligned: true,
            left_confidence: Confidence::MAX,
            right_confidence: Confidence::MAX,
            timestamp,
        }
    }

    /// Sets the left joint angle.
    #[must_use]
    pub fn with_left_angle(mut self, angle_deg: f64) -> Self {
        self.left_angle = Some(angle_deg);
        self
    }

    /// Sets the right joint angle.
    #[must_use]
    pub fn with_right_angle(mut self, angle_deg: f64) -> Self {
        self.right_angle = Some(angle_deg);
        self
    }

    /// Sets both torso deviation angles.
    #[must_use]
    pub fn with_torso_angles(mut self, left_deg: f64, right_deg: f64) -> Self {
        self.left_torso_angle = left_deg;
        self.right_torso_angle = right_deg;
        self
    }

    /// Sets both alignment flags.
    #[must_use]
    pub fn with_alignment(mut self, left: bool, right: bool) -> Self {
        self.left_aligned = left;
        self.right_aligned = right;
        self
    }

    /// Sets both landmark confidences.
    #[must_use]
    pub fn with_confidences(mut self, left: Confidence, right: Confidence) -> Self {
        self.left_confidence = left;
        self.right_confidence = right;
        self
    }

    /// Returns the angle for the given side.
    #[must_use]
    pub fn angle(&self, side: LimbSide) -> Option<f64> {
        match side {
            LimbSide::Left => self.left_angle,
            LimbSide::Right => self.right_angle,
        }
    }

    /// Returns the torso angle for the given side.
    #[must_use]
    pub fn torso_angle(&self, side: LimbSide) -> f64 {
        match side {
            LimbSide::Left => self.left_torso_angle,
            LimbSide::Right => self.right_torso_angle,
        }
    }

    /// Returns the alignment flag for the given side.
    #[must_use]
    pub fn aligned(&self, side: LimbSide) -> bool {
        match side {
            LimbSide::Left => self.left_aligned,
            LimbSide::Right => self.right_aligned,
        }
    }

    /// Returns the landmark confidence for the given side.
    #[must_use]
    pub fn confidence(&self, side: LimbSide) -> Confidence {
        match side {
            LimbSide::Left => self.left_confidence,
            LimbSide::Right => self.right_confidence,
        }
    }
}

// =============================================================================
// Output Types
// =============================================================================

/// Read-only view of one limb tracker's state and counters.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LimbSnapshot {
    /// Which limb this snapshot describes.
    pub side: LimbSide,
    /// Total repetitions counted (correct + incorrect).
    pub reps: u32,
    /// Repetitions with clean form.
    pub correct_reps: u32,
    /// Repetitions counted but invalidated by at least one fault.
    pub incorrect_reps: u32,
    /// Currently committed limb state.
    pub state: LimbState,
    /// Alignment warning from the most recent frame.
    pub alignment_warning: bool,
    /// Faults recorded for the last completed cycle (empty = clean rep).
    pub last_rep_faults: Vec<RepFault>,
    /// Last raw (unsmoothed) angle presented for this side, if any.
    pub last_raw_angle: Option<f64>,
    /// Mean of the smoothing window, if any samples are buffered.
    pub smoothed_angle: Option<f64>,
    /// Index of the current rep cycle (increments on each counted rep).
    pub cycle_index: u32,
    /// Maximum torso deviation observed while the limb was active.
    pub max_torso_angle: f64,
}

/// Aggregated engine status, derived on demand by `status()`.
///
/// A snapshot has no identity or lifecycle beyond the call that produced it.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StatusSnapshot {
    /// Session this snapshot belongs to.
    pub session_id: SessionId,
    /// Left limb view.
    pub left: LimbSnapshot,
    /// Right limb view.
    pub right: LimbSnapshot,
    /// Total repetitions across both limbs.
    pub total_reps: u32,
    /// True once either limb has committed a state.
    pub is_active: bool,
}

impl StatusSnapshot {
    /// Returns the snapshot for the given side.
    #[must_use]
    pub fn limb(&self, side: LimbSide) -> &LimbSnapshot {
        match side {
            LimbSide::Left => &self.left,
            LimbSide::Right => &self.right,
        }
    }

    /// Total correct repetitions across both limbs.
    #[must_use]
    pub fn total_correct(&self) -> u32 {
        self.left.correct_reps + self.right.correct_reps
    }

    /// Total incorrect repetitions across both limbs.
    #[must_use]
    pub fn total_incorrect(&self) -> u32 {
        self.left.incorrect_reps + self.right.incorrect_reps
    }
}
