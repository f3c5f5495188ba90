//! Bilateral repetition engine.

use repmeter_core::{
    EngineResult, FrameSample, LimbSide, LimbState, SessionId, StatusSnapshot,
};
use tracing::debug;

use crate::config::EngineConfig;
use crate::tracker::LimbTracker;

/// Counts exercise repetitions for both limbs from a stream of pose frames.
///
/// The engine owns one [`LimbTracker`] per side and a session identity.
/// Every call to [`update`](Self::update) advances both trackers and returns
/// a fresh [`StatusSnapshot`]; the engine itself holds no per-frame state
/// beyond what the trackers carry.
///
/// # Example
///
/// ```rust
/// use repmeter_engine::RepEngine;
/// use repmeter_core::{FrameSample, Timestamp};
///
/// let mut engine = RepEngine::with_defaults();
/// let sample = FrameSample::new(Timestamp::from_secs_f64(0.0))
///     .with_left_angle(170.0)
///     .with_right_angle(168.0);
/// let status = engine.update(&sample);
/// assert_eq!(status.total_reps, 0);
/// ```
pub struct RepEngine {
    config: EngineConfig,
    session_id: SessionId,
    left: LimbTracker,
    right: LimbTracker,
}

impl RepEngine {
    /// Create an engine with a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Configuration`](repmeter_core::EngineError) if
    /// the configuration fails [`EngineConfig::validate`].
    pub fn new(config: EngineConfig) -> EngineResult<Self> {
        config.validate()?;
        let session_id = SessionId::new();
        debug!(%session_id, "repetition engine started");
        Ok(Self {
            left: LimbTracker::new(LimbSide::Left, &config),
            right: LimbTracker::new(LimbSide::Right, &config),
            session_id,
            config,
        })
    }

    /// Create an engine with the default biceps-curl tuning.
    #[must_use]
    pub fn with_defaults() -> Self {
        // The default configuration is valid by construction.
        let config = EngineConfig::default();
        Self {
            left: LimbTracker::new(LimbSide::Left, &config),
            right: LimbTracker::new(LimbSide::Right, &config),
            session_id: SessionId::new(),
            config,
        }
    }

    /// Feed one frame to both trackers and return the resulting status.
    pub fn update(&mut self, sample: &FrameSample) -> StatusSnapshot {
        self.left.update(sample);
        self.right.update(sample);
        self.status()
    }

    /// Current status without advancing any state.
    #[must_use]
    pub fn status(&self) -> StatusSnapshot {
        let left = self.left.snapshot();
        let right = self.right.snapshot();
        let total_reps = left.reps + right.reps;
        let is_active =
            self.left.state() != LimbState::Unknown || self.right.state() != LimbState::Unknown;
        StatusSnapshot {
            session_id: self.session_id,
            left,
            right,
            total_reps,
            is_active,
        }
    }

    /// Discard all progress and start a fresh session.
    pub fn reset(&mut self) {
        self.left.reset();
        self.right.reset();
        self.session_id = SessionId::new();
        debug!(session_id = %self.session_id, "repetition engine reset");
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Identity of the current session. Changes on [`reset`](Self::reset).
    #[must_use]
    pub fn session_id(&self) -> SessionId {
        self.session_id
    }
}

impl Default for RepEngine {
    fn default() -> Self {
        Self::with_defaults()
    }
}
