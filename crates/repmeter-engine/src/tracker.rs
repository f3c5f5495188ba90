//! Per-limb repetition state machine.
//!
//! One [`LimbTracker`] runs the full cycle grammar for a single side:
//! raw-angle classification into `Down`/`Transition`/`Up` candidates,
//! dwell-time debouncing of state commits, torso-swing violation tracking
//! over a 3-frame sliding window, and the ordered-sequence progression
//! flags that gate rep counting.
//!
//! The tracker is driven exclusively by [`RepEngine`](crate::RepEngine),
//! which instantiates one per side; both sides share this implementation.

use repmeter_core::{FrameSample, LimbSide, LimbSnapshot, LimbState, RepFault, Timestamp};
use tracing::debug;

use crate::config::EngineConfig;
use crate::window::RollingWindow;

/// A candidate state awaiting its dwell time before commit.
#[derive(Debug, Clone, Copy)]
struct PendingState {
    candidate: LimbState,
    since: Timestamp,
}

/// State machine tracking one limb's flexion/extension cycle.
pub struct LimbTracker {
    side: LimbSide,
    config: EngineConfig,

    // Committed + pending state
    state: LimbState,
    pending: Option<PendingState>,

    // Smoothing and telemetry
    angle_window: RollingWindow,
    last_raw_angle: Option<f64>,

    // Torso violation tracking (sticky until the next cycle reset)
    torso_window: RollingWindow,
    torso_violation: bool,
    max_torso_angle: f64,

    // Ordered-sequence progression flags for the current cycle
    started_from_down: bool,
    reached_up_in_cycle: bool,
    descending_to_down: bool,

    // Range-of-motion extremes for the current cycle (raw angles)
    min_angle_in_cycle: Option<f64>,
    max_angle_in_cycle: Option<f64>,

    // Faults for the in-progress cycle, and the last completed cycle's list
    faults: Vec<RepFault>,
    last_rep_faults: Vec<RepFault>,

    // Counters
    correct_reps: u32,
    incorrect_reps: u32,
    cycle_index: u32,

    // Advisory per-frame flag, never folded into validity
    alignment_warning: bool,
}

impl LimbTracker {
    /// Create a tracker in the `Unknown` state with zeroed counters.
    pub fn new(side: LimbSide, config: &EngineConfig) -> Self {
        Self {
            side,
            config: config.clone(),
            state: LimbState::Unknown,
            pending: None,
            angle_window: RollingWindow::new(config.smoothing_window),
            last_raw_angle: None,
            torso_window: RollingWindow::new(config.torso_window),
            torso_violation: false,
            max_torso_angle: 0.0,
            started_from_down: false,
            reached_up_in_cycle: false,
            descending_to_down: false,
            min_angle_in_cycle: None,
            max_angle_in_cycle: None,
            faults: Vec::new(),
            last_rep_faults: Vec::new(),
            correct_reps: 0,
            incorrect_reps: 0,
            cycle_index: 0,
            alignment_warning: false,
        }
    }

    /// Process this tracker's side of one frame sample.
    ///
    /// Alignment and torso observations apply every frame; the state machine
    /// only advances when an angle is present and its confidence clears the
    /// configured gate.
    pub fn update(&mut self, sample: &FrameSample) {
        let side = self.side;
        self.alignment_warning = !sample.aligned(side);

        // Torso window runs whenever the limb is active (anything but a
        // committed Down), independent of angle presence.
        if self.state != LimbState::Down {
            self.observe_torso(sample.torso_angle(side));
        }

        let angle = sample.angle(side);
        self.last_raw_angle = angle;

        if let Some(angle_deg) = angle {
            if sample.confidence(side).exceeds(self.config.min_confidence) {
                self.advance(angle_deg, sample.timestamp);
            }
        }
    }

    /// Push a torso sample and latch the violation flag once the full-window
    /// average exceeds the limit. Averaging filters one-frame spikes while
    /// still catching sustained swinging.
    fn observe_torso(&mut self, torso_angle_deg: f64) {
        self.max_torso_angle = self.max_torso_angle.max(torso_angle_deg);
        self.torso_window.push(torso_angle_deg);
        if self.torso_window.is_full() {
            if let Some(avg) = self.torso_window.mean() {
                if avg > self.config.torso_angle_deg {
                    self.torso_violation = true;
                }
            }
        }
    }

    /// Run smoothing, classification, and the debounced commit for one
    /// angle observation.
    fn advance(&mut self, angle_deg: f64, now: Timestamp) {
        self.angle_window.push(angle_deg);

        // Track raw-angle extremes while a cycle is live (any state but a
        // committed Down, or once tracking has begun).
        if self.min_angle_in_cycle.is_some() || self.state != LimbState::Down {
            self.min_angle_in_cycle = Some(match self.min_angle_in_cycle {
                Some(min) => min.min(angle_deg),
                None => angle_deg,
            });
            self.max_angle_in_cycle = Some(match self.max_angle_in_cycle {
                Some(max) => max.max(angle_deg),
                None => angle_deg,
            });
        }

        let candidate = self.classify(angle_deg);

        if candidate == self.state {
            // Already stable; discard any pending change.
            self.pending = None;
            return;
        }

        match self.pending {
            Some(p) if p.candidate == candidate => {
                if now.duration_since(&p.since) >= self.config.min_hold_secs {
                    self.commit(candidate, angle_deg);
                }
            }
            _ => {
                self.pending = Some(PendingState {
                    candidate,
                    since: now,
                });
            }
        }
    }

    /// Classify a raw angle against the two fixed thresholds.
    fn classify(&self, angle_deg: f64) -> LimbState {
        if angle_deg > self.config.down_angle_deg {
            LimbState::Down
        } else if angle_deg < self.config.up_angle_deg {
            LimbState::Up
        } else {
            LimbState::Transition
        }
    }

    /// Commit a debounced state change and run the cycle grammar.
    fn commit(&mut self, new_state: LimbState, angle_deg: f64) {
        let old_state = self.state;

        debug!(
            side = %self.side,
            from = %old_state,
            to = %new_state,
            angle_deg,
            "limb state committed"
        );

        let leaving_down = old_state == LimbState::Down
            && matches!(new_state, LimbState::Transition | LimbState::Up);

        // Ordered-sequence progression flags.
        if leaving_down {
            self.started_from_down = true;
            self.reached_up_in_cycle = false;
            self.descending_to_down = false;
        }
        if new_state == LimbState::Up && self.started_from_down {
            self.reached_up_in_cycle = true;
        }
        // Leaving Up toward Down marks the descent; a direct Up -> Down
        // commit (plateau input with no dwell in Transition) completes the
        // sequence in one step.
        if old_state == LimbState::Up
            && matches!(new_state, LimbState::Transition | LimbState::Down)
            && self.reached_up_in_cycle
        {
            self.descending_to_down = true;
        }

        // Leaving Down starts a fresh cycle: clear the fault set, the torso
        // window and violation flag, and the ROM extremes.
        if leaving_down {
            self.faults.clear();
            self.torso_violation = false;
            self.torso_window.clear();
            self.min_angle_in_cycle = None;
            self.max_angle_in_cycle = None;
        }

        // Landing back in Down from Up or Transition completes the cycle,
        // whether or not the progression flags are satisfied.
        if matches!(old_state, LimbState::Up | LimbState::Transition)
            && new_state == LimbState::Down
        {
            self.complete_cycle();
        }

        self.state = new_state;
        self.pending = None;
    }

    /// Evaluate the finished cycle: rebuild the fault list, count the rep if
    /// the full ordered sequence was observed, and reset per-cycle state.
    fn complete_cycle(&mut self) {
        self.faults.clear();

        let counted =
            self.started_from_down && self.reached_up_in_cycle && self.descending_to_down;

        // Redundant with the counting gate today; kept so a future looser
        // counting policy still reports the broken sequence.
        if !counted {
            self.faults.push(RepFault::IncompleteCycle);
        }

        if self.torso_violation {
            self.faults.push(RepFault::TorsoSwing {
                limit_deg: self.config.torso_angle_deg,
            });
        }

        if self.config.min_rom_deg > 0.0 {
            let observed = match (self.min_angle_in_cycle, self.max_angle_in_cycle) {
                (Some(min), Some(max)) => max - min,
                _ => 0.0,
            };
            if observed < self.config.min_rom_deg {
                self.faults.push(RepFault::InsufficientRangeOfMotion {
                    observed_deg: observed,
                    required_deg: self.config.min_rom_deg,
                });
            }
        }

        self.last_rep_faults = self.faults.clone();

        if counted {
            if self.faults.is_empty() {
                self.correct_reps += 1;
            } else {
                self.incorrect_reps += 1;
            }
            self.cycle_index += 1;
        }

        // Next cycle starts clean.
        self.started_from_down = false;
        self.reached_up_in_cycle = false;
        self.descending_to_down = false;
        self.angle_window.clear();
        self.torso_window.clear();

        debug!(
            side = %self.side,
            counted,
            correct = counted && self.last_rep_faults.is_empty(),
            faults = ?self.last_rep_faults,
            "rep cycle completed"
        );
    }

    /// Total reps counted for this limb.
    pub fn reps(&self) -> u32 {
        self.correct_reps + self.incorrect_reps
    }

    /// Currently committed state.
    pub fn state(&self) -> LimbState {
        self.state
    }

    /// Read-only view of this tracker.
    pub fn snapshot(&self) -> LimbSnapshot {
        LimbSnapshot {
            side: self.side,
            reps: self.reps(),
            correct_reps: self.correct_reps,
            incorrect_reps: self.incorrect_reps,
            state: self.state,
            alignment_warning: self.alignment_warning,
            last_rep_faults: self.last_rep_faults.clone(),
            last_raw_angle: self.last_raw_angle,
            smoothed_angle: self.angle_window.mean(),
            cycle_index: self.cycle_index,
            max_torso_angle: self.max_torso_angle,
        }
    }

    /// Return every field to its start-of-session value.
    pub fn reset(&mut self) {
        let config = self.config.clone();
        *self = Self::new(self.side, &config);
    }
}
