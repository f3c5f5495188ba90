//! Integration tests for the bilateral repetition pipeline.
//!
//! These tests drive [`RepEngine`] with deterministic synthetic sessions:
//! 1. Frame stream at 30 fps -> per-limb state machines advance
//! 2. Hysteresis + dwell debouncing -> committed Down/Transition/Up states
//! 3. Cycle grammar -> counted reps split into correct and incorrect
//!
//! No mocks, no random data. All angle trajectories are deterministic
//! sinusoids or piecewise holds.

use std::f64::consts::PI;

use repmeter_core::{FrameSample, LimbSide, LimbState, RepFault, Timestamp};
use repmeter_engine::{EngineConfig, RepEngine};

const FPS: f64 = 30.0;

/// Generate a sinusoidal elbow-angle trajectory for full curls.
///
/// Swings between 40 degrees (fully flexed) and 170 degrees (fully
/// extended) with a 3 second period, starting extended. With the default
/// thresholds each period spends roughly half a second in both the Down
/// and Up zones, comfortably past the 0.2 s dwell requirement.
fn curl_trajectory(periods: usize, period_secs: f64) -> Vec<f64> {
    let num_frames = (periods as f64 * period_secs * FPS) as usize;
    (0..num_frames)
        .map(|i| {
            let t = i as f64 / FPS;
            105.0 + 65.0 * (2.0 * PI * t / period_secs).cos()
        })
        .collect()
}

/// Drive the engine with identical angles on both sides.
fn run_bilateral(engine: &mut RepEngine, angles: &[f64], torso: f64) {
    for (i, &angle) in angles.iter().enumerate() {
        let sample = FrameSample::new(Timestamp::from_secs_f64(i as f64 / FPS))
            .with_left_angle(angle)
            .with_right_angle(angle)
            .with_torso_angles(torso, torso);
        engine.update(&sample);
    }
}

#[test]
fn ten_clean_curls_count_on_both_sides() {
    let mut engine = RepEngine::with_defaults();
    let angles = curl_trajectory(10, 3.0);
    run_bilateral(&mut engine, &angles, 5.0);

    // The trajectory ends extended, so the tenth cycle has closed.
    let status = engine.status();
    assert_eq!(status.left.reps, 10);
    assert_eq!(status.right.reps, 10);
    assert_eq!(status.left.correct_reps, 10);
    assert_eq!(status.right.correct_reps, 10);
    assert_eq!(status.total_reps, 20);
    assert_eq!(status.total_correct(), 20);
    assert_eq!(status.total_incorrect(), 0);
    assert!(status.is_active);
    assert!(status.left.last_rep_faults.is_empty());
}

#[test]
fn counters_are_monotonic_across_a_session() {
    let mut engine = RepEngine::with_defaults();
    let angles = curl_trajectory(5, 3.0);

    let mut prev = 0;
    for (i, &angle) in angles.iter().enumerate() {
        let sample = FrameSample::new(Timestamp::from_secs_f64(i as f64 / FPS))
            .with_left_angle(angle)
            .with_right_angle(angle);
        let status = engine.update(&sample);
        assert!(status.total_reps >= prev);
        assert_eq!(
            status.left.reps,
            status.left.correct_reps + status.left.incorrect_reps
        );
        prev = status.total_reps;
    }
    assert_eq!(prev, 10);
}

#[test]
fn sustained_torso_swing_marks_reps_incorrect() {
    let mut engine = RepEngine::with_defaults();
    let angles = curl_trajectory(3, 3.0);
    run_bilateral(&mut engine, &angles, 45.0);

    let status = engine.status();
    assert_eq!(status.left.reps, 3);
    assert_eq!(status.left.correct_reps, 0);
    assert_eq!(status.left.incorrect_reps, 3);
    assert_eq!(
        status.left.last_rep_faults,
        vec![RepFault::TorsoSwing { limit_deg: 30.0 }]
    );
}

#[test]
fn jittery_trajectory_still_counts_cleanly() {
    // Deterministic +/-4 degree alternating jitter on every frame. The
    // dwell requirement absorbs it because each threshold zone is still
    // occupied for several consecutive frames.
    let mut engine = RepEngine::with_defaults();
    let angles: Vec<f64> = curl_trajectory(4, 3.0)
        .iter()
        .enumerate()
        .map(|(i, &a)| if i % 2 == 0 { a + 4.0 } else { a - 4.0 })
        .collect();
    run_bilateral(&mut engine, &angles, 0.0);

    let status = engine.status();
    assert_eq!(status.left.correct_reps, 4);
    assert_eq!(status.left.incorrect_reps, 0);
}

#[test]
fn occlusion_freezes_state_without_losing_the_cycle() {
    let mut engine = RepEngine::with_defaults();
    let angles = curl_trajectory(1, 3.0);
    let blackout = angles.len() / 2; // mid-curl, around the Up position

    for (i, &angle) in angles.iter().enumerate() {
        let mut sample = FrameSample::new(Timestamp::from_secs_f64(i as f64 / FPS))
            .with_right_angle(angle);
        // Left landmarks vanish for a third of a second mid-rep.
        if !(blackout..blackout + 10).contains(&i) {
            sample = sample.with_left_angle(angle);
        }
        engine.update(&sample);
    }

    // Both sides complete the rep: the occluded side resumes from the
    // state it held when the landmarks disappeared.
    let status = engine.status();
    assert_eq!(status.left.reps, 1);
    assert_eq!(status.right.reps, 1);
    assert!(status.left.last_raw_angle.is_some());
}

#[test]
fn partial_curl_never_reaching_up_is_ignored() {
    let mut engine = RepEngine::with_defaults();
    // Extended, shallow dip to 90 degrees, back to extended. Ten frames
    // per segment keeps each candidate past the dwell time.
    let angles: Vec<f64> = [vec![170.0; 10], vec![90.0; 10], vec![170.0; 10]].concat();
    run_bilateral(&mut engine, &angles, 0.0);

    let status = engine.status();
    assert_eq!(status.total_reps, 0);
    assert_eq!(status.left.state, LimbState::Down);
    assert!(status
        .left
        .last_rep_faults
        .contains(&RepFault::IncompleteCycle));
}

#[test]
fn asymmetric_session_reports_per_side_counts() {
    let mut engine = RepEngine::with_defaults();
    let left = curl_trajectory(4, 3.0);
    // Right arm curls at half the cadence, finishing two reps in the
    // same wall-clock span.
    let right = curl_trajectory(2, 6.0);

    for i in 0..left.len().min(right.len()) {
        let sample = FrameSample::new(Timestamp::from_secs_f64(i as f64 / FPS))
            .with_left_angle(left[i])
            .with_right_angle(right[i]);
        engine.update(&sample);
    }

    let status = engine.status();
    assert_eq!(status.left.reps, 4);
    assert_eq!(status.right.reps, 2);
    assert_eq!(status.total_reps, 6);
    assert_eq!(status.limb(LimbSide::Left).reps, 4);
    assert_eq!(status.limb(LimbSide::Right).reps, 2);
}

#[test]
fn custom_thresholds_change_the_counting_geometry() {
    // Narrow the Up zone so the 40-170 sinusoid never reaches it.
    let config = EngineConfig {
        up_angle_deg: 30.0,
        ..EngineConfig::default()
    };
    let mut engine = RepEngine::new(config).unwrap();
    let angles = curl_trajectory(3, 3.0);
    run_bilateral(&mut engine, &angles, 0.0);

    let status = engine.status();
    assert_eq!(status.total_reps, 0);
    assert!(status
        .left
        .last_rep_faults
        .contains(&RepFault::IncompleteCycle));
}

#[test]
fn reset_mid_session_starts_from_scratch() {
    let mut engine = RepEngine::with_defaults();
    let session_before = engine.session_id();

    let angles = curl_trajectory(2, 3.0);
    run_bilateral(&mut engine, &angles, 0.0);
    assert_eq!(engine.status().total_reps, 4);

    engine.reset();
    assert_ne!(engine.session_id(), session_before);
    assert_eq!(engine.status().total_reps, 0);
    assert!(!engine.status().is_active);

    // A fresh session counts normally again.
    run_bilateral(&mut engine, &angles, 0.0);
    assert_eq!(engine.status().total_reps, 4);
}

#[test]
fn smoothed_angle_lags_but_tracks_the_raw_signal() {
    let mut engine = RepEngine::with_defaults();
    let mut angles = curl_trajectory(1, 3.0);
    // Settle in the extended position after the rep so the smoothing
    // window refills following the end-of-cycle clear.
    angles.extend(std::iter::repeat(170.0).take(15));
    run_bilateral(&mut engine, &angles, 0.0);

    let snap = engine.status();
    let raw = snap.left.last_raw_angle.unwrap();
    let smoothed = snap.left.smoothed_angle.unwrap();
    assert!(raw > 160.0);
    assert!(smoothed <= raw);
    assert!(smoothed > 160.0);
}
