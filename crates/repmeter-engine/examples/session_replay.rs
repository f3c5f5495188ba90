//! Replay a simulated 30 fps curl session and print the running status.
//!
//! Run with:
//!
//! ```sh
//! cargo run -p repmeter-engine --example session_replay
//! ```

use std::f64::consts::PI;

use repmeter_core::{FrameSample, Timestamp};
use repmeter_engine::RepEngine;

const FPS: f64 = 30.0;
const PERIOD_SECS: f64 = 3.0;
const REPS: usize = 5;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "repmeter_engine=debug".into()),
        )
        .init();

    let mut engine = RepEngine::with_defaults();
    println!("session {}", engine.session_id());

    let frames = (REPS as f64 * PERIOD_SECS * FPS) as usize;
    for i in 0..frames {
        let t = i as f64 / FPS;
        // Both arms curl in phase between 40 and 170 degrees.
        let angle = 105.0 + 65.0 * (2.0 * PI * t / PERIOD_SECS).cos();
        // Mild torso sway that stays under the violation limit.
        let torso = 8.0 * (2.0 * PI * t / PERIOD_SECS).sin().abs();

        let sample = FrameSample::new(Timestamp::from_secs_f64(t))
            .with_left_angle(angle)
            .with_right_angle(angle)
            .with_torso_angles(torso, torso);
        let status = engine.update(&sample);

        if i % 30 == 0 {
            println!(
                "t={t:5.1}s  left: {:?} ({} reps)  right: {:?} ({} reps)  total: {}",
                status.left.state, status.left.reps, status.right.state, status.right.reps,
                status.total_reps,
            );
        }
    }

    let status = engine.status();
    println!(
        "\nfinished: {} reps ({} correct, {} incorrect), max torso sway {:.1} deg",
        status.total_reps,
        status.total_correct(),
        status.total_incorrect(),
        status.left.max_torso_angle.max(status.right.max_torso_angle),
    );
}
