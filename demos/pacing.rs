// demos/pacing.rs
// Run with:
//   cargo run --example pacing --features sim-pacing

use park_idle::Economy;
use park_idle::pacing::{PacingConfig, simulate_pacing};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let economy = Economy::default();

    for mean in [30.0, 120.0, 480.0] {
        let cfg = PacingConfig { mean_afk_minutes: mean, ..PacingConfig::default() };
        let report = simulate_pacing(&economy, cfg)?;

        println!("== check-in every ~{mean} min ({} sessions) ==", report.sessions);
        for m in &report.milestones {
            match m.unlocked_after_minutes {
                Some(t) => println!("{:<15} {:>8.1} h", m.name, t / 60.0),
                None => println!("{:<15} never", m.name),
            }
        }
        println!("final levels {:?}", report.final_state.ride_levels);
    }
    Ok(())
}
