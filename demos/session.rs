// demos/session.rs
// Run with:
//   cargo run --example session -- [config.json]
//
// Headless walk through one visit: welcome-back payout, a purchase attempt,
// a small upgrade, then the closing save.

use park_idle::mechanics::format_money;
use park_idle::{GameConfig, ProgressionError, RideStatus, SystemClock};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = match std::env::args().nth(1) {
        Some(path) => GameConfig::from_path(path)?,
        None => GameConfig::default(),
    };
    let mut session = cfg.open_session(SystemClock)?;

    let welcome = session.apply_accrual()?;
    let e = welcome.elapsed;
    println!("Money gained: {}", format_money(welcome.earned));
    println!("Away for {}d {}h {}m {}s", e.days, e.hours, e.minutes, e.seconds);

    for view in session.rides() {
        let n = view.index + 1;
        match view.status {
            RideStatus::Unlocked { level } => println!("{n} - {} (lv. {level})", view.ride.name),
            RideStatus::Locked => println!("{n} - {} (LOCKED)", view.ride.name),
        }
    }

    match session.purchase_next_ride() {
        Ok(p) => println!("Bought ride {} for {}", p.index + 1, format_money(p.price)),
        Err(ProgressionError::InsufficientFunds { needed, .. }) => {
            println!("Next ride costs {}", format_money(needed))
        }
        Err(ProgressionError::AllRidesUnlocked) => println!("Park complete"),
        Err(other) => return Err(other.into()),
    }

    match session.upgrade_ride(0, 1) {
        Ok(u) => println!("Upgraded to level {} for {}", u.to_level, format_money(u.cost)),
        Err(ProgressionError::InsufficientFunds { needed, .. }) => {
            println!("Next upgrade costs {}", format_money(needed))
        }
        Err(other) => return Err(other.into()),
    }

    let (_, _, state) = session.close()?;
    println!("Balance: {}", format_money(state.balance));
    Ok(())
}
