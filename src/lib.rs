/*!
`park_idle`: progression and economy engine for an idle theme-park game.

What it does
- Keeps a persisted [`GameState`] (balance, ride levels, last-played time).
- Credits an offline payout for real time away, damped logarithmically in
  time and with a level multiplier that flattens past level 10.
- Sells ride unlocks in catalogue order and ride upgrades on an exponential
  cost curve, each as an all-or-nothing transaction.

How to use (call surface only)
- Build an [`Economy`] from a [`RideCatalog`] and [`Tuning`] (or take
  [`GameConfig::default`]).
- Open a [`Session`] on a [`StateStore`] ([`JsonFileStore`] on disk,
  [`MemoryStore`] in tests). The session loads once.
- Call `apply_accrual` for the welcome-back payout, then
  `purchase_next_ride` / `upgrade_ride(index, count)` as the player
  chooses; `save` at checkpoints and `close` on exit.

What it does NOT do
- No menus, prompts or printing; a front end renders the returned values
  (see [`mechanics::format_money`]).
- No background ticking; accrual is computed lazily from elapsed time.

Features
- `sim-pacing` (default): [`pacing`], a seeded greedy-player simulation for
  checking how long each unlock takes.
*/

pub mod catalog;
pub mod config;
pub mod economy;
pub mod error;
pub mod mechanics;
#[cfg(feature = "sim-pacing")]
pub mod pacing;
pub mod progression;
pub mod state;
pub mod store;

pub use catalog::{RideCatalog, RideDefinition, Tuning};
pub use config::GameConfig;
pub use economy::{Economy, RideEarnings};
pub use error::{CatalogError, ConfigError, ProgressionError, StorageError};
pub use progression::{
    AccrualReport, ElapsedBreakdown, Purchase, RideStatus, RideView, Session, Upgrade,
};
pub use state::GameState;
pub use store::{
    Clock, CorruptSavePolicy, JsonFileStore, ManualClock, MemoryStore, StateStore, SystemClock,
};
