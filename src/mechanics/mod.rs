//! Formula primitives. Each function is pure and takes its constants
//! explicitly; `economy` wires them to a catalogue and [`crate::Tuning`].

pub mod accrual;
pub mod cost;
pub mod money;
#[cfg(feature = "sim-pacing")]
pub mod stoch;

pub use accrual::*;
pub use cost::*;
pub use money::*;
