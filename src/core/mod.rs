//! Ledger state ownership and the pure computations layered over it.

pub mod clock;
pub mod ids;
pub mod ledger_manager;
pub mod services;

pub use clock::{Clock, FixedClock, SystemClock};
pub use ledger_manager::{LedgerManager, LoadMetadata};
