//! Strike on-ledger options engine
//!
//! This crate re-exports all the components of the Strike system.

pub use strike_core::*;
pub use strike_engine::*;
