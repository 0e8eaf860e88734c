//! Option lifecycle state machine and governance guard.
//!
//! The engine coordinates an [`OptionsLedger`] of option records with
//! injected collaborators: per-type collateral pools, a price calculator
//! and an approval registry. All temporal logic runs against an injected
//! clock so it can be driven deterministically in tests.

pub mod engine;
pub mod fees;
pub mod governance;
pub mod ledger;
pub mod mocks;
pub mod oracle;
pub mod traits;

// Re-export the main types for convenience
pub use engine::{OptionsEngine, MAX_OPTION_PERIOD, MIN_OPTION_PERIOD};
pub use fees::FeeRouter;
pub use governance::{GovernanceGuard, BETA_WINDOW};
pub use ledger::OptionsLedger;
pub use mocks::{MockApprovalRegistry, MockPool, MockPriceCalculator};
pub use oracle::PriceOracleAdapter;
pub use traits::{
    ApprovalRegistry, CollateralPool, FeeBreakdown, LockedLiquidity, PoolPayout, PriceCalculator,
};
