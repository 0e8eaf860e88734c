use serde::{Deserialize, Serialize};
use strike_core::{AccountId, EngineError, LockId, OptionType};

/// Fee and collateral breakdown returned by a price calculator at
/// creation time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct FeeBreakdown {
    /// Fee routed to the settlement fee recipient when the option is
    /// exercised
    pub settlement_fee: u64,

    /// Premium paid into the pool for writing the option
    pub premium: u64,

    /// Quantity of pool collateral that must back the option
    pub collateral: u64,
}

/// A single payout a pool performs as part of a settlement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolPayout {
    /// The identity to pay
    pub recipient: AccountId,

    /// Quantity to pay out
    pub amount: u64,
}

/// A locked-liquidity entry as reported by a collateral pool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockedLiquidity {
    /// Collateral backing the option
    pub collateral: u64,

    /// Premium locked alongside the collateral
    pub premium: u64,

    /// Settlement fee held for routing at exercise
    pub settlement_fee: u64,
}

/// External custodian of collateral backing options of one pool type
///
/// Implementations use interior mutability; the engine only ever holds a
/// shared reference. Every method is an externally observable request, so
/// the engine sequences its own state changes around these calls to keep
/// failed operations free of partial effects.
pub trait CollateralPool: Send + Sync {
    /// Lock collateral to back a newly created option
    ///
    /// # Parameters
    /// * `collateral` - Quantity of pool collateral to lock
    /// * `premium` - Premium paid for the option
    /// * `settlement_fee` - Fee to hold for routing at exercise
    ///
    /// # Returns
    /// The identifier of the new locked-liquidity entry
    fn lock_collateral(
        &self,
        collateral: u64,
        premium: u64,
        settlement_fee: u64,
    ) -> Result<LockId, EngineError>;

    /// Release a locked-liquidity entry back to the pool
    ///
    /// Any funds not already paid out return to the pool's free
    /// liquidity.
    ///
    /// # Parameters
    /// * `lock_id` - The locked-liquidity entry to release
    fn release_collateral(&self, lock_id: LockId) -> Result<(), EngineError>;

    /// Settle a locked-liquidity entry in one indivisible request
    ///
    /// Performs every listed payout and releases the remaining locked
    /// funds back to the pool. The request is all-or-nothing: on an error
    /// no payout has been performed and the entry is still locked.
    ///
    /// # Parameters
    /// * `lock_id` - The locked-liquidity entry to settle
    /// * `payouts` - The payouts to draw from the entry, in order
    fn settle(&self, lock_id: LockId, payouts: &[PoolPayout]) -> Result<(), EngineError>;

    /// Look up a locked-liquidity entry
    ///
    /// # Parameters
    /// * `lock_id` - The entry to look up
    ///
    /// # Returns
    /// The entry's collateral, premium and settlement fee figures
    fn locked_liquidity(&self, lock_id: LockId) -> Result<LockedLiquidity, EngineError>;

    /// The asset this pool custodies
    fn asset(&self) -> AccountId;

    /// The pool's own identity
    fn address(&self) -> AccountId;

    /// The identity that currently has custody of the pool
    fn owner(&self) -> AccountId;

    /// Transfer custody of the pool to a new owner
    ///
    /// # Parameters
    /// * `new_owner` - The identity to hand custody to
    fn transfer_custody(&self, new_owner: &AccountId) -> Result<(), EngineError>;
}

/// Premium and spot-price collaborator
pub trait PriceCalculator: Send + Sync {
    /// Current spot price of the underlying
    fn spot_price(&self) -> Result<u64, EngineError>;

    /// Fee breakdown for writing an option with the given parameters
    ///
    /// # Parameters
    /// * `period` - Requested option lifetime in seconds
    /// * `amount` - Quantity of underlying the option covers
    /// * `strike` - Strike price
    /// * `option_type` - Put or Call
    fn total_fees(
        &self,
        period: u64,
        amount: u64,
        strike: u64,
        option_type: OptionType,
    ) -> Result<FeeBreakdown, EngineError>;

    /// The calculator's own identity
    fn address(&self) -> AccountId;
}

/// Registry of exercise delegations
///
/// A holder may approve another identity to exercise options on its
/// behalf; the registry is the authority on those delegations.
pub trait ApprovalRegistry: Send + Sync {
    /// Whether `operator` may act on behalf of `holder`
    fn is_approved(&self, holder: &AccountId, operator: &AccountId) -> bool;
}
