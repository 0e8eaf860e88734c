use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use strike_core::{AccountId, EngineError, LockId, OptionType};

use crate::traits::{
    ApprovalRegistry, CollateralPool, FeeBreakdown, LockedLiquidity, PoolPayout, PriceCalculator,
};

/// A locked-liquidity entry held by the mock pool
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockEntry {
    /// Collateral backing the option
    pub collateral: u64,
    /// Premium locked alongside the collateral
    pub premium: u64,
    /// Settlement fee held for routing at exercise
    pub settlement_fee: u64,
    /// Whether the entry has been released back to the pool
    pub released: bool,
    /// Total already paid out of this entry
    pub paid_out: u64,
}

impl LockEntry {
    fn available(&self) -> u64 {
        self.collateral
            .saturating_add(self.premium)
            .saturating_add(self.settlement_fee)
            .saturating_sub(self.paid_out)
    }
}

/// A payout recorded by the mock pool
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Payout {
    /// The locked-liquidity entry the payout was drawn from
    pub lock_id: LockId,
    /// The identity that was paid
    pub recipient: AccountId,
    /// Quantity paid
    pub amount: u64,
}

struct PoolState {
    owner: AccountId,
    next_lock: LockId,
    locks: HashMap<LockId, LockEntry>,
    payouts: Vec<Payout>,
    fail_settlements: bool,
}

/// Mock implementation of the CollateralPool trait for testing purposes
///
/// Keeps its locked-liquidity ledger and payout log in memory so tests
/// can drive the engine without a host ledger and inspect every
/// externally observable pool effect afterwards.
pub struct MockPool {
    address: AccountId,
    asset: AccountId,
    state: Mutex<PoolState>,
}

impl MockPool {
    /// Create a pool custodying `asset`, initially owned by `owner`
    pub fn new(address: AccountId, asset: AccountId, owner: AccountId) -> Self {
        Self {
            address,
            asset,
            state: Mutex::new(PoolState {
                owner,
                next_lock: 0,
                locks: HashMap::new(),
                payouts: Vec::new(),
                fail_settlements: false,
            }),
        }
    }

    /// Snapshot of a locked-liquidity entry, if it exists
    pub fn lock(&self, lock_id: LockId) -> Option<LockEntry> {
        self.state
            .lock()
            .expect("mock pool state poisoned")
            .locks
            .get(&lock_id)
            .copied()
    }

    /// Number of locks ever created
    pub fn lock_count(&self) -> usize {
        self.state
            .lock()
            .expect("mock pool state poisoned")
            .locks
            .len()
    }

    /// All payouts the pool has performed, in order
    pub fn payouts(&self) -> Vec<Payout> {
        self.state
            .lock()
            .expect("mock pool state poisoned")
            .payouts
            .clone()
    }

    /// Make every subsequent settlement request fail
    pub fn set_fail_settlements(&self, fail: bool) {
        self.state
            .lock()
            .expect("mock pool state poisoned")
            .fail_settlements = fail;
    }
}

impl CollateralPool for MockPool {
    fn lock_collateral(
        &self,
        collateral: u64,
        premium: u64,
        settlement_fee: u64,
    ) -> Result<LockId, EngineError> {
        let mut state = self.state.lock().expect("mock pool state poisoned");
        let lock_id = state.next_lock;
        state.next_lock += 1;
        state.locks.insert(
            lock_id,
            LockEntry {
                collateral,
                premium,
                settlement_fee,
                released: false,
                paid_out: 0,
            },
        );
        Ok(lock_id)
    }

    fn release_collateral(&self, lock_id: LockId) -> Result<(), EngineError> {
        let mut state = self.state.lock().expect("mock pool state poisoned");
        let entry = state
            .locks
            .get_mut(&lock_id)
            .ok_or_else(|| EngineError::Pool(format!("unknown lock {}", lock_id)))?;
        if entry.released {
            return Err(EngineError::Pool(format!(
                "lock {} already released",
                lock_id
            )));
        }
        entry.released = true;
        Ok(())
    }

    fn settle(&self, lock_id: LockId, payouts: &[PoolPayout]) -> Result<(), EngineError> {
        let mut state = self.state.lock().expect("mock pool state poisoned");
        if state.fail_settlements {
            return Err(EngineError::Pool("settlement refused".to_string()));
        }
        let entry = state
            .locks
            .get_mut(&lock_id)
            .ok_or_else(|| EngineError::Pool(format!("unknown lock {}", lock_id)))?;
        if entry.released {
            return Err(EngineError::Pool(format!(
                "lock {} already released",
                lock_id
            )));
        }
        let total: u64 = payouts.iter().map(|p| p.amount).sum();
        if total > entry.available() {
            return Err(EngineError::Pool(format!(
                "settlement of {} exceeds locked funds",
                total
            )));
        }

        // All checks passed; apply every effect of the settlement
        entry.paid_out += total;
        entry.released = true;
        for payout in payouts {
            state.payouts.push(Payout {
                lock_id,
                recipient: payout.recipient,
                amount: payout.amount,
            });
        }
        Ok(())
    }

    fn locked_liquidity(&self, lock_id: LockId) -> Result<LockedLiquidity, EngineError> {
        let state = self.state.lock().expect("mock pool state poisoned");
        let entry = state
            .locks
            .get(&lock_id)
            .ok_or_else(|| EngineError::Pool(format!("unknown lock {}", lock_id)))?;
        Ok(LockedLiquidity {
            collateral: entry.collateral,
            premium: entry.premium,
            settlement_fee: entry.settlement_fee,
        })
    }

    fn asset(&self) -> AccountId {
        self.asset
    }

    fn address(&self) -> AccountId {
        self.address
    }

    fn owner(&self) -> AccountId {
        self.state.lock().expect("mock pool state poisoned").owner
    }

    fn transfer_custody(&self, new_owner: &AccountId) -> Result<(), EngineError> {
        let mut state = self.state.lock().expect("mock pool state poisoned");
        state.owner = *new_owner;
        Ok(())
    }
}

struct CalculatorState {
    spot: u64,
    settlement_fee: u64,
    premium: u64,
    collateral_per_unit: u64,
}

/// Mock implementation of the PriceCalculator trait for testing purposes
///
/// Returns a configurable spot price and a flat fee breakdown with
/// collateral sized proportionally to the option amount; fees default to
/// zero.
pub struct MockPriceCalculator {
    address: AccountId,
    state: Mutex<CalculatorState>,
}

impl MockPriceCalculator {
    /// Create a calculator reporting the given spot price
    pub fn new(address: AccountId, spot: u64) -> Self {
        Self {
            address,
            state: Mutex::new(CalculatorState {
                spot,
                settlement_fee: 0,
                premium: 0,
                collateral_per_unit: 1,
            }),
        }
    }

    /// Change the reported spot price
    pub fn set_spot(&self, spot: u64) {
        self.state
            .lock()
            .expect("mock calculator state poisoned")
            .spot = spot;
    }

    /// Change the flat settlement fee and premium figures
    pub fn set_fees(&self, settlement_fee: u64, premium: u64) {
        let mut state = self.state.lock().expect("mock calculator state poisoned");
        state.settlement_fee = settlement_fee;
        state.premium = premium;
    }

    /// Change how much collateral backs each unit of amount
    pub fn set_collateral_per_unit(&self, collateral_per_unit: u64) {
        self.state
            .lock()
            .expect("mock calculator state poisoned")
            .collateral_per_unit = collateral_per_unit;
    }
}

impl PriceCalculator for MockPriceCalculator {
    fn spot_price(&self) -> Result<u64, EngineError> {
        Ok(self
            .state
            .lock()
            .expect("mock calculator state poisoned")
            .spot)
    }

    fn total_fees(
        &self,
        _period: u64,
        amount: u64,
        _strike: u64,
        _option_type: OptionType,
    ) -> Result<FeeBreakdown, EngineError> {
        let state = self.state.lock().expect("mock calculator state poisoned");
        Ok(FeeBreakdown {
            settlement_fee: state.settlement_fee,
            premium: state.premium,
            collateral: amount.saturating_mul(state.collateral_per_unit),
        })
    }

    fn address(&self) -> AccountId {
        self.address
    }
}

/// Mock implementation of the ApprovalRegistry trait for testing purposes
#[derive(Default)]
pub struct MockApprovalRegistry {
    approvals: Mutex<HashSet<(AccountId, AccountId)>>,
}

impl MockApprovalRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `operator` may act for `holder`
    pub fn approve(&self, holder: AccountId, operator: AccountId) {
        self.approvals
            .lock()
            .expect("mock approvals poisoned")
            .insert((holder, operator));
    }

    /// Remove a delegation
    pub fn revoke(&self, holder: AccountId, operator: AccountId) {
        self.approvals
            .lock()
            .expect("mock approvals poisoned")
            .remove(&(holder, operator));
    }
}

impl ApprovalRegistry for MockApprovalRegistry {
    fn is_approved(&self, holder: &AccountId, operator: &AccountId) -> bool {
        self.approvals
            .lock()
            .expect("mock approvals poisoned")
            .contains(&(*holder, *operator))
    }
}
