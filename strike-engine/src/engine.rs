use std::collections::HashMap;
use std::sync::Arc;

use log::{debug, info, warn};
use strike_core::clock::{SECONDS_PER_DAY, SECONDS_PER_WEEK};
use strike_core::{
    AccountId, Clock, EngineError, EngineEvent, LockId, OptionId, OptionRecord, OptionState,
    OptionType,
};

use crate::fees::FeeRouter;
use crate::governance::GovernanceGuard;
use crate::ledger::OptionsLedger;
use crate::oracle::PriceOracleAdapter;
use crate::traits::{ApprovalRegistry, CollateralPool, PoolPayout, PriceCalculator};

/// Shortest option period accepted at creation, inclusive
pub const MIN_OPTION_PERIOD: u64 = SECONDS_PER_DAY;

/// Longest option period accepted at creation, inclusive
pub const MAX_OPTION_PERIOD: u64 = 12 * SECONDS_PER_WEEK;

/// The option lifecycle controller
///
/// Owns the options ledger and coordinates creation, exercise and unlock
/// with the injected collaborators: one collateral pool per option type,
/// a price calculator behind the oracle adapter, and an approval
/// registry. Administrative operations are gated by the governance guard.
///
/// Every operation either completes entirely or leaves no observable
/// state change. At exercise and unlock the option's state flips to its
/// terminal value before the outbound pool calls, so a reentrant call
/// during settlement sees the terminal state; if the pool rejects, the
/// previous state is restored before the error propagates.
pub struct OptionsEngine {
    ledger: OptionsLedger,
    guard: GovernanceGuard,
    fee_router: FeeRouter,
    price_oracle: PriceOracleAdapter,
    pools: HashMap<OptionType, Arc<dyn CollateralPool>>,
    approvals: Arc<dyn ApprovalRegistry>,
    clock: Arc<dyn Clock>,
    events: Vec<EngineEvent>,
}

impl OptionsEngine {
    /// Create an engine wired to its collaborators
    ///
    /// The beta window for `transfer_pools_ownership` starts at the
    /// clock's current time. The settlement-fee recipients default to the
    /// pools' staking collaborators; the price calculator starts unset.
    pub fn new(
        owner: AccountId,
        put_pool: Arc<dyn CollateralPool>,
        call_pool: Arc<dyn CollateralPool>,
        put_fee_recipient: AccountId,
        call_fee_recipient: AccountId,
        approvals: Arc<dyn ApprovalRegistry>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let deployed_at = clock.now();
        let mut pools: HashMap<OptionType, Arc<dyn CollateralPool>> = HashMap::new();
        pools.insert(OptionType::Put, put_pool);
        pools.insert(OptionType::Call, call_pool);

        Self {
            ledger: OptionsLedger::new(),
            guard: GovernanceGuard::new(owner, deployed_at),
            fee_router: FeeRouter::new(put_fee_recipient, call_fee_recipient),
            price_oracle: PriceOracleAdapter::unset(),
            pools,
            approvals,
            clock,
            events: Vec::new(),
        }
    }

    // ---- Read surface ----

    /// The engine owner
    pub fn owner(&self) -> AccountId {
        self.guard.owner()
    }

    /// The pool backing the given option type
    pub fn pool(&self, option_type: OptionType) -> Result<AccountId, EngineError> {
        Ok(self.pool_for(option_type)?.address())
    }

    /// The asset custodied by the pool backing the given option type
    pub fn token(&self, option_type: OptionType) -> Result<AccountId, EngineError> {
        Ok(self.pool_for(option_type)?.asset())
    }

    /// The settlement-fee recipient for the given option type
    pub fn settlement_fee_recipient(&self, option_type: OptionType) -> AccountId {
        self.fee_router.recipient(option_type)
    }

    /// The configured price calculator's identity, or the zero identity
    /// when unset
    pub fn price_calculator(&self) -> AccountId {
        self.price_oracle.address()
    }

    /// The option record with the given id, if one was ever created
    pub fn option(&self, id: OptionId) -> Option<&OptionRecord> {
        self.ledger.get(id)
    }

    /// State of the option with the given id; `Inactive` for an id that
    /// was never created
    pub fn state_of(&self, id: OptionId) -> OptionState {
        self.ledger.state_of(id)
    }

    /// Number of options ever created
    pub fn option_count(&self) -> usize {
        self.ledger.len()
    }

    /// Events emitted so far, in order
    pub fn events(&self) -> &[EngineEvent] {
        &self.events
    }

    /// Take all emitted events, leaving the log empty
    pub fn drain_events(&mut self) -> Vec<EngineEvent> {
        std::mem::take(&mut self.events)
    }

    // ---- Lifecycle operations ----

    /// Create an option for `holder`
    ///
    /// Open to any caller; validity is the only restriction. Validates
    /// the period bounds and the option-type selector, resolves a zero
    /// strike to the current spot price, locks pool collateral sized by
    /// the price calculator's breakdown, and stores the new record in the
    /// Active state.
    ///
    /// # Parameters
    /// * `holder` - The identity authorized to exercise the option
    /// * `period` - Requested lifetime in seconds
    /// * `amount` - Quantity of underlying, must be positive
    /// * `strike` - Strike price; 0 resolves to the current spot price
    /// * `option_type` - Pool selector (1 = Put, 2 = Call)
    ///
    /// # Returns
    /// The id of the new option
    pub fn create_for(
        &mut self,
        holder: AccountId,
        period: u64,
        amount: u64,
        strike: u64,
        option_type: u8,
    ) -> Result<OptionId, EngineError> {
        if period < MIN_OPTION_PERIOD {
            return Err(EngineError::Timing("Period is too short".to_string()));
        }
        if period > MAX_OPTION_PERIOD {
            return Err(EngineError::Timing("Period is too long".to_string()));
        }
        let option_type = OptionType::from_selector(option_type)
            .ok_or_else(|| EngineError::Validation("Wrong option type".to_string()))?;
        if amount == 0 {
            return Err(EngineError::Validation(
                "Amount must be greater than zero".to_string(),
            ));
        }

        let calculator = self.price_oracle.get()?;
        let strike = if strike == 0 {
            calculator.spot_price()?
        } else {
            strike
        };
        if strike == 0 {
            return Err(EngineError::Validation(
                "Strike must be greater than zero".to_string(),
            ));
        }

        let breakdown = calculator.total_fees(period, amount, strike, option_type)?;
        let pool = self.pool_for(option_type)?;
        let lock_id = pool.lock_collateral(
            breakdown.collateral,
            breakdown.premium,
            breakdown.settlement_fee,
        )?;

        let expiration = self.clock.now().saturating_add(period);
        let id = self.ledger.insert(OptionRecord::new(
            0,
            holder,
            strike,
            amount,
            option_type,
            expiration,
            lock_id,
        ));

        debug!(
            "created option {} for {} ({:?}, strike {}, amount {}, expires {})",
            id, holder, option_type, strike, amount, expiration
        );
        self.events.push(EngineEvent::Create {
            id,
            holder,
            settlement_fee: breakdown.settlement_fee,
            premium: breakdown.premium,
        });
        Ok(id)
    }

    /// Exercise an active option before its expiration
    ///
    /// Only the holder or an identity the holder approved may exercise.
    /// Pays the intrinsic value, capped by the locked collateral, to the
    /// holder and routes the lock's settlement fee to the configured
    /// recipient, in a single indivisible pool settlement that also
    /// releases the remaining locked funds; rolling back the state flip
    /// on a rejected settlement therefore never strands a partial payout.
    ///
    /// # Returns
    /// The profit paid to the holder
    pub fn exercise(&mut self, caller: &AccountId, id: OptionId) -> Result<u64, EngineError> {
        // Missing ids behave like the default record: zero holder, zero
        // expiration, Inactive state.
        let now = self.clock.now();
        let (holder, expired, state, option_type, lock_id) = self.snapshot(id, now);

        if *caller != holder && !self.approvals.is_approved(&holder, caller) {
            return Err(EngineError::Authorization(
                "caller can't exercise this option".to_string(),
            ));
        }
        if expired {
            return Err(EngineError::Timing("Option has expired".to_string()));
        }
        if state != OptionState::Active {
            return Err(EngineError::State("Wrong state".to_string()));
        }

        let spot = self.price_oracle.get()?.spot_price()?;
        let pool = self.pool_for(option_type)?.clone();
        let locked = pool.locked_liquidity(lock_id)?;
        let profit = self
            .ledger
            .get(id)
            .map(|r| r.intrinsic_value(spot))
            .unwrap_or(0)
            .min(locked.collateral);

        let mut payouts = Vec::new();
        if profit > 0 {
            payouts.push(PoolPayout {
                recipient: holder,
                amount: profit,
            });
        }
        if locked.settlement_fee > 0 {
            payouts.push(PoolPayout {
                recipient: self.fee_router.recipient(option_type),
                amount: locked.settlement_fee,
            });
        }

        self.set_state(id, OptionState::Exercised);
        if let Err(err) = pool.settle(lock_id, &payouts) {
            warn!("exercise of option {} failed in pool, rolling back: {}", id, err);
            self.set_state(id, OptionState::Active);
            return Err(err);
        }

        debug!("option {} exercised for a profit of {}", id, profit);
        self.events.push(EngineEvent::Exercise { id, profit });
        Ok(profit)
    }

    /// Unlock an expired option, returning its collateral to the pool
    ///
    /// Housekeeping operation, callable by anyone once the option's
    /// expiration has passed. The holder receives nothing.
    pub fn unlock(&mut self, id: OptionId) -> Result<(), EngineError> {
        let now = self.clock.now();
        let (_, expired, state, option_type, lock_id) = self.snapshot(id, now);

        if !expired {
            return Err(EngineError::Timing(
                "Option has not expired yet".to_string(),
            ));
        }
        if state != OptionState::Active {
            return Err(EngineError::State("Option is not active".to_string()));
        }

        let pool = self.pool_for(option_type)?.clone();

        self.set_state(id, OptionState::Expired);
        if let Err(err) = pool.release_collateral(lock_id) {
            warn!("unlock of option {} failed in pool, rolling back: {}", id, err);
            self.set_state(id, OptionState::Active);
            return Err(err);
        }

        debug!("option {} expired, collateral unlocked", id);
        self.events.push(EngineEvent::Expire { id });
        Ok(())
    }

    // ---- Administrative operations ----

    /// Replace both settlement-fee recipients atomically
    ///
    /// Owner only; both recipients must be non-zero identities.
    pub fn update_settlement_fee_recipients(
        &mut self,
        caller: &AccountId,
        put_recipient: AccountId,
        call_recipient: AccountId,
    ) -> Result<(), EngineError> {
        self.guard.ensure_owner(caller)?;
        if put_recipient.is_zero() {
            return Err(EngineError::Validation(
                "Invalid put settlement fee recipient".to_string(),
            ));
        }
        if call_recipient.is_zero() {
            return Err(EngineError::Validation(
                "Invalid call settlement fee recipient".to_string(),
            ));
        }

        self.fee_router.update(put_recipient, call_recipient);
        info!(
            "settlement fee recipients updated (put {}, call {})",
            put_recipient, call_recipient
        );
        Ok(())
    }

    /// Replace the configured price calculator
    ///
    /// Owner only; the new calculator is not validated beyond that.
    pub fn update_price_calculator(
        &mut self,
        caller: &AccountId,
        calculator: Arc<dyn PriceCalculator>,
    ) -> Result<(), EngineError> {
        self.guard.ensure_owner(caller)?;
        info!("price calculator updated to {}", calculator.address());
        self.price_oracle.set(calculator);
        Ok(())
    }

    /// Transfer custody of every configured pool to the engine owner
    ///
    /// Owner only, and only while the beta window measured from engine
    /// construction is still open. Once the window elapses this fails for
    /// every caller, the owner included.
    pub fn transfer_pools_ownership(&mut self, caller: &AccountId) -> Result<(), EngineError> {
        // The window check dominates: once the beta period has elapsed the
        // capability is gone for every caller, the owner included.
        self.guard.ensure_within_beta(self.clock.now())?;
        self.guard.ensure_owner(caller)?;

        let owner = self.guard.owner();
        for pool in self.pools.values() {
            pool.transfer_custody(&owner)?;
        }
        info!("pool custody transferred to {}", owner);
        Ok(())
    }

    // ---- Internals ----

    fn pool_for(&self, option_type: OptionType) -> Result<&Arc<dyn CollateralPool>, EngineError> {
        self.pools
            .get(&option_type)
            .ok_or_else(|| EngineError::Pool(format!("no pool configured for {:?}", option_type)))
    }

    /// Snapshot of the fields the lifecycle guards need, with the default
    /// record's values for an id that was never created (a missing record
    /// has expiration 0, so it always reads as expired)
    fn snapshot(&self, id: OptionId, now: u64) -> (AccountId, bool, OptionState, OptionType, LockId) {
        match self.ledger.get(id) {
            Some(r) => (
                r.holder,
                r.has_expired(now),
                r.state,
                r.option_type,
                r.locked_liquidity_id,
            ),
            None => (
                AccountId::zero(),
                true,
                OptionState::Inactive,
                OptionType::Put,
                0,
            ),
        }
    }

    fn set_state(&mut self, id: OptionId, state: OptionState) {
        if let Some(record) = self.ledger.get_mut(id) {
            record.state = state;
        }
    }
}
