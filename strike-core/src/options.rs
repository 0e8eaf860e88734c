use crate::id::AccountId;
use serde::{Deserialize, Serialize};

/// Sequential identifier of an option record, assigned at creation and
/// never reused
pub type OptionId = u64;

/// Opaque reference into a collateral pool's locked-liquidity ledger
pub type LockId = u64;

/// The side of an option contract
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OptionType {
    /// Right to sell the underlying at the strike price; backed by the
    /// stable-asset pool
    Put,

    /// Right to buy the underlying at the strike price; backed by the
    /// underlying-asset pool
    Call,
}

impl OptionType {
    /// Numeric pool selector used on the public surface (1 = Put, 2 = Call)
    pub fn selector(&self) -> u8 {
        match self {
            OptionType::Put => 1,
            OptionType::Call => 2,
        }
    }

    /// Decode a pool selector; anything other than 1 or 2 is not a valid
    /// option type
    pub fn from_selector(selector: u8) -> Option<Self> {
        match selector {
            1 => Some(OptionType::Put),
            2 => Some(OptionType::Call),
            _ => None,
        }
    }
}

/// Lifecycle state of an option
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum OptionState {
    /// Default state reported for an id that was never created. No stored
    /// record ever carries this state.
    #[default]
    Inactive,

    /// Live option, may be exercised before expiration
    Active,

    /// Terminal state after a successful exercise
    Exercised,

    /// Terminal state after the option expired worthless and its
    /// collateral was unlocked
    Expired,
}

impl OptionState {
    /// Numeric state code used on the public surface
    pub fn code(&self) -> u8 {
        match self {
            OptionState::Inactive => 0,
            OptionState::Active => 1,
            OptionState::Exercised => 2,
            OptionState::Expired => 3,
        }
    }

    /// Whether the state admits no further transitions
    pub fn is_terminal(&self) -> bool {
        matches!(self, OptionState::Exercised | OptionState::Expired)
    }
}

/// An option record stored in the ledger
///
/// Every field other than `state` is immutable after creation; `state`
/// moves forward along exactly one of Active -> Exercised or
/// Active -> Expired.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OptionRecord {
    /// Sequential identifier, unique across the engine's lifetime
    pub id: OptionId,

    /// The identity authorized to exercise this option
    pub holder: AccountId,

    /// Fixed-point reference price used to compute exercise profit
    pub strike: u64,

    /// Quantity of underlying the option covers
    pub amount: u64,

    /// Put or Call; selects the backing pool and fee recipient
    pub option_type: OptionType,

    /// Unix timestamp after which the option can no longer be exercised
    pub expiration: u64,

    /// Current lifecycle state
    pub state: OptionState,

    /// Reference into the backing pool's locked-collateral ledger
    pub locked_liquidity_id: LockId,
}

impl OptionRecord {
    /// Create a new active option record
    pub fn new(
        id: OptionId,
        holder: AccountId,
        strike: u64,
        amount: u64,
        option_type: OptionType,
        expiration: u64,
        locked_liquidity_id: LockId,
    ) -> Self {
        Self {
            id,
            holder,
            strike,
            amount,
            option_type,
            expiration,
            state: OptionState::Active,
            locked_liquidity_id,
        }
    }

    /// Get the option ID
    pub fn id(&self) -> OptionId {
        self.id
    }

    /// Get the holder
    pub fn holder(&self) -> &AccountId {
        &self.holder
    }

    /// Check if the option is still active
    pub fn is_active(&self) -> bool {
        self.state == OptionState::Active
    }

    /// Check if the option has expired at the given time
    pub fn has_expired(&self, now: u64) -> bool {
        now >= self.expiration
    }

    /// Intrinsic value of the option at the given spot price, uncapped.
    ///
    /// Calls pay `max(spot - strike, 0) * amount`, puts pay
    /// `max(strike - spot, 0) * amount`.
    pub fn intrinsic_value(&self, spot: u64) -> u64 {
        let per_unit = match self.option_type {
            OptionType::Call => spot.saturating_sub(self.strike),
            OptionType::Put => self.strike.saturating_sub(spot),
        };
        per_unit.saturating_mul(self.amount)
    }
}
