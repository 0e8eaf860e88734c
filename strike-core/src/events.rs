use crate::id::AccountId;
use crate::options::OptionId;
use serde::{Deserialize, Serialize};

/// Notifications emitted by the engine, one per successful lifecycle
/// transition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineEvent {
    /// A new option was created
    Create {
        /// Identifier of the new option
        id: OptionId,
        /// The holder the option was created for
        holder: AccountId,
        /// Settlement fee computed at creation
        settlement_fee: u64,
        /// Premium computed at creation
        premium: u64,
    },

    /// An active option was exercised before expiration
    Exercise {
        /// Identifier of the exercised option
        id: OptionId,
        /// Profit paid out to the holder
        profit: u64,
    },

    /// An active option expired worthless and its collateral was unlocked
    Expire {
        /// Identifier of the expired option
        id: OptionId,
    },
}

impl EngineEvent {
    /// The option id this event refers to
    pub fn option_id(&self) -> OptionId {
        match self {
            EngineEvent::Create { id, .. }
            | EngineEvent::Exercise { id, .. }
            | EngineEvent::Expire { id } => *id,
        }
    }
}
