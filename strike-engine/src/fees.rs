use std::collections::HashMap;
use strike_core::{AccountId, OptionType};

/// Mapping from pool type to settlement-fee recipient
///
/// Constructed with the pools' staking collaborators as the default
/// recipients. All mutation goes through the governance guard; the router
/// itself performs no authorization.
#[derive(Debug, Clone)]
pub struct FeeRouter {
    recipients: HashMap<OptionType, AccountId>,
}

impl FeeRouter {
    /// Create a router with the initial recipients for both pool types
    pub fn new(put_recipient: AccountId, call_recipient: AccountId) -> Self {
        let mut recipients = HashMap::new();
        recipients.insert(OptionType::Put, put_recipient);
        recipients.insert(OptionType::Call, call_recipient);
        Self { recipients }
    }

    /// The settlement-fee recipient for the given pool type
    pub fn recipient(&self, option_type: OptionType) -> AccountId {
        self.recipients
            .get(&option_type)
            .copied()
            .unwrap_or_default()
    }

    /// Replace both recipients at once
    pub fn update(&mut self, put_recipient: AccountId, call_recipient: AccountId) {
        self.recipients.insert(OptionType::Put, put_recipient);
        self.recipients.insert(OptionType::Call, call_recipient);
    }
}
