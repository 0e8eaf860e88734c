use strike_core::clock::SECONDS_PER_DAY;
use strike_core::{AccountId, EngineError};

/// Length of the beta window during which pool custody may be reclaimed,
/// measured from engine construction
pub const BETA_WINDOW: u64 = 90 * SECONDS_PER_DAY;

/// Owner identity plus the time-bounded pool-custody capability
///
/// Every administrative operation on the engine is gated through this
/// guard. The custody transfer is additionally bound to a beta window
/// that starts at construction; once the window elapses the capability is
/// gone for everyone, the owner included.
#[derive(Debug, Clone)]
pub struct GovernanceGuard {
    owner: AccountId,
    deployed_at: u64,
    beta_window: u64,
}

impl GovernanceGuard {
    /// Create a guard owned by `owner`, with the beta window starting at
    /// `deployed_at`
    pub fn new(owner: AccountId, deployed_at: u64) -> Self {
        Self {
            owner,
            deployed_at,
            beta_window: BETA_WINDOW,
        }
    }

    /// Create a guard with a custom beta window length
    pub fn with_beta_window(owner: AccountId, deployed_at: u64, beta_window: u64) -> Self {
        Self {
            owner,
            deployed_at,
            beta_window,
        }
    }

    /// The owner identity
    pub fn owner(&self) -> AccountId {
        self.owner
    }

    /// The instant at which the beta window closes
    pub fn beta_ends_at(&self) -> u64 {
        self.deployed_at.saturating_add(self.beta_window)
    }

    /// Reject callers other than the owner
    pub fn ensure_owner(&self, caller: &AccountId) -> Result<(), EngineError> {
        if *caller != self.owner {
            return Err(EngineError::Authorization(
                "caller is not the owner".to_string(),
            ));
        }
        Ok(())
    }

    /// Reject once the beta window has elapsed
    pub fn ensure_within_beta(&self, now: u64) -> Result<(), EngineError> {
        if now >= self.beta_ends_at() {
            return Err(EngineError::Timing(
                "beta period has ended".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_owner_passes_check() {
        let owner = AccountId::named("owner");
        let guard = GovernanceGuard::new(owner, 0);
        assert!(guard.ensure_owner(&owner).is_ok());
    }

    #[test]
    fn test_non_owner_is_rejected() {
        let guard = GovernanceGuard::new(AccountId::named("owner"), 0);
        let err = guard
            .ensure_owner(&AccountId::named("alice"))
            .expect_err("non-owner must be rejected");
        assert!(err.is_authorization());
        assert_eq!(
            err.to_string(),
            "Authorization error: caller is not the owner"
        );
    }

    #[test]
    fn test_beta_window_boundaries() {
        let guard = GovernanceGuard::new(AccountId::named("owner"), 1_000);

        assert!(guard.ensure_within_beta(1_000).is_ok());
        assert!(guard.ensure_within_beta(1_000 + BETA_WINDOW - 1).is_ok());

        let err = guard
            .ensure_within_beta(1_000 + BETA_WINDOW)
            .expect_err("window close is exclusive");
        assert!(err.is_timing());
    }

    #[test]
    fn test_custom_beta_window() {
        let guard = GovernanceGuard::with_beta_window(AccountId::named("owner"), 0, 10);
        assert!(guard.ensure_within_beta(9).is_ok());
        assert!(guard.ensure_within_beta(10).is_err());
        assert_eq!(guard.beta_ends_at(), 10);
    }
}
