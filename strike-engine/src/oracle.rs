use crate::traits::PriceCalculator;
use std::sync::Arc;
use strike_core::{AccountId, EngineError};

/// Holds the currently configured price calculator
///
/// Starts unset; `address` reports the zero identity until a calculator
/// is configured. Replacement goes through the governance guard.
#[derive(Clone, Default)]
pub struct PriceOracleAdapter {
    calculator: Option<Arc<dyn PriceCalculator>>,
}

impl PriceOracleAdapter {
    /// Create an adapter with no calculator configured
    pub fn unset() -> Self {
        Self { calculator: None }
    }

    /// The configured calculator's identity, or the zero identity when
    /// unset
    pub fn address(&self) -> AccountId {
        self.calculator
            .as_ref()
            .map(|c| c.address())
            .unwrap_or_default()
    }

    /// Replace the configured calculator
    pub fn set(&mut self, calculator: Arc<dyn PriceCalculator>) {
        self.calculator = Some(calculator);
    }

    /// The configured calculator
    ///
    /// # Returns
    /// The calculator, or a validation error when none is configured
    pub fn get(&self) -> Result<&Arc<dyn PriceCalculator>, EngineError> {
        self.calculator
            .as_ref()
            .ok_or_else(|| EngineError::Validation("price calculator is not set".to_string()))
    }
}

impl std::fmt::Debug for PriceOracleAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PriceOracleAdapter")
            .field("address", &self.address())
            .finish()
    }
}
