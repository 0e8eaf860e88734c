pub mod clock;
pub mod error;
pub mod events;
pub mod id;
pub mod options;

// Re-export the main types for convenience
pub use clock::{Clock, ManualClock, SystemClock};
pub use error::EngineError;
pub use events::EngineEvent;
pub use id::AccountId;
pub use options::{LockId, OptionId, OptionRecord, OptionState, OptionType};
