pub mod config;
pub mod error;

pub use config::{AbilityConfig, ActionConfig};
pub use error::{AbilityError, Result};
