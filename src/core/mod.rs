pub mod config;
pub mod error;
pub mod types;

pub use config::SessionConfig;
pub use error::{HealthError, Result};
pub use types::{Delta, Health};
