//! Command execution pipeline
//!
//! Turns a command name into a health outcome:
//! name -> HealthCommand -> StepRunner (chained through Outcome) -> Outcome

pub mod catalog;
pub mod executor;

pub use catalog::HealthCommand;
pub use executor::{run_command, StepResult, StepRunner};
