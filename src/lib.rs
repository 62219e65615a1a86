//! Health Chain - fallible health transformations with short-circuiting
//!
//! A single health value moves through a chain of steps. Each step either
//! keeps it alive or terminates the chain, and everything after a
//! termination is skipped.

pub mod command;
pub mod core;
pub mod narration;
pub mod outcome;
pub mod session;

pub use crate::command::{run_command, HealthCommand, StepResult, StepRunner};
pub use crate::core::{Delta, Health, HealthError, SessionConfig};
pub use crate::narration::{NarrationKind, NarrationLog, Narrator, Tee, TracingNarrator};
pub use crate::outcome::{Outcome, Positive};
pub use crate::session::{CommandReport, SequenceReport, Session};
