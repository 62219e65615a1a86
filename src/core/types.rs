//! Core type definitions used throughout the codebase

/// Game health value. Live health is always strictly positive.
pub type Health = i64;

/// Signed change applied to health by a single command
pub type Delta = i64;
