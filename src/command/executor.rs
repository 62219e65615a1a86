//! Command execution - applies health deltas through the outcome chain

use crate::command::catalog::HealthCommand;
use crate::core::error::Result;
use crate::core::types::{Delta, Health};
use crate::narration::Narrator;
use crate::outcome::Outcome;

/// Result of a single step, keeping the raw arithmetic next to the outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepResult {
    /// `current + delta` before classification; may be zero or negative
    pub raw: Health,
    pub outcome: Outcome<Health>,
}

/// Applies one delta to a live health value and narrates the result
pub struct StepRunner<N> {
    narrator: N,
}

impl<N: Narrator> StepRunner<N> {
    pub fn new(narrator: N) -> Self {
        Self { narrator }
    }

    /// Apply `delta` to `current`, emitting exactly one narration event
    ///
    /// A non-positive result terminates: the returned outcome is built from 0
    /// so the termination is attributable to this step.
    pub fn apply(&mut self, current: Health, delta: Delta, label: &str) -> Outcome<Health> {
        self.step(current, delta, label).outcome
    }

    /// Same as `apply`, but also returns the raw computed value
    pub fn step(&mut self, current: Health, delta: Delta, label: &str) -> StepResult {
        let next = current.saturating_add(delta);
        let expression = format!("{} {} {} = {}", current, sign(delta), delta.unsigned_abs(), next);

        tracing::debug!(current, delta, next, label, "applying step");

        if next <= 0 {
            self.narrator
                .failure(&format!("{}: {}. Health depleted, game over.", label, expression));
            StepResult {
                raw: next,
                outcome: Outcome::of(0),
            }
        } else {
            self.narrator
                .success(&format!("{}: {}. Still standing.", label, expression));
            StepResult {
                raw: next,
                outcome: Outcome::of(next),
            }
        }
    }

    /// Apply a catalog command
    pub fn apply_command(&mut self, current: Health, command: HealthCommand) -> StepResult {
        self.step(current, command.delta(), &command.label())
    }

    pub fn into_narrator(self) -> N {
        self.narrator
    }
}

fn sign(delta: Delta) -> char {
    if delta < 0 {
        '-'
    } else {
        '+'
    }
}

/// Run a named command against the current health
///
/// Wraps `current_health` in an outcome and chains one step through it. A
/// non-positive `current_health` is already terminated, so the step is skipped
/// and nothing is narrated. Unknown names are rejected before anything runs.
pub fn run_command<N: Narrator>(
    name: &str,
    current_health: Health,
    narrator: N,
) -> Result<Outcome<Health>> {
    let command: HealthCommand = name.parse()?;
    let mut runner = StepRunner::new(narrator);

    Ok(Outcome::of(current_health).chain(|health| runner.apply_command(health, command).outcome))
}
