//! Session state and the driver policy around the outcome chain
//!
//! The core never stops anyone from issuing commands. The session does: once
//! an outcome terminates, the session is frozen until restarted.

use crate::command::{HealthCommand, StepRunner};
use crate::core::config::SessionConfig;
use crate::core::error::{HealthError, Result};
use crate::core::types::{Delta, Health};
use crate::narration::Narrator;
use crate::outcome::Outcome;
use serde::{Deserialize, Serialize};

/// Health state for one play session
///
/// Either alive with positive health, or terminated at 0. Deserialized
/// sessions are checked against that.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SessionRepr")]
pub struct Session {
    health: Health,
    terminated: bool,
    commands_applied: u32,
}

#[derive(Deserialize)]
struct SessionRepr {
    health: Health,
    terminated: bool,
    #[serde(default)]
    commands_applied: u32,
}

impl TryFrom<SessionRepr> for Session {
    type Error = HealthError;

    fn try_from(repr: SessionRepr) -> Result<Self> {
        let consistent = if repr.terminated {
            repr.health == 0
        } else {
            repr.health > 0
        };
        if !consistent {
            return Err(HealthError::InvalidSession(format!(
                "health {} with terminated = {}",
                repr.health, repr.terminated
            )));
        }
        Ok(Self {
            health: repr.health,
            terminated: repr.terminated,
            commands_applied: repr.commands_applied,
        })
    }
}

/// What a single applied command did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CommandReport {
    pub command: HealthCommand,
    /// Health before the command
    pub before: Health,
    pub delta: Delta,
    /// `before + delta`, kept even when the outcome collapses to terminated
    pub raw: Health,
    pub outcome: Outcome<Health>,
}

/// What a chained sequence of commands did
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SequenceReport {
    pub before: Health,
    pub executed: Vec<HealthCommand>,
    pub skipped: Vec<HealthCommand>,
    pub outcome: Outcome<Health>,
}

impl Default for Session {
    fn default() -> Self {
        Self::from_config(&SessionConfig::default())
    }
}

impl Session {
    /// Start a session at `health`. Non-positive health starts terminated at 0.
    pub fn new(health: Health) -> Self {
        let outcome = Outcome::of(health);
        Self {
            health: outcome.extract().unwrap_or(0),
            terminated: outcome.is_terminated(),
            commands_applied: 0,
        }
    }

    pub fn from_config(config: &SessionConfig) -> Self {
        Self::new(config.starting_health)
    }

    pub fn health(&self) -> Health {
        self.health
    }

    pub fn is_terminated(&self) -> bool {
        self.terminated
    }

    pub fn commands_applied(&self) -> u32 {
        self.commands_applied
    }

    /// Current health as an outcome, the entry point of every chain
    pub fn outcome(&self) -> Outcome<Health> {
        if self.terminated {
            Outcome::Terminated
        } else {
            Outcome::of(self.health)
        }
    }

    /// Commands the driver should offer; none once terminated
    pub fn available_commands(&self) -> &'static [HealthCommand] {
        if self.terminated {
            &[]
        } else {
            HealthCommand::all()
        }
    }

    /// Parse and apply one command by name
    pub fn apply_named<N: Narrator>(&mut self, name: &str, narrator: N) -> Result<CommandReport> {
        let command: HealthCommand = name.parse()?;
        self.apply_command(command, narrator)
    }

    /// Apply one command, updating health or terminating the session
    pub fn apply_command<N: Narrator>(
        &mut self,
        command: HealthCommand,
        narrator: N,
    ) -> Result<CommandReport> {
        self.ensure_active(command)?;

        let before = self.health;
        let mut runner = StepRunner::new(narrator);
        let mut raw = before;
        let outcome = self.outcome().chain(|health| {
            let step = runner.apply_command(health, command);
            raw = step.raw;
            step.outcome
        });

        self.settle(outcome, 1);
        tracing::info!(
            command = command.name(),
            before,
            raw,
            health = self.health,
            terminated = self.terminated,
            "command applied"
        );

        Ok(CommandReport {
            command,
            before,
            delta: command.delta(),
            raw,
            outcome,
        })
    }

    /// Chain several commands through a single outcome
    ///
    /// Every name is resolved before anything runs, so one unknown name leaves
    /// the session untouched. Commands after a termination are skipped by the
    /// chain and never executed.
    pub fn run_sequence<I, S, N>(&mut self, names: I, narrator: N) -> Result<SequenceReport>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
        N: Narrator,
    {
        let commands = names
            .into_iter()
            .map(|name| name.as_ref().parse::<HealthCommand>())
            .collect::<Result<Vec<_>>>()?;

        if let Some(first) = commands.first() {
            self.ensure_active(*first)?;
        }

        let before = self.health;
        let mut runner = StepRunner::new(narrator);
        let mut executed = Vec::with_capacity(commands.len());

        let mut outcome = self.outcome();
        for command in &commands {
            outcome = outcome.chain(|health| {
                executed.push(*command);
                runner.apply_command(health, *command).outcome
            });
        }

        let skipped = commands[executed.len()..].to_vec();
        let mut narrator = runner.into_narrator();
        if !skipped.is_empty() {
            narrator.info(&format!(
                "Skipped {} command(s) after the game ended.",
                skipped.len()
            ));
        }

        self.settle(outcome, executed.len() as u32);
        tracing::info!(
            executed = executed.len(),
            skipped = skipped.len(),
            health = self.health,
            terminated = self.terminated,
            "sequence applied"
        );

        Ok(SequenceReport {
            before,
            executed,
            skipped,
            outcome,
        })
    }

    /// Reset to the configured starting health
    pub fn restart<N: Narrator>(&mut self, config: &SessionConfig, mut narrator: N) {
        *self = Self::from_config(config);
        narrator.info(&format!("New game. Health is {}.", self.health));
        tracing::info!(health = self.health, "session restarted");
    }

    fn ensure_active(&self, command: HealthCommand) -> Result<()> {
        if self.terminated {
            tracing::warn!(command = command.name(), "command refused, session terminated");
            return Err(HealthError::SessionTerminated);
        }
        Ok(())
    }

    /// Record the chain's result; `executed` counts steps that actually ran
    fn settle(&mut self, outcome: Outcome<Health>, executed: u32) {
        self.commands_applied += executed;
        match outcome.extract() {
            Some(health) => self.health = health,
            None => {
                self.health = 0;
                self.terminated = true;
            }
        }
    }
}
