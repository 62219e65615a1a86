//! Catalog of health commands and their fixed deltas

use crate::core::error::HealthError;
use crate::core::types::Delta;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Commands the player can issue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HealthCommand {
    #[serde(rename = "Heal")]
    Heal,
    #[serde(rename = "Minor_Attack")]
    MinorAttack,
    #[serde(rename = "Major_Attack")]
    MajorAttack,
    #[serde(rename = "Critical_Attack")]
    CriticalAttack,
}

impl HealthCommand {
    /// All commands, in display order
    pub fn all() -> &'static [HealthCommand] {
        &[
            HealthCommand::Heal,
            HealthCommand::MinorAttack,
            HealthCommand::MajorAttack,
            HealthCommand::CriticalAttack,
        ]
    }

    /// Signed health change this command applies
    pub fn delta(self) -> Delta {
        match self {
            HealthCommand::Heal => 15,
            HealthCommand::MinorAttack => -20,
            HealthCommand::MajorAttack => -50,
            HealthCommand::CriticalAttack => -101,
        }
    }

    /// Canonical command name, e.g. `Minor_Attack`
    pub fn name(self) -> &'static str {
        match self {
            HealthCommand::Heal => "Heal",
            HealthCommand::MinorAttack => "Minor_Attack",
            HealthCommand::MajorAttack => "Major_Attack",
            HealthCommand::CriticalAttack => "Critical_Attack",
        }
    }

    /// Display label used in narration
    pub fn label(self) -> String {
        self.name().replace('_', " ")
    }

    /// Look up a command by name
    ///
    /// The canonical name always matches. Case is ignored, and `-` or spaces
    /// may stand in for `_`, so `minor attack` resolves to `Minor_Attack`.
    pub fn from_name(name: &str) -> Option<Self> {
        let normalized: String = name
            .trim()
            .chars()
            .map(|c| if c == '-' || c.is_whitespace() { '_' } else { c })
            .collect();

        Self::all()
            .iter()
            .copied()
            .find(|cmd| cmd.name().eq_ignore_ascii_case(&normalized))
    }
}

impl fmt::Display for HealthCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HealthCommand {
    type Err = HealthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| HealthError::UnknownCommand(s.trim().to_string()))
    }
}
