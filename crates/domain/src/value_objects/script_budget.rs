//! Script length budget
//!
//! The budget is what the language model is asked to aim for. The model may
//! overshoot, so scripts are cut at a hard cap of the budget plus a fixed
//! allowance.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// Target script length in characters, validated to `[500, 4000]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct ScriptBudget(u32);

impl ScriptBudget {
    /// Smallest accepted budget
    pub const MIN: u32 = 500;
    /// Largest accepted budget
    pub const MAX: u32 = 4000;
    /// Budget used when the caller does not choose one
    pub const DEFAULT: u32 = 2000;
    /// Characters a script may run over the budget before it is cut
    pub const OVERRUN_ALLOWANCE: u32 = 200;

    /// Create a budget, rejecting values outside `[MIN, MAX]`
    pub const fn new(max_chars: u32) -> Result<Self, DomainError> {
        if max_chars < Self::MIN || max_chars > Self::MAX {
            return Err(DomainError::InvalidScriptBudget {
                value: max_chars,
                min: Self::MIN,
                max: Self::MAX,
            });
        }
        Ok(Self(max_chars))
    }

    /// Target length handed to the model
    pub const fn max_chars(self) -> u32 {
        self.0
    }

    /// Length no script may exceed after post-processing
    pub const fn hard_cap(self) -> usize {
        (self.0 + Self::OVERRUN_ALLOWANCE) as usize
    }
}

impl Default for ScriptBudget {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}

impl TryFrom<u32> for ScriptBudget {
    type Error = DomainError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ScriptBudget> for u32 {
    fn from(budget: ScriptBudget) -> Self {
        budget.0
    }
}

impl fmt::Display for ScriptBudget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
