//! Podcast script produced by the language model

use serde::{Deserialize, Serialize};

use crate::text::{char_count, truncate_chars};
use crate::value_objects::ScriptBudget;

/// A podcast script that never exceeds its budget's hard cap
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PodcastScript {
    text: String,
    budget: ScriptBudget,
    truncated: bool,
}

impl PodcastScript {
    /// Build a script from raw model output
    ///
    /// The output is trimmed, then cut at [`ScriptBudget::hard_cap`]
    /// characters regardless of what the model was asked for.
    pub fn from_model_output(raw: &str, budget: ScriptBudget) -> Self {
        let trimmed = raw.trim();
        let bounded = truncate_chars(trimmed, budget.hard_cap());
        Self {
            text: bounded.to_string(),
            budget,
            truncated: bounded.len() < trimmed.len(),
        }
    }

    /// The script text
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Consume into the inner string
    pub fn into_string(self) -> String {
        self.text
    }

    /// Budget the script was generated for
    pub const fn budget(&self) -> ScriptBudget {
        self.budget
    }

    /// Whether the model overran the hard cap
    pub const fn was_truncated(&self) -> bool {
        self.truncated
    }

    /// True if the model returned nothing usable
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Length in characters
    pub fn char_count(&self) -> usize {
        char_count(&self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn budget(n: u32) -> ScriptBudget {
        ScriptBudget::new(n).unwrap()
    }

    #[test]
    fn short_output_is_kept() {
        let script = PodcastScript::from_model_output("  Welcome to the show!  ", budget(500));
        assert_eq!(script.as_str(), "Welcome to the show!");
        assert!(!script.was_truncated());
    }

    #[test]
    fn overrun_is_cut_at_hard_cap() {
        let raw = "x".repeat(5000);
        let script = PodcastScript::from_model_output(&raw, budget(500));
        assert_eq!(script.char_count(), 700);
        assert!(script.was_truncated());
    }

    #[test]
    fn output_within_allowance_is_not_cut() {
        let raw = "y".repeat(650);
        let script = PodcastScript::from_model_output(&raw, budget(500));
        assert_eq!(script.char_count(), 650);
        assert!(!script.was_truncated());
    }

    #[test]
    fn blank_output_is_empty() {
        assert!(PodcastScript::from_model_output("   ", budget(500)).is_empty());
    }

    proptest! {
        #[test]
        fn script_never_exceeds_budget_plus_allowance(
            raw in "\\PC{0,6000}",
            max in ScriptBudget::MIN..=ScriptBudget::MAX,
        ) {
            let budget = ScriptBudget::new(max).unwrap();
            let script = PodcastScript::from_model_output(&raw, budget);
            prop_assert!(script.char_count() <= max as usize + 200);
        }
    }
}
