//! Validation collaborator and rule sets.
//!
//! Rule strings are opaque here; their grammar belongs to the [`Validator`].

use crate::{
    error::ValidationError,
    fields::{InputMap, Mode},
};
use indexmap::IndexMap;

/// Field name to rule expression, e.g. `"title" => "required|max:255"`.
pub type Rules = IndexMap<String, String>;

/// The rules a validatable resource declares.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleSet {
    /// One set applied to both creating and updating.
    Flat(Rules),
    /// Separate sets per mode.
    ByMode {
        /// Rules for `store`.
        creating: Rules,
        /// Rules for `update`.
        updating: Rules,
    },
}

impl RuleSet {
    /// Rules applying to the given mode.
    pub fn for_mode(&self, mode: Mode) -> &Rules {
        match (self, mode) {
            (Self::Flat(rules), _) => rules,
            (Self::ByMode { creating, .. }, Mode::Creating) => creating,
            (Self::ByMode { updating, .. }, Mode::Updating) => updating,
        }
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::Flat(Rules::new())
    }
}

/// The validation-rule execution engine.
pub trait Validator: Send + Sync {
    /// Check input against rules, reporting failures per field.
    fn validate(&self, input: &InputMap, rules: &Rules) -> Result<(), ValidationError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules(pairs: &[(&str, &str)]) -> Rules {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_flat_rules_apply_to_both_modes() {
        let set = RuleSet::Flat(rules(&[("title", "required")]));
        assert_eq!(set.for_mode(Mode::Creating), set.for_mode(Mode::Updating));
    }

    #[test]
    fn test_rules_by_mode() {
        let set = RuleSet::ByMode {
            creating: rules(&[("title", "required"), ("slug", "required|unique")]),
            updating: rules(&[("title", "required")]),
        };
        assert_eq!(set.for_mode(Mode::Creating).len(), 2);
        assert_eq!(set.for_mode(Mode::Updating).len(), 1);
    }
}
