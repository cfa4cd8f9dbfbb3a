//! Validation policy and verdicts
//!
//! Certain tools are gated: before they run, a structured judge must
//! approve one of their arguments. The [`GatePolicy`] maps gated tool
//! names to the argument under judgment; the judge's answer is a
//! [`Verdict`].

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A structured judge's decision about a gated argument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    pub valid: bool,
    pub feedback: String,
}

impl Verdict {
    pub fn approve(feedback: impl Into<String>) -> Self {
        Self {
            valid: true,
            feedback: feedback.into(),
        }
    }

    pub fn reject(feedback: impl Into<String>) -> Self {
        Self {
            valid: false,
            feedback: feedback.into(),
        }
    }
}

/// Which tools are gated, and which argument the judge inspects.
#[derive(Debug, Clone)]
pub struct GatePolicy {
    gated: HashMap<String, String>,
}

impl GatePolicy {
    pub fn empty() -> Self {
        Self {
            gated: HashMap::new(),
        }
    }

    pub fn gate(mut self, tool: impl Into<String>, argument: impl Into<String>) -> Self {
        self.gated.insert(tool.into(), argument.into());
        self
    }

    /// The argument judged for `tool`, or `None` when the tool is ungated.
    pub fn judged_argument(&self, tool: &str) -> Option<&str> {
        self.gated.get(tool).map(|s| s.as_str())
    }
}

impl Default for GatePolicy {
    /// Refund requests must carry a concrete reason.
    fn default() -> Self {
        Self::empty().gate("request_refund", "reason")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy_gates_refunds() {
        let policy = GatePolicy::default();
        assert_eq!(policy.judged_argument("request_refund"), Some("reason"));
        assert_eq!(policy.judged_argument("find_order"), None);
    }

    #[test]
    fn test_custom_gate() {
        let policy = GatePolicy::empty().gate("cancel_order", "justification");
        assert_eq!(
            policy.judged_argument("cancel_order"),
            Some("justification")
        );
        assert_eq!(policy.judged_argument("request_refund"), None);
    }

    #[test]
    fn test_verdict_constructors() {
        assert!(Verdict::approve("specific enough").valid);
        assert!(!Verdict::reject("too vague").valid);
    }
}
