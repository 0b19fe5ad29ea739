//! One Thought/Action/Action Input/Observation step: parsing and serialization.

use serde::{Deserialize, Serialize};

const THOUGHT: &str = "Thought:";
const ACTION: &str = "Action:";
const ACTION_INPUT: &str = "Action Input:";
const OBSERVATION: &str = "Observation:";

/// Action name that ends the loop; matched case-insensitively.
pub const FINISH_ACTION: &str = "finish";

/// A parsed reasoning step. Valid only when `action` is non-empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReasoningStep {
    pub thought: Option<String>,
    pub action: Option<String>,
    pub action_input: Option<String>,
    pub observation: Option<String>,
}

impl ReasoningStep {
    /// Parses the labeled lines of a model reply.
    ///
    /// Lines are trimmed; labels are case-sensitive and checked in the order Thought,
    /// Action, Action Input, Observation. Unlabeled lines are ignored and a repeated
    /// label overwrites the earlier value. Returns `None` when there is no non-empty
    /// `Action:` line.
    pub fn parse(content: &str) -> Option<Self> {
        let mut step = Self::default();
        for line in content.lines().map(str::trim) {
            if let Some(v) = line.strip_prefix(THOUGHT) {
                step.thought = Some(v.trim().to_string());
            } else if let Some(v) = line.strip_prefix(ACTION) {
                step.action = Some(v.trim().to_string());
            } else if let Some(v) = line.strip_prefix(ACTION_INPUT) {
                step.action_input = Some(v.trim().to_string());
            } else if let Some(v) = line.strip_prefix(OBSERVATION) {
                step.observation = Some(v.trim().to_string());
            }
        }
        step.is_valid().then_some(step)
    }

    pub fn is_valid(&self) -> bool {
        self.action.as_deref().is_some_and(|a| !a.is_empty())
    }

    pub fn is_finish(&self) -> bool {
        self.action
            .as_deref()
            .is_some_and(|a| a.eq_ignore_ascii_case(FINISH_ACTION))
    }

    /// One `Label: value` line per present field, in protocol order.
    pub fn format(&self) -> String {
        let mut out = String::new();
        for (label, value) in [
            (THOUGHT, &self.thought),
            (ACTION, &self.action),
            (ACTION_INPUT, &self.action_input),
            (OBSERVATION, &self.observation),
        ] {
            if let Some(v) = value {
                out.push_str(label);
                out.push(' ');
                out.push_str(v);
                out.push('\n');
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// **Scenario**: all four labels parse; surrounding text is ignored.
    #[test]
    fn parses_all_labels() {
        let step = ReasoningStep::parse(
            "Some preamble\n  Thought: need math\nAction: calculator\nAction Input: {\"a\": 1}\nObservation: pending\n",
        )
        .unwrap();
        assert_eq!(step.thought.as_deref(), Some("need math"));
        assert_eq!(step.action.as_deref(), Some("calculator"));
        assert_eq!(step.action_input.as_deref(), Some("{\"a\": 1}"));
        assert_eq!(step.observation.as_deref(), Some("pending"));
    }

    /// **Scenario**: no Action line, or an empty one, means no step.
    #[test]
    fn missing_or_empty_action_is_none() {
        assert!(ReasoningStep::parse("Thought: hmm\nThe answer is 4.").is_none());
        assert!(ReasoningStep::parse("Action:   \nThought: x").is_none());
    }

    /// **Scenario**: labels are case-sensitive and a later line wins.
    #[test]
    fn labels_case_sensitive_and_last_wins() {
        let step = ReasoningStep::parse("action: lower\nAction: first\nAction: second").unwrap();
        assert_eq!(step.action.as_deref(), Some("second"));
    }

    #[test]
    fn finish_is_case_insensitive() {
        let step = ReasoningStep::parse("Action: FINISH\nObservation: 42").unwrap();
        assert!(step.is_finish());
    }

    /// **Scenario**: format writes present fields only, in order.
    #[test]
    fn format_skips_absent_fields() {
        let step = ReasoningStep {
            thought: Some("t".into()),
            action: Some("a".into()),
            action_input: None,
            observation: Some("Result: 1".into()),
        };
        assert_eq!(step.format(), "Thought: t\nAction: a\nObservation: Result: 1\n");
    }
}
