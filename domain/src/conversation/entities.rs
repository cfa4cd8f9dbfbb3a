//! Conversation entities
//!
//! A [`Conversation`] is an append-only log of [`Turn`]s. Turns are never
//! edited or removed; recovery from failed tool calls happens by appending
//! result turns, not by rewriting history. A conversation is *stable* when
//! every tool call announced by an assistant turn has a matching result
//! turn — only stable conversations should be sent back to the decision
//! model for another cycle.

use serde::{Deserialize, Serialize};

use crate::tool::entities::ToolCall;

/// One entry in the conversation log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum Turn {
    User {
        text: String,
    },
    Assistant {
        text: String,
        tool_calls: Vec<ToolCall>,
    },
    /// Result of one tool call, keyed back to it by `call_id`.
    ToolResult {
        call_id: String,
        text: String,
    },
}

/// Append-only turn log.
#[derive(Debug, Clone, Default)]
pub struct Conversation {
    turns: Vec<Turn>,
}

impl Conversation {
    pub fn new() -> Self {
        Self { turns: Vec::new() }
    }

    pub fn push_user(&mut self, text: impl Into<String>) {
        self.turns.push(Turn::User { text: text.into() });
    }

    pub fn push_assistant(&mut self, text: impl Into<String>, tool_calls: Vec<ToolCall>) {
        self.turns.push(Turn::Assistant {
            text: text.into(),
            tool_calls,
        });
    }

    pub fn push_tool_result(&mut self, call_id: impl Into<String>, text: impl Into<String>) {
        self.turns.push(Turn::ToolResult {
            call_id: call_id.into(),
            text: text.into(),
        });
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn last(&self) -> Option<&Turn> {
        self.turns.last()
    }

    /// Text of the most recent assistant turn, if any.
    pub fn last_assistant_text(&self) -> Option<&str> {
        self.turns.iter().rev().find_map(|turn| match turn {
            Turn::Assistant { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    /// Tool calls announced by the *last* turn that have no matching
    /// result yet. Empty when the last turn is not an assistant turn.
    pub fn pending_calls(&self) -> Vec<&ToolCall> {
        match self.turns.last() {
            Some(Turn::Assistant { tool_calls, .. }) => tool_calls.iter().collect(),
            _ => Vec::new(),
        }
    }

    /// Calls anywhere in the log that never received a result turn.
    pub fn dangling_calls(&self) -> Vec<&ToolCall> {
        let answered: Vec<&str> = self
            .turns
            .iter()
            .filter_map(|turn| match turn {
                Turn::ToolResult { call_id, .. } => Some(call_id.as_str()),
                _ => None,
            })
            .collect();

        self.turns
            .iter()
            .filter_map(|turn| match turn {
                Turn::Assistant { tool_calls, .. } => Some(tool_calls.iter()),
                _ => None,
            })
            .flatten()
            .filter(|call| !answered.contains(&call.id.as_str()))
            .collect()
    }

    /// A conversation is stable when every announced call is answered.
    pub fn is_stable(&self) -> bool {
        self.dangling_calls().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_only_ordering() {
        let mut conversation = Conversation::new();
        conversation.push_user("hello");
        conversation.push_assistant("hi there", vec![]);

        assert_eq!(conversation.len(), 2);
        assert!(matches!(conversation.turns()[0], Turn::User { .. }));
        assert_eq!(conversation.last_assistant_text(), Some("hi there"));
    }

    #[test]
    fn test_pending_calls_on_last_assistant_turn() {
        let mut conversation = Conversation::new();
        conversation.push_user("refund please");
        conversation.push_assistant(
            "",
            vec![ToolCall::new("call-1", "request_refund")],
        );

        let pending = conversation.pending_calls();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].id, "call-1");
        assert!(!conversation.is_stable());
    }

    #[test]
    fn test_pending_calls_empty_when_last_turn_not_assistant() {
        let mut conversation = Conversation::new();
        conversation.push_assistant("", vec![ToolCall::new("call-1", "find_order")]);
        conversation.push_tool_result("call-1", "ORD123456");

        assert!(conversation.pending_calls().is_empty());
        assert!(conversation.is_stable());
    }

    #[test]
    fn test_dangling_calls_survive_later_turns() {
        let mut conversation = Conversation::new();
        conversation.push_assistant(
            "",
            vec![
                ToolCall::new("call-1", "find_order"),
                ToolCall::new("call-2", "request_refund"),
            ],
        );
        conversation.push_tool_result("call-1", "ORD123456");
        conversation.push_user("anything else?");

        let dangling = conversation.dangling_calls();
        assert_eq!(dangling.len(), 1);
        assert_eq!(dangling[0].id, "call-2");
        assert!(!conversation.is_stable());
    }

    #[test]
    fn test_empty_conversation_is_stable() {
        let conversation = Conversation::new();
        assert!(conversation.is_stable());
        assert!(conversation.last_assistant_text().is_none());
    }
}
