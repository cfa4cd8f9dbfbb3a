//! Prompt templates for the structured judge

const REFUND_GATE_INSTRUCTIONS: &str = "\
You evaluate refund reasons for a customer service system.
A valid reason should explain WHY the customer wants a refund.

Valid examples: \"product arrived damaged\", \"wrong size delivered\", \"item doesn't match description\", \"received wrong color\"
Invalid examples: \"I want a refund\", \"refund please\", \"money back\", \"return\", \"don't want it\"

Be reasonable - if there's a clear problem stated, it's valid.";

/// System/user message pair handed to the structured judge when a gated
/// tool call is checked.
#[derive(Debug, Clone)]
pub struct GatePromptTemplate {
    instructions: String,
}

impl GatePromptTemplate {
    pub fn new(instructions: impl Into<String>) -> Self {
        Self {
            instructions: instructions.into(),
        }
    }

    pub fn instructions(&self) -> &str {
        &self.instructions
    }

    /// User message carrying the argument value under judgment.
    pub fn judge_request(&self, value: &str) -> String {
        format!("Evaluate this refund reason: \"{}\"", value)
    }
}

impl Default for GatePromptTemplate {
    fn default() -> Self {
        Self::new(REFUND_GATE_INSTRUCTIONS)
    }
}
