//! Tool domain entities

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Where a tool's implementation lives
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provenance {
    /// Backed by an in-process function
    Local,
    /// Backed by a gateway invocation; `gateway_tool` is the wire name
    /// in `trikId:actionName` format
    Remote { gateway_tool: String },
}

impl Provenance {
    pub fn is_local(&self) -> bool {
        matches!(self, Provenance::Local)
    }
}

/// Description of a tool callable by the orchestration loop
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDescriptor {
    /// Unique name within the merged registry (e.g. "request_refund")
    pub name: String,
    /// Human-readable description, shown to the decision model
    pub description: String,
    /// Parameter specifications
    pub parameters: Vec<ToolParameter>,
    /// Local or remote backing
    pub provenance: Provenance,
}

/// Parameter specification for a tool
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolParameter {
    /// Parameter name
    pub name: String,
    /// Parameter description
    pub description: String,
    /// Whether this parameter is required
    pub required: bool,
    /// Parameter type hint ("string", "integer", "number", "boolean",
    /// "array", "object")
    pub param_type: String,
}

impl ToolDescriptor {
    pub fn local(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters: Vec::new(),
            provenance: Provenance::Local,
        }
    }

    pub fn remote(
        name: impl Into<String>,
        description: impl Into<String>,
        gateway_tool: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters: Vec::new(),
            provenance: Provenance::Remote {
                gateway_tool: gateway_tool.into(),
            },
        }
    }

    pub fn with_parameter(mut self, param: ToolParameter) -> Self {
        self.parameters.push(param);
        self
    }

    pub fn is_local(&self) -> bool {
        self.provenance.is_local()
    }

    /// Names of all required parameters
    pub fn required_parameters(&self) -> impl Iterator<Item = &str> {
        self.parameters
            .iter()
            .filter(|p| p.required)
            .map(|p| p.name.as_str())
    }
}

impl ToolParameter {
    pub fn new(name: impl Into<String>, description: impl Into<String>, required: bool) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            required,
            param_type: "string".to_string(),
        }
    }

    pub fn with_type(mut self, param_type: impl Into<String>) -> Self {
        self.param_type = param_type.into();
        self
    }
}

/// The merged set of tools available to the agent
///
/// Rebuilt on reload, never patched in place.
#[derive(Debug, Clone, Default)]
pub struct ToolSet {
    tools: HashMap<String, ToolDescriptor>,
}

impl ToolSet {
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
        }
    }

    pub fn register(mut self, tool: ToolDescriptor) -> Self {
        self.tools.insert(tool.name.clone(), tool);
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&ToolDescriptor> {
        self.tools.get(name)
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    pub fn all(&self) -> impl Iterator<Item = &ToolDescriptor> {
        self.tools.values()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tools.keys().map(|s| s.as_str())
    }

    /// Descriptors sorted by name, for deterministic manifests
    pub fn sorted(&self) -> Vec<&ToolDescriptor> {
        let mut tools: Vec<&ToolDescriptor> = self.tools.values().collect();
        tools.sort_by(|a, b| a.name.cmp(&b.name));
        tools
    }
}

/// A call to a tool with arguments
///
/// Created by the decision step, consumed by routing and execution, never
/// mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    /// Identifier assigned by the decision step, unique within a conversation
    pub id: String,
    /// Name of the tool to call
    pub name: String,
    /// Arguments passed to the tool
    pub arguments: HashMap<String, serde_json::Value>,
}

impl ToolCall {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            arguments: HashMap::new(),
        }
    }

    pub fn with_arg(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.arguments.insert(key.into(), value.into());
        self
    }

    /// Get a string argument
    pub fn get_string(&self, key: &str) -> Option<&str> {
        self.arguments.get(key).and_then(|v| v.as_str())
    }

    /// Get a required string argument or return an error message
    pub fn require_string(&self, key: &str) -> Result<&str, String> {
        self.get_string(key)
            .ok_or_else(|| format!("Missing required argument: {}", key))
    }

    /// Get an optional i64 argument
    pub fn get_i64(&self, key: &str) -> Option<i64> {
        self.arguments.get(key).and_then(|v| v.as_i64())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_provenance() {
        let local = ToolDescriptor::local("find_order", "Finds an order");
        assert!(local.is_local());

        let remote = ToolDescriptor::remote(
            "article-search-3_search",
            "Search articles",
            "article-search-3:search",
        );
        assert!(!remote.is_local());
        match &remote.provenance {
            Provenance::Remote { gateway_tool } => {
                assert_eq!(gateway_tool, "article-search-3:search")
            }
            _ => panic!("expected remote provenance"),
        }
    }

    #[test]
    fn test_descriptor_required_parameters() {
        let tool = ToolDescriptor::local("request_refund", "Process a refund request")
            .with_parameter(ToolParameter::new("order_id", "The order ID", true))
            .with_parameter(ToolParameter::new("reason", "Why the refund", true))
            .with_parameter(ToolParameter::new("note", "Optional note", false));

        let required: Vec<&str> = tool.required_parameters().collect();
        assert_eq!(required.len(), 2);
        assert!(required.contains(&"order_id"));
        assert!(required.contains(&"reason"));
    }

    #[test]
    fn test_tool_set() {
        let set = ToolSet::new()
            .register(ToolDescriptor::local("find_order", "Finds an order"))
            .register(ToolDescriptor::remote("remote_echo", "Echo", "echo:run"));

        assert_eq!(set.len(), 2);
        assert!(set.contains("find_order"));
        assert!(set.get("remote_echo").is_some());
        assert!(set.get("unknown").is_none());
    }

    #[test]
    fn test_tool_set_sorted_is_deterministic() {
        let set = ToolSet::new()
            .register(ToolDescriptor::local("zeta", "z"))
            .register(ToolDescriptor::local("alpha", "a"))
            .register(ToolDescriptor::local("mid", "m"));

        let names: Vec<&str> = set.sorted().iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["alpha", "mid", "zeta"]);
    }

    #[test]
    fn test_tool_call() {
        let call = ToolCall::new("call_1", "request_refund")
            .with_arg("order_id", "ORD123456")
            .with_arg("reason", "item arrived damaged");

        assert_eq!(call.id, "call_1");
        assert_eq!(call.get_string("order_id"), Some("ORD123456"));
        assert_eq!(call.require_string("reason").unwrap(), "item arrived damaged");
        assert!(call.require_string("missing").is_err());
    }
}
