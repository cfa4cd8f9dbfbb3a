//! Schema conversion between gateway manifests, domain descriptors, and
//! the function-calling format the decision model expects.

use serde_json::{json, Value};

use trik_agent_domain::{ToolDescriptor, ToolParameter};

/// Model-facing tool names must not contain colons; the gateway's
/// `trikId:actionName` form becomes `trikId_actionName`.
pub fn model_name(wire_name: &str) -> String {
    wire_name.replace(':', "_")
}

/// Extract parameters from a JSON-schema `inputSchema` object. Anything
/// that is not an object schema yields no parameters.
pub fn parse_input_schema(schema: &Value) -> Vec<ToolParameter> {
    if schema.get("type").and_then(|t| t.as_str()) != Some("object") {
        return Vec::new();
    }

    let required: Vec<&str> = schema
        .get("required")
        .and_then(|r| r.as_array())
        .map(|items| items.iter().filter_map(|v| v.as_str()).collect())
        .unwrap_or_default();

    let Some(properties) = schema.get("properties").and_then(|p| p.as_object()) else {
        return Vec::new();
    };

    properties
        .iter()
        .map(|(name, prop)| {
            let description = prop
                .get("description")
                .and_then(|d| d.as_str())
                .unwrap_or("");
            let param_type = prop.get("type").and_then(|t| t.as_str()).unwrap_or("string");
            ToolParameter::new(name, description, required.contains(&name.as_str()))
                .with_type(param_type)
        })
        .collect()
}

/// Render a descriptor as an OpenAI-style function declaration.
pub fn descriptor_to_function(descriptor: &ToolDescriptor) -> Value {
    let mut properties = serde_json::Map::new();
    let mut required = Vec::new();

    for param in &descriptor.parameters {
        properties.insert(
            param.name.clone(),
            json!({
                "type": param.param_type,
                "description": param.description,
            }),
        );
        if param.required {
            required.push(Value::String(param.name.clone()));
        }
    }

    json!({
        "type": "function",
        "function": {
            "name": descriptor.name,
            "description": descriptor.description,
            "parameters": {
                "type": "object",
                "properties": properties,
                "required": required,
            },
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_name_replaces_colons() {
        assert_eq!(model_name("article-search-3:search"), "article-search-3_search");
        assert_eq!(model_name("plain_name"), "plain_name");
    }

    #[test]
    fn test_parse_object_schema() {
        let schema = json!({
            "type": "object",
            "properties": {
                "query": {"type": "string", "description": "Search query"},
                "limit": {"type": "integer", "description": "Max results"},
            },
            "required": ["query"],
        });

        let mut params = parse_input_schema(&schema);
        params.sort_by(|a, b| a.name.cmp(&b.name));

        assert_eq!(params.len(), 2);
        assert_eq!(params[0].name, "limit");
        assert_eq!(params[0].param_type, "integer");
        assert!(!params[0].required);
        assert_eq!(params[1].name, "query");
        assert!(params[1].required);
    }

    #[test]
    fn test_non_object_schema_yields_nothing() {
        assert!(parse_input_schema(&json!({"type": "string"})).is_empty());
        assert!(parse_input_schema(&json!(null)).is_empty());
        assert!(parse_input_schema(&json!({})).is_empty());
    }

    #[test]
    fn test_descriptor_to_function_shape() {
        let descriptor = ToolDescriptor::local("find_order", "Finds an order")
            .with_parameter(ToolParameter::new("description", "Order description", true));

        let function = descriptor_to_function(&descriptor);
        assert_eq!(function["type"], "function");
        assert_eq!(function["function"]["name"], "find_order");
        assert_eq!(
            function["function"]["parameters"]["properties"]["description"]["type"],
            "string"
        );
        assert_eq!(
            function["function"]["parameters"]["required"],
            json!(["description"])
        );
    }
}
