//! Capability contract: [`Tool`], its descriptor [`ToolSpec`], and [`ToolRegistry`].

mod function;
mod registry;
mod spec;
mod r#trait;

pub use function::FunctionTool;
pub use r#trait::{Tool, ToolError};
pub use registry::ToolRegistry;
pub use spec::{ParameterSchema, ParameterSpec, ToolSpec};

use serde_json::Value;

/// Text form of a tool result for messages: strings verbatim, anything else as compact JSON.
pub fn stringify_result(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Arc;

    fn echo() -> Arc<dyn Tool> {
        Arc::new(
            FunctionTool::new("echo", "Echo text", |args| Ok(args["text"].clone()))
                .with_parameter("text", ParameterSpec::required("string", "text")),
        )
    }

    /// **Scenario**: numbers and objects stringify as JSON, strings are unquoted.
    #[test]
    fn stringify_result_forms() {
        assert_eq!(stringify_result(&json!(5)), "5");
        assert_eq!(stringify_result(&json!("five")), "five");
        assert_eq!(stringify_result(&json!({"a": 1})), r#"{"a":1}"#);
    }

    /// **Scenario**: registry lists names and specs sorted; same-name registration replaces.
    #[test]
    fn registry_sorted_and_replaces() {
        let mut registry = ToolRegistry::new();
        registry
            .register(Arc::new(FunctionTool::new("zeta", "z", |_| Ok(json!(null)))))
            .register(echo())
            .register(Arc::new(FunctionTool::new("echo", "second", |_| Ok(json!(null)))));

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.names(), vec!["echo", "zeta"]);
        let specs = registry.specs();
        assert_eq!(specs[0].name, "echo");
        assert_eq!(specs[0].description, "second");
        assert!(registry.contains("zeta"));
        assert!(registry.get("missing").is_none());
    }

    /// **Scenario**: FunctionTool runs its handler and exposes its spec.
    #[tokio::test]
    async fn function_tool_executes_handler() {
        let tool = echo();
        assert_eq!(tool.spec().parameters["text"].kind, "string");
        let out = tool.execute(json!({"text": "hi"})).await.unwrap();
        assert_eq!(out, json!("hi"));
    }

    /// **Scenario**: async FunctionTool surfaces its ToolError unchanged.
    #[tokio::test]
    async fn function_tool_async_error() {
        let tool = FunctionTool::new_async("boom", "always fails", |_| async {
            Err(ToolError::Execution("kaput".into()))
        });
        let err = tool.execute(json!({})).await.unwrap_err();
        assert_eq!(err, ToolError::Execution("kaput".into()));
        assert_eq!(err.to_string(), "kaput");
    }
}
