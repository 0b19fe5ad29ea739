//! Shared tools for integration tests: a calculator and a tool that always fails.

#![allow(dead_code)]

use std::sync::Arc;

use reagent::tools::ParameterSpec;
use reagent::{FunctionTool, Tool, ToolError, ToolRegistry};
use serde_json::{json, Value};

/// Integer calculator over `a`, `b` and `op` (`add`, `sub`, `mul`, `div`).
pub fn calculator() -> Arc<dyn Tool> {
    Arc::new(
        FunctionTool::new("calculator", "Basic integer arithmetic", |args: Value| {
            let a = args["a"]
                .as_i64()
                .ok_or_else(|| ToolError::InvalidInput("a must be an integer".into()))?;
            let b = args["b"]
                .as_i64()
                .ok_or_else(|| ToolError::InvalidInput("b must be an integer".into()))?;
            let result = match args["op"].as_str().unwrap_or("add") {
                "add" => a + b,
                "sub" => a - b,
                "mul" => a * b,
                "div" if b == 0 => return Err(ToolError::Execution("division by zero".into())),
                "div" => a / b,
                other => return Err(ToolError::InvalidInput(format!("unknown op {other}"))),
            };
            Ok(json!(result))
        })
        .with_parameter("a", ParameterSpec::required("integer", "left operand"))
        .with_parameter("b", ParameterSpec::required("integer", "right operand"))
        .with_parameter("op", ParameterSpec::optional("string", "add, sub, mul or div")),
    )
}

/// Always fails with `boom`.
pub fn failing_tool() -> Arc<dyn Tool> {
    Arc::new(FunctionTool::new("broken", "Always fails", |_| {
        Err(ToolError::Execution("boom".into()))
    }))
}

pub fn registry() -> Arc<ToolRegistry> {
    let mut tools = ToolRegistry::new();
    tools.register(calculator()).register(failing_tool());
    Arc::new(tools)
}
