//! Tool dispatch shared by the loops and ActNode.
//!
//! Argument text is parsed best-effort; tool failures become error text. Neither
//! ever aborts the caller.

use serde_json::{Map, Value};

use crate::state::{ToolCall, ToolResult};
use crate::tools::{stringify_result, Tool, ToolRegistry};

/// Max chars of argument text echoed in warn logs.
const MAX_LOG_ARGS_LEN: usize = 200;

fn truncate_for_log(s: &str) -> String {
    if s.chars().count() <= MAX_LOG_ARGS_LEN {
        s.to_string()
    } else {
        let head: String = s.chars().take(MAX_LOG_ARGS_LEN).collect();
        format!("{head}...")
    }
}

/// Parses tool arguments.
///
/// Blank text gives `{}`; a JSON object is used as is; anything else (malformed JSON,
/// or JSON that is not an object) is wrapped as `{"input": "<raw>"}`.
pub fn parse_arguments(raw: &str) -> Value {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Value::Object(Map::new());
    }
    match serde_json::from_str::<Value>(trimmed) {
        Ok(v @ Value::Object(_)) => v,
        Ok(_) | Err(_) => {
            tracing::warn!(
                raw = %truncate_for_log(trimmed),
                "Tool arguments are not a JSON object; passing raw text as `input`"
            );
            let mut map = Map::new();
            map.insert("input".to_string(), Value::String(raw.to_string()));
            Value::Object(map)
        }
    }
}

/// Runs `tool` and renders the outcome as message text: the stringified result,
/// or `"Error: <message>"`.
pub async fn execute_to_text(tool: &dyn Tool, params: Value) -> Result<String, String> {
    match tool.execute(params).await {
        Ok(value) => Ok(stringify_result(&value)),
        Err(e) => {
            tracing::warn!(tool = tool.name(), error = %e, "Tool execution failed");
            Err(format!("Error: {e}"))
        }
    }
}

/// Dispatches one call against the registry. `None` when the tool is not registered.
pub async fn dispatch_call(tools: &ToolRegistry, call: &ToolCall) -> Option<ToolResult> {
    let tool = tools.get(&call.name)?;
    tracing::debug!(tool = %call.name, call_id = %call.id, "Executing tool call");
    let params = parse_arguments(&call.arguments);
    Some(match execute_to_text(tool.as_ref(), params).await {
        Ok(text) => ToolResult::ok(call, text),
        Err(text) => ToolResult::error(call, text),
    })
}
