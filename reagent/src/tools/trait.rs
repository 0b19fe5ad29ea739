use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use super::spec::{ParameterSchema, ToolSpec};

/// Failure raised by [`Tool::execute`].
///
/// Never aborts a control loop: the loop renders it as `"Error: <message>"` in a tool
/// message or observation and keeps going.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ToolError {
    /// Arguments missing or of the wrong shape. Tools validate their own input.
    #[error("{0}")]
    InvalidInput(String),
    /// The capability ran and failed.
    #[error("{0}")]
    Execution(String),
}

/// A capability the model can call.
///
/// # Examples
///
/// ```
/// use async_trait::async_trait;
/// use serde_json::{json, Value};
/// use reagent::tools::{ParameterSchema, ParameterSpec, Tool, ToolError};
///
/// struct Echo;
///
/// #[async_trait]
/// impl Tool for Echo {
///     fn name(&self) -> &str {
///         "echo"
///     }
///
///     fn describe(&self) -> String {
///         "Returns its `text` argument".to_string()
///     }
///
///     fn parameters(&self) -> ParameterSchema {
///         [("text".to_string(), ParameterSpec::required("string", "text to echo"))]
///             .into_iter()
///             .collect()
///     }
///
///     async fn execute(&self, params: Value) -> Result<Value, ToolError> {
///         params
///             .get("text")
///             .cloned()
///             .ok_or_else(|| ToolError::InvalidInput("missing text".into()))
///     }
/// }
/// ```
///
/// # Interaction
///
/// - **ToolRegistry**: stores tools by name; the loops look them up there.
/// - **ToolSpec**: `spec()` is what the model sees.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Unique name within a registry; the model calls the tool by this name.
    fn name(&self) -> &str;

    /// Human/model readable description.
    fn describe(&self) -> String;

    fn parameters(&self) -> ParameterSchema;

    fn spec(&self) -> ToolSpec {
        ToolSpec {
            name: self.name().to_string(),
            description: self.describe(),
            parameters: self.parameters(),
        }
    }

    /// Runs the tool. No retries are attempted by callers.
    async fn execute(&self, params: Value) -> Result<Value, ToolError>;
}
