//! Closure-backed tool.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use super::spec::ParameterSchema;
use super::{Tool, ToolError};

type BoxFuture = Pin<Box<dyn Future<Output = Result<Value, ToolError>> + Send>>;
type Handler = Arc<dyn Fn(Value) -> BoxFuture + Send + Sync>;

/// A [`Tool`] whose behavior is a closure: register a capability without a new type.
///
/// ```
/// use reagent::tools::{FunctionTool, ParameterSpec, Tool};
/// use serde_json::json;
///
/// let upper = FunctionTool::new("upper", "Uppercases `text`", |args| {
///     let text = args["text"].as_str().unwrap_or_default().to_uppercase();
///     Ok(json!(text))
/// })
/// .with_parameter("text", ParameterSpec::required("string", "input"));
/// assert_eq!(upper.name(), "upper");
/// ```
#[derive(Clone)]
pub struct FunctionTool {
    name: String,
    description: String,
    parameters: ParameterSchema,
    handler: Handler,
}

impl FunctionTool {
    /// Synchronous handler.
    pub fn new<F>(name: impl Into<String>, description: impl Into<String>, handler: F) -> Self
    where
        F: Fn(Value) -> Result<Value, ToolError> + Send + Sync + 'static,
    {
        let handler = Arc::new(handler);
        Self::new_async(name, description, move |args| {
            let handler = handler.clone();
            async move { handler(args) }
        })
    }

    /// Asynchronous handler.
    pub fn new_async<F, Fut>(
        name: impl Into<String>,
        description: impl Into<String>,
        handler: F,
    ) -> Self
    where
        F: Fn(Value) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Value, ToolError>> + Send + 'static,
    {
        Self {
            name: name.into(),
            description: description.into(),
            parameters: ParameterSchema::new(),
            handler: Arc::new(move |args| Box::pin(handler(args))),
        }
    }

    pub fn with_parameter(mut self, name: impl Into<String>, spec: super::ParameterSpec) -> Self {
        self.parameters.insert(name.into(), spec);
        self
    }
}

#[async_trait]
impl Tool for FunctionTool {
    fn name(&self) -> &str {
        &self.name
    }

    fn describe(&self) -> String {
        self.description.clone()
    }

    fn parameters(&self) -> ParameterSchema {
        self.parameters.clone()
    }

    async fn execute(&self, params: Value) -> Result<Value, ToolError> {
        (self.handler)(params).await
    }
}
