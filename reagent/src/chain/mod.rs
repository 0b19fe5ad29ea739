//! Composable async steps.
//!
//! A [`Chain`] wraps one fallible async function `I -> O` under a name. Chains compose
//! sequentially with [`pipe`](Chain::pipe) / [`pipe_fn`](Chain::pipe_fn), fan one input
//! out to several chains with [`batch`](Chain::batch), and take a fixed JSON context
//! with [`bind`](Chain::bind). A failure is wrapped in [`AgentError::Chain`] naming the
//! chain, unless an error handler turns it into an output.
//!
//! ```
//! use reagent::chain::Chain;
//!
//! # async fn demo() {
//! let words = Chain::from_fn("split", |s: String| {
//!     Ok(s.split_whitespace().map(str::to_string).collect::<Vec<_>>())
//! })
//! .pipe_fn(|words: Vec<String>| Ok(words.len()));
//!
//! assert_eq!(words.name(), "split->split-fn");
//! assert_eq!(words.invoke("a b c".to_string()).await.unwrap(), 3);
//! # }
//! ```

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::AgentError;

type BoxFuture<O> = Pin<Box<dyn Future<Output = Result<O, AgentError>> + Send>>;
type StepFn<I, O> = Arc<dyn Fn(I) -> BoxFuture<O> + Send + Sync>;
type ErrorHandler<O> = Arc<dyn Fn(AgentError) -> O + Send + Sync>;

/// Key under which [`Chain::bind`] places the caller's input.
pub const BOUND_INPUT_KEY: &str = "input";

/// A named async step from `I` to `O`.
pub struct Chain<I, O> {
    name: String,
    step: StepFn<I, O>,
    error_handler: Option<ErrorHandler<O>>,
}

impl<I, O> Clone for Chain<I, O> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            step: self.step.clone(),
            error_handler: self.error_handler.clone(),
        }
    }
}

impl<I, O> std::fmt::Debug for Chain<I, O> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Chain")
            .field("name", &self.name)
            .field("has_error_handler", &self.error_handler.is_some())
            .finish()
    }
}

impl<I, O> Chain<I, O>
where
    I: Send + 'static,
    O: Send + 'static,
{
    /// Asynchronous step.
    pub fn new<F, Fut>(name: impl Into<String>, step: F) -> Self
    where
        F: Fn(I) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<O, AgentError>> + Send + 'static,
    {
        Self {
            name: name.into(),
            step: Arc::new(move |input| Box::pin(step(input))),
            error_handler: None,
        }
    }

    /// Synchronous step.
    pub fn from_fn<F>(name: impl Into<String>, step: F) -> Self
    where
        F: Fn(I) -> Result<O, AgentError> + Send + Sync + 'static,
    {
        let step = Arc::new(step);
        Self::new(name, move |input| {
            let step = step.clone();
            async move { step(input) }
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Replaces any failure of this chain with `handler(error)`.
    pub fn with_error_handler<H>(mut self, handler: H) -> Self
    where
        H: Fn(AgentError) -> O + Send + Sync + 'static,
    {
        self.error_handler = Some(Arc::new(handler));
        self
    }

    pub async fn invoke(&self, input: I) -> Result<O, AgentError> {
        tracing::debug!(chain = %self.name, "Invoking chain");
        match (self.step)(input).await {
            Ok(output) => Ok(output),
            Err(error) => {
                tracing::error!(chain = %self.name, error = %error, "Chain failed");
                match &self.error_handler {
                    Some(handler) => Ok(handler(error)),
                    None => Err(AgentError::Chain {
                        name: self.name.clone(),
                        source: Box::new(error),
                    }),
                }
            }
        }
    }

    /// Runs `self`, then feeds its output to `next`. The result is named `"<self>-><next>"`.
    pub fn pipe<O2>(self, next: Chain<O, O2>) -> Chain<I, O2>
    where
        O2: Send + 'static,
    {
        let name = format!("{}->{}", self.name, next.name);
        let first = Arc::new(self);
        let next = Arc::new(next);
        Chain::new(name, move |input| {
            let first = first.clone();
            let next = next.clone();
            async move {
                let intermediate = first.invoke(input).await?;
                next.invoke(intermediate).await
            }
        })
    }

    /// [`pipe`](Self::pipe) into a synchronous function step named `"<self>-fn"`.
    pub fn pipe_fn<O2, F>(self, step: F) -> Chain<I, O2>
    where
        O2: Send + 'static,
        F: Fn(O) -> Result<O2, AgentError> + Send + Sync + 'static,
    {
        let name = format!("{}-fn", self.name);
        self.pipe(Chain::from_fn(name, step))
    }
}

impl<T> Chain<T, T>
where
    T: Send + 'static,
{
    pub fn identity() -> Self {
        Self::from_fn("identity", |input| Ok(input))
    }
}

impl<T> Chain<T, Vec<T>>
where
    T: Clone + Send + 'static,
{
    /// Runs every chain on a copy of the input, in order; the first failure aborts.
    pub fn batch(chains: Vec<Chain<T, T>>) -> Self {
        let chains = Arc::new(chains);
        Self::new("batch", move |input: T| {
            let chains = chains.clone();
            async move {
                let mut results = Vec::with_capacity(chains.len());
                for chain in chains.iter() {
                    results.push(chain.invoke(input.clone()).await?);
                }
                Ok(results)
            }
        })
    }
}

impl<O> Chain<Value, O>
where
    O: Send + 'static,
{
    /// Fixes a context object: the bound chain takes any serializable input and calls
    /// this step with `context` plus the input under [`BOUND_INPUT_KEY`].
    ///
    /// Name and error handler carry over.
    pub fn bind<I>(self, context: Map<String, Value>) -> Chain<I, O>
    where
        I: Serialize + Send + 'static,
    {
        let step = self.step;
        let context = Arc::new(context);
        let bound = Chain::new(self.name, move |input: I| {
            let step = step.clone();
            let context = context.clone();
            async move {
                let input = serde_json::to_value(input).map_err(|e| {
                    AgentError::ExecutionFailed(format!("cannot serialize bound input: {e}"))
                })?;
                let mut ctx = (*context).clone();
                ctx.insert(BOUND_INPUT_KEY.to_string(), input);
                step(Value::Object(ctx)).await
            }
        });
        Chain {
            error_handler: self.error_handler,
            ..bound
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn add(n: i64) -> Chain<i64, i64> {
        Chain::from_fn(format!("add{n}"), move |x: i64| Ok(x + n))
    }

    fn fail(name: &str) -> Chain<i64, i64> {
        Chain::from_fn(name, |_: i64| Err(AgentError::ExecutionFailed("boom".into())))
    }

    /// **Scenario**: piped chains run left to right and compose their names.
    #[tokio::test]
    async fn pipe_runs_in_order() {
        let chain = add(1).pipe(Chain::from_fn("double", |x: i64| Ok(x * 2)));
        assert_eq!(chain.name(), "add1->double");
        assert_eq!(chain.invoke(3).await.unwrap(), 8);
    }

    /// **Scenario**: an async step composes with sync ones.
    #[tokio::test]
    async fn async_step_pipes() {
        let chain = Chain::new("fetch", |x: i64| async move {
            tokio::task::yield_now().await;
            Ok(x.to_string())
        })
        .pipe_fn(|s: String| Ok(format!("[{s}]")));
        assert_eq!(chain.name(), "fetch->fetch-fn");
        assert_eq!(chain.invoke(7).await.unwrap(), "[7]");
    }

    /// **Scenario**: identity returns its input.
    #[tokio::test]
    async fn identity_is_passthrough() {
        assert_eq!(Chain::<&str, &str>::identity().invoke("x").await.unwrap(), "x");
    }

    /// **Scenario**: a failure is wrapped once per enclosing chain, innermost first.
    #[tokio::test]
    async fn failure_names_the_chain() {
        let err = fail("parse").pipe(add(1)).invoke(0).await.unwrap_err();
        match err {
            AgentError::Chain { name, source } => {
                assert_eq!(name, "parse->add1");
                assert!(matches!(*source, AgentError::Chain { ref name, .. } if name == "parse"));
            }
            other => panic!("expected Chain, got {other:?}"),
        }
    }

    /// **Scenario**: an error handler turns a failure into an output and the pipe continues.
    #[tokio::test]
    async fn error_handler_recovers() {
        let chain = fail("flaky")
            .with_error_handler(|_| 10)
            .pipe(add(1));
        assert_eq!(chain.invoke(0).await.unwrap(), 11);
    }

    /// **Scenario**: batch runs each chain on the same input and collects in order.
    #[tokio::test]
    async fn batch_collects_in_order() {
        let chain = Chain::batch(vec![add(1), add(10), Chain::identity()]);
        assert_eq!(chain.name(), "batch");
        assert_eq!(chain.invoke(5).await.unwrap(), vec![6, 15, 5]);
    }

    /// **Scenario**: one failing member fails the whole batch.
    #[tokio::test]
    async fn batch_fails_on_first_error() {
        let chain = Chain::batch(vec![add(1), fail("bad")]);
        assert!(matches!(
            chain.invoke(1).await,
            Err(AgentError::Chain { ref name, .. }) if name == "batch"
        ));
    }

    /// **Scenario**: bind merges the fixed context with the caller input under `input`.
    #[tokio::test]
    async fn bind_supplies_context() {
        let greet = Chain::from_fn("greet", |ctx: Value| {
            Ok(format!(
                "{}, {}",
                ctx["greeting"].as_str().unwrap_or_default(),
                ctx[BOUND_INPUT_KEY].as_str().unwrap_or_default()
            ))
        });
        let mut context = Map::new();
        context.insert("greeting".into(), json!("Hello"));
        let bound: Chain<&str, String> = greet.bind(context);

        assert_eq!(bound.name(), "greet");
        assert_eq!(bound.invoke("Ada").await.unwrap(), "Hello, Ada");
    }

    /// **Scenario**: a caller-supplied `input` key in the context is overwritten by the input.
    #[tokio::test]
    async fn bind_input_overrides_context_key() {
        let echo = Chain::from_fn("echo", |ctx: Value| Ok(ctx[BOUND_INPUT_KEY].clone()));
        let mut context = Map::new();
        context.insert(BOUND_INPUT_KEY.into(), json!("stale"));
        let bound: Chain<i64, Value> = echo.bind(context);
        assert_eq!(bound.invoke(3).await.unwrap(), json!(3));
    }
}
