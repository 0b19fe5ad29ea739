//! Bounded "consult model, interpret, repeat" driver shared by both control loops.
//!
//! The driver owns the iteration budget and the model call; a [`ResponseInterpreter`]
//! owns everything protocol-specific (what to send, how to read the reply, which
//! tools to run). Exhausting the budget is not an error: the outcome carries
//! [`MAX_ITERATIONS_REACHED`] and `exhausted = true`.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::AgentError;
use crate::llm::{LlmClient, LlmRequest, LlmResponse};

/// Answer returned when the iteration cap is reached without a final answer.
pub const MAX_ITERATIONS_REACHED: &str =
    "Maximum number of iterations reached without a final answer.";

/// What the interpreter decided after one model reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Consult the model again.
    Continue,
    /// Stop with this final answer.
    Finish(String),
}

/// Protocol-specific half of a control loop.
#[async_trait]
pub trait ResponseInterpreter: Send {
    /// Request for the next model call, built from the interpreter's current view.
    fn build_request(&self) -> LlmRequest;

    /// Reads one reply; may run tools and record messages before deciding.
    async fn interpret(&mut self, response: LlmResponse) -> Step;
}

/// Result of one driven loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoopOutcome {
    pub answer: String,
    /// Model consultations actually made.
    pub iterations: usize,
    pub exhausted: bool,
}

/// Runs an interpreter for at most `max_iterations` model calls.
#[derive(Clone)]
pub struct LoopDriver {
    llm: Arc<dyn LlmClient>,
    max_iterations: usize,
}

impl LoopDriver {
    pub fn new(llm: Arc<dyn LlmClient>, max_iterations: usize) -> Self {
        Self {
            llm,
            max_iterations,
        }
    }

    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    /// Model failures propagate immediately; nothing is retried.
    pub async fn run<I>(&self, interpreter: &mut I) -> Result<LoopOutcome, AgentError>
    where
        I: ResponseInterpreter + ?Sized,
    {
        for iteration in 1..=self.max_iterations {
            let request = interpreter.build_request();
            tracing::debug!(
                iteration = iteration,
                messages = request.messages.len(),
                tools = request.tools.len(),
                "Consulting model"
            );
            let response = self.llm.invoke(&request).await?;
            if let Step::Finish(answer) = interpreter.interpret(response).await {
                tracing::info!(iterations = iteration, "Loop finished with answer");
                return Ok(LoopOutcome {
                    answer,
                    iterations: iteration,
                    exhausted: false,
                });
            }
        }
        tracing::warn!(
            max_iterations = self.max_iterations,
            "Loop hit iteration cap without a final answer"
        );
        Ok(LoopOutcome {
            answer: MAX_ITERATIONS_REACHED.to_string(),
            iterations: self.max_iterations,
            exhausted: true,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::MockLlm;
    use crate::message::Message;

    /// Finishes once it has seen `finish_after` replies.
    struct Counting {
        seen: usize,
        finish_after: usize,
    }

    #[async_trait]
    impl ResponseInterpreter for Counting {
        fn build_request(&self) -> LlmRequest {
            LlmRequest::new(vec![Message::user(format!("round {}", self.seen + 1))])
        }

        async fn interpret(&mut self, response: LlmResponse) -> Step {
            self.seen += 1;
            if self.seen == self.finish_after {
                Step::Finish(response.content)
            } else {
                Step::Continue
            }
        }
    }

    /// **Scenario**: the driver stops on the first Finish and reports iterations used.
    #[tokio::test]
    async fn stops_on_finish() {
        let llm = Arc::new(MockLlm::with_no_tool_calls("done"));
        let driver = LoopDriver::new(llm.clone(), 5);
        let mut interp = Counting {
            seen: 0,
            finish_after: 3,
        };
        let out = driver.run(&mut interp).await.unwrap();
        assert_eq!(out.answer, "done");
        assert_eq!(out.iterations, 3);
        assert!(!out.exhausted);
        assert_eq!(llm.call_count(), 3);
        assert_eq!(llm.requests()[2].messages[0].content, "round 3");
    }

    /// **Scenario**: never finishing yields the fallback after exactly max calls.
    #[tokio::test]
    async fn exhausts_at_cap() {
        let llm = Arc::new(MockLlm::with_no_tool_calls("x"));
        let driver = LoopDriver::new(llm.clone(), 4);
        let mut interp = Counting {
            seen: 0,
            finish_after: usize::MAX,
        };
        let out = driver.run(&mut interp).await.unwrap();
        assert_eq!(out.answer, MAX_ITERATIONS_REACHED);
        assert_eq!(out.iterations, 4);
        assert!(out.exhausted);
        assert_eq!(llm.call_count(), 4);
    }

    /// **Scenario**: a model failure aborts the loop with ModelCall.
    #[tokio::test]
    async fn model_failure_propagates() {
        let driver = LoopDriver::new(Arc::new(MockLlm::failing("503")), 4);
        let mut interp = Counting {
            seen: 0,
            finish_after: 1,
        };
        let err = driver.run(&mut interp).await.unwrap_err();
        assert!(matches!(err, AgentError::ModelCall(m) if m == "503"));
    }
}
