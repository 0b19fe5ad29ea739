//! Declarative think → act → observe agent graph.
//!
//! [`AgentBuilder`] wires three nodes on a [`StateGraph`] over [`AgentGraphState`]:
//! `think` consults the model, `act` runs the requested tools, `observe` marks the
//! round complete. Edges are think → act → observe with `think` as start.
//!
//! By default `observe` is terminal and an invocation performs exactly one round.
//! With [`AgentBuilder::looping`] the graph instead routes observe → think while the
//! model keeps requesting tools and fewer than `max_iterations` rounds have run.

mod act_node;
mod observe_node;
mod think_node;

pub use act_node::{ActNode, ACT_NODE};
pub use observe_node::{ObserveNode, OBSERVATION_COMPLETED, OBSERVE_NODE};
pub use think_node::{ThinkNode, THINK_NODE};

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::{AgentError, RunError};
use crate::graph::{CompilationError, CompiledStateGraph, StateGraph, StopReason, END};
use crate::llm::LlmClient;
use crate::state::AgentGraphState;
use crate::tools::{Tool, ToolRegistry};
use crate::traits::{Agent, AgentReply};

use super::driver::MAX_ITERATIONS_REACHED;
use super::prompt::{tool_calling_system_prompt, DEFAULT_SYSTEM_PROMPT};
use super::tool_calling::{UnknownToolPolicy, DEFAULT_TOOL_CALLING_MAX_ITERATIONS};

const ROUTE_CONTINUE: &str = "continue";
const ROUTE_DONE: &str = "done";

/// Nodes executed per round in looping mode.
const NODES_PER_ROUND: usize = 3;

/// Builder for the three-node agent graph.
///
/// # Example
///
/// ```rust,ignore
/// let reply = AgentBuilder::new(llm)
///     .system_prompt("You are terse.")
///     .tool(Arc::new(calculator))
///     .run("what is 2 + 3?")
///     .await?;
/// ```
pub struct AgentBuilder {
    llm: Arc<dyn LlmClient>,
    system_prompt: String,
    tools: ToolRegistry,
    max_iterations: usize,
    looping: bool,
    graph_max_iterations: Option<usize>,
    temperature: Option<f32>,
    max_tokens: Option<u32>,
    unknown_tool: UnknownToolPolicy,
}

impl AgentBuilder {
    pub fn new(llm: Arc<dyn LlmClient>) -> Self {
        Self {
            llm,
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            tools: ToolRegistry::new(),
            max_iterations: DEFAULT_TOOL_CALLING_MAX_ITERATIONS,
            looping: false,
            graph_max_iterations: None,
            temperature: None,
            max_tokens: None,
            unknown_tool: UnknownToolPolicy::default(),
        }
    }

    pub fn system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = prompt.into();
        self
    }

    /// Registers one tool. Same-named tools replace earlier ones.
    pub fn tool(mut self, tool: Arc<dyn Tool>) -> Self {
        self.tools.register(tool);
        self
    }

    /// Registers every tool of `registry`, keeping tools added earlier unless a name clashes.
    pub fn tools(mut self, registry: &ToolRegistry) -> Self {
        for name in registry.names() {
            if let Some(tool) = registry.get(&name) {
                self.tools.register(tool);
            }
        }
        self
    }

    /// Round cap used in looping mode.
    pub fn max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Re-enter `think` after `observe` while tool calls remain.
    pub fn looping(mut self, looping: bool) -> Self {
        self.looping = looping;
        self
    }

    /// Overrides the engine's node-execution cap.
    pub fn graph_max_iterations(mut self, cap: Option<usize>) -> Self {
        self.graph_max_iterations = cap;
        self
    }

    pub fn sampling(mut self, temperature: Option<f32>, max_tokens: Option<u32>) -> Self {
        self.temperature = temperature;
        self.max_tokens = max_tokens;
        self
    }

    pub fn unknown_tool_policy(mut self, policy: UnknownToolPolicy) -> Self {
        self.unknown_tool = policy;
        self
    }

    /// Wires and compiles the graph.
    pub fn build(self) -> Result<BuiltAgent, CompilationError> {
        let tools = Arc::new(self.tools);
        let system_prompt = tool_calling_system_prompt(&self.system_prompt, &tools.specs());
        let think = ThinkNode::new(self.llm, tools.clone(), system_prompt)
            .with_sampling(self.temperature, self.max_tokens);
        let act = ActNode::new(tools).with_unknown_tool_policy(self.unknown_tool);

        let mut graph = StateGraph::<AgentGraphState>::new();
        if let Some(cap) = self.graph_max_iterations {
            graph = graph.with_max_iterations(cap);
        } else if self.looping {
            graph = graph.with_max_iterations(
                self.max_iterations.saturating_mul(NODES_PER_ROUND).max(1),
            );
        }
        graph
            .add_node(THINK_NODE, Arc::new(think))
            .add_node(ACT_NODE, Arc::new(act))
            .add_node(OBSERVE_NODE, Arc::new(ObserveNode::new()))
            .add_edge(THINK_NODE, ACT_NODE)
            .add_edge(ACT_NODE, OBSERVE_NODE)
            .set_start(THINK_NODE);

        if self.looping {
            let max_rounds = u32::try_from(self.max_iterations).unwrap_or(u32::MAX);
            let route_table: HashMap<String, String> = [
                (ROUTE_CONTINUE.to_string(), THINK_NODE.to_string()),
                (ROUTE_DONE.to_string(), END.to_string()),
            ]
            .into_iter()
            .collect();
            graph.add_conditional_edges(
                OBSERVE_NODE,
                Arc::new(move |s: &AgentGraphState| {
                    if s.has_tool_calls && s.turns < max_rounds {
                        ROUTE_CONTINUE.to_string()
                    } else {
                        ROUTE_DONE.to_string()
                    }
                }),
                route_table,
            );
        } else {
            graph.add_terminal(OBSERVE_NODE);
        }

        Ok(BuiltAgent {
            graph: graph.compile()?,
            max_iterations: self.max_iterations,
            looping: self.looping,
        })
    }

    /// Builds the graph and runs it once for `message`.
    pub async fn run(self, message: &str) -> Result<AgentReply, RunError> {
        let agent = self.build()?;
        Ok(agent.invoke(message).await?)
    }
}

/// Compiled agent graph. Stateless between invocations: each call starts from a
/// fresh [`AgentGraphState`].
pub struct BuiltAgent {
    graph: CompiledStateGraph<AgentGraphState>,
    max_iterations: usize,
    looping: bool,
}

impl BuiltAgent {
    pub fn graph(&self) -> &CompiledStateGraph<AgentGraphState> {
        &self.graph
    }

    pub fn is_looping(&self) -> bool {
        self.looping
    }

    /// Runs the graph for `message` and returns the final state.
    pub async fn invoke_state(&self, message: &str) -> Result<AgentGraphState, AgentError> {
        self.graph.invoke_state(AgentGraphState::new(message)).await
    }

    /// Runs the graph for `message`.
    ///
    /// The reply is the last assistant message. In looping mode, a run that stops on
    /// the round or engine cap with tool calls still pending is reported as exhausted
    /// with the fixed fallback text.
    pub async fn invoke(&self, message: &str) -> Result<AgentReply, AgentError> {
        let run = self.graph.invoke(AgentGraphState::new(message)).await?;
        let state = run.state;
        let rounds = state.turns as usize;
        let exhausted = self.looping
            && state.has_tool_calls
            && (run.stop == StopReason::IterationCap || rounds >= self.max_iterations);

        let content = if exhausted {
            MAX_ITERATIONS_REACHED.to_string()
        } else {
            state
                .last_assistant_reply()
                .map(str::to_string)
                .or(state.ai_thought)
                .unwrap_or_default()
        };
        tracing::debug!(rounds, steps = run.steps, stop = ?run.stop, exhausted, "Agent graph finished");
        Ok(AgentReply {
            content,
            iterations: rounds,
            exhausted,
            trace: Vec::new(),
        })
    }
}

#[async_trait]
impl Agent for BuiltAgent {
    fn name(&self) -> &str {
        "graph"
    }

    async fn chat(&mut self, message: &str) -> Result<AgentReply, AgentError> {
        self.invoke(message).await
    }
}
