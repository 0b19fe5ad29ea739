//! Agent defaults and construction from loaded settings.
//!
//! [`AgentConfig`] is the resolved, fully-defaulted view of the `config` crate's
//! [`Settings`](env_config::Settings). It builds each agent kind with the same prompt,
//! caps, sampling and memory limits.

use std::path::Path;
use std::sync::Arc;

use env_config::{LoadError, Settings, TrimPolicySetting, UnknownToolSetting};

use crate::agent::{
    AgentBuilder, ReActAgent, ToolCallingAgent, UnknownToolPolicy, DEFAULT_REACT_MAX_ITERATIONS,
    DEFAULT_SYSTEM_PROMPT, DEFAULT_TOOL_CALLING_MAX_ITERATIONS,
};
use crate::llm::LlmClient;
use crate::memory::{MemoryConfig, TrimPolicy};
use crate::tools::ToolRegistry;

/// App name used for the XDG config dir and the env key prefix (`REAGENT_`).
pub const APP_NAME: &str = "reagent";

pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_MAX_TOKENS: u32 = 4096;

#[derive(Debug, Clone, PartialEq)]
pub struct AgentConfig {
    pub system_prompt: String,
    /// Tool-calling loop cap; also the builder's round cap.
    pub max_iterations: usize,
    pub react_max_iterations: usize,
    /// Engine cap for built graphs; `None` keeps the builder's choice.
    pub graph_max_iterations: Option<usize>,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
    pub unknown_tool: UnknownToolPolicy,
    pub memory: MemoryConfig,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            max_iterations: DEFAULT_TOOL_CALLING_MAX_ITERATIONS,
            react_max_iterations: DEFAULT_REACT_MAX_ITERATIONS,
            graph_max_iterations: None,
            temperature: Some(DEFAULT_TEMPERATURE),
            max_tokens: Some(DEFAULT_MAX_TOKENS),
            unknown_tool: UnknownToolPolicy::default(),
            memory: MemoryConfig::default(),
        }
    }
}

impl AgentConfig {
    /// Applies every field set in `settings` over the defaults.
    pub fn from_settings(settings: &Settings) -> Self {
        let defaults = Self::default();
        let agent = &settings.agent;
        let mem = &settings.memory;
        let memory = MemoryConfig {
            max_messages: mem.max_messages.unwrap_or(defaults.memory.max_messages),
            policy: match mem.policy {
                Some(TrimPolicySetting::Fifo) => TrimPolicy::Fifo,
                Some(TrimPolicySetting::Summarize) => TrimPolicy::Summarize,
                None => defaults.memory.policy,
            },
            long_term_min_chars: mem
                .long_term_min_chars
                .unwrap_or(defaults.memory.long_term_min_chars),
            digest_snippet_chars: mem
                .digest_snippet_chars
                .unwrap_or(defaults.memory.digest_snippet_chars),
        };
        Self {
            system_prompt: agent
                .system_prompt
                .clone()
                .unwrap_or(defaults.system_prompt),
            max_iterations: agent.max_iterations.unwrap_or(defaults.max_iterations),
            react_max_iterations: agent
                .react_max_iterations
                .unwrap_or(defaults.react_max_iterations),
            graph_max_iterations: agent.graph_max_iterations,
            temperature: agent.temperature.or(defaults.temperature),
            max_tokens: agent.max_tokens.or(defaults.max_tokens),
            unknown_tool: match agent.unknown_tool {
                Some(UnknownToolSetting::Skip) => UnknownToolPolicy::Skip,
                Some(UnknownToolSetting::Report) => UnknownToolPolicy::Report,
                None => defaults.unknown_tool,
            },
            memory,
        }
    }

    /// Loads from XDG `config.toml`, `./.env` and the environment.
    pub fn load() -> Result<Self, LoadError> {
        Self::load_from(None)
    }

    /// Like [`load`](Self::load) but reads `.env` from `dotenv_dir`.
    pub fn load_from(dotenv_dir: Option<&Path>) -> Result<Self, LoadError> {
        let settings = env_config::load(APP_NAME, dotenv_dir)?;
        let config = Self::from_settings(&settings);
        tracing::debug!(
            max_iterations = config.max_iterations,
            react_max_iterations = config.react_max_iterations,
            memory_policy = ?config.memory.policy,
            "Loaded agent config"
        );
        Ok(config)
    }

    pub fn tool_calling_agent(
        &self,
        llm: Arc<dyn LlmClient>,
        tools: Arc<ToolRegistry>,
    ) -> ToolCallingAgent {
        ToolCallingAgent::new(llm, tools, self.system_prompt.clone())
            .with_max_iterations(self.max_iterations)
            .with_memory(self.memory.clone())
            .with_sampling(self.temperature, self.max_tokens)
            .with_unknown_tool_policy(self.unknown_tool)
    }

    pub fn react_agent(&self, llm: Arc<dyn LlmClient>, tools: Arc<ToolRegistry>) -> ReActAgent {
        ReActAgent::new(llm, tools, self.system_prompt.clone())
            .with_max_iterations(self.react_max_iterations)
            .with_memory(self.memory.clone())
            .with_sampling(self.temperature, self.max_tokens)
    }

    /// Builder preloaded with this config; tools and looping are set by the caller.
    pub fn agent_builder(&self, llm: Arc<dyn LlmClient>) -> AgentBuilder {
        AgentBuilder::new(llm)
            .system_prompt(self.system_prompt.clone())
            .max_iterations(self.max_iterations)
            .graph_max_iterations(self.graph_max_iterations)
            .sampling(self.temperature, self.max_tokens)
            .unknown_tool_policy(self.unknown_tool)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::MockLlm;

    #[test]
    fn empty_settings_give_defaults() {
        let config = AgentConfig::from_settings(&Settings::default());
        assert_eq!(config, AgentConfig::default());
        assert_eq!(config.max_iterations, 5);
        assert_eq!(config.react_max_iterations, 10);
        assert_eq!(config.memory.max_messages, 100);
    }

    #[test]
    fn settings_override_defaults() {
        let settings = env_config::parse_settings(
            r#"
[agent]
system_prompt = "Be brief."
max_iterations = 2
unknown_tool = "report"

[memory]
max_messages = 8
policy = "summarize"
"#,
        )
        .unwrap();
        let config = AgentConfig::from_settings(&settings);
        assert_eq!(config.system_prompt, "Be brief.");
        assert_eq!(config.max_iterations, 2);
        assert_eq!(config.unknown_tool, UnknownToolPolicy::Report);
        assert_eq!(config.memory.max_messages, 8);
        assert_eq!(config.memory.policy, TrimPolicy::Summarize);
        assert_eq!(config.temperature, Some(DEFAULT_TEMPERATURE));
    }

    #[test]
    fn load_from_reads_dotenv_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(".env"),
            "REAGENT_AGENT_REACT_MAX_ITERATIONS=3\nREAGENT_MEMORY_POLICY=summarize\n",
        )
        .unwrap();
        let config = AgentConfig::load_from(Some(dir.path())).unwrap();
        assert_eq!(config.react_max_iterations, 3);
        assert_eq!(config.memory.policy, TrimPolicy::Summarize);
    }

    #[test]
    fn agents_pick_up_caps() {
        let config = AgentConfig {
            max_iterations: 3,
            react_max_iterations: 7,
            ..AgentConfig::default()
        };
        let llm: Arc<dyn LlmClient> = Arc::new(MockLlm::with_no_tool_calls("ok"));
        let tools = Arc::new(ToolRegistry::new());
        assert_eq!(
            config
                .tool_calling_agent(llm.clone(), tools.clone())
                .max_iterations(),
            3
        );
        assert_eq!(config.react_agent(llm, tools).max_iterations(), 7);
    }
}
