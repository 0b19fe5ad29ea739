//! Load reagent settings from XDG `config.toml`, project `.env` and the process environment.
//!
//! Priority per field: **process env > .env > XDG `config.toml`**. The TOML file carries
//! `[agent]` and `[memory]` tables; environment keys are `<APP>_<SECTION>_<FIELD>`, e.g.
//! `REAGENT_AGENT_MAX_ITERATIONS` or `REAGENT_MEMORY_POLICY`. Fields left unset everywhere
//! stay `None` so the caller applies its own defaults.
//!
//! Unlike a plain dotenv loader, nothing is written back into the process environment.

mod dotenv;
mod settings_file;

use std::collections::HashMap;
use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;
use thiserror::Error;

pub use settings_file::{config_path, parse as parse_settings, read_path};

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("read config file: {0}")]
    ConfigRead(std::io::Error),
    #[error("parse config toml: {0}")]
    ConfigParse(#[from] toml::de::Error),
    #[error("read .env: {0}")]
    DotenvRead(std::io::Error),
    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: String, value: String },
}

/// Trim policy as written in settings (`"fifo"` / `"summarize"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrimPolicySetting {
    Fifo,
    Summarize,
}

impl FromStr for TrimPolicySetting {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "fifo" => Ok(Self::Fifo),
            "summarize" | "summary" => Ok(Self::Summarize),
            other => Err(format!("unknown trim policy: {other} (use fifo or summarize)")),
        }
    }
}

/// What the tool-calling loop does with a call naming an unregistered tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownToolSetting {
    Skip,
    Report,
}

impl FromStr for UnknownToolSetting {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "skip" => Ok(Self::Skip),
            "report" => Ok(Self::Report),
            other => Err(format!("unknown tool policy: {other} (use skip or report)")),
        }
    }
}

/// `[agent]` table.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AgentSettings {
    pub system_prompt: Option<String>,
    pub max_iterations: Option<usize>,
    pub react_max_iterations: Option<usize>,
    pub graph_max_iterations: Option<usize>,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
    pub unknown_tool: Option<UnknownToolSetting>,
}

/// `[memory]` table.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct MemorySettings {
    pub max_messages: Option<usize>,
    pub policy: Option<TrimPolicySetting>,
    pub long_term_min_chars: Option<usize>,
    pub digest_snippet_chars: Option<usize>,
}

/// Merged settings; every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub agent: AgentSettings,
    pub memory: MemorySettings,
}

/// Loads settings for `app_name` from all three sources.
///
/// * `app_name`: e.g. `"reagent"`; selects `~/.config/<app_name>/config.toml` and the
///   env key prefix (`REAGENT_`).
/// * `override_dir`: if `Some`, look for `.env` there instead of the current directory.
pub fn load(app_name: &str, override_dir: Option<&Path>) -> Result<Settings, LoadError> {
    let file = match config_path(app_name) {
        Some(path) => read_path(&path)?,
        None => Settings::default(),
    };
    let dotenv_map = dotenv::load_env_map(override_dir).map_err(LoadError::DotenvRead)?;
    let env_map: HashMap<String, String> = std::env::vars().collect();
    resolve(file, &dotenv_map, &env_map, app_name)
}

/// Overlays `.env` and environment values onto settings read from the file.
///
/// Pure over its inputs so precedence can be checked without touching the process env.
pub fn resolve(
    mut settings: Settings,
    dotenv_map: &HashMap<String, String>,
    env_map: &HashMap<String, String>,
    app_name: &str,
) -> Result<Settings, LoadError> {
    let prefix = env_prefix(app_name);
    let lookup = |section: &str, field: &str| -> Option<(String, String)> {
        let key = format!("{prefix}_{section}_{field}");
        let value = env_map.get(&key).or_else(|| dotenv_map.get(&key))?.clone();
        Some((key, value))
    };

    let agent = &mut settings.agent;
    if let Some((_, v)) = lookup("AGENT", "SYSTEM_PROMPT") {
        agent.system_prompt = Some(v);
    }
    overlay(&mut agent.max_iterations, lookup("AGENT", "MAX_ITERATIONS"))?;
    overlay(
        &mut agent.react_max_iterations,
        lookup("AGENT", "REACT_MAX_ITERATIONS"),
    )?;
    overlay(
        &mut agent.graph_max_iterations,
        lookup("AGENT", "GRAPH_MAX_ITERATIONS"),
    )?;
    overlay(&mut agent.temperature, lookup("AGENT", "TEMPERATURE"))?;
    overlay(&mut agent.max_tokens, lookup("AGENT", "MAX_TOKENS"))?;
    overlay(&mut agent.unknown_tool, lookup("AGENT", "UNKNOWN_TOOL"))?;

    let memory = &mut settings.memory;
    overlay(&mut memory.max_messages, lookup("MEMORY", "MAX_MESSAGES"))?;
    overlay(&mut memory.policy, lookup("MEMORY", "POLICY"))?;
    overlay(
        &mut memory.long_term_min_chars,
        lookup("MEMORY", "LONG_TERM_MIN_CHARS"),
    )?;
    overlay(
        &mut memory.digest_snippet_chars,
        lookup("MEMORY", "DIGEST_SNIPPET_CHARS"),
    )?;

    Ok(settings)
}

fn env_prefix(app_name: &str) -> String {
    app_name.to_uppercase().replace('-', "_")
}

fn overlay<T: FromStr>(
    slot: &mut Option<T>,
    found: Option<(String, String)>,
) -> Result<(), LoadError> {
    let Some((key, value)) = found else {
        return Ok(());
    };
    let parsed = value
        .trim()
        .parse::<T>()
        .map_err(|_| LoadError::InvalidValue { key, value })?;
    *slot = Some(parsed);
    Ok(())
}
