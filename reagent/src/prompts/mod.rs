//! Prompt templates with `{{variable}}` placeholders, plus a few built-in system prompts.
//!
//! ```
//! use std::collections::HashMap;
//!
//! use reagent::prompts::{render, ASSISTANT_TEMPLATE};
//!
//! let vars = HashMap::from([("agent_name", "Reagent"), ("current_time", "noon")]);
//! let prompt = render(ASSISTANT_TEMPLATE, &vars);
//! assert!(prompt.contains("Your name is Reagent."));
//! ```

mod template;

pub use template::{extract_variables, has_variables, render, render_value};

/// Variables: `agent_name`, `current_time`.
pub const ASSISTANT_TEMPLATE: &str = "You are a helpful AI assistant. \
     Your name is {{agent_name}}. \
     Current time: {{current_time}}. \
     Always provide accurate and helpful responses.";

/// Variables: `focus_areas`.
pub const CODE_REVIEWER_TEMPLATE: &str = "You are an expert code reviewer. \
     Your task is to review code and provide constructive feedback. \
     Focus on: {{focus_areas}}. \
     Be specific and actionable in your feedback.";

/// Variables: `data_context`.
pub const DATA_ANALYST_TEMPLATE: &str = "You are a data analyst. \
     Analyze the provided data and explain insights clearly. \
     Use visualizations when appropriate. \
     Current data context: {{data_context}}";
