//! System prompts for the two control loops.

use crate::tools::ToolSpec;

pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful assistant.";

/// Base prompt, tool catalogue (`- name: description` lines) and tool-use instructions.
pub fn tool_calling_system_prompt(base: &str, tools: &[ToolSpec]) -> String {
    let mut prompt = String::from(base);
    prompt.push_str("\n\nYou have access to the following tools:\n\n");
    if tools.is_empty() {
        prompt.push_str("No tools available.");
    } else {
        for spec in tools {
            prompt.push_str(&format!("- {}: {}\n", spec.name, spec.description));
        }
    }
    prompt.push_str(
        "\n\nWhen you need to call a function, use the tool_calls format.\n\
         After getting the tool results, generate your final response.",
    );
    prompt
}

/// Base prompt plus the Thought/Action/Action Input/Observation protocol and tool names.
pub fn react_system_prompt(base: &str, tool_names: &[String]) -> String {
    let tools = if tool_names.is_empty() {
        "none".to_string()
    } else {
        tool_names.join(", ")
    };
    format!(
        "{base}\n\n\
         You are a ReAct agent. Follow this format:\n\n\
         Thought: [your reasoning about what to do next]\n\
         Action: [tool name to use, or 'finish' if done]\n\
         Action Input: [input to the tool in JSON format]\n\
         Observation: [result from the tool]\n\n\
         Available tools: {tools}\n\n\
         Repeat Thought->Action->Action Input->Observation until you can answer the question.\n\
         When done, use 'finish' as the action with your final answer in the observation."
    )
}
