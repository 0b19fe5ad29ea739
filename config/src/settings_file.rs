//! Read `[agent]` and `[memory]` tables from `$XDG_CONFIG_HOME/<app>/config.toml`.

use std::path::{Path, PathBuf};

use crate::{LoadError, Settings};

/// Location of the app's `config.toml`.
///
/// `XDG_CONFIG_HOME` wins when set and non-empty; otherwise the platform config dir
/// from `dirs`. Returns `None` when neither is known.
pub fn config_path(app_name: &str) -> Option<PathBuf> {
    let base = std::env::var_os("XDG_CONFIG_HOME")
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .or_else(dirs::config_dir)?;
    Some(base.join(app_name).join("config.toml"))
}

/// Parses settings from TOML text. Unknown tables are ignored.
pub fn parse(content: &str) -> Result<Settings, LoadError> {
    Ok(toml::from_str(content)?)
}

/// Reads settings from `path`. A missing file yields default (empty) settings.
pub fn read_path(path: &Path) -> Result<Settings, LoadError> {
    if !path.is_file() {
        return Ok(Settings::default());
    }
    let content = std::fs::read_to_string(path).map_err(LoadError::ConfigRead)?;
    parse(&content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TrimPolicySetting;

    #[test]
    fn missing_file_returns_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = read_path(&dir.path().join("config.toml")).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn reads_agent_and_memory_tables() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
[agent]
system_prompt = "Be brief."
max_iterations = 7
temperature = 0.2

[memory]
max_messages = 40
policy = "summarize"
"#,
        )
        .unwrap();

        let settings = read_path(&path).unwrap();
        assert_eq!(settings.agent.system_prompt.as_deref(), Some("Be brief."));
        assert_eq!(settings.agent.max_iterations, Some(7));
        assert_eq!(settings.agent.temperature, Some(0.2));
        assert_eq!(settings.memory.max_messages, Some(40));
        assert_eq!(settings.memory.policy, Some(TrimPolicySetting::Summarize));
    }

    #[test]
    fn unknown_tables_are_ignored() {
        let settings = parse("[other]\nkey = \"ignored\"\n").unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn invalid_toml_returns_parse_error() {
        let result = parse("not valid toml [[[\n");
        assert!(matches!(result, Err(LoadError::ConfigParse(_))));
    }

    #[test]
    fn config_path_ends_with_app_and_file_name() {
        if let Some(path) = config_path("reagent-test-app") {
            assert!(path.ends_with("reagent-test-app/config.toml"));
        }
    }
}
