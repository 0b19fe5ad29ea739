//! Parse a project `.env` file into a key-value map. Nothing is written to the process env.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

fn dotenv_path(override_dir: Option<&Path>) -> Option<PathBuf> {
    let dir = override_dir
        .map(Path::to_path_buf)
        .or_else(|| std::env::current_dir().ok())?;
    let path = dir.join(".env");
    path.is_file().then_some(path)
}

fn unquote(value: &str) -> String {
    if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
        return value[1..value.len() - 1].replace("\\\"", "\"");
    }
    value
        .strip_prefix('\'')
        .and_then(|s| s.strip_suffix('\''))
        .unwrap_or(value)
        .to_string()
}

/// Lines are `KEY=VALUE` or `export KEY=VALUE`; blank lines and `#` comment lines are skipped.
///
/// Double-quoted values honour `\"`; single-quoted values are taken literally.
/// A later line for the same key wins.
pub(crate) fn parse(content: &str) -> HashMap<String, String> {
    let mut out = HashMap::new();
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let line = line.strip_prefix("export ").unwrap_or(line);
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        let key = key.trim();
        if key.is_empty() {
            continue;
        }
        out.insert(key.to_string(), unquote(value.trim()));
    }
    out
}

/// Loads `.env` from `override_dir` (or the current directory). A missing file yields an empty map.
pub fn load_env_map(override_dir: Option<&Path>) -> std::io::Result<HashMap<String, String>> {
    match dotenv_path(override_dir) {
        Some(path) => Ok(parse(&std::fs::read_to_string(path)?)),
        None => Ok(HashMap::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_pairs_and_skips_comments() {
        let m = parse("\n# comment\nFOO=bar\n  \nBAZ = quux\n");
        assert_eq!(m.len(), 2);
        assert_eq!(m.get("FOO").map(String::as_str), Some("bar"));
        assert_eq!(m.get("BAZ").map(String::as_str), Some("quux"));
    }

    #[test]
    fn export_prefix_is_accepted() {
        let m = parse("export REAGENT_AGENT_MAX_ITERATIONS=3\n");
        assert_eq!(
            m.get("REAGENT_AGENT_MAX_ITERATIONS").map(String::as_str),
            Some("3")
        );
    }

    #[test]
    fn quoting_rules() {
        let m = parse("A=\"hello world\"\nB='single # kept'\nC=\"say \\\"hi\\\"\"\nD=\"\"\n");
        assert_eq!(m.get("A").map(String::as_str), Some("hello world"));
        assert_eq!(m.get("B").map(String::as_str), Some("single # kept"));
        assert_eq!(m.get("C").map(String::as_str), Some("say \"hi\""));
        assert_eq!(m.get("D").map(String::as_str), Some(""));
    }

    #[test]
    fn malformed_lines_skipped() {
        let m = parse("NOT_A_PAIR\n=value_only\nKEY=ok\n");
        assert_eq!(m.len(), 1);
        assert_eq!(m.get("KEY").map(String::as_str), Some("ok"));
    }

    #[test]
    fn later_line_wins() {
        let m = parse("KEY=first\nKEY=second\n");
        assert_eq!(m.get("KEY").map(String::as_str), Some("second"));
    }

    #[test]
    fn load_env_map_missing_file_returns_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_env_map(Some(dir.path())).unwrap().is_empty());
    }

    #[test]
    fn load_env_map_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(".env"), "A=1\nB=2\n").unwrap();
        let m = load_env_map(Some(dir.path())).unwrap();
        assert_eq!(m.get("A").map(String::as_str), Some("1"));
        assert_eq!(m.get("B").map(String::as_str), Some("2"));
    }
}
