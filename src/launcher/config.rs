/*!
 * Workload Configuration
 * Parses the file describing which programs to launch, with what
 * priority and size
 */

use crate::core::{Priority, SchedError, SchedResult, Size};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One program to launch and schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct WorkloadSpec {
    pub priority: Priority,
    pub size: Size,
    pub command: String,
    #[serde(default)]
    pub args: Vec<String>,
}

/// The full workload read from disk.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct WorkloadConfig {
    pub entries: Vec<WorkloadSpec>,
}

impl WorkloadConfig {
    /// Load a workload file. `.json` files hold an array of specs; anything
    /// else is the plain line format `<priority> <size> <command> [args...]`
    /// with `#` comments.
    pub fn load(path: impl AsRef<Path>) -> SchedResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| SchedError::InvalidConfig(format!("{}: {}", path.display(), e)))?;

        if path.extension().is_some_and(|ext| ext == "json") {
            Self::parse_json(&text)
        } else {
            Self::parse_plain(&text)
        }
    }

    /// Parse the JSON form: `[{"priority": .., "size": .., "command": .., "args": [..]}]`.
    pub fn parse_json(text: &str) -> SchedResult<Self> {
        let entries: Vec<WorkloadSpec> = serde_json::from_str(text)
            .map_err(|e| SchedError::InvalidConfig(e.to_string()))?;
        Ok(Self { entries })
    }

    /// Parse the plain line form, one process per line.
    pub fn parse_plain(text: &str) -> SchedResult<Self> {
        let mut entries = Vec::new();

        for (lineno, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let mut fields = line.split_whitespace();
            let spec = (|| {
                let priority = fields.next()?.parse::<Priority>().ok()?;
                let size = fields.next()?.parse::<Size>().ok()?;
                let command = fields.next()?.to_string();
                let args = fields.map(str::to_string).collect();
                Some(WorkloadSpec {
                    priority,
                    size,
                    command,
                    args,
                })
            })()
            .ok_or_else(|| {
                SchedError::InvalidConfig(format!(
                    "line {}: expected `<priority> <size> <command> [args...]`, got `{}`",
                    lineno + 1,
                    line
                ))
            })?;

            entries.push(spec);
        }

        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_plain() {
        let text = "\
# workload: two printers and a sleeper
3 30 ./printchars a 30
1 10 ./printchars b 10

7 0 /bin/sleep 1
";
        let config = WorkloadConfig::parse_plain(text).unwrap();
        assert_eq!(config.len(), 3);
        assert_eq!(
            config.entries[0],
            WorkloadSpec {
                priority: 3,
                size: 30,
                command: "./printchars".into(),
                args: vec!["a".into(), "30".into()],
            }
        );
        assert_eq!(config.entries[2].command, "/bin/sleep");
        assert_eq!(config.entries[2].priority, 7);
    }

    #[test]
    fn test_parse_plain_rejects_short_line() {
        let err = WorkloadConfig::parse_plain("3 ./printchars\n").unwrap_err();
        assert!(matches!(err, SchedError::InvalidConfig(msg) if msg.contains("line 1")));
    }

    #[test]
    fn test_parse_json() {
        let text = r#"[
            {"priority": 1, "size": 5, "command": "/bin/true"},
            {"priority": 2, "size": 9, "command": "/bin/echo", "args": ["hi"]}
        ]"#;
        let config = WorkloadConfig::parse_json(text).unwrap();
        assert_eq!(config.len(), 2);
        assert_eq!(config.entries[0].args, Vec::<String>::new());
        assert_eq!(config.entries[1].args, vec!["hi".to_string()]);
    }

    #[test]
    fn test_parse_json_rejects_garbage() {
        assert!(WorkloadConfig::parse_json("{not json").is_err());
    }
}
