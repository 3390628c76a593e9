use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("invalid value {value:?} for {key}")]
    Invalid { key: &'static str, value: String },
}

/// Failure of a single pipeline step.
#[derive(Debug, Error)]
pub enum StepError {
    #[error("failed to start `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },
    #[error("`{command}` exited with {}{}", exit_label(.code), diagnostic_suffix(.diagnostic))]
    ExitStatus {
        command: String,
        code: Option<i32>,
        diagnostic: String,
    },
    #[error("{action} {}: {source}", .path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("llama.cpp sources not found at {}", .0.display())]
    MissingSources(PathBuf),
    #[error("failed to serialize install record: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl StepError {
    pub(crate) fn io(action: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        StepError::Io {
            action,
            path: path.into(),
            source,
        }
    }
}

fn exit_label(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("status {code}"),
        None => "a signal".to_string(),
    }
}

fn diagnostic_suffix(diagnostic: &str) -> String {
    if diagnostic.is_empty() {
        String::new()
    } else {
        format!(": {diagnostic}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_status_message_includes_code_and_diagnostic() {
        let err = StepError::ExitStatus {
            command: "git clone x".to_string(),
            code: Some(128),
            diagnostic: "fatal: repository not found".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "`git clone x` exited with status 128: fatal: repository not found"
        );
    }

    #[test]
    fn io_message_names_path() {
        let err = StepError::io(
            "create directory",
            "/nope/models",
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        assert_eq!(err.to_string(), "create directory /nope/models: denied");
    }
}
