use thiserror::Error;

/// Errors raised while running an external command.
#[derive(Debug, Error)]
pub enum RunnerError {
    /// The program could not be started (missing binary, missing working directory)
    #[error("failed to run '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// Reading the child's output or waiting for it failed
    #[error("I/O error while waiting for command: {0}")]
    Io(#[from] std::io::Error),
}

/// Reasons Terraform state could not be obtained.
#[derive(Debug, Error)]
pub enum StateError {
    #[error("terraform unavailable: {0}")]
    Unavailable(#[from] RunnerError),

    #[error("terraform output exited with {}: {}", describe_status(.status), .stderr.trim())]
    CommandFailed { status: Option<i32>, stderr: String },

    #[error("terraform output is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("terraform output is not a JSON object (got {found})")]
    NotAnObject { found: &'static str },
}

fn describe_status(status: &Option<i32>) -> String {
    match *status {
        Some(code) => format!("status {}", code),
        None => "a signal".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_spawn_error_display() {
        let err = RunnerError::Spawn {
            program: "terraform".to_string(),
            source: io::Error::new(io::ErrorKind::NotFound, "No such file or directory"),
        };
        assert_eq!(
            err.to_string(),
            "failed to run 'terraform': No such file or directory"
        );
    }

    #[test]
    fn test_unavailable_from_runner_error() {
        let runner_err = RunnerError::Io(io::Error::other("broken pipe"));
        let state_err: StateError = runner_err.into();
        assert!(matches!(state_err, StateError::Unavailable(_)));
        assert!(state_err.to_string().contains("broken pipe"));
    }

    #[test]
    fn test_command_failed_display() {
        let err = StateError::CommandFailed {
            status: Some(1),
            stderr: "Error: No outputs found\n".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "terraform output exited with status 1: Error: No outputs found"
        );
    }

    #[test]
    fn test_command_failed_by_signal_display() {
        let err = StateError::CommandFailed {
            status: None,
            stderr: String::new(),
        };
        assert!(err.to_string().contains("exited with a signal"));
    }

    #[test]
    fn test_malformed_from_serde_error() {
        let serde_err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let state_err: StateError = serde_err.into();
        assert!(matches!(state_err, StateError::Malformed(_)));
        assert!(state_err.to_string().starts_with("terraform output is not valid JSON"));
    }

    #[test]
    fn test_not_an_object_display() {
        let err = StateError::NotAnObject { found: "array" };
        assert_eq!(
            err.to_string(),
            "terraform output is not a JSON object (got array)"
        );
    }
}
