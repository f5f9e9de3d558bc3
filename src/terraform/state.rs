use std::path::PathBuf;

use serde_json::{Map, Value};

use super::{CommandRunner, CommandSpec, StateError};

pub const DEFAULT_TERRAFORM_BIN: &str = "terraform";
pub const DEFAULT_PROJECT_DIR: &str = "../../terraform";

/// Where and how to ask Terraform for its outputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateConfig {
    pub terraform_bin: PathBuf,
    pub project_dir: PathBuf,
}

impl Default for StateConfig {
    fn default() -> Self {
        Self {
            terraform_bin: PathBuf::from(DEFAULT_TERRAFORM_BIN),
            project_dir: PathBuf::from(DEFAULT_PROJECT_DIR),
        }
    }
}

/// One entry of `terraform output -json`.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputValue {
    pub value: Value,
    pub sensitive: bool,
    pub value_type: Option<Value>,
}

impl OutputValue {
    /// Only `value` is required; the other fields are read leniently.
    fn from_raw(raw: &Value) -> Option<Self> {
        let value = raw.get("value")?.clone();
        Some(Self {
            value,
            sensitive: raw.get("sensitive").and_then(Value::as_bool).unwrap_or(false),
            value_type: raw.get("type").cloned(),
        })
    }
}

/// Decoded `terraform output -json` document, keyed by output name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProvisioningState {
    outputs: Map<String, Value>,
}

impl ProvisioningState {
    pub fn from_json(text: &str) -> Result<Self, StateError> {
        match serde_json::from_str::<Value>(text)? {
            Value::Object(outputs) => Ok(Self { outputs }),
            // no outputs to look up, same as an empty object
            Value::Null | Value::Array(_) => Ok(Self::default()),
            other => Err(StateError::NotAnObject {
                found: json_kind(&other),
            }),
        }
    }

    /// Typed view of an output. `None` when the output is absent or has no `value`.
    pub fn output(&self, name: &str) -> Option<OutputValue> {
        self.outputs.get(name).and_then(OutputValue::from_raw)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.outputs.keys().map(String::as_str)
    }
}

impl From<Map<String, Value>> for ProvisioningState {
    fn from(outputs: Map<String, Value>) -> Self {
        Self { outputs }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Reads Terraform outputs through a [`CommandRunner`].
pub struct StateReader<R> {
    runner: R,
    config: StateConfig,
}

impl<R: CommandRunner> StateReader<R> {
    pub fn new(runner: R, config: StateConfig) -> Self {
        Self { runner, config }
    }

    fn command(&self) -> CommandSpec {
        CommandSpec::new(&self.config.terraform_bin, &self.config.project_dir)
            .arg("output")
            .arg("-json")
    }

    /// Runs `terraform output -json` once and decodes the result.
    pub async fn try_read(&self) -> Result<ProvisioningState, StateError> {
        let output = self.runner.run(&self.command()).await?;

        if !output.success() {
            return Err(StateError::CommandFailed {
                status: output.status,
                stderr: output.stderr,
            });
        }

        ProvisioningState::from_json(&output.stdout)
    }

    /// Like [`try_read`](Self::try_read), but failures are logged and collapse to `None`.
    pub async fn read(&self) -> Option<ProvisioningState> {
        match self.try_read().await {
            Ok(state) => {
                tracing::debug!(outputs = state.names().count(), "terraform state loaded");
                Some(state)
            }
            Err(err) => {
                tracing::error!(
                    project_dir = %self.config.project_dir.display(),
                    "Error getting Terraform output: {}",
                    err
                );
                None
            }
        }
    }
}
