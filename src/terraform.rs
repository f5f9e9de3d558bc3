mod error;
mod runner;
mod state;

pub use error::{RunnerError, StateError};
pub use runner::{CommandOutput, CommandRunner, CommandSpec, ProcessRunner};
pub use state::{
    DEFAULT_PROJECT_DIR, DEFAULT_TERRAFORM_BIN, OutputValue, ProvisioningState, StateConfig,
    StateReader,
};

#[cfg(test)]
pub(crate) use state::tests::FakeRunner;
