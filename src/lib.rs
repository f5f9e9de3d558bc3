//! tf-inventory - Terraform-backed Ansible dynamic inventory
//!
//! Runs `terraform output -json` in a project directory and turns the
//! `instance_public_ip` output into an Ansible inventory document.

pub mod app;
pub mod cli;
pub mod error;
pub mod inventory;
pub mod terraform;

pub use error::InventoryError;
pub use inventory::{HostVars, InventoryDocument};
pub use terraform::{
    CommandOutput, CommandRunner, CommandSpec, ProcessRunner, ProvisioningState, StateConfig,
    StateError, StateReader,
};
