use std::path::PathBuf;

use clap::Parser;

use crate::terraform::{DEFAULT_PROJECT_DIR, DEFAULT_TERRAFORM_BIN, StateConfig};

/// Ansible dynamic inventory backed by `terraform output -json`.
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Print the whole inventory (the default when no mode is given)
    #[arg(long, conflicts_with = "host")]
    pub list: bool,

    /// Print the variables of a single host
    #[arg(long, value_name = "HOST")]
    pub host: Option<String>,

    #[arg(
        long,
        env = "TF_INVENTORY_TERRAFORM_BIN",
        default_value = DEFAULT_TERRAFORM_BIN
    )]
    pub terraform_bin: PathBuf,

    /// Terraform project directory `terraform output` runs in
    #[arg(long, env = "TF_INVENTORY_PROJECT_DIR", default_value = DEFAULT_PROJECT_DIR)]
    pub project_dir: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    List,
    Host(String),
}

impl Cli {
    pub fn mode(&self) -> Mode {
        match &self.host {
            Some(host) => Mode::Host(host.clone()),
            None => Mode::List,
        }
    }

    pub fn state_config(&self) -> StateConfig {
        StateConfig {
            terraform_bin: self.terraform_bin.clone(),
            project_dir: self.project_dir.clone(),
        }
    }
}
