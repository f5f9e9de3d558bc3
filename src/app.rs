use std::io::Write;

use crate::cli::{Cli, Mode};
use crate::error::InventoryError;
use crate::inventory::{self, InventoryDocument};
use crate::terraform::{CommandRunner, StateReader};

/// Produces the text printed for `mode` from an already built inventory.
pub fn render_mode(doc: &InventoryDocument, mode: &Mode) -> Result<String, InventoryError> {
    match mode {
        Mode::List => Ok(doc.render()?),
        Mode::Host(host) => match doc.host_vars(host) {
            Some(vars) => Ok(serde_json::to_string(vars)?),
            None => {
                tracing::debug!(%host, "host not in inventory");
                Ok("{}".to_string())
            }
        },
    }
}

/// Reads Terraform state once and writes exactly one JSON document to `out`.
///
/// Upstream failures never surface here; they degrade to the empty inventory.
pub async fn run<R, W>(cli: &Cli, runner: R, out: &mut W) -> Result<(), InventoryError>
where
    R: CommandRunner,
    W: Write,
{
    let reader = StateReader::new(runner, cli.state_config());
    let state = reader.read().await;
    let doc = inventory::build(state.as_ref());

    let rendered = render_mode(&doc, &cli.mode())?;
    writeln!(out, "{}", rendered)?;
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terraform::FakeRunner;
    use clap::Parser;
    use serde_json::{Value, json};

    async fn run_with(args: &[&str], runner: FakeRunner) -> Value {
        let cli = Cli::parse_from(args);
        let mut out = Vec::new();
        run(&cli, runner, &mut out).await.unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.ends_with('\n'));
        serde_json::from_str(&text).unwrap()
    }

    #[tokio::test]
    async fn test_command_not_found_emits_empty_inventory() {
        let doc = run_with(&["tf-inventory"], FakeRunner::not_found()).await;
        assert_eq!(doc, json!({"_meta": {"hostvars": {}}}));
    }

    #[tokio::test]
    async fn test_nonzero_exit_emits_empty_inventory() {
        let doc = run_with(&["tf-inventory"], FakeRunner::stdout(1, "")).await;
        assert_eq!(doc, json!({"_meta": {"hostvars": {}}}));
    }

    #[tokio::test]
    async fn test_public_ip_emits_populated_inventory() {
        let runner = FakeRunner::stdout(0, r#"{"instance_public_ip": {"value": "203.0.113.7"}}"#);
        let doc = run_with(&["tf-inventory", "--list"], runner).await;

        assert_eq!(doc["oci"]["hosts"], json!(["203.0.113.7"]));
        assert_eq!(
            doc["_meta"]["hostvars"]["203.0.113.7"],
            json!({"ansible_user": "ubuntu"})
        );
    }

    #[tokio::test]
    async fn test_missing_output_emits_empty_inventory() {
        let runner = FakeRunner::stdout(0, r#"{"other_output": {"value": "x"}}"#);
        let doc = run_with(&["tf-inventory"], runner).await;
        assert_eq!(doc, json!({"_meta": {"hostvars": {}}}));
    }

    #[tokio::test]
    async fn test_loose_output_metadata_still_lists_host() {
        let runner = FakeRunner::stdout(
            0,
            r#"{"instance_public_ip": {"value": "1.2.3.4", "sensitive": null}}"#,
        );
        let doc = run_with(&["tf-inventory"], runner).await;

        assert_eq!(doc["oci"]["hosts"], json!(["1.2.3.4"]));
        assert_eq!(doc["_meta"]["hostvars"]["1.2.3.4"], json!({"ansible_user": "ubuntu"}));
    }

    #[tokio::test]
    async fn test_null_state_emits_empty_inventory() {
        let doc = run_with(&["tf-inventory"], FakeRunner::stdout(0, "null")).await;
        assert_eq!(doc, json!({"_meta": {"hostvars": {}}}));
    }

    #[tokio::test]
    async fn test_host_mode_known_host() {
        let runner = FakeRunner::stdout(0, r#"{"instance_public_ip": {"value": "203.0.113.7"}}"#);
        let vars = run_with(&["tf-inventory", "--host", "203.0.113.7"], runner).await;
        assert_eq!(vars, json!({"ansible_user": "ubuntu"}));
    }

    #[tokio::test]
    async fn test_host_mode_unknown_host() {
        let runner = FakeRunner::stdout(0, r#"{"instance_public_ip": {"value": "203.0.113.7"}}"#);
        let vars = run_with(&["tf-inventory", "--host", "198.51.100.1"], runner).await;
        assert_eq!(vars, json!({}));
    }

    #[tokio::test]
    async fn test_host_mode_without_state() {
        let vars = run_with(&["tf-inventory", "--host", "203.0.113.7"], FakeRunner::not_found()).await;
        assert_eq!(vars, json!({}));
    }
}
