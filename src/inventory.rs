//! Ansible dynamic-inventory document built from Terraform outputs.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use crate::terraform::ProvisioningState;

/// Group every provisioned host is placed in.
pub const GROUP_NAME: &str = "oci";
/// Terraform output holding the instance address.
pub const HOST_OUTPUT: &str = "instance_public_ip";
pub const ANSIBLE_USER: &str = "ubuntu";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HostVars {
    pub ansible_user: String,
}

impl Default for HostVars {
    fn default() -> Self {
        Self {
            ansible_user: ANSIBLE_USER.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Group {
    pub hosts: Vec<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Meta {
    pub hostvars: BTreeMap<String, HostVars>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InventoryDocument {
    #[serde(flatten)]
    pub groups: BTreeMap<String, Group>,
    #[serde(rename = "_meta")]
    pub meta: Meta,
}

impl InventoryDocument {
    /// The document emitted when no usable state exists.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty() && self.meta.hostvars.is_empty()
    }

    pub fn host_vars(&self, host: &str) -> Option<&HostVars> {
        self.meta.hostvars.get(host)
    }

    /// Serializes the document: compact when empty, four-space indented otherwise.
    pub fn render(&self) -> Result<String, serde_json::Error> {
        if self.is_empty() {
            return serde_json::to_string(self);
        }

        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut ser)?;
        // serde_json only ever emits valid UTF-8
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}

/// Hostvars key for a host entry. Strings are used as-is, anything else by its JSON text.
pub fn host_key(host: &Value) -> String {
    match host {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Builds the inventory. Total: missing state or a missing output yields the empty document.
pub fn build(state: Option<&ProvisioningState>) -> InventoryDocument {
    let Some(state) = state else {
        return InventoryDocument::empty();
    };

    let Some(output) = state.output(HOST_OUTPUT) else {
        tracing::debug!(output = HOST_OUTPUT, "terraform output not present");
        return InventoryDocument::empty();
    };

    let host = output.value;
    let key = host_key(&host);
    tracing::debug!(host = %key, group = GROUP_NAME, "adding host");

    let mut doc = InventoryDocument::empty();
    doc.groups.insert(
        GROUP_NAME.to_string(),
        Group {
            hosts: vec![host],
        },
    );
    doc.meta.hostvars.insert(key, HostVars::default());
    doc
}
