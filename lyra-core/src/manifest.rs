//! Manifest - Serialized creation plan handed to the provisioning engine
//!
//! The manifest lists resources in creation order with their desired
//! state fully rendered. Unresolved references are encoded as
//! `${binding.attribute}` placeholders for the engine to substitute.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Current manifest format version
pub const CURRENT_VERSION: u32 = 1;

/// Placeholder encoding for an unresolved attribute reference
pub fn ref_placeholder(binding: &str, attribute: &str) -> String {
    format!("${{{}.{}}}", binding, attribute)
}

/// Creation plan for a stack
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    /// Manifest format version
    pub version: u32,
    /// Project the stack belongs to
    pub project: String,
    /// AWS region the stack targets
    pub region: String,
    /// Version of the tool that produced the manifest
    pub lyra_version: String,
    /// Resources in creation order
    pub resources: Vec<ManifestResource>,
    /// Exported outputs, values encoded as placeholder strings
    pub outputs: BTreeMap<String, String>,
}

impl Manifest {
    pub fn new(project: impl Into<String>, region: impl Into<String>) -> Self {
        Self {
            version: CURRENT_VERSION,
            project: project.into(),
            region: region.into(),
            lyra_version: env!("CARGO_PKG_VERSION").to_string(),
            resources: Vec::new(),
            outputs: BTreeMap::new(),
        }
    }

    /// Look up a rendered resource by binding name
    pub fn find_resource(&self, binding: &str) -> Option<&ManifestResource> {
        self.resources.iter().find(|r| r.binding == binding)
    }
}

/// One resource entry of a manifest
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestResource {
    /// Binding name within the stack
    pub binding: String,
    /// Declared resource type (e.g., "ec2_subnet")
    pub resource_type: String,
    /// Concrete resource name
    pub name: String,
    /// Provider type name (e.g., "AWS::EC2::Subnet")
    pub aws_type: String,
    /// Bindings this resource depends on, sorted
    #[serde(default)]
    pub depends_on: Vec<String>,
    /// Rendered desired state in provider attribute casing
    pub desired_state: serde_json::Value,
}
