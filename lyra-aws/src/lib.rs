//! Lyra AWS EC2 resource support
//!
//! Schemas for the EC2 resource types a network stack declares, and
//! rendering of a declared stack into a creation manifest.
//!
//! ## Module Structure
//!
//! - `schemas` - EC2 resource schema definitions
//! - `types` - Shared attribute types (ports, protocols, rules, tags)
//! - `render` - Manifest rendering for declared stacks

pub mod render;
pub mod schemas;
pub mod types;

// Re-export main types
pub use render::{RenderError, render_manifest};
pub use schemas::{AwsSchemaConfig, config_for, configs};
