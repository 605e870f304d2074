//! Lyra Core
//!
//! Core library for declaring infrastructure as a typed resource graph.
//! Resources reference each other symbolically; identifier resolution and
//! resource creation are the job of the provisioning engine that consumes
//! the rendered manifest.

pub mod graph;
pub mod manifest;
pub mod resource;
pub mod schema;
pub mod stack;
