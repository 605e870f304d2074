//! Stack - Ordered registry of declared resources and exported outputs
//!
//! A stack collects resource declarations in the order they are made,
//! resolves nothing itself, and hands the provisioning engine a
//! dependency-consistent creation order.

use std::collections::{BTreeSet, HashSet};

use thiserror::Error;

use crate::graph::{DependencyGraph, referenced_bindings};
use crate::resource::{Resource, Value};

/// Errors raised while declaring resources or computing creation order
#[derive(Debug, Error)]
pub enum StackError {
    #[error("binding '{binding}' is declared more than once")]
    DuplicateBinding { binding: String },

    #[error("output '{name}' is exported more than once")]
    DuplicateOutput { name: String },

    #[error("{referenced_by} references undeclared binding '{target}'")]
    UnknownBinding {
        target: String,
        referenced_by: String,
    },

    #[error("circular dependency detected involving '{binding}'")]
    DependencyCycle { binding: String },
}

/// Handle to a declared resource
///
/// Attribute references made through a handle stay symbolic until the
/// provisioning engine substitutes real identifiers.
#[derive(Debug, Clone)]
pub struct Handle {
    binding: String,
}

impl Handle {
    /// Reference an attribute of the resource this handle points to
    pub fn attr(&self, name: impl Into<String>) -> Value {
        Value::Ref(self.binding.clone(), name.into())
    }

    /// Binding name of the resource within its stack
    pub fn binding(&self) -> &str {
        &self.binding
    }
}

/// Registry of declared resources and exported outputs
#[derive(Debug, Clone, Default)]
pub struct Stack {
    resources: Vec<(String, Resource)>,
    outputs: Vec<(String, Value)>,
}

impl Stack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a resource under a unique binding name
    pub fn declare(
        &mut self,
        binding: impl Into<String>,
        resource: Resource,
    ) -> Result<Handle, StackError> {
        let binding = binding.into();
        if self.resources.iter().any(|(b, _)| *b == binding) {
            return Err(StackError::DuplicateBinding { binding });
        }
        self.resources.push((binding.clone(), resource));
        Ok(Handle { binding })
    }

    /// Export a named output value
    pub fn export(&mut self, name: impl Into<String>, value: Value) -> Result<(), StackError> {
        let name = name.into();
        if self.outputs.iter().any(|(n, _)| *n == name) {
            return Err(StackError::DuplicateOutput { name });
        }
        self.outputs.push((name, value));
        Ok(())
    }

    /// Declared resources in declaration order
    pub fn resources(&self) -> &[(String, Resource)] {
        &self.resources
    }

    /// Exported outputs in export order
    pub fn outputs(&self) -> &[(String, Value)] {
        &self.outputs
    }

    /// Look up a declared resource by binding name
    pub fn resource(&self, binding: &str) -> Option<&Resource> {
        self.resources
            .iter()
            .find(|(b, _)| b == binding)
            .map(|(_, r)| r)
    }

    /// Dependency graph over the declared resources
    pub fn graph(&self) -> DependencyGraph {
        DependencyGraph::from_resources(self.resources.iter().map(|(b, r)| (b, r)))
    }

    /// Check that every reference points at a declared binding
    pub fn validate_references(&self) -> Result<(), StackError> {
        let declared: HashSet<&str> = self.resources.iter().map(|(b, _)| b.as_str()).collect();

        for (binding, resource) in &self.resources {
            for value in resource.attributes.values() {
                let mut targets = BTreeSet::new();
                referenced_bindings(value, &mut targets);
                for target in targets {
                    if !declared.contains(target.as_str()) {
                        return Err(StackError::UnknownBinding {
                            target,
                            referenced_by: format!("resource '{}'", binding),
                        });
                    }
                }
            }
        }

        for (name, value) in &self.outputs {
            let mut targets = BTreeSet::new();
            referenced_bindings(value, &mut targets);
            for target in targets {
                if !declared.contains(target.as_str()) {
                    return Err(StackError::UnknownBinding {
                        target,
                        referenced_by: format!("output '{}'", name),
                    });
                }
            }
        }

        Ok(())
    }

    /// Resources sorted so that dependencies come before their dependents
    ///
    /// Resources with no ordering constraint between them keep declaration
    /// order.
    pub fn ordered(&self) -> Result<Vec<(&String, &Resource)>, StackError> {
        self.validate_references()?;
        let graph = self.graph();

        let mut sorted: Vec<(&String, &Resource)> = Vec::new();
        let mut visited: HashSet<&str> = HashSet::new();
        let mut visiting: HashSet<&str> = HashSet::new();

        fn visit<'a>(
            binding: &'a str,
            resources: &'a [(String, Resource)],
            graph: &DependencyGraph,
            visited: &mut HashSet<&'a str>,
            visiting: &mut HashSet<&'a str>,
            sorted: &mut Vec<(&'a String, &'a Resource)>,
        ) -> Result<(), StackError> {
            if visited.contains(binding) {
                return Ok(());
            }
            if visiting.contains(binding) {
                return Err(StackError::DependencyCycle {
                    binding: binding.to_string(),
                });
            }
            visiting.insert(binding);

            for target in graph.dependency_targets(binding) {
                if let Some((name, _)) = resources.iter().find(|(b, _)| *b == target) {
                    visit(name, resources, graph, visited, visiting, sorted)?;
                }
            }

            visiting.remove(binding);
            visited.insert(binding);
            if let Some((name, resource)) = resources.iter().find(|(b, _)| b == binding) {
                sorted.push((name, resource));
            }
            Ok(())
        }

        for (binding, _) in &self.resources {
            visit(
                binding,
                &self.resources,
                &graph,
                &mut visited,
                &mut visiting,
                &mut sorted,
            )?;
        }

        Ok(sorted)
    }

    /// Binding names in creation order
    pub fn creation_order(&self) -> Result<Vec<String>, StackError> {
        Ok(self
            .ordered()?
            .into_iter()
            .map(|(binding, _)| binding.clone())
            .collect())
    }
}
