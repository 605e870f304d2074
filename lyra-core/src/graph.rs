//! Graph - Dependency analysis over declared resources
//!
//! Edges are extracted from reference values; the graph backs cycle
//! detection and the creation order recorded in the manifest.

use std::collections::{BTreeSet, HashMap, HashSet};

use crate::resource::{Resource, Value};

/// Dependency between resources
#[derive(Debug, Clone)]
pub struct Dependency {
    /// Target resource binding name
    pub target: String,
    /// Referenced attribute (e.g., "vpc_id")
    pub attribute: String,
    /// Where this reference is used (e.g., "subnet_id")
    pub used_in: String,
}

/// Dependency graph for the resources of a stack
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    /// Resource binding name -> list of dependencies
    pub edges: HashMap<String, Vec<Dependency>>,
    /// Reverse edges: target -> list of resources that depend on it
    pub reverse_edges: HashMap<String, Vec<String>>,
}

impl DependencyGraph {
    /// Create a new empty dependency graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from bound resources, one edge per reference value
    pub fn from_resources<'a, I>(resources: I) -> Self
    where
        I: IntoIterator<Item = (&'a String, &'a Resource)>,
    {
        let mut graph = Self::new();
        for (binding, resource) in resources {
            for (attr_key, value) in &resource.attributes {
                collect_ref_edges(binding, attr_key, value, &mut graph);
            }
        }
        graph
    }

    /// Add a dependency edge
    pub fn add_edge(&mut self, from: String, dependency: Dependency) {
        let target = dependency.target.clone();
        self.edges.entry(from.clone()).or_default().push(dependency);
        self.reverse_edges.entry(target).or_default().push(from);
    }

    /// Get direct dependencies of a resource
    pub fn dependencies_of(&self, resource: &str) -> &[Dependency] {
        self.edges.get(resource).map_or(&[], |v| v.as_slice())
    }

    /// Get resources that depend on this resource
    pub fn dependents_of(&self, resource: &str) -> &[String] {
        self.reverse_edges
            .get(resource)
            .map_or(&[], |v| v.as_slice())
    }

    /// Binding names of a resource's dependencies, sorted and deduplicated
    pub fn dependency_targets(&self, resource: &str) -> Vec<String> {
        let targets: BTreeSet<String> = self
            .dependencies_of(resource)
            .iter()
            .map(|d| d.target.clone())
            .collect();
        targets.into_iter().collect()
    }

    /// Check if the graph has any cycles
    pub fn has_cycle(&self) -> bool {
        let mut visited = HashSet::new();
        let mut rec_stack = HashSet::new();

        for node in self.edges.keys() {
            if self.has_cycle_util(node, &mut visited, &mut rec_stack) {
                return true;
            }
        }
        false
    }

    fn has_cycle_util(
        &self,
        node: &str,
        visited: &mut HashSet<String>,
        rec_stack: &mut HashSet<String>,
    ) -> bool {
        if rec_stack.contains(node) {
            return true;
        }
        if visited.contains(node) {
            return false;
        }

        visited.insert(node.to_string());
        rec_stack.insert(node.to_string());

        if let Some(deps) = self.edges.get(node) {
            for dep in deps {
                if self.has_cycle_util(&dep.target, visited, rec_stack) {
                    return true;
                }
            }
        }

        rec_stack.remove(node);
        false
    }
}

fn collect_ref_edges(from: &str, used_in: &str, value: &Value, graph: &mut DependencyGraph) {
    match value {
        Value::Ref(target, attribute) => {
            graph.add_edge(
                from.to_string(),
                Dependency {
                    target: target.clone(),
                    attribute: attribute.clone(),
                    used_in: used_in.to_string(),
                },
            );
        }
        Value::List(items) => {
            for item in items {
                collect_ref_edges(from, used_in, item, graph);
            }
        }
        Value::Map(map) => {
            for (k, v) in map {
                collect_ref_edges(from, k, v, graph);
            }
        }
        _ => {}
    }
}

/// Collect the binding names referenced anywhere inside a value
pub fn referenced_bindings(value: &Value, out: &mut BTreeSet<String>) {
    match value {
        Value::Ref(binding, _) => {
            out.insert(binding.clone());
        }
        Value::List(items) => {
            for item in items {
                referenced_bindings(item, out);
            }
        }
        Value::Map(map) => {
            for v in map.values() {
                referenced_bindings(v, out);
            }
        }
        _ => {}
    }
}
