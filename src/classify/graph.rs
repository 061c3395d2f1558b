// src/classify/graph.rs

//! Module graph, cycle detection, and assembly ordering
//!
//! Holds the module universe and the classified bundling edges between
//! modules. The external task-graph executor relies on two guarantees from
//! this graph: bundling edges form a DAG (cycles are rejected at
//! configuration time), and `assembly_order` lists every module after all
//! of its embedded inputs.

use super::DependencyEdge;
use crate::error::{Error, Result};
use std::collections::{BTreeMap, HashSet, VecDeque};

/// A module participating in composition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleDescriptor {
    /// Internal module id (e.g. `platform-fabric`)
    pub id: String,
    /// Externally published artifact name
    pub display_name: String,
}

impl ModuleDescriptor {
    pub fn new(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
        }
    }
}

/// Graph of modules and their classified dependency edges
///
/// BTreeMap storage keeps every traversal deterministic, so repeated runs
/// over the same declarations produce identical orderings.
#[derive(Debug, Default)]
pub struct ModuleGraph {
    nodes: BTreeMap<String, ModuleDescriptor>,
    edges: BTreeMap<String, Vec<DependencyEdge>>,
    reverse_edges: BTreeMap<String, Vec<String>>,
}

impl ModuleGraph {
    /// Create a new empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a module node to the graph
    pub fn add_module(&mut self, module: ModuleDescriptor) {
        self.nodes.insert(module.id.clone(), module);
    }

    /// Get a module by id
    pub fn module(&self, id: &str) -> Option<&ModuleDescriptor> {
        self.nodes.get(id)
    }

    /// True when the graph knows the module id
    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    /// Iterate module ids in deterministic order
    pub fn module_ids(&self) -> impl Iterator<Item = &str> {
        self.nodes.keys().map(String::as_str)
    }

    /// Number of modules
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check whether the graph has no modules
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Record a classified edge
    ///
    /// Both endpoints must already be present; referencing an unknown id is
    /// a configuration error surfaced here, not deferred to assembly.
    pub fn add_edge(&mut self, edge: DependencyEdge) -> Result<()> {
        if !self.contains(&edge.from) {
            return Err(Error::UnknownModuleReference(edge.from.clone()));
        }
        if !self.contains(&edge.to) {
            return Err(Error::UnknownModuleReference(edge.to.clone()));
        }

        self.reverse_edges
            .entry(edge.to.clone())
            .or_default()
            .push(edge.from.clone());
        self.edges.entry(edge.from.clone()).or_default().push(edge);
        Ok(())
    }

    /// All edges leaving a module, in declaration order
    pub fn edges_from(&self, id: &str) -> &[DependencyEdge] {
        self.edges.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Modules that embed or consume this module
    pub fn dependents(&self, id: &str) -> &[String] {
        self.reverse_edges.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Detect a cycle among bundling edges
    ///
    /// Only embed-* edges participate; compile-only and runtime-only edges
    /// never force assembly ordering. Returns the modules on a cycle, or
    /// None for an acyclic graph.
    pub fn detect_cycle(&self) -> Option<Vec<String>> {
        let mut visited = HashSet::new();
        let mut rec_stack = HashSet::new();
        let mut cycle = Vec::new();

        for id in self.nodes.keys() {
            if !visited.contains(id.as_str())
                && self.dfs_cycle_detect(id, &mut visited, &mut rec_stack, &mut cycle)
            {
                cycle.reverse();
                return Some(cycle);
            }
        }

        None
    }

    /// DFS helper for cycle detection over bundling edges
    fn dfs_cycle_detect(
        &self,
        id: &str,
        visited: &mut HashSet<String>,
        rec_stack: &mut HashSet<String>,
        cycle: &mut Vec<String>,
    ) -> bool {
        visited.insert(id.to_string());
        rec_stack.insert(id.to_string());

        if let Some(edges) = self.edges.get(id) {
            for edge in edges.iter().filter(|e| e.mode.is_embedded()) {
                if !visited.contains(&edge.to) {
                    if self.dfs_cycle_detect(&edge.to, visited, rec_stack, cycle) {
                        cycle.push(id.to_string());
                        return true;
                    }
                } else if rec_stack.contains(&edge.to) {
                    cycle.push(edge.to.clone());
                    cycle.push(id.to_string());
                    return true;
                }
            }
        }

        rec_stack.remove(id);
        false
    }

    /// Terminal assembly order via Kahn's algorithm
    ///
    /// Returns module ids with every module after all of its embedded
    /// inputs, so the executor can schedule a module's assembly only once
    /// its inputs have completed. Fails with `CyclicDependency` when the
    /// bundling edges do not form a DAG.
    pub fn assembly_order(&self) -> Result<Vec<String>> {
        let mut in_degree: BTreeMap<&str, usize> = BTreeMap::new();
        for id in self.nodes.keys() {
            in_degree.insert(id, 0);
        }
        for edges in self.edges.values() {
            for edge in edges.iter().filter(|e| e.mode.is_embedded()) {
                if let Some(degree) = in_degree.get_mut(edge.to.as_str()) {
                    *degree += 1;
                }
            }
        }

        let mut queue: VecDeque<&str> = in_degree
            .iter()
            .filter(|(_, &degree)| degree == 0)
            .map(|(&id, _)| id)
            .collect();

        let mut order = Vec::with_capacity(self.nodes.len());
        while let Some(id) = queue.pop_front() {
            order.push(id.to_string());
            if let Some(edges) = self.edges.get(id) {
                for edge in edges.iter().filter(|e| e.mode.is_embedded()) {
                    if let Some(degree) = in_degree.get_mut(edge.to.as_str()) {
                        *degree -= 1;
                        if *degree == 0 {
                            queue.push_back(&edge.to);
                        }
                    }
                }
            }
        }

        if order.len() != self.nodes.len() {
            let cycle = self
                .detect_cycle()
                .unwrap_or_default()
                .join(" -> ");
            return Err(Error::CyclicDependency(cycle));
        }

        // Inputs before the assemblies that embed them
        order.reverse();
        Ok(order)
    }
}
