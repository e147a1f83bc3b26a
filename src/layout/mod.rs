//! Deterministic layout of a sequence from its topology alone.
//!
//! Nodes are visited depth-first in pre-order. Every visited node takes the
//! next row, so no two nodes share a `y`. The column is the node's depth,
//! nudged right for `yes` branches and left for `no` branches. The visiting
//! order (roots by id, children `main < yes < no`) fixes the result, so two
//! passes over the same topology always agree to the coordinate.

use crate::sequence::{Branch, NodeId, Position, SequenceGraph};
use ahash::{AHashMap, AHashSet};
use itertools::Itertools;
use serde::{Deserialize, Serialize};

mod placement;

pub use placement::initial_position;

/// Spacing constants for the layout pass and for initial placement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutConfig {
    pub origin_x: f64,
    pub origin_y: f64,
    pub row_height: f64,
    pub level_spacing: f64,
    pub branch_spacing: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            origin_x: 250.0,
            origin_y: 50.0,
            row_height: 150.0,
            level_spacing: 50.0,
            branch_spacing: 300.0,
        }
    }
}

impl LayoutConfig {
    /// Horizontal shift applied to a node reached through `branch`.
    pub fn branch_offset(&self, branch: Option<Branch>) -> f64 {
        match branch {
            Some(Branch::Yes) => self.branch_spacing,
            Some(Branch::No) => -self.branch_spacing,
            Some(Branch::Main) | None => 0.0,
        }
    }

    pub fn column(&self, level: usize, via: Option<Branch>) -> f64 {
        self.origin_x + level as f64 * self.level_spacing + self.branch_offset(via)
    }

    pub fn row(&self, index: usize) -> f64 {
        self.origin_y + index as f64 * self.row_height
    }
}

/// The output of a layout pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Layout {
    positions: AHashMap<NodeId, Position>,
    order: Vec<NodeId>,
}

impl Layout {
    pub fn position(&self, node_id: &str) -> Option<Position> {
        self.positions.get(node_id).copied()
    }

    /// Node ids in visiting (pre-order) order.
    pub fn order(&self) -> &[NodeId] {
        &self.order
    }

    pub fn iter(&self) -> impl Iterator<Item = (&NodeId, Position)> {
        self.order
            .iter()
            .filter_map(|id| self.positions.get(id).map(|position| (id, *position)))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

pub struct LayoutEngine {
    config: LayoutConfig,
}

impl LayoutEngine {
    pub fn new(config: LayoutConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Lays out every node of `graph`. Existing positions are ignored.
    pub fn compute(&self, graph: &SequenceGraph) -> Layout {
        let mut pass = LayoutPass {
            config: &self.config,
            graph,
            positions: AHashMap::with_capacity(graph.len()),
            order: Vec::with_capacity(graph.len()),
            visited: AHashSet::with_capacity(graph.len()),
            row: 0,
        };

        for root in graph.roots() {
            pass.visit(root, 0, None);
        }

        // Only reachable if parent links loop back on themselves.
        let stranded: Vec<&NodeId> = graph
            .nodes()
            .iter()
            .map(|node| node.id())
            .filter(|id| !pass.visited.contains(id.as_str()))
            .sorted()
            .collect();
        if !stranded.is_empty() {
            log::warn!(
                "{} node(s) unreachable from any root; laying them out as extra roots",
                stranded.len()
            );
            for id in stranded {
                pass.visit(id, 0, None);
            }
        }

        log::debug!("Laid out {} node(s) in {} row(s)", pass.order.len(), pass.row);
        Layout {
            positions: pass.positions,
            order: pass.order,
        }
    }
}

/// State of one layout pass.
struct LayoutPass<'a> {
    config: &'a LayoutConfig,
    graph: &'a SequenceGraph,
    positions: AHashMap<NodeId, Position>,
    order: Vec<NodeId>,
    visited: AHashSet<&'a str>,
    row: usize,
}

impl<'a> LayoutPass<'a> {
    fn visit(&mut self, node_id: &'a NodeId, level: usize, via: Option<Branch>) {
        if !self.visited.insert(node_id.as_str()) {
            return;
        }

        let position = Position::new(self.config.column(level, via), self.config.row(self.row));
        self.row += 1;
        log::trace!("Node '{}' -> ({}, {})", node_id, position.x, position.y);
        self.positions.insert(node_id.clone(), position);
        self.order.push(node_id.clone());

        let graph = self.graph;
        for (branch, child) in graph.adjacency().children(node_id.as_str()) {
            self.visit(child, level + 1, Some(branch));
        }
    }
}
