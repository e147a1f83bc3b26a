use super::adjacency::{Adjacency, Connections, derive_adjacency};
use super::content::{ContentPatch, StepContent};
use super::node::SequenceNode;
use super::types::{Branch, NodeId, ParentLink, Position, Schedule, StepType};
use crate::error::{GraphError, StructuralViolation};
use crate::layout::{LayoutConfig, LayoutEngine, initial_position};
use crate::template::{TemplateField, VariableKey};
use ahash::{AHashMap, AHashSet};

/// The in-memory campaign sequence being edited.
///
/// Nodes are stored flat with parent pointers. Adjacency is derived from those
/// pointers after every structural mutation and is never patched by hand.
#[derive(Debug, Clone, Default)]
pub struct SequenceGraph {
    nodes: Vec<SequenceNode>,
    index: AHashMap<NodeId, usize>,
    adjacency: Adjacency,
    layout: LayoutConfig,
}

impl SequenceGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_layout(layout: LayoutConfig) -> Self {
        Self {
            layout,
            ..Self::default()
        }
    }

    /// Assembles a graph from nodes whose links were already checked.
    pub(crate) fn from_nodes(nodes: Vec<SequenceNode>, layout: LayoutConfig) -> Self {
        let mut graph = Self {
            nodes,
            index: AHashMap::new(),
            adjacency: Adjacency::default(),
            layout,
        };
        graph.rebuild();
        graph
    }

    // --- Queries ---

    pub fn layout_config(&self) -> &LayoutConfig {
        &self.layout
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All nodes, in insertion order.
    pub fn nodes(&self) -> &[SequenceNode] {
        &self.nodes
    }

    pub fn node(&self, node_id: &str) -> Option<&SequenceNode> {
        self.index.get(node_id).map(|&i| &self.nodes[i])
    }

    pub fn contains(&self, node_id: &str) -> bool {
        self.index.contains_key(node_id)
    }

    pub fn adjacency(&self) -> &Adjacency {
        &self.adjacency
    }

    pub fn connections(&self, node_id: &str) -> Option<&Connections> {
        self.adjacency.connections(node_id)
    }

    pub fn roots(&self) -> &[NodeId] {
        self.adjacency.roots()
    }

    /// The child hanging off `branch` of `node_id`, if any.
    pub fn child(&self, node_id: &str, branch: Branch) -> Option<&SequenceNode> {
        self.adjacency
            .occupant(node_id, branch)
            .and_then(|id| self.node(id.as_str()))
    }

    /// Nodes whose parent link names a node that no longer exists.
    pub fn orphans(&self) -> Vec<&NodeId> {
        self.nodes
            .iter()
            .filter(|node| {
                node.parent_id()
                    .is_some_and(|parent_id| !self.contains(parent_id.as_str()))
            })
            .map(|node| node.id())
            .collect()
    }

    /// Ancestors of `node_id`, nearest first. Stops at a vanished parent.
    pub fn ancestors(&self, node_id: &str) -> Vec<&NodeId> {
        let mut ancestors = Vec::new();
        let mut seen: AHashSet<&str> = AHashSet::new();
        let mut current = self.node(node_id);
        while let Some(parent_id) = current.and_then(|node| node.parent_id()) {
            if !seen.insert(parent_id.as_str()) {
                break;
            }
            match self.node(parent_id.as_str()) {
                Some(parent) => {
                    ancestors.push(parent.id());
                    current = Some(parent);
                }
                None => break,
            }
        }
        ancestors
    }

    /// Distance from the node's root; roots are at depth 0.
    pub fn depth(&self, node_id: &str) -> usize {
        self.ancestors(node_id).len()
    }

    // --- Structural mutations ---

    /// Adds a node of the given type under `parent` (or as a root) and returns
    /// its freshly generated id.
    pub fn add_node(
        &mut self,
        step: impl Into<StepType>,
        parent: Option<ParentLink>,
    ) -> Result<NodeId, GraphError> {
        self.insert_node(NodeId::generate(), step, parent)
    }

    /// Like [`add_node`](Self::add_node), with a caller-chosen id.
    pub fn insert_node(
        &mut self,
        id: impl Into<NodeId>,
        step: impl Into<StepType>,
        parent: Option<ParentLink>,
    ) -> Result<NodeId, GraphError> {
        let id = id.into();
        if self.contains(id.as_str()) {
            return Err(GraphError::DuplicateNodeId(id));
        }
        let step = step.into();

        let placement = match &parent {
            Some(link) => {
                self.check_link(None, link)?;
                let parent_node = self.require(link.parent_id.as_str())?;
                Some((
                    parent_node.position(),
                    self.depth(link.parent_id.as_str()),
                    link.branch,
                ))
            }
            None => None,
        };
        self.check_adoption(&id, &step, parent.as_ref())?;

        let mut node = SequenceNode::new(id.clone(), step);
        node.set_position(initial_position(&self.layout, placement));
        node.set_parent(parent);
        log::debug!(
            "Added '{}' node '{}' under {:?}",
            node.step(),
            id,
            node.parent()
        );
        self.nodes.push(node);
        self.rebuild();
        Ok(id)
    }

    /// Deletes a node and returns it.
    ///
    /// Its children keep pointing at the removed id and show up as roots (and
    /// in [`orphans`](Self::orphans)) until they are re-parented.
    pub fn remove_node(&mut self, node_id: &str) -> Result<SequenceNode, GraphError> {
        let position = self
            .index
            .get(node_id)
            .copied()
            .ok_or_else(|| GraphError::NodeNotFound(node_id.into()))?;
        let removed = self.nodes.remove(position);
        self.rebuild();
        log::debug!(
            "Removed node '{}', {} orphan(s) left behind",
            node_id,
            self.orphans().len()
        );
        Ok(removed)
    }

    /// Re-parents a node, or detaches it into a root when `parent` is `None`.
    pub fn move_node(
        &mut self,
        node_id: &str,
        parent: Option<ParentLink>,
    ) -> Result<(), GraphError> {
        let id = self.require(node_id)?.id().clone();
        if let Some(link) = &parent {
            self.check_link(Some(&id), link)?;
        }
        log::debug!("Moving node '{}' under {:?}", id, parent);
        let node = self.require_mut(node_id)?;
        if let StepContent::Opaque(opaque) = node.content_mut() {
            opaque.held_parent = None;
        }
        node.set_parent(parent);
        self.rebuild();
        Ok(())
    }

    /// Checks that `node` (or a new node when `None`) may hang off `link`.
    pub(crate) fn check_link(&self, node: Option<&NodeId>, link: &ParentLink) -> Result<(), GraphError> {
        let parent = self.require(link.parent_id.as_str())?;
        if !parent.step().allows_branch(link.branch) {
            return Err(StructuralViolation::BranchNotAllowed {
                parent_id: link.parent_id.clone(),
                branch: link.branch,
                step_type: parent.step().to_string(),
            }
            .into());
        }
        if let Some(occupant) = self
            .adjacency
            .occupant(link.parent_id.as_str(), link.branch)
            .filter(|occupant| Some(*occupant) != node)
        {
            return Err(StructuralViolation::BranchOccupied {
                parent_id: link.parent_id.clone(),
                branch: link.branch,
                occupant: occupant.clone(),
            }
            .into());
        }
        if let Some(node_id) = node {
            let would_cycle = link.parent_id == *node_id
                || self
                    .ancestors(link.parent_id.as_str())
                    .into_iter()
                    .any(|ancestor| ancestor == node_id);
            if would_cycle {
                return Err(StructuralViolation::CycleDetected {
                    node_id: node_id.clone(),
                    parent_id: link.parent_id.clone(),
                }
                .into());
            }
        }
        Ok(())
    }

    /// Orphans left behind by [`remove_node`](Self::remove_node) still name
    /// their old parent, so a new node reusing that id picks them up again.
    /// They must fit the new step's branches, one per slot, and must not sit
    /// above the new parent.
    fn check_adoption(
        &self,
        id: &NodeId,
        step: &StepType,
        parent: Option<&ParentLink>,
    ) -> Result<(), GraphError> {
        let mut claimed: AHashMap<Branch, &NodeId> = AHashMap::new();
        for orphan in self.nodes.iter().filter(|node| node.parent_id() == Some(id)) {
            let branch = orphan.parent().map(|link| link.branch).unwrap_or_default();
            if !step.allows_branch(branch) {
                return Err(StructuralViolation::BranchNotAllowed {
                    parent_id: id.clone(),
                    branch,
                    step_type: step.to_string(),
                }
                .into());
            }
            if let Some(occupant) = claimed.insert(branch, orphan.id()) {
                return Err(StructuralViolation::BranchOccupied {
                    parent_id: id.clone(),
                    branch,
                    occupant: occupant.clone(),
                }
                .into());
            }
        }

        if let Some(link) = parent {
            let above = std::iter::once(&link.parent_id)
                .chain(self.ancestors(link.parent_id.as_str()));
            for ancestor_id in above {
                if self.node(ancestor_id.as_str()).and_then(|node| node.parent_id()) == Some(id) {
                    return Err(StructuralViolation::CycleDetected {
                        node_id: id.clone(),
                        parent_id: link.parent_id.clone(),
                    }
                    .into());
                }
            }
        }
        Ok(())
    }

    // --- Content and presentation ---

    /// Merges `patch` into the node's content. Returns whether the node's
    /// variables changed as a result.
    pub fn update_content(&mut self, node_id: &str, patch: ContentPatch) -> Result<bool, GraphError> {
        let node = self.require_mut(node_id)?;
        let step_type = node.step().to_string();
        let text_changed = node
            .content_mut()
            .apply(patch)
            .map_err(|field| GraphError::ContentMismatch {
                node_id: node_id.into(),
                step_type,
                field,
            })?;
        Ok(text_changed && node.sync_variables())
    }

    /// Recomputes the node's variables from its text. Returns whether the
    /// stored set changed; a repeated call is a no-op returning `false`.
    pub fn sync_node_variables(&mut self, node_id: &str) -> Result<bool, GraphError> {
        Ok(self.require_mut(node_id)?.sync_variables())
    }

    /// Appends the `{{key}}` placeholder to `field` and re-syncs variables.
    ///
    /// Does nothing and returns `false` when the key is not allowed, the node
    /// does not exist, or the node's content has no such field.
    pub fn insert_variable(&mut self, node_id: &str, key: &str, field: TemplateField) -> bool {
        let Some(key) = VariableKey::resolve(key) else {
            return false;
        };
        let Some(&index) = self.index.get(node_id) else {
            return false;
        };
        let node = &mut self.nodes[index];
        let Some(text) = node.content_mut().template_field_mut(field) else {
            return false;
        };
        text.push_str(&key.placeholder());
        node.sync_variables();
        true
    }

    pub fn set_schedule(&mut self, node_id: &str, schedule: Schedule) -> Result<(), GraphError> {
        self.require_mut(node_id)?.set_schedule(schedule);
        Ok(())
    }

    /// Moves a node on the canvas. Does not touch topology.
    pub fn set_position(&mut self, node_id: &str, position: Position) -> Result<(), GraphError> {
        self.require_mut(node_id)?.set_position(position);
        Ok(())
    }

    /// Discards all positions and lays the sequence out from its topology.
    pub fn relayout(&mut self) {
        let layout = LayoutEngine::new(self.layout.clone()).compute(self);
        for node in &mut self.nodes {
            if let Some(position) = layout.position(node.id().as_str()) {
                node.set_position(position);
            }
        }
    }

    // --- Internals ---

    fn require(&self, node_id: &str) -> Result<&SequenceNode, GraphError> {
        self.node(node_id)
            .ok_or_else(|| GraphError::NodeNotFound(node_id.into()))
    }

    fn require_mut(&mut self, node_id: &str) -> Result<&mut SequenceNode, GraphError> {
        match self.index.get(node_id) {
            Some(&i) => Ok(&mut self.nodes[i]),
            None => Err(GraphError::NodeNotFound(node_id.into())),
        }
    }

    /// Re-indexes the node list and re-derives adjacency from scratch.
    fn rebuild(&mut self) {
        self.index = self
            .nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (node.id().clone(), i))
            .collect();
        self.adjacency = derive_adjacency(&self.nodes);
    }
}
