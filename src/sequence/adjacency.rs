use super::node::SequenceNode;
use super::types::{Branch, NodeId};
use ahash::{AHashMap, AHashSet};
use itertools::Itertools;

/// Outgoing edges of one node.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Connections {
    pub main: Vec<NodeId>,
    pub yes: Option<NodeId>,
    pub no: Option<NodeId>,
}

impl Connections {
    /// The node occupying `branch`, if any. For `main` this is the first child.
    pub fn child(&self, branch: Branch) -> Option<&NodeId> {
        match branch {
            Branch::Main => self.main.first(),
            Branch::Yes => self.yes.as_ref(),
            Branch::No => self.no.as_ref(),
        }
    }

    /// Children in visiting order: `main` (by id), then `yes`, then `no`.
    pub fn iter(&self) -> impl Iterator<Item = (Branch, &NodeId)> {
        self.main
            .iter()
            .map(|id| (Branch::Main, id))
            .chain(self.yes.iter().map(|id| (Branch::Yes, id)))
            .chain(self.no.iter().map(|id| (Branch::No, id)))
    }

    pub fn is_leaf(&self) -> bool {
        self.main.is_empty() && self.yes.is_none() && self.no.is_none()
    }

    pub fn len(&self) -> usize {
        self.main.len() + usize::from(self.yes.is_some()) + usize::from(self.no.is_some())
    }
}

/// What connects to what, derived from the nodes' parent links.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Adjacency {
    connections: AHashMap<NodeId, Connections>,
    roots: Vec<NodeId>,
}

impl Adjacency {
    /// Outgoing edges of `node_id`; `None` if the node is unknown.
    pub fn connections(&self, node_id: &str) -> Option<&Connections> {
        self.connections.get(node_id)
    }

    /// Nodes without a live parent, ordered by id.
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn occupant(&self, parent_id: &str, branch: Branch) -> Option<&NodeId> {
        self.connections(parent_id)
            .and_then(|connections| connections.child(branch))
    }

    pub fn children<'a>(
        &'a self,
        node_id: &str,
    ) -> impl Iterator<Item = (Branch, &'a NodeId)> + use<'a> {
        self.connections(node_id)
            .into_iter()
            .flat_map(|connections| connections.iter())
    }
}

/// Groups `nodes` by `(parent_id, branch)`.
///
/// A node whose parent is absent from `nodes` is reported as a root. If two
/// nodes claim the same `yes`/`no` slot the one with the smaller id keeps it;
/// the graph's own operations never let that happen.
pub fn derive_adjacency(nodes: &[SequenceNode]) -> Adjacency {
    let known: AHashSet<&NodeId> = nodes.iter().map(|node| node.id()).collect();
    let mut connections: AHashMap<NodeId, Connections> = nodes
        .iter()
        .map(|node| (node.id().clone(), Connections::default()))
        .collect();
    let mut roots = Vec::new();

    for node in nodes.iter().sorted_by(|a, b| a.id().cmp(b.id())) {
        let link = match node.parent() {
            Some(link) if known.contains(&link.parent_id) => link,
            _ => {
                roots.push(node.id().clone());
                continue;
            }
        };
        let Some(parent) = connections.get_mut(&link.parent_id) else {
            continue;
        };
        match link.branch {
            Branch::Main => parent.main.push(node.id().clone()),
            Branch::Yes => {
                parent.yes.get_or_insert_with(|| node.id().clone());
            }
            Branch::No => {
                parent.no.get_or_insert_with(|| node.id().clone());
            }
        }
    }

    Adjacency { connections, roots }
}
