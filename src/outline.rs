use crate::sequence::{Branch, NodeId, SequenceGraph, SequenceNode};
use ahash::AHashSet;
use itertools::Itertools;

/// Renders sequences as indented, human-readable outlines.
///
/// ```text
/// a: email "Hi {{first_name}}" [first_name]
/// └─ b: email-opened (after 2 days)
///    ├─ yes: c: manual-task "Call {{name}}" [name]
///    └─ no: d: email "Follow up"
/// ```
pub struct OutlineFormatter;

impl OutlineFormatter {
    /// Format the whole graph, one line per node in layout order.
    pub fn format(graph: &SequenceGraph) -> String {
        let mut lines = Vec::with_capacity(graph.len());
        let mut visited: AHashSet<&str> = AHashSet::new();

        for root in graph.roots() {
            Self::format_recursive(graph, root, "", None, &mut visited, &mut lines);
        }

        // Anything not reachable from a root is listed flat at the end.
        let stranded = graph
            .nodes()
            .iter()
            .filter(|node| !visited.contains(node.id().as_str()))
            .sorted_by(|a, b| a.id().cmp(b.id()))
            .map(|node| format!("? {}", Self::format_node(node)))
            .collect::<Vec<_>>();
        lines.extend(stranded);

        lines.join("\n")
    }

    fn format_recursive<'a>(
        graph: &'a SequenceGraph,
        node_id: &'a NodeId,
        prefix: &str,
        connector: Option<(bool, Branch)>,
        visited: &mut AHashSet<&'a str>,
        lines: &mut Vec<String>,
    ) {
        let Some(node) = graph.node(node_id.as_str()) else {
            return;
        };
        if !visited.insert(node_id.as_str()) {
            return;
        }

        let (line_prefix, child_prefix) = match connector {
            None => (String::new(), String::new()),
            Some((is_last, branch)) => {
                let label = match branch {
                    Branch::Main => "",
                    Branch::Yes => "yes: ",
                    Branch::No => "no: ",
                };
                if is_last {
                    (format!("{}└─ {}", prefix, label), format!("{}   ", prefix))
                } else {
                    (format!("{}├─ {}", prefix, label), format!("{}│  ", prefix))
                }
            }
        };
        lines.push(format!("{}{}", line_prefix, Self::format_node(node)));

        let Some(connections) = graph.connections(node_id.as_str()) else {
            return;
        };
        let children = connections.iter().collect::<Vec<_>>();
        let count = children.len();
        for (index, (branch, child_id)) in children.into_iter().enumerate() {
            Self::format_recursive(
                graph,
                child_id,
                &child_prefix,
                Some((index + 1 == count, branch)),
                visited,
                lines,
            );
        }
    }

    /// Format a single node: id, step type, summary, delay and variables.
    fn format_node(node: &SequenceNode) -> String {
        let mut line = format!("{}: {}", node.id(), node.step());
        if let Some(summary) = node.content().summary() {
            line.push_str(&format!(" \"{}\"", summary));
        }
        let schedule = node.schedule();
        if !schedule.is_immediate() {
            line.push_str(&format!(" (after {})", schedule));
        }
        if !node.variables().is_empty() {
            line.push_str(&format!(" [{}]", node.variables().iter().join(", ")));
        }
        line
    }
}
