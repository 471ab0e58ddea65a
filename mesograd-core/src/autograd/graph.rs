use crate::error::MesogradError;
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_NODE_ID: AtomicU64 = AtomicU64::new(0);

/// Process-unique identity of a graph node.
///
/// Ids are handed out in creation order, so every parent has a smaller id than any node
/// derived from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u64);

impl NodeId {
    pub(crate) fn next() -> Self {
        NodeId(NEXT_NODE_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The capability shared by scalar and tensor nodes that the backward engine relies on.
///
/// Implementors are cheap handles (clones share the same node).
pub trait GraphNode: Clone {
    fn node_id(&self) -> NodeId;

    /// Operand handles, in operand order. Empty for leaves.
    fn parent_nodes(&self) -> Vec<Self>;

    fn is_leaf(&self) -> bool;

    fn requires_grad(&self) -> bool;

    /// Name of the producing operation, `"Leaf"` for leaves.
    fn op_name(&self) -> String;

    /// Resets the gradient to zeros of the node's shape.
    fn zero_grad(&self);

    /// Applies the local-gradient rule of the node's operation to its current gradient and adds
    /// the contributions into every parent that requires grad.
    fn propagate(&self) -> Result<(), MesogradError>;
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    InProgress,
    Done,
}

/// Orders every node reachable from `root` so that each node comes before all of its parents
/// (root first, leaves last).
///
/// The walk is an iterative depth-first search; deep graphs do not grow the call stack.
/// Meeting a node that is still being expanded means the parent relation has a cycle.
pub(crate) fn topological_sort<N: GraphNode>(root: &N) -> Result<Vec<N>, MesogradError> {
    let mut marks: HashMap<NodeId, Mark> = HashMap::new();
    let mut post_order: Vec<N> = Vec::new();
    let mut stack: Vec<(N, bool)> = vec![(root.clone(), false)];

    while let Some((node, expanded)) = stack.pop() {
        let id = node.node_id();
        if expanded {
            marks.insert(id, Mark::Done);
            post_order.push(node);
            continue;
        }
        match marks.get(&id) {
            Some(Mark::Done) => continue,
            Some(Mark::InProgress) => {
                return Err(MesogradError::GraphCycle { node: id.as_u64() });
            }
            None => {}
        }
        marks.insert(id, Mark::InProgress);
        let parents = node.parent_nodes();
        stack.push((node, true));
        // Reversed so that the first operand is expanded first.
        for parent in parents.into_iter().rev() {
            if marks.get(&parent.node_id()) == Some(&Mark::InProgress) {
                return Err(MesogradError::GraphCycle {
                    node: parent.node_id().as_u64(),
                });
            }
            stack.push((parent, false));
        }
    }

    post_order.reverse();
    Ok(post_order)
}

/// One entry of a [`GraphSnapshot`].
#[derive(Debug, Clone, PartialEq)]
pub struct SnapshotNode {
    pub id: NodeId,
    pub op: String,
    /// Indices into [`GraphSnapshot::nodes`]; always smaller than this node's own index.
    pub parents: Vec<usize>,
    pub requires_grad: bool,
}

/// The reachable part of a graph flattened into an index-addressed arena, leaves first.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GraphSnapshot {
    pub nodes: Vec<SnapshotNode>,
}

impl GraphSnapshot {
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Index of the node the snapshot was taken from.
    pub fn root_index(&self) -> Option<usize> {
        self.nodes.len().checked_sub(1)
    }
}

impl fmt::Display for GraphSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, node) in self.nodes.iter().enumerate() {
            let parents: Vec<String> = node.parents.iter().map(|p| format!("%{}", p)).collect();
            write!(f, "%{} {} = {}({})", index, node.id, node.op, parents.join(", "))?;
            if !node.requires_grad {
                write!(f, " [no grad]")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

pub(crate) fn snapshot<N: GraphNode>(root: &N) -> Result<GraphSnapshot, MesogradError> {
    let mut order = topological_sort(root)?;
    order.reverse();
    let index_of: HashMap<NodeId, usize> = order
        .iter()
        .enumerate()
        .map(|(index, node)| (node.node_id(), index))
        .collect();

    let mut nodes = Vec::with_capacity(order.len());
    for node in &order {
        let parents = node
            .parent_nodes()
            .iter()
            .map(|p| {
                index_of.get(&p.node_id()).copied().ok_or_else(|| {
                    MesogradError::UnsupportedOperation(format!(
                        "parent {} of {} missing from the traversal",
                        p.node_id(),
                        node.node_id()
                    ))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        nodes.push(SnapshotNode {
            id: node.node_id(),
            op: node.op_name(),
            parents,
            requires_grad: node.requires_grad(),
        });
    }
    Ok(GraphSnapshot { nodes })
}

#[cfg(test)]
#[path = "graph_test.rs"]
mod tests;
