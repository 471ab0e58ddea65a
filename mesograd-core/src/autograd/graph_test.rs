use super::*;
use std::sync::{Arc, RwLock};

/// Minimal node whose parent list can be rewired, used to exercise the defensive cycle check.
#[derive(Clone, Debug)]
struct MockNode {
    id: NodeId,
    parents: Arc<RwLock<Vec<MockNode>>>,
}

impl MockNode {
    fn new(parents: Vec<MockNode>) -> Self {
        MockNode {
            id: NodeId::next(),
            parents: Arc::new(RwLock::new(parents)),
        }
    }
}

impl GraphNode for MockNode {
    fn node_id(&self) -> NodeId {
        self.id
    }

    fn parent_nodes(&self) -> Vec<Self> {
        self.parents.read().unwrap().clone()
    }

    fn is_leaf(&self) -> bool {
        self.parents.read().unwrap().is_empty()
    }

    fn requires_grad(&self) -> bool {
        true
    }

    fn op_name(&self) -> String {
        if self.is_leaf() {
            "Leaf".to_string()
        } else {
            "Mock".to_string()
        }
    }

    fn zero_grad(&self) {}

    fn propagate(&self) -> Result<(), MesogradError> {
        Ok(())
    }
}

fn position(order: &[MockNode], node: &MockNode) -> usize {
    order.iter().position(|n| n.id == node.id).unwrap()
}

#[test]
fn test_single_node_order() {
    let leaf = MockNode::new(vec![]);
    let order = topological_sort(&leaf).unwrap();
    assert_eq!(order.len(), 1);
    assert_eq!(order[0].id, leaf.id);
}

#[test]
fn test_diamond_visits_shared_parent_once() {
    let a = MockNode::new(vec![]);
    let b = MockNode::new(vec![a.clone()]);
    let c = MockNode::new(vec![a.clone()]);
    let d = MockNode::new(vec![b.clone(), c.clone()]);

    let order = topological_sort(&d).unwrap();
    assert_eq!(order.len(), 4);
    assert_eq!(position(&order, &d), 0);
    assert!(position(&order, &b) < position(&order, &a));
    assert!(position(&order, &c) < position(&order, &a));
}

#[test]
fn test_repeated_operand_is_visited_once() {
    let x = MockNode::new(vec![]);
    let y = MockNode::new(vec![x.clone(), x.clone()]);
    let order = topological_sort(&y).unwrap();
    assert_eq!(order.len(), 2);
}

#[test]
fn test_deep_chain_does_not_overflow() {
    let mut node = MockNode::new(vec![]);
    for _ in 0..100_000 {
        node = MockNode::new(vec![node]);
    }
    let order = topological_sort(&node).unwrap();
    assert_eq!(order.len(), 100_001);
    assert!(order.last().unwrap().is_leaf());

    // Unlink before dropping so the chain is not torn down recursively.
    for n in &order {
        n.parents.write().unwrap().clear();
    }
}

#[test]
fn test_cycle_is_detected() {
    let a = MockNode::new(vec![]);
    let b = MockNode::new(vec![a.clone()]);
    let c = MockNode::new(vec![b.clone()]);
    // Rewire a -> c, closing the loop a -> c -> b -> a.
    a.parents.write().unwrap().push(c.clone());

    let err = topological_sort(&c).unwrap_err();
    assert!(matches!(err, MesogradError::GraphCycle { .. }));

    // Break the cycle so the Arc graph can be dropped.
    a.parents.write().unwrap().clear();
}

#[test]
fn test_self_loop_is_detected() {
    let a = MockNode::new(vec![]);
    a.parents.write().unwrap().push(a.clone());
    let err = topological_sort(&a).unwrap_err();
    assert_eq!(err, MesogradError::GraphCycle { node: a.id.as_u64() });
    a.parents.write().unwrap().clear();
}

#[test]
fn test_snapshot_is_leaves_first_arena() {
    let a = MockNode::new(vec![]);
    let b = MockNode::new(vec![]);
    let c = MockNode::new(vec![a.clone(), b.clone()]);
    let d = MockNode::new(vec![c.clone(), a.clone()]);

    let snap = snapshot(&d).unwrap();
    assert_eq!(snap.len(), 4);
    assert_eq!(snap.root_index(), Some(3));
    assert_eq!(snap.nodes[3].id, d.id);
    for (index, node) in snap.nodes.iter().enumerate() {
        assert!(node.parents.iter().all(|&p| p < index));
    }
    let text = snap.to_string();
    assert_eq!(text.lines().count(), 4);
    assert!(text.contains("Mock("));
}

#[test]
fn test_node_ids_increase() {
    let first = NodeId::next();
    let second = NodeId::next();
    assert!(second > first);
}
