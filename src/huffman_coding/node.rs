use std::cmp::Ordering;

use super::Symbol;

/// Index of a node inside its tree's arena.
pub type NodeId = usize;

/// What a node is. A branch always owns exactly two kids, a leaf owns none, so a node with a
/// single child cannot be built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeData {
    Kids(NodeId, NodeId),
    Leaf(Symbol),
}

/// A vertex of the code tree. Kids are referenced by arena index; the arena only ever points
/// from a node to nodes created before it during a build, so no cycle can form.
#[derive(Debug, Clone, Copy)]
pub struct Node {
    pub weight: u64,
    pub node_data: NodeData,
}

impl Node {
    /// Create a leaf node
    pub fn leaf(symbol: Symbol, weight: u64) -> Node {
        Node {
            weight,
            node_data: NodeData::Leaf(symbol),
        }
    }

    /// Create a branch over two existing nodes. The caller sums the weight.
    pub fn branch(weight: u64, left: NodeId, right: NodeId) -> Node {
        Node {
            weight,
            node_data: NodeData::Kids(left, right),
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self.node_data, NodeData::Leaf(_))
    }

    pub fn weight(&self) -> u64 {
        self.weight
    }

    /// The symbol of a leaf. Branches carry none.
    pub fn symbol(&self) -> Option<Symbol> {
        match self.node_data {
            NodeData::Leaf(symbol) => Some(symbol),
            NodeData::Kids(..) => None,
        }
    }

    /// (left, right) of a branch.
    pub fn kids(&self) -> Option<(NodeId, NodeId)> {
        match self.node_data {
            NodeData::Kids(left, right) => Some((left, right)),
            NodeData::Leaf(_) => None,
        }
    }
}

// Nodes compare by weight alone. Two nodes of equal weight are equal as far as the priority
// queue is concerned; which one comes out first is up to the queue.
impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.weight == other.weight
    }
}

impl Eq for Node {}

impl PartialOrd for Node {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Node {
    /// Sort Nodes by increasing weight
    fn cmp(&self, other: &Self) -> Ordering {
        self.weight.cmp(&other.weight)
    }
}

#[cfg(test)]
mod test {
    use super::{Node, NodeData};

    #[test]
    fn leaf_and_branch() {
        let leaf = Node::leaf(65, 3);
        assert!(leaf.is_leaf());
        assert_eq!(leaf.symbol(), Some(65));
        assert_eq!(leaf.kids(), None);

        let branch = Node::branch(7, 0, 1);
        assert!(!branch.is_leaf());
        assert_eq!(branch.symbol(), None);
        assert_eq!(branch.kids(), Some((0, 1)));
        assert_eq!(branch.node_data, NodeData::Kids(0, 1));
    }

    #[test]
    fn orders_by_weight_only() {
        let light = Node::leaf(9, 1);
        let heavy = Node::leaf(2, 5);
        assert!(light < heavy);
        assert_eq!(Node::leaf(1, 4), Node::branch(4, 0, 1));
    }
}
