use crate::aabb::Aabb;
use crate::linear::GpuNode;

/// The [`BvhNode`] enum that describes one slot of a [`BvhLinearTree`].
/// A slot is either free, a leaf which references content (by holding its index)
/// or a regular node that has two child nodes.
/// Occupied slots store the convex hull of everything below them.
///
/// [`BvhLinearTree`]: struct.BvhLinearTree.html
///
#[derive(Debug, Copy, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BvhNode {
    /// Unoccupied slot.
    #[default]
    Free,
    /// Leaf node.
    Leaf {
        /// Bounds of the content.
        aabb: Aabb,

        /// The content referenced by this leaf.
        content_index: usize,
    },
    /// Inner node.
    Node {
        /// The convex hull of both subtrees.
        aabb: Aabb,

        /// Index of the left subtree's root node.
        child_l_index: usize,

        /// Index of the right subtree's root node.
        child_r_index: usize,
    },
}

impl BvhNode {
    /// Returns true if the slot is unoccupied.
    pub fn is_free(&self) -> bool {
        matches!(self, BvhNode::Free)
    }

    /// Returns true for leaves.
    pub fn is_leaf(&self) -> bool {
        matches!(self, BvhNode::Leaf { .. })
    }

    /// Returns the bounds stored in this node. Free slots report [`Aabb::empty`].
    pub fn aabb(&self) -> Aabb {
        match *self {
            BvhNode::Free => Aabb::empty(),
            BvhNode::Leaf { aabb, .. } | BvhNode::Node { aabb, .. } => aabb,
        }
    }

    /// Replaces the bounds of an occupied node. Does nothing on a free slot.
    pub fn set_aabb(&mut self, new_aabb: Aabb) {
        match self {
            BvhNode::Free => {}
            BvhNode::Leaf { aabb, .. } | BvhNode::Node { aabb, .. } => *aabb = new_aabb,
        }
    }

    /// Returns the index of the left child if the node is an internal node.
    pub fn child_l(&self) -> usize {
        match *self {
            BvhNode::Node { child_l_index, .. } => child_l_index,
            _ => panic!("Tried to get the left child of a leaf or free node."),
        }
    }

    /// Returns the index of the right child if the node is an internal node.
    pub fn child_r(&self) -> usize {
        match *self {
            BvhNode::Node { child_r_index, .. } => child_r_index,
            _ => panic!("Tried to get the right child of a leaf or free node."),
        }
    }

    /// Returns the index of the content contained within the node if is a leaf,
    /// or `None` if it is an interior node or free.
    pub fn content_index(&self) -> Option<usize> {
        match *self {
            BvhNode::Leaf { content_index, .. } => Some(content_index),
            _ => None,
        }
    }

    /// Returns the GPU record of this slot.
    pub fn to_gpu(&self) -> GpuNode {
        match *self {
            BvhNode::Free => GpuNode::FREE,
            BvhNode::Leaf {
                aabb,
                content_index,
            } => GpuNode::leaf(&aabb, content_index),
            BvhNode::Node {
                aabb,
                child_l_index,
                child_r_index,
            } => GpuNode::internal(&aabb, child_l_index, child_r_index),
        }
    }
}
