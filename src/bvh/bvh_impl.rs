//! This module defines [`BvhLinearTree`], its incremental construction and its consistency
//! checks.
//!
//! [`BvhLinearTree`]: struct.BvhLinearTree.html
//!

use crate::aabb::{Aabb, Bounded};
use crate::bvh::{Blas, BvhNode, Tlas};
use crate::collection::Collection;
use crate::error::BvhError;
use crate::{Matrix4, Point3, Real, EPSILON};
use log::{debug, trace};

use std::iter::repeat;

/// A bounding volume hierarchy stored in a fixed array of `2·2^N - 1` slots, holding up
/// to `2^N` pieces of content.
///
/// Content is inserted one piece at a time. Every insertion walks down from the root
/// following a surface area heuristic, splits the leaf it ends up on and refits the
/// bounds of every node on the way back. Slot 0 is always the root.
///
/// Every tree carries a transform which takes rays from its parent space into its local
/// space, so a tree can itself be the content of another tree.
#[derive(Debug, Clone)]
pub struct BvhLinearTree<C, const N: usize> {
    /// Parent space to local space. Applied to every incoming ray.
    pub(crate) transform: Matrix4,

    /// Local space to parent space, the inverse of `transform`.
    pub(crate) placement: Matrix4,

    /// The slots.
    pub(crate) nodes: Vec<BvhNode>,

    /// Indices of free slots, in descending order. The last entry is the lowest one.
    pub(crate) free_nodes: Vec<usize>,

    /// The content, indexed by leaves.
    pub(crate) contents: Collection<C, N>,
}

impl<C, const N: usize> BvhLinearTree<C, N> {
    /// Maximum number of leaves, `2^N`.
    pub const LEAF_CAPACITY: usize = 1 << N;

    /// Number of slots, `2·2^N - 1`.
    pub const NODE_CAPACITY: usize = 2 * Self::LEAF_CAPACITY - 1;

    /// Creates an empty tree with an identity transform.
    pub fn new() -> BvhLinearTree<C, N> {
        BvhLinearTree {
            transform: Matrix4::identity(),
            placement: Matrix4::identity(),
            nodes: vec![BvhNode::Free; Self::NODE_CAPACITY],
            free_nodes: (0..Self::NODE_CAPACITY).rev().collect(),
            contents: Collection::new(),
        }
    }

    /// Number of inserted pieces of content.
    pub fn len(&self) -> usize {
        self.contents.len()
    }

    /// Returns true if nothing has been inserted.
    pub fn is_empty(&self) -> bool {
        self.contents.is_empty()
    }

    /// Returns true if another insertion would exceed the capacity.
    pub fn is_full(&self) -> bool {
        self.contents.is_full()
    }

    /// The inserted content, in insertion order.
    pub fn contents(&self) -> &[C] {
        self.contents.as_slice()
    }

    /// Returns the content at `index`.
    pub fn content(&self, index: usize) -> Option<&C> {
        self.contents.get(index)
    }

    /// All slots, including free ones.
    pub fn nodes(&self) -> &[BvhNode] {
        &self.nodes
    }

    /// Returns the slot at `index`.
    pub fn node(&self, index: usize) -> &BvhNode {
        &self.nodes[index]
    }

    /// Returns true if the slot at `index` is unoccupied.
    pub fn is_free(&self, index: usize) -> bool {
        self.nodes[index].is_free()
    }

    /// Bounds of the whole tree in local space. An empty tree yields [`Aabb::empty`].
    pub fn root_aabb(&self) -> Aabb {
        self.nodes[0].aabb()
    }

    /// Number of free slots.
    pub fn free_node_count(&self) -> usize {
        self.free_nodes.len()
    }

    /// Number of occupied slots.
    pub fn occupied_node_count(&self) -> usize {
        self.nodes.len() - self.free_nodes.len()
    }

    /// Number of levels, 0 for an empty tree and 1 for a single leaf.
    pub fn depth(&self) -> usize {
        self.depth_below(0)
    }

    fn depth_below(&self, node_index: usize) -> usize {
        match self.nodes[node_index] {
            BvhNode::Free => 0,
            BvhNode::Leaf { .. } => 1,
            BvhNode::Node {
                child_l_index,
                child_r_index,
                ..
            } => 1 + self.depth_below(child_l_index).max(self.depth_below(child_r_index)),
        }
    }

    /// The parent to local matrix applied to incoming rays.
    pub fn transform(&self) -> &Matrix4 {
        &self.transform
    }

    /// The local to parent matrix, the inverse of [`BvhLinearTree::transform`].
    pub fn placement(&self) -> &Matrix4 {
        &self.placement
    }

    /// Sets the parent to local matrix applied to incoming rays.
    ///
    /// Fails with [`BvhError::SingularTransform`] and leaves the tree untouched if
    /// `transform` has no inverse.
    pub fn set_transform(&mut self, transform: Matrix4) -> Result<(), BvhError> {
        let placement = transform
            .try_inverse()
            .ok_or(BvhError::SingularTransform)?;
        self.transform = transform;
        self.placement = placement;
        Ok(())
    }

    /// Places the tree in its parent space with a model matrix. The ray transform
    /// becomes the inverse of `model`.
    ///
    /// Fails with [`BvhError::SingularTransform`] and leaves the tree untouched if
    /// `model` has no inverse.
    pub fn set_placement(&mut self, model: Matrix4) -> Result<(), BvhError> {
        let transform = model.try_inverse().ok_or(BvhError::SingularTransform)?;
        self.transform = transform;
        self.placement = model;
        Ok(())
    }

    /// Calls `visitor` on every piece of content, in pre-order with left subtrees first.
    pub fn traverse<F: FnMut(&C)>(&self, mut visitor: F) {
        self.traverse_recursive(0, &mut visitor);
    }

    fn traverse_recursive<F: FnMut(&C)>(&self, node_index: usize, visitor: &mut F) {
        match self.nodes[node_index] {
            BvhNode::Free => {}
            BvhNode::Leaf { content_index, .. } => visitor(&self.contents[content_index]),
            BvhNode::Node {
                child_l_index,
                child_r_index,
                ..
            } => {
                self.traverse_recursive(child_l_index, visitor);
                self.traverse_recursive(child_r_index, visitor);
            }
        }
    }

    /// Prints the tree through the `log` facade at debug level.
    pub fn pretty_print(&self) {
        self.print_node(0, 0);
    }

    fn print_node(&self, node_index: usize, depth: usize) {
        let padding: String = repeat(" ").take(depth).collect();
        match self.nodes[node_index] {
            BvhNode::Free => debug!("{}node={} free", padding, node_index),
            BvhNode::Leaf {
                aabb,
                content_index,
            } => {
                debug!("{}node={} {}", padding, node_index, aabb);
                debug!("{}content\t{}", padding, content_index);
            }
            BvhNode::Node {
                aabb,
                child_l_index,
                child_r_index,
            } => {
                debug!("{}node={} {}", padding, node_index, aabb);
                debug!("{}{} child_l", padding, child_l_index);
                self.print_node(child_l_index, depth + 1);
                debug!("{}{} child_r", padding, child_r_index);
                self.print_node(child_r_index, depth + 1);
            }
        }
    }

    /// Returns the lowest free slot without taking it.
    fn first_free_node(&self) -> usize {
        match self.free_nodes.last() {
            Some(&index) => index,
            None => panic!("Tried to take a slot from a tree without free slots."),
        }
    }

    /// Removes `node_index` from the free list.
    fn occupy(&mut self, node_index: usize) {
        if let Ok(position) = self
            .free_nodes
            .binary_search_by(|probe| node_index.cmp(probe))
        {
            self.free_nodes.remove(position);
        }
    }
}

impl<C: Bounded, const N: usize> BvhLinearTree<C, N> {
    /// Inserts `content` and returns its index.
    ///
    /// # Panics
    /// Panics if the tree already holds [`BvhLinearTree::LEAF_CAPACITY`] pieces of content.
    ///
    /// # Examples
    /// ```
    /// use linear_bvh::aabb::Aabb;
    /// use linear_bvh::bvh::BvhLinearTree;
    /// use linear_bvh::Point3;
    ///
    /// let mut tree = BvhLinearTree::<Aabb, 2>::new();
    /// for x in 0..4 {
    ///     tree.insert(Aabb::new(Point3::new(x as f32 * 2.0, 0.0, 0.0), 1.0, 1.0, 1.0));
    /// }
    /// assert_eq!(tree.len(), 4);
    /// assert_eq!(tree.free_node_count(), 0);
    /// assert_eq!(tree.root_aabb().max(), Point3::new(7.0, 1.0, 1.0));
    /// ```
    pub fn insert(&mut self, content: C) -> usize {
        match self.try_insert(content) {
            Ok(index) => index,
            Err(err) => panic!("Tried to insert into a full tree: {}", err),
        }
    }

    /// Inserts `content` and returns its index, or [`BvhError::CapacityExceeded`] if the
    /// tree is full. The rejected content is dropped and the tree is unchanged.
    pub fn try_insert(&mut self, content: C) -> Result<usize, BvhError> {
        let aabb = content.aabb();
        let content_index = self.contents.try_push(content)?;
        self.place(0, content_index, &aabb);
        Ok(content_index)
    }

    /// Places the leaf for `content_index` in the subtree rooted at `node_index` and
    /// refits that subtree.
    ///
    /// At an internal node the content descends into the child it inflates least, so
    /// the cost is `surface_area_ratio(child, union)` and not the reverse order.
    fn place(&mut self, node_index: usize, content_index: usize, aabb: &Aabb) {
        match self.nodes[node_index] {
            BvhNode::Free => {
                trace!("content {} takes free node {}", content_index, node_index);
                self.occupy(node_index);
                self.nodes[node_index] = BvhNode::Leaf {
                    aabb: *aabb,
                    content_index,
                };
            }
            BvhNode::Leaf {
                aabb: existing_aabb,
                content_index: existing_index,
            } => {
                let existing_node = self.first_free_node();
                self.occupy(existing_node);
                self.nodes[existing_node] = BvhNode::Leaf {
                    aabb: existing_aabb,
                    content_index: existing_index,
                };
                let new_node = self.first_free_node();

                // The leaf covering more of the union goes right.
                let union = existing_aabb.join(aabb);
                let existing_ratio = Aabb::surface_area_ratio(&union, &existing_aabb);
                let new_ratio = Aabb::surface_area_ratio(&union, aabb);
                let (child_l_index, child_r_index) = if existing_ratio > new_ratio {
                    (new_node, existing_node)
                } else {
                    (existing_node, new_node)
                };
                debug!(
                    "split leaf {}: content {} -> node {}, content {} -> node {}",
                    node_index, existing_index, existing_node, content_index, new_node
                );

                self.nodes[node_index] = BvhNode::Node {
                    aabb: union,
                    child_l_index,
                    child_r_index,
                };
                self.place(new_node, content_index, aabb);
            }
            BvhNode::Node {
                child_l_index,
                child_r_index,
                ..
            } => {
                let child_l_aabb = self.nodes[child_l_index].aabb();
                let child_r_aabb = self.nodes[child_r_index].aabb();
                let l_cost = Aabb::surface_area_ratio(&child_l_aabb, &child_l_aabb.join(aabb));
                let r_cost = Aabb::surface_area_ratio(&child_r_aabb, &child_r_aabb.join(aabb));
                trace!(
                    "content {} at node {}: l_cost={} r_cost={}",
                    content_index,
                    node_index,
                    l_cost,
                    r_cost
                );

                if r_cost < l_cost {
                    self.place(child_r_index, content_index, aabb);
                } else {
                    self.place(child_l_index, content_index, aabb);
                }
                self.refit(node_index);
            }
        }
    }

    /// Recomputes the bounds of internal node `node_index` from its children.
    fn refit(&mut self, node_index: usize) {
        if let BvhNode::Node {
            child_l_index,
            child_r_index,
            ..
        } = self.nodes[node_index]
        {
            let joint_aabb = self.nodes[child_l_index]
                .aabb()
                .join(&self.nodes[child_r_index].aabb());
            self.nodes[node_index].set_aabb(joint_aabb);
        }
    }

    /// Checks if all children of a node have the correct bounds and belong to the
    /// expected content, and counts the reachable leaves and slots.
    fn is_consistent_subtree(
        &self,
        node_index: usize,
        expected_outer_aabb: &Aabb,
        node_count: &mut usize,
        seen_contents: &mut [bool],
    ) -> bool {
        *node_count += 1;
        match self.nodes[node_index] {
            BvhNode::Free => false,
            BvhNode::Leaf {
                aabb,
                content_index,
            } => {
                let Some(content) = self.contents.get(content_index) else {
                    return false;
                };
                let fresh = !std::mem::replace(&mut seen_contents[content_index], true);
                fresh
                    && aabb.relative_eq(&content.aabb(), EPSILON)
                    && expected_outer_aabb.approx_contains_aabb_eps(&aabb, EPSILON)
            }
            BvhNode::Node {
                aabb,
                child_l_index,
                child_r_index,
            } => {
                child_r_index != 0
                    && child_l_index != 0
                    && expected_outer_aabb.approx_contains_aabb_eps(&aabb, EPSILON)
                    && self.is_consistent_subtree(child_l_index, &aabb, node_count, seen_contents)
                    && self.is_consistent_subtree(child_r_index, &aabb, node_count, seen_contents)
            }
        }
    }

    /// Checks if the tree is consistent: every occupied slot is reachable from the
    /// root exactly once, every piece of content has exactly one leaf, every box
    /// contains its children and the free list lists exactly the free slots.
    pub fn is_consistent(&self) -> bool {
        let free_list_matches = self.free_nodes.windows(2).all(|pair| pair[0] > pair[1])
            && self.free_nodes.iter().all(|&index| self.nodes[index].is_free())
            && self.nodes.iter().filter(|node| node.is_free()).count() == self.free_nodes.len();
        if !free_list_matches {
            return false;
        }
        if self.is_empty() {
            return self.nodes[0].is_free();
        }

        let mut node_count = 0;
        let mut seen_contents = vec![false; self.len()];
        self.is_consistent_subtree(0, &unbounded(), &mut node_count, &mut seen_contents)
            && node_count == self.occupied_node_count()
            && seen_contents.iter().all(|&seen| seen)
    }

    /// Assert version of `is_consistent_subtree`.
    fn assert_consistent_subtree(
        &self,
        node_index: usize,
        expected_outer_aabb: &Aabb,
        expected_depth: usize,
        node_count: &mut usize,
        seen_contents: &mut [bool],
    ) {
        *node_count += 1;
        match self.nodes[node_index] {
            BvhNode::Free => panic!(
                "Free node {} is referenced by the tree.\n\tDepth: {}",
                node_index, expected_depth
            ),
            BvhNode::Leaf {
                aabb,
                content_index,
            } => {
                assert!(
                    content_index < self.len(),
                    "Leaf {} refers to missing content {}",
                    node_index,
                    content_index
                );
                assert!(
                    !seen_contents[content_index],
                    "Content {} is referenced by more than one leaf",
                    content_index
                );
                seen_contents[content_index] = true;

                let content_aabb = self.contents[content_index].aabb();
                assert!(
                    aabb.relative_eq(&content_aabb, EPSILON),
                    "Leaf's Aabb does not match its content.\n\tLeaf: {}\n\tContent: {}\n\tNode: {}",
                    aabb,
                    content_aabb,
                    node_index
                );
                assert!(
                    expected_outer_aabb.approx_contains_aabb_eps(&aabb, EPSILON),
                    "Leaf {} lies outside the expected bounds.\n\tDepth: {}\n\tBounds: {}\n\tLeaf: {}",
                    node_index,
                    expected_depth,
                    expected_outer_aabb,
                    aabb
                );
            }
            BvhNode::Node {
                aabb,
                child_l_index,
                child_r_index,
            } => {
                assert!(
                    child_l_index != 0 && child_r_index != 0,
                    "Node {} refers to the root as a child",
                    node_index
                );
                assert!(
                    expected_outer_aabb.approx_contains_aabb_eps(&aabb, EPSILON),
                    "Node {} lies outside the expected bounds.
                         \tDepth: {}
                         \tBounds: {}
                         \tNode: {}",
                    node_index,
                    expected_depth,
                    expected_outer_aabb,
                    aabb
                );
                self.assert_consistent_subtree(
                    child_l_index,
                    &aabb,
                    expected_depth + 1,
                    node_count,
                    seen_contents,
                );
                self.assert_consistent_subtree(
                    child_r_index,
                    &aabb,
                    expected_depth + 1,
                    node_count,
                    seen_contents,
                );
            }
        }
    }

    /// Assert version of `is_consistent`.
    pub fn assert_consistent(&self) {
        assert!(
            self.free_nodes.windows(2).all(|pair| pair[0] > pair[1]),
            "Free list is not in descending order: {:?}",
            self.free_nodes
        );
        for &index in &self.free_nodes {
            assert!(
                self.nodes[index].is_free(),
                "Slot {} is on the free list but occupied",
                index
            );
        }
        assert_eq!(
            self.nodes.iter().filter(|node| node.is_free()).count(),
            self.free_nodes.len(),
            "Free slot missing from the free list"
        );

        if self.is_empty() {
            assert!(self.nodes[0].is_free(), "Empty tree with an occupied root");
            return;
        }

        // The counter for all reachable nodes.
        let mut node_count = 0;
        let mut seen_contents = vec![false; self.len()];
        self.assert_consistent_subtree(0, &unbounded(), 0, &mut node_count, &mut seen_contents);

        // If this is false, it means we have a detached subtree.
        if node_count != self.occupied_node_count() {
            self.pretty_print();
        }
        assert_eq!(node_count, self.occupied_node_count(), "Detached subtree");
        assert!(
            seen_contents.iter().all(|&seen| seen),
            "Content without a leaf"
        );
    }

    /// Check that the `Aabb`s in the tree are tight, which means, that parent `Aabb`s are
    /// not larger than they should be. This function checks whether the children of node
    /// `node_index` exactly fill `outer_aabb`.
    pub fn assert_tight_subtree(&self, node_index: usize, outer_aabb: &Aabb) {
        if let BvhNode::Node {
            child_l_index,
            child_r_index,
            ..
        } = self.nodes[node_index]
        {
            let child_l_aabb = self.nodes[child_l_index].aabb();
            let child_r_aabb = self.nodes[child_r_index].aabb();
            let joint_aabb = child_l_aabb.join(&child_r_aabb);
            assert!(
                joint_aabb.relative_eq(outer_aabb, EPSILON),
                "{} real_aabb={} stored_aabb={}",
                node_index,
                joint_aabb,
                outer_aabb
            );
            self.assert_tight_subtree(child_l_index, &child_l_aabb);
            self.assert_tight_subtree(child_r_index, &child_r_aabb);
        }
    }

    /// Check that the `Aabb`s in the tree are tight, which means, that parent `Aabb`s are
    /// not larger than they should be.
    pub fn assert_tight(&self) {
        self.assert_tight_subtree(0, &self.root_aabb());
    }
}

impl<C, const N: usize> Default for BvhLinearTree<C, N> {
    fn default() -> Self {
        Self::new()
    }
}

/// The root is not bounded by anything.
fn unbounded() -> Aabb {
    Aabb::with_bounds(
        Point3::new(Real::MIN, Real::MIN, Real::MIN),
        Point3::new(Real::MAX, Real::MAX, Real::MAX),
    )
}

impl Tlas {
    /// Sets the view matrix, which takes world space rays into the camera space the
    /// instances are placed in.
    pub fn set_view(&mut self, view: Matrix4) -> Result<(), BvhError> {
        self.set_transform(view)
    }

    /// Places `blas` with the model matrix `model` and inserts it. Returns the instance
    /// index.
    pub fn insert_instance(&mut self, mut blas: Blas, model: Matrix4) -> Result<usize, BvhError> {
        blas.set_placement(model)?;
        self.try_insert(blas)
    }
}
