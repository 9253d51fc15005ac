//! Ray queries against a [`BvhLinearTree`].
//!
//! [`BvhLinearTree`]: struct.BvhLinearTree.html
//!

use crate::aabb::{Aabb, Bounded};
use crate::bounding_hierarchy::{BHContent, Hittable};
use crate::bvh::{BvhLinearTree, BvhNode};
use crate::geometry::RayGeometryIntersection;
use crate::ray::Ray;
use crate::{Matrix4, Real};

#[cfg(feature = "rayon")]
use rayon::prelude::*;

impl<C: BHContent, const N: usize> BvhLinearTree<C, N> {
    /// Returns true if `ray`, given in the parent space, hits any content.
    ///
    /// A subtree is only entered if the ray hits its box.
    pub fn is_hit_by(&self, ray: &Ray) -> bool {
        if self.is_empty() {
            return false;
        }
        self.is_hit_by_recursive(0, &ray.transformed(&self.transform))
    }

    fn is_hit_by_recursive(&self, node_index: usize, ray: &Ray) -> bool {
        match self.nodes[node_index] {
            BvhNode::Free => false,
            BvhNode::Leaf {
                aabb,
                content_index,
            } => aabb.intersects_ray(ray) && self.contents[content_index].is_hit_by(ray),
            BvhNode::Node {
                aabb,
                child_l_index,
                child_r_index,
            } => {
                aabb.intersects_ray(ray)
                    && (self.is_hit_by_recursive(child_l_index, ray)
                        || self.is_hit_by_recursive(child_r_index, ray))
            }
        }
    }

    /// Same as [`BvhLinearTree::is_hit_by`] for a ray which first goes through `outer`.
    pub fn is_hit_by_with_transform(&self, ray: &Ray, outer: &Matrix4) -> bool {
        self.is_hit_by(&ray.transformed(outer))
    }

    /// Returns the closest hit with a distance in `[min_distance, max_distance]`.
    ///
    /// `ray` is given in the parent space and the hit is reported in the parent space.
    /// Distances are measured along `ray` itself, so hits from different trees can be
    /// compared directly.
    ///
    /// # Examples
    /// ```
    /// use linear_bvh::geometry::{GeometryCollection, Sphere};
    /// use linear_bvh::ray::Ray;
    /// use linear_bvh::{Blas, Matrix4, Point3, Vector3};
    ///
    /// let mut group = GeometryCollection::new();
    /// group.push(Sphere::new(Point3::origin(), 1.0).into());
    ///
    /// let mut blas = Blas::new();
    /// blas.insert(group);
    /// blas.set_placement(Matrix4::new_translation(&Vector3::new(0.0, 0.0, -5.0)))
    ///     .unwrap();
    ///
    /// let ray = Ray::new(Point3::origin(), Vector3::new(0.0, 0.0, -1.0));
    /// let hit = blas.intersection(&ray, 0.0, 100.0).unwrap();
    /// assert!((hit.distance - 4.0).abs() < 1e-5);
    /// assert!((hit.point.z + 4.0).abs() < 1e-5);
    /// ```
    pub fn intersection(
        &self,
        ray: &Ray,
        min_distance: Real,
        max_distance: Real,
    ) -> Option<RayGeometryIntersection> {
        if self.is_empty() {
            return None;
        }
        let local_ray = ray.transformed(&self.transform);
        self.intersection_recursive(0, &local_ray, min_distance, max_distance)
            .map(|hit| hit.to_parent_space(&self.placement, &self.transform))
    }

    fn intersection_recursive(
        &self,
        node_index: usize,
        ray: &Ray,
        min_distance: Real,
        max_distance: Real,
    ) -> Option<RayGeometryIntersection> {
        match self.nodes[node_index] {
            BvhNode::Free => None,
            BvhNode::Leaf {
                aabb,
                content_index,
            } => {
                if !aabb.intersects_ray(ray) {
                    return None;
                }
                self.contents[content_index].intersection(ray, min_distance, max_distance)
            }
            BvhNode::Node {
                aabb,
                child_l_index,
                child_r_index,
            } => {
                if !aabb.intersects_ray(ray) {
                    return None;
                }
                RayGeometryIntersection::closest(
                    self.intersection_recursive(child_l_index, ray, min_distance, max_distance),
                    self.intersection_recursive(child_r_index, ray, min_distance, max_distance),
                )
            }
        }
    }

    /// Same as [`BvhLinearTree::intersection`] for a ray which first goes through
    /// `outer`. The hit is reported in the space the transformed ray lives in.
    pub fn intersection_with_transform(
        &self,
        ray: &Ray,
        outer: &Matrix4,
        min_distance: Real,
        max_distance: Real,
    ) -> Option<RayGeometryIntersection> {
        self.intersection(&ray.transformed(outer), min_distance, max_distance)
    }

    /// Returns the content whose leaf boxes are hit by `ray`, without testing the
    /// content itself.
    pub fn candidates<'a>(&'a self, ray: &Ray) -> Vec<&'a C> {
        let mut hits = Vec::new();
        if !self.is_empty() {
            self.candidates_recursive(0, &ray.transformed(&self.transform), &mut hits);
        }
        hits
    }

    fn candidates_recursive<'a>(&'a self, node_index: usize, ray: &Ray, hits: &mut Vec<&'a C>) {
        match self.nodes[node_index] {
            BvhNode::Free => {}
            BvhNode::Leaf {
                aabb,
                content_index,
            } => {
                if aabb.intersects_ray(ray) {
                    hits.push(&self.contents[content_index]);
                }
            }
            BvhNode::Node {
                aabb,
                child_l_index,
                child_r_index,
            } => {
                if aabb.intersects_ray(ray) {
                    self.candidates_recursive(child_l_index, ray, hits);
                    self.candidates_recursive(child_r_index, ray, hits);
                }
            }
        }
    }
}

#[cfg(feature = "rayon")]
impl<C: BHContent + Sync, const N: usize> BvhLinearTree<C, N> {
    /// Runs [`BvhLinearTree::intersection`] for every ray, in parallel.
    pub fn intersect_batch(
        &self,
        rays: &[Ray],
        min_distance: Real,
        max_distance: Real,
    ) -> Vec<Option<RayGeometryIntersection>> {
        rays.par_iter()
            .map(|ray| self.intersection(ray, min_distance, max_distance))
            .collect()
    }
}

#[cfg(not(feature = "rayon"))]
impl<C: BHContent, const N: usize> BvhLinearTree<C, N> {
    /// Runs [`BvhLinearTree::intersection`] for every ray.
    pub fn intersect_batch(
        &self,
        rays: &[Ray],
        min_distance: Real,
        max_distance: Real,
    ) -> Vec<Option<RayGeometryIntersection>> {
        rays.iter()
            .map(|ray| self.intersection(ray, min_distance, max_distance))
            .collect()
    }
}

/// A tree is bounded by its root box, moved into the parent space.
impl<C, const N: usize> Bounded for BvhLinearTree<C, N> {
    fn aabb(&self) -> Aabb {
        if self.nodes[0].is_free() {
            return Aabb::empty();
        }
        self.root_aabb().transformed(&self.placement)
    }
}

impl<C: BHContent, const N: usize> Hittable for BvhLinearTree<C, N> {
    fn is_hit_by(&self, ray: &Ray) -> bool {
        BvhLinearTree::is_hit_by(self, ray)
    }

    fn intersection(
        &self,
        ray: &Ray,
        min_distance: Real,
        max_distance: Real,
    ) -> Option<RayGeometryIntersection> {
        BvhLinearTree::intersection(self, ray, min_distance, max_distance)
    }
}
