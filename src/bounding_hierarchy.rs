//! This module defines the [`Hittable`] and [`BHContent`] traits.
//!
//! [`Hittable`]: trait.Hittable.html
//! [`BHContent`]: trait.BHContent.html
//!

use crate::aabb::Bounded;
use crate::geometry::RayGeometryIntersection;
use crate::linear::Linearize;
use crate::ray::Ray;
use crate::Real;

/// Something a [`Ray`] can hit.
///
/// The ray is given in the caller's space: for geometry that is the space of the tree
/// holding it, for a nested tree it is the space of the parent tree. Results come back
/// in that same space.
///
/// [`Ray`]: ../ray/struct.Ray.html
///
pub trait Hittable {
    /// Returns true if `ray` hits this object.
    fn is_hit_by(&self, ray: &Ray) -> bool;

    /// Returns the closest hit with a distance in `[min_distance, max_distance]`.
    fn intersection(
        &self,
        ray: &Ray,
        min_distance: Real,
        max_distance: Real,
    ) -> Option<RayGeometryIntersection>;
}

/// Everything a [`BvhLinearTree`] needs from its content.
///
/// [`BvhLinearTree`]: ../bvh/struct.BvhLinearTree.html
///
pub trait BHContent: Bounded + Hittable + Linearize {}

impl<T: Bounded + Hittable + Linearize> BHContent for T {}
