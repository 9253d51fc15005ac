//! Axis Aligned Bounding Boxes.

mod aabb_impl;
mod intersection;

pub use aabb_impl::*;

/// A trait implemented by things which can be bounded by an [`Aabb`].
///
/// The returned box is expressed in the space of whoever owns the object: a geometry
/// reports its bounds in its tree's local space, a tree reports the bounds of its
/// content in the space of its parent.
///
/// [`Aabb`]: struct.Aabb.html
///
pub trait Bounded {
    /// Returns the bounding box of this object.
    fn aabb(&self) -> Aabb;
}

impl Bounded for Aabb {
    fn aabb(&self) -> Aabb {
        *self
    }
}

/// Implementation of [`Bounded`] for single points. The result is degenerate.
impl Bounded for crate::Point3 {
    fn aabb(&self) -> Aabb {
        Aabb::with_bounds(*self, *self)
    }
}
