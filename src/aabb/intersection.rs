//! Ray/box tests using the slab method.

use crate::aabb::Aabb;
use crate::ray::Ray;
use crate::utils::{fast_max, fast_min};
use crate::Real;

impl Aabb {
    /// Tests the intersection of a [`Ray`] with this [`Aabb`] using the slab method from
    /// [this paper](http://www.cs.utah.edu/~awilliam/box/box.pdf).
    ///
    /// For every axis the ray's sign bits select the near and far planes, and the cached
    /// inverse direction turns them into a parametric interval. The box is hit if the
    /// running interval is still non-empty after all three axes. Rays parallel to a slab
    /// get infinite bounds from the zero direction component. Degenerate boxes are never
    /// hit.
    ///
    /// A ray parallel to an axis whose origin lies exactly on one of that axis' planes
    /// produces `0 * inf = NaN` bounds. Every later comparison is then false and the box
    /// is reported as hit, even if the ray passes outside it. Callers needing exact
    /// answers test the content itself, as [`BvhLinearTree::intersection`] does.
    ///
    /// [`BvhLinearTree::intersection`]: ../bvh/struct.BvhLinearTree.html#method.intersection
    ///
    /// # Examples
    /// ```
    /// use linear_bvh::aabb::Aabb;
    /// use linear_bvh::ray::Ray;
    /// use linear_bvh::{Point3, Vector3};
    ///
    /// let aabb = Aabb::new(Point3::new(0.0, 0.0, 0.0), 1.0, 1.0, 1.0);
    ///
    /// let ray = Ray::new(Point3::new(0.5, 0.5, -5.0), Vector3::new(0.0, 0.0, 1.0));
    /// assert!(aabb.intersects_ray(&ray));
    ///
    /// let ray = Ray::new(Point3::new(2.0, 0.0, 0.0), Vector3::new(0.0, 1.0, 0.0));
    /// assert!(!aabb.intersects_ray(&ray));
    /// ```
    ///
    /// [`Ray`]: ../ray/struct.Ray.html
    /// [`Aabb`]: struct.Aabb.html
    ///
    pub fn intersects_ray(&self, ray: &Ray) -> bool {
        if self.is_degenerate() {
            return false;
        }

        let bounds = [self.position, self.max()];

        let mut t_min = (bounds[ray.sign[0]].x - ray.origin.x) * ray.inv_direction.x;
        let mut t_max = (bounds[1 - ray.sign[0]].x - ray.origin.x) * ray.inv_direction.x;

        for axis in 1..3 {
            let near = (bounds[ray.sign[axis]][axis] - ray.origin[axis]) * ray.inv_direction[axis];
            let far =
                (bounds[1 - ray.sign[axis]][axis] - ray.origin[axis]) * ray.inv_direction[axis];

            if t_min > far || near > t_max {
                return false;
            }
            if near > t_min {
                t_min = near;
            }
            if far < t_max {
                t_max = far;
            }
        }

        true
    }

    /// Returns the entry and exit distances of `ray` through this box, clamped to the
    /// part of the ray in front of its origin, or [`None`] if the ray misses.
    pub fn intersection_slice(&self, ray: &Ray) -> Option<(Real, Real)> {
        if self.is_degenerate() {
            return None;
        }

        let bounds = [self.position, self.max()];
        let mut entry: Real = 0.0;
        let mut exit = Real::INFINITY;
        for axis in 0..3 {
            let near = (bounds[ray.sign[axis]][axis] - ray.origin[axis]) * ray.inv_direction[axis];
            let far =
                (bounds[1 - ray.sign[axis]][axis] - ray.origin[axis]) * ray.inv_direction[axis];
            entry = fast_max(near, entry);
            exit = fast_min(far, exit);
        }

        if entry <= exit {
            Some((entry, exit))
        } else {
            None
        }
    }
}
