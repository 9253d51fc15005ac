//! This module defines a Ray structure and its cached values.

use crate::{Matrix4, Point3, Real, Vector3};

/// A struct which defines a ray and some of its cached values.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ray {
    /// The ray origin.
    pub origin: Point3,

    /// The ray direction.
    pub direction: Vector3,

    /// Inverse (1/x) ray direction. Cached for use in [`Aabb`] intersections.
    /// Zero direction components turn into infinities on purpose.
    ///
    /// [`Aabb`]: ../aabb/struct.Aabb.html
    ///
    pub inv_direction: Vector3,

    /// Per axis, `1` if the inverse direction is negative, `0` otherwise. Selects which
    /// corner of a box is the near one along that axis.
    pub sign: [usize; 3],
}

impl Ray {
    /// Creates a new [`Ray`] from an `origin` and a `direction`.
    /// `direction` will be normalized.
    ///
    /// # Examples
    /// ```
    /// use linear_bvh::ray::Ray;
    /// use linear_bvh::{Point3, Vector3};
    ///
    /// let origin = Point3::new(0.0, 0.0, 0.0);
    /// let direction = Vector3::new(2.0, 0.0, 0.0);
    /// let ray = Ray::new(origin, direction);
    ///
    /// assert_eq!(ray.origin, origin);
    /// assert_eq!(ray.direction, Vector3::new(1.0, 0.0, 0.0));
    /// assert_eq!(ray.sign, [0, 0, 0]);
    /// ```
    ///
    /// [`Ray`]: struct.Ray.html
    ///
    pub fn new(origin: Point3, direction: Vector3) -> Ray {
        Ray::from_raw(origin, direction.normalize())
    }

    /// Creates a new [`Ray`] without normalizing `direction`.
    ///
    /// Distances along such a ray are measured in multiples of `direction`.
    ///
    /// [`Ray`]: struct.Ray.html
    ///
    pub fn from_raw(origin: Point3, direction: Vector3) -> Ray {
        let inv_direction = direction.map(|x| 1.0 / x);
        let sign = [
            (inv_direction.x < 0.0) as usize,
            (inv_direction.y < 0.0) as usize,
            (inv_direction.z < 0.0) as usize,
        ];
        Ray {
            origin,
            direction,
            inv_direction,
            sign,
        }
    }

    /// Re-expresses the ray in another space.
    ///
    /// The direction is not renormalized, so a distance `t` names the same point on the
    /// ray before and after the transform. This is what lets hits found in nested trees
    /// be compared with each other.
    pub fn transformed(&self, transform: &Matrix4) -> Ray {
        Ray::from_raw(
            transform.transform_point(&self.origin),
            transform.transform_vector(&self.direction),
        )
    }

    /// Returns the point at distance `t` along the ray.
    pub fn at(&self, t: Real) -> Point3 {
        self.origin + self.direction * t
    }
}
