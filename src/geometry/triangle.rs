//! This module defines a Triangle and its intersection algorithms

use crate::aabb::{Aabb, Bounded};
use crate::bounding_hierarchy::Hittable;
use crate::geometry::RayGeometryIntersection;
use crate::linear::{point4, GpuGeometry};
use crate::ray::Ray;
use crate::{Point3, Real, EPSILON};

/// A triangle struct. Both faces can be hit.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Triangle {
    /// First point on the triangle
    pub a: Point3,
    /// Second point on the triangle
    pub b: Point3,
    /// Third point on the triangle
    pub c: Point3,
}

impl Triangle {
    /// Creates a new triangle given a counter clockwise set of points
    pub fn new(a: Point3, b: Point3, c: Point3) -> Triangle {
        Triangle { a, b, c }
    }

    /// Returns the GPU record: tag, then the three vertices.
    pub fn to_gpu(&self) -> GpuGeometry {
        GpuGeometry {
            signature: GpuGeometry::TRIANGLE,
            data: [point4(&self.a), point4(&self.b), point4(&self.c)],
        }
    }
}

impl Bounded for Triangle {
    fn aabb(&self) -> Aabb {
        Aabb::from_points(&[self.a, self.b, self.c])
    }
}

impl Hittable for Triangle {
    fn is_hit_by(&self, ray: &Ray) -> bool {
        self.intersection(ray, EPSILON, Real::INFINITY).is_some()
    }

    /// Implementation of the
    /// [Möller-Trumbore triangle/ray intersection algorithm](https://en.wikipedia.org/wiki/M%C3%B6ller%E2%80%93Trumbore_intersection_algorithm).
    /// The returned normal faces the ray origin.
    fn intersection(
        &self,
        ray: &Ray,
        min_distance: Real,
        max_distance: Real,
    ) -> Option<RayGeometryIntersection> {
        let a_to_b = self.b - self.a;
        let a_to_c = self.c - self.a;

        // Begin calculating determinant - also used to calculate u parameter
        // u_vec lies in view plane
        let u_vec = ray.direction.cross(&a_to_c);

        // If determinant is near zero, ray lies in plane of triangle
        let det = a_to_b.dot(&u_vec);
        if det.abs() < EPSILON {
            return None;
        }

        let inv_det = 1.0 / det;

        // Vector from point a to ray origin
        let a_to_origin = ray.origin - self.a;

        // Calculate u parameter
        let u = a_to_origin.dot(&u_vec) * inv_det;

        // Test bounds: u < 0 || u > 1 => outside of triangle
        if !(0.0..=1.0).contains(&u) {
            return None;
        }

        // Prepare to test v parameter
        let v_vec = a_to_origin.cross(&a_to_b);

        // Calculate v parameter and test bound
        let v = ray.direction.dot(&v_vec) * inv_det;
        // The intersection lies outside of the triangle
        if v < 0.0 || u + v > 1.0 {
            return None;
        }

        let distance = a_to_c.dot(&v_vec) * inv_det;
        if distance < min_distance || distance > max_distance {
            return None;
        }

        let mut normal = a_to_b.cross(&a_to_c).normalize();
        if normal.dot(&ray.direction) > 0.0 {
            normal = -normal;
        }
        Some(RayGeometryIntersection::new(ray.at(distance), distance, normal))
    }
}
