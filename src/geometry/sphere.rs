//! This module defines a Sphere and its intersection algorithms

use crate::aabb::{Aabb, Bounded};
use crate::bounding_hierarchy::Hittable;
use crate::geometry::RayGeometryIntersection;
use crate::linear::{point4, GpuGeometry};
use crate::ray::Ray;
use crate::{Point3, Real, Vector3};

/// A representation of a Sphere
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Sphere {
    /// Center of the sphere
    pub center: Point3,
    /// Radius of the sphere
    pub radius: Real,
}

impl Sphere {
    /// Creates a sphere centered on a given point with a radius
    pub fn new(center: Point3, radius: Real) -> Sphere {
        Sphere { center, radius }
    }

    /// Solves `a t² + 2b t + c = 0` for `ray` and returns `(a, b, discriminant)`.
    fn quadratic(&self, ray: &Ray) -> (Real, Real, Real) {
        let oc = ray.origin - self.center;
        let a = ray.direction.norm_squared();
        let b = oc.dot(&ray.direction);
        let c = oc.norm_squared() - self.radius * self.radius;
        (a, b, b * b - a * c)
    }

    /// Returns the GPU record: tag, then `(center, radius)`.
    pub fn to_gpu(&self) -> GpuGeometry {
        let mut data = [[0.0; 4]; 3];
        data[0] = point4(&self.center);
        data[0][3] = self.radius;
        GpuGeometry {
            signature: GpuGeometry::SPHERE,
            data,
        }
    }
}

impl Bounded for Sphere {
    fn aabb(&self) -> Aabb {
        let half_size = Vector3::repeat(self.radius);
        Aabb::with_bounds(self.center - half_size, self.center + half_size)
    }
}

impl Hittable for Sphere {
    /// A positive discriminant with the far root in front of the origin counts as a hit.
    fn is_hit_by(&self, ray: &Ray) -> bool {
        let (a, b, discriminant) = self.quadratic(ray);
        discriminant > 0.0 && (-b + discriminant.sqrt()) / a > 0.0
    }

    fn intersection(
        &self,
        ray: &Ray,
        min_distance: Real,
        max_distance: Real,
    ) -> Option<RayGeometryIntersection> {
        let (a, b, discriminant) = self.quadratic(ray);
        if discriminant <= 0.0 {
            return None;
        }

        let sqrtd = discriminant.sqrt();
        let mut toi = (-b - sqrtd) / a;
        if toi < min_distance || max_distance < toi {
            toi = (-b + sqrtd) / a;
            if toi < min_distance || max_distance < toi {
                return None;
            }
        }

        let point = ray.at(toi);
        let normal = (point - self.center) / self.radius;
        Some(RayGeometryIntersection::new(point, toi, normal))
    }
}

#[cfg(test)]
mod tests {
    use crate::aabb::Bounded;
    use crate::bounding_hierarchy::Hittable;
    use crate::geometry::Sphere;
    use crate::ray::Ray;
    use crate::{Point3, Vector3};
    use float_eq::assert_float_eq;

    fn small_sphere() -> Sphere {
        Sphere::new(Point3::new(0.0, 0.0, -1.0), 0.5)
    }

    #[test]
    fn test_sphere_aabb() {
        let aabb = small_sphere().aabb();
        assert_eq!(aabb.position, Point3::new(-0.5, -0.5, -1.5));
        assert_eq!(aabb.max(), Point3::new(0.5, 0.5, -0.5));
    }

    #[test]
    fn test_ray_towards_sphere_hits_front() {
        let ray = Ray::new(Point3::origin(), Vector3::new(0.0, 0.0, -1.0));
        let sphere = small_sphere();
        assert!(sphere.is_hit_by(&ray));

        let hit = sphere.intersection(&ray, 0.001, 1000.0).unwrap();
        assert_float_eq!(hit.distance, 0.5, abs <= 1e-5);
        assert_float_eq!(hit.point.z, -0.5, abs <= 1e-5);
        assert_float_eq!(hit.normal.z, 1.0, abs <= 1e-5);
    }

    #[test]
    fn test_far_root_used_inside_sphere() {
        let ray = Ray::new(Point3::new(0.0, 0.0, -1.0), Vector3::new(0.0, 0.0, -1.0));
        let hit = small_sphere().intersection(&ray, 0.001, 1000.0).unwrap();
        assert_float_eq!(hit.distance, 0.5, abs <= 1e-5);
        assert_float_eq!(hit.normal.z, -1.0, abs <= 1e-5);
    }

    #[test]
    fn test_out_of_range_roots_miss() {
        let ray = Ray::new(Point3::origin(), Vector3::new(0.0, 0.0, -1.0));
        assert!(small_sphere().intersection(&ray, 0.001, 0.25).is_none());
        assert!(small_sphere().intersection(&ray, 2.0, 1000.0).is_none());
    }

    #[test]
    fn test_sphere_behind_origin_is_not_hit() {
        let ray = Ray::new(Point3::origin(), Vector3::new(0.0, 1.0, 0.0));
        let ground = Sphere::new(Point3::new(0.0, -100.5, -1.0), 100.0);
        assert!(!ground.is_hit_by(&ray));
        assert!(ground.intersection(&ray, 0.001, 1000.0).is_none());
    }

    #[test]
    fn test_tangent_ray_misses() {
        let ray = Ray::new(Point3::new(0.5, 0.0, 0.0), Vector3::new(0.0, 0.0, -1.0));
        assert!(!small_sphere().is_hit_by(&ray));
    }
}
