//! Ray-traceable primitives and the per-object groups a [`Blas`] is built from.
//!
//! [`Blas`]: ../bvh/type.Blas.html
//!

mod geometry_collection;
mod sphere;
mod triangle;

pub use self::geometry_collection::*;
pub use self::sphere::*;
pub use self::triangle::*;

use crate::aabb::{Aabb, Bounded};
use crate::bounding_hierarchy::Hittable;
use crate::linear::{write_record, GpuGeometry, Linearize, GEOMETRY_RECORD_SIZE};
use crate::ray::Ray;
use crate::{Matrix4, Point3, Real, Vector3};

/// Where and how a ray met a surface.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RayGeometryIntersection {
    /// Contact point.
    pub point: Point3,

    /// Distance from the ray origin, in multiples of the ray direction.
    pub distance: Real,

    /// Unit surface normal at `point`.
    pub normal: Vector3,
}

impl RayGeometryIntersection {
    /// Creates a new [`RayGeometryIntersection`].
    ///
    /// [`RayGeometryIntersection`]: struct.RayGeometryIntersection.html
    ///
    pub fn new(point: Point3, distance: Real, normal: Vector3) -> RayGeometryIntersection {
        RayGeometryIntersection {
            point,
            distance,
            normal,
        }
    }

    /// Returns whichever of `a` and `b` is closer. A missing hit loses against any hit,
    /// and on equal distances `a` is kept.
    pub fn closest(
        a: Option<RayGeometryIntersection>,
        b: Option<RayGeometryIntersection>,
    ) -> Option<RayGeometryIntersection> {
        match (a, b) {
            (Some(a), Some(b)) => Some(if b.distance < a.distance { b } else { a }),
            (a, None) => a,
            (None, b) => b,
        }
    }

    /// Maps a hit found in a tree's local space back to its parent space.
    ///
    /// `placement` is the local to parent matrix and `transform` its inverse. Normals are
    /// carried by the inverse transpose of `placement`, which is the transpose of
    /// `transform`. The distance is unchanged since rays are never renormalized when
    /// they change space.
    pub fn to_parent_space(
        &self,
        placement: &Matrix4,
        transform: &Matrix4,
    ) -> RayGeometryIntersection {
        let normal = transform.fixed_view::<3, 3>(0, 0).transpose() * self.normal;
        RayGeometryIntersection {
            point: placement.transform_point(&self.point),
            distance: self.distance,
            normal: normal.try_normalize(0.0).unwrap_or(normal),
        }
    }
}

/// A single primitive.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Geometry {
    Sphere(Sphere),
    Triangle(Triangle),
}

impl Geometry {
    /// Returns the GPU record of this primitive.
    pub fn to_gpu(&self) -> GpuGeometry {
        match self {
            Geometry::Sphere(sphere) => sphere.to_gpu(),
            Geometry::Triangle(triangle) => triangle.to_gpu(),
        }
    }
}

impl From<Sphere> for Geometry {
    fn from(sphere: Sphere) -> Geometry {
        Geometry::Sphere(sphere)
    }
}

impl From<Triangle> for Geometry {
    fn from(triangle: Triangle) -> Geometry {
        Geometry::Triangle(triangle)
    }
}

impl Bounded for Geometry {
    fn aabb(&self) -> Aabb {
        match self {
            Geometry::Sphere(sphere) => sphere.aabb(),
            Geometry::Triangle(triangle) => triangle.aabb(),
        }
    }
}

impl Hittable for Geometry {
    fn is_hit_by(&self, ray: &Ray) -> bool {
        match self {
            Geometry::Sphere(sphere) => sphere.is_hit_by(ray),
            Geometry::Triangle(triangle) => triangle.is_hit_by(ray),
        }
    }

    fn intersection(
        &self,
        ray: &Ray,
        min_distance: Real,
        max_distance: Real,
    ) -> Option<RayGeometryIntersection> {
        match self {
            Geometry::Sphere(sphere) => sphere.intersection(ray, min_distance, max_distance),
            Geometry::Triangle(triangle) => triangle.intersection(ray, min_distance, max_distance),
        }
    }
}

impl Linearize for Geometry {
    const LINEAR_SIZE: usize = GEOMETRY_RECORD_SIZE;

    fn linearize_into(&self, buffer: &mut Vec<u8>) {
        write_record(buffer, &self.to_gpu());
    }

    fn linearize_empty_into(buffer: &mut Vec<u8>) {
        write_record(buffer, &GpuGeometry::EMPTY);
    }
}

#[cfg(test)]
mod tests {
    use crate::geometry::{Geometry, RayGeometryIntersection, Sphere, Triangle};
    use crate::linear::{Linearize, GEOMETRY_RECORD_SIZE};
    use crate::testbase::read_f32s;
    use crate::{Matrix4, Point3, Vector3};
    use float_eq::assert_float_eq;

    fn hit_at(distance: f32) -> RayGeometryIntersection {
        RayGeometryIntersection::new(Point3::origin(), distance, Vector3::z())
    }

    #[test]
    fn test_closest_prefers_smaller_distance() {
        let closest = RayGeometryIntersection::closest(Some(hit_at(2.0)), Some(hit_at(1.0)));
        assert_eq!(closest.map(|hit| hit.distance), Some(1.0));
    }

    #[test]
    fn test_closest_accepts_one_sided_hits() {
        assert_eq!(
            RayGeometryIntersection::closest(None, Some(hit_at(3.0))).map(|hit| hit.distance),
            Some(3.0)
        );
        assert_eq!(
            RayGeometryIntersection::closest(Some(hit_at(4.0)), None).map(|hit| hit.distance),
            Some(4.0)
        );
        assert!(RayGeometryIntersection::closest(None, None).is_none());
    }

    #[test]
    fn test_to_parent_space_with_scaling() {
        let placement = Matrix4::new_nonuniform_scaling(&Vector3::new(2.0, 1.0, 1.0));
        let transform = placement.try_inverse().unwrap();
        let local = RayGeometryIntersection::new(
            Point3::new(1.0, 1.0, 0.0),
            5.0,
            Vector3::new(1.0, 1.0, 0.0).normalize(),
        );

        let parent = local.to_parent_space(&placement, &transform);
        assert_eq!(parent.point, Point3::new(2.0, 1.0, 0.0));
        assert_eq!(parent.distance, 5.0);
        // The surface x = 2y in parent space has normal (1, 2, 0) / sqrt(5).
        assert_float_eq!(parent.normal.norm(), 1.0, abs <= 1e-5);
        assert_float_eq!(parent.normal.y, 2.0 * parent.normal.x, abs <= 1e-5);
    }

    #[test]
    fn test_geometry_dispatches_records() {
        let sphere: Geometry = Sphere::new(Point3::new(1.0, 2.0, 3.0), 4.0).into();
        let triangle: Geometry = Triangle::new(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        )
        .into();

        let sphere_record = sphere.linearize();
        assert_eq!(sphere_record.len(), GEOMETRY_RECORD_SIZE);
        let floats = read_f32s(&sphere_record);
        assert_eq!(&floats[..8], &[0.0, 0.0, 0.0, 0.0, 1.0, 2.0, 3.0, 4.0]);

        let triangle_record = triangle.linearize();
        let floats = read_f32s(&triangle_record);
        assert_eq!(&floats[..4], &[0.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_empty_geometry_record() {
        let mut buffer = Vec::new();
        Geometry::linearize_empty_into(&mut buffer);
        assert_eq!(buffer.len(), Geometry::LINEAR_SIZE);
        let floats = read_f32s(&buffer);
        assert!(floats.iter().all(|x| x.is_nan()));
    }
}
