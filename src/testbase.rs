//! Common utilities shared by unit tests.
#![cfg(test)]

use std::collections::HashSet;

use crate::{Point3, Vector3};
use proptest::prelude::*;

use crate::aabb::{Aabb, Bounded};
use crate::bounding_hierarchy::Hittable;
use crate::bvh::{Blas, BvhLinearTree};
use crate::geometry::{Geometry, GeometryCollection, RayGeometryIntersection, Sphere};
use crate::linear::{write_record, Linearize};
use crate::ray::Ray;
use crate::Real;

/// A vector represented as a tuple
pub type TupleVec = (f32, f32, f32);

/// Generate a `TupleVec` for [`proptest::strategy::Strategy`] from -10e10 to 10e10
/// A small enough range to prevent most fp32 errors from breaking certain tests
/// Tests which rely on this strategy should probably be rewritten
pub fn tuplevec_small_strategy() -> impl Strategy<Value = TupleVec> {
    (
        -10e10_f32..10e10_f32,
        -10e10_f32..10e10_f32,
        -10e10_f32..10e10_f32,
    )
}

/// Generate a `TupleVec` for [`proptest::strategy::Strategy`] from -10e2 to 10e2
/// Unit sized boxes and products of coordinates stay exact enough in this range.
pub fn tuplevec_medium_strategy() -> impl Strategy<Value = TupleVec> {
    (
        -10e2_f32..10e2_f32,
        -10e2_f32..10e2_f32,
        -10e2_f32..10e2_f32,
    )
}

/// Convert a `TupleVec` to a [`Point3`].
pub fn tuple_to_point(tpl: &TupleVec) -> Point3 {
    Point3::new(tpl.0, tpl.1, tpl.2)
}

/// Reads a linearized buffer back as floats.
pub fn read_f32s(bytes: &[u8]) -> Vec<f32> {
    bytes.chunks_exact(4).map(bytemuck::pod_read_unaligned).collect()
}

/// Reads a linearized buffer back as indices.
pub fn read_u32s(bytes: &[u8]) -> Vec<u32> {
    bytes.chunks_exact(4).map(bytemuck::pod_read_unaligned).collect()
}

/// Define some `Bounded` structure.
#[derive(Debug, Clone, PartialEq)]
pub struct UnitBox {
    pub id: i32,
    pub pos: Point3,
}

impl UnitBox {
    pub fn new(id: i32, pos: Point3) -> UnitBox {
        UnitBox { id, pos }
    }
}

/// `UnitBox`'s `Aabb`s are unit `Aabb`s centered on the box's position.
impl Bounded for UnitBox {
    fn aabb(&self) -> Aabb {
        let min = self.pos + Vector3::new(-0.5, -0.5, -0.5);
        let max = self.pos + Vector3::new(0.5, 0.5, 0.5);
        Aabb::with_bounds(min, max)
    }
}

/// A `UnitBox` is solid: a ray hits it where it enters its `Aabb`.
impl Hittable for UnitBox {
    fn is_hit_by(&self, ray: &Ray) -> bool {
        self.aabb().intersection_slice(ray).is_some()
    }

    fn intersection(
        &self,
        ray: &Ray,
        min_distance: Real,
        max_distance: Real,
    ) -> Option<RayGeometryIntersection> {
        let (entry, _) = self.aabb().intersection_slice(ray)?;
        if entry < min_distance || entry > max_distance {
            return None;
        }
        Some(RayGeometryIntersection::new(
            ray.at(entry),
            entry,
            -ray.direction.normalize(),
        ))
    }
}

/// One `vec4` per box: its id followed by its position.
impl Linearize for UnitBox {
    const LINEAR_SIZE: usize = 16;

    fn linearize_into(&self, buffer: &mut Vec<u8>) {
        write_record(
            buffer,
            &[self.id as f32, self.pos.x, self.pos.y, self.pos.z],
        );
    }

    fn linearize_empty_into(buffer: &mut Vec<u8>) {
        write_record(buffer, &[f32::NAN; 4]);
    }
}

/// Generate 21 `UnitBox`s along the X axis centered on whole numbers (-10,9,..,10).
/// The index is set to the rounded x-coordinate of the box center.
pub fn generate_aligned_boxes() -> Vec<UnitBox> {
    // Create 21 boxes along the x-axis
    let mut shapes = Vec::new();
    for x in -10..11 {
        shapes.push(UnitBox::new(x, Point3::new(x as f32, 0.0, 0.0)));
    }
    shapes
}

/// Creates a tree for a fixed scene structure.
pub fn build_some_tree() -> (Vec<UnitBox>, BvhLinearTree<UnitBox, 5>) {
    let boxes = generate_aligned_boxes();
    let mut tree = BvhLinearTree::new();
    for unit_box in boxes.iter().cloned() {
        tree.insert(unit_box);
    }
    (boxes, tree)
}

/// Given a ray, a tree and a list of expected hits, verifies whether the ray hits only
/// the expected boxes.
fn traverse_and_verify(
    ray_origin: Point3,
    ray_direction: Vector3,
    tree: &BvhLinearTree<UnitBox, 5>,
    expected_shapes: &HashSet<i32>,
) {
    let ray = Ray::new(ray_origin, ray_direction);
    let hit_shapes = tree.candidates(&ray);

    assert_eq!(expected_shapes.len(), hit_shapes.len());
    for shape in hit_shapes {
        assert!(expected_shapes.contains(&shape.id));
    }
}

/// Perform some fixed intersection tests on a tree.
pub fn traverse_some_tree() {
    let (_, tree) = build_some_tree();

    {
        // Define a ray which traverses the x-axis from afar.
        let origin = Point3::new(-1000.0, 0.0, 0.0);
        let direction = Vector3::new(1.0, 0.0, 0.0);
        let mut expected_shapes = HashSet::new();

        // It should hit everything.
        for id in -10..11 {
            expected_shapes.insert(id);
        }
        traverse_and_verify(origin, direction, &tree, &expected_shapes);
    }

    {
        // Define a ray which traverses the y-axis from afar.
        let origin = Point3::new(0.0, -1000.0, 0.0);
        let direction = Vector3::new(0.0, 1.0, 0.0);

        // It should hit only one box.
        let mut expected_shapes = HashSet::new();
        expected_shapes.insert(0);
        traverse_and_verify(origin, direction, &tree, &expected_shapes);
    }

    {
        // Define a ray which intersects the x-axis diagonally.
        let origin = Point3::new(6.0, 0.5, 0.0);
        let direction = Vector3::new(-2.0, -1.0, 0.0);

        // It should hit exactly three boxes.
        let mut expected_shapes = HashSet::new();
        expected_shapes.insert(4);
        expected_shapes.insert(5);
        expected_shapes.insert(6);
        traverse_and_verify(origin, direction, &tree, &expected_shapes);
    }
}

/// A group holding a single sphere.
pub fn sphere_group(center: Point3, radius: Real) -> GeometryCollection {
    let mut group = GeometryCollection::new();
    group.push(Geometry::Sphere(Sphere::new(center, radius)));
    group
}

/// A small sphere in front of the origin resting on a huge ground sphere.
pub fn two_sphere_blas() -> Blas {
    let mut blas = Blas::new();
    blas.insert(sphere_group(Point3::new(0.0, 0.0, -1.0), 0.5));
    blas.insert(sphere_group(Point3::new(0.0, -100.5, -1.0), 100.0));
    blas
}
