//! GPU-facing byte layout of trees and geometry.
//!
//! Everything here is written with std430 array rules in mind: every record is a
//! multiple of 16 bytes, floats are `f32`, indices are `u32` and matrices are
//! column-major. A buffer produced by [`Linearize::linearize`] can be uploaded as is.
//!
//! [`Linearize::linearize`]: trait.Linearize.html#method.linearize
//!

use crate::aabb::Aabb;
use crate::{Matrix4, Point3};
use bytemuck::{Pod, Zeroable};
use std::mem::size_of;

/// Size of a `mat4` in bytes.
pub const MATRIX_SIZE: usize = size_of::<[f32; 16]>();

/// Size of a [`GpuNode`] in bytes.
pub const NODE_RECORD_SIZE: usize = size_of::<GpuNode>();

/// Size of a [`GpuGeometry`] in bytes.
pub const GEOMETRY_RECORD_SIZE: usize = size_of::<GpuGeometry>();

/// One tree slot as the shader sees it.
///
/// Internal node: `left` and `right` are child slots.
/// Leaf: `left` is the content index and `right` is 0. The root never is a right
/// child, so `right == 0` identifies leaves.
/// Free slot: all zeros.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct GpuNode {
    /// Minimum corner, `w = 1`.
    pub position: [f32; 4],
    /// Extents along x, y, z, `w = 0`.
    pub extents: [f32; 4],
    pub left: u32,
    pub right: u32,
    pub _pad: [u32; 2],
}

impl GpuNode {
    /// The record of an unoccupied slot.
    pub const FREE: GpuNode = GpuNode {
        position: [0.0; 4],
        extents: [0.0; 4],
        left: 0,
        right: 0,
        _pad: [0; 2],
    };

    /// Record of an internal node with children in slots `left` and `right`.
    pub fn internal(aabb: &Aabb, left: usize, right: usize) -> GpuNode {
        GpuNode {
            position: point4(&aabb.position),
            extents: [aabb.length, aabb.depth, aabb.width, 0.0],
            left: left as u32,
            right: right as u32,
            _pad: [0; 2],
        }
    }

    /// Record of a leaf referring to content `content_index`.
    pub fn leaf(aabb: &Aabb, content_index: usize) -> GpuNode {
        GpuNode::internal(aabb, content_index, 0)
    }
}

/// One geometry record: a type tag followed by three payload `vec4`s.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct GpuGeometry {
    /// `(0, 0, 0, 0)` for a sphere, `(0, 0, 0, 1)` for a triangle.
    pub signature: [f32; 4],
    pub data: [[f32; 4]; 3],
}

impl GpuGeometry {
    /// Tag of a sphere record.
    pub const SPHERE: [f32; 4] = [0.0, 0.0, 0.0, 0.0];

    /// Tag of a triangle record.
    pub const TRIANGLE: [f32; 4] = [0.0, 0.0, 0.0, 1.0];

    /// Record of an unused geometry slot. Every component is NaN.
    pub const EMPTY: GpuGeometry = GpuGeometry {
        signature: [f32::NAN; 4],
        data: [[f32::NAN; 4]; 3],
    };
}

/// Converts a point to a homogeneous `vec4` with `w = 1`.
pub fn point4(point: &Point3) -> [f32; 4] {
    [point.x, point.y, point.z, 1.0]
}

/// Appends `matrix` in column-major order.
pub fn write_matrix(buffer: &mut Vec<u8>, matrix: &Matrix4) {
    buffer.extend_from_slice(bytemuck::cast_slice(matrix.as_slice()));
}

/// Appends the raw bytes of `record`.
pub fn write_record<T: Pod>(buffer: &mut Vec<u8>, record: &T) {
    buffer.extend_from_slice(bytemuck::bytes_of(record));
}

/// Types with a fixed-size byte representation for the GPU.
pub trait Linearize {
    /// Number of bytes written by [`Linearize::linearize_into`] and
    /// [`Linearize::linearize_empty_into`].
    const LINEAR_SIZE: usize;

    /// Appends the record of `self` to `buffer`.
    fn linearize_into(&self, buffer: &mut Vec<u8>);

    /// Appends the record of an unused slot to `buffer`.
    fn linearize_empty_into(buffer: &mut Vec<u8>);

    /// Returns the record of `self` in a fresh buffer.
    fn linearize(&self) -> Vec<u8> {
        let mut buffer = Vec::with_capacity(Self::LINEAR_SIZE);
        self.linearize_into(&mut buffer);
        buffer
    }
}
