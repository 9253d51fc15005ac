//! A crate which exports rays, axis-aligned bounding boxes, geometry primitives and a
//! fixed-capacity linear bounding volume hierarchy.
//!
//! ## About
//!
//! The central type is [`BvhLinearTree`], a binary tree of [`Aabb`]s which lives inside a
//! fixed array of `2·2^N - 1` node slots. Leaves are inserted one at a time and placed
//! using a surface area heuristic, every insertion refits the bounding boxes along its
//! path, and the whole tree can be written into a flat, std430-compatible byte buffer
//! for a GPU shader to traverse.
//!
//! The same generic tree is used twice: a [`Blas`] groups [`GeometryCollection`]s of one
//! object, and a [`Tlas`] groups [`Blas`] instances, each carrying its own transform.
//!
//! ## Example
//!
//! ```
//! use linear_bvh::geometry::{Geometry, GeometryCollection, Sphere};
//! use linear_bvh::linear::Linearize;
//! use linear_bvh::ray::Ray;
//! use linear_bvh::{Blas, Point3, Vector3};
//!
//! let mut group = GeometryCollection::new();
//! group.push(Geometry::Sphere(Sphere::new(Point3::new(0.0, 0.0, -1.0), 0.5)));
//!
//! let mut blas = Blas::new();
//! blas.insert(group);
//!
//! let ray = Ray::new(Point3::origin(), Vector3::new(0.0, 0.0, -1.0));
//! let hit = blas.intersection(&ray, 0.001, 1000.0).expect("the sphere is in front");
//! assert!((hit.distance - 0.5).abs() < 1e-5);
//!
//! let buffer = blas.linearize();
//! assert_eq!(buffer.len(), Blas::LINEAR_SIZE);
//! ```
//!
//! ## Features
//!
//! - `rayon` (default **enabled**) - runs [`BvhLinearTree::intersect_batch`] in parallel
//! - `serde` (default **disabled**) - adds `Serialize` and `Deserialize` implementations for
//!   the value types
//!

/// Float type used by this crate.
pub type Real = f32;

/// Point math type used by this crate. Type alias for [`nalgebra::Point3`].
pub type Point3 = nalgebra::Point3<Real>;

/// Vector math type used by this crate. Type alias for [`nalgebra::Vector3`].
pub type Vector3 = nalgebra::Vector3<Real>;

/// Matrix math type used by this crate. Type alias for [`nalgebra::Matrix4`].
pub type Matrix4 = nalgebra::Matrix4<Real>;

/// A minimal floating value used as a lower bound.
pub const EPSILON: Real = 0.00001;

pub mod aabb;
pub mod bounding_hierarchy;
pub mod bvh;
pub mod collection;
pub mod error;
pub mod geometry;
pub mod linear;
pub mod ray;
mod utils;

#[cfg(test)]
mod testbase;

pub use crate::aabb::{Aabb, Bounded};
pub use crate::bounding_hierarchy::{BHContent, Hittable};
pub use crate::bvh::{Blas, BvhLinearTree, Tlas, BLAS_DEPTH, TLAS_DEPTH};
pub use crate::collection::Collection;
pub use crate::error::BvhError;
pub use crate::geometry::{Geometry, GeometryCollection, RayGeometryIntersection};
pub use crate::linear::Linearize;
pub use crate::ray::Ray;
