//! This module defines [`BvhLinearTree`] and its two instantiations, [`Blas`] and [`Tlas`].
//!
//! [`BvhLinearTree`]: struct.BvhLinearTree.html
//! [`Blas`]: type.Blas.html
//! [`Tlas`]: type.Tlas.html
//!

mod bvh_impl;
mod bvh_node;
mod linearize;
mod query;

pub use self::bvh_impl::*;
pub use self::bvh_node::*;

use crate::geometry::GeometryCollection;

/// Depth of a [`Blas`]: it holds up to `2^BLAS_DEPTH` geometry collections.
pub const BLAS_DEPTH: usize = 3;

/// Depth of a [`Tlas`]: it holds up to `2^TLAS_DEPTH` [`Blas`] instances.
pub const TLAS_DEPTH: usize = 4;

/// Bottom level acceleration structure: the geometry of one object in its model space.
pub type Blas = BvhLinearTree<GeometryCollection, BLAS_DEPTH>;

/// Top level acceleration structure: placed [`Blas`] instances in world space.
pub type Tlas = BvhLinearTree<Blas, TLAS_DEPTH>;
