//! This module holds the [`Ray`] definition.
//!
//! Ray/box tests live with [`Aabb`], ray/shape tests with the shapes in [`geometry`].
//!
//! [`Aabb`]: ../aabb/struct.Aabb.html
//! [`geometry`]: ../geometry/index.html
mod ray_impl;

pub use self::ray_impl::*;
