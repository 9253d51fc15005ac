//! This module defines [`GeometryCollection`], a small group of primitives stored in one
//! tree leaf.
//!
//! [`GeometryCollection`]: struct.GeometryCollection.html
//!

use crate::aabb::{Aabb, Bounded};
use crate::bounding_hierarchy::Hittable;
use crate::collection::Collection;
use crate::error::BvhError;
use crate::geometry::{Geometry, RayGeometryIntersection};
use crate::linear::{Linearize, GEOMETRY_RECORD_SIZE};
use crate::ray::Ray;
use crate::Real;

/// A [`GeometryCollection`] holds up to `2^GEOMETRY_COLLECTION_DEPTH` primitives.
///
/// [`GeometryCollection`]: struct.GeometryCollection.html
///
pub const GEOMETRY_COLLECTION_DEPTH: usize = 3;

/// Up to eight primitives sharing one leaf, with the union of their boxes cached.
///
/// # Examples
/// ```
/// use linear_bvh::aabb::Bounded;
/// use linear_bvh::geometry::{GeometryCollection, Sphere};
/// use linear_bvh::Point3;
///
/// let mut group = GeometryCollection::new();
/// group.push(Sphere::new(Point3::new(0.0, 0.0, 0.0), 1.0).into());
/// group.push(Sphere::new(Point3::new(3.0, 0.0, 0.0), 1.0).into());
///
/// assert_eq!(group.len(), 2);
/// assert_eq!(group.aabb().max(), Point3::new(4.0, 1.0, 1.0));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeometryCollection {
    geometries: Collection<Geometry, GEOMETRY_COLLECTION_DEPTH>,
    aabb: Option<Aabb>,
}

impl GeometryCollection {
    /// Maximum number of primitives.
    pub const CAPACITY: usize = Collection::<Geometry, GEOMETRY_COLLECTION_DEPTH>::CAPACITY;

    /// Creates an empty [`GeometryCollection`].
    ///
    /// [`GeometryCollection`]: struct.GeometryCollection.html
    ///
    pub fn new() -> GeometryCollection {
        GeometryCollection::default()
    }

    /// Appends `geometry` and returns its index.
    ///
    /// # Panics
    /// Panics if the collection is full.
    pub fn push(&mut self, geometry: Geometry) -> usize {
        match self.try_push(geometry) {
            Ok(index) => index,
            Err(err) => panic!("Tried to push into a full geometry collection: {}", err),
        }
    }

    /// Appends `geometry` and returns its index, or [`BvhError::CapacityExceeded`].
    pub fn try_push(&mut self, geometry: Geometry) -> Result<usize, BvhError> {
        let geometry_aabb = geometry.aabb();
        let index = self.geometries.try_push(geometry)?;
        self.aabb = Some(match self.aabb {
            Some(aabb) => aabb.join(&geometry_aabb),
            None => geometry_aabb,
        });
        Ok(index)
    }

    /// Number of primitives.
    pub fn len(&self) -> usize {
        self.geometries.len()
    }

    /// Returns true if no primitive was pushed.
    pub fn is_empty(&self) -> bool {
        self.geometries.is_empty()
    }

    /// Returns the primitive at `index`.
    pub fn get(&self, index: usize) -> Option<&Geometry> {
        self.geometries.get(index)
    }

    /// Iterates the primitives in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Geometry> {
        self.geometries.iter()
    }
}

impl FromIterator<Geometry> for GeometryCollection {
    /// # Panics
    /// Panics if the iterator yields more than [`GeometryCollection::CAPACITY`] items.
    fn from_iter<I: IntoIterator<Item = Geometry>>(iter: I) -> GeometryCollection {
        let mut collection = GeometryCollection::new();
        for geometry in iter {
            collection.push(geometry);
        }
        collection
    }
}

impl Bounded for GeometryCollection {
    /// The union of all member boxes. An empty collection yields [`Aabb::empty`].
    fn aabb(&self) -> Aabb {
        self.aabb.unwrap_or_else(Aabb::empty)
    }
}

impl Hittable for GeometryCollection {
    fn is_hit_by(&self, ray: &Ray) -> bool {
        self.iter().any(|geometry| geometry.is_hit_by(ray))
    }

    fn intersection(
        &self,
        ray: &Ray,
        min_distance: Real,
        max_distance: Real,
    ) -> Option<RayGeometryIntersection> {
        self.iter().fold(None, |closest, geometry| {
            RayGeometryIntersection::closest(
                closest,
                geometry.intersection(ray, min_distance, max_distance),
            )
        })
    }
}

impl Linearize for GeometryCollection {
    const LINEAR_SIZE: usize = GeometryCollection::CAPACITY * GEOMETRY_RECORD_SIZE;

    fn linearize_into(&self, buffer: &mut Vec<u8>) {
        for geometry in self.iter() {
            geometry.linearize_into(buffer);
        }
        for _ in self.len()..GeometryCollection::CAPACITY {
            Geometry::linearize_empty_into(buffer);
        }
    }

    fn linearize_empty_into(buffer: &mut Vec<u8>) {
        for _ in 0..GeometryCollection::CAPACITY {
            Geometry::linearize_empty_into(buffer);
        }
    }
}
