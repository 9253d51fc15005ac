use crate::{Matrix4, Point3, Real, Vector3};
use std::fmt;

/// Aabb struct.
///
/// The box is stored as its minimum corner plus one non-negative extent per axis:
/// `length` along x, `depth` along y and `width` along z. A box with any extent equal to
/// zero is degenerate and is never hit by a ray.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Aabb {
    /// Minimum corner.
    pub position: Point3,

    /// Extent along the x axis.
    pub length: Real,

    /// Extent along the y axis.
    pub depth: Real,

    /// Extent along the z axis.
    pub width: Real,
}

impl Aabb {
    /// Creates a new [`Aabb`] from its minimum corner and its three extents.
    ///
    /// # Examples
    /// ```
    /// use linear_bvh::aabb::Aabb;
    /// use linear_bvh::Point3;
    ///
    /// let aabb = Aabb::new(Point3::new(-1.0, 0.0, 0.0), 2.0, 1.0, 3.0);
    /// assert_eq!(aabb.max(), Point3::new(1.0, 1.0, 3.0));
    /// assert_eq!(aabb.volume(), 6.0);
    /// ```
    ///
    /// [`Aabb`]: struct.Aabb.html
    ///
    pub fn new(position: Point3, length: Real, depth: Real, width: Real) -> Aabb {
        debug_assert!(
            !(length < 0.0 || depth < 0.0 || width < 0.0),
            "Aabb extents must not be negative"
        );
        Aabb {
            position,
            length,
            depth,
            width,
        }
    }

    /// Creates a new [`Aabb`] spanning from `min` to `max`.
    ///
    /// [`Aabb`]: struct.Aabb.html
    ///
    pub fn with_bounds(min: Point3, max: Point3) -> Aabb {
        let extents = max - min;
        Aabb::new(min, extents.x, extents.y, extents.z)
    }

    /// Creates the empty [`Aabb`]: a degenerate box at the origin.
    ///
    /// [`Aabb`]: struct.Aabb.html
    ///
    pub fn empty() -> Aabb {
        Aabb::new(Point3::origin(), 0.0, 0.0, 0.0)
    }

    /// Returns the union of `a` and `b`.
    ///
    /// Degenerate inputs are not skipped: the result always encloses both boxes,
    /// including an empty box sitting at the origin.
    ///
    /// # Examples
    /// ```
    /// use linear_bvh::aabb::Aabb;
    /// use linear_bvh::Point3;
    ///
    /// let a = Aabb::new(Point3::new(0.0, 0.0, 0.0), 1.0, 1.0, 1.0);
    /// let b = Aabb::new(Point3::new(2.0, -1.0, 0.0), 1.0, 1.0, 1.0);
    /// let union = Aabb::from_two_boxes(&a, &b);
    ///
    /// assert_eq!(union.position, Point3::new(0.0, -1.0, 0.0));
    /// assert_eq!(union.max(), Point3::new(3.0, 1.0, 1.0));
    /// ```
    pub fn from_two_boxes(a: &Aabb, b: &Aabb) -> Aabb {
        let min = a.position.coords.inf(&b.position.coords);
        let max = a.max().coords.sup(&b.max().coords);
        Aabb::with_bounds(Point3::from(min), Point3::from(max))
    }

    /// Transforms every point by `transform` and returns the tightest box around the
    /// results.
    ///
    /// `points` should not be empty; an empty slice yields [`Aabb::empty`].
    pub fn from_vertices(points: &[Point3], transform: &Matrix4) -> Aabb {
        let mut transformed = points.iter().map(|p| transform.transform_point(p));
        let first = match transformed.next() {
            Some(point) => point.coords,
            None => return Aabb::empty(),
        };
        let (min, max) = transformed.fold((first, first), |(min, max), point| {
            (min.inf(&point.coords), max.sup(&point.coords))
        });
        Aabb::with_bounds(Point3::from(min), Point3::from(max))
    }

    /// Returns the tightest box around `points`.
    pub fn from_points(points: &[Point3]) -> Aabb {
        Aabb::from_vertices(points, &Matrix4::identity())
    }

    /// Returns a new minimal [`Aabb`] which contains both this [`Aabb`] and `other`.
    ///
    /// [`Aabb`]: struct.Aabb.html
    ///
    pub fn join(&self, other: &Aabb) -> Aabb {
        Aabb::from_two_boxes(self, other)
    }

    /// Returns a new minimal [`Aabb`] which contains this [`Aabb`] and `point`.
    ///
    /// [`Aabb`]: struct.Aabb.html
    ///
    pub fn grow(&self, point: &Point3) -> Aabb {
        let min = self.position.coords.inf(&point.coords);
        let max = self.max().coords.sup(&point.coords);
        Aabb::with_bounds(Point3::from(min), Point3::from(max))
    }

    /// Returns the box enclosing all eight corners of this box after `transform`.
    pub fn transformed(&self, transform: &Matrix4) -> Aabb {
        Aabb::from_vertices(&self.corners(), transform)
    }

    /// Returns the eight corners of the box.
    pub fn corners(&self) -> [Point3; 8] {
        let min = self.position;
        let max = self.max();
        [
            Point3::new(min.x, min.y, min.z),
            Point3::new(max.x, min.y, min.z),
            Point3::new(min.x, max.y, min.z),
            Point3::new(max.x, max.y, min.z),
            Point3::new(min.x, min.y, max.z),
            Point3::new(max.x, min.y, max.z),
            Point3::new(min.x, max.y, max.z),
            Point3::new(max.x, max.y, max.z),
        ]
    }

    /// Returns the extents as a vector `(length, depth, width)`.
    pub fn extents(&self) -> Vector3 {
        Vector3::new(self.length, self.depth, self.width)
    }

    /// Returns the maximum corner.
    pub fn max(&self) -> Point3 {
        self.position + self.extents()
    }

    /// Returns the center point of the [`Aabb`].
    ///
    /// [`Aabb`]: struct.Aabb.html
    ///
    pub fn center(&self) -> Point3 {
        self.position + self.extents() / 2.0
    }

    pub fn volume(&self) -> Real {
        self.length * self.depth * self.width
    }

    /// Returns the total surface area of this [`Aabb`].
    ///
    /// [`Aabb`]: struct.Aabb.html
    ///
    pub fn surface_area(&self) -> Real {
        2.0 * (self.length * self.depth + self.depth * self.width + self.length * self.width)
    }

    /// Returns the share of `container`'s surface area that `contained` accounts for.
    ///
    /// The value is only meaningful when comparing two candidates against the same
    /// container. A degenerate container yields an infinite or NaN score.
    pub fn surface_area_ratio(container: &Aabb, contained: &Aabb) -> Real {
        contained.surface_area() / container.surface_area()
    }

    /// Returns true if any extent is zero (or NaN).
    pub fn is_degenerate(&self) -> bool {
        !(self.length > 0.0 && self.depth > 0.0 && self.width > 0.0)
    }

    /// Returns true if the [`Point3`] is inside the [`Aabb`], bounds included.
    ///
    /// # Examples
    /// ```
    /// use linear_bvh::aabb::Aabb;
    /// use linear_bvh::Point3;
    ///
    /// let aabb = Aabb::new(Point3::new(-1.0, -1.0, -1.0), 2.0, 2.0, 2.0);
    /// assert!(aabb.contains(&Point3::new(1.0, 0.5, -1.0)));
    /// assert!(!aabb.contains(&Point3::new(1.5, 0.5, -1.0)));
    /// ```
    ///
    /// [`Aabb`]: struct.Aabb.html
    /// [`Point3`]: ../type.Point3.html
    ///
    pub fn contains(&self, p: &Point3) -> bool {
        let max = self.max();
        p.x >= self.position.x
            && p.x <= max.x
            && p.y >= self.position.y
            && p.y <= max.y
            && p.z >= self.position.z
            && p.z <= max.z
    }

    /// Returns true if `other` lies entirely inside this box.
    pub fn contains_aabb(&self, other: &Aabb) -> bool {
        self.contains(&other.position) && self.contains(&other.max())
    }

    /// Returns true if the [`Point3`] is approximately inside the [`Aabb`]
    /// with respect to some `epsilon`.
    ///
    /// [`Aabb`]: struct.Aabb.html
    /// [`Point3`]: ../type.Point3.html
    ///
    pub fn approx_contains_eps(&self, p: &Point3, epsilon: Real) -> bool {
        let max = self.max();
        (p.x - self.position.x) > -epsilon
            && (p.x - max.x) < epsilon
            && (p.y - self.position.y) > -epsilon
            && (p.y - max.y) < epsilon
            && (p.z - self.position.z) > -epsilon
            && (p.z - max.z) < epsilon
    }

    /// Returns true if `other` is approximately inside this [`Aabb`]
    /// with respect to some `epsilon`.
    ///
    /// [`Aabb`]: struct.Aabb.html
    ///
    pub fn approx_contains_aabb_eps(&self, other: &Aabb, epsilon: Real) -> bool {
        self.approx_contains_eps(&other.position, epsilon)
            && self.approx_contains_eps(&other.max(), epsilon)
    }

    /// Returns true if both corners of the two boxes are within `epsilon` of each other.
    pub fn relative_eq(&self, other: &Aabb, epsilon: Real) -> bool {
        (self.position - other.position).amax() < epsilon
            && (self.max() - other.max()).amax() < epsilon
    }
}

impl Default for Aabb {
    fn default() -> Aabb {
        Aabb::empty()
    }
}

impl fmt::Display for Aabb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let max = self.max();
        write!(
            f,
            "Min bound: ({}, {}, {}); Max bound: ({}, {}, {})",
            self.position.x, self.position.y, self.position.z, max.x, max.y, max.z
        )
    }
}
