//! Axis-aligned bounding boxes in `D` dimensions.

/// Axis-aligned bounding box: `min` and `max` corner per axis.
///
/// A box built from points always satisfies `min[i] <= max[i]`. Zero-extent
/// boxes (a single point, a segment) are legal. [`BBox::empty`] is the one
/// exception: it has `min = +inf` and `max = -inf` so it acts as the identity
/// for [`BBox::union`].
///
/// # Example
/// ```
/// use meshpack::BBox;
///
/// let a = BBox::new([0.0, 0.0], [1.0, 1.0]);
/// let b = BBox::new([2.0, -1.0], [3.0, 0.5]);
/// let u = a.union(&b);
/// assert_eq!(u, BBox::new([0.0, -1.0], [3.0, 1.0]));
/// assert_eq!(BBox::empty().union(&a), a);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BBox<const D: usize> {
    /// Lower corner.
    pub min: [f64; D],
    /// Upper corner.
    pub max: [f64; D],
}

/// Two-dimensional bounding box.
pub type BBox2 = BBox<2>;
/// Three-dimensional bounding box.
pub type BBox3 = BBox<3>;

impl<const D: usize> BBox<D> {
    /// Creates a box from its corners.
    pub fn new(min: [f64; D], max: [f64; D]) -> Self {
        Self { min, max }
    }

    /// The empty box, identity element of [`BBox::union`].
    pub fn empty() -> Self {
        Self { min: [f64::INFINITY; D], max: [f64::NEG_INFINITY; D] }
    }

    /// Degenerate box covering a single point.
    pub fn from_point(point: [f64; D]) -> Self {
        Self { min: point, max: point }
    }

    /// Tight box over a sequence of points, `None` if the sequence is empty.
    ///
    /// # Example
    /// ```
    /// use meshpack::BBox;
    ///
    /// let b = BBox::from_points([[1.0, 4.0], [-2.0, 0.5], [0.0, 2.0]]).unwrap();
    /// assert_eq!(b.min, [-2.0, 0.5]);
    /// assert_eq!(b.max, [1.0, 4.0]);
    /// assert!(BBox::<2>::from_points([]).is_none());
    /// ```
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = [f64; D]>,
    {
        let mut points = points.into_iter();
        let mut result = Self::from_point(points.next()?);
        for p in points {
            result.expand(p);
        }
        Some(result)
    }

    /// Componentwise min of mins and max of maxes.
    #[inline]
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        let mut result = *self;
        for i in 0..D {
            result.min[i] = result.min[i].min(other.min[i]);
            result.max[i] = result.max[i].max(other.max[i]);
        }
        result
    }

    /// Grows the box to include `point`.
    #[inline]
    pub fn expand(&mut self, point: [f64; D]) {
        for (i, &v) in point.iter().enumerate() {
            self.min[i] = self.min[i].min(v);
            self.max[i] = self.max[i].max(v);
        }
    }

    /// True for a box that covers no point at all (such as [`BBox::empty`]).
    pub fn is_empty(&self) -> bool {
        (0..D).any(|i| self.min[i] > self.max[i])
    }

    /// Inclusive point containment.
    #[inline]
    pub fn contains_point(&self, point: &[f64; D]) -> bool {
        (0..D).all(|i| self.min[i] <= point[i] && point[i] <= self.max[i])
    }

    /// True if `other` lies entirely inside this box (edges may touch).
    #[inline]
    pub fn contains(&self, other: &Self) -> bool {
        (0..D).all(|i| self.min[i] <= other.min[i] && other.max[i] <= self.max[i])
    }

    /// Inclusive overlap test; boxes sharing an edge or corner intersect.
    #[inline]
    pub fn intersects(&self, other: &Self) -> bool {
        (0..D).all(|i| self.min[i] <= other.max[i] && other.min[i] <= self.max[i])
    }

    /// Length of the box along `axis`.
    #[inline]
    pub fn extent(&self, axis: usize) -> f64 {
        self.max[axis] - self.min[axis]
    }

    /// Axis of greatest extent; ties go to the lowest axis index.
    pub fn longest_axis(&self) -> usize {
        let mut best = 0;
        for axis in 1..D {
            if self.extent(axis) > self.extent(best) {
                best = axis;
            }
        }
        best
    }

    /// Center point of the box.
    pub fn center(&self) -> [f64; D] {
        std::array::from_fn(|i| (self.min[i] + self.max[i]) * 0.5)
    }

    /// Squared Euclidean distance from `point` to the box, 0 inside it.
    #[inline]
    pub fn distance_squared(&self, point: &[f64; D]) -> f64 {
        let mut sum = 0.0;
        for (i, &v) in point.iter().enumerate() {
            let d = if v < self.min[i] {
                self.min[i] - v
            } else if v > self.max[i] {
                v - self.max[i]
            } else {
                0.0
            };
            sum += d * d;
        }
        sum
    }
}

impl<const D: usize> Default for BBox<D> {
    fn default() -> Self {
        Self::empty()
    }
}
