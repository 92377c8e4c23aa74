//! Bounding volume hierarchy construction.
//!
//! The builder works on one flat buffer of primitives (triangle, box,
//! centroid). Each recursion level receives an exclusive `&mut` sub-slice,
//! partitions it around the median centroid of the longest box axis, and
//! splits the slice in two for the children. Leaves therefore own contiguous
//! runs of the buffer, and the final buffer order becomes the mesh's packed
//! index order.

use std::cmp::Ordering;

use crate::bbox::BBox;
use crate::error::{MeshError, Result};
use crate::node::Node;

/// Default maximum number of triangles per leaf.
pub const DEFAULT_LEAF_SIZE: usize = 16;
/// Default range length from which subtrees are built in parallel.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 4096;

/// Build parameters for [`Mesh::pack_with`](crate::Mesh::pack_with).
///
/// # Example
/// ```
/// use meshpack::PackConfig;
///
/// let config = PackConfig::new(8).with_parallel_threshold(100_000);
/// assert_eq!(config.leaf_size(), 8);
/// assert!(config.validate().is_ok());
/// assert!(PackConfig::new(0).validate().is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PackConfig {
    leaf_size: usize,
    parallel_threshold: usize,
}

impl PackConfig {
    /// Configuration with the given leaf size and default parallelism.
    pub fn new(leaf_size: usize) -> Self {
        Self { leaf_size, parallel_threshold: DEFAULT_PARALLEL_THRESHOLD }
    }

    /// Sets the maximum number of triangles per leaf.
    #[must_use]
    pub fn with_leaf_size(mut self, leaf_size: usize) -> Self {
        self.leaf_size = leaf_size;
        self
    }

    /// Sets the range length from which the two subtrees are built on the
    /// rayon pool. Has no effect without the `rayon` feature.
    #[must_use]
    pub fn with_parallel_threshold(mut self, parallel_threshold: usize) -> Self {
        self.parallel_threshold = parallel_threshold;
        self
    }

    /// Maximum number of triangles per leaf.
    pub fn leaf_size(&self) -> usize {
        self.leaf_size
    }

    /// Range length from which subtrees are built in parallel.
    pub fn parallel_threshold(&self) -> usize {
        self.parallel_threshold
    }

    /// Checks the parameters.
    ///
    /// # Errors
    /// [`MeshError::InvalidParameter`] if the leaf size is zero.
    pub fn validate(&self) -> Result<()> {
        if self.leaf_size == 0 {
            return Err(MeshError::InvalidParameter { name: "leaf_size", value: self.leaf_size });
        }
        Ok(())
    }
}

impl Default for PackConfig {
    fn default() -> Self {
        Self::new(DEFAULT_LEAF_SIZE)
    }
}

/// A triangle together with its cached box and centroid.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Primitive<const D: usize> {
    pub(crate) triangle: [u32; 3],
    bbox: BBox<D>,
    centroid: [f64; D],
}

impl<const D: usize> Primitive<D> {
    pub(crate) fn new(vertices: &[[f64; D]], triangle: [u32; 3]) -> Self {
        let corners = triangle.map(|i| vertices[i as usize]);
        let mut bbox = BBox::from_point(corners[0]);
        bbox.expand(corners[1]);
        bbox.expand(corners[2]);
        let centroid = std::array::from_fn(|i| (corners[0][i] + corners[1][i] + corners[2][i]) / 3.0);
        Self { triangle, bbox, centroid }
    }
}

/// Builds the hierarchy over `primitives`, reordering them in place.
///
/// `offset` is the position of `primitives[0]` in the full buffer, so node
/// ranges are absolute. The config must already be validated.
pub(crate) fn build<const D: usize>(
    primitives: &mut [Primitive<D>],
    offset: usize,
    config: &PackConfig,
) -> Node<D> {
    let len = primitives.len();

    let mut bbox = BBox::empty();
    for p in primitives.iter() {
        bbox = bbox.union(&p.bbox);
    }

    if len <= config.leaf_size {
        return Node::leaf(bbox, offset, offset + len);
    }

    let axis = bbox.longest_axis();
    let mid = len / 2;
    partition_at_median(primitives, axis, mid, offset);

    let (left, right) = primitives.split_at_mut(mid);
    let (left, right) = build_children(left, right, offset, offset + mid, config);
    Node::internal(left, right)
}

#[cfg(feature = "rayon")]
fn build_children<const D: usize>(
    left: &mut [Primitive<D>],
    right: &mut [Primitive<D>],
    left_offset: usize,
    right_offset: usize,
    config: &PackConfig,
) -> (Node<D>, Node<D>) {
    if left.len() + right.len() >= config.parallel_threshold {
        rayon::join(
            || build(left, left_offset, config),
            || build(right, right_offset, config),
        )
    } else {
        (build(left, left_offset, config), build(right, right_offset, config))
    }
}

#[cfg(not(feature = "rayon"))]
fn build_children<const D: usize>(
    left: &mut [Primitive<D>],
    right: &mut [Primitive<D>],
    left_offset: usize,
    right_offset: usize,
    config: &PackConfig,
) -> (Node<D>, Node<D>) {
    (build(left, left_offset, config), build(right, right_offset, config))
}

/// Reorders `primitives` so that `[..mid]` has centroids `<=` every centroid
/// in `[mid..]` along `axis`.
///
/// Nothing moves when all centroids coincide on the axis (the midpoint split
/// is taken as is) or when the slice is already partitioned at `mid`, which is
/// what a previous pack leaves behind.
fn partition_at_median<const D: usize>(
    primitives: &mut [Primitive<D>],
    axis: usize,
    mid: usize,
    offset: usize,
) {
    let key = |p: &Primitive<D>| p.centroid[axis];

    let (lo, hi) = primitives
        .iter()
        .map(key)
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), c| (lo.min(c), hi.max(c)));
    if lo == hi {
        log::trace!(
            "centroids coincide on axis {axis} for range {}..{}, splitting at midpoint",
            offset,
            offset + primitives.len()
        );
        return;
    }

    let left_max = primitives[..mid].iter().map(key).fold(f64::NEG_INFINITY, f64::max);
    let right_min = primitives[mid..].iter().map(key).fold(f64::INFINITY, f64::min);
    if left_max <= right_min {
        log::trace!("range {}..{} already partitioned on axis {axis}", offset, offset + primitives.len());
        return;
    }

    let _ = primitives.select_nth_unstable_by(mid, |a, b| compare(key(a), key(b)));
}

fn compare(a: f64, b: f64) -> Ordering {
    a.total_cmp(&b)
}
