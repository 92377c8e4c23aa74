//! Spatial queries over a packed mesh.
//!
//! Every query walks the hierarchy from the root and prunes subtrees whose
//! box cannot match. Results are positions in the packed index array, so
//! `mesh.indices()[pos]` is the matching triangle and `mesh.triangle(pos)`
//! its corner points. An unpacked mesh answers every query with nothing.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::bbox::BBox;
use crate::mesh::Mesh;
use crate::node::Node;

impl<const D: usize> Mesh<D> {
    /// Finds all triangles whose bounding box intersects `query`.
    ///
    /// Touching boxes count as intersecting. Useful for range search and for
    /// picking the triangles inside a viewport.
    ///
    /// # Arguments
    /// * `query` - Query box
    /// * `results` - Output vector; cleared, then filled with triangle positions
    ///
    /// # Example
    /// ```
    /// use meshpack::{BBox, Mesh};
    ///
    /// let mut mesh = Mesh::new(
    ///     vec![[0.0, 0.0], [1.0, 0.0], [0.0, 1.0], [5.0, 5.0], [6.0, 5.0], [5.0, 6.0]],
    ///     vec![[0, 1, 2], [3, 4, 5]],
    /// ).unwrap();
    /// mesh.pack(1).unwrap();
    ///
    /// let mut results = Vec::new();
    /// mesh.query_intersecting(&BBox::new([0.5, 0.5], [2.0, 2.0]), &mut results);
    /// assert_eq!(results.len(), 1);
    /// assert_eq!(mesh.indices()[results[0]], [0, 1, 2]);
    /// ```
    pub fn query_intersecting(&self, query: &BBox<D>, results: &mut Vec<usize>) {
        self.query_intersecting_internal(query, usize::MAX, results);
    }

    /// Finds at most `k` triangles whose bounding box intersects `query`.
    ///
    /// Stops as soon as `k` results are collected. Which `k` are returned
    /// follows the traversal order and carries no further meaning.
    pub fn query_intersecting_k(&self, query: &BBox<D>, k: usize, results: &mut Vec<usize>) {
        self.query_intersecting_internal(query, k, results);
    }

    fn query_intersecting_internal(&self, query: &BBox<D>, k: usize, results: &mut Vec<usize>) {
        results.clear();
        let Some(root) = self.root() else {
            return;
        };
        if k == 0 {
            return;
        }

        let mut stack = vec![root];
        while let Some(node) = stack.pop() {
            if !node.bbox().intersects(query) {
                continue;
            }
            if !node.is_leaf() {
                stack.extend(node.children().iter().rev());
                continue;
            }

            let whole = query.contains(node.bbox());
            for pos in node.range() {
                if whole || self.triangle_bbox(pos).intersects(query) {
                    results.push(pos);
                    if results.len() >= k {
                        return;
                    }
                }
            }
        }
    }

    /// Finds all triangles whose bounding box contains `point` (inclusive).
    ///
    /// This is a broad-phase test. On a planar mesh, [`Mesh::locate`] gives the
    /// triangle that actually contains the point.
    pub fn query_point(&self, point: &[f64; D], results: &mut Vec<usize>) {
        self.query_intersecting(&BBox::from_point(*point), results);
    }

    /// Collects the leaves whose box intersects `query`, in range order.
    ///
    /// This is the culling step of a renderer: every triangle that can be
    /// visible in `query` is in one of the returned leaves, and each leaf
    /// maps to one contiguous slice of [`Mesh::indices`].
    pub fn query_nodes_intersecting<'a>(&'a self, query: &BBox<D>, results: &mut Vec<&'a Node<D>>) {
        results.clear();
        let Some(root) = self.root() else {
            return;
        };

        let mut stack = vec![root];
        while let Some(node) = stack.pop() {
            if !node.bbox().intersects(query) {
                continue;
            }
            if node.is_leaf() {
                results.push(node);
            } else {
                stack.extend(node.children().iter().rev());
            }
        }
    }

    /// Finds the triangle closest to `point`.
    ///
    /// Returns the triangle position and the Euclidean distance from `point`
    /// to the triangle (0 if the point lies on it), or `None` for an empty or
    /// unpacked mesh.
    ///
    /// # Example
    /// ```
    /// use meshpack::Mesh;
    ///
    /// let mut mesh = Mesh::new(
    ///     vec![[0.0, 0.0], [1.0, 0.0], [0.0, 1.0], [5.0, 5.0], [6.0, 5.0], [5.0, 6.0]],
    ///     vec![[0, 1, 2], [3, 4, 5]],
    /// ).unwrap();
    /// mesh.pack(1).unwrap();
    ///
    /// let (pos, dist) = mesh.query_nearest(&[4.0, 5.0]).unwrap();
    /// assert_eq!(mesh.indices()[pos], [3, 4, 5]);
    /// assert!((dist - 1.0).abs() < 1e-12);
    /// ```
    pub fn query_nearest(&self, point: &[f64; D]) -> Option<(usize, f64)> {
        let mut results = Vec::with_capacity(1);
        self.query_nearest_k(point, 1, &mut results);
        results.first().copied()
    }

    /// Finds the `k` triangles closest to `point`, sorted by ascending
    /// distance.
    ///
    /// Best-first search: nodes and triangles share one priority queue keyed
    /// by squared distance, and a node's box distance never exceeds the
    /// distance of a triangle inside it, so triangles come out in order.
    ///
    /// # Arguments
    /// * `point` - Query point
    /// * `k` - Number of neighbors wanted
    /// * `results` - Output vector; cleared, then filled with `(position, distance)`
    pub fn query_nearest_k(&self, point: &[f64; D], k: usize, results: &mut Vec<(usize, f64)>) {
        results.clear();
        let Some(root) = self.root() else {
            return;
        };
        if k == 0 || root.is_empty() {
            return;
        }

        let mut queue = BinaryHeap::new();
        queue.push(Candidate { dist_sq: root.bbox().distance_squared(point), item: Item::Node(root) });

        while let Some(Candidate { dist_sq, item }) = queue.pop() {
            match item {
                Item::Triangle(pos) => {
                    results.push((pos, dist_sq.sqrt()));
                    if results.len() >= k {
                        return;
                    }
                }
                Item::Node(node) if node.is_leaf() => {
                    for pos in node.range() {
                        let triangle_dist_sq = self.triangle_distance_squared(pos, point);
                        queue.push(Candidate { dist_sq: triangle_dist_sq, item: Item::Triangle(pos) });
                    }
                }
                Item::Node(node) => {
                    for child in node.children() {
                        let child_dist_sq = child.bbox().distance_squared(point);
                        queue.push(Candidate { dist_sq: child_dist_sq, item: Item::Node(child) });
                    }
                }
            }
        }
    }

    /// Finds all triangles within `radius` of `point`, sorted by ascending
    /// distance.
    ///
    /// A negative or NaN radius returns nothing; an infinite one returns
    /// every triangle.
    pub fn query_within_distance(&self, point: &[f64; D], radius: f64, results: &mut Vec<(usize, f64)>) {
        results.clear();
        if radius.is_nan() || radius < 0.0 {
            return;
        }
        let Some(root) = self.root() else {
            return;
        };

        let radius_sq = radius * radius;
        let mut stack = vec![root];
        while let Some(node) = stack.pop() {
            if node.bbox().distance_squared(point) > radius_sq {
                continue;
            }
            if !node.is_leaf() {
                stack.extend(node.children().iter().rev());
                continue;
            }
            for pos in node.range() {
                let dist_sq = self.triangle_distance_squared(pos, point);
                if dist_sq <= radius_sq {
                    results.push((pos, dist_sq.sqrt()));
                }
            }
        }

        results.sort_by(|a, b| a.1.total_cmp(&b.1).then(a.0.cmp(&b.0)));
    }

    /// Finds all pairs of triangles, one from `self` and one from `other`,
    /// whose bounding boxes intersect.
    ///
    /// Both meshes must be packed; otherwise nothing is returned. Pairs are
    /// `(position in self, position in other)`.
    pub fn query_overlapping(&self, other: &Self, results: &mut Vec<(usize, usize)>) {
        results.clear();
        let (Some(root), Some(other_root)) = (self.root(), other.root()) else {
            return;
        };

        let mut stack = vec![(root, other_root)];
        while let Some((a, b)) = stack.pop() {
            if !a.bbox().intersects(b.bbox()) {
                continue;
            }
            match (a.is_leaf(), b.is_leaf()) {
                (true, true) => {
                    for i in a.range() {
                        let box_a = self.triangle_bbox(i);
                        if !box_a.intersects(b.bbox()) {
                            continue;
                        }
                        for j in b.range() {
                            if box_a.intersects(&other.triangle_bbox(j)) {
                                results.push((i, j));
                            }
                        }
                    }
                }
                (false, true) => stack.extend(a.children().iter().rev().map(|c| (c, b))),
                (true, false) => stack.extend(b.children().iter().rev().map(|c| (a, c))),
                (false, false) => {
                    // Descend the larger side first to keep boxes comparable.
                    if a.len() >= b.len() {
                        stack.extend(a.children().iter().rev().map(|c| (c, b)));
                    } else {
                        stack.extend(b.children().iter().rev().map(|c| (a, c)));
                    }
                }
            }
        }
    }

    fn triangle_bbox(&self, pos: usize) -> BBox<D> {
        let [a, b, c] = self.triangle(pos);
        let mut bbox = BBox::from_point(a);
        bbox.expand(b);
        bbox.expand(c);
        bbox
    }

    fn triangle_distance_squared(&self, pos: usize, point: &[f64; D]) -> f64 {
        let [a, b, c] = self.triangle(pos);
        point_triangle_distance_squared(point, &a, &b, &c)
    }
}

impl Mesh<2> {
    /// Finds a triangle that contains `point`, edges and corners included.
    ///
    /// Degenerate (zero-area) triangles never contain a point. When the point
    /// lies on an edge shared by several triangles, the first one met in
    /// traversal order is returned.
    ///
    /// # Example
    /// ```
    /// use meshpack::Mesh;
    ///
    /// let mut mesh = Mesh::new(
    ///     vec![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]],
    ///     vec![[0, 1, 2], [0, 2, 3]],
    /// ).unwrap();
    /// mesh.pack(1).unwrap();
    ///
    /// let pos = mesh.locate(&[0.2, 0.8]).unwrap();
    /// assert_eq!(mesh.indices()[pos], [0, 2, 3]);
    /// assert!(mesh.locate(&[2.0, 0.5]).is_none());
    /// ```
    pub fn locate(&self, point: &[f64; 2]) -> Option<usize> {
        let root = self.root()?;
        let mut stack = vec![root];
        while let Some(node) = stack.pop() {
            if !node.bbox().contains_point(point) {
                continue;
            }
            if !node.is_leaf() {
                stack.extend(node.children().iter().rev());
                continue;
            }
            if let Some(pos) = node.range().find(|&pos| {
                let [a, b, c] = self.triangle(pos);
                triangle_contains(&a, &b, &c, point)
            }) {
                return Some(pos);
            }
        }
        None
    }
}

/// Priority queue entry for best-first search; the smallest distance pops first.
#[derive(Debug)]
struct Candidate<'a, const D: usize> {
    dist_sq: f64,
    item: Item<'a, D>,
}

#[derive(Debug)]
enum Item<'a, const D: usize> {
    Node(&'a Node<D>),
    Triangle(usize),
}

impl<const D: usize> Item<'_, D> {
    // Triangles before nodes at equal distance, then by position.
    fn rank(&self) -> (u8, usize) {
        match self {
            Item::Triangle(pos) => (0, *pos),
            Item::Node(node) => (1, node.start()),
        }
    }
}

impl<const D: usize> PartialEq for Candidate<'_, D> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<const D: usize> Eq for Candidate<'_, D> {}

impl<const D: usize> PartialOrd for Candidate<'_, D> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<const D: usize> Ord for Candidate<'_, D> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed: BinaryHeap is a max-heap.
        other
            .dist_sq
            .total_cmp(&self.dist_sq)
            .then_with(|| other.item.rank().cmp(&self.item.rank()))
    }
}

#[inline]
fn sub<const D: usize>(a: &[f64; D], b: &[f64; D]) -> [f64; D] {
    std::array::from_fn(|i| a[i] - b[i])
}

#[inline]
fn dot<const D: usize>(a: &[f64; D], b: &[f64; D]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

fn point_segment_distance_squared<const D: usize>(p: &[f64; D], a: &[f64; D], b: &[f64; D]) -> f64 {
    let ab = sub(b, a);
    let ap = sub(p, a);
    let len_sq = dot(&ab, &ab);
    let t = if len_sq > 0.0 { (dot(&ap, &ab) / len_sq).clamp(0.0, 1.0) } else { 0.0 };
    let d: [f64; D] = std::array::from_fn(|i| ap[i] - t * ab[i]);
    dot(&d, &d)
}

/// Squared distance from `p` to the triangle `abc`, in any dimension.
///
/// Projects `p` onto the triangle's plane through the Gram system of the two
/// edge vectors. If the projection falls inside, that is the closest point;
/// otherwise the closest point lies on an edge. Degenerate triangles go
/// straight to the edges.
pub(crate) fn point_triangle_distance_squared<const D: usize>(
    p: &[f64; D],
    a: &[f64; D],
    b: &[f64; D],
    c: &[f64; D],
) -> f64 {
    let ab = sub(b, a);
    let ac = sub(c, a);
    let ap = sub(p, a);

    let d00 = dot(&ab, &ab);
    let d01 = dot(&ab, &ac);
    let d11 = dot(&ac, &ac);
    let det = d00 * d11 - d01 * d01;

    if det > f64::EPSILON * d00 * d11 {
        let d20 = dot(&ap, &ab);
        let d21 = dot(&ap, &ac);
        let v = (d11 * d20 - d01 * d21) / det;
        let w = (d00 * d21 - d01 * d20) / det;
        if v >= 0.0 && w >= 0.0 && v + w <= 1.0 {
            let d: [f64; D] = std::array::from_fn(|i| ap[i] - v * ab[i] - w * ac[i]);
            return dot(&d, &d);
        }
    }

    point_segment_distance_squared(p, a, b)
        .min(point_segment_distance_squared(p, b, c))
        .min(point_segment_distance_squared(p, c, a))
}

#[inline]
fn orient(a: &[f64; 2], b: &[f64; 2], p: &[f64; 2]) -> f64 {
    (b[0] - a[0]) * (p[1] - a[1]) - (b[1] - a[1]) * (p[0] - a[0])
}

/// Inclusive point-in-triangle test for either winding.
pub(crate) fn triangle_contains(a: &[f64; 2], b: &[f64; 2], c: &[f64; 2], p: &[f64; 2]) -> bool {
    if orient(a, b, c) == 0.0 {
        return false;
    }
    let d1 = orient(a, b, p);
    let d2 = orient(b, c, p);
    let d3 = orient(c, a, p);
    let has_neg = d1 < 0.0 || d2 < 0.0 || d3 < 0.0;
    let has_pos = d1 > 0.0 || d2 > 0.0 || d3 > 0.0;
    !(has_neg && has_pos)
}
