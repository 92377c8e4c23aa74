//! Tree nodes produced by packing.

use std::ops::Range;

use crate::bbox::BBox;

/// One node of the packed hierarchy.
///
/// A node owns the contiguous range `start..stop` of the mesh's (packed)
/// index array. Leaves have no children. An internal node's range is the
/// in-order concatenation of its children's ranges and its box is the union
/// of their boxes.
#[derive(Clone, Debug, PartialEq)]
pub struct Node<const D: usize> {
    pub(crate) bbox: BBox<D>,
    pub(crate) start: usize,
    pub(crate) stop: usize,
    pub(crate) children: Vec<Self>,
}

impl<const D: usize> Node<D> {
    pub(crate) fn leaf(bbox: BBox<D>, start: usize, stop: usize) -> Self {
        Self { bbox, start, stop, children: Vec::new() }
    }

    pub(crate) fn internal(left: Self, right: Self) -> Self {
        debug_assert_eq!(left.stop, right.start, "children must be adjacent");
        Self {
            bbox: left.bbox.union(&right.bbox),
            start: left.start,
            stop: right.stop,
            children: vec![left, right],
        }
    }

    /// Tight bounding box over every triangle in the range.
    pub fn bbox(&self) -> &BBox<D> {
        &self.bbox
    }

    /// Positions `start..stop` in the packed index array.
    pub fn range(&self) -> Range<usize> {
        self.start..self.stop
    }

    /// First position of the range.
    pub fn start(&self) -> usize {
        self.start
    }

    /// One past the last position of the range.
    pub fn stop(&self) -> usize {
        self.stop
    }

    /// Number of triangles under this node.
    pub fn len(&self) -> usize {
        self.stop - self.start
    }

    /// True only for the root of an empty mesh.
    pub fn is_empty(&self) -> bool {
        self.start == self.stop
    }

    /// Ordered children; empty for a leaf.
    pub fn children(&self) -> &[Self] {
        &self.children
    }

    /// True if the node has no children.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Number of levels below and including this node (a leaf has depth 1).
    pub fn depth(&self) -> usize {
        1 + self.children.iter().map(Self::depth).max().unwrap_or(0)
    }

    /// Total number of nodes in this subtree.
    pub fn node_count(&self) -> usize {
        self.iter().count()
    }

    /// Number of leaves in this subtree.
    pub fn leaf_count(&self) -> usize {
        self.leaves().count()
    }

    /// Depth-first pre-order traversal of this subtree.
    ///
    /// # Example
    /// ```
    /// use meshpack::Mesh;
    ///
    /// let mut mesh = Mesh::new(
    ///     vec![[0.0, 0.0], [1.0, 0.0], [0.0, 1.0], [1.0, 1.0]],
    ///     vec![[0, 1, 2], [1, 3, 2]],
    /// ).unwrap();
    /// let root = mesh.pack(1).unwrap();
    /// let ranges: Vec<_> = root.iter().map(|n| n.range()).collect();
    /// assert_eq!(ranges, vec![0..2, 0..1, 1..2]);
    /// ```
    pub fn iter(&self) -> Iter<'_, D> {
        Iter { stack: vec![self] }
    }

    /// Leaves of this subtree, in range order.
    pub fn leaves(&self) -> impl Iterator<Item = &Self> + '_ {
        self.iter().filter(|n| n.is_leaf())
    }
}

/// Depth-first pre-order iterator over a subtree, see [`Node::iter`].
#[derive(Debug)]
pub struct Iter<'a, const D: usize> {
    stack: Vec<&'a Node<D>>,
}

impl<'a, const D: usize> Iterator for Iter<'a, D> {
    type Item = &'a Node<D>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

impl<'a, const D: usize> IntoIterator for &'a Node<D> {
    type Item = &'a Node<D>;
    type IntoIter = Iter<'a, D>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
