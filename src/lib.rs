//! # meshpack - bounding volume hierarchies for triangle meshes
//!
//! A Rust library that packs a triangle mesh into a bounding volume hierarchy
//! (BVH) and answers spatial queries over it.
//!
//! ## Features
//!
//! - **In-place packing**: triangles are reordered inside the mesh's own index
//!   array, so every tree node owns one contiguous slice of it
//! - **Median splits**: each node is split at the median centroid along the
//!   longest axis of its box, giving a balanced tree even for degenerate input
//! - **Any dimension**: `Mesh<2>` for planar meshes, `Mesh<3>` for surfaces in space
//! - **`f32` or `f64` input**: single-precision vertices are widened on construction
//! - **Queries**: box intersection, point, exact nearest / k-nearest,
//!   within-distance, mesh-mesh overlap, and point location in the plane
//! - **Parallel build**: large subtrees are built on the rayon pool (`rayon`
//!   feature, on by default)
//!
//! ## Quick Start
//!
//! ```rust
//! use meshpack::prelude::*;
//!
//! // Two triangles covering the unit square, one far away.
//! let vertices = vec![
//!     [0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0],
//!     [5.0, 5.0], [6.0, 5.0], [5.0, 6.0],
//! ];
//! let indices = vec![[0, 1, 2], [0, 2, 3], [4, 5, 6]];
//!
//! let mut mesh = Mesh::new(vertices, indices).unwrap();
//!
//! // Build the hierarchy (required before querying)
//! let root = mesh.pack(1).unwrap();
//! assert_eq!(root.range(), 0..3);
//! assert_eq!(root.leaf_count(), 3);
//!
//! // Range search
//! let mut results = Vec::new();
//! mesh.query_intersecting(&BBox::new([0.5, 0.5], [2.0, 2.0]), &mut results);
//! assert_eq!(results.len(), 2);
//!
//! // Leaf ranges resolve to triangles through the packed index array
//! for leaf in mesh.root().unwrap().leaves() {
//!     for triangle in mesh.leaf_triangles(leaf) {
//!         println!("{:?} -> {:?}", leaf.range(), triangle);
//!     }
//! }
//! ```
//!
//! ## How It Works
//!
//! Packing computes a box and a centroid for every triangle, then recursively
//! splits the triangle range: if it holds more than `leaf_size` triangles, it
//! is partitioned around the median centroid of its longest axis (a selection,
//! not a sort) and each half becomes a child. When all centroids coincide on
//! that axis the range is cut at its midpoint instead. Node boxes are unions of
//! their children's boxes, so they are tight and nested.
//!
//! Packing again starts from the current order. With the same leaf size it
//! reproduces the same tree and leaves the order untouched.

pub mod bbox;
pub mod error;
pub mod mesh;
pub mod node;
pub mod pack;
pub mod prelude;
mod queries;

pub use bbox::{BBox, BBox2, BBox3};
pub use error::{MeshError, Result};
pub use mesh::{Mesh, Mesh2, Mesh3};
pub use node::Node;
pub use pack::{DEFAULT_LEAF_SIZE, DEFAULT_PARALLEL_THRESHOLD, PackConfig};

#[cfg(test)]
mod property_tests;
#[cfg(test)]
mod test_support;
