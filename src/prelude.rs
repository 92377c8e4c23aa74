//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types from the crate.
//! Users can import everything they need with:
//!
//! ```
//! use meshpack::prelude::*;
//! ```

pub use crate::{BBox, Mesh, MeshError, Node, PackConfig};
