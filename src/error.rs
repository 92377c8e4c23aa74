//! Error types for mesh construction and packing.
//!
//! Every fallible operation returns [`Result<T>`]. Errors are raised before
//! anything is mutated, so a failed call leaves the mesh as it was.

use thiserror::Error;

/// Errors reported at the API boundary.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum MeshError {
    /// A triangle references a vertex that does not exist.
    #[error(
        "invalid mesh: triangle {triangle} corner {corner} references vertex {index}, \
         but the mesh has {vertex_count} vertices"
    )]
    VertexOutOfRange {
        /// Position of the offending triangle in the index array.
        triangle: usize,
        /// Corner (0, 1 or 2) holding the bad index.
        corner: usize,
        /// The out-of-range vertex index.
        index: u32,
        /// Number of vertices in the mesh.
        vertex_count: usize,
    },

    /// Vertices have no coordinates (`D == 0`).
    #[error("invalid mesh: vertices must have at least one coordinate")]
    ZeroDimension,

    /// A vertex coordinate is NaN or infinite.
    #[error("invalid mesh: vertex {vertex} has non-finite coordinate {value} on axis {axis}")]
    NonFiniteVertex {
        /// Index of the offending vertex.
        vertex: usize,
        /// Axis of the bad coordinate.
        axis: usize,
        /// The coordinate value.
        value: f64,
    },

    /// A flat input buffer cannot be split into whole rows.
    #[error("invalid mesh: '{buffer}' has {len} values, not a multiple of the row width {width}")]
    RaggedBuffer {
        /// Name of the buffer (`coords` or `indices`).
        buffer: &'static str,
        /// Number of values supplied.
        len: usize,
        /// Expected row width.
        width: usize,
    },

    /// A build parameter is out of range.
    #[error("invalid parameter: {name} must be positive, got {value}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// The rejected value.
        value: usize,
    },
}

impl MeshError {
    /// Returns `true` for the structural mesh errors (the `InvalidMesh` family).
    pub fn is_invalid_mesh(&self) -> bool {
        matches!(
            self,
            Self::VertexOutOfRange { .. }
                | Self::ZeroDimension
                | Self::NonFiniteVertex { .. }
                | Self::RaggedBuffer { .. }
        )
    }

    /// Returns `true` for rejected build parameters.
    pub fn is_invalid_parameter(&self) -> bool {
        matches!(self, Self::InvalidParameter { .. })
    }
}

/// Convenience alias for `Result<T, MeshError>`.
pub type Result<T> = std::result::Result<T, MeshError>;
