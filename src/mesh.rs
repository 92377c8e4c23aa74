//! Triangle mesh storage and packing entry point.

use std::time::Instant;

use crate::error::{MeshError, Result};
use crate::node::Node;
use crate::pack::{self, PackConfig, Primitive};

/// A triangle mesh with an optional packed hierarchy.
///
/// The vertex array is fixed at construction. The triangle index array keeps
/// its length and contents but changes order every time the mesh is packed:
/// after [`Mesh::pack`], the triangles under each tree node are contiguous in
/// [`Mesh::indices`].
///
/// # Example
/// ```
/// use meshpack::Mesh;
///
/// // Unit square split along both diagonals.
/// let vertices = vec![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0], [0.5, 0.5]];
/// let indices = vec![[0, 1, 4], [1, 2, 4], [2, 3, 4], [3, 0, 4]];
///
/// let mut mesh = Mesh::new(vertices, indices).unwrap();
/// let root = mesh.pack(1).unwrap();
/// assert_eq!(root.leaf_count(), 4);
/// assert_eq!(root.bbox().min, [0.0, 0.0]);
/// assert_eq!(root.bbox().max, [1.0, 1.0]);
/// ```
#[derive(Clone, Debug)]
pub struct Mesh<const D: usize> {
    vertices: Vec<[f64; D]>,
    indices: Vec<[u32; 3]>,
    root: Option<Node<D>>,
}

/// Mesh embedded in the plane.
pub type Mesh2 = Mesh<2>;
/// Mesh embedded in space.
pub type Mesh3 = Mesh<3>;

impl<const D: usize> Mesh<D> {
    /// Creates a mesh after validating it.
    ///
    /// Triangles that repeat a vertex index are accepted: they are degenerate
    /// but structurally sound, and they are packed like any other triangle.
    ///
    /// # Errors
    /// [`MeshError::ZeroDimension`] if `D == 0`,
    /// [`MeshError::VertexOutOfRange`] if a triangle references a vertex past
    /// the end of `vertices`, [`MeshError::NonFiniteVertex`] if a coordinate is
    /// NaN or infinite.
    pub fn new(vertices: Vec<[f64; D]>, indices: Vec<[u32; 3]>) -> Result<Self> {
        if let Err(err) = validate(&vertices, &indices) {
            log::warn!("rejected mesh with {} vertices, {} triangles: {err}", vertices.len(), indices.len());
            return Err(err);
        }
        Ok(Self { vertices, indices, root: None })
    }

    /// Creates a mesh from flat row-major buffers: `D` coordinates per vertex
    /// and 3 indices per triangle.
    ///
    /// Coordinates may be `f32` or `f64`; single-precision input is widened
    /// to `f64` on the way in.
    ///
    /// # Errors
    /// [`MeshError::RaggedBuffer`] if a buffer length is not a whole number of
    /// rows, otherwise the same errors as [`Mesh::new`].
    ///
    /// # Example
    /// ```
    /// use meshpack::Mesh;
    ///
    /// let mesh = Mesh::<2>::from_flat(&[0.0, 0.0, 1.0, 0.0, 0.0, 1.0], &[0, 1, 2]).unwrap();
    /// assert_eq!(mesh.vertex_count(), 3);
    /// assert_eq!(mesh.len(), 1);
    /// assert!(Mesh::<2>::from_flat(&[0.0, 0.0, 1.0], &[0, 1, 2]).is_err());
    ///
    /// let single = Mesh::<2>::from_flat(&[0.0_f32, 0.0, 0.5, 0.0, 0.0, 0.25], &[0, 1, 2]).unwrap();
    /// assert_eq!(single.vertices()[2], [0.0, 0.25]);
    /// ```
    pub fn from_flat<T>(coords: &[T], indices: &[u32]) -> Result<Self>
    where
        T: Copy + Into<f64>,
    {
        if D == 0 {
            return Err(MeshError::ZeroDimension);
        }
        if !coords.len().is_multiple_of(D) {
            return Err(MeshError::RaggedBuffer { buffer: "coords", len: coords.len(), width: D });
        }
        if !indices.len().is_multiple_of(3) {
            return Err(MeshError::RaggedBuffer { buffer: "indices", len: indices.len(), width: 3 });
        }
        let vertices = coords.chunks_exact(D).map(|c| std::array::from_fn(|i| c[i].into())).collect();
        let triangles = indices.chunks_exact(3).map(|c| [c[0], c[1], c[2]]).collect();
        Self::new(vertices, triangles)
    }

    /// Creates a mesh from single-precision vertices, widened to `f64`.
    ///
    /// # Errors
    /// Same as [`Mesh::new`].
    pub fn from_f32(vertices: &[[f32; D]], indices: Vec<[u32; 3]>) -> Result<Self> {
        let vertices = vertices.iter().map(|v| v.map(f64::from)).collect();
        Self::new(vertices, indices)
    }

    /// Builds the hierarchy with at most `leaf_size` triangles per leaf and
    /// returns its root.
    ///
    /// The index array is reordered so that every node's triangles are
    /// contiguous. Packing again starts from the current order, not the order
    /// the mesh was created with; callers needing a canonical rebuild should
    /// keep their original index array. Packing twice with the same leaf size
    /// leaves the order and the tree unchanged.
    ///
    /// # Errors
    /// [`MeshError::InvalidParameter`] if `leaf_size` is zero. The mesh is
    /// not modified in that case.
    pub fn pack(&mut self, leaf_size: usize) -> Result<&Node<D>> {
        self.pack_with(&PackConfig::new(leaf_size))
    }

    /// Same as [`Mesh::pack`] with every build parameter exposed.
    ///
    /// # Errors
    /// [`MeshError::InvalidParameter`] if the config does not validate.
    pub fn pack_with(&mut self, config: &PackConfig) -> Result<&Node<D>> {
        config.validate()?;

        let start = Instant::now();
        let mut primitives: Vec<Primitive<D>> =
            self.indices.iter().map(|&t| Primitive::new(&self.vertices, t)).collect();
        let root = pack::build(&mut primitives, 0, config);
        for (slot, p) in self.indices.iter_mut().zip(&primitives) {
            *slot = p.triangle;
        }

        log::debug!(
            "packed {} triangles into {} nodes, depth {}, leaf size {} in {:?}",
            self.indices.len(),
            root.node_count(),
            root.depth(),
            config.leaf_size(),
            start.elapsed()
        );
        Ok(&*self.root.insert(root))
    }

    /// Vertex coordinates.
    pub fn vertices(&self) -> &[[f64; D]] {
        &self.vertices
    }

    /// Triangles in their current (possibly packed) order.
    pub fn indices(&self) -> &[[u32; 3]] {
        &self.indices
    }

    /// Root of the hierarchy, `None` until the first pack.
    pub fn root(&self) -> Option<&Node<D>> {
        self.root.as_ref()
    }

    /// True once [`Mesh::pack`] has succeeded.
    pub fn is_packed(&self) -> bool {
        self.root.is_some()
    }

    /// Number of triangles.
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// True if the mesh has no triangles.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Corner points of the triangle at position `pos` of the index array.
    ///
    /// # Panics
    /// If `pos >= self.len()`.
    pub fn triangle(&self, pos: usize) -> [[f64; D]; 3] {
        self.indices[pos].map(|i| self.vertices[i as usize])
    }

    /// Triangles owned by `node`.
    ///
    /// # Panics
    /// If `node` does not belong to this mesh's current tree and its range
    /// runs past the index array.
    pub fn leaf_triangles(&self, node: &Node<D>) -> &[[u32; 3]] {
        &self.indices[node.range()]
    }

    /// Consumes the mesh, returning vertices, packed indices and the root.
    pub fn into_parts(self) -> (Vec<[f64; D]>, Vec<[u32; 3]>, Option<Node<D>>) {
        (self.vertices, self.indices, self.root)
    }
}

fn validate<const D: usize>(vertices: &[[f64; D]], indices: &[[u32; 3]]) -> Result<()> {
    if D == 0 {
        return Err(MeshError::ZeroDimension);
    }

    for (vertex, point) in vertices.iter().enumerate() {
        if let Some((axis, &value)) = point.iter().enumerate().find(|(_, v)| !v.is_finite()) {
            return Err(MeshError::NonFiniteVertex { vertex, axis, value });
        }
    }

    let vertex_count = vertices.len();
    for (triangle, corners) in indices.iter().enumerate() {
        for (corner, &index) in corners.iter().enumerate() {
            if index as usize >= vertex_count {
                return Err(MeshError::VertexOutOfRange { triangle, corner, index, vertex_count });
            }
        }
    }
    Ok(())
}
