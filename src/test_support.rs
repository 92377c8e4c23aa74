//! Mesh generators and invariant checks shared by the test modules.

use rand::Rng;

use crate::{BBox, Mesh, Node};

/// Regular `nx` by `ny` grid of cells, two triangles per cell, with vertices
/// jittered by up to `jitter` of a cell.
pub(crate) fn grid_mesh<R: Rng>(rng: &mut R, nx: u32, ny: u32, jitter: f64) -> Mesh<2> {
    let mut offset = || if jitter > 0.0 { rng.random_range(-jitter..jitter) } else { 0.0 };
    let mut vertices = Vec::new();
    for j in 0..=ny {
        for i in 0..=nx {
            let dx = offset();
            let dy = offset();
            vertices.push([f64::from(i) + dx, f64::from(j) + dy]);
        }
    }

    let row = nx + 1;
    let mut indices = Vec::new();
    for j in 0..ny {
        for i in 0..nx {
            let v00 = j * row + i;
            let v10 = v00 + 1;
            let v01 = v00 + row;
            let v11 = v01 + 1;
            indices.push([v00, v10, v11]);
            indices.push([v00, v11, v01]);
        }
    }
    Mesh::new(vertices, indices).unwrap()
}

/// `n_triangles` triangles over random corners picked from `n_points` points
/// in `[-1, 1]^D`; repeated corners are allowed.
pub(crate) fn random_mesh<R: Rng, const D: usize>(rng: &mut R, n_points: u32, n_triangles: usize) -> Mesh<D> {
    let vertices = (0..n_points)
        .map(|_| std::array::from_fn(|_| rng.random_range(-1.0..1.0)))
        .collect();
    let indices = (0..n_triangles)
        .map(|_| std::array::from_fn(|_| rng.random_range(0..n_points)))
        .collect();
    Mesh::new(vertices, indices).unwrap()
}

/// Tight box over the corners of `triangles`.
pub(crate) fn tight_box<const D: usize>(mesh: &Mesh<D>, triangles: &[[u32; 3]]) -> BBox<D> {
    let points = triangles.iter().flatten().map(|&i| mesh.vertices()[i as usize]);
    BBox::from_points(points).unwrap_or_else(BBox::empty)
}

/// Triangles sorted, for multiset comparison.
pub(crate) fn sorted(triangles: &[[u32; 3]]) -> Vec<[u32; 3]> {
    let mut v = triangles.to_vec();
    v.sort_unstable();
    v
}

/// Asserts every structural invariant of a packed mesh.
pub(crate) fn check_packed<const D: usize>(mesh: &Mesh<D>, original: &[[u32; 3]], leaf_size: usize) {
    let root = mesh.root().expect("mesh should be packed");
    assert_eq!(root.range(), 0..mesh.len(), "root must span the whole index array");
    assert_eq!(sorted(mesh.indices()), sorted(original), "packing must permute, not change, triangles");

    let mut covered = vec![0_u32; mesh.len()];
    for leaf in root.leaves() {
        assert!(leaf.len() <= leaf_size, "leaf {:?} exceeds leaf size {leaf_size}", leaf.range());
        if mesh.len() > 0 {
            assert!(!leaf.is_empty(), "only the root of an empty mesh may be empty");
        }
        for pos in leaf.range() {
            covered[pos] += 1;
        }
    }
    assert!(covered.iter().all(|&c| c == 1), "every triangle must sit in exactly one leaf");

    for node in root.iter() {
        assert_eq!(*node.bbox(), tight_box(mesh, mesh.leaf_triangles(node)), "box must be tight");
        check_children(node);
    }
}

fn check_children<const D: usize>(node: &Node<D>) {
    let children = node.children();
    if children.is_empty() {
        return;
    }
    assert_eq!(children[0].start(), node.start(), "first child must start with its parent");
    assert_eq!(children[children.len() - 1].stop(), node.stop(), "last child must end with its parent");
    for pair in children.windows(2) {
        assert_eq!(pair[0].stop(), pair[1].start(), "children ranges must be adjacent");
    }
    let union = children.iter().fold(BBox::empty(), |acc, c| acc.union(c.bbox()));
    assert_eq!(*node.bbox(), union, "parent box must equal the union of its children");
}
