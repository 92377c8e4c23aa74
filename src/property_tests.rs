//! Structural properties of packed meshes over randomised input

#[cfg(test)]
mod tests {
    use crate::test_support::{check_packed, grid_mesh, random_mesh, sorted};
    use crate::{Mesh, PackConfig};
    use rand::SeedableRng;

    #[test]
    fn test_grid_meshes_all_leaf_sizes() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(42);
        for leaf_size in [1, 2, 3, 7, 16, 100, 10_000] {
            let mut mesh = grid_mesh(&mut rng, 17, 11, 0.3);
            let original = mesh.indices().to_vec();
            let _ = mesh.pack(leaf_size).unwrap();
            check_packed(&mesh, &original, leaf_size);
        }
    }

    #[test]
    fn test_random_triangles_2d() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(7);
        for n_triangles in [0, 1, 2, 5, 33, 500, 2_000] {
            let mut mesh: Mesh<2> = random_mesh(&mut rng, 300, n_triangles);
            let original = mesh.indices().to_vec();
            let _ = mesh.pack(4).unwrap();
            check_packed(&mesh, &original, 4);
        }
    }

    #[test]
    fn test_random_triangles_3d() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(99);
        let mut mesh: Mesh<3> = random_mesh(&mut rng, 1_000, 3_000);
        let original = mesh.indices().to_vec();
        let _ = mesh.pack(8).unwrap();
        check_packed(&mesh, &original, 8);
    }

    #[test]
    fn test_one_dimensional_mesh() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(3);
        let mut mesh: Mesh<1> = random_mesh(&mut rng, 50, 200);
        let original = mesh.indices().to_vec();
        let _ = mesh.pack(5).unwrap();
        check_packed(&mesh, &original, 5);
    }

    #[test]
    fn test_root_box_contains_every_vertex() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(11);
        let mut mesh = grid_mesh(&mut rng, 30, 30, 0.45);
        let root = mesh.pack(10).unwrap().clone();
        for triangle in mesh.indices() {
            for &v in triangle {
                let p = mesh.vertices()[v as usize];
                assert!(root.bbox().contains_point(&p), "root box must contain vertex {v}");
            }
        }
    }

    #[test]
    fn test_depth_is_logarithmic() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(5);
        let mut mesh: Mesh<2> = random_mesh(&mut rng, 5_000, 10_000);
        for leaf_size in [1, 4, 16, 64] {
            let root = mesh.pack(leaf_size).unwrap();
            let bound = (10_000.0 / leaf_size as f64).log2().ceil() as usize + 1;
            assert!(root.depth() <= bound, "depth {} exceeds {bound} for leaf size {leaf_size}", root.depth());
        }
    }

    #[test]
    fn test_all_coincident_centroids() {
        // Every triangle is the same three vertices in a different order.
        let vertices = vec![[0.0, 0.0], [3.0, 0.0], [0.0, 3.0]];
        let perms = [[0, 1, 2], [1, 2, 0], [2, 0, 1], [0, 2, 1], [2, 1, 0], [1, 0, 2]];
        let indices: Vec<[u32; 3]> = (0..600).map(|i| perms[i % perms.len()]).collect();
        let mut mesh = Mesh::new(vertices, indices.clone()).unwrap();

        let _ = mesh.pack(3).unwrap();
        check_packed(&mesh, &indices, 3);
        assert_eq!(mesh.indices(), indices.as_slice(), "midpoint splits must not reorder");
        assert_eq!(mesh.root().unwrap().depth(), 9);
    }

    #[test]
    fn test_all_vertices_at_one_point() {
        let vertices = vec![[1.5, -2.0]; 4];
        let indices: Vec<[u32; 3]> = (0..257).map(|i| [i % 4, (i + 1) % 4, (i + 2) % 4]).collect();
        let mut mesh = Mesh::new(vertices, indices.clone()).unwrap();

        let root = mesh.pack(2).unwrap();
        assert!(root.bbox().extent(0) == 0.0 && root.bbox().extent(1) == 0.0);
        check_packed(&mesh, &indices, 2);
    }

    #[test]
    fn test_repack_same_leaf_size_is_stable() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(2024);
        let mut mesh = grid_mesh(&mut rng, 25, 25, 0.4);

        let first = mesh.pack(6).unwrap().clone();
        let order = mesh.indices().to_vec();
        let second = mesh.pack(6).unwrap().clone();

        assert_eq!(first, second, "repacking must rebuild the same tree");
        assert_eq!(mesh.indices(), order.as_slice(), "repacking must not reorder");

        let leaf_sets = |mesh: &Mesh<2>, root: &crate::Node<2>| -> Vec<Vec<[u32; 3]>> {
            root.leaves().map(|l| sorted(mesh.leaf_triangles(l))).collect()
        };
        assert_eq!(leaf_sets(&mesh, &first), leaf_sets(&mesh, &second));
    }

    #[test]
    fn test_repack_with_other_leaf_size_starts_from_current_order() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(8);
        let mut mesh = grid_mesh(&mut rng, 20, 10, 0.2);
        let original = mesh.indices().to_vec();

        let _ = mesh.pack(2).unwrap();
        let _ = mesh.pack(9).unwrap();
        check_packed(&mesh, &original, 9);

        let _ = mesh.pack(1).unwrap();
        check_packed(&mesh, &original, 1);
    }

    #[test]
    fn test_parallel_build_matches_sequential() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(77);
        let base: Mesh<2> = random_mesh(&mut rng, 20_000, 50_000);

        let mut sequential = base.clone();
        let _ = sequential.pack_with(&PackConfig::new(8).with_parallel_threshold(usize::MAX)).unwrap();

        let mut parallel = base;
        let _ = parallel.pack_with(&PackConfig::new(8).with_parallel_threshold(64)).unwrap();

        assert_eq!(sequential.indices(), parallel.indices());
        assert_eq!(sequential.root(), parallel.root());
    }
}
