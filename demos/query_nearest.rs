//! Nearest triangles to a point in 3D, and everything within a radius.
use meshpack::prelude::*;

fn main() {
    // Two unit squares, one at z = 0 and one at z = 2.
    let vertices = vec![
        [0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 1.0, 0.0], [0.0, 1.0, 0.0],
        [0.0, 0.0, 2.0], [1.0, 0.0, 2.0], [1.0, 1.0, 2.0], [0.0, 1.0, 2.0],
    ];
    let indices = vec![[0, 1, 2], [0, 2, 3], [4, 5, 6], [4, 6, 7]];
    let mut mesh = Mesh::new(vertices, indices).unwrap();
    let _ = mesh.pack(1).unwrap();

    let p = [0.25, 0.75, 0.5];
    let (pos, dist) = mesh.query_nearest(&p).unwrap();
    println!("Nearest to {:?}: triangle {:?} at {:.3}", p, mesh.indices()[pos], dist);
    assert_eq!(mesh.indices()[pos], [0, 2, 3]);
    assert!((dist - 0.5).abs() < 1e-12);

    let mut nearest = Vec::new();
    mesh.query_nearest_k(&p, 3, &mut nearest);
    for (pos, dist) in &nearest {
        println!("  {:?} at {:.3}", mesh.indices()[*pos], dist);
    }
    assert_eq!(nearest.len(), 3);

    let mut within = Vec::new();
    mesh.query_within_distance(&p, 1.0, &mut within);
    println!("Within 1.0: {} triangles", within.len());
    assert_eq!(within.len(), 2, "Only the lower square is within 1.0");
}
