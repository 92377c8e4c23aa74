//! Find triangles whose boxes intersect a query rectangle.
use meshpack::prelude::*;

fn main() {
    let vertices = vec![
        [0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0],  // unit square
        [2.0, 2.0], [3.0, 2.0], [3.0, 3.0],              // far triangle
    ];
    let indices = vec![[0, 1, 2], [4, 5, 6], [0, 2, 3]];
    let mut mesh = Mesh::new(vertices, indices).unwrap();
    let _ = mesh.pack(1).unwrap();

    let mut results = Vec::new();
    mesh.query_intersecting(&BBox::new([0.7, 0.2], [1.3, 0.4]), &mut results);
    let found: Vec<_> = results.iter().map(|&pos| mesh.indices()[pos]).collect();
    println!("Intersecting: {:?}", found);

    // Both halves of the square reach x = 0.7..1.0 at y = 0.2..0.4; the far triangle does not.
    assert_eq!(found.len(), 2, "Expected 2 intersecting triangles");
    assert!(found.contains(&[0, 1, 2]), "Lower half should intersect");
    assert!(found.contains(&[0, 2, 3]), "Upper half should intersect");
    assert!(!found.contains(&[4, 5, 6]), "Far triangle should not intersect");
}
