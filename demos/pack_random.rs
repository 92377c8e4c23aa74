//! Pack a random 2D mesh and print the shape of the resulting tree.
//!
//! ```bash
//! cargo run --release --example pack_random
//! ```

use meshpack::prelude::*;
use std::time::Instant;

fn main() {
    println!("Packing 200,000 random triangles...");
    let mut vertices = Vec::new();
    let mut indices = Vec::new();
    let mut rng = 12345u64; // Simple LCG random number generator
    let mut next = || {
        rng = rng.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        (rng >> 32) as f64 / f64::from(u32::MAX)
    };

    for t in 0..200_000_u32 {
        let (x, y) = (next() * 1000.0, next() * 1000.0);
        for _ in 0..3 {
            vertices.push([x + next() * 5.0, y + next() * 5.0]);
        }
        indices.push([3 * t, 3 * t + 1, 3 * t + 2]);
    }
    let mut mesh = Mesh::new(vertices, indices).unwrap();

    for leaf_size in [1, 8, 32] {
        let start = Instant::now();
        let root = mesh.pack(leaf_size).unwrap();
        let elapsed = start.elapsed();
        println!(
            "leaf size {:>3}: {:>8} nodes, {:>7} leaves, depth {:>2}, {:>8.2}ms",
            leaf_size,
            root.node_count(),
            root.leaf_count(),
            root.depth(),
            elapsed.as_secs_f64() * 1000.0
        );
    }

    let root = mesh.root().unwrap();
    println!("root box: {:?} .. {:?}", root.bbox().min, root.bbox().max);
    let largest = root.leaves().map(Node::len).max().unwrap_or(0);
    println!("largest leaf: {} triangles", largest);
}
