#![no_main]

use libfuzzer_sys::fuzz_target;
use spgraph_core::{Graph, all_pairs_shortest_distances, bellman_ford};

// Bytes become a small weighted digraph: first byte picks the vertex count,
// then each triple is (from, to, signed weight).
fuzz_target!(|data: &[u8]| {
    let Some((&n, rest)) = data.split_first() else {
        return;
    };
    let n = usize::from(n % 12) + 1;
    let mut graph = Graph::weighted_directed(n);
    for chunk in rest.chunks_exact(3) {
        let from = usize::from(chunk[0]) % n;
        let to = usize::from(chunk[1]) % n;
        if from != to {
            let _ = graph.add_weighted_edge(from, to, i64::from(chunk[2] as i8));
        }
    }

    // A per-source failure and an all-pairs failure must agree.
    let per_source_ok = (0..n).all(|s| bellman_ford(&graph, s).is_ok());
    let matrix = all_pairs_shortest_distances(&graph);
    assert_eq!(per_source_ok, matrix.is_ok());

    if let Ok(matrix) = matrix {
        for v in 0..n {
            assert_eq!(matrix.distance(v, v), Some(0));
        }
    }
});
