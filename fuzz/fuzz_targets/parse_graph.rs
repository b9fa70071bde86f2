#![no_main]

use libfuzzer_sys::fuzz_target;
use spgraph_core::graph::parse::parse_graph;

// Any input either fails to parse or yields a graph whose adjacency storage
// is consistent and whose edge count matches the header.
fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    if let Ok(graph) = parse_graph(text) {
        assert!(graph.check_invariants().is_ok());
    }
});
