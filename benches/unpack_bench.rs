use corex::facade::graph::{CsrGraph, RawEdgeRecord};
use corex::facade::names::NameTable;
use corex::facade::DataFacade;
use corex::geo::FixedPointCoordinate;
use corex::model::NodeId;
use corex::unpack::unpack;

use criterion::criterion_main;

/// Builds a chain of `n` real edges plus a binary tree of shortcuts
/// over it, so a single packed edge `0 -> n` unpacks through `log2(n)`
/// levels of recursion — the deep-shortcut case `unpack`'s explicit
/// stack exists to handle without overflowing (spec.md §9).
fn shortcut_chain_facade(node_count: u32) -> (DataFacade, NodeId) {
    let last = node_count - 1;
    let mut edges_by_node: Vec<Vec<_>> = vec![Vec::new(); node_count as usize];

    for node in 0..last {
        edges_by_node[node as usize].push(
            RawEdgeRecord::pack(node + 1, 10, 10, 0, true, false, false, 0).unpack(),
        );
    }

    // `last` is a power of two, so doubling the span exactly reaches
    // it at the top level, producing one shortcut-of-shortcuts edge
    // `0 -> last` whose unpacking recurses `log2(last)` levels deep.
    let mut span = 1;
    while span < last {
        let next_span = span * 2;
        let mut node = 0;
        while node + next_span <= last {
            let middle = node + span;
            let weight = (next_span as i32) * 10;
            edges_by_node[node as usize].push(RawEdgeRecord::pack(
                node + next_span,
                weight,
                weight,
                0,
                true,
                false,
                true,
                middle,
            ).unpack());
            node += next_span;
        }
        span = next_span;
    }

    let mut first_edge = Vec::with_capacity(node_count as usize + 1);
    let mut edges = Vec::new();
    for bucket in &edges_by_node {
        first_edge.push(edges.len() as u32);
        edges.extend(bucket.iter().copied());
    }
    first_edge.push(edges.len() as u32);

    let graph = CsrGraph::new(first_edge, edges);
    let coordinates = vec![FixedPointCoordinate::default(); node_count as usize];
    let facade = DataFacade::from_parts(graph, coordinates, NameTable::default(), Vec::new(), 0);
    (facade, last)
}

fn unpack_a_deeply_shortcut_path(c: &mut criterion::Criterion) {
    let (facade, last) = shortcut_chain_facade(1_025);
    let packed_path = vec![0, last];

    c.bench_function("unpack_1024_chain_shortcuts", |b| {
        b.iter(|| unpack(&facade, &packed_path).unwrap())
    });
}

criterion::criterion_group!(unpack_benches, unpack_a_deeply_shortcut_path);
criterion_main!(unpack_benches);
