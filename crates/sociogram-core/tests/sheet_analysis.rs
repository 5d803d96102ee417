use pretty_assertions::assert_eq;

use sociogram_core::{AdjacencyMatrix, ControlRatio, ErrorKind, NodeId, Tier, analyze_sheet};

fn matrix(rows: &[&[u8]]) -> AdjacencyMatrix {
    AdjacencyMatrix::from_rows(rows.iter().map(|r| r.to_vec()).collect()).unwrap()
}

#[test]
fn directed_three_cycle_end_to_end() {
    let analysis = analyze_sheet("Лист1", matrix(&[&[0, 1, 0], &[0, 0, 1], &[1, 0, 0]])).unwrap();

    let group = analysis.statistics.group;
    assert_eq!(group.link_count, 3);
    assert_eq!(group.mutual_pairs, 0);
    assert_eq!(group.s_group, 0.0);
    assert_eq!(group.e_group, 1.0);
    assert_eq!(group.bb_group, 0.0);

    for stat in &analysis.statistics.nodes {
        assert_eq!(stat.c_plus, 0.5);
        assert_eq!(stat.e_plus, 0.5);
        assert_eq!(stat.kuo, ControlRatio::Finite(1.0));
    }

    // equal in-degrees: one node per ring, in id order
    let rings: Vec<Vec<NodeId>> = analysis
        .layout
        .rings()
        .iter()
        .map(|r| r.nodes.clone())
        .collect();
    let ids: Vec<Vec<NodeId>> = (1..=3)
        .map(|id| vec![NodeId::new(id).unwrap()])
        .collect();
    assert_eq!(rings, ids);
}

#[test]
fn three_cycle_with_one_mutual_pair() {
    let analysis = analyze_sheet("Лист2", matrix(&[&[0, 1, 0], &[1, 0, 1], &[1, 0, 0]])).unwrap();
    assert_eq!(analysis.statistics.group.mutual_pairs, 1);
}

#[test]
fn empty_graph_fails_the_sheet_with_context() {
    let err = analyze_sheet("Лист3", matrix(&[&[0, 0], &[0, 0]])).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::EmptyGraph);
    assert_eq!(err.context_value("sheet"), Some("Лист3"));
}

#[test]
fn ten_node_sheet_partitions_four_three_three() {
    let rows: Vec<Vec<u8>> = (0..10)
        .map(|i| (0..10).map(|j| u8::from((i + 1) % 10 == j)).collect())
        .collect();
    let analysis = analyze_sheet("Лист4", AdjacencyMatrix::from_rows(rows).unwrap()).unwrap();

    let sizes: Vec<usize> = analysis
        .layout
        .rings()
        .iter()
        .map(|r| r.nodes.len())
        .collect();
    assert_eq!(sizes, vec![4, 3, 3]);
    assert_eq!(analysis.layout.ring(Tier::Outer).radius, 15.0);
}

#[test]
fn two_node_sheet_puts_both_nodes_on_the_central_ring() {
    let analysis = analyze_sheet("Лист5", matrix(&[&[0, 1], &[1, 0]])).unwrap();

    let sizes: Vec<usize> = analysis
        .layout
        .rings()
        .iter()
        .map(|r| r.nodes.len())
        .collect();
    assert_eq!(sizes, vec![2, 0, 0]);
    assert_eq!(analysis.statistics.group.mutual_pairs, 1);
}

#[test]
fn repeated_analysis_is_identical() {
    let rows: &[&[u8]] = &[
        &[0, 1, 1, 0, 0, 1],
        &[1, 0, 0, 0, 1, 0],
        &[0, 1, 0, 1, 0, 0],
        &[0, 0, 1, 0, 1, 1],
        &[1, 0, 0, 0, 0, 0],
        &[0, 1, 0, 1, 0, 0],
    ];
    let a = analyze_sheet("Лист5", matrix(rows)).unwrap();
    let b = analyze_sheet("Лист5", matrix(rows)).unwrap();
    assert_eq!(a.statistics, b.statistics);
    assert_eq!(a.layout, b.layout);
}
