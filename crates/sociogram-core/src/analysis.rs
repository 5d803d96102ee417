use std::time::Instant;

use sociogram_error::Result;
use tracing::{debug, info, info_span};

use crate::graph::DirectedGraph;
use crate::layout::TierLayout;
use crate::matrix::AdjacencyMatrix;
use crate::stats::{SheetStatistics, compute_statistics};

/// Everything computed for one worksheet.
#[derive(Debug, Clone)]
pub struct SheetAnalysis {
    pub label: String,
    pub matrix: AdjacencyMatrix,
    pub graph: DirectedGraph,
    pub layout: TierLayout,
    pub statistics: SheetStatistics,
}

/// Build the graph and tier layout and compute the statistics of one sheet.
///
/// Layout and statistics do not depend on each other; a statistics failure
/// (e.g. an empty graph) fails the whole sheet.
pub fn analyze_sheet(label: &str, matrix: AdjacencyMatrix) -> Result<SheetAnalysis> {
    let _span = info_span!("analyze_sheet", sheet = label).entered();
    let start = Instant::now();

    let graph = DirectedGraph::from_matrix(&matrix);
    let layout = TierLayout::compute(&graph);
    for ring in layout.rings() {
        debug!(tier = %ring.tier, radius = ring.radius, nodes = ring.nodes.len(), "tier");
    }

    let statistics = compute_statistics(&matrix).map_err(|e| e.with_context("sheet", label))?;

    info!(
        nodes = graph.node_count(),
        links = graph.edge_count(),
        "Sheet analysis: {:.3}s",
        start.elapsed().as_secs_f64()
    );

    Ok(SheetAnalysis {
        label: label.to_string(),
        matrix,
        graph,
        layout,
        statistics,
    })
}
