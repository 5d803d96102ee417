pub mod analysis;
pub mod graph;
pub mod layout;
pub mod matrix;
pub mod stats;

pub use analysis::{SheetAnalysis, analyze_sheet};
pub use graph::{DirectedGraph, Edge};
pub use layout::{Point, Tier, TierLayout, TierRing, partition_sizes, rank_by_in_degree};
pub use matrix::{AdjacencyMatrix, NodeId};
pub use sociogram_error::{Error, ErrorKind, Result};
pub use stats::{
    ControlRatio, GroupStatistics, NodeStatistics, SheetStatistics, compute_statistics, round_to,
};
