//! Radial "influence" layout.
//!
//! Nodes are ranked by in-degree and cut into three concentric tiers. The
//! most-followed nodes sit on the inner ring, the least-followed on the outer
//! one, and each ring spreads its members evenly around the full circle.

use std::collections::BTreeMap;
use std::f64::consts::TAU;

use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter};

use crate::graph::DirectedGraph;
use crate::matrix::NodeId;

/// Distance between consecutive tier rings.
pub const RING_SPACING: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIter, Display)]
#[strum(serialize_all = "snake_case")]
pub enum Tier {
    Central,
    Middle,
    Outer,
}

impl Tier {
    /// 0 for central, 1 for middle, 2 for outer.
    pub fn ordinal(self) -> usize {
        self as usize
    }

    pub fn radius(self) -> f64 {
        (self.ordinal() + 1) as f64 * RING_SPACING
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn on_circle(radius: f64, angle: f64) -> Self {
        Self {
            x: radius * angle.cos(),
            y: radius * angle.sin(),
        }
    }

    /// Distance from the origin.
    pub fn norm(&self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Polar angle in `[0, 2π)`.
    pub fn angle(&self) -> f64 {
        self.y.atan2(self.x).rem_euclid(TAU)
    }
}

/// One ring of the layout and the nodes placed on it, in placement order.
#[derive(Debug, Clone, PartialEq)]
pub struct TierRing {
    pub tier: Tier,
    pub radius: f64,
    pub nodes: Vec<NodeId>,
}

/// Tier sizes `[central, middle, outer]` for `n` nodes.
///
/// Each tier gets `n / 3` nodes and the central tier also takes the
/// remainder, so 10 nodes split as 4/3/3 and 2 nodes as 2/0/0.
pub fn partition_sizes(n: usize) -> [usize; 3] {
    let base = n / 3;
    let rem = n % 3;
    [base + rem, base, base]
}

/// Node ids sorted by in-degree, highest first.
///
/// The sort is stable, so nodes with equal in-degree keep ascending id order.
pub fn rank_by_in_degree(graph: &DirectedGraph) -> Vec<NodeId> {
    let mut ranked: Vec<(NodeId, usize)> = graph.in_degrees().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked.into_iter().map(|(node, _)| node).collect()
}

/// Tier membership and 2D position of every node in a graph.
#[derive(Debug, Clone, PartialEq)]
pub struct TierLayout {
    rings: Vec<TierRing>,
    positions: BTreeMap<NodeId, Point>,
}

impl TierLayout {
    pub fn compute(graph: &DirectedGraph) -> Self {
        let ranked = rank_by_in_degree(graph);
        let sizes = partition_sizes(ranked.len());

        let mut rings = Vec::with_capacity(sizes.len());
        let mut positions = BTreeMap::new();
        let mut rest = ranked.as_slice();

        for (tier, size) in Tier::iter().zip(sizes) {
            let (members, tail) = rest.split_at(size);
            rest = tail;

            let radius = tier.radius();
            for (slot, &node) in members.iter().enumerate() {
                let angle = TAU * slot as f64 / size as f64;
                positions.insert(node, Point::on_circle(radius, angle));
            }

            rings.push(TierRing {
                tier,
                radius,
                nodes: members.to_vec(),
            });
        }

        Self { rings, positions }
    }

    /// The three rings, central first. Rings may be empty.
    pub fn rings(&self) -> &[TierRing] {
        &self.rings
    }

    pub fn ring(&self, tier: Tier) -> &TierRing {
        &self.rings[tier.ordinal()]
    }

    pub fn positions(&self) -> &BTreeMap<NodeId, Point> {
        &self.positions
    }

    pub fn position(&self, node: NodeId) -> Option<Point> {
        self.positions.get(&node).copied()
    }

    pub fn tier_of(&self, node: NodeId) -> Option<Tier> {
        self.rings
            .iter()
            .find(|ring| ring.nodes.contains(&node))
            .map(|ring| ring.tier)
    }

    /// Radius of the outermost ring, whether or not it has members.
    pub fn bounding_radius(&self) -> f64 {
        Tier::Outer.radius()
    }
}
