//! Rendering of a tiered network layout.
//!
//! # Module Structure
//!
//! - [`png`]: raster picture with rings, links, and node labels
//! - [`dot`]: Graphviz DOT text with pinned node positions
//! - [`glyph`]: the tiny digit font used for labels in the raster picture

pub mod dot;
pub mod glyph;
pub mod png;

use sociogram_core::{DirectedGraph, TierLayout};
use sociogram_error::Result;

pub use dot::{DotBuilder, DotRenderer};
pub use png::{PngRenderer, PngStyle};

/// Turns a graph and its tier layout into the bytes of an output file.
pub trait GraphRenderer {
    /// File extension of the produced format, without the dot.
    fn extension(&self) -> &'static str;

    fn render(&self, graph: &DirectedGraph, layout: &TierLayout) -> Result<Vec<u8>>;
}
