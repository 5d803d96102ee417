//! Raster picture of the tier layout.
//!
//! The canvas is 6.4 x 4.8 inches at 100 DPI. The world is centred on the
//! origin with equal x/y scale and always shows the outer ring in full.

use sociogram_core::{DirectedGraph, NodeId, Point, TierLayout};
use sociogram_error::{Error, Result};
use tiny_skia::{
    Color, FillRule, Paint, PathBuilder, Pixmap, Rect, Stroke, StrokeDash, Transform,
};
use tracing::debug;

use crate::GraphRenderer;
use crate::glyph::{GLYPH_HEIGHT, text_cells, text_width};

pub const DPI: u32 = 100;

#[derive(Debug, Clone)]
pub struct PngStyle {
    pub width: u32,
    pub height: u32,
    /// Empty world units kept around the outer ring.
    pub margin: f64,
    pub node_radius: f32,
    pub node_fill: [u8; 3],
    pub outline_width: f32,
    pub edge_width: f32,
    pub arrow_length: f32,
    pub arrow_half_width: f32,
    pub ring_width: f32,
    pub ring_dash: [f32; 2],
    /// Side of one label font cell in whole pixels.
    pub label_cell: u32,
}

impl Default for PngStyle {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            margin: 1.5,
            node_radius: 7.0,
            node_fill: [135, 206, 235],
            outline_width: 0.7,
            edge_width: 0.4,
            arrow_length: 5.0,
            arrow_half_width: 2.0,
            ring_width: 0.7,
            ring_dash: [5.0, 3.0],
            label_cell: 2,
        }
    }
}

/// Maps world coordinates (y up) to pixels (y down).
#[derive(Debug, Clone, Copy)]
struct Viewport {
    cx: f64,
    cy: f64,
    scale: f64,
}

impl Viewport {
    fn fit(style: &PngStyle, world_radius: f64) -> Self {
        let extent = 2.0 * (world_radius + style.margin);
        let scale = f64::from(style.width.min(style.height)) / extent;
        Self {
            cx: f64::from(style.width) / 2.0,
            cy: f64::from(style.height) / 2.0,
            scale,
        }
    }

    fn to_pixel(self, p: Point) -> (f32, f32) {
        (
            (self.cx + p.x * self.scale) as f32,
            (self.cy - p.y * self.scale) as f32,
        )
    }
}

fn paint_rgb(rgb: [u8; 3]) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color_rgba8(rgb[0], rgb[1], rgb[2], 255);
    paint.anti_alias = true;
    paint
}

/// Renders nodes, links, tier rings, and node labels to PNG.
#[derive(Debug, Clone, Default)]
pub struct PngRenderer {
    pub style: PngStyle,
}

impl PngRenderer {
    pub fn new(style: PngStyle) -> Self {
        Self { style }
    }

    /// Draw into a fresh pixmap.
    pub fn draw(&self, graph: &DirectedGraph, layout: &TierLayout) -> Result<Pixmap> {
        let style = &self.style;
        let mut pixmap = Pixmap::new(style.width, style.height).ok_or_else(|| {
            Error::render_failed(format!(
                "cannot allocate {}x{} canvas",
                style.width, style.height
            ))
            .with_operation("png::draw")
        })?;
        pixmap.fill(Color::WHITE);

        let view = Viewport::fit(style, layout.bounding_radius());
        let black = paint_rgb([0, 0, 0]);

        self.draw_edges(&mut pixmap, graph, layout, view, &black);
        self.draw_nodes(&mut pixmap, layout, view, &black);
        self.draw_rings(&mut pixmap, layout, view, &black);
        self.draw_labels(&mut pixmap, layout, view);

        Ok(pixmap)
    }

    fn draw_edges(
        &self,
        pixmap: &mut Pixmap,
        graph: &DirectedGraph,
        layout: &TierLayout,
        view: Viewport,
        paint: &Paint,
    ) {
        let style = &self.style;
        let stroke = Stroke {
            width: style.edge_width,
            ..Stroke::default()
        };

        for edge in graph.edges() {
            let (Some(from), Some(to)) = (layout.position(edge.from), layout.position(edge.to))
            else {
                continue;
            };
            let (x0, y0) = view.to_pixel(from);
            let (x1, y1) = view.to_pixel(to);
            let (dx, dy) = (x1 - x0, y1 - y0);
            let len = dx.hypot(dy);
            // self-loops and overlapping nodes have no direction to draw
            if len <= 2.0 * style.node_radius {
                continue;
            }
            let (ux, uy) = (dx / len, dy / len);

            // stop at the rim of the target disc
            let tip = (x1 - ux * style.node_radius, y1 - uy * style.node_radius);
            let base = (tip.0 - ux * style.arrow_length, tip.1 - uy * style.arrow_length);

            let mut pb = PathBuilder::new();
            pb.move_to(x0 + ux * style.node_radius, y0 + uy * style.node_radius);
            pb.line_to(base.0, base.1);
            if let Some(path) = pb.finish() {
                pixmap.stroke_path(&path, paint, &stroke, Transform::identity(), None);
            }

            let (nx, ny) = (-uy * style.arrow_half_width, ux * style.arrow_half_width);
            let mut pb = PathBuilder::new();
            pb.move_to(tip.0, tip.1);
            pb.line_to(base.0 + nx, base.1 + ny);
            pb.line_to(base.0 - nx, base.1 - ny);
            pb.close();
            if let Some(path) = pb.finish() {
                pixmap.fill_path(&path, paint, FillRule::Winding, Transform::identity(), None);
            }
        }
    }

    fn draw_nodes(&self, pixmap: &mut Pixmap, layout: &TierLayout, view: Viewport, outline: &Paint) {
        let style = &self.style;
        let fill = paint_rgb(style.node_fill);
        let stroke = Stroke {
            width: style.outline_width,
            ..Stroke::default()
        };

        for ring in layout.rings() {
            for &node in &ring.nodes {
                let Some(point) = layout.position(node) else {
                    continue;
                };
                let (x, y) = view.to_pixel(point);
                let Some(disc) = PathBuilder::from_circle(x, y, style.node_radius) else {
                    continue;
                };
                pixmap.fill_path(&disc, &fill, FillRule::Winding, Transform::identity(), None);
                pixmap.stroke_path(&disc, outline, &stroke, Transform::identity(), None);
            }
        }
    }

    fn draw_rings(&self, pixmap: &mut Pixmap, layout: &TierLayout, view: Viewport, paint: &Paint) {
        let style = &self.style;
        let stroke = Stroke {
            width: style.ring_width,
            dash: StrokeDash::new(style.ring_dash.to_vec(), 0.0),
            ..Stroke::default()
        };
        let (cx, cy) = view.to_pixel(Point { x: 0.0, y: 0.0 });

        // rings are drawn for every tier, including empty ones
        for ring in layout.rings() {
            let radius = (ring.radius * view.scale) as f32;
            if let Some(circle) = PathBuilder::from_circle(cx, cy, radius) {
                pixmap.stroke_path(&circle, paint, &stroke, Transform::identity(), None);
            }
        }
    }

    fn draw_labels(&self, pixmap: &mut Pixmap, layout: &TierLayout, view: Viewport) {
        // glyph cells are pixel-aligned squares; tiny-skia's anti-aliased rect
        // fill rejects sub-pixel rects
        let mut paint = paint_rgb([0, 0, 0]);
        paint.anti_alias = false;
        for (&node, &point) in layout.positions() {
            let (x, y) = view.to_pixel(point);
            self.draw_label(pixmap, node, x, y, &paint);
        }
    }

    /// Top-left pixel of the label text centred on `(x, y)`.
    fn label_origin(&self, text: &str, x: f32, y: f32) -> (f32, f32) {
        let cell = self.style.label_cell as f32;
        let left = (x - text_width(text) as f32 * cell / 2.0).round();
        let top = (y - GLYPH_HEIGHT as f32 * cell / 2.0).round();
        (left, top)
    }

    fn draw_label(&self, pixmap: &mut Pixmap, node: NodeId, x: f32, y: f32, paint: &Paint) {
        let cell = self.style.label_cell as f32;
        let text = node.to_string();
        let (left, top) = self.label_origin(&text, x, y);
        for (col, row) in text_cells(&text) {
            if let Some(rect) =
                Rect::from_xywh(left + col as f32 * cell, top + row as f32 * cell, cell, cell)
            {
                pixmap.fill_rect(rect, paint, Transform::identity(), None);
            }
        }
    }
}

impl GraphRenderer for PngRenderer {
    fn extension(&self) -> &'static str {
        "png"
    }

    fn render(&self, graph: &DirectedGraph, layout: &TierLayout) -> Result<Vec<u8>> {
        let pixmap = self.draw(graph, layout)?;
        let bytes = pixmap.encode_png().map_err(|e| {
            Error::render_failed(format!("png encoding failed: {}", e))
                .with_operation("png::render")
        })?;
        debug!(
            width = self.style.width,
            height = self.style.height,
            bytes = bytes.len(),
            "png rendered"
        );
        Ok(bytes)
    }
}
