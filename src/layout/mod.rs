//! Viewport math and the port layout calculator.
//!
//! Anchors are computed in graph space; rendering applies the viewport
//! transform uniformly to the whole canvas layer afterwards. The height
//! model here is the single source of truth for node sizing: the value
//! used to place output anchors must match the value used to size the
//! rendered node body, or wires visually detach.

use crate::graph::{Node, NodeData, NodeType, Point, PortDirection, node_spec};
use serde::{Deserialize, Serialize};

/// Vertical offset from the node's top edge to the first input row
/// (header plus padding).
const INPUT_START_Y: f64 = 61.0;
/// Offset from an input row's top to the port's vertical center.
const PORT_CENTER_Y: f64 = 7.0;
/// Vertical spacing between stacked port rows.
const ROW_HEIGHT: f64 = 26.0;
/// Distance from the node's bottom edge up to the first output row.
const OUTPUT_BOTTOM_MARGIN: f64 = 40.0;
/// Width of a node while its expanded view is open.
const EXPANDED_WIDTH: f64 = 500.0;

/// The pan/zoom transform applied uniformly to the canvas: translate,
/// then scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub x: f64,
    pub y: f64,
    pub zoom: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            zoom: 1.0,
        }
    }
}

impl Viewport {
    /// Converts raw client coordinates into graph space by inverting the
    /// transform.
    pub fn screen_to_graph(&self, screen: Point) -> Point {
        Point::new((screen.x - self.x) / self.zoom, (screen.y - self.y) / self.zoom)
    }

    /// Converts a graph-space point back into screen space.
    pub fn graph_to_screen(&self, graph: Point) -> Point {
        Point::new(graph.x * self.zoom + self.x, graph.y * self.zoom + self.y)
    }

    pub fn offset(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// One row of the declarative height table: a base height plus an additive
/// delta applied while the node holds a result image.
struct HeightRule {
    base: f64,
    result_image_delta: f64,
}

fn height_rule(node_type: NodeType) -> HeightRule {
    let (base, result_image_delta) = match node_type {
        NodeType::TextInput => (250.0, 0.0),
        NodeType::ImageInput => (230.0, 0.0),
        NodeType::AnalyzeImage => (280.0, 0.0),
        NodeType::Generator => (350.0, 200.0),
        NodeType::ImageEdit => (400.0, 0.0),
    };
    HeightRule {
        base,
        result_image_delta,
    }
}

/// Content-aware height estimate for a node. Generators grow while they
/// display a produced result image.
pub fn node_height(node_type: NodeType, data: &NodeData) -> f64 {
    let rule = height_rule(node_type);
    if data.image_data.is_some() {
        rule.base + rule.result_image_delta
    } else {
        rule.base
    }
}

/// Current width of a node: the type's configured width, or the expanded
/// width while its expanded view is open.
pub fn node_width(node_type: NodeType, data: &NodeData) -> f64 {
    if data.expanded {
        EXPANDED_WIDTH
    } else {
        node_spec(node_type).width
    }
}

/// Computes the graph-space anchor point of one of a node's ports.
///
/// Inputs stack from the header down the left edge in declaration order;
/// outputs stack up from the bottom along the right edge, using the same
/// height estimate the renderer sizes the node body with. An unknown port
/// id falls back to the node origin rather than failing.
pub fn port_anchor(node: &Node, port_id: &str, direction: PortDirection) -> Point {
    let spec = node_spec(node.node_type);
    match direction {
        PortDirection::Target => {
            let index = spec
                .inputs
                .iter()
                .position(|p| p.id == port_id)
                .unwrap_or(0);
            Point::new(
                node.position.x,
                node.position.y + INPUT_START_Y + PORT_CENTER_Y + index as f64 * ROW_HEIGHT,
            )
        }
        PortDirection::Source => {
            let index = spec
                .outputs
                .iter()
                .position(|p| p.id == port_id)
                .unwrap_or(0);
            let height = node_height(node.node_type, &node.data);
            Point::new(
                node.position.x + node_width(node.node_type, &node.data),
                node.position.y + height - OUTPUT_BOTTOM_MARGIN + index as f64 * ROW_HEIGHT,
            )
        }
    }
}
