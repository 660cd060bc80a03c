//! Static per-type node configuration.
//!
//! A node's ports never change shape at runtime; they are derived entirely
//! from the node's type through the table in this module. Geometry that
//! depends on runtime data (heights, expanded widths) lives in
//! [`crate::layout`] instead.

use super::node::NodeType;
use serde::{Deserialize, Serialize};

/// Whether a port emits values (source/output) or receives them
/// (target/input).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PortDirection {
    Source,
    Target,
}

/// The single-level data kind tag carried by a port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataKind {
    Text,
    Image,
    Any,
}

/// A typed connection point on a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Port {
    pub id: &'static str,
    pub label: &'static str,
    pub direction: PortDirection,
    pub kind: DataKind,
}

/// The static shape of one node type: display label, declared ports and
/// base width.
#[derive(Debug, Clone, Copy)]
pub struct NodeSpec {
    pub label: &'static str,
    pub inputs: &'static [Port],
    pub outputs: &'static [Port],
    pub width: f64,
}

const fn input(id: &'static str, label: &'static str, kind: DataKind) -> Port {
    Port {
        id,
        label,
        direction: PortDirection::Target,
        kind,
    }
}

const fn output(id: &'static str, label: &'static str, kind: DataKind) -> Port {
    Port {
        id,
        label,
        direction: PortDirection::Source,
        kind,
    }
}

static TEXT_INPUT: NodeSpec = NodeSpec {
    label: "Text Prompt",
    inputs: &[input("input", "In", DataKind::Text)],
    outputs: &[output("text", "Text", DataKind::Text)],
    width: 320.0,
};

static IMAGE_INPUT: NodeSpec = NodeSpec {
    label: "Image Source",
    inputs: &[],
    outputs: &[output("image", "Image", DataKind::Image)],
    width: 280.0,
};

static ANALYZE_IMAGE: NodeSpec = NodeSpec {
    label: "Analyze Image",
    inputs: &[],
    outputs: &[output("text", "Analysis", DataKind::Text)],
    width: 320.0,
};

static GENERATOR: NodeSpec = NodeSpec {
    label: "Image Output",
    inputs: &[
        input("prompt", "Prompt", DataKind::Text),
        input("refImage", "Ref Image", DataKind::Image),
    ],
    outputs: &[output("output", "Result", DataKind::Image)],
    width: 320.0,
};

static IMAGE_EDIT: NodeSpec = NodeSpec {
    label: "Magic Editor",
    inputs: &[
        input("image", "Image", DataKind::Image),
        input("prompt", "Prompt", DataKind::Text),
    ],
    outputs: &[output("output", "Result", DataKind::Image)],
    width: 400.0,
};

/// Looks up the static configuration for a node type.
pub fn node_spec(node_type: NodeType) -> &'static NodeSpec {
    match node_type {
        NodeType::TextInput => &TEXT_INPUT,
        NodeType::ImageInput => &IMAGE_INPUT,
        NodeType::AnalyzeImage => &ANALYZE_IMAGE,
        NodeType::Generator => &GENERATOR,
        NodeType::ImageEdit => &IMAGE_EDIT,
    }
}
