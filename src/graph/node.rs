use serde::{Deserialize, Serialize};
use std::fmt;

/// A 2D point in either graph space or screen space, depending on context.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl std::ops::Add for Point {
    type Output = Point;
    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl std::ops::Sub for Point {
    type Output = Point;
    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// The five node kinds a canvas can hold. A node's ports and base geometry
/// are wholly determined by its type (see [`crate::graph::config::node_spec`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NodeType {
    TextInput,
    ImageInput,
    AnalyzeImage,
    Generator,
    ImageEdit,
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NodeType::TextInput => "TextInput",
            NodeType::ImageInput => "ImageInput",
            NodeType::AnalyzeImage => "AnalyzeImage",
            NodeType::Generator => "Generator",
            NodeType::ImageEdit => "ImageEdit",
        };
        write!(f, "{}", name)
    }
}

/// An opaque encoded image blob (the engine never inspects the encoding).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImagePayload(pub String);

impl ImagePayload {
    pub fn new(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }
}

/// The structured breakdown of a prompt produced by image analysis.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StructuredPrompt {
    pub subject: String,
    pub background: String,
    pub image_type: String,
    pub style: String,
    pub texture: String,
    pub color_palette: String,
    pub lighting: String,
    pub additional_details: String,
}

/// Which editing tab a text node shows (plain text or the structured form).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PromptTab {
    Text,
    Json,
}

/// The open, type-dependent data bag carried by every node.
///
/// Which fields are meaningful depends on the node type: text nodes use
/// `value`/`json_value`, image-bearing nodes use `image_data`/`mask_data`,
/// and `is_processing`/`error` are transient run state written by the
/// resolver. Unknown-to-a-type fields are simply ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NodeData {
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub json_value: Option<StructuredPrompt>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active_tab: Option<PromptTab>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_data: Option<ImagePayload>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mask_data: Option<ImagePayload>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brush_size: Option<u32>,
    pub is_processing: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aspect_ratio: Option<String>,
    pub expanded: bool,
}

/// A typed unit of the graph: an id, a type tag, a position in graph space
/// and its data bag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub id: String,
    #[serde(rename = "type")]
    pub node_type: NodeType,
    pub position: Point,
    pub data: NodeData,
}
