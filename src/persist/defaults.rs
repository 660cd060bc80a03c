//! The starter workflow library seeded on first read.

use super::{GraphFragment, WorkflowTemplate, now_millis};
use crate::graph::{Edge, Node, NodeData, NodeType, Point};

/// The two default templates every fresh library starts with. They are
/// marked `is_default` and cannot be deleted by the user. Their internal
/// ids are placeholders; instantiation always remaps them.
pub fn default_templates() -> Vec<WorkflowTemplate> {
    vec![
        WorkflowTemplate {
            id: "def-workflow-1".to_string(),
            name: "Simple Text-to-Image".to_string(),
            description: Some("Basic generation setup".to_string()),
            content: GraphFragment {
                nodes: vec![
                    Node {
                        id: "temp-1".to_string(),
                        node_type: NodeType::TextInput,
                        position: Point::new(0.0, 0.0),
                        data: NodeData {
                            label: "Text Prompt".to_string(),
                            value: Some("An astronaut riding a horse on Mars".to_string()),
                            ..NodeData::default()
                        },
                    },
                    Node {
                        id: "temp-2".to_string(),
                        node_type: NodeType::Generator,
                        position: Point::new(350.0, 0.0),
                        data: NodeData {
                            label: "Image Output".to_string(),
                            aspect_ratio: Some("1:1".to_string()),
                            ..NodeData::default()
                        },
                    },
                ],
                edges: vec![Edge {
                    id: "temp-e1".to_string(),
                    source: "temp-1".to_string(),
                    source_handle: "text".to_string(),
                    target: "temp-2".to_string(),
                    target_handle: "prompt".to_string(),
                }],
            },
            timestamp: now_millis(),
            is_default: true,
        },
        WorkflowTemplate {
            id: "def-workflow-2".to_string(),
            name: "Image Variation".to_string(),
            description: Some("Image input to generator".to_string()),
            content: GraphFragment {
                nodes: vec![
                    Node {
                        id: "temp-3".to_string(),
                        node_type: NodeType::ImageInput,
                        position: Point::new(0.0, 0.0),
                        data: NodeData {
                            label: "Source Image".to_string(),
                            ..NodeData::default()
                        },
                    },
                    Node {
                        id: "temp-4".to_string(),
                        node_type: NodeType::Generator,
                        position: Point::new(350.0, 0.0),
                        data: NodeData {
                            label: "Variation Output".to_string(),
                            aspect_ratio: Some("1:1".to_string()),
                            ..NodeData::default()
                        },
                    },
                ],
                edges: vec![Edge {
                    id: "temp-e2".to_string(),
                    source: "temp-3".to_string(),
                    source_handle: "image".to_string(),
                    target: "temp-4".to_string(),
                    target_handle: "refImage".to_string(),
                }],
            },
            timestamp: now_millis(),
            is_default: true,
        },
    ]
}
