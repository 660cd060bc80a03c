//! The pointer-driven interaction state machine.
//!
//! One gesture is active at a time. The sum type makes illegal
//! combinations (panning while dragging a node, two simultaneous wires)
//! unrepresentable instead of merely untriggered. Hit-testing is the
//! consumer's job: the controller receives a [`PointerTarget`] describing
//! what the pointer went down or up on, and trusts that ids in it came
//! from a live hit-test.

use crate::graph::{GraphStore, Point, PortDirection};
use crate::layout::{Viewport, port_anchor};

/// What the consumer's hit-test found under the pointer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PointerTarget {
    /// Empty canvas background.
    Canvas,
    /// A node's body, excluding its ports.
    NodeBody(String),
    /// A specific port on a node.
    Port {
        node: String,
        port: String,
        direction: PortDirection,
    },
}

/// The single active gesture, if any.
#[derive(Debug, Clone, PartialEq)]
pub enum InteractionState {
    Idle,
    /// Canvas pan; `grab` is the screen point minus the viewport offset at
    /// gesture start, so moves translate directly to new offsets.
    Panning { grab: Point },
    /// Node drag; `grab_offset` is the graph-space distance from pointer to
    /// node origin at gesture start, so the node does not jump to the
    /// pointer.
    DraggingNode { id: String, grab_offset: Point },
    /// Wire drag from a source port; `start` is the fixed anchor,
    /// `current` follows the pointer in graph space.
    DraggingWire {
        source: String,
        source_handle: String,
        start: Point,
        current: Point,
    },
}

/// Layers the gesture machine and the viewport over a [`GraphStore`].
#[derive(Debug, Clone, PartialEq)]
pub struct CanvasController {
    pub viewport: Viewport,
    state: InteractionState,
    selected: Option<String>,
}

impl Default for CanvasController {
    fn default() -> Self {
        Self::new()
    }
}

impl CanvasController {
    pub fn new() -> Self {
        Self {
            viewport: Viewport::default(),
            state: InteractionState::Idle,
            selected: None,
        }
    }

    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Drops any in-flight gesture and the selection. Called when a session
    /// load replaces the graph out from under the controller.
    pub fn reset(&mut self) {
        self.state = InteractionState::Idle;
        self.selected = None;
    }

    /// Begins a gesture. Ignored while another gesture is active; the
    /// current one must resolve through [`pointer_up`](Self::pointer_up)
    /// first.
    pub fn pointer_down(&mut self, target: PointerTarget, screen: Point, store: &GraphStore) {
        if self.state != InteractionState::Idle {
            return;
        }
        match target {
            PointerTarget::Canvas => {
                self.selected = None;
                self.state = InteractionState::Panning {
                    grab: screen - self.viewport.offset(),
                };
            }
            PointerTarget::NodeBody(id) => {
                let Some(node) = store.node(&id) else { return };
                let pointer = self.viewport.screen_to_graph(screen);
                self.selected = Some(id.clone());
                self.state = InteractionState::DraggingNode {
                    id,
                    grab_offset: pointer - node.position,
                };
            }
            PointerTarget::Port {
                node,
                port,
                direction: PortDirection::Source,
            } => {
                let Some(source) = store.node(&node) else { return };
                let start = port_anchor(source, &port, PortDirection::Source);
                self.state = InteractionState::DraggingWire {
                    source: node,
                    source_handle: port,
                    start,
                    current: start,
                };
            }
            // Target ports only receive wires; they cannot start one.
            PointerTarget::Port {
                direction: PortDirection::Target,
                ..
            } => {}
        }
    }

    /// Advances the active gesture. Conversion to graph space always uses
    /// the current viewport transform, so panning or zooming mid-drag does
    /// not desynchronize the dragged element from the pointer.
    pub fn pointer_move(&mut self, screen: Point, store: &mut GraphStore) {
        match &mut self.state {
            InteractionState::Idle => {}
            InteractionState::Panning { grab } => {
                self.viewport.x = screen.x - grab.x;
                self.viewport.y = screen.y - grab.y;
            }
            InteractionState::DraggingNode { id, grab_offset } => {
                let pointer = self.viewport.screen_to_graph(screen);
                if let Some(node) = store.node_mut(id) {
                    node.position = pointer - *grab_offset;
                }
            }
            InteractionState::DraggingWire { current, .. } => {
                *current = self.viewport.screen_to_graph(screen);
            }
        }
    }

    /// Ends the active gesture, always returning to `Idle`.
    ///
    /// A wire released over a target-direction port on a different node
    /// commits the connection through [`GraphStore::add_edge`] (which
    /// enforces replace-on-occupied and self-loop rejection); anything
    /// else discards the pending wire with no mutation. Returns the
    /// committed edge id, if one was made.
    pub fn pointer_up(&mut self, target: PointerTarget, store: &mut GraphStore) -> Option<String> {
        let finished = std::mem::replace(&mut self.state, InteractionState::Idle);
        if let InteractionState::DraggingWire {
            source,
            source_handle,
            ..
        } = finished
        {
            if let PointerTarget::Port {
                node,
                port,
                direction: PortDirection::Target,
            } = target
            {
                if node != source {
                    return store.add_edge(&source, &source_handle, &node, &port);
                }
            }
        }
        None
    }
}
