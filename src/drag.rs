//! # Draggable Element Controller
//!
//! Turns pointer gestures into position updates for the Coordinate Model.
//!
//! ## State Machine
//!
//! ```text
//!            pointer-down on element
//!   ┌──────┐ ─────────────────────▶ ┌──────────┐ ◀─┐ pointer-move
//!   │ Idle │                        │ Dragging │ ──┘ (report position)
//!   └──────┘ ◀───────────────────── └──────────┘
//!            pointer-up anywhere
//! ```
//!
//! On entering `Dragging` the element records `anchor = pointer - element`.
//! Every move then reports `pointer - anchor`, recomputed from the current
//! pointer position rather than accumulated from deltas.
//!
//! Move and up events are listened for at the surface, not the element, so
//! the drag keeps tracking after the pointer leaves the element's bounds.
//! That subscription is a [`ListenerGuard`] owned by the `Dragging` state:
//! it is attached on entry and released when the state is dropped.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use crate::layout::{ElementId, ElementPositions, Face, Offset, Position};

/// Duration of the positional ease applied while an element is idle.
pub const IDLE_TRANSITION: Duration = Duration::from_millis(100);

/// Pointer event delivered to a canvas surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PointerEvent {
    /// Pointer pressed on a specific element.
    Down { target: ElementId, x: i32, y: i32 },
    /// Pointer moved anywhere over the surface.
    Move { x: i32, y: i32 },
    /// Pointer released anywhere.
    Up { x: i32, y: i32 },
}

impl PointerEvent {
    pub fn position(&self) -> Position {
        match *self {
            PointerEvent::Down { x, y, .. } | PointerEvent::Move { x, y } | PointerEvent::Up { x, y } => {
                Position::new(x, y)
            }
        }
    }
}

/// How a positional change should be animated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Follow the pointer with no lag.
    None,
    /// Ease externally driven moves (e.g. a reset).
    Ease(Duration),
}

impl Transition {
    /// CSS `transition` value for this mode.
    pub fn css(&self) -> String {
        match self {
            Transition::None => "none".to_string(),
            Transition::Ease(d) => format!("transform {}s ease", d.as_secs_f32()),
        }
    }
}

/// Registry of move/up listener sets attached to a surface.
#[derive(Debug, Clone, Default)]
pub struct PointerListeners {
    attached: Arc<AtomicUsize>,
}

impl PointerListeners {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a move/up listener set, detached when the guard drops.
    pub fn attach(&self) -> ListenerGuard {
        self.attached.fetch_add(1, Ordering::SeqCst);
        ListenerGuard {
            attached: self.attached.clone(),
        }
    }

    /// Number of listener sets currently attached.
    pub fn attached(&self) -> usize {
        self.attached.load(Ordering::SeqCst)
    }
}

/// Scoped subscription to surface-wide move/up events.
#[derive(Debug)]
pub struct ListenerGuard {
    attached: Arc<AtomicUsize>,
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        self.attached.fetch_sub(1, Ordering::SeqCst);
    }
}

#[derive(Debug)]
enum DragState {
    Idle,
    Dragging {
        anchor: Offset,
        _listeners: ListenerGuard,
    },
}

/// Pointer-tracking state for a single element.
#[derive(Debug)]
pub struct DraggableElement {
    id: ElementId,
    state: DragState,
}

impl DraggableElement {
    pub fn new(id: ElementId) -> Self {
        Self {
            id,
            state: DragState::Idle,
        }
    }

    pub fn id(&self) -> ElementId {
        self.id
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    /// Enter `Dragging`, anchoring the pointer relative to the element.
    pub fn pointer_down(&mut self, pointer: Position, element: Position, listeners: &PointerListeners) {
        self.state = DragState::Dragging {
            anchor: pointer - element,
            _listeners: listeners.attach(),
        };
    }

    /// New element position for the given pointer, or `None` when idle.
    pub fn pointer_move(&self, pointer: Position) -> Option<Position> {
        match &self.state {
            DragState::Dragging { anchor, .. } => Some(pointer - *anchor),
            DragState::Idle => None,
        }
    }

    /// Leave `Dragging`; releases the surface listeners.
    pub fn pointer_up(&mut self) {
        self.state = DragState::Idle;
    }

    pub fn transition(&self) -> Transition {
        if self.is_dragging() {
            Transition::None
        } else {
            Transition::Ease(IDLE_TRANSITION)
        }
    }
}

/// One canvas face: its draggable elements plus the shared listener registry.
#[derive(Debug)]
pub struct DragSurface {
    face: Face,
    elements: [DraggableElement; 3],
    listeners: PointerListeners,
}

impl DragSurface {
    pub fn new(face: Face) -> Self {
        Self {
            face,
            elements: face.elements().map(DraggableElement::new),
            listeners: PointerListeners::new(),
        }
    }

    pub fn face(&self) -> Face {
        self.face
    }

    pub fn listeners(&self) -> &PointerListeners {
        &self.listeners
    }

    /// The element currently being dragged, if any.
    pub fn dragging(&self) -> Option<ElementId> {
        self.elements.iter().find(|el| el.is_dragging()).map(|el| el.id())
    }

    pub fn element(&self, id: ElementId) -> Option<&DraggableElement> {
        self.elements.iter().find(|el| el.id() == id)
    }

    /// Route a pointer event, reporting any resulting move through `on_drag`.
    ///
    /// `positions` is read to anchor a new drag; the surface never writes it.
    pub fn handle(
        &mut self,
        event: PointerEvent,
        positions: &ElementPositions,
        mut on_drag: impl FnMut(ElementId, Position),
    ) {
        match event {
            PointerEvent::Down { target, .. } => {
                // A single pointer cannot start a second drag.
                if self.dragging().is_some() {
                    return;
                }
                let current = positions.get(target);
                if let Some(el) = self.elements.iter_mut().find(|el| el.id() == target) {
                    el.pointer_down(event.position(), current, &self.listeners);
                }
            }
            PointerEvent::Move { .. } => {
                for el in &self.elements {
                    if let Some(position) = el.pointer_move(event.position()) {
                        on_drag(el.id(), position);
                    }
                }
            }
            PointerEvent::Up { .. } => {
                for el in &mut self.elements {
                    el.pointer_up();
                }
            }
        }
    }
}
