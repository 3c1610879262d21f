//! Presentation boundary.
//!
//! The engine never touches rendering primitives. It asks a [`Presentation`]
//! to create visual elements for entities, move them between containers,
//! decorate them with attributes, and wire UI handlers to element classes.
//!
//! ## Key Types
//!
//! - [`Presentation`]: the trait a rendering layer implements
//! - [`VisualHandle`]: opaque reference to a visual element
//! - [`UiHandler`] / [`UiEvent`]: callbacks fired by the rendering layer
//! - [`Selection`]: click-selection state owned by the rendering layer
//! - [`ActionRequest`]: an outgoing "perform action" request produced by a
//!   handler
//! - [`ExpectedAction`]: an answer the server is waiting for
//! - [`HeadlessView`]: in-memory implementation used for tests and
//!   non-browser embeddings

mod expected;
mod headless;

pub use expected::{ExpectedAction, SEND_INFORMATION};
pub use headless::{HeadlessView, VisualNode};

use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::core::{EntityId, Value};
use crate::objects::EntityCore;

/// Opaque reference to a visual element owned by the presentation layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VisualHandle(pub u32);

impl std::fmt::Display for VisualHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Visual({})", self.0)
    }
}

/// A request to the server to perform a game action.
///
/// The engine does not interpret actions; it only carries the name and the
/// free-form arguments to the transport.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ActionRequest {
    /// Action name understood by the game on the server.
    pub name: String,
    /// Action arguments.
    pub args: serde_json::Map<String, serde_json::Value>,
}

impl ActionRequest {
    /// Create a request with no arguments.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            args: serde_json::Map::new(),
        }
    }

    /// Add an argument (builder pattern).
    #[must_use]
    pub fn with_arg(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.args.insert(key.into(), value.into());
        self
    }
}

/// Entities currently selected by the player, in selection order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Selection {
    items: Vec<EntityId>,
}

impl Selection {
    /// Create an empty selection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `entity` if absent, remove it if present.
    ///
    /// Returns whether the entity is selected afterwards.
    pub fn toggle(&mut self, entity: EntityId) -> bool {
        if let Some(pos) = self.items.iter().position(|&e| e == entity) {
            self.items.remove(pos);
            false
        } else {
            self.items.push(entity);
            true
        }
    }

    /// Replace the selection with a single entity.
    pub fn select_only(&mut self, entity: EntityId) {
        self.items.clear();
        self.items.push(entity);
    }

    /// Clear the selection.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Check if an entity is selected.
    #[must_use]
    pub fn contains(&self, entity: EntityId) -> bool {
        self.items.contains(&entity)
    }

    /// The first selected entity.
    #[must_use]
    pub fn first(&self) -> Option<EntityId> {
        self.items.first().copied()
    }

    /// All selected entities.
    #[must_use]
    pub fn items(&self) -> &[EntityId] {
        &self.items
    }

    /// Check if nothing is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Snapshot of a visual element handed to UI handlers.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UiTarget {
    /// Entity the element represents, if any.
    pub entity: Option<EntityId>,
    /// CSS-style classes of the element.
    pub classes: Vec<String>,
    /// Visual attributes set on the element.
    pub attributes: Vec<(String, Value)>,
    /// Entities whose elements are children of this one.
    pub members: Vec<EntityId>,
}

impl UiTarget {
    /// Check if the element carries `class`.
    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Get a visual attribute.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&Value> {
        self.attributes.iter().find(|(k, _)| k == name).map(|(_, v)| v)
    }
}

/// A UI event delivered to a handler.
pub struct UiEvent<'a> {
    /// Event name ("click", ...).
    pub name: &'a str,
    /// Element the event fired on.
    pub target: &'a UiTarget,
    /// The target's parent element.
    pub parent: Option<&'a UiTarget>,
    /// Selection state of the presentation layer.
    pub selection: &'a mut Selection,
    /// Answer the server is waiting for, if any.
    pub expected: Option<&'a ExpectedAction>,
    requests: &'a mut Vec<ActionRequest>,
}

impl<'a> UiEvent<'a> {
    /// Create an event. Requests issued by the handler land in `requests`.
    pub fn new(
        name: &'a str,
        target: &'a UiTarget,
        parent: Option<&'a UiTarget>,
        selection: &'a mut Selection,
        requests: &'a mut Vec<ActionRequest>,
    ) -> Self {
        Self {
            name,
            target,
            parent,
            selection,
            expected: None,
            requests,
        }
    }

    /// Attach the pending expected action (builder pattern).
    #[must_use]
    pub fn with_expected(mut self, expected: Option<&'a ExpectedAction>) -> Self {
        self.expected = expected;
        self
    }

    /// Ask the server to perform an action.
    pub fn request(&mut self, action: ActionRequest) {
        self.requests.push(action);
    }
}

/// Callback attached to a class of visual elements.
pub type UiHandler = Rc<dyn Fn(&mut UiEvent<'_>)>;

/// Rendering layer consumed by the engine.
pub trait Presentation {
    /// Create (or locate) the visual element for a freshly built entity.
    ///
    /// Returns `None` for entities that have no visual representation.
    fn create_visual_for(&mut self, entity: &EntityCore) -> Option<VisualHandle>;

    /// Move an element under a container element.
    fn reparent(&mut self, handle: VisualHandle, container: VisualHandle);

    /// Set a visual attribute on an element.
    fn set_visual_attribute(&mut self, handle: VisualHandle, name: &str, value: &Value);

    /// Attach a handler for `event` on every element carrying `class`.
    fn attach_handler(&mut self, class: &str, event: &str, handler: UiHandler);

    /// The server declared the game over. The payload is not interpreted.
    fn game_over(&mut self, _result: &serde_json::Value) {}

    /// The server announced what it expects next, or `None` once it expects
    /// nothing in particular.
    fn expected_action(&mut self, _expected: Option<&ExpectedAction>) {}
}
