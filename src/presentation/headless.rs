//! In-memory presentation layer.
//!
//! `HeadlessView` keeps an element tree instead of a document: each entity
//! with a visual representation becomes a node with classes, attributes and
//! a parent. It owns the click-selection state and the pending expected
//! action, and dispatches UI events to attached handlers, collecting the
//! action requests they issue.
//!
//! Tests, benchmarks and embeddings without a browser use it directly; a
//! browser embedding implements [`Presentation`] over the DOM instead.

use rustc_hash::FxHashMap;

use super::{
    ActionRequest, ExpectedAction, Presentation, Selection, UiEvent, UiHandler, UiTarget,
    VisualHandle,
};
use crate::core::{EntityId, EntityKind, Value};
use crate::objects::EntityCore;

/// A visual element in the headless tree.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VisualNode {
    /// Entity represented by this node.
    pub entity: Option<EntityId>,
    /// Element classes.
    pub classes: Vec<String>,
    /// Visual attributes.
    pub attributes: FxHashMap<String, Value>,
    /// Parent element.
    pub parent: Option<VisualHandle>,
    /// Child elements, in insertion order.
    pub children: Vec<VisualHandle>,
}

struct Binding {
    class: String,
    event: String,
    handler: UiHandler,
}

/// Headless [`Presentation`] implementation.
///
/// ## Example
///
/// ```
/// use deckr_client::core::{EntityId, EntityKind, Value};
/// use deckr_client::objects::EntityCore;
/// use deckr_client::presentation::{HeadlessView, Presentation};
///
/// let mut view = HeadlessView::new();
/// let card = EntityCore::new(EntityId(3), EntityKind::Card, Default::default());
/// let handle = view.create_visual_for(&card).unwrap();
///
/// view.set_visual_attribute(handle, "src", &Value::from("/cards/back.png"));
/// assert_eq!(view.handle_for(EntityId(3)), Some(handle));
/// assert_eq!(view.attribute(handle, "src"), Some(&Value::from("/cards/back.png")));
/// ```
#[derive(Default)]
pub struct HeadlessView {
    nodes: Vec<VisualNode>,
    by_entity: FxHashMap<EntityId, VisualHandle>,
    bindings: Vec<Binding>,
    selection: Selection,
    expected: Option<ExpectedAction>,
    attribute_writes: FxHashMap<(VisualHandle, String), usize>,
    reparents: usize,
    refreshes: usize,
    game_result: Option<serde_json::Value>,
}

impl HeadlessView {
    /// Create an empty view.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a node.
    #[must_use]
    pub fn node(&self, handle: VisualHandle) -> Option<&VisualNode> {
        self.nodes.get(handle.0 as usize)
    }

    /// Handle of the element created for an entity.
    #[must_use]
    pub fn handle_for(&self, entity: EntityId) -> Option<VisualHandle> {
        self.by_entity.get(&entity).copied()
    }

    /// Get a visual attribute.
    #[must_use]
    pub fn attribute(&self, handle: VisualHandle, name: &str) -> Option<&Value> {
        self.node(handle)?.attributes.get(name)
    }

    /// Parent element of an entity's element.
    #[must_use]
    pub fn parent_entity(&self, entity: EntityId) -> Option<EntityId> {
        let handle = self.handle_for(entity)?;
        let parent = self.node(handle)?.parent?;
        self.node(parent)?.entity
    }

    /// Entities whose elements sit under an entity's element, in order.
    #[must_use]
    pub fn child_entities(&self, entity: EntityId) -> Vec<EntityId> {
        self.handle_for(entity)
            .and_then(|h| self.node(h))
            .map(|node| {
                node.children
                    .iter()
                    .filter_map(|&c| self.node(c).and_then(|n| n.entity))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// How many times `name` was written on `handle`.
    #[must_use]
    pub fn attribute_writes(&self, handle: VisualHandle, name: &str) -> usize {
        self.attribute_writes
            .get(&(handle, name.to_string()))
            .copied()
            .unwrap_or(0)
    }

    /// Total number of reparent calls.
    #[must_use]
    pub fn reparent_count(&self) -> usize {
        self.reparents
    }

    /// Record a re-render. Post-update hooks call this.
    pub fn refresh(&mut self) {
        self.refreshes += 1;
    }

    /// Number of re-renders recorded.
    #[must_use]
    pub fn refreshes(&self) -> usize {
        self.refreshes
    }

    /// Result payload delivered by `game_over`.
    #[must_use]
    pub fn game_result(&self) -> Option<&serde_json::Value> {
        self.game_result.as_ref()
    }

    /// Number of attached handlers.
    #[must_use]
    pub fn handler_count(&self) -> usize {
        self.bindings.len()
    }

    /// Current selection.
    #[must_use]
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Mutable selection.
    pub fn selection_mut(&mut self) -> &mut Selection {
        &mut self.selection
    }

    /// Pending expected action.
    #[must_use]
    pub fn expected(&self) -> Option<&ExpectedAction> {
        self.expected.as_ref()
    }

    /// Fire `event` on an element and return the action requests issued by
    /// the matching handlers.
    pub fn fire(&mut self, event: &str, handle: VisualHandle) -> Vec<ActionRequest> {
        let Some(target) = self.ui_target(handle) else {
            return Vec::new();
        };
        let parent = self
            .node(handle)
            .and_then(|n| n.parent)
            .and_then(|p| self.ui_target(p));

        let handlers: Vec<UiHandler> = self
            .bindings
            .iter()
            .filter(|b| b.event == event && target.has_class(&b.class))
            .map(|b| b.handler.clone())
            .collect();

        let mut requests = Vec::new();
        for handler in handlers {
            let mut ui_event = UiEvent::new(
                event,
                &target,
                parent.as_ref(),
                &mut self.selection,
                &mut requests,
            )
            .with_expected(self.expected.as_ref());
            handler(&mut ui_event);
        }
        requests
    }

    /// Fire `event` on the element of an entity.
    pub fn fire_entity(&mut self, event: &str, entity: EntityId) -> Vec<ActionRequest> {
        match self.handle_for(entity) {
            Some(handle) => self.fire(event, handle),
            None => {
                log::debug!("no visual for {entity}, dropping `{event}`");
                Vec::new()
            }
        }
    }

    fn ui_target(&self, handle: VisualHandle) -> Option<UiTarget> {
        let node = self.node(handle)?;
        let mut attributes: Vec<(String, Value)> = node
            .attributes
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        attributes.sort_by(|a, b| a.0.cmp(&b.0));

        Some(UiTarget {
            entity: node.entity,
            classes: node.classes.clone(),
            attributes,
            members: node
                .children
                .iter()
                .filter_map(|&c| self.node(c).and_then(|n| n.entity))
                .collect(),
        })
    }

    fn classes_for(entity: &EntityCore) -> Option<Vec<String>> {
        match &entity.kind {
            EntityKind::Player | EntityKind::Game => None,
            EntityKind::Card => Some(vec!["card".to_string()]),
            EntityKind::Zone => {
                let mut classes = vec!["zone".to_string()];
                if let Some(name) = entity.get("name").and_then(Value::as_text) {
                    classes.push(name.to_string());
                }
                Some(classes)
            }
            EntityKind::Other(tag) => Some(vec![tag.to_lowercase()]),
        }
    }
}

impl Presentation for HeadlessView {
    fn create_visual_for(&mut self, entity: &EntityCore) -> Option<VisualHandle> {
        let classes = Self::classes_for(entity)?;
        let handle = VisualHandle(self.nodes.len() as u32);
        self.nodes.push(VisualNode {
            entity: Some(entity.id),
            classes,
            ..VisualNode::default()
        });
        self.by_entity.insert(entity.id, handle);
        Some(handle)
    }

    fn reparent(&mut self, handle: VisualHandle, container: VisualHandle) {
        if self.node(handle).is_none() || self.node(container).is_none() {
            log::warn!("reparent of {handle} into {container}: unknown element");
            return;
        }
        self.reparents += 1;

        // Detach from the previous parent element, as appending a node does.
        if let Some(old) = self.nodes[handle.0 as usize].parent.take() {
            self.nodes[old.0 as usize].children.retain(|&c| c != handle);
        }
        self.nodes[handle.0 as usize].parent = Some(container);
        self.nodes[container.0 as usize].children.push(handle);
    }

    fn set_visual_attribute(&mut self, handle: VisualHandle, name: &str, value: &Value) {
        let Some(node) = self.nodes.get_mut(handle.0 as usize) else {
            log::warn!("attribute `{name}` set on unknown element {handle}");
            return;
        };
        node.attributes.insert(name.to_string(), value.clone());
        *self
            .attribute_writes
            .entry((handle, name.to_string()))
            .or_default() += 1;
    }

    fn attach_handler(&mut self, class: &str, event: &str, handler: UiHandler) {
        self.bindings.push(Binding {
            class: class.trim_start_matches('.').to_string(),
            event: event.to_string(),
            handler,
        });
    }

    fn game_over(&mut self, result: &serde_json::Value) {
        self.game_result = Some(result.clone());
    }

    fn expected_action(&mut self, expected: Option<&ExpectedAction>) {
        // A new question starts from an empty selection.
        if expected.is_some() {
            self.selection.clear();
        }
        self.expected = expected.cloned();
    }
}
