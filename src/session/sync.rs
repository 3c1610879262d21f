//! The synchronization session.

use crate::core::{EntityId, SessionConfig, SyncError, SyncResult};
use crate::objects::{BuildContext, EntityDescriptor, GameObject, ObjectFactory, ObjectRegistry};
use crate::presentation::{Presentation, UiHandler};
use crate::transitions::{ExtensionTransition, Transition};

use super::callbacks::{CallbackKey, CallbackTable};

/// Lifecycle of a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    /// No snapshot applied yet.
    Uninitialized,
    /// The object graph is built; transitions apply.
    Populated,
}

/// Runs once after a snapshot and once after every non-empty batch.
pub type PostUpdateHook<P> = Box<dyn FnMut(&ObjectRegistry, &mut P)>;

/// Receives transitions whose tag the engine does not interpret.
pub type ExtensionHook<P> = Box<dyn FnMut(&ExtensionTransition, &mut ObjectRegistry, &mut P)>;

/// Outcome of [`Session::load_snapshot`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SnapshotReport {
    /// Objects built and registered.
    pub registered: usize,
    /// Descriptors that produced no object.
    pub skipped: usize,
    /// UI handlers attached to the view.
    pub handlers: usize,
}

/// Outcome of [`Session::apply_transitions`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BatchReport {
    /// Transitions applied (a `Remove` counts as applied).
    pub applied: usize,
    /// Transitions skipped because they could not be resolved.
    pub skipped: usize,
    /// Extension transitions handed to the extension hook.
    pub forwarded: usize,
}

impl BatchReport {
    /// Total transitions seen.
    #[must_use]
    pub fn total(&self) -> usize {
        self.applied + self.skipped + self.forwarded
    }
}

/// Client-side mirror of one game.
///
/// Owns the object registry, the factory used to build it, the UI callbacks
/// to install and the presentation layer everything renders to.
///
/// ## Example
///
/// ```
/// use deckr_client::core::{EntityId, SessionConfig};
/// use deckr_client::objects::EntityDescriptor;
/// use deckr_client::presentation::HeadlessView;
/// use deckr_client::session::Session;
/// use deckr_client::transitions::Transition;
///
/// let mut session = Session::new(SessionConfig::new(1, 1), HeadlessView::new());
/// session
///     .load_snapshot(&[
///         EntityDescriptor::new(1, "Player"),
///         EntityDescriptor::new(3, "Card"),
///         EntityDescriptor::new(2, "Zone").with_owner(1).with_members([3]),
///         EntityDescriptor::new(4, "Zone"),
///     ])
///     .unwrap();
///
/// let report = session.apply_transitions(&[Transition::add(3, 4)]);
/// assert_eq!(report.applied, 1);
/// assert_eq!(session.view().parent_entity(EntityId(3)), Some(EntityId(4)));
/// ```
pub struct Session<P: Presentation> {
    config: SessionConfig,
    factory: ObjectFactory,
    registry: ObjectRegistry,
    callbacks: CallbackTable,
    view: P,
    state: SessionState,
    post_update: Option<PostUpdateHook<P>>,
    extension: Option<ExtensionHook<P>>,
}

impl<P: Presentation> Session<P> {
    /// Create an empty session with the standard object factory.
    pub fn new(config: SessionConfig, view: P) -> Self {
        Self {
            registry: ObjectRegistry::with_policy(config.duplicate_policy),
            factory: ObjectFactory::standard(),
            callbacks: CallbackTable::new(),
            config,
            view,
            state: SessionState::Uninitialized,
            post_update: None,
            extension: None,
        }
    }

    /// Replace the object factory (builder pattern).
    #[must_use]
    pub fn with_factory(mut self, factory: ObjectFactory) -> Self {
        self.factory = factory;
        self
    }

    /// Build the object graph from a snapshot.
    ///
    /// Players are built first, then plain objects, then containers, each
    /// group in snapshot order. Descriptors that fail to build or register
    /// are skipped. Once the graph is complete the registered UI callbacks
    /// are installed and the post-update hook runs.
    ///
    /// A populated session refuses a second snapshot and is left unchanged.
    pub fn load_snapshot(&mut self, descriptors: &[EntityDescriptor]) -> SyncResult<SnapshotReport> {
        if self.state == SessionState::Populated {
            log::warn!("snapshot received for an already populated session, ignoring");
            return Err(SyncError::AlreadyPopulated);
        }

        let Self {
            config,
            factory,
            registry,
            callbacks,
            view,
            state,
            post_update,
            ..
        } = self;

        let mut report = SnapshotReport::default();
        for group in factory.partition(descriptors) {
            for descriptor in group {
                let mut ctx = BuildContext::new(registry, view, config);
                let built = factory.create(descriptor, &mut ctx);
                match built.and_then(|object| registry.register(object)) {
                    Ok(_) => report.registered += 1,
                    Err(err) => {
                        log::warn!("skipping {}: {err}", descriptor.id);
                        report.skipped += 1;
                    }
                }
            }
        }

        report.handlers = callbacks.install(view);
        *state = SessionState::Populated;

        if let Some(hook) = post_update {
            hook(registry, view);
        }

        log::info!(
            "snapshot loaded: {} registered, {} skipped, {} handlers",
            report.registered,
            report.skipped,
            report.handlers
        );
        Ok(report)
    }

    /// Apply a batch of transitions in order.
    ///
    /// A transition that cannot be resolved is logged and skipped; the rest
    /// of the batch still applies. The post-update hook runs once afterwards
    /// unless the batch is empty.
    pub fn apply_transitions(&mut self, batch: &[Transition]) -> BatchReport {
        let mut report = BatchReport::default();
        if batch.is_empty() {
            return report;
        }
        if self.state == SessionState::Uninitialized {
            log::debug!("applying {} transitions before any snapshot", batch.len());
        }

        let Self {
            registry,
            view,
            post_update,
            extension,
            ..
        } = self;

        for transition in batch {
            match transition {
                Transition::Add { entity, container } => {
                    match registry.admit(*entity, *container, view) {
                        Ok(()) => report.applied += 1,
                        Err(err) => {
                            log::warn!("skipping add of {entity} to {container}: {err}");
                            report.skipped += 1;
                        }
                    }
                }
                Transition::Set {
                    kind_hint,
                    entity,
                    attribute,
                    value,
                } => match registry.get_mut(*entity) {
                    Some(object) => {
                        if let Some(hint) = kind_hint.as_ref().filter(|&hint| hint != object.kind()) {
                            log::debug!("set on {entity}: hinted as {hint}, registered as {}", object.kind());
                        }
                        object.set_value(attribute.clone(), value.clone(), view);
                        report.applied += 1;
                    }
                    None => {
                        log::warn!("skipping set of `{attribute}`: {}", SyncError::UnresolvedEntity(*entity));
                        report.skipped += 1;
                    }
                },
                Transition::Remove { entity } => {
                    log::trace!("remove of {entity} has no client-side effect");
                    report.applied += 1;
                }
                Transition::Extension(ext) => match extension {
                    Some(hook) => {
                        hook(ext, &mut *registry, &mut *view);
                        report.forwarded += 1;
                    }
                    None => {
                        log::debug!("no extension hook for `{}`, ignoring", ext.tag);
                        report.skipped += 1;
                    }
                },
            }
        }

        if let Some(hook) = post_update {
            hook(registry, view);
        }
        report
    }

    /// Register a UI handler for `event` on elements of `class`.
    ///
    /// Re-registering the same pair replaces the handler. Handlers are
    /// attached to the view when the snapshot is loaded.
    pub fn register_callback(&mut self, event: &str, class: &str, handler: UiHandler) {
        if self.state == SessionState::Populated {
            log::debug!("callback for `{event}` on `{class}` registered after the snapshot");
        }
        if self.callbacks.register(CallbackKey::new(event, class), handler) {
            log::debug!("replaced callback for `{event}` on `{class}`");
        }
    }

    /// Set the hook run after every snapshot and non-empty batch.
    pub fn set_post_update_hook(&mut self, hook: impl FnMut(&ObjectRegistry, &mut P) + 'static) {
        self.post_update = Some(Box::new(hook));
    }

    /// Set the hook receiving extension transitions.
    pub fn set_extension_hook(
        &mut self,
        hook: impl FnMut(&ExtensionTransition, &mut ObjectRegistry, &mut P) + 'static,
    ) {
        self.extension = Some(Box::new(hook));
    }

    // === Accessors ===

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    #[must_use]
    pub fn is_populated(&self) -> bool {
        self.state == SessionState::Populated
    }

    #[must_use]
    pub fn registry(&self) -> &ObjectRegistry {
        &self.registry
    }

    /// Get an object by id.
    #[must_use]
    pub fn get(&self, id: EntityId) -> Option<&dyn GameObject> {
        self.registry.get(id)
    }

    #[must_use]
    pub fn view(&self) -> &P {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut P {
        &mut self.view
    }

    /// Factory used by the next snapshot.
    pub fn factory_mut(&mut self) -> &mut ObjectFactory {
        &mut self.factory
    }

    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Registered UI callbacks.
    #[must_use]
    pub fn callbacks(&self) -> &CallbackTable {
        &self.callbacks
    }
}

impl<P: Presentation + std::fmt::Debug> std::fmt::Debug for Session<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("state", &self.state)
            .field("objects", &self.registry.len())
            .field("callbacks", &self.callbacks)
            .field("view", &self.view)
            .finish_non_exhaustive()
    }
}
