//! Client-side mirrors of server game objects.
//!
//! ## Key Types
//!
//! - [`GameObject`]: capability shared by all mirrored objects
//! - [`EntityCore`]: id, kind, attributes, visual handle and reactions
//! - [`Player`], [`Card`], [`Zone`], [`GenericObject`]: standard kinds
//! - [`ObjectFactory`]: kind-to-constructor table with build groups
//! - [`ObjectRegistry`]: id-to-object map for one session
//! - [`EntityDescriptor`]: one snapshot entry
//!
//! ## Example
//!
//! ```
//! use deckr_client::core::{EntityId, SessionConfig};
//! use deckr_client::objects::{BuildContext, EntityDescriptor, ObjectFactory, ObjectRegistry};
//! use deckr_client::presentation::HeadlessView;
//!
//! let factory = ObjectFactory::standard();
//! let config = SessionConfig::default();
//! let mut registry = ObjectRegistry::new();
//! let mut view = HeadlessView::new();
//!
//! let mut ctx = BuildContext::new(&mut registry, &mut view, &config);
//! let card = factory.create(&EntityDescriptor::new(3, "Card"), &mut ctx).unwrap();
//! registry.register(card).unwrap();
//!
//! assert!(registry.contains(EntityId(3)));
//! ```

mod card;
mod descriptor;
mod factory;
mod object;
mod player;
mod registry;
mod zone;

pub use card::{Card, CardFaces};
pub use descriptor::EntityDescriptor;
pub use factory::{
    build_card, build_generic, build_player, build_zone, BuildContext, BuildGroup, Constructor,
    ObjectFactory,
};
pub use object::{EntityCore, GameObject, Reaction, ZoneRef};
pub use player::{GenericObject, Player};
pub use registry::ObjectRegistry;
pub use zone::Zone;
