//! # STORMRING Shared
//!
//! Common types used by both client and server.
//!
//! ## CRITICAL RULE
//!
//! This crate must NEVER depend on:
//! - any graphics or window crate
//! - any socket or async runtime crate
//!
//! It holds exactly what both ends of the wire must agree on: math types,
//! protocol constants and bit widths, the static item definition tables,
//! and the object type registry built from them.

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod constants;
pub mod definitions;
pub mod events;
pub mod math;
pub mod object_types;

pub use constants::{MAP_SIZE, TICK_INTERVAL_MS, TICK_RATE};
pub use definitions::{
    AmmoKind, ArmorKind, BackpackDefinition, ItemKind, ItemSpec, LootDefinition, BACKPACKS,
    LOOT_DEFINITIONS,
};
pub use events::EntityEvent;
pub use math::{lerp, Vec2};
pub use object_types::{ObjectCategory, ObjectType, ObjectTypeRegistry, RegistryError};
