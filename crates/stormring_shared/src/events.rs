//! Entity lifecycle events emitted by the protocol core.
//!
//! The scene/UI layer subscribes to these instead of reaching into the
//! entity store. The decoder produces them; the renderer consumes them.

use crate::math::Vec2;
use crate::object_types::ObjectType;

/// Lifecycle notification for one synchronized entity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EntityEvent {
    /// An entity was created by its first full update.
    Created {
        /// Per-session object id.
        id: u16,
        /// Resolved object type.
        object_type: ObjectType,
        /// True when the consumer should play the one-shot entry animation.
        is_new: bool,
    },
    /// An entity's volatile fields were refreshed by a partial update.
    Updated {
        /// Per-session object id.
        id: u16,
        /// New authoritative position.
        position: Vec2,
    },
    /// An entity was removed from the scene.
    Destroyed {
        /// Per-session object id.
        id: u16,
    },
}
