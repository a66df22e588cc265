//! Entity store: applies decoded update packets and emits lifecycle
//! events for the scene layer.

use std::collections::HashMap;

use stormring_shared::events::EntityEvent;

use super::loot::Loot;
use crate::interpolation::Gas;
use crate::protocol::UpdatePacket;

/// All synchronized entities plus the gas ring, owned by the render side.
///
/// [`EntityStore::apply_update`] is pure data application: it mutates
/// entities and returns events; it never touches UI or scene state
/// directly. Updates are applied in arrival order, which the transport's
/// per-connection ordering turns into in-order field application without
/// extra sequencing.
#[derive(Default)]
pub struct EntityStore {
    loot: HashMap<u16, Loot>,
    gas: Gas,
}

impl EntityStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The gas ring state.
    #[must_use]
    pub const fn gas(&self) -> &Gas {
        &self.gas
    }

    /// Looks up an entity by object id.
    #[must_use]
    pub fn get(&self, object_id: u16) -> Option<&Loot> {
        self.loot.get(&object_id)
    }

    /// Mutable lookup, for the render callback advancing animations.
    pub fn get_mut(&mut self, object_id: u16) -> Option<&mut Loot> {
        self.loot.get_mut(&object_id)
    }

    /// Number of live entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.loot.len()
    }

    /// True when no entities are live.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.loot.is_empty()
    }

    /// Applies one decoded update packet received at `now_ms`.
    ///
    /// Full updates create entities (or idempotently overwrite existing
    /// ones, see [`Loot::apply_full`]); partial updates refresh positions.
    /// A partial update for an id the server never created here is
    /// dropped with a log line; the rest of the packet still applies and
    /// the render loop is never interrupted.
    pub fn apply_update(&mut self, update: &UpdatePacket, now_ms: f64) -> Vec<EntityEvent> {
        let mut events = Vec::new();

        if let Some(ref gas) = update.gas {
            self.gas.apply(gas, now_ms);
        }

        for full in &update.full_updates {
            let entity = self
                .loot
                .entry(full.object_id)
                .or_insert_with(|| Loot::new(full.object_id, full.object_type));
            let first_creation = !entity.created();
            entity.apply_full(full.count, full.is_new);
            if first_creation {
                events.push(EntityEvent::Created {
                    id: full.object_id,
                    object_type: full.object_type,
                    is_new: full.is_new,
                });
            }
        }

        for partial in &update.partial_updates {
            match self.loot.get_mut(&partial.object_id) {
                Some(entity) => {
                    entity.apply_partial(partial.position);
                    events.push(EntityEvent::Updated {
                        id: partial.object_id,
                        position: partial.position,
                    });
                }
                None => {
                    tracing::debug!(
                        object_id = partial.object_id,
                        "partial update for unknown entity dropped"
                    );
                }
            }
        }

        events
    }

    /// Removes an entity, releasing its presentation state first.
    ///
    /// Returns the `Destroyed` event when the id was live.
    pub fn remove(&mut self, object_id: u16) -> Option<EntityEvent> {
        self.loot.remove(&object_id).map(|mut entity| {
            entity.destroy();
            EntityEvent::Destroyed { id: object_id }
        })
    }
}
