//! Loot pickups: the synchronized entity of this protocol slice.

use stormring_shared::definitions::{max_capacity, ArmorKind, ItemSpec};
use stormring_shared::math::Vec2;
use stormring_shared::object_types::ObjectType;

use std::collections::HashMap;

/// One-shot entry animation: the loot sprite scales in elastically when
/// the server flags it as newly spawned.
///
/// Progress-based like every presentation tween here; the render callback
/// advances it with frame delta time and reads the scale. It holds no
/// scheduler hooks, so dropping it after [`SpawnAnimation::stop`] leaves
/// nothing dangling.
#[derive(Clone, Debug)]
pub struct SpawnAnimation {
    /// Progress, `0.0..=1.0`.
    progress: f32,
    duration_ms: f32,
}

/// Scale the sprite starts at.
const SPAWN_START_SCALE: f32 = 0.5;

impl SpawnAnimation {
    /// Creates an animation at progress zero.
    #[must_use]
    pub const fn new(duration_ms: f32) -> Self {
        Self { progress: 0.0, duration_ms }
    }

    /// Advances by `dt_ms` of frame time.
    pub fn advance(&mut self, dt_ms: f32) {
        self.progress = (self.progress + dt_ms / self.duration_ms).min(1.0);
    }

    /// Current sprite scale: elastic-out from [`SPAWN_START_SCALE`] to 1.
    #[must_use]
    pub fn scale(&self) -> f32 {
        let t = self.progress;
        if t >= 1.0 {
            return 1.0;
        }
        // Elastic out: overshoots, then settles.
        let eased = (2.0_f32).powf(-10.0 * t)
            * ((t * 10.0 - 0.75) * (2.0 * std::f32::consts::PI / 3.0)).sin()
            + 1.0;
        SPAWN_START_SCALE + (1.0 - SPAWN_START_SCALE) * eased
    }

    /// True once the tween has settled.
    #[must_use]
    pub fn finished(&self) -> bool {
        self.progress >= 1.0
    }

    /// Cancels the animation; the scale snaps to its end value.
    pub fn stop(&mut self) {
        self.progress = 1.0;
    }
}

/// The local player's equipped and owned state, consulted by interaction
/// eligibility. No wire involvement.
#[derive(Clone, Debug, Default)]
pub struct Loadout {
    /// Weapon slots: two guns then the melee slot.
    pub weapons: [Option<ObjectType>; 3],
    /// Index of the held weapon slot.
    pub active_slot: usize,
    /// Carried counts of countable items, keyed by id string.
    pub items: HashMap<&'static str, u16>,
    /// Equipped helmet level.
    pub helmet_level: u8,
    /// Equipped vest level.
    pub vest_level: u8,
    /// Equipped backpack level.
    pub backpack_level: u8,
}

impl Loadout {
    fn carried(&self, id: &str) -> u16 {
        self.items.get(id).copied().unwrap_or(0)
    }
}

/// A loot pickup instance.
///
/// Lifecycle: `Uninitialized -> Created`, flipped exactly once by the
/// first full update; partial updates are valid in both states but only
/// meaningful once the entity has a visual representation.
#[derive(Clone, Debug)]
pub struct Loot {
    /// Per-session object id assigned by the server.
    pub object_id: u16,
    /// Resolved object type.
    pub object_type: ObjectType,
    /// Authoritative position, refreshed by partial updates.
    pub position: Vec2,
    /// Stack size, set only by the full update.
    pub count: u16,
    created: bool,
    spawn_animation: Option<SpawnAnimation>,
}

/// Entry animation length.
const SPAWN_ANIMATION_MS: f32 = 1000.0;

impl Loot {
    /// Creates an uninitialized instance for `object_id`.
    #[must_use]
    pub const fn new(object_id: u16, object_type: ObjectType) -> Self {
        Self {
            object_id,
            object_type,
            position: Vec2::ZERO,
            count: 0,
            created: false,
            spawn_animation: None,
        }
    }

    /// True after the first full update has been applied.
    #[must_use]
    pub const fn created(&self) -> bool {
        self.created
    }

    /// The pending entry animation, if one is playing.
    #[must_use]
    pub const fn spawn_animation(&self) -> Option<&SpawnAnimation> {
        self.spawn_animation.as_ref()
    }

    /// Mutable access for the render callback to advance the tween.
    pub fn spawn_animation_mut(&mut self) -> Option<&mut SpawnAnimation> {
        self.spawn_animation.as_mut()
    }

    /// Applies the identity-establishing payload.
    ///
    /// A second full update on an already-created instance is a protocol
    /// anomaly: logged, then applied as an idempotent overwrite. It never
    /// crashes the client.
    pub fn apply_full(&mut self, count: u16, is_new: bool) {
        if self.created {
            tracing::warn!(object_id = self.object_id, "full update of existing loot");
        }
        self.count = count;
        if is_new {
            self.spawn_animation = Some(SpawnAnimation::new(SPAWN_ANIMATION_MS));
        }
        self.created = true;
    }

    /// Applies the per-tick volatile payload.
    pub fn apply_partial(&mut self, position: Vec2) {
        self.position = position;
    }

    /// Releases in-flight presentation state before the instance is
    /// discarded. Must run on every removal path.
    pub fn destroy(&mut self) {
        if let Some(animation) = self.spawn_animation.as_mut() {
            animation.stop();
        }
        self.spawn_animation = None;
    }

    /// Whether the local player can pick this up.
    ///
    /// Pure function of the definition and `loadout`; exhaustive over the
    /// item kinds, with the capacity table consulted for countable kinds
    /// and the ephemeral carve-out honored.
    #[must_use]
    pub fn can_interact(&self, loadout: &Loadout) -> bool {
        let Some(definition) = self.object_type.definition() else {
            return false;
        };
        match definition.spec {
            ItemSpec::Gun { .. } => {
                loadout.weapons[0].is_none()
                    || loadout.weapons[1].is_none()
                    || (loadout.active_slot < 2
                        && loadout.weapons[loadout.active_slot] != Some(self.object_type))
            }
            ItemSpec::Melee { .. } => loadout.weapons[2] != Some(self.object_type),
            ItemSpec::Ammo { ephemeral } => {
                ephemeral
                    || loadout.carried(definition.id) + 1
                        <= max_capacity(loadout.backpack_level, definition.id)
            }
            ItemSpec::Healing => {
                loadout.carried(definition.id) + 1
                    <= max_capacity(loadout.backpack_level, definition.id)
            }
            ItemSpec::Armor { kind, level } => match kind {
                ArmorKind::Helmet => level > loadout.helmet_level,
                ArmorKind::Vest => level > loadout.vest_level,
            },
            ItemSpec::Backpack { level } => level > loadout.backpack_level,
            ItemSpec::Scope => loadout.carried(definition.id) == 0,
            ItemSpec::Skin => true,
        }
    }
}
