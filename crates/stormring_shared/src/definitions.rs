//! # Item Definition Tables
//!
//! Static, read-only records describing every loot type the protocol can
//! reference. Built into the binary; the registry indexes them once at
//! session start and nothing mutates them afterwards.
//!
//! Behavior that branches on item kind is expressed as one pure function
//! per responsibility (background texture, capacity lookup), each
//! independently exhaustive, instead of one switch reused everywhere.

/// Closed set of item kinds. Every dispatch over this enum is exhaustive;
/// adding a kind is a compile error until every consumer handles it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ItemKind {
    /// Firearm, occupies one of the two gun slots.
    Gun,
    /// Ammunition stack.
    Ammo,
    /// Melee weapon, occupies the dedicated melee slot.
    Melee,
    /// Healing consumable.
    Healing,
    /// Helmet or vest.
    Armor,
    /// Backpack upgrade; level controls carry capacity.
    Backpack,
    /// Scope upgrade.
    Scope,
    /// Cosmetic skin.
    Skin,
}

/// Ammunition families; guns reference one for their loot background.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AmmoKind {
    /// 9mm and similar.
    Light,
    /// Rifle rounds.
    Medium,
    /// Sniper rounds.
    Heavy,
    /// Shotgun shells.
    Shell,
}

impl AmmoKind {
    /// Stable suffix used to key per-family assets.
    #[must_use]
    pub const fn suffix(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Medium => "medium",
            Self::Heavy => "heavy",
            Self::Shell => "shell",
        }
    }
}

/// Armor slot discriminator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArmorKind {
    /// Head slot.
    Helmet,
    /// Torso slot.
    Vest,
}

/// Kind-specific static data for a loot definition.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ItemSpec {
    /// Firearm; `ammo` selects the loot background family.
    Gun {
        /// Ammunition family this gun feeds from.
        ammo: AmmoKind,
    },
    /// Ammunition stack. `ephemeral` stacks are exempt from capacity
    /// checks and can always be picked up.
    Ammo {
        /// Unlimited-pickup carve-out.
        ephemeral: bool,
    },
    /// Melee weapon with an optional sprite scale override.
    Melee {
        /// Loot sprite scale override, when the art needs one.
        loot_scale: Option<f32>,
    },
    /// Healing consumable, capacity-limited like ammo.
    Healing,
    /// Helmet or vest with a protection level.
    Armor {
        /// Which armor slot.
        kind: ArmorKind,
        /// Protection level; pickups are upgrades only.
        level: u8,
    },
    /// Backpack with a capacity level.
    Backpack {
        /// Capacity level; pickups are upgrades only.
        level: u8,
    },
    /// Scope upgrade.
    Scope,
    /// Cosmetic skin.
    Skin,
}

/// Immutable static record for one loot type.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LootDefinition {
    /// Stable human-readable key; indexes per-kind tables and textures.
    pub id: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Kind-specific data.
    pub spec: ItemSpec,
}

impl LootDefinition {
    /// The plain kind discriminant, for capability dispatch.
    #[must_use]
    pub const fn kind(&self) -> ItemKind {
        match self.spec {
            ItemSpec::Gun { .. } => ItemKind::Gun,
            ItemSpec::Ammo { .. } => ItemKind::Ammo,
            ItemSpec::Melee { .. } => ItemKind::Melee,
            ItemSpec::Healing => ItemKind::Healing,
            ItemSpec::Armor { .. } => ItemKind::Armor,
            ItemSpec::Backpack { .. } => ItemKind::Backpack,
            ItemSpec::Scope => ItemKind::Scope,
            ItemSpec::Skin => ItemKind::Skin,
        }
    }
}

/// All loot types, in registry order. `ObjectType::id_number` for category
/// `Loot` is an index into this table.
pub const LOOT_DEFINITIONS: &[LootDefinition] = &[
    LootDefinition {
        id: "m9",
        name: "M9",
        spec: ItemSpec::Gun { ammo: AmmoKind::Light },
    },
    LootDefinition {
        id: "ak47",
        name: "AK-47",
        spec: ItemSpec::Gun { ammo: AmmoKind::Medium },
    },
    LootDefinition {
        id: "mosin",
        name: "Mosin-Nagant",
        spec: ItemSpec::Gun { ammo: AmmoKind::Heavy },
    },
    LootDefinition {
        id: "m870",
        name: "M870",
        spec: ItemSpec::Gun { ammo: AmmoKind::Shell },
    },
    LootDefinition {
        id: "9mm",
        name: "9mm",
        spec: ItemSpec::Ammo { ephemeral: false },
    },
    LootDefinition {
        id: "762mm",
        name: "7.62mm",
        spec: ItemSpec::Ammo { ephemeral: false },
    },
    LootDefinition {
        id: "flare",
        name: "Flare",
        spec: ItemSpec::Ammo { ephemeral: true },
    },
    LootDefinition {
        id: "machete",
        name: "Machete",
        spec: ItemSpec::Melee { loot_scale: Some(0.8) },
    },
    LootDefinition {
        id: "bandage",
        name: "Bandage",
        spec: ItemSpec::Healing,
    },
    LootDefinition {
        id: "medikit",
        name: "Medikit",
        spec: ItemSpec::Healing,
    },
    LootDefinition {
        id: "tactical_helmet",
        name: "Tactical Helmet",
        spec: ItemSpec::Armor { kind: ArmorKind::Helmet, level: 2 },
    },
    LootDefinition {
        id: "tactical_vest",
        name: "Tactical Vest",
        spec: ItemSpec::Armor { kind: ArmorKind::Vest, level: 2 },
    },
    LootDefinition {
        id: "tactical_pack",
        name: "Tactical Pack",
        spec: ItemSpec::Backpack { level: 2 },
    },
    LootDefinition {
        id: "4x_scope",
        name: "4x Scope",
        spec: ItemSpec::Scope,
    },
    LootDefinition {
        id: "stormbreaker_skin",
        name: "Stormbreaker",
        spec: ItemSpec::Skin,
    },
];

/// Carry capacity tiers. `max_capacity` entries are keyed by the
/// [`LootDefinition::id`] of the countable item.
#[derive(Clone, Copy, Debug)]
pub struct BackpackDefinition {
    /// Stable key.
    pub id: &'static str,
    /// Capacity level; indexes [`BACKPACKS`].
    pub level: u8,
    /// `(item id, max carried)` pairs for countable items.
    pub max_capacity: &'static [(&'static str, u16)],
}

/// Backpack tiers in level order; [`BACKPACKS`]`[level]` is the tier for
/// that level.
pub const BACKPACKS: &[BackpackDefinition] = &[
    BackpackDefinition {
        id: "bag",
        level: 0,
        max_capacity: &[("9mm", 120), ("762mm", 90), ("bandage", 5), ("medikit", 1)],
    },
    BackpackDefinition {
        id: "basic_pack",
        level: 1,
        max_capacity: &[("9mm", 200), ("762mm", 160), ("bandage", 10), ("medikit", 2)],
    },
    BackpackDefinition {
        id: "tactical_pack",
        level: 2,
        max_capacity: &[("9mm", 320), ("762mm", 240), ("bandage", 15), ("medikit", 4)],
    },
];

/// Maximum number of `item_id` carriable at `backpack_level`.
///
/// Unknown ids carry nothing; levels past the last tier clamp to it.
#[must_use]
pub fn max_capacity(backpack_level: u8, item_id: &str) -> u16 {
    let tier = usize::from(backpack_level).min(BACKPACKS.len() - 1);
    BACKPACKS[tier]
        .max_capacity
        .iter()
        .find(|(id, _)| *id == item_id)
        .map_or(0, |(_, max)| *max)
}

/// Loot background texture for a definition, or `None` when the sprite is
/// drawn bare (ammo has no background).
#[must_use]
pub const fn background_texture(definition: &LootDefinition) -> Option<&'static str> {
    match definition.spec {
        ItemSpec::Gun { ammo } => Some(match ammo {
            AmmoKind::Light => "loot_background_gun_light",
            AmmoKind::Medium => "loot_background_gun_medium",
            AmmoKind::Heavy => "loot_background_gun_heavy",
            AmmoKind::Shell => "loot_background_gun_shell",
        }),
        ItemSpec::Ammo { .. } => None,
        ItemSpec::Melee { .. } => Some("loot_background_melee"),
        ItemSpec::Healing => Some("loot_background_healing"),
        ItemSpec::Armor { .. } | ItemSpec::Backpack { .. } | ItemSpec::Scope | ItemSpec::Skin => {
            Some("loot_background_equipment")
        }
    }
}
