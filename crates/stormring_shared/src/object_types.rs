//! # Object Type Registry
//!
//! Maps a `(category, id_number)` pair to a stable identity and its static
//! definition record. Built once at session start from the definition
//! tables; read-only thereafter, so it needs no synchronization.
//!
//! Within a category, `id_number` and `id_string` are a bijection: the id
//! number is the definition's index in its table, and the id string is the
//! definition's stable key.

use std::collections::HashMap;

use crate::definitions::{LootDefinition, LOOT_DEFINITIONS};

/// Category discriminant for every synchronized world object.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ObjectCategory {
    /// A player character.
    Player = 0,
    /// A static obstacle (tree, crate, rock).
    Obstacle = 1,
    /// A loot pickup.
    Loot = 2,
    /// A death marker left where a player died.
    DeathMarker = 3,
    /// A building footprint.
    Building = 4,
}

impl ObjectCategory {
    /// Decodes a category from its wire value.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::InvalidCategory`] for values outside the
    /// closed set.
    pub fn from_bits(value: u8) -> Result<Self, RegistryError> {
        match value {
            0 => Ok(Self::Player),
            1 => Ok(Self::Obstacle),
            2 => Ok(Self::Loot),
            3 => Ok(Self::DeathMarker),
            4 => Ok(Self::Building),
            other => Err(RegistryError::InvalidCategory(other)),
        }
    }

    /// Number of registered definitions for this category.
    ///
    /// Only `Loot` carries a table in this protocol slice; a wire
    /// reference into an empty category is always out of range.
    #[must_use]
    pub const fn table_len(self) -> usize {
        match self {
            Self::Loot => LOOT_DEFINITIONS.len(),
            Self::Player | Self::Obstacle | Self::DeathMarker | Self::Building => 0,
        }
    }
}

/// Identity of a synchronized object type: category plus a dense id unique
/// within it. Construct through [`ObjectTypeRegistry`] so the id number is
/// always in range for its category.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ObjectType {
    /// Category discriminant.
    pub category: ObjectCategory,
    /// Dense index into the category's definition table.
    pub id_number: u16,
}

impl ObjectType {
    /// The stable human-readable key for this type.
    #[must_use]
    pub fn id_string(self) -> &'static str {
        self.definition().map_or("", |d| d.id)
    }

    /// The immutable definition record, when the category carries one.
    #[must_use]
    pub fn definition(self) -> Option<&'static LootDefinition> {
        match self.category {
            ObjectCategory::Loot => LOOT_DEFINITIONS.get(usize::from(self.id_number)),
            _ => None,
        }
    }
}

/// Errors from registry resolution. The packet layer treats these as fatal
/// for the message being decoded.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RegistryError {
    /// The wire category value is outside the closed set.
    #[error("invalid object category {0}")]
    InvalidCategory(u8),
    /// The id number is outside the registered range for its category.
    #[error("unknown object type {id_number} in category {category:?}")]
    UnknownType {
        /// Category the reference named.
        category: ObjectCategory,
        /// Out-of-range id number.
        id_number: u16,
    },
    /// No definition carries this id string.
    #[error("unknown id string {0:?}")]
    UnknownIdString(String),
}

/// O(1) resolution of object types in both directions.
pub struct ObjectTypeRegistry {
    loot_by_id_string: HashMap<&'static str, u16>,
}

impl ObjectTypeRegistry {
    /// Builds the registry from the static definition tables.
    #[must_use]
    pub fn new() -> Self {
        let loot_by_id_string = LOOT_DEFINITIONS
            .iter()
            .enumerate()
            .map(|(index, definition)| {
                #[allow(clippy::cast_possible_truncation)]
                let id_number = index as u16;
                (definition.id, id_number)
            })
            .collect();
        Self { loot_by_id_string }
    }

    /// Resolves a `(category, id_number)` pair.
    ///
    /// # Errors
    ///
    /// [`RegistryError::UnknownType`] when `id_number` is outside the
    /// registered range for `category`.
    pub fn from_parts(
        &self,
        category: ObjectCategory,
        id_number: u16,
    ) -> Result<ObjectType, RegistryError> {
        if usize::from(id_number) >= category.table_len() {
            return Err(RegistryError::UnknownType { category, id_number });
        }
        Ok(ObjectType { category, id_number })
    }

    /// Resolves an id string to its object type.
    ///
    /// # Errors
    ///
    /// [`RegistryError::UnknownIdString`] when no definition carries the key.
    pub fn from_id_string(&self, id: &str) -> Result<ObjectType, RegistryError> {
        self.loot_by_id_string
            .get(id)
            .map(|&id_number| ObjectType { category: ObjectCategory::Loot, id_number })
            .ok_or_else(|| RegistryError::UnknownIdString(id.to_owned()))
    }
}

impl Default for ObjectTypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_number_id_string_bijection() {
        let registry = ObjectTypeRegistry::new();
        for (index, definition) in LOOT_DEFINITIONS.iter().enumerate() {
            #[allow(clippy::cast_possible_truncation)]
            let id_number = index as u16;
            let by_parts = registry.from_parts(ObjectCategory::Loot, id_number).unwrap();
            let by_string = registry.from_id_string(definition.id).unwrap();
            assert_eq!(by_parts, by_string);
            assert_eq!(by_parts.id_string(), definition.id);
        }
    }

    #[test]
    fn test_out_of_range_id_is_an_error() {
        let registry = ObjectTypeRegistry::new();
        #[allow(clippy::cast_possible_truncation)]
        let past_end = LOOT_DEFINITIONS.len() as u16;
        assert!(matches!(
            registry.from_parts(ObjectCategory::Loot, past_end),
            Err(RegistryError::UnknownType { .. })
        ));
    }

    #[test]
    fn test_empty_category_rejects_all_ids() {
        let registry = ObjectTypeRegistry::new();
        assert!(registry.from_parts(ObjectCategory::Obstacle, 0).is_err());
    }

    #[test]
    fn test_definition_resolution() {
        let registry = ObjectTypeRegistry::new();
        let ty = registry.from_id_string("ak47").unwrap();
        let definition = ty.definition().unwrap();
        assert_eq!(definition.name, "AK-47");
    }
}
