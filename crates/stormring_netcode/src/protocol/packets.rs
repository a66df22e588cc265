//! # Packet Definitions
//!
//! The closed set of message kinds, their payload layouts, and the
//! symmetric serialize/deserialize pair for each.
//!
//! ## Envelope
//!
//! Every message starts with its discriminant in [`PACKET_TYPE_BITS`];
//! the payload layout is entirely determined by that discriminant plus the
//! inline presence flags it defines. Each kind declares an `alloc_bytes`
//! upper bound used only to presize the encode buffer; it is never
//! transmitted.

use stormring_shared::constants::{
    GAS_STATE_BITS, KILL_FEED_MESSAGE_TYPE_BITS, LOOT_COUNT_BITS, OBJECT_CATEGORY_BITS,
    OBJECT_TYPE_ID_BITS, PACKET_TYPE_BITS,
};
use stormring_shared::math::Vec2;
use stormring_shared::object_types::{ObjectCategory, ObjectType, ObjectTypeRegistry};

use super::stream::{BitReader, BitWriter, DecodeError, StyledName};
use crate::interpolation::{GasState, GasUpdate};

/// Discriminant for every message kind in the protocol.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PacketType {
    /// Server -> Client: per-tick entity and gas state.
    Update = 0,
    /// Server -> Client: kill feed entry.
    KillFeed = 1,
    /// Server -> Client: end-of-game summary for the local player.
    GameOver = 2,
}

impl PacketType {
    /// Decodes a packet discriminant.
    ///
    /// # Errors
    ///
    /// [`DecodeError::UnknownPacketType`] for values outside the closed
    /// set; there is no fallback decode.
    pub const fn from_bits(value: u8) -> Result<Self, DecodeError> {
        match value {
            0 => Ok(Self::Update),
            1 => Ok(Self::KillFeed),
            2 => Ok(Self::GameOver),
            other => Err(DecodeError::UnknownPacketType(other)),
        }
    }
}

/// Identity-establishing payload for one entity, sent once at creation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FullObjectUpdate {
    /// Per-session object id assigned by the server.
    pub object_id: u16,
    /// Resolved object type.
    pub object_type: ObjectType,
    /// Stack size; 9-bit wire field, legal domain `0..=511`. Larger values
    /// are a producer contract violation (see [`BitWriter::write_bits`]).
    pub count: u16,
    /// True when the entity just spawned and the client should play the
    /// one-shot entry animation.
    pub is_new: bool,
}

/// Volatile-field payload for one entity, sent every tick after creation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PartialObjectUpdate {
    /// Per-session object id assigned by the server.
    pub object_id: u16,
    /// Authoritative position this tick.
    pub position: Vec2,
}

/// Per-tick state update: optional gas block, then full updates for newly
/// created entities, then partial updates for existing ones.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UpdatePacket {
    /// Gas authoritative sample, when the gas changed this tick.
    pub gas: Option<GasUpdate>,
    /// Entities created this tick.
    pub full_updates: Vec<FullObjectUpdate>,
    /// Position refreshes for entities created earlier.
    pub partial_updates: Vec<PartialObjectUpdate>,
}

/// Weapon reference in a kill message, with optional kill-count tracking.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WeaponUsed {
    /// The weapon's object type.
    pub weapon_type: ObjectType,
    /// Running kill count, present only for killstreak-tracked weapons.
    pub kill_count: Option<u8>,
}

/// One kill feed entry. Field presence on the wire is driven entirely by
/// the message discriminant and the boolean flags written inline before
/// each optional field.
#[derive(Clone, Debug, PartialEq)]
pub enum KillFeedMessage {
    /// A player died.
    Kill {
        /// Who died.
        killed: StyledName,
        /// Object id of the killed player.
        killed_id: u16,
        /// The killer, when another player did it ("two party
        /// interaction"); absent for environment deaths.
        killer: Option<(StyledName, u16)>,
        /// The weapon, when one was involved.
        weapon: Option<WeaponUsed>,
        /// True when the gas (or other environment) made the kill.
        killed_by_environment: bool,
    },
    /// A player joined or left the match.
    Join {
        /// Who.
        player: StyledName,
        /// True on join, false on leave.
        joined: bool,
    },
}

/// Kill feed message discriminants.
const KILL_FEED_KILL: u8 = 0;
const KILL_FEED_JOIN: u8 = 1;

/// End-of-game summary shown to the local player.
#[derive(Clone, Debug, PartialEq)]
pub struct GameOverStats {
    /// True when the local player won.
    pub won: bool,
    /// Winner's styled display name.
    pub winner: StyledName,
    /// Kill count.
    pub kills: u8,
    /// Total damage dealt.
    pub damage_done: u16,
    /// Total damage received.
    pub damage_taken: u16,
    /// Seconds survived.
    pub time_alive_secs: u16,
}

/// Generic packet container over the closed message set.
#[derive(Clone, Debug, PartialEq)]
pub enum Packet {
    /// Per-tick entity and gas state.
    Update(UpdatePacket),
    /// Kill feed entry.
    KillFeed(KillFeedMessage),
    /// End-of-game summary.
    GameOver(GameOverStats),
}

impl Packet {
    /// Returns the packet discriminant.
    #[must_use]
    pub const fn packet_type(&self) -> PacketType {
        match self {
            Self::Update(_) => PacketType::Update,
            Self::KillFeed(_) => PacketType::KillFeed,
            Self::GameOver(_) => PacketType::GameOver,
        }
    }

    /// Upper-bound encode size in bytes, used to presize the writer.
    /// Never transmitted.
    #[must_use]
    pub const fn alloc_bytes(&self) -> usize {
        match self {
            Self::Update(_) => 1 << 13,
            Self::KillFeed(_) => 1 << 6,
            Self::GameOver(_) => 1 << 5,
        }
    }

    /// Encodes the discriminant then the variant payload.
    #[must_use]
    pub fn serialize(&self) -> Vec<u8> {
        let mut writer = BitWriter::with_capacity(self.alloc_bytes());
        writer.write_bits(u32::from(self.packet_type() as u8), PACKET_TYPE_BITS);
        match self {
            Self::Update(update) => write_update(&mut writer, update),
            Self::KillFeed(message) => write_kill_feed(&mut writer, message),
            Self::GameOver(stats) => write_game_over(&mut writer, stats),
        }
        writer.finish()
    }

    /// Reads the discriminant and dispatches to the variant decoder.
    ///
    /// # Errors
    ///
    /// Any [`DecodeError`]; the failure is fatal for this message only.
    pub fn deserialize(bytes: &[u8], registry: &ObjectTypeRegistry) -> Result<Self, DecodeError> {
        let mut reader = BitReader::new(bytes);
        #[allow(clippy::cast_possible_truncation)]
        let tag = reader.read_bits(PACKET_TYPE_BITS)? as u8;
        match PacketType::from_bits(tag)? {
            PacketType::Update => Ok(Self::Update(read_update(&mut reader, registry)?)),
            PacketType::KillFeed => Ok(Self::KillFeed(read_kill_feed(&mut reader, registry)?)),
            PacketType::GameOver => Ok(Self::GameOver(read_game_over(&mut reader)?)),
        }
    }
}

fn write_object_type(writer: &mut BitWriter, object_type: ObjectType) {
    writer.write_bits(u32::from(object_type.category as u8), OBJECT_CATEGORY_BITS);
    writer.write_bits(u32::from(object_type.id_number), OBJECT_TYPE_ID_BITS);
}

fn read_object_type(
    reader: &mut BitReader<'_>,
    registry: &ObjectTypeRegistry,
) -> Result<ObjectType, DecodeError> {
    #[allow(clippy::cast_possible_truncation)]
    let category = ObjectCategory::from_bits(reader.read_bits(OBJECT_CATEGORY_BITS)? as u8)?;
    #[allow(clippy::cast_possible_truncation)]
    let id_number = reader.read_bits(OBJECT_TYPE_ID_BITS)? as u16;
    Ok(registry.from_parts(category, id_number)?)
}

fn write_gas(writer: &mut BitWriter, gas: &GasUpdate) {
    writer.write_bits(u32::from(gas.state as u8), GAS_STATE_BITS);
    writer.write_position(gas.position);
    writer.write_radius(gas.radius);
    writer.write_position(gas.new_position);
    writer.write_radius(gas.new_radius);
}

fn read_gas(reader: &mut BitReader<'_>) -> Result<GasUpdate, DecodeError> {
    #[allow(clippy::cast_possible_truncation)]
    let raw_state = reader.read_bits(GAS_STATE_BITS)? as u8;
    let state = GasState::from_bits(raw_state).ok_or(DecodeError::UnknownGasState(raw_state))?;
    Ok(GasUpdate {
        state,
        position: reader.read_position()?,
        radius: reader.read_radius()?,
        new_position: reader.read_position()?,
        new_radius: reader.read_radius()?,
    })
}

fn write_update(writer: &mut BitWriter, update: &UpdatePacket) {
    writer.write_bool(update.gas.is_some());
    if let Some(ref gas) = update.gas {
        write_gas(writer, gas);
    }

    debug_assert!(update.full_updates.len() <= u8::MAX as usize);
    #[allow(clippy::cast_possible_truncation)]
    writer.write_u8(update.full_updates.len() as u8);
    for full in &update.full_updates {
        writer.write_u16(full.object_id);
        write_object_type(writer, full.object_type);
        writer.write_bits(u32::from(full.count), LOOT_COUNT_BITS);
        writer.write_bool(full.is_new);
    }

    debug_assert!(update.partial_updates.len() <= u8::MAX as usize);
    #[allow(clippy::cast_possible_truncation)]
    writer.write_u8(update.partial_updates.len() as u8);
    for partial in &update.partial_updates {
        writer.write_u16(partial.object_id);
        writer.write_position(partial.position);
    }
}

fn read_update(
    reader: &mut BitReader<'_>,
    registry: &ObjectTypeRegistry,
) -> Result<UpdatePacket, DecodeError> {
    let gas = if reader.read_bool()? { Some(read_gas(reader)?) } else { None };

    let full_count = reader.read_u8()?;
    let mut full_updates = Vec::with_capacity(usize::from(full_count));
    for _ in 0..full_count {
        let object_id = reader.read_u16()?;
        let object_type = read_object_type(reader, registry)?;
        #[allow(clippy::cast_possible_truncation)]
        let count = reader.read_bits(LOOT_COUNT_BITS)? as u16;
        let is_new = reader.read_bool()?;
        full_updates.push(FullObjectUpdate { object_id, object_type, count, is_new });
    }

    let partial_count = reader.read_u8()?;
    let mut partial_updates = Vec::with_capacity(usize::from(partial_count));
    for _ in 0..partial_count {
        let object_id = reader.read_u16()?;
        let position = reader.read_position()?;
        partial_updates.push(PartialObjectUpdate { object_id, position });
    }

    Ok(UpdatePacket { gas, full_updates, partial_updates })
}

fn write_kill_feed(writer: &mut BitWriter, message: &KillFeedMessage) {
    match message {
        KillFeedMessage::Kill { killed, killed_id, killer, weapon, killed_by_environment } => {
            writer.write_bits(u32::from(KILL_FEED_KILL), KILL_FEED_MESSAGE_TYPE_BITS);
            writer.write_bool(killer.is_some());
            writer.write_styled_name(killed);
            writer.write_u16(*killed_id);
            if let Some((killer_name, killer_id)) = killer {
                writer.write_styled_name(killer_name);
                writer.write_u16(*killer_id);
            }
            writer.write_bool(weapon.is_some());
            if let Some(weapon) = weapon {
                write_object_type(writer, weapon.weapon_type);
                writer.write_bool(weapon.kill_count.is_some());
                if let Some(kill_count) = weapon.kill_count {
                    writer.write_u8(kill_count);
                }
            }
            writer.write_bool(*killed_by_environment);
        }
        KillFeedMessage::Join { player, joined } => {
            writer.write_bits(u32::from(KILL_FEED_JOIN), KILL_FEED_MESSAGE_TYPE_BITS);
            writer.write_styled_name(player);
            writer.write_bool(*joined);
        }
    }
}

fn read_kill_feed(
    reader: &mut BitReader<'_>,
    registry: &ObjectTypeRegistry,
) -> Result<KillFeedMessage, DecodeError> {
    #[allow(clippy::cast_possible_truncation)]
    let tag = reader.read_bits(KILL_FEED_MESSAGE_TYPE_BITS)? as u8;
    match tag {
        KILL_FEED_KILL => {
            let two_party = reader.read_bool()?;
            let killed = reader.read_styled_name()?;
            let killed_id = reader.read_u16()?;
            let killer = if two_party {
                let killer_name = reader.read_styled_name()?;
                let killer_id = reader.read_u16()?;
                Some((killer_name, killer_id))
            } else {
                None
            };
            let weapon = if reader.read_bool()? {
                let weapon_type = read_object_type(reader, registry)?;
                let kill_count =
                    if reader.read_bool()? { Some(reader.read_u8()?) } else { None };
                Some(WeaponUsed { weapon_type, kill_count })
            } else {
                None
            };
            let killed_by_environment = reader.read_bool()?;
            Ok(KillFeedMessage::Kill { killed, killed_id, killer, weapon, killed_by_environment })
        }
        KILL_FEED_JOIN => {
            let player = reader.read_styled_name()?;
            let joined = reader.read_bool()?;
            Ok(KillFeedMessage::Join { player, joined })
        }
        other => Err(DecodeError::UnknownKillFeedMessage(other)),
    }
}

fn write_game_over(writer: &mut BitWriter, stats: &GameOverStats) {
    writer.write_bool(stats.won);
    writer.write_styled_name(&stats.winner);
    writer.write_u8(stats.kills);
    writer.write_u16(stats.damage_done);
    writer.write_u16(stats.damage_taken);
    writer.write_u16(stats.time_alive_secs);
}

fn read_game_over(reader: &mut BitReader<'_>) -> Result<GameOverStats, DecodeError> {
    Ok(GameOverStats {
        won: reader.read_bool()?,
        winner: reader.read_styled_name()?,
        kills: reader.read_u8()?,
        damage_done: reader.read_u16()?,
        damage_taken: reader.read_u16()?,
        time_alive_secs: reader.read_u16()?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> ObjectTypeRegistry {
        ObjectTypeRegistry::new()
    }

    #[test]
    fn test_update_roundtrip() {
        let registry = registry();
        let loot_type = registry.from_id_string("bandage").unwrap();
        let full = FullObjectUpdate {
            object_id: 42,
            object_type: loot_type,
            count: 3,
            is_new: true,
        };
        let packet = Packet::Update(UpdatePacket {
            gas: Some(GasUpdate {
                state: GasState::Advancing,
                position: Vec2::new(512.0, 512.0),
                radius: 768.0,
                new_position: Vec2::new(500.0, 520.0),
                new_radius: 384.0,
            }),
            full_updates: vec![full],
            partial_updates: vec![PartialObjectUpdate {
                object_id: 42,
                position: Vec2::new(100.0, 200.0),
            }],
        });

        let decoded = Packet::deserialize(&packet.serialize(), &registry).unwrap();
        let Packet::Update(update) = decoded else { panic!("expected update packet") };
        assert_eq!(update.full_updates, vec![full]);
        let gas = update.gas.unwrap();
        assert_eq!(gas.state, GasState::Advancing);
        assert!((gas.radius - 768.0).abs() < 0.1);
        let partial = update.partial_updates[0];
        assert_eq!(partial.object_id, 42);
        assert!((partial.position.x - 100.0).abs() < 0.05);
    }

    #[test]
    fn test_count_boundary_511() {
        let registry = registry();
        let loot_type = registry.from_id_string("9mm").unwrap();
        let packet = Packet::Update(UpdatePacket {
            gas: None,
            full_updates: vec![FullObjectUpdate {
                object_id: 1,
                object_type: loot_type,
                count: 511,
                is_new: false,
            }],
            partial_updates: Vec::new(),
        });

        let decoded = Packet::deserialize(&packet.serialize(), &registry).unwrap();
        let Packet::Update(update) = decoded else { panic!("expected update packet") };
        assert_eq!(update.full_updates[0].count, 511);
    }

    #[test]
    #[should_panic(expected = "does not fit")]
    fn test_count_512_is_a_producer_violation() {
        let registry = registry();
        let loot_type = registry.from_id_string("9mm").unwrap();
        let packet = Packet::Update(UpdatePacket {
            gas: None,
            full_updates: vec![FullObjectUpdate {
                object_id: 1,
                object_type: loot_type,
                count: 512,
                is_new: false,
            }],
            partial_updates: Vec::new(),
        });
        let _ = packet.serialize();
    }

    #[test]
    fn test_kill_feed_environment_kill_roundtrip() {
        let registry = registry();
        let message = KillFeedMessage::Kill {
            killed: StyledName::new("Rook", 0x00cc_2222),
            killed_id: 17,
            killer: None,
            weapon: None,
            killed_by_environment: true,
        };
        let packet = Packet::KillFeed(message.clone());

        let decoded = Packet::deserialize(&packet.serialize(), &registry).unwrap();
        assert_eq!(decoded, Packet::KillFeed(message));
    }

    #[test]
    fn test_kill_feed_tracked_weapon_roundtrip() {
        let registry = registry();
        let weapon_type = registry.from_id_string("mosin").unwrap();
        let message = KillFeedMessage::Kill {
            killed: StyledName::new("Rook", 0x00cc_2222),
            killed_id: 17,
            killer: Some((StyledName::new("Vex", 0x0022_cc88), 4)),
            weapon: Some(WeaponUsed { weapon_type, kill_count: Some(7) }),
            killed_by_environment: false,
        };
        let packet = Packet::KillFeed(message.clone());

        let decoded = Packet::deserialize(&packet.serialize(), &registry).unwrap();
        assert_eq!(decoded, Packet::KillFeed(message));
    }

    #[test]
    fn test_join_roundtrip() {
        let registry = registry();
        let message = KillFeedMessage::Join {
            player: StyledName::new("Vex", 0x0022_cc88),
            joined: true,
        };
        let packet = Packet::KillFeed(message.clone());
        let decoded = Packet::deserialize(&packet.serialize(), &registry).unwrap();
        assert_eq!(decoded, Packet::KillFeed(message));
    }

    #[test]
    fn test_game_over_roundtrip() {
        let registry = registry();
        let packet = Packet::GameOver(GameOverStats {
            won: true,
            winner: StyledName::new("Vex", 0x0022_cc88),
            kills: 9,
            damage_done: 1432,
            damage_taken: 730,
            time_alive_secs: 1180,
        });
        let decoded = Packet::deserialize(&packet.serialize(), &registry).unwrap();
        assert_eq!(decoded, packet);
    }

    #[test]
    fn test_unknown_discriminant_is_fatal() {
        let registry = registry();
        let mut writer = BitWriter::with_capacity(4);
        writer.write_bits(7, PACKET_TYPE_BITS); // not a registered kind
        writer.write_u8(0);
        let bytes = writer.finish();

        assert!(matches!(
            Packet::deserialize(&bytes, &registry),
            Err(DecodeError::UnknownPacketType(7))
        ));
    }

    #[test]
    fn test_out_of_range_type_reference_is_fatal() {
        let registry = registry();
        let mut writer = BitWriter::with_capacity(16);
        writer.write_bits(u32::from(PacketType::Update as u8), PACKET_TYPE_BITS);
        writer.write_bool(false); // no gas block
        writer.write_u8(1); // one full update
        writer.write_u16(5);
        writer.write_bits(u32::from(ObjectCategory::Loot as u8), OBJECT_CATEGORY_BITS);
        writer.write_bits(200, OBJECT_TYPE_ID_BITS); // past the loot table
        writer.write_bits(1, LOOT_COUNT_BITS);
        writer.write_bool(false);
        writer.write_u8(0); // no partial updates
        let bytes = writer.finish();

        assert!(matches!(
            Packet::deserialize(&bytes, &registry),
            Err(DecodeError::Registry(_))
        ));
    }

    #[test]
    fn test_truncated_message_is_fatal() {
        let registry = registry();
        let packet = Packet::GameOver(GameOverStats {
            won: false,
            winner: StyledName::new("Vex", 0),
            kills: 0,
            damage_done: 10,
            damage_taken: 20,
            time_alive_secs: 30,
        });
        let mut bytes = packet.serialize();
        bytes.truncate(bytes.len() - 2);

        assert!(matches!(
            Packet::deserialize(&bytes, &registry),
            Err(DecodeError::UnexpectedEof { .. })
        ));
    }
}
