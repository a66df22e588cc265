//! # Network Protocol
//!
//! Bit-packed message definitions for minimal bandwidth.
//!
//! ## Message Structure
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │ Discriminant (PACKET_TYPE_BITS)                              │
//! ├──────────────────────────────────────────────────────────────┤
//! │ Variant payload (fixed-width fields, inline presence flags)  │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Philosophy
//!
//! - Every bit counts - fields use exactly the width they need
//! - Nothing on the wire is self-describing: optional fields are preceded
//!   by a 1-bit presence flag, in a fixed order both sides agree on
//! - The message set is closed; unknown discriminants are fatal

mod packets;
mod stream;

pub use packets::{
    FullObjectUpdate, GameOverStats, KillFeedMessage, Packet, PacketType, PartialObjectUpdate,
    UpdatePacket, WeaponUsed,
};
pub use stream::{BitReader, BitWriter, DecodeError, StyledName};
