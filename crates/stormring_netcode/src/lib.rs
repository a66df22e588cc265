//! # STORMRING Netcode - The State Sync Protocol
//!
//! Binary state synchronization between an authoritative server and a
//! rendering client.
//!
//! ## Architecture
//!
//! - **Protocol**: bit-packed messages with caller-specified field widths;
//!   a discriminant-tagged envelope over a closed set of packet kinds
//! - **Synchronization**: full updates establish entity identity once;
//!   partial updates refresh volatile fields every tick
//! - **Interpolation**: the renderer lerps between the two most recent
//!   authoritative samples by elapsed fraction of one tick
//! - **Authority**: the server is the single writer of game state; the
//!   client only decodes, applies and renders
//!
//! ## Scheduling Model
//!
//! ```text
//! NETWORK                          RENDER
//!   |                                 |
//!   |-- decode packet --------------->|  (PacketQueue, arrival order)
//!   |                                 |-- drain queue, apply updates
//!   |                                 |-- interpolate, draw frame
//! ```
//!
//! Message handlers are the only writers of authoritative fields; the
//! per-frame render callback only reads them. On a single cooperative
//! scheduler the two never interleave; under real threads [`PacketQueue`]
//! reproduces the same ordering guarantee without locks.
//!
//! ## Failure Discipline
//!
//! A malformed message (truncated stream, unknown discriminant,
//! out-of-range object type) is fatal for that message only. Entity update
//! failures never take down the render loop; the offending update is
//! dropped and everything else keeps rendering.

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod interpolation;
pub mod protocol;
pub mod sync;

// Re-exports for convenience
pub use interpolation::{Gas, GasOverlay, GasState, GasUpdate};
pub use protocol::{
    BitReader, BitWriter, DecodeError, FullObjectUpdate, GameOverStats, KillFeedMessage, Packet,
    PacketType, PartialObjectUpdate, StyledName, UpdatePacket, WeaponUsed,
};
pub use sync::{EntityStore, Loadout, Loot, PacketQueue, SpawnAnimation};

/// Maximum encoded packet size in bytes. Per-kind `alloc_bytes` hints must
/// stay at or under this.
pub const MAX_PACKET_SIZE: usize = 1 << 13;
