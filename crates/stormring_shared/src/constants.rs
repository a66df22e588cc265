//! # Protocol Constants
//!
//! Tick timing, map extents and every wire bit width.
//!
//! **CRITICAL:** These values are baked into both binaries. A change here
//! requires a matched client and server rebuild; there is no protocol
//! version negotiation.

/// Server tick rate (authoritative updates per second).
pub const TICK_RATE: u32 = 30;

/// Duration of one server tick in milliseconds.
///
/// The interpolation engine divides elapsed wall-clock time by this to get
/// the render fraction between two authoritative samples.
#[allow(clippy::cast_lossless)]
pub const TICK_INTERVAL_MS: f64 = 1000.0 / TICK_RATE as f64;

/// World extent: coordinates live in `0.0..=MAP_SIZE` on both axes.
pub const MAP_SIZE: f32 = 1024.0;

// =============================================================================
// WIRE BIT WIDTHS
// =============================================================================
// Every field is written with a caller-specified width; nothing on the wire
// is self-describing. The decoder must read with the same widths in the
// same order.

/// Bits for the packet discriminant at the head of every message.
pub const PACKET_TYPE_BITS: u32 = 3;

/// Bits for an object category.
pub const OBJECT_CATEGORY_BITS: u32 = 3;

/// Bits for an object type's id number within its category.
pub const OBJECT_TYPE_ID_BITS: u32 = 8;

/// Bits for a per-session object id.
pub const OBJECT_ID_BITS: u32 = 16;

/// Bits for a loot stack count. 9 bits, so the legal domain is `0..=511`.
pub const LOOT_COUNT_BITS: u32 = 9;

/// Bits for the kill feed message type discriminant.
pub const KILL_FEED_MESSAGE_TYPE_BITS: u32 = 3;

/// Bits per axis for a quantized world position.
///
/// 16 bits over `0.0..=MAP_SIZE` gives a precision of
/// `MAP_SIZE / 65535` (~0.016 world units), identical both directions.
pub const POSITION_BITS: u32 = 16;

/// Bits for a quantized gas radius (same range and precision rules as a
/// position axis; radii never exceed the map diagonal in practice).
pub const RADIUS_BITS: u32 = 16;

/// Maximum radius value representable on the wire.
pub const MAX_RADIUS: f32 = 2048.0;

/// Bits for the byte length prefix of a styled player name.
pub const NAME_LENGTH_BITS: u32 = 5;

/// Maximum byte length of a player name (bounded by [`NAME_LENGTH_BITS`]).
pub const MAX_NAME_LENGTH: usize = (1 << NAME_LENGTH_BITS) - 1;

/// Bits for a styled name's RGB color tag.
pub const NAME_COLOR_BITS: u32 = 24;

/// Bits for the gas state machine phase.
pub const GAS_STATE_BITS: u32 = 2;

// =============================================================================
// GAS OVERLAY RENDERING
// =============================================================================

/// Half-extent of the planar overlay mesh that carries the gas hole.
pub const GAS_OVERDRAW: f32 = 100_000.0;

/// Below this screen-space radius the hole is degenerate; the renderer
/// substitutes a full-coverage shape instead (see the interpolation engine).
pub const GAS_MIN_HOLE_RADIUS: f32 = 0.1;
