//! # Bit Stream Codec
//!
//! Sequential bit-level writer and reader. Both track a bit cursor; the
//! writer appends, the reader consumes, and a field sequence encoded with
//! given widths decodes to the same values when read with the same widths
//! in the same order.
//!
//! ## Precision
//!
//! Integers are lossless within their declared width. Positions and radii
//! are quantized: an axis spans `0.0..=MAP_SIZE` in [`POSITION_BITS`] bits,
//! so the round-trip error is at most `MAP_SIZE / (2^POSITION_BITS - 1)`
//! per axis, identically in both directions.

use stormring_shared::constants::{
    MAP_SIZE, MAX_NAME_LENGTH, MAX_RADIUS, NAME_COLOR_BITS, NAME_LENGTH_BITS, POSITION_BITS,
    RADIUS_BITS,
};
use stormring_shared::math::Vec2;
use stormring_shared::object_types::RegistryError;

/// A player display name plus its 24-bit RGB style color.
///
/// The styled-name collaborator encoding: length-bounded UTF-8 bytes
/// followed by a fixed-width color tag.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StyledName {
    /// Display name; at most [`MAX_NAME_LENGTH`] bytes of UTF-8.
    pub name: String,
    /// RGB color, `0xRRGGBB`.
    pub color: u32,
}

impl StyledName {
    /// Creates a styled name. Names longer than [`MAX_NAME_LENGTH`] bytes
    /// are a producer contract violation; see [`BitWriter::write_styled_name`].
    #[must_use]
    pub fn new(name: impl Into<String>, color: u32) -> Self {
        Self { name: name.into(), color }
    }
}

/// Errors raised while decoding a message. All of them are fatal for the
/// message being decoded; none corrupt the reader for a later message
/// because each framed message gets its own reader.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// The encoder wrote fewer bits than the decoder tried to read.
    /// Never silently zero-filled.
    #[error("read past end of stream: needed {needed} bits, {remaining} remain")]
    UnexpectedEof {
        /// Bits the read requested.
        needed: u32,
        /// Bits left in the stream.
        remaining: usize,
    },
    /// The envelope discriminant names no registered packet kind.
    #[error("unknown packet type {0}")]
    UnknownPacketType(u8),
    /// The kill feed discriminant names no registered message kind.
    #[error("unknown kill feed message type {0}")]
    UnknownKillFeedMessage(u8),
    /// The gas phase value is outside the state machine.
    #[error("unknown gas state {0}")]
    UnknownGasState(u8),
    /// An object reference failed registry resolution.
    #[error(transparent)]
    Registry(#[from] RegistryError),
    /// A styled name's bytes are not valid UTF-8.
    #[error("player name is not valid utf-8")]
    InvalidName(#[from] std::string::FromUtf8Error),
}

/// Sequential, append-only bit writer.
///
/// Construct with the packet kind's `alloc_bytes` hint so the common case
/// never reallocates.
pub struct BitWriter {
    buffer: Vec<u8>,
    bit_position: usize,
}

impl BitWriter {
    /// Creates a writer presized to `capacity_bytes`.
    #[must_use]
    pub fn with_capacity(capacity_bytes: usize) -> Self {
        Self { buffer: Vec::with_capacity(capacity_bytes), bit_position: 0 }
    }

    /// Number of bits written so far.
    #[must_use]
    pub const fn bit_len(&self) -> usize {
        self.bit_position
    }

    /// Consumes the writer, returning the encoded bytes. The tail of the
    /// final byte is zero-padded.
    #[must_use]
    pub fn finish(self) -> Vec<u8> {
        self.buffer
    }

    /// Writes the low `bits` bits of `value`, least significant bit first.
    ///
    /// `bits` must be in `1..=32`. A `value` that does not fit in `bits`
    /// is a producer contract violation: debug builds assert, release
    /// builds truncate to the declared width.
    pub fn write_bits(&mut self, value: u32, bits: u32) {
        debug_assert!((1..=32).contains(&bits));
        let mask = if bits == 32 { u32::MAX } else { (1u32 << bits) - 1 };
        debug_assert_eq!(value & mask, value, "value {value} does not fit in {bits} bits");
        let value = value & mask;

        for i in 0..bits {
            let byte_idx = self.bit_position / 8;
            if byte_idx == self.buffer.len() {
                self.buffer.push(0);
            }
            if (value >> i) & 1 == 1 {
                self.buffer[byte_idx] |= 1 << (self.bit_position % 8);
            }
            self.bit_position += 1;
        }
    }

    /// Writes a boolean as one bit.
    #[inline]
    pub fn write_bool(&mut self, value: bool) {
        self.write_bits(u32::from(value), 1);
    }

    /// Writes an 8-bit unsigned integer.
    #[inline]
    pub fn write_u8(&mut self, value: u8) {
        self.write_bits(u32::from(value), 8);
    }

    /// Writes a 16-bit unsigned integer.
    #[inline]
    pub fn write_u16(&mut self, value: u16) {
        self.write_bits(u32::from(value), 16);
    }

    /// Writes a float quantized to `bits` over `min..=max`.
    ///
    /// Values outside the range clamp to it.
    pub fn write_quantized_float(&mut self, value: f32, min: f32, max: f32, bits: u32) {
        let range = max - min;
        let normalized = if range <= 0.0 { 0.0 } else { ((value - min) / range).clamp(0.0, 1.0) };
        let max_int = if bits == 32 { u32::MAX } else { (1u32 << bits) - 1 };
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
        let quantized = (normalized * max_int as f32).round() as u32;
        self.write_bits(quantized, bits);
    }

    /// Writes a 2D world position, [`POSITION_BITS`] per axis over the map
    /// coordinate range.
    pub fn write_position(&mut self, position: Vec2) {
        self.write_quantized_float(position.x, 0.0, MAP_SIZE, POSITION_BITS);
        self.write_quantized_float(position.y, 0.0, MAP_SIZE, POSITION_BITS);
    }

    /// Writes a gas radius, quantized over `0.0..=MAX_RADIUS`.
    pub fn write_radius(&mut self, radius: f32) {
        self.write_quantized_float(radius, 0.0, MAX_RADIUS, RADIUS_BITS);
    }

    /// Writes a styled player name: byte length in [`NAME_LENGTH_BITS`],
    /// the UTF-8 bytes, then the color in [`NAME_COLOR_BITS`].
    ///
    /// A name longer than [`MAX_NAME_LENGTH`] bytes is a producer contract
    /// violation (debug assert; release builds write the bound and drop
    /// the tail at a char boundary).
    pub fn write_styled_name(&mut self, styled: &StyledName) {
        debug_assert!(styled.name.len() <= MAX_NAME_LENGTH, "name longer than wire bound");
        let mut end = styled.name.len().min(MAX_NAME_LENGTH);
        while !styled.name.is_char_boundary(end) {
            end -= 1;
        }
        let bytes = &styled.name.as_bytes()[..end];
        #[allow(clippy::cast_possible_truncation)]
        self.write_bits(bytes.len() as u32, NAME_LENGTH_BITS);
        for &byte in bytes {
            self.write_u8(byte);
        }
        self.write_bits(styled.color & 0x00ff_ffff, NAME_COLOR_BITS);
    }
}

/// Sequential bit reader over an encoded message.
pub struct BitReader<'a> {
    buffer: &'a [u8],
    bit_position: usize,
}

impl<'a> BitReader<'a> {
    /// Creates a reader over `buffer`.
    #[must_use]
    pub const fn new(buffer: &'a [u8]) -> Self {
        Self { buffer, bit_position: 0 }
    }

    /// Bits remaining in the stream (including any zero-padded tail of the
    /// final byte).
    #[must_use]
    pub const fn remaining_bits(&self) -> usize {
        self.buffer.len() * 8 - self.bit_position
    }

    /// Reads `bits` bits (1..=32), least significant bit first.
    ///
    /// # Errors
    ///
    /// [`DecodeError::UnexpectedEof`] when fewer than `bits` bits remain.
    pub fn read_bits(&mut self, bits: u32) -> Result<u32, DecodeError> {
        debug_assert!((1..=32).contains(&bits));
        if (bits as usize) > self.remaining_bits() {
            return Err(DecodeError::UnexpectedEof {
                needed: bits,
                remaining: self.remaining_bits(),
            });
        }
        let mut value = 0u32;
        for i in 0..bits {
            let byte_idx = self.bit_position / 8;
            let bit = (self.buffer[byte_idx] >> (self.bit_position % 8)) & 1;
            value |= u32::from(bit) << i;
            self.bit_position += 1;
        }
        Ok(value)
    }

    /// Reads a boolean.
    ///
    /// # Errors
    ///
    /// [`DecodeError::UnexpectedEof`] at end of stream.
    #[inline]
    pub fn read_bool(&mut self) -> Result<bool, DecodeError> {
        Ok(self.read_bits(1)? == 1)
    }

    /// Reads an 8-bit unsigned integer.
    ///
    /// # Errors
    ///
    /// [`DecodeError::UnexpectedEof`] at end of stream.
    #[inline]
    pub fn read_u8(&mut self) -> Result<u8, DecodeError> {
        #[allow(clippy::cast_possible_truncation)]
        let value = self.read_bits(8)? as u8;
        Ok(value)
    }

    /// Reads a 16-bit unsigned integer.
    ///
    /// # Errors
    ///
    /// [`DecodeError::UnexpectedEof`] at end of stream.
    #[inline]
    pub fn read_u16(&mut self) -> Result<u16, DecodeError> {
        #[allow(clippy::cast_possible_truncation)]
        let value = self.read_bits(16)? as u16;
        Ok(value)
    }

    /// Reads a float quantized to `bits` over `min..=max`.
    ///
    /// # Errors
    ///
    /// [`DecodeError::UnexpectedEof`] at end of stream.
    pub fn read_quantized_float(
        &mut self,
        min: f32,
        max: f32,
        bits: u32,
    ) -> Result<f32, DecodeError> {
        let max_int = if bits == 32 { u32::MAX } else { (1u32 << bits) - 1 };
        let raw = self.read_bits(bits)?;
        #[allow(clippy::cast_precision_loss)]
        let normalized = raw as f32 / max_int as f32;
        Ok(min + (max - min) * normalized)
    }

    /// Reads a 2D world position written by [`BitWriter::write_position`].
    ///
    /// # Errors
    ///
    /// [`DecodeError::UnexpectedEof`] at end of stream.
    pub fn read_position(&mut self) -> Result<Vec2, DecodeError> {
        let x = self.read_quantized_float(0.0, MAP_SIZE, POSITION_BITS)?;
        let y = self.read_quantized_float(0.0, MAP_SIZE, POSITION_BITS)?;
        Ok(Vec2::new(x, y))
    }

    /// Reads a gas radius written by [`BitWriter::write_radius`].
    ///
    /// # Errors
    ///
    /// [`DecodeError::UnexpectedEof`] at end of stream.
    pub fn read_radius(&mut self) -> Result<f32, DecodeError> {
        self.read_quantized_float(0.0, MAX_RADIUS, RADIUS_BITS)
    }

    /// Reads a styled player name written by
    /// [`BitWriter::write_styled_name`].
    ///
    /// # Errors
    ///
    /// [`DecodeError::UnexpectedEof`] on truncation,
    /// [`DecodeError::InvalidName`] when the bytes are not UTF-8.
    pub fn read_styled_name(&mut self) -> Result<StyledName, DecodeError> {
        let len = self.read_bits(NAME_LENGTH_BITS)? as usize;
        let mut bytes = Vec::with_capacity(len);
        for _ in 0..len {
            bytes.push(self.read_u8()?);
        }
        let name = String::from_utf8(bytes)?;
        let color = self.read_bits(NAME_COLOR_BITS)?;
        Ok(StyledName { name, color })
    }
}
