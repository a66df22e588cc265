//! # Gas Interpolation Engine
//!
//! Bridges tick-rate authoritative gas samples to per-frame rendering.
//!
//! The engine is purely a function of its latest two samples plus elapsed
//! time: it holds `old` and `current`, nothing older, so every computation
//! is idempotent and replayable. While the gas ring is `Advancing`, the
//! rendered value is the lerp of the two samples by the elapsed fraction
//! of one tick; in every other phase the raw authoritative value is
//! rendered with no smoothing.

use stormring_shared::constants::{
    GAS_MIN_HOLE_RADIUS, GAS_OVERDRAW, TICK_INTERVAL_MS,
};
use stormring_shared::math::{lerp, Vec2};

/// Gas ring phase machine: `Inactive -> Waiting -> Advancing -> Inactive`,
/// cycling once per game phase.
#[repr(u8)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GasState {
    /// No gas pressure; ring parked.
    #[default]
    Inactive = 0,
    /// Next ring announced, not yet moving.
    Waiting = 1,
    /// Ring shrinking toward its target; the only interpolating phase.
    Advancing = 2,
}

impl GasState {
    /// Decodes a phase from its wire value, `None` outside the machine.
    #[must_use]
    pub const fn from_bits(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Inactive),
            1 => Some(Self::Waiting),
            2 => Some(Self::Advancing),
            _ => None,
        }
    }
}

/// One authoritative gas sample as carried by an update packet.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GasUpdate {
    /// Current phase.
    pub state: GasState,
    /// Latest raw authoritative center.
    pub position: Vec2,
    /// Latest raw authoritative radius.
    pub radius: f32,
    /// Target center at the end of this phase. Meaningful only while
    /// `state == Advancing` (or `Waiting`, as the announced ring).
    pub new_position: Vec2,
    /// Target radius at the end of this phase; same caveat as
    /// `new_position`.
    pub new_radius: f32,
}

/// Screen-space overlay parameters for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GasOverlay {
    /// Center of the hole in the overlay mesh, scaled coordinates.
    pub center: Vec2,
    /// Radius of the hole, scaled coordinates.
    pub radius: f32,
}

/// Client-side gas state: the two most recent authoritative samples plus
/// the wall-clock stamp of the latest one.
///
/// Message handlers call [`Gas::apply`]; the render callback calls
/// [`Gas::render`] (or [`Gas::render_overlay`]) once per frame. Both run
/// on the same cooperative scheduler, so no synchronization is needed.
#[derive(Clone, Debug)]
pub struct Gas {
    /// Current phase.
    pub state: GasState,
    old_position: Vec2,
    old_radius: f32,
    position: Vec2,
    radius: f32,
    /// Announced target center; meaningful while `Advancing`.
    pub new_position: Vec2,
    /// Announced target radius; meaningful while `Advancing`.
    pub new_radius: f32,
    last_update_ms: f64,
}

/// The parked ring radius before the first phase starts.
const INITIAL_RADIUS: f32 = 2048.0;

impl Gas {
    /// Creates a parked gas ring centered at `center`.
    #[must_use]
    pub fn new(center: Vec2) -> Self {
        Self {
            state: GasState::Inactive,
            old_position: center,
            old_radius: INITIAL_RADIUS,
            position: center,
            radius: INITIAL_RADIUS,
            new_position: center,
            new_radius: INITIAL_RADIUS,
            last_update_ms: 0.0,
        }
    }

    /// Applies an authoritative sample received at `now_ms`.
    ///
    /// The previous latest sample becomes the interpolation origin and the
    /// clock restarts, so the renderer glides from where the ring was to
    /// where the server says it is over the next tick interval.
    pub fn apply(&mut self, update: &GasUpdate, now_ms: f64) {
        self.old_position = self.position;
        self.old_radius = self.radius;
        self.state = update.state;
        self.position = update.position;
        self.radius = update.radius;
        self.new_position = update.new_position;
        self.new_radius = update.new_radius;
        self.last_update_ms = now_ms;
    }

    /// Elapsed fraction of one tick since the last sample, clamped to
    /// `0.0..=1.0`. Forced to 1 outside the interpolating phase.
    #[must_use]
    fn interp_factor(&self, now_ms: f64) -> f32 {
        if self.state != GasState::Advancing {
            return 1.0;
        }
        #[allow(clippy::cast_possible_truncation)]
        let t = ((now_ms - self.last_update_ms) / TICK_INTERVAL_MS).clamp(0.0, 1.0) as f32;
        t
    }

    /// World-space center and radius to render at `now_ms`.
    #[must_use]
    pub fn render(&self, now_ms: f64) -> (Vec2, f32) {
        let t = self.interp_factor(now_ms);
        (
            self.old_position.lerp(self.position, t),
            lerp(self.old_radius, self.radius, t),
        )
    }

    /// Overlay placement at `now_ms`, with `scale` world-to-screen units.
    ///
    /// When the interpolated hole shrinks below [`GAS_MIN_HOLE_RADIUS`] a
    /// literal zero-radius hole would be degenerate; a true discontinuity
    /// is imminent anyway, so the overlay substitutes a unit hole pushed
    /// half the overdraw off-center, covering the screen entirely.
    #[must_use]
    pub fn render_overlay(&self, now_ms: f64, scale: f32) -> GasOverlay {
        let (position, radius) = self.render(now_ms);
        let mut center = position * scale;
        let mut rad = radius * scale;
        if rad < GAS_MIN_HOLE_RADIUS {
            rad = 1.0;
            center.x += 0.5 * GAS_OVERDRAW;
        }
        GasOverlay { center, radius: rad }
    }
}

impl Default for Gas {
    fn default() -> Self {
        Self::new(Vec2::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn advancing_gas(now_ms: f64) -> Gas {
        let mut gas = Gas::new(Vec2::new(512.0, 512.0));
        // Parked sample establishes the old radius.
        gas.apply(
            &GasUpdate {
                state: GasState::Waiting,
                position: Vec2::new(512.0, 512.0),
                radius: 2048.0,
                new_position: Vec2::new(512.0, 512.0),
                new_radius: 1024.0,
            },
            now_ms - 10_000.0,
        );
        // Latest sample: ring moved to its target radius this tick.
        gas.apply(
            &GasUpdate {
                state: GasState::Advancing,
                position: Vec2::new(512.0, 512.0),
                radius: 1024.0,
                new_position: Vec2::new(512.0, 512.0),
                new_radius: 1024.0,
            },
            now_ms,
        );
        gas
    }

    #[test]
    fn test_before_last_update_renders_old() {
        let gas = advancing_gas(5_000.0);
        let (_, radius) = gas.render(4_000.0); // clock behind the sample
        assert!((radius - 2048.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_after_full_tick_renders_new() {
        let gas = advancing_gas(5_000.0);
        let (_, radius) = gas.render(5_000.0 + TICK_INTERVAL_MS * 3.0);
        assert!((radius - 1024.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_halfway_renders_midpoint() {
        let gas = advancing_gas(5_000.0);
        let (position, radius) = gas.render(5_000.0 + TICK_INTERVAL_MS / 2.0);
        assert!((radius - 1536.0).abs() < 0.01);
        assert!((position.x - 512.0).abs() < 0.01);
    }

    #[test]
    fn test_vector_midpoint() {
        let mut gas = Gas::new(Vec2::new(0.0, 0.0));
        gas.apply(
            &GasUpdate {
                state: GasState::Advancing,
                position: Vec2::new(0.0, 0.0),
                radius: 100.0,
                new_position: Vec2::ZERO,
                new_radius: 100.0,
            },
            0.0,
        );
        gas.apply(
            &GasUpdate {
                state: GasState::Advancing,
                position: Vec2::new(10.0, 20.0),
                radius: 100.0,
                new_position: Vec2::ZERO,
                new_radius: 100.0,
            },
            1_000.0,
        );
        let (position, _) = gas.render(1_000.0 + TICK_INTERVAL_MS / 2.0);
        assert!((position.x - 5.0).abs() < 0.001);
        assert!((position.y - 10.0).abs() < 0.001);
    }

    #[test]
    fn test_no_smoothing_outside_advancing() {
        let mut gas = Gas::new(Vec2::new(512.0, 512.0));
        gas.apply(
            &GasUpdate {
                state: GasState::Waiting,
                position: Vec2::new(400.0, 400.0),
                radius: 900.0,
                new_position: Vec2::new(400.0, 400.0),
                new_radius: 450.0,
            },
            2_000.0,
        );
        // Immediately after the message, no glide: raw value rendered.
        let (position, radius) = gas.render(2_000.0);
        assert!((radius - 900.0).abs() < f32::EPSILON);
        assert!((position.x - 400.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_degenerate_hole_substitutes_full_coverage() {
        let mut gas = Gas::new(Vec2::new(512.0, 512.0));
        gas.apply(
            &GasUpdate {
                state: GasState::Inactive,
                position: Vec2::new(512.0, 512.0),
                radius: 0.0,
                new_position: Vec2::new(512.0, 512.0),
                new_radius: 0.0,
            },
            0.0,
        );
        let overlay = gas.render_overlay(0.0, 1.0);
        assert!((overlay.radius - 1.0).abs() < f32::EPSILON);
        assert!(overlay.center.x > GAS_OVERDRAW / 4.0);
    }

    #[test]
    fn test_render_is_replayable() {
        let gas = advancing_gas(5_000.0);
        let now = 5_000.0 + TICK_INTERVAL_MS / 4.0;
        assert_eq!(gas.render(now), gas.render(now));
    }
}
