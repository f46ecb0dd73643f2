//! Main-phase motion functions.
//!
//! `cyclic_offset` and `wave_offset` are pure functions of absolute reference
//! time and unit index, so units are phase-aligned to the clock rather than to
//! their own start. `jump_sample` draws a fresh random pose.

use crate::types::Vec2;
use rand::Rng;
use std::f64::consts::TAU;

/// Phase shift between consecutive units of a cyclic movement, in radians.
pub const CYCLIC_PHASE_STEP: f64 = 0.5;

/// Circular drift: `x = i·sin(2πt/d + φ)`, `y = i·cos(2πt/d + φ)` with `φ = 0.5·index`.
pub fn cyclic_offset(time: f64, intensity: f64, cycle_duration: f64, unit_index: usize) -> Vec2 {
    if cycle_duration.is_nan() || cycle_duration <= 0.0 {
        return Vec2::ZERO;
    }
    let angle = TAU * time / cycle_duration + CYCLIC_PHASE_STEP * unit_index as f64;
    Vec2::new(
        (intensity * angle.sin()) as f32,
        (intensity * angle.cos()) as f32,
    )
}

/// Vertical wave: `y = i·sin(2πt/d + 2π·(index mod len)/len)`.
pub fn wave_offset(
    time: f64,
    intensity: f64,
    cycle_duration: f64,
    wave_length: usize,
    unit_index: usize,
) -> Vec2 {
    if cycle_duration.is_nan() || cycle_duration <= 0.0 {
        return Vec2::ZERO;
    }
    let wave_length = wave_length.max(1);
    let phase = TAU * (unit_index % wave_length) as f64 / wave_length as f64;
    let y = intensity * (TAU * time / cycle_duration + phase).sin();
    Vec2::new(0.0, y as f32)
}

/// Random jump: one draw in `[-intensity, intensity]` used for both axes, and a
/// rotation in `[-rotation_degree, rotation_degree]`.
pub fn jump_sample<R: Rng + ?Sized>(rng: &mut R, intensity: f64, rotation_degree: f64) -> (Vec2, f32) {
    let offset = symmetric(rng, intensity) as f32;
    let rotation = symmetric(rng, rotation_degree) as f32;
    (Vec2::new(offset, offset), rotation)
}

fn symmetric<R: Rng + ?Sized>(rng: &mut R, magnitude: f64) -> f64 {
    let magnitude = magnitude.abs();
    if !magnitude.is_finite() || magnitude == 0.0 {
        return 0.0;
    }
    // Scaling a unit sample keeps the range width finite for any finite magnitude.
    rng.gen_range(-1.0_f64..=1.0) * magnitude
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn cyclic_traces_a_circle() {
        for step in 0..20 {
            let t = step as f64 * 0.037;
            let o = cyclic_offset(t, 10.0, 1.0, 3);
            let r = ((o.x * o.x + o.y * o.y) as f64).sqrt();
            assert!((r - 10.0).abs() < 1e-3);
        }
    }

    #[test]
    fn cyclic_at_time_zero() {
        let o = cyclic_offset(0.0, 10.0, 1.0, 0);
        assert!(o.x.abs() < 1e-5);
        assert!((o.y - 10.0).abs() < 1e-5);
        let shifted = cyclic_offset(0.0, 10.0, 1.0, 1);
        assert!((shifted.x - (10.0 * 0.5f64.sin()) as f32).abs() < 1e-5);
    }

    #[test]
    fn wave_repeats_every_wave_length_units() {
        let a = wave_offset(12.3, 10.0, 2.0, 5, 1);
        let b = wave_offset(12.3, 10.0, 2.0, 5, 6);
        assert_eq!(a, b);
        assert_eq!(a.x, 0.0);
        assert!(a.y.abs() <= 10.0);
    }

    #[test]
    fn wave_quarter_cycle_peaks() {
        let o = wave_offset(0.5, 10.0, 2.0, 5, 0);
        assert!((o.y - 10.0).abs() < 1e-4);
    }

    #[test]
    fn degenerate_parameters_do_not_panic() {
        assert_eq!(cyclic_offset(1.0, 10.0, 0.0, 0), Vec2::ZERO);
        assert_eq!(wave_offset(1.0, 10.0, -1.0, 0, 3), Vec2::ZERO);
        let w = wave_offset(0.25, 10.0, 1.0, 0, 3);
        assert!((w.y - 10.0).abs() < 1e-4);
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(jump_sample(&mut rng, 0.0, 0.0), (Vec2::ZERO, 0.0));
    }

    #[test]
    fn jump_stays_in_bounds() {
        let mut rng = StdRng::seed_from_u64(9);
        for _ in 0..500 {
            let (o, rot) = jump_sample(&mut rng, 10.0, 15.0);
            assert_eq!(o.x, o.y);
            assert!(o.x.abs() <= 10.0);
            assert!(rot.abs() <= 15.0);
        }
        let (o, _) = jump_sample(&mut rng, -4.0, 1.0);
        assert!(o.x.abs() <= 4.0);
    }

    #[test]
    fn jump_survives_extreme_magnitudes() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..100 {
            let (o, rotation) = jump_sample(&mut rng, f64::MAX, f64::MAX);
            assert!(!o.x.is_nan() && !rotation.is_nan());
            assert_eq!(o.x, o.y);
        }
        for _ in 0..100 {
            let (o, rotation) = jump_sample(&mut rng, 1e30, -1e30);
            assert!(o.x.abs() <= 1e30_f32);
            assert!(rotation.abs() <= 1e30_f32);
        }
    }
}
