// extensions/easing.rs
//
// Easing curves for tweened transitions. Pure math over t in [0, 1].

use std::f32::consts::PI;
use glam::Vec3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    #[default]
    Linear,
    QuadIn,
    QuadOut,
    QuadInOut,
    CubicIn,
    CubicOut,
    CubicInOut,
    QuartIn,
    QuartOut,
    QuartInOut,
    SineIn,
    SineOut,
    SineInOut,
    ExpoIn,
    ExpoOut,
    ExpoInOut,
    /// Overshoots past the target, then settles.
    BackOut,
    BounceOut,
    ElasticOut,
}

const BACK_C1: f32 = 1.70158;

impl Easing {
    /// Map normalized time to eased progress. `t` is clamped to [0, 1];
    /// the result stays in [0, 1] except for BackOut and ElasticOut.
    #[inline]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::QuadIn => poly_in(t, 2),
            Easing::QuadOut => poly_out(t, 2),
            Easing::QuadInOut => in_out(t, |u| poly_in(u, 2)),
            Easing::CubicIn => poly_in(t, 3),
            Easing::CubicOut => poly_out(t, 3),
            Easing::CubicInOut => in_out(t, |u| poly_in(u, 3)),
            Easing::QuartIn => poly_in(t, 4),
            Easing::QuartOut => poly_out(t, 4),
            Easing::QuartInOut => in_out(t, |u| poly_in(u, 4)),
            Easing::SineIn => 1.0 - (t * PI / 2.0).cos(),
            Easing::SineOut => (t * PI / 2.0).sin(),
            Easing::SineInOut => (1.0 - (PI * t).cos()) / 2.0,
            Easing::ExpoIn => expo_in(t),
            Easing::ExpoOut => 1.0 - expo_in(1.0 - t),
            Easing::ExpoInOut => in_out(t, expo_in),
            Easing::BackOut => {
                let u = t - 1.0;
                1.0 + (BACK_C1 + 1.0) * u.powi(3) + BACK_C1 * u.powi(2)
            }
            Easing::BounceOut => bounce_out(t),
            Easing::ElasticOut => {
                if t == 0.0 || t == 1.0 {
                    t
                } else {
                    let c4 = (2.0 * PI) / 3.0;
                    2.0_f32.powf(-10.0 * t) * ((t * 10.0 - 0.75) * c4).sin() + 1.0
                }
            }
        }
    }
}

#[inline]
fn poly_in(t: f32, n: i32) -> f32 {
    t.powi(n)
}

#[inline]
fn poly_out(t: f32, n: i32) -> f32 {
    1.0 - (1.0 - t).powi(n)
}

#[inline]
fn expo_in(t: f32) -> f32 {
    if t == 0.0 {
        0.0
    } else {
        2.0_f32.powf(10.0 * t - 10.0)
    }
}

/// Mirror an ease-in curve into a symmetric in-out curve.
#[inline]
fn in_out(t: f32, ease_in: impl Fn(f32) -> f32) -> f32 {
    if t < 0.5 {
        ease_in(t * 2.0) / 2.0
    } else {
        1.0 - ease_in((1.0 - t) * 2.0) / 2.0
    }
}

#[inline]
fn bounce_out(t: f32) -> f32 {
    const N1: f32 = 7.5625;
    const D1: f32 = 2.75;

    if t < 1.0 / D1 {
        N1 * t * t
    } else if t < 2.0 / D1 {
        let t = t - 1.5 / D1;
        N1 * t * t + 0.75
    } else if t < 2.5 / D1 {
        let t = t - 2.25 / D1;
        N1 * t * t + 0.9375
    } else {
        let t = t - 2.625 / D1;
        N1 * t * t + 0.984375
    }
}

// ── Interpolation helpers ────────────────────────────────────────────────

#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

#[inline]
pub fn lerp_vec3(a: Vec3, b: Vec3, t: f32) -> Vec3 {
    a + (b - a) * t
}

#[inline]
pub fn ease(a: f32, b: f32, t: f32, easing: Easing) -> f32 {
    lerp(a, b, easing.apply(t))
}

#[inline]
pub fn ease_vec3(a: Vec3, b: Vec3, t: f32, easing: Easing) -> Vec3 {
    lerp_vec3(a, b, easing.apply(t))
}
