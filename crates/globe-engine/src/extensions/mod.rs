// extensions/mod.rs
//
// Optional animation helpers. Nothing in the core loop depends on these;
// viewers create a TweenState and tick it from their update.

pub mod easing;
pub mod tween;

pub use easing::{Easing, lerp, lerp_vec3, ease, ease_vec3};
pub use tween::{TweenState, Tween, TweenId, TweenTarget, TweenLoop};
