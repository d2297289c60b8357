/// Fixed timestep accumulator.
/// Rotation rates are expressed per tick, so ticks must run at a steady rate
/// regardless of the browser's frame timing.
pub struct FixedTimestep {
    /// The fixed delta time per tick.
    dt: f32,
    /// Accumulated time from variable frame deltas.
    accumulator: f32,
    /// Upper bound on ticks per frame (a backgrounded tab resumes with a huge delta).
    max_steps: u32,
    /// Total ticks run since creation or the last reset.
    ticks: u64,
}

impl FixedTimestep {
    pub const DEFAULT_MAX_STEPS: u32 = 10;
    pub const DEFAULT_DT: f32 = 1.0 / 60.0;

    pub fn new(dt: f32) -> Self {
        Self::with_max_steps(dt, Self::DEFAULT_MAX_STEPS)
    }

    /// A `dt` that isn't a positive finite number falls back to [`Self::DEFAULT_DT`].
    pub fn with_max_steps(dt: f32, max_steps: u32) -> Self {
        let dt = if dt.is_finite() && dt > 0.0 {
            dt
        } else {
            log::warn!("fixed timestep {dt} is invalid; using {}", Self::DEFAULT_DT);
            Self::DEFAULT_DT
        };
        Self {
            dt,
            accumulator: 0.0,
            max_steps: max_steps.max(1),
            ticks: 0,
        }
    }

    /// Add frame time to the accumulator. Returns the number of fixed steps to run.
    pub fn accumulate(&mut self, frame_dt: f32) -> u32 {
        if !frame_dt.is_finite() || frame_dt <= 0.0 {
            return 0;
        }
        self.accumulator += frame_dt;
        self.accumulator = self.accumulator.min(self.dt * self.max_steps as f32);
        let steps = (self.accumulator / self.dt) as u32;
        self.accumulator -= steps as f32 * self.dt;
        self.ticks += steps as u64;
        steps
    }

    /// Interpolation alpha for rendering between ticks (0.0 to 1.0).
    pub fn alpha(&self) -> f32 {
        self.accumulator / self.dt
    }

    /// The fixed delta time.
    pub fn dt(&self) -> f32 {
        self.dt
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Drop any partial frame time and the tick count.
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
        self.ticks = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_step_exact() {
        let mut ts = FixedTimestep::new(1.0 / 60.0);
        assert_eq!(ts.accumulate(1.0 / 60.0), 1);
        assert_eq!(ts.ticks(), 1);
    }

    #[test]
    fn accumulates_partial() {
        let mut ts = FixedTimestep::new(1.0 / 60.0);
        assert_eq!(ts.accumulate(0.008), 0);
        assert_eq!(ts.accumulate(0.010), 1);
    }

    #[test]
    fn caps_at_max_steps() {
        let mut ts = FixedTimestep::new(1.0 / 60.0);
        assert_eq!(ts.accumulate(1.0), 10);

        let mut ts = FixedTimestep::with_max_steps(1.0 / 60.0, 3);
        assert_eq!(ts.accumulate(1.0), 3);
    }

    #[test]
    fn ignores_negative_and_nan_deltas() {
        let mut ts = FixedTimestep::new(1.0 / 60.0);
        assert_eq!(ts.accumulate(-1.0), 0);
        assert_eq!(ts.accumulate(f32::NAN), 0);
        assert_eq!(ts.alpha(), 0.0);
    }

    #[test]
    fn invalid_dt_falls_back_and_still_ticks() {
        for dt in [0.0, -1.0, f32::NAN, f32::INFINITY] {
            let mut ts = FixedTimestep::new(dt);
            assert_eq!(ts.dt(), FixedTimestep::DEFAULT_DT);
            assert_eq!(ts.accumulate(1.0 / 60.0), 1);
            assert!(ts.alpha().is_finite());
        }
    }

    #[test]
    fn reset_clears_state() {
        let mut ts = FixedTimestep::new(1.0 / 60.0);
        ts.accumulate(0.05);
        ts.reset();
        assert_eq!(ts.ticks(), 0);
        assert_eq!(ts.alpha(), 0.0);
    }
}
