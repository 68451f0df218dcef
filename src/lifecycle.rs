/*
 * Lifecycle Module
 *
 * Per-boid fade state machine:
 *
 *   Invisible -> FadingIn -> Visible -> FadingOut -> Done
 *
 * Transitions are driven purely by elapsed simulation time, so replaying the
 * same sequence of timestamps always yields the same opacities.
 */

// Durations of the two opacity ramps, in milliseconds
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FadeTiming {
    pub fade_in_ms: f64,
    pub fade_out_ms: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Invisible,
    FadingIn,
    Visible,
    FadingOut,
    Done,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Lifecycle {
    pub phase: Phase,
    pub opacity: f32,
    pub fade_in_delay: f64,
    pub fade_out_delay: f64,
    pub fade_in_started_at: Option<f64>,
    pub fade_out_started_at: Option<f64>,
    // Opacity held when the fade-out began; the ramp runs from here to zero
    fade_out_from: f32,
}

impl Lifecycle {
    pub fn new(fade_in_delay: f64, fade_out_delay: f64) -> Self {
        Self {
            phase: Phase::Invisible,
            opacity: 0.0,
            fade_in_delay,
            fade_out_delay,
            fade_in_started_at: None,
            fade_out_started_at: None,
            fade_out_from: 0.0,
        }
    }

    pub fn is_done(&self) -> bool {
        self.phase == Phase::Done
    }

    pub fn is_visible(&self) -> bool {
        self.opacity > 0.0
    }

    // Advance both ramps to `elapsed`. `fade_out_at` is the global fade-out
    // start; `None` means no fade-out has been requested yet.
    pub fn advance(&mut self, elapsed: f64, fade_out_at: Option<f64>, timing: FadeTiming) {
        self.fade_in(elapsed, timing.fade_in_ms);
        if let Some(global_start) = fade_out_at {
            self.fade_out(elapsed, global_start, timing.fade_out_ms);
        }
    }

    fn fade_in(&mut self, elapsed: f64, duration: f64) {
        if self.phase == Phase::Invisible && elapsed >= self.fade_in_delay {
            self.phase = Phase::FadingIn;
            self.fade_in_started_at = Some(elapsed);
        }

        if self.phase != Phase::FadingIn {
            return;
        }

        let started = self.fade_in_started_at.unwrap_or(elapsed);
        let progress = ramp_progress(elapsed - started, duration);

        // Never step backwards, even if the host hands us an older timestamp
        self.opacity = progress.max(self.opacity).min(1.0);
        if self.opacity >= 1.0 {
            self.opacity = 1.0;
            self.phase = Phase::Visible;
        }
    }

    fn fade_out(&mut self, elapsed: f64, global_start: f64, duration: f64) {
        if self.phase == Phase::Done {
            return;
        }

        if self.phase != Phase::FadingOut && elapsed >= global_start + self.fade_out_delay {
            self.phase = Phase::FadingOut;
            self.fade_out_started_at = Some(elapsed);
            self.fade_out_from = self.opacity;
        }

        if self.phase != Phase::FadingOut {
            return;
        }

        let started = self.fade_out_started_at.unwrap_or(elapsed);
        let progress = ramp_progress(elapsed - started, duration);

        if progress >= 1.0 {
            self.opacity = 0.0;
            self.phase = Phase::Done;
        } else {
            self.opacity = (self.fade_out_from * (1.0 - progress)).min(self.opacity);
        }
    }
}

// Linear 0..=1 progress through a ramp; zero-length ramps complete instantly
fn ramp_progress(since_start: f64, duration: f64) -> f32 {
    if duration <= 0.0 {
        return 1.0;
    }
    (since_start / duration).clamp(0.0, 1.0) as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    const TIMING: FadeTiming = FadeTiming {
        fade_in_ms: 1200.0,
        fade_out_ms: 1200.0,
    };

    #[test]
    fn stays_invisible_until_its_stagger_elapses() {
        let mut lifecycle = Lifecycle::new(500.0, 0.0);
        lifecycle.advance(499.0, None, TIMING);
        assert_eq!(lifecycle.phase, Phase::Invisible);
        assert_eq!(lifecycle.opacity, 0.0);

        lifecycle.advance(500.0, None, TIMING);
        assert_eq!(lifecycle.phase, Phase::FadingIn);
        assert_eq!(lifecycle.fade_in_started_at, Some(500.0));
    }

    #[test]
    fn fade_in_ramps_linearly_and_settles_at_one() {
        let mut lifecycle = Lifecycle::new(0.0, 0.0);
        lifecycle.advance(0.0, None, TIMING);
        lifecycle.advance(600.0, None, TIMING);
        assert!((lifecycle.opacity - 0.5).abs() < 1e-6);

        lifecycle.advance(1200.0, None, TIMING);
        assert_eq!(lifecycle.opacity, 1.0);
        assert_eq!(lifecycle.phase, Phase::Visible);
    }

    #[test]
    fn fade_in_never_decreases_on_stale_timestamps() {
        let mut lifecycle = Lifecycle::new(0.0, 0.0);
        lifecycle.advance(0.0, None, TIMING);
        lifecycle.advance(900.0, None, TIMING);
        let before = lifecycle.opacity;
        lifecycle.advance(300.0, None, TIMING);
        assert!(lifecycle.opacity >= before);
    }

    #[test]
    fn fade_out_waits_for_global_start_plus_own_delay() {
        let mut lifecycle = Lifecycle::new(0.0, 300.0);
        lifecycle.advance(0.0, None, TIMING);
        lifecycle.advance(1200.0, None, TIMING);
        assert_eq!(lifecycle.phase, Phase::Visible);

        lifecycle.advance(1299.0, Some(1000.0), TIMING);
        assert_eq!(lifecycle.phase, Phase::Visible);

        lifecycle.advance(1300.0, Some(1000.0), TIMING);
        assert_eq!(lifecycle.phase, Phase::FadingOut);
        assert_eq!(lifecycle.fade_out_started_at, Some(1300.0));
    }

    #[test]
    fn fade_out_ramps_from_current_opacity() {
        let mut lifecycle = Lifecycle::new(0.0, 0.0);
        lifecycle.advance(0.0, None, TIMING);
        lifecycle.advance(600.0, None, TIMING);
        assert!((lifecycle.opacity - 0.5).abs() < 1e-6);

        lifecycle.advance(600.0, Some(600.0), TIMING);
        assert_eq!(lifecycle.phase, Phase::FadingOut);
        assert!((lifecycle.opacity - 0.5).abs() < 1e-6);

        lifecycle.advance(1200.0, Some(600.0), TIMING);
        assert!((lifecycle.opacity - 0.25).abs() < 1e-6);
    }

    #[test]
    fn done_is_terminal() {
        let mut lifecycle = Lifecycle::new(0.0, 0.0);
        lifecycle.advance(0.0, None, TIMING);
        lifecycle.advance(1200.0, None, TIMING);
        lifecycle.advance(1200.0, Some(1200.0), TIMING);
        lifecycle.advance(2400.0, Some(1200.0), TIMING);
        assert!(lifecycle.is_done());
        assert_eq!(lifecycle.opacity, 0.0);

        for t in [2500.0, 5000.0, 10_000.0] {
            lifecycle.advance(t, Some(1200.0), TIMING);
            assert!(lifecycle.is_done());
            assert_eq!(lifecycle.opacity, 0.0);
        }
    }

    #[test]
    fn pending_agent_fades_out_without_flashing() {
        let mut lifecycle = Lifecycle::new(5000.0, 0.0);
        lifecycle.advance(100.0, Some(100.0), TIMING);
        assert_eq!(lifecycle.phase, Phase::FadingOut);
        assert_eq!(lifecycle.opacity, 0.0);

        lifecycle.advance(1299.0, Some(100.0), TIMING);
        assert_eq!(lifecycle.opacity, 0.0);
        assert!(!lifecycle.is_done());

        lifecycle.advance(1300.0, Some(100.0), TIMING);
        assert!(lifecycle.is_done());

        // Its own stagger passing later must not revive it
        lifecycle.advance(6000.0, Some(100.0), TIMING);
        assert!(lifecycle.is_done());
        assert_eq!(lifecycle.opacity, 0.0);
    }

    #[test]
    fn zero_length_ramps_complete_immediately() {
        let timing = FadeTiming {
            fade_in_ms: 0.0,
            fade_out_ms: 0.0,
        };
        let mut lifecycle = Lifecycle::new(0.0, 0.0);
        lifecycle.advance(0.0, None, timing);
        assert_eq!(lifecycle.phase, Phase::Visible);
        lifecycle.advance(1.0, Some(1.0), timing);
        assert!(lifecycle.is_done());
    }
}
