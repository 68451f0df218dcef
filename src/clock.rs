/*
 * Clock Module
 *
 * Host timestamps are plain milliseconds. `SimClock` turns them into elapsed
 * time relative to the start of the current run.
 */

use std::cell::Cell;
use std::time::Instant;

// Monotonic millisecond timestamp source
pub trait Clock {
    fn now_ms(&self) -> f64;
}

pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }
}

// Hand-driven clock for tests and benchmarks
#[derive(Default)]
pub struct ManualClock {
    now: Cell<f64>,
}

impl ManualClock {
    pub fn new(start_ms: f64) -> Self {
        Self {
            now: Cell::new(start_ms),
        }
    }

    pub fn set(&self, now_ms: f64) {
        self.now.set(now_ms);
    }

    pub fn advance(&self, delta_ms: f64) -> f64 {
        let now = self.now.get() + delta_ms;
        self.now.set(now);
        now
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> f64 {
        self.now.get()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SimClock {
    started_at: Option<f64>,
}

impl SimClock {
    pub fn start(&mut self, now_ms: f64) {
        self.started_at = Some(now_ms);
    }

    pub fn reset(&mut self) {
        self.started_at = None;
    }

    // Milliseconds since `start`; zero before the first start or for
    // timestamps older than the start
    pub fn elapsed(&self, now_ms: f64) -> f64 {
        match self.started_at {
            Some(start) => (now_ms - start).max(0.0),
            None => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elapsed_is_relative_to_start() {
        let mut clock = SimClock::default();
        assert_eq!(clock.elapsed(500.0), 0.0);

        clock.start(1000.0);
        assert_eq!(clock.elapsed(1000.0), 0.0);
        assert_eq!(clock.elapsed(1250.0), 250.0);
        assert_eq!(clock.elapsed(900.0), 0.0);

        clock.start(2000.0);
        assert_eq!(clock.elapsed(2100.0), 100.0);

        clock.reset();
        assert_eq!(clock.elapsed(2100.0), 0.0);
    }

    #[test]
    fn manual_clock_advances() {
        let clock = ManualClock::new(10.0);
        assert_eq!(clock.advance(16.0), 26.0);
        clock.set(100.0);
        assert_eq!(clock.now_ms(), 100.0);
    }

    #[test]
    fn system_clock_is_monotonic() {
        let clock = SystemClock::new();
        let a = clock.now_ms();
        let b = clock.now_ms();
        assert!(b >= a);
    }
}
