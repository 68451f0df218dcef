/*
 * Simulation Module
 *
 * The frame driver. A `Simulation` owns the flock, the particle pool, the run
 * clock and the random source, and moves through
 *
 *   Idle -> Running -> Ending -> Idle
 *
 * `start` and `stop` are the only external entry points; the host calls
 * `tick` once per display frame with the current timestamp and `render` to
 * draw the result. A run ends by itself once every boid has faded out and
 * the last particle has decayed.
 *
 * Within a tick boids are processed in index order and each one is moved
 * immediately after its own steering is computed, so later boids see the
 * already-updated positions of earlier ones.
 */

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use crate::boid::{Boid, Bounds, Limits};
use crate::clock::SimClock;
use crate::lifecycle::Lifecycle;
use crate::params::SimulationParams;
use crate::particle::{self, ParticlePool};
use crate::render::Surface;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DriverState {
    Idle,
    Running,
    // Fade-out requested; still ticking until everything has faded
    Ending,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LifecycleEvent {
    Started,
    Ended,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickStatus {
    // Nothing to do; the driver is not running
    Idle,
    Running,
    // This tick finished the run
    Ended,
}

type Observer = Box<dyn FnMut(LifecycleEvent)>;

pub struct Simulation<R: Rng = ChaCha8Rng> {
    params: SimulationParams,
    bounds: Bounds,
    boids: Vec<Boid>,
    particles: ParticlePool,
    clock: SimClock,
    // Elapsed time at which the global fade-out begins; `None` means never
    fade_out_at: Option<f64>,
    state: DriverState,
    rng: R,
    observers: Vec<Observer>,
    ticks: u64,
}

impl Simulation<ChaCha8Rng> {
    // Seeded from `params.seed`, or from OS entropy when unset
    pub fn from_params(params: SimulationParams, bounds: Bounds) -> Self {
        let rng = match params.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        Self::new(params, bounds, rng)
    }
}

impl<R: Rng> Simulation<R> {
    pub fn new(params: SimulationParams, bounds: Bounds, rng: R) -> Self {
        let particles = ParticlePool::new(params.particle_capacity);
        let mut simulation = Self {
            params,
            bounds,
            boids: Vec::new(),
            particles,
            clock: SimClock::default(),
            fade_out_at: None,
            state: DriverState::Idle,
            rng,
            observers: Vec::new(),
            ticks: 0,
        };
        simulation.populate();
        simulation
    }

    // Register a listener for `Started` / `Ended`
    pub fn subscribe<F>(&mut self, observer: F)
    where
        F: FnMut(LifecycleEvent) + 'static,
    {
        self.observers.push(Box::new(observer));
    }

    // Begin a fresh run at host time `now_ms`. Returns false (and changes
    // nothing) if a run is already in progress.
    pub fn start(&mut self, now_ms: f64) -> bool {
        if self.state != DriverState::Idle {
            return false;
        }

        self.populate();
        self.particles.clear();
        self.clock.start(now_ms);
        self.fade_out_at = self.params.auto_fade_out_after_ms;
        self.state = DriverState::Running;
        self.ticks = 0;

        info!(
            boids = self.boids.len(),
            width = self.bounds.width,
            height = self.bounds.height,
            particles = self.params.emit_particles,
            "boids started"
        );
        self.notify(LifecycleEvent::Started);
        true
    }

    // Request the fade-out at host time `now_ms`. Returns false if not
    // running or already fading out.
    pub fn stop(&mut self, now_ms: f64) -> bool {
        if self.state != DriverState::Running {
            return false;
        }

        let elapsed = self.clock.elapsed(now_ms);
        self.fade_out_at = Some(match self.fade_out_at {
            Some(scheduled) => scheduled.min(elapsed),
            None => elapsed,
        });
        self.state = DriverState::Ending;

        info!(elapsed_ms = elapsed, "boids fading out");
        true
    }

    // Advance one display frame
    pub fn tick(&mut self, now_ms: f64) -> TickStatus {
        if self.state == DriverState::Idle {
            return TickStatus::Idle;
        }

        let elapsed = self.clock.elapsed(now_ms);
        if self.state == DriverState::Running && self.fade_out_at.is_some_and(|at| elapsed >= at) {
            self.state = DriverState::Ending;
        }

        let timing = self.params.fade_timing();
        let mut evicted = 0;

        for i in 0..self.boids.len() {
            self.boids[i].lifecycle.advance(elapsed, self.fade_out_at, timing);
            if !self.boids[i].lifecycle.is_visible() {
                continue;
            }

            let force = self.boids[i].flocking_force(&self.boids, &self.params);
            let boid = &mut self.boids[i];
            boid.apply_force(force);
            boid.update(self.bounds);

            if self.params.emit_particles {
                let spawned = particle::emit(&self.boids[i], &mut self.rng);
                evicted += self.particles.extend(spawned);
            }
        }

        self.particles.step();
        self.ticks += 1;

        if evicted > 0 {
            debug!(evicted, pool = self.particles.len(), "particle pool overflow");
        }

        if self.is_finished() {
            self.state = DriverState::Idle;
            self.clock.reset();
            info!(elapsed_ms = elapsed, ticks = self.ticks, "boids ended");
            self.notify(LifecycleEvent::Ended);
            return TickStatus::Ended;
        }

        TickStatus::Running
    }

    // Clear the surface, then draw particles underneath the boids
    pub fn render<S: Surface + ?Sized>(&self, surface: &mut S) {
        surface.clear();

        for p in self.particles.iter() {
            surface.fill_circle(p.position, p.size, p.color, p.opacity);
        }

        for boid in self.boids.iter().filter(|b| b.lifecycle.is_visible()) {
            surface.fill_triangle(boid.position, boid.heading(), boid.size, boid.color, boid.opacity());
        }
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.bounds = Bounds::new(width, height);
        debug!(width, height, "viewport resized");
    }

    // Steering and fade tunables apply from the next tick. Stagger offsets and
    // population size are baked in at start, so a resized flock waits for the
    // next run unless the driver is idle.
    pub fn set_params(&mut self, params: SimulationParams) {
        self.particles.set_capacity(params.particle_capacity);
        let repopulate = self.state == DriverState::Idle && params.num_boids != self.boids.len();
        self.params = params;
        if repopulate {
            self.populate();
            return;
        }

        let limits = Limits::from_params(&self.params);
        for boid in &mut self.boids {
            boid.set_limits(limits);
        }
    }

    pub fn set_particles_enabled(&mut self, enabled: bool) {
        self.params.emit_particles = enabled;
    }

    pub fn params(&self) -> &SimulationParams {
        &self.params
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn boids(&self) -> &[Boid] {
        &self.boids
    }

    pub fn particles(&self) -> &ParticlePool {
        &self.particles
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state != DriverState::Idle
    }

    pub fn elapsed(&self, now_ms: f64) -> f64 {
        self.clock.elapsed(now_ms)
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn visible_count(&self) -> usize {
        self.boids.iter().filter(|b| b.lifecycle.is_visible()).count()
    }

    fn is_finished(&self) -> bool {
        self.boids.iter().all(|b| b.lifecycle.is_done()) && self.particles.is_empty()
    }

    fn populate(&mut self) {
        let params = &self.params;
        let bounds = self.bounds;
        let rng = &mut self.rng;

        self.boids = (0..params.num_boids)
            .map(|i| {
                let lifecycle = Lifecycle::new(params.fade_in_delay(i), params.fade_out_delay(i));
                Boid::spawn(&mut *rng, bounds, lifecycle, params)
            })
            .collect();
    }

    fn notify(&mut self, event: LifecycleEvent) {
        for observer in &mut self.observers {
            observer(event);
        }
    }
}
