/*
 * Debug Information Module
 *
 * This module defines the DebugInfo struct that contains frame metrics and
 * simulation counters displayed in the control panel and the overlay.
 */

use std::time::Duration;

use crate::simulation::{DriverState, Simulation};
use rand::Rng;

#[derive(Clone, Debug)]
pub struct DebugInfo {
    pub fps: f32,
    pub frame_time: Duration,
    pub state: DriverState,
    pub elapsed_ms: f64,
    pub total_boids: usize,
    pub visible_boids: usize,
    pub particles: usize,
    pub particle_capacity: usize,
    pub evicted_particles: u64,
}

impl Default for DebugInfo {
    fn default() -> Self {
        Self {
            fps: 0.0,
            frame_time: Duration::ZERO,
            state: DriverState::Idle,
            elapsed_ms: 0.0,
            total_boids: 0,
            visible_boids: 0,
            particles: 0,
            particle_capacity: 0,
            evicted_particles: 0,
        }
    }
}

impl DebugInfo {
    // Refresh the simulation counters after a tick
    pub fn observe<R: Rng>(&mut self, simulation: &Simulation<R>, now_ms: f64) {
        self.state = simulation.state();
        self.elapsed_ms = if simulation.is_running() {
            simulation.elapsed(now_ms)
        } else {
            0.0
        };
        self.total_boids = simulation.boids().len();
        self.visible_boids = simulation.visible_count();
        self.particles = simulation.particles().len();
        self.particle_capacity = simulation.particles().capacity();
        self.evicted_particles = simulation.particles().evicted();
    }

    pub fn lines(&self) -> Vec<String> {
        vec![
            format!("FPS: {:.1}", self.fps),
            format!("Frame time: {:.2} ms", self.frame_time.as_secs_f64() * 1000.0),
            format!("State: {:?}", self.state),
            format!("Elapsed: {:.0} ms", self.elapsed_ms),
            format!("Boids: {}/{}", self.visible_boids, self.total_boids),
            format!(
                "Particles: {}/{} ({} evicted)",
                self.particles, self.particle_capacity, self.evicted_particles
            ),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boid::Bounds;
    use crate::params::SimulationParams;
    use crate::render::{Surface, Tint};
    use nannou::prelude::Vec2;

    struct CountingSurface {
        pub circles: usize,
        pub triangles: usize,
        pub clears: usize,
    }

    impl Surface for CountingSurface {
        fn size(&self) -> (f32, f32) {
            (0.0, 0.0)
        }

        fn clear(&mut self) {
            self.clears += 1;
        }

        fn fill_triangle(
            &mut self,
            _position: Vec2,
            _rotation: f32,
            _size: f32,
            _tint: Tint,
            _opacity: f32,
        ) {
            self.triangles += 1;
        }

        fn fill_circle(
            &mut self,
            _position: Vec2,
            _radius: f32,
            _tint: Tint,
            _opacity: f32,
        ) {
            self.circles += 1;
        }
    }

    #[test]
    fn observe_tracks_a_running_simulation() {
        let params = SimulationParams {
            num_boids: 4,
            fade_in_stagger_ms: 0.0,
            seed: Some(5),
            ..SimulationParams::default()
        };
        let mut sim = Simulation::from_params(params, Bounds::new(200.0, 200.0));
        let mut info = DebugInfo::default();

        info.observe(&sim, 0.0);
        assert_eq!(info.state, DriverState::Idle);
        assert_eq!(info.total_boids, 4);
        assert_eq!(info.visible_boids, 0);
        assert_eq!(info.particle_capacity, 1800);

        sim.start(0.0);
        sim.tick(0.0);
        sim.tick(600.0);
        info.observe(&sim, 600.0);
        assert_eq!(info.state, DriverState::Running);
        assert_eq!(info.elapsed_ms, 600.0);
        assert_eq!(info.visible_boids, 4);

        let mut surface = CountingSurface {
            circles: 0,
            triangles: 0,
            clears: 0,
        };
        sim.render(&mut surface);
        assert_eq!(surface.clears, 1);
        assert_eq!(surface.triangles, info.visible_boids);
        assert_eq!(surface.circles, info.particles);
    }

    #[test]
    fn lines_cover_every_counter() {
        let info = DebugInfo {
            particles: 12,
            particle_capacity: 1800,
            evicted_particles: 3,
            ..DebugInfo::default()
        };
        let lines = info.lines();
        assert_eq!(lines.len(), 6);
        assert!(lines[5].contains("12/1800") && lines[5].contains("3 evicted"));
    }
}
