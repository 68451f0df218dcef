/*
 * Boid Module
 *
 * This module defines the Boid struct and its behavior.
 * Each boid follows three main rules:
 * 1. Separation: Avoid crowding neighbors
 * 2. Alignment: Steer towards the average heading of neighbors
 * 3. Cohesion: Steer towards the average position of neighbors
 *
 * Boids live on a toroidal plane: leaving one edge re-enters at the opposite one.
 */

use nannou::prelude::*;
use rand::Rng;

use crate::lifecycle::Lifecycle;
use crate::params::SimulationParams;
use crate::render::Tint;
use crate::vector::Steer;

// Size of the toroidal plane, origin top-left
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

// Per-boid steering limits and glyph size
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Limits {
    pub max_speed: f32,
    pub max_force: f32,
    pub size: f32,
}

impl Limits {
    pub fn from_params(params: &SimulationParams) -> Self {
        Self {
            max_speed: params.max_speed,
            max_force: params.max_force,
            size: params.boid_size,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Boid {
    pub position: Vec2,
    pub velocity: Vec2,
    pub acceleration: Vec2,
    pub max_speed: f32,
    pub max_force: f32,
    pub size: f32,
    pub color: Tint,
    pub lifecycle: Lifecycle,
}

impl Boid {
    pub fn new(position: Vec2, velocity: Vec2, lifecycle: Lifecycle, limits: Limits) -> Self {
        Self {
            position,
            velocity,
            acceleration: Vec2::ZERO,
            max_speed: limits.max_speed,
            max_force: limits.max_force,
            size: limits.size,
            color: Tint::new(0.0, 0.8, 0.6),
            lifecycle,
        }
    }

    // Random position on the plane, random velocity in (-1, 1) per axis and a
    // random hue. Limits and size come from `params`.
    pub fn spawn<R: Rng + ?Sized>(
        rng: &mut R,
        bounds: Bounds,
        lifecycle: Lifecycle,
        params: &SimulationParams,
    ) -> Self {
        let x = rng.gen::<f32>() * bounds.width;
        let y = rng.gen::<f32>() * bounds.height;
        let vx = (rng.gen::<f32>() - 0.5) * 2.0;
        let vy = (rng.gen::<f32>() - 0.5) * 2.0;
        let hue_degrees = (rng.gen::<f32>() * 360.0).floor();

        Self {
            color: Tint::new(hue_degrees / 360.0, 0.8, 0.6),
            ..Self::new(vec2(x, y), vec2(vx, vy), lifecycle, Limits::from_params(params))
        }
    }

    // Takes effect from the next steering and integration step
    pub fn set_limits(&mut self, limits: Limits) {
        self.max_speed = limits.max_speed;
        self.max_force = limits.max_force;
        self.size = limits.size;
    }

    pub fn opacity(&self) -> f32 {
        self.lifecycle.opacity
    }

    pub fn heading(&self) -> f32 {
        self.velocity.heading()
    }

    // Apply a force to the boid
    pub fn apply_force(&mut self, force: Vec2) {
        self.acceleration += force;
    }

    // Integrate velocity and position, then wrap around the plane
    pub fn update(&mut self, bounds: Bounds) {
        self.velocity = (self.velocity + self.acceleration).limit(self.max_speed);
        self.position += self.velocity;
        self.acceleration = Vec2::ZERO;
        self.wrap_edges(bounds);
    }

    // Re-enter at the opposite edge when crossing any side of the plane
    pub fn wrap_edges(&mut self, bounds: Bounds) {
        if self.position.x < 0.0 {
            self.position.x = bounds.width;
        } else if self.position.x > bounds.width {
            self.position.x = 0.0;
        }

        if self.position.y < 0.0 {
            self.position.y = bounds.height;
        } else if self.position.y > bounds.height {
            self.position.y = 0.0;
        }
    }

    // Weighted sum of the three rules; not yet applied
    pub fn flocking_force(&self, boids: &[Boid], params: &SimulationParams) -> Vec2 {
        let separation = self.separation(boids, params.separation_radius) * params.separation_weight;
        let alignment = self.alignment(boids, params.alignment_radius) * params.alignment_weight;
        let cohesion = self.cohesion(boids, params.cohesion_radius) * params.cohesion_weight;

        separation + alignment + cohesion
    }

    // Calculate separation force (avoid crowding neighbors)
    pub fn separation(&self, boids: &[Boid], perception_radius: f32) -> Vec2 {
        let mut steering = Vec2::ZERO;
        let mut count = 0;

        for other in boids {
            let d = self.position.distance(other.position);

            // Skips itself and exactly coincident neighbours
            if d > 0.0 && d < perception_radius {
                // Closer neighbours push harder
                let diff = (self.position - other.position).normalized_or_zero() / d;
                steering += diff;
                count += 1;
            }
        }

        if count == 0 {
            return Vec2::ZERO;
        }

        steering /= count as f32;
        // Reynolds: steering = desired - velocity
        let desired = steering.normalized_or_zero() * self.max_speed;
        (desired - self.velocity).limit(self.max_force)
    }

    // Calculate alignment force (steer towards average heading of neighbors)
    pub fn alignment(&self, boids: &[Boid], perception_radius: f32) -> Vec2 {
        let mut sum = Vec2::ZERO;
        let mut count = 0;

        for other in boids {
            let d = self.position.distance(other.position);
            if d > 0.0 && d < perception_radius {
                sum += other.velocity;
                count += 1;
            }
        }

        if count == 0 {
            return Vec2::ZERO;
        }

        let desired = (sum / count as f32).normalized_or_zero() * self.max_speed;
        (desired - self.velocity).limit(self.max_force)
    }

    // Calculate cohesion force (steer towards average position of neighbors)
    pub fn cohesion(&self, boids: &[Boid], perception_radius: f32) -> Vec2 {
        let mut sum = Vec2::ZERO;
        let mut count = 0;

        for other in boids {
            let d = self.position.distance(other.position);
            if d > 0.0 && d < perception_radius {
                sum += other.position;
                count += 1;
            }
        }

        if count == 0 {
            return Vec2::ZERO;
        }

        self.seek(sum / count as f32)
    }

    // Steer towards `target` at full speed
    pub fn seek(&self, target: Vec2) -> Vec2 {
        let desired = (target - self.position).normalized_or_zero() * self.max_speed;
        (desired - self.velocity).limit(self.max_force)
    }
}
