/*
 * Particle Module
 *
 * Short-lived trail points shed behind moving boids. Particles live in a
 * bounded pool; when it overflows the oldest particles are dropped first.
 */

use std::collections::VecDeque;
use std::f32::consts::{FRAC_PI_4, PI};

use nannou::prelude::*;
use rand::Rng;

use crate::boid::Boid;
use crate::render::Tint;
use crate::vector::Steer;

pub const DRAG: f32 = 0.3;
pub const SHRINK: f32 = 0.985;
pub const MIN_SIZE: f32 = 0.1;
pub const MIN_OPACITY: f32 = 0.01;
pub const LIFE_TICKS: std::ops::RangeInclusive<u32> = 20..=38;
pub const PER_TICK: std::ops::RangeInclusive<usize> = 1..=3;

#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub position: Vec2,
    pub velocity: Vec2,
    pub size: f32,
    pub life: u32,
    pub max_life: u32,
    pub color: Tint,
    pub opacity: f32,
}

impl Particle {
    // One tick of motion and decay. Returns false once the particle is spent.
    pub fn step(&mut self) -> bool {
        self.position += self.velocity;
        self.velocity *= DRAG;
        self.size *= SHRINK;
        self.life = self.life.saturating_sub(1);
        self.opacity = if self.max_life == 0 {
            0.0
        } else {
            self.life as f32 / self.max_life as f32
        };

        self.is_alive()
    }

    pub fn is_alive(&self) -> bool {
        self.life > 0 && self.size >= MIN_SIZE && self.opacity >= MIN_OPACITY
    }
}

// Emit 1-3 particles behind a visible, moving boid. The spray fans out within
// 45 degrees of the reversed heading.
pub fn emit<R: Rng + ?Sized>(boid: &Boid, rng: &mut R) -> Vec<Particle> {
    let speed = boid.velocity.length();
    if !boid.lifecycle.is_visible() || speed <= 0.0 {
        return Vec::new();
    }

    let backwards = boid.heading() + PI;
    let tail = boid.position - boid.velocity.normalized_or_zero() * boid.size;
    let count = rng.gen_range(PER_TICK);

    (0..count)
        .map(|_| {
            let angle = backwards + rng.gen_range(-FRAC_PI_4..=FRAC_PI_4);
            let velocity = vec2(angle.cos(), angle.sin()) * speed * rng.gen_range(0.3f32..0.7);
            let life = rng.gen_range(LIFE_TICKS);
            let color = Tint::new(
                boid.color.hue,
                boid.color.saturation * 0.6,
                boid.color.lightness + rng.gen_range(-0.1f32..=0.1),
            );

            Particle {
                position: tail,
                velocity,
                size: boid.size * rng.gen_range(0.4f32..0.8),
                life,
                max_life: life,
                color,
                opacity: 1.0,
            }
        })
        .collect()
}

#[derive(Clone, Debug)]
pub struct ParticlePool {
    particles: VecDeque<Particle>,
    capacity: usize,
    evicted: u64,
}

impl ParticlePool {
    pub fn new(capacity: usize) -> Self {
        Self {
            particles: VecDeque::with_capacity(capacity),
            capacity,
            evicted: 0,
        }
    }

    // Append, discarding the oldest particles if over capacity.
    // Returns how many were discarded.
    pub fn push(&mut self, particle: Particle) -> usize {
        if self.capacity == 0 {
            self.evicted += 1;
            return 1;
        }

        let mut dropped = 0;
        while self.particles.len() >= self.capacity {
            self.particles.pop_front();
            dropped += 1;
        }
        self.particles.push_back(particle);
        self.evicted += dropped as u64;
        dropped
    }

    pub fn extend<I: IntoIterator<Item = Particle>>(&mut self, particles: I) -> usize {
        particles.into_iter().map(|p| self.push(p)).sum()
    }

    // Age every particle by one tick and drop the spent ones
    pub fn step(&mut self) {
        self.particles.retain_mut(|p| p.step());
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }

    // Shrinking keeps the newest particles
    pub fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity;
        while self.particles.len() > capacity {
            self.particles.pop_front();
            self.evicted += 1;
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    // Total particles discarded by overflow since creation
    pub fn evicted(&self) -> u64 {
        self.evicted
    }
}
