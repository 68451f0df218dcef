/*
 * Simulation Parameters Module
 *
 * This module defines the SimulationParams struct that contains every tuning
 * constant of the backdrop. Defaults reproduce the stock animation; a TOML
 * file can override any subset of them. It also provides slider ranges and
 * change detection for the control panel.
 */

use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::lifecycle::FadeTiming;

#[derive(Debug, Error)]
pub enum ParamsError {
    #[error("failed to read parameter file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid parameter file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("{field} must be {requirement}, got {value}")]
    OutOfRange {
        field: &'static str,
        requirement: &'static str,
        value: f64,
    },
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct SimulationParams {
    pub num_boids: usize,
    // Per-index delay offsets so boids do not fade in or out in unison
    pub fade_in_stagger_ms: f64,
    pub fade_out_stagger_ms: f64,
    pub fade_in_duration_ms: f64,
    pub fade_out_duration_ms: f64,
    pub separation_weight: f32,
    pub alignment_weight: f32,
    pub cohesion_weight: f32,
    pub separation_radius: f32,
    pub alignment_radius: f32,
    pub cohesion_radius: f32,
    pub max_speed: f32,
    pub max_force: f32,
    pub boid_size: f32,
    pub emit_particles: bool,
    pub particle_capacity: usize,
    // Fade out on its own this long after starting; `None` waits for stop()
    pub auto_fade_out_after_ms: Option<f64>,
    pub seed: Option<u64>,
    pub show_debug: bool,
}

// A snapshot of parameter values used for change detection
#[derive(Clone, Debug, PartialEq)]
pub struct ParamSnapshot {
    num_boids: usize,
    timings: [f64; 4],
    weights: [f32; 3],
    radii: [f32; 3],
    limits: [f32; 3],
    emit_particles: bool,
    particle_capacity: usize,
    show_debug: bool,
}

// What changed since the last snapshot
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ParamChanges {
    pub population_changed: bool,
    pub any_changed: bool,
}

// What differs between two snapshots
pub fn detect_changes(previous: &ParamSnapshot, current: &ParamSnapshot) -> ParamChanges {
    ParamChanges {
        population_changed: current.num_boids != previous.num_boids,
        any_changed: current != previous,
    }
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            num_boids: 50,
            fade_in_stagger_ms: 100.0,
            fade_out_stagger_ms: 100.0,
            fade_in_duration_ms: 1200.0,
            fade_out_duration_ms: 1200.0,
            separation_weight: 1.0,
            alignment_weight: 0.4,
            cohesion_weight: 1.0,
            separation_radius: 25.0,
            alignment_radius: 50.0,
            cohesion_radius: 50.0,
            max_speed: 2.0,
            max_force: 0.03,
            boid_size: 3.0,
            emit_particles: false,
            particle_capacity: 1800,
            auto_fade_out_after_ms: None,
            seed: None,
            show_debug: false,
        }
    }
}

impl SimulationParams {
    pub fn from_toml_str(source: &str) -> Result<Self, ParamsError> {
        let params: Self = toml::from_str(source)?;
        params.validate()?;
        Ok(params)
    }

    pub fn load(path: &Path) -> Result<Self, ParamsError> {
        let source = std::fs::read_to_string(path).map_err(|source| ParamsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    pub fn validate(&self) -> Result<(), ParamsError> {
        let non_negative = [
            ("fade_in_stagger_ms", self.fade_in_stagger_ms),
            ("fade_out_stagger_ms", self.fade_out_stagger_ms),
            ("fade_in_duration_ms", self.fade_in_duration_ms),
            ("fade_out_duration_ms", self.fade_out_duration_ms),
            ("separation_weight", f64::from(self.separation_weight)),
            ("alignment_weight", f64::from(self.alignment_weight)),
            ("cohesion_weight", f64::from(self.cohesion_weight)),
            (
                "auto_fade_out_after_ms",
                self.auto_fade_out_after_ms.unwrap_or(0.0),
            ),
        ];
        for (field, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(ParamsError::OutOfRange {
                    field,
                    requirement: "finite and non-negative",
                    value,
                });
            }
        }

        let positive = [
            ("separation_radius", self.separation_radius),
            ("alignment_radius", self.alignment_radius),
            ("cohesion_radius", self.cohesion_radius),
            ("max_speed", self.max_speed),
            ("max_force", self.max_force),
            ("boid_size", self.boid_size),
        ];
        for (field, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(ParamsError::OutOfRange {
                    field,
                    requirement: "finite and positive",
                    value: f64::from(value),
                });
            }
        }

        if self.particle_capacity == 0 {
            return Err(ParamsError::OutOfRange {
                field: "particle_capacity",
                requirement: "at least 1",
                value: 0.0,
            });
        }

        Ok(())
    }

    pub fn fade_timing(&self) -> FadeTiming {
        FadeTiming {
            fade_in_ms: self.fade_in_duration_ms,
            fade_out_ms: self.fade_out_duration_ms,
        }
    }

    pub fn fade_in_delay(&self, index: usize) -> f64 {
        index as f64 * self.fade_in_stagger_ms
    }

    pub fn fade_out_delay(&self, index: usize) -> f64 {
        index as f64 * self.fade_out_stagger_ms
    }

    pub fn snapshot(&self) -> ParamSnapshot {
        ParamSnapshot {
            num_boids: self.num_boids,
            timings: [
                self.fade_in_stagger_ms,
                self.fade_out_stagger_ms,
                self.fade_in_duration_ms,
                self.fade_out_duration_ms,
            ],
            weights: [self.separation_weight, self.alignment_weight, self.cohesion_weight],
            radii: [self.separation_radius, self.alignment_radius, self.cohesion_radius],
            limits: [self.max_speed, self.max_force, self.boid_size],
            emit_particles: self.emit_particles,
            particle_capacity: self.particle_capacity,
            show_debug: self.show_debug,
        }
    }


    // Get parameter ranges for UI sliders
    pub fn get_num_boids_range() -> RangeInclusive<usize> {
        0..=400
    }

    pub fn get_weight_range() -> RangeInclusive<f32> {
        0.0..=3.0
    }

    pub fn get_radius_range() -> RangeInclusive<f32> {
        5.0..=150.0
    }

    pub fn get_max_speed_range() -> RangeInclusive<f32> {
        0.5..=8.0
    }

    pub fn get_stagger_range() -> RangeInclusive<f64> {
        0.0..=500.0
    }

    pub fn get_fade_duration_range() -> RangeInclusive<f64> {
        0.0..=5000.0
    }

    pub fn get_particle_capacity_range() -> RangeInclusive<usize> {
        100..=5000
    }
}
