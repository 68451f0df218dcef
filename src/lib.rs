/*
 * Boid Backdrop - Module Definitions
 *
 * This file defines the module structure for the boid backdrop: a flocking
 * simulation whose agents fade in one after another, fly for as long as the
 * host keeps them running, then fade out and report that they are done.
 */

// Re-export key components for easier access
pub use boid::{Boid, Bounds, Limits};
pub use clock::{Clock, ManualClock, SystemClock};
pub use debug::DebugInfo;
pub use lifecycle::{Lifecycle, Phase};
pub use params::{ParamsError, SimulationParams};
pub use particle::{Particle, ParticlePool};
pub use render::{Surface, Tint};
pub use simulation::{DriverState, LifecycleEvent, Simulation, TickStatus};

// Define modules
pub mod app;
pub mod boid;
pub mod clock;
pub mod debug;
pub mod input;
pub mod lifecycle;
pub mod menu;
pub mod params;
pub mod particle;
pub mod render;
pub mod simulation;
pub mod ui;
pub mod vector;

// Constants
pub const BOIDS_ENTRY: &str = "boids";
pub const MENU_FALLBACK_MS: f64 = 10_000.0;
