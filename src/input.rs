/*
 * Input Module
 *
 * This module handles keyboard shortcuts for the backdrop.
 *
 * Features:
 * - Space starts the flock, or fades it out if it is already running
 * - P toggles particle trails
 * - D toggles the debug overlay
 */

use nannou::prelude::*;
use tracing::debug;

use crate::app::Model;

// Key pressed event handler
pub fn key_pressed(_app: &App, model: &mut Model, key: Key) {
    // Let egui keep keystrokes meant for its widgets
    if model.egui.ctx().wants_keyboard_input() {
        return;
    }

    match key {
        Key::Space => model.toggle_run(),
        Key::P => {
            model.params.emit_particles = !model.params.emit_particles;
            model.simulation.set_particles_enabled(model.params.emit_particles);
            debug!(enabled = model.params.emit_particles, "particle trails toggled");
        }
        Key::D => {
            model.params.show_debug = !model.params.show_debug;
        }
        _ => {}
    }
}
