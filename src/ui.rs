/*
 * UI Module
 *
 * This module contains functions for creating and updating the control panel
 * using nannou_egui: the effect menu, tuning sliders and a metrics section.
 * Edits are compared against a snapshot taken before the panel is drawn.
 */

use nannou_egui::{egui, Egui};

use crate::debug::DebugInfo;
use crate::menu::Menu;
use crate::params::{detect_changes, ParamChanges, SimulationParams};

const HIGHLIGHT: egui::Color32 = egui::Color32::from_rgb(0xFF, 0xE1, 0x00);

// What the user asked for this frame
#[derive(Clone, Copy, Debug)]
pub struct UiResponse<K> {
    pub clicked: Option<K>,
    pub changes: ParamChanges,
}

pub fn update_ui<K: Copy + PartialEq + std::fmt::Debug>(
    egui: &mut Egui,
    params: &mut SimulationParams,
    menu: &Menu<K>,
    debug_info: &DebugInfo,
) -> UiResponse<K> {
    let mut clicked = None;

    // Take a snapshot of current parameter values for change detection
    let before = params.snapshot();

    let ctx = egui.begin_frame();

    egui::Window::new("Backdrop")
        .default_pos([10.0, 10.0])
        .show(&ctx, |ui| {
            for entry in menu.entries().iter().filter(|e| e.visible) {
                ui.horizontal(|ui| {
                    if ui.button(entry.label.as_str()).clicked() {
                        clicked = Some(entry.key);
                    }
                    if entry.highlighted {
                        ui.colored_label(HIGHLIGHT, "running, click to stop");
                    }
                });
            }

            ui.separator();

            ui.collapsing("Population", |ui| {
                ui.add(egui::Slider::new(&mut params.num_boids, SimulationParams::get_num_boids_range()).text("Number of Boids"));
                ui.add(egui::Slider::new(&mut params.max_speed, SimulationParams::get_max_speed_range()).text("Max Speed"));
                ui.add(egui::Slider::new(&mut params.fade_in_stagger_ms, SimulationParams::get_stagger_range()).text("Fade-in Stagger (ms)"));
                ui.add(egui::Slider::new(&mut params.fade_out_stagger_ms, SimulationParams::get_stagger_range()).text("Fade-out Stagger (ms)"));
                ui.add(egui::Slider::new(&mut params.fade_in_duration_ms, SimulationParams::get_fade_duration_range()).text("Fade-in (ms)"));
                ui.add(egui::Slider::new(&mut params.fade_out_duration_ms, SimulationParams::get_fade_duration_range()).text("Fade-out (ms)"));
                ui.label("Population and stagger changes apply on the next start");
            });

            ui.collapsing("Flocking Behavior", |ui| {
                ui.add(egui::Slider::new(&mut params.separation_weight, SimulationParams::get_weight_range()).text("Separation Weight"));
                ui.add(egui::Slider::new(&mut params.alignment_weight, SimulationParams::get_weight_range()).text("Alignment Weight"));
                ui.add(egui::Slider::new(&mut params.cohesion_weight, SimulationParams::get_weight_range()).text("Cohesion Weight"));
                ui.add(egui::Slider::new(&mut params.separation_radius, SimulationParams::get_radius_range()).text("Separation Radius"));
                ui.add(egui::Slider::new(&mut params.alignment_radius, SimulationParams::get_radius_range()).text("Alignment Radius"));
                ui.add(egui::Slider::new(&mut params.cohesion_radius, SimulationParams::get_radius_range()).text("Cohesion Radius"));
            });

            ui.collapsing("Particles", |ui| {
                ui.checkbox(&mut params.emit_particles, "Emit Trails");
                ui.add(egui::Slider::new(&mut params.particle_capacity, SimulationParams::get_particle_capacity_range()).text("Pool Capacity"));
            });

            ui.collapsing("Metrics", |ui| {
                for line in debug_info.lines() {
                    ui.label(line);
                }
            });

            ui.checkbox(&mut params.show_debug, "Show Debug Overlay");
        });

    UiResponse {
        clicked,
        changes: detect_changes(&before, &params.snapshot()),
    }
}

// Draw debug information on the screen
pub fn draw_debug_info(draw: &nannou::Draw, debug_info: &DebugInfo, window_rect: nannou::geom::Rect) {
    let lines = debug_info.lines();

    // Background panel in the bottom-left corner, clear of the egui window
    let margin = 20.0;
    let line_height = 20.0;
    let panel_width = 240.0;
    let panel_height = line_height * lines.len() as f32 + margin;
    let panel_x = window_rect.left() + panel_width / 2.0;
    let panel_y = window_rect.bottom() + panel_height / 2.0;

    draw.rect()
        .x_y(panel_x, panel_y)
        .w_h(panel_width, panel_height)
        .color(nannou::color::rgba(0.0, 0.0, 0.0, 0.7));

    let text_x = window_rect.left() + margin;
    let text_y = window_rect.bottom() + panel_height - margin;

    for (i, text) in lines.iter().enumerate() {
        let y = text_y - (i as f32 * line_height);
        draw.text(text)
            .x_y(text_x + 90.0, y)
            .color(nannou::color::WHITE)
            .font_size(14);
    }
}
