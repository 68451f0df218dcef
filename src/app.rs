/*
 * Application Module
 *
 * This module defines the nannou model for the backdrop window. The model
 * owns the simulation, the control panel and the effect menu; `update`
 * drives one simulation tick per frame and `view` draws the result.
 *
 * Lifecycle events raised by the simulation are buffered and forwarded to
 * the menu after each tick, so the menu never needs a reference back into
 * the simulation.
 */

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::OnceLock;

use nannou::prelude::*;
use nannou_egui::Egui;
use tracing::{debug, error, info};

use crate::boid::Bounds;
use crate::clock::{Clock, SystemClock};
use crate::debug::DebugInfo;
use crate::input;
use crate::menu::Menu;
use crate::params::SimulationParams;
use crate::render::NannouSurface;
use crate::simulation::{LifecycleEvent, Simulation};
use crate::ui;
use crate::{BOIDS_ENTRY, MENU_FALLBACK_MS};

// Parameters handed over by `launch`; nannou's model function takes no
// arguments of its own
static LAUNCH_PARAMS: OnceLock<SimulationParams> = OnceLock::new();

// Main model for the application
pub struct Model {
    pub simulation: Simulation,
    // Values edited by the control panel; pushed into the simulation on change
    pub params: SimulationParams,
    pub egui: Egui,
    pub menu: Menu<&'static str>,
    pub debug_info: DebugInfo,
    pub clock: SystemClock,
    events: Rc<RefCell<Vec<LifecycleEvent>>>,
}

impl Model {
    // Start a run, or fade out the one in progress
    pub fn toggle_run(&mut self) {
        let now = self.clock.now_ms();
        if self.simulation.is_running() {
            self.simulation.stop(now);
        } else if self.simulation.start(now) {
            self.menu.activate(BOIDS_ENTRY, now);
        }
        self.dispatch_events(now);
    }

    fn dispatch_events(&mut self, now: f64) {
        let events: Vec<LifecycleEvent> = self.events.borrow_mut().drain(..).collect();
        for event in events {
            self.menu.handle(BOIDS_ENTRY, event, now);
        }
    }
}

// Open the window and run until it is closed
pub fn launch(params: SimulationParams) {
    if LAUNCH_PARAMS.set(params).is_err() {
        error!("launch called more than once; keeping the first parameters");
    }
    nannou::app(model).update(update).run();
}

fn fatal(message: &str) -> ! {
    error!("{message}");
    std::process::exit(1);
}

// Initialize the model
pub fn model(app: &App) -> Model {
    // Size the window at 80% of the primary monitor when one is reported
    let (window_width, window_height) = app
        .primary_monitor()
        .map(|monitor| {
            let size = monitor.size();
            (size.width as f32 * 0.8, size.height as f32 * 0.8)
        })
        .unwrap_or((1280.0, 800.0));

    let window_id = match app
        .new_window()
        .title("Boid Backdrop")
        .size(window_width as u32, window_height as u32)
        .view(view)
        .key_pressed(input::key_pressed)
        .resized(resized)
        .raw_event(raw_window_event)
        .build()
    {
        Ok(id) => id,
        Err(err) => fatal(&format!("failed to create window: {err:?}")),
    };

    let Some(window) = app.window(window_id) else {
        fatal("window closed before it could be initialised");
    };

    let egui = Egui::from_window(&window);
    let rect = window.rect();

    let params = LAUNCH_PARAMS.get().cloned().unwrap_or_default();
    let mut simulation = Simulation::from_params(params.clone(), Bounds::new(rect.w(), rect.h()));

    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    simulation.subscribe(move |event| sink.borrow_mut().push(event));

    let mut menu = Menu::new();
    menu.add_entry(BOIDS_ENTRY, "Boids", MENU_FALLBACK_MS);

    info!(
        width = rect.w(),
        height = rect.h(),
        boids = params.num_boids,
        "window ready"
    );

    Model {
        simulation,
        params,
        egui,
        menu,
        debug_info: DebugInfo::default(),
        clock: SystemClock::new(),
        events,
    }
}

// Update the model
pub fn update(app: &App, model: &mut Model, update: Update) {
    // Update debug info
    model.debug_info.fps = app.fps();
    model.debug_info.frame_time = update.since_last;

    let response = ui::update_ui(&mut model.egui, &mut model.params, &model.menu, &model.debug_info);

    if response.changes.any_changed {
        if response.changes.population_changed && model.simulation.is_running() {
            debug!(boids = model.params.num_boids, "population change deferred to next start");
        }
        model.simulation.set_params(model.params.clone());
    }

    if response.clicked == Some(BOIDS_ENTRY) {
        model.toggle_run();
    }

    let now = model.clock.now_ms();

    // The menu gives up waiting for the end event after its fallback
    if model.menu.poll(now) == Some(BOIDS_ENTRY) {
        model.simulation.stop(now);
    }

    model.simulation.tick(now);
    model.dispatch_events(now);
    model.debug_info.observe(&model.simulation, now);
}

pub fn view(app: &App, model: &Model, frame: Frame) {
    let draw = app.draw();
    let window_rect = app.window_rect();

    let mut surface = NannouSurface::new(&draw, window_rect);
    model.simulation.render(&mut surface);

    if model.params.show_debug {
        ui::draw_debug_info(&draw, &model.debug_info, window_rect);
    }

    if let Err(err) = draw.to_frame(app, &frame) {
        error!(?err, "failed to draw frame");
    }

    if let Err(err) = model.egui.draw_to_frame(&frame) {
        error!(?err, "failed to draw control panel");
    }
}

// Keep the wrap bounds in step with the window
fn resized(_app: &App, model: &mut Model, size: Vec2) {
    model.simulation.resize(size.x, size.y);
}

// Handle raw window events for egui
pub fn raw_window_event(_app: &App, model: &mut Model, event: &nannou::winit::event::WindowEvent) {
    model.egui.handle_raw_event(event);
}
