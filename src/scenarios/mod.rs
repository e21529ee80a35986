//! Scenario state: the scene graph, clock and view that drive every frame.
//!
//! A [`ScenarioState`] is built from a [`ScenarioDefinition`] and is the sole
//! writer of body, trail and projector state. UI and input layers only call
//! its methods and read the [`Frame`] it produces; changes are reported back
//! as [`ScenarioEvent`]s.

pub mod definition;
pub mod presets;

use bevy::color::Srgba;
use bevy::math::{DVec2, DVec3};
use bevy::prelude::*;
use std::collections::HashMap;
use std::path::PathBuf;

use crate::body::{BodyGraph, BodyKind, CelestialBody, TrailHistory};
use crate::error::{Result, ScenarioError};
use crate::orbit::{CalendarInstant, OrbitModel};
use crate::projection::ViewportProjector;

pub use definition::{ObjectDefinition, ScenarioConfig, ScenarioDefinition};
pub use presets::{PRESETS, Preset, get_preset};

/// Canvas size used until the window reports its real size.
pub const DEFAULT_CANVAS_SIZE: DVec2 = DVec2::new(1280.0, 720.0);

/// Change notifications emitted by [`ScenarioState`].
#[derive(Clone, Debug, PartialEq)]
pub enum ScenarioEvent {
    PovChanged(String),
    PauseChanged(bool),
    ZoomChanged(f64),
    CenterChanged(DVec2),
    PitchChanged(f64),
    YawChanged(f64),
    GridToggled(bool),
    TrailsToggled(bool),
    SpeedChanged(f64),
    /// A new scenario replaced the old one; carries its display name.
    ScenarioLoaded(String),
}

/// Everything the renderer needs to draw one body.
#[derive(Clone, Debug, PartialEq)]
pub struct BodyDrawable {
    pub key: String,
    pub name: String,
    /// `None` when the body projects off the canvas.
    pub screen_position: Option<DVec2>,
    pub pixel_radius: f64,
    pub color: Srgba,
    pub is_star: bool,
    /// Oldest first. Empty for the POV body and when trails are hidden.
    pub trail_points: Vec<DVec2>,
}

/// Output of one [`ScenarioState::draw`] call.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Frame {
    /// Clock value the frame was resolved at.
    pub time: f64,
    pub bodies: Vec<BodyDrawable>,
    /// Grid line segments in screen space; empty when the grid is hidden.
    pub grid: Vec<(DVec2, DVec2)>,
}

impl Frame {
    pub fn body(&self, key: &str) -> Option<&BodyDrawable> {
        self.bodies.iter().find(|b| b.key == key)
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty() && self.grid.is_empty()
    }
}

/// The running scenario.
#[derive(Resource, Debug)]
pub struct ScenarioState {
    name: String,
    bodies: BodyGraph,
    draw_order: Vec<String>,
    projector: ViewportProjector,
    pov: Option<String>,
    time: f64,
    paused: bool,
    speed: f64,
    /// Clock increment per tick at speed 1, in Julian centuries.
    base_increment: f64,
    show_trails: bool,
    show_grid: bool,
    grid_spacing: f64,
    grid_extent: f64,
    frame: Frame,
    events: Vec<ScenarioEvent>,
    non_converged_solves: u64,
}

impl ScenarioState {
    /// Build a scenario from its definition on a canvas of `width × height` pixels.
    pub fn from_definition(def: &ScenarioDefinition, width: f64, height: f64) -> Result<Self> {
        let config = &def.config;
        config.validate()?;
        let mut projector = ViewportProjector::new(&config.projector_config(), width, height);
        let bodies = process_objects(def, &mut projector)?;

        let pov = match config.pov.as_deref() {
            Some(key) if !bodies.contains(key) => {
                return Err(ScenarioError::UnknownPov(key.to_string()));
            }
            Some(key) => {
                projector.set_pov(bodies.world_position(key, config.start_time())?.world);
                Some(key.to_string())
            }
            None => None,
        };

        let name = config
            .name
            .clone()
            .unwrap_or_else(|| "Untitled scenario".to_string());
        info!(
            "Loaded scenario '{}' with {} bodies (pov: {})",
            name,
            bodies.len(),
            pov.as_deref().unwrap_or("none")
        );

        let mut state = Self {
            name,
            draw_order: bodies.draw_order(),
            bodies,
            projector,
            pov,
            time: config.start_time(),
            paused: config.paused,
            speed: config.speed,
            base_increment: config.base_increment(),
            show_trails: config.show_trails,
            show_grid: config.show_grid,
            grid_spacing: config.grid_spacing_au,
            grid_extent: config.grid_extent_au,
            frame: Frame::default(),
            events: Vec::new(),
            non_converged_solves: 0,
        };
        state.draw(None, true)?;
        Ok(state)
    }

    /// Replace this scenario with a new one.
    ///
    /// The new state is built completely before anything is swapped in, so on
    /// error `self` is left exactly as it was. Pending events and the canvas
    /// size carry over.
    pub fn load_definition(&mut self, def: &ScenarioDefinition) -> Result<()> {
        let size = self.projector.canvas_size();
        let mut next = Self::from_definition(def, size.x, size.y)?;
        next.events = std::mem::take(&mut self.events);
        next.events.push(ScenarioEvent::ScenarioLoaded(next.name.clone()));
        *self = next;
        Ok(())
    }

    /// Resolve, project and collect every body at `time` (the clock when `None`).
    ///
    /// Trails are sampled unless `ignore_trails` is set; manual redraws use
    /// that so view changes do not disturb the sampling cadence.
    pub fn draw(&mut self, time: Option<f64>, ignore_trails: bool) -> Result<&Frame> {
        let time = time.unwrap_or(self.time);

        // The POV body is resolved first so every body in the frame shares it.
        if let Some(pov) = self.pov.as_deref() {
            let resolved = self.bodies.world_position(pov, time)?;
            self.projector.set_pov(resolved.world);
        }

        let mut resolved = Vec::with_capacity(self.draw_order.len());
        for key in &self.draw_order {
            resolved.push(self.bodies.world_position(key, time)?);
        }

        let sample_trails = self.show_trails && !ignore_trails;
        let mut drawables = Vec::with_capacity(resolved.len());
        for (key, position) in self.draw_order.iter().zip(resolved) {
            if !position.converged {
                self.non_converged_solves += 1;
                warn_once!("Kepler iteration hit its cap while resolving '{}'", key);
            }
            let screen_position = self.projector.get_coordinates(position.world);
            let is_pov = self.pov.as_deref() == Some(key.as_str());

            let Some(body) = self.bodies.get_mut(key) else {
                return Err(ScenarioError::UnknownBody(key.clone()));
            };
            body.set_last_position(position.world);
            if sample_trails && !is_pov {
                body.trail_mut().record(screen_position);
            }
            let trail_points = if self.show_trails && !is_pov {
                body.trail().points().collect()
            } else {
                Vec::new()
            };

            drawables.push(BodyDrawable {
                key: key.clone(),
                name: body.name.clone(),
                screen_position,
                pixel_radius: self.projector.get_radius(body.radius, body.kind),
                color: body.color,
                is_star: body.is_star(),
                trail_points,
            });
        }

        let grid = if self.show_grid {
            self.projector.grid_segments(self.grid_spacing, self.grid_extent)
        } else {
            Vec::new()
        };

        self.frame = Frame {
            time,
            bodies: drawables,
            grid,
        };
        Ok(&self.frame)
    }

    /// One animation tick: redraw, then advance the clock.
    ///
    /// Returns `false` without touching anything when paused.
    pub fn tick(&mut self) -> Result<bool> {
        if self.paused {
            return Ok(false);
        }
        self.clear();
        self.draw(None, false)?;
        self.time += self.base_increment * self.speed;
        Ok(true)
    }

    /// Drop the current frame.
    pub fn clear(&mut self) {
        self.frame = Frame::default();
    }

    /// Move the point of view to another body.
    ///
    /// Unknown keys and the current POV are ignored. Returns whether the POV
    /// changed.
    pub fn set_pov(&mut self, key: &str) -> bool {
        if key.is_empty() || self.pov.as_deref() == Some(key) {
            return false;
        }
        let position = match self.bodies.world_position(key, self.time) {
            Ok(resolved) => resolved.world,
            Err(err) => {
                warn!("Ignoring point of view '{}': {}", key, err);
                return false;
            }
        };

        info!("Point of view changed to '{}'", key);
        self.pov = Some(key.to_string());
        self.projector.set_pov(position);
        self.clear();
        self.flush_trails();
        self.redraw();
        self.events.push(ScenarioEvent::PovChanged(key.to_string()));
        true
    }

    /// Add `delta` to the zoom (clamped at the minimum).
    pub fn set_zoom(&mut self, delta: f64) -> bool {
        if !self.projector.set_zoom(delta) {
            return false;
        }
        self.view_changed(ScenarioEvent::ZoomChanged(self.projector.zoom()));
        true
    }

    pub fn set_center_point(&mut self, center: DVec2) -> bool {
        if !self.projector.set_center_point(center) {
            return false;
        }
        self.view_changed(ScenarioEvent::CenterChanged(center));
        true
    }

    /// Pan by a screen-space offset.
    pub fn pan(&mut self, offset: DVec2) -> bool {
        let center = self.projector.center_point() + offset;
        self.set_center_point(center)
    }

    pub fn set_pitch_angle(&mut self, pitch: f64) -> bool {
        if !self.projector.set_pitch_angle(pitch) {
            return false;
        }
        self.view_changed(ScenarioEvent::PitchChanged(pitch));
        true
    }

    pub fn set_yaw_angle(&mut self, yaw: f64) -> bool {
        if !self.projector.set_yaw_angle(yaw) {
            return false;
        }
        self.view_changed(ScenarioEvent::YawChanged(yaw));
        true
    }

    /// Resize the canvas. Trails are flushed since their pixels moved.
    pub fn set_canvas_size(&mut self, width: f64, height: f64) {
        if self.projector.canvas_size() == DVec2::new(width, height) {
            return;
        }
        self.projector.set_canvas_size(width, height);
        self.flush_trails();
        self.redraw_if_paused();
    }

    pub fn toggle_paused(&mut self) {
        self.set_paused(!self.paused);
    }

    /// Pause or resume. Resuming continues from the current clock.
    pub fn set_paused(&mut self, paused: bool) -> bool {
        if self.paused == paused {
            return false;
        }
        self.paused = paused;
        info!("Simulation {}", if paused { "paused" } else { "resumed" });
        self.events.push(ScenarioEvent::PauseChanged(paused));
        true
    }

    pub fn toggle_grid(&mut self) {
        self.show_grid = !self.show_grid;
        self.events.push(ScenarioEvent::GridToggled(self.show_grid));
        self.redraw_if_paused();
    }

    pub fn toggle_trails(&mut self) {
        self.show_trails = !self.show_trails;
        self.flush_trails();
        self.events.push(ScenarioEvent::TrailsToggled(self.show_trails));
        self.redraw_if_paused();
    }

    /// Set the clock multiplier. Negative and non-finite values are ignored
    /// so the clock never runs backwards.
    pub fn set_speed(&mut self, speed: f64) -> bool {
        if !(speed.is_finite() && speed >= 0.0) || speed == self.speed {
            return false;
        }
        self.speed = speed;
        self.events.push(ScenarioEvent::SpeedChanged(speed));
        true
    }

    /// Take every event emitted since the last call, oldest first.
    pub fn drain_events(&mut self) -> Vec<ScenarioEvent> {
        std::mem::take(&mut self.events)
    }

    /// The clock as a Gregorian UT date.
    pub fn calendar_date(&self) -> CalendarInstant {
        CalendarInstant::from_centuries(self.time)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    pub fn bodies(&self) -> &BodyGraph {
        &self.bodies
    }

    pub fn body(&self, key: &str) -> Option<&CelestialBody> {
        self.bodies.get(key)
    }

    /// Body keys in draw order.
    pub fn body_keys(&self) -> &[String] {
        &self.draw_order
    }

    pub fn projector(&self) -> &ViewportProjector {
        &self.projector
    }

    pub fn pov(&self) -> Option<&str> {
        self.pov.as_deref()
    }

    /// Simulation clock, in Julian centuries since J2000.
    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn set_time(&mut self, time: f64) {
        self.time = time;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn base_increment(&self) -> f64 {
        self.base_increment
    }

    pub fn show_trails(&self) -> bool {
        self.show_trails
    }

    pub fn show_grid(&self) -> bool {
        self.show_grid
    }

    /// How many body resolutions used an unconverged Kepler solve.
    pub fn non_converged_solves(&self) -> u64 {
        self.non_converged_solves
    }

    pub fn world_position(&self, key: &str) -> Result<DVec3> {
        Ok(self.bodies.world_position(key, self.time)?.world)
    }

    fn flush_trails(&mut self) {
        debug!("Flushing trails");
        self.bodies.flush_trails();
    }

    fn view_changed(&mut self, event: ScenarioEvent) {
        self.flush_trails();
        self.events.push(event);
        self.redraw_if_paused();
    }

    fn redraw_if_paused(&mut self) {
        if self.paused {
            self.redraw();
        }
    }

    fn redraw(&mut self) {
        if let Err(err) = self.draw(None, true) {
            error!("Redraw failed: {}", err);
        }
    }
}

/// Build the body graph and set up radius banding.
///
/// Bodies are created first; `orbiting` links are checked only once every
/// body exists, since a parent may be defined after its children.
fn process_objects(def: &ScenarioDefinition, projector: &mut ViewportProjector) -> Result<BodyGraph> {
    let config = &def.config;
    let mut graph = BodyGraph::new();
    let mut radii: HashMap<BodyKind, Vec<f64>> = HashMap::new();

    for (key, object) in &def.objects {
        let body = build_body(key, object, config)?;
        radii.entry(body.kind).or_default().push(body.radius);
        graph.insert(body);
    }

    for kind in BodyKind::ALL {
        projector.set_radii_list(kind, radii.get(&kind).map(Vec::as_slice).unwrap_or_default());
    }

    graph.detach_unresolved();
    graph.validate_acyclic()?;
    validate_parent_masses(&graph)?;
    Ok(graph)
}

fn build_body(key: &str, object: &ObjectDefinition, config: &ScenarioConfig) -> Result<CelestialBody> {
    let orbit = object.vars.orbit_model();
    orbit.validate().map_err(|reason| ScenarioError::InvalidElements {
        body: key.to_string(),
        reason,
    })?;

    let radius = object.vars.r.unwrap_or(0.0);
    let mass = object.vars.m.unwrap_or(0.0);
    if !(radius.is_finite() && radius >= 0.0 && mass.is_finite() && mass >= 0.0) {
        return Err(ScenarioError::InvalidElements {
            body: key.to_string(),
            reason: format!("radius and mass must be non-negative, got r={radius} m={mass}"),
        });
    }

    let trail = TrailHistory::new(config.trail_capacity, config.trails_frame_gap);
    let mut body = CelestialBody::new(key, object.kind, orbit, trail)
        .with_radius(radius)
        .with_mass(mass)
        .with_color(object.color(key)?)
        .with_initial_position(object.initial_position());
    if let Some(name) = &object.name {
        body.name = name.clone();
    }
    body.description = object.description.clone();
    body.orbiting = object.orbiting.clone();
    Ok(body)
}

/// A periodic orbit without an explicit period needs a massive parent.
fn validate_parent_masses(graph: &BodyGraph) -> Result<()> {
    for body in graph.iter() {
        let OrbitModel::Periodic(orbit) = &body.orbit else {
            continue;
        };
        let Some(parent) = body.orbiting.as_deref() else {
            continue;
        };
        if orbit.period.is_some() {
            continue;
        }
        let parent_mass = graph.get(parent).map(|parent| parent.mass).unwrap_or(0.0);
        if parent_mass <= 0.0 {
            return Err(ScenarioError::InvalidElements {
                body: body.key.clone(),
                reason: "no period given and the parent has no mass".to_string(),
            });
        }
    }
    Ok(())
}

/// A scenario the app should switch to on the next update.
#[derive(Clone, Debug, PartialEq)]
pub enum ScenarioRequest {
    Preset(&'static str),
    File(PathBuf),
}

/// Resource holding a pending scenario switch.
#[derive(Resource, Default)]
pub struct PendingScenario(pub Option<ScenarioRequest>);

/// Plugin providing scenario switching and event logging.
pub struct ScenarioPlugin;

impl Plugin for ScenarioPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PendingScenario>()
            .add_systems(Update, (apply_pending_scenario, log_scenario_events).chain());
    }
}

fn apply_pending_scenario(mut pending: ResMut<PendingScenario>, mut scenario: ResMut<ScenarioState>) {
    let Some(request) = pending.0.take() else {
        return;
    };
    let definition = match &request {
        ScenarioRequest::Preset(id) => get_preset(id),
        ScenarioRequest::File(path) => ScenarioDefinition::load(path),
    };
    if let Err(err) = definition.and_then(|def| scenario.load_definition(&def)) {
        error!("Failed to load scenario {:?}: {}", request, err);
    }
}

fn log_scenario_events(mut scenario: ResMut<ScenarioState>) {
    for event in scenario.drain_events() {
        debug!("Scenario event: {:?}", event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::fixtures::{SUN_EARTH_MOON_JSON, sun_earth_moon};
    use approx::assert_abs_diff_eq;

    fn state() -> ScenarioState {
        ScenarioState::from_definition(&sun_earth_moon(), 800.0, 600.0).unwrap()
    }

    #[test]
    fn test_load_builds_every_body() {
        let state = state();
        assert_eq!(state.name(), "Test system");
        assert_eq!(state.body_keys(), ["sun", "earth", "moon"]);
        assert_eq!(state.body("earth").unwrap().orbiting.as_deref(), Some("sun"));
        assert_eq!(state.frame().bodies.len(), 3);
        assert!(state.pov().is_none());
    }

    #[test]
    fn test_parent_defined_after_child() {
        // BTreeMap order puts "a-moon" before "b-planet".
        let json = r#"{ "objects": {
            "a-moon": { "type": "moon", "orbiting": "b-planet", "vars": { "a": 0.01, "p": 10 } },
            "b-planet": { "type": "planet", "initial_position": [2, 0, 0], "vars": { "m": 1e24 } }
        } }"#;
        let def = ScenarioDefinition::from_json_str(json).unwrap();
        let state = ScenarioState::from_definition(&def, 800.0, 600.0).unwrap();
        let moon = state.world_position("a-moon").unwrap();
        assert_abs_diff_eq!((moon - DVec3::new(2.0, 0.0, 0.0)).length(), 0.01, epsilon = 1e-9);
    }

    #[test]
    fn test_tick_advances_clock() {
        let mut state = state();
        assert!(state.tick().unwrap());
        assert_abs_diff_eq!(state.time(), 1.0 / 36525.0, epsilon = 1e-15);

        state.set_speed(2.0);
        state.tick().unwrap();
        assert_abs_diff_eq!(state.time(), 3.0 / 36525.0, epsilon = 1e-15);
    }

    #[test]
    fn test_tick_is_noop_when_paused() {
        let mut state = state();
        state.set_paused(true);
        let before = state.frame().clone();
        assert!(!state.tick().unwrap());
        assert_eq!(state.time(), 0.0);
        assert_eq!(state.frame(), &before);

        state.toggle_paused();
        assert!(state.tick().unwrap());
        assert!(state.time() > 0.0);
    }

    #[test]
    fn test_trails_sampled_per_tick() {
        let mut state = state();
        for _ in 0..3 {
            state.tick().unwrap();
        }
        let earth = state.frame().body("earth").unwrap();
        assert_eq!(earth.trail_points.len(), 3);
    }

    #[test]
    fn test_manual_redraw_ignores_trails() {
        let mut state = state();
        state.draw(None, true).unwrap();
        state.draw(Some(0.5), true).unwrap();
        assert!(state.body("earth").unwrap().trail().is_empty());
    }

    #[test]
    fn test_view_change_flushes_trails_and_notifies() {
        let mut state = state();
        state.tick().unwrap();
        state.tick().unwrap();
        assert!(!state.body("earth").unwrap().trail().is_empty());

        assert!(state.set_zoom(0.5));
        assert!(state.body("earth").unwrap().trail().is_empty());
        assert_eq!(state.drain_events(), vec![ScenarioEvent::ZoomChanged(1.5)]);
        assert!(state.drain_events().is_empty());
    }

    #[test]
    fn test_paused_view_change_redraws() {
        let mut state = state();
        state.set_paused(true);
        let before = state.frame().body("earth").unwrap().screen_position;
        state.set_center_point(DVec2::new(100.0, 100.0));
        let after = state.frame().body("earth").unwrap().screen_position;
        assert_ne!(before, after);
        assert!(state.body("earth").unwrap().trail().is_empty());
    }

    #[test]
    fn test_pitch_notifies_only_on_change() {
        let mut state = state();
        assert!(!state.set_pitch_angle(0.0));
        assert!(state.set_pitch_angle(0.3));
        assert!(!state.set_pitch_angle(0.3));
        assert_eq!(state.drain_events(), vec![ScenarioEvent::PitchChanged(0.3)]);
    }

    #[test]
    fn test_set_pov() {
        let mut state = state();
        state.tick().unwrap();
        state.tick().unwrap();

        assert!(state.set_pov("earth"));
        assert_eq!(state.pov(), Some("earth"));
        assert!(state.body("moon").unwrap().trail().is_empty());
        let earth = state.frame().body("earth").unwrap();
        assert_eq!(earth.screen_position, Some(DVec2::new(400.0, 300.0)));
        assert!(earth.trail_points.is_empty());

        assert!(!state.set_pov("earth"));
        assert!(!state.set_pov("pluto"));
        assert!(!state.set_pov(""));
        assert_eq!(
            state.drain_events(),
            vec![ScenarioEvent::PovChanged("earth".to_string())]
        );
    }

    #[test]
    fn test_pov_body_has_no_trail() {
        let mut state = state();
        state.set_pov("earth");
        for _ in 0..4 {
            state.tick().unwrap();
        }
        assert!(state.body("earth").unwrap().trail().is_empty());
        assert!(!state.body("sun").unwrap().trail().is_empty());
    }

    #[test]
    fn test_unknown_initial_pov_fails() {
        let mut def = sun_earth_moon();
        def.config.pov = Some("vulcan".to_string());
        let err = ScenarioState::from_definition(&def, 800.0, 600.0).unwrap_err();
        assert!(matches!(err, ScenarioError::UnknownPov(k) if k == "vulcan"));
    }

    #[test]
    fn test_failed_load_keeps_state() {
        let mut state = state();
        state.tick().unwrap();
        let time = state.time();

        let bad = ScenarioDefinition::from_json_str(
            r#"{ "objects": { "a": { "orbiting": "b" }, "b": { "orbiting": "a" } } }"#,
        )
        .unwrap();
        assert!(matches!(state.load_definition(&bad), Err(ScenarioError::CyclicOrbit(_))));
        assert_eq!(state.time(), time);
        assert_eq!(state.body_keys().len(), 3);
    }

    #[test]
    fn test_successful_load_replaces_state() {
        let mut state = state();
        state.set_canvas_size(1000.0, 500.0);
        let def = get_preset("earth-moon").unwrap();
        state.load_definition(&def).unwrap();
        assert_eq!(state.pov(), Some("earth"));
        assert_eq!(state.projector().canvas_size(), DVec2::new(1000.0, 500.0));
        assert_eq!(
            state.body("moon").unwrap().description,
            "Earth's only natural satellite."
        );
        assert!(state.body("earth").unwrap().description.is_empty());
        assert_eq!(
            state.drain_events(),
            vec![ScenarioEvent::ScenarioLoaded("Earth and Moon".to_string())]
        );
    }

    #[test]
    fn test_grid_in_frame_only_when_enabled() {
        let mut state = state();
        state.tick().unwrap();
        assert!(state.frame().grid.is_empty());
        state.toggle_grid();
        state.tick().unwrap();
        assert!(!state.frame().grid.is_empty());
    }

    #[test]
    fn test_hidden_trails_are_not_sampled() {
        let mut state = state();
        state.toggle_trails();
        state.tick().unwrap();
        assert!(state.body("earth").unwrap().trail().is_empty());
        assert!(state.frame().body("earth").unwrap().trail_points.is_empty());
    }

    #[test]
    fn test_periodic_orbit_needs_parent_mass() {
        let json = r#"{ "objects": {
            "rock": { "type": "planet" },
            "pebble": { "type": "moon", "orbiting": "rock", "vars": { "a": 0.1 } }
        } }"#;
        let def = ScenarioDefinition::from_json_str(json).unwrap();
        let err = ScenarioState::from_definition(&def, 800.0, 600.0).unwrap_err();
        assert!(matches!(err, ScenarioError::InvalidElements { body, .. } if body == "pebble"));
    }

    #[test]
    fn test_invalid_color_rejected() {
        let json = SUN_EARTH_MOON_JSON.replace("#ffdd44", "octarine");
        let def = ScenarioDefinition::from_json_str(&json).unwrap();
        assert!(matches!(
            ScenarioState::from_definition(&def, 800.0, 600.0),
            Err(ScenarioError::InvalidGraphic { .. })
        ));
    }

    #[test]
    fn test_invalid_config_fails_load() {
        for config in [
            r#""trail_capacity": 1000000000000000000"#,
            r#""orbit_scale": -40000"#,
            r#""speed": -5"#,
        ] {
            let json = format!(r#"{{ "config": {{ {config} }}, "objects": {{}} }}"#);
            let def = ScenarioDefinition::from_json_str(&json).unwrap();
            assert!(
                matches!(
                    ScenarioState::from_definition(&def, 800.0, 600.0),
                    Err(ScenarioError::InvalidConfig { .. })
                ),
                "{config}"
            );
        }
    }

    #[test]
    fn test_negative_speed_rejected() {
        let mut state = state();
        assert!(!state.set_speed(-5.0));
        assert!(!state.set_speed(f64::NAN));
        assert_eq!(state.speed(), 1.0);

        state.tick().unwrap();
        assert!(state.time() > 0.0);

        assert!(state.set_speed(0.0));
        let time = state.time();
        state.tick().unwrap();
        assert_eq!(state.time(), time);
    }

    #[test]
    fn test_unconverged_solve_is_counted() {
        let json = r#"{ "objects": {
            "sun": { "type": "star", "vars": { "r": 696000, "m": 1.989e30 } },
            "comet": { "type": "moon", "orbiting": "sun", "vars": { "a": 1.0, "e": 0.999, "p": 36525 } }
        } }"#;
        let def = ScenarioDefinition::from_json_str(json).unwrap();
        let mut state = ScenarioState::from_definition(&def, 800.0, 600.0).unwrap();
        assert_eq!(state.non_converged_solves(), 0);

        // One century period, so the mean anomaly is tiny just after periapsis.
        let frame = state.draw(Some(1e-6), true).unwrap();
        assert!(frame.body("comet").unwrap().screen_position.is_some());
        assert!(state.non_converged_solves() > 0);
    }

    #[test]
    fn test_calendar_date_follows_clock() {
        let mut state = state();
        state.set_time(1.0);
        let date = state.calendar_date();
        assert_eq!((date.year, date.month, date.day), (2100, 1, 1));
    }
}
