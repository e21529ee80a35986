//! Camera and mouse view controls.
//!
//! The scenario projects into canvas pixels itself, so the camera is a plain
//! 2D camera; this module keeps the scenario's canvas size in step with the
//! window and turns mouse gestures into view changes.

use bevy::{
    input::mouse::{AccumulatedMouseMotion, AccumulatedMouseScroll},
    math::DVec2,
    prelude::*,
    window::PrimaryWindow,
};
use bevy_egui::EguiContexts;
use std::f64::consts::FRAC_PI_2;

use crate::scenarios::ScenarioState;

/// Zoom change per scroll line, as a fraction of the current zoom.
pub const ZOOM_SPEED: f64 = 0.1;

/// Pitch/yaw change per dragged pixel, in radians.
pub const ROTATE_SPEED: f64 = 0.005;

/// Marker component for the main camera.
#[derive(Component)]
pub struct MainCamera;

/// Plugin providing camera functionality.
pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_camera).add_systems(
            Update,
            (sync_canvas_size, camera_zoom, camera_pan, camera_rotate),
        );
    }
}

fn setup_camera(mut commands: Commands) {
    commands.spawn((Camera2d, MainCamera));
}

/// Keep the projector's canvas matching the primary window.
fn sync_canvas_size(
    window_query: Query<&Window, With<PrimaryWindow>>,
    mut scenario: ResMut<ScenarioState>,
) {
    let Ok(window) = window_query.single() else {
        return;
    };
    let size = DVec2::new(window.width() as f64, window.height() as f64);
    if scenario.projector().canvas_size() != size {
        scenario.set_canvas_size(size.x, size.y);
    }
}

fn pointer_over_ui(contexts: &mut EguiContexts) -> bool {
    contexts
        .ctx_mut()
        .map(|ctx| ctx.wants_pointer_input())
        .unwrap_or(false)
}

/// Scroll wheel zoom.
fn camera_zoom(
    mouse_scroll: Res<AccumulatedMouseScroll>,
    mut scenario: ResMut<ScenarioState>,
    mut contexts: EguiContexts,
) {
    if mouse_scroll.delta.y == 0.0 || pointer_over_ui(&mut contexts) {
        return;
    }
    // Zoom is additive; scaling the step by the current zoom keeps it even.
    let delta = mouse_scroll.delta.y as f64 * ZOOM_SPEED * scenario.projector().zoom();
    scenario.set_zoom(delta);
}

/// Left drag pans the view.
fn camera_pan(
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    mouse_motion: Res<AccumulatedMouseMotion>,
    mut scenario: ResMut<ScenarioState>,
    mut contexts: EguiContexts,
) {
    if !mouse_buttons.pressed(MouseButton::Left)
        || mouse_motion.delta == Vec2::ZERO
        || pointer_over_ui(&mut contexts)
    {
        return;
    }
    scenario.pan(mouse_motion.delta.as_dvec2());
}

/// Right drag tilts (vertical) and turns (horizontal) the view.
fn camera_rotate(
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    mouse_motion: Res<AccumulatedMouseMotion>,
    mut scenario: ResMut<ScenarioState>,
    mut contexts: EguiContexts,
) {
    if !mouse_buttons.pressed(MouseButton::Right)
        || mouse_motion.delta == Vec2::ZERO
        || pointer_over_ui(&mut contexts)
    {
        return;
    }
    let delta = mouse_motion.delta.as_dvec2() * ROTATE_SPEED;
    let pitch = (scenario.projector().pitch() + delta.y).clamp(0.0, FRAC_PI_2);
    let yaw = scenario.projector().yaw() + delta.x;
    scenario.set_pitch_angle(pitch);
    scenario.set_yaw_angle(yaw);
}
