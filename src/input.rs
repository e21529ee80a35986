//! Keyboard shortcuts.
//!
//! | Key | Action |
//! |---|---|
//! | Space | pause / resume |
//! | G | toggle grid |
//! | T | toggle trails |
//! | + / - | zoom in / out |
//! | ] / [ | double / halve speed |
//! | Tab | cycle point of view |
//! | Arrows | pan |
//!
//! Nothing fires while an egui widget has keyboard focus.

use bevy::math::DVec2;
use bevy::prelude::*;
use bevy_egui::EguiContexts;

use crate::camera::ZOOM_SPEED;
use crate::scenarios::ScenarioState;

/// Key bindings as shown in the shortcuts window.
pub const SHORTCUTS: &[(&str, &str)] = &[
    ("Space", "Pause / resume"),
    ("G", "Toggle grid"),
    ("T", "Toggle trails"),
    ("+ / -", "Zoom in / out"),
    ("] / [", "Double / halve speed"),
    ("Tab", "Next point of view"),
    ("Arrows, left drag", "Pan"),
    ("Right drag", "Pitch and yaw"),
];

/// Pixels panned per frame while an arrow key is held.
pub const KEY_PAN_SPEED: f64 = 8.0;

/// Speed multiplier bounds for the `[` / `]` keys.
pub const MIN_SPEED: f64 = 0.125;
pub const MAX_SPEED: f64 = 1024.0;

/// Plugin providing keyboard input handling.
pub struct InputPlugin;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, (keyboard_shortcuts, keyboard_pan));
    }
}

fn keyboard_shortcuts(
    keys: Res<ButtonInput<KeyCode>>,
    mut scenario: ResMut<ScenarioState>,
    mut contexts: EguiContexts,
) {
    if egui_has_keyboard(&mut contexts) {
        return;
    }

    if keys.just_pressed(KeyCode::Space) {
        scenario.toggle_paused();
    }
    if keys.just_pressed(KeyCode::KeyG) {
        scenario.toggle_grid();
    }
    if keys.just_pressed(KeyCode::KeyT) {
        scenario.toggle_trails();
    }

    let zoom_step = ZOOM_SPEED * scenario.projector().zoom();
    if keys.pressed(KeyCode::Equal) || keys.pressed(KeyCode::NumpadAdd) {
        scenario.set_zoom(zoom_step);
    }
    if keys.pressed(KeyCode::Minus) || keys.pressed(KeyCode::NumpadSubtract) {
        scenario.set_zoom(-zoom_step);
    }

    if keys.just_pressed(KeyCode::BracketRight) {
        let speed = scaled_speed(scenario.speed(), 2.0);
        scenario.set_speed(speed);
    }
    if keys.just_pressed(KeyCode::BracketLeft) {
        let speed = scaled_speed(scenario.speed(), 0.5);
        scenario.set_speed(speed);
    }

    if keys.just_pressed(KeyCode::Tab)
        && let Some(next) = next_pov(scenario.body_keys(), scenario.pov())
    {
        let next = next.to_string();
        scenario.set_pov(&next);
    }
}

fn keyboard_pan(
    keys: Res<ButtonInput<KeyCode>>,
    mut scenario: ResMut<ScenarioState>,
    mut contexts: EguiContexts,
) {
    let offset = pan_offset(&keys, egui_has_keyboard(&mut contexts));
    if offset != DVec2::ZERO {
        scenario.pan(offset);
    }
}

/// Whether a focused egui widget is consuming key presses.
fn egui_has_keyboard(contexts: &mut EguiContexts) -> bool {
    contexts
        .ctx_mut()
        .is_ok_and(|ctx| ctx.wants_keyboard_input())
}

/// Screen offset for the held arrow keys; zero while egui holds the keyboard.
pub fn pan_offset(keys: &ButtonInput<KeyCode>, captured: bool) -> DVec2 {
    let mut offset = DVec2::ZERO;
    if captured {
        return offset;
    }
    if keys.pressed(KeyCode::ArrowLeft) {
        offset.x += KEY_PAN_SPEED;
    }
    if keys.pressed(KeyCode::ArrowRight) {
        offset.x -= KEY_PAN_SPEED;
    }
    if keys.pressed(KeyCode::ArrowUp) {
        offset.y += KEY_PAN_SPEED;
    }
    if keys.pressed(KeyCode::ArrowDown) {
        offset.y -= KEY_PAN_SPEED;
    }
    offset
}

/// Multiply the speed, keeping it within the keyboard range.
pub fn scaled_speed(speed: f64, factor: f64) -> f64 {
    (speed * factor).clamp(MIN_SPEED, MAX_SPEED)
}

/// The body after `current` in `keys`, wrapping around.
///
/// With no current POV the first body is chosen.
pub fn next_pov<'a>(keys: &'a [String], current: Option<&str>) -> Option<&'a str> {
    let next = match current.and_then(|c| keys.iter().position(|k| k == c)) {
        Some(index) => (index + 1) % keys.len(),
        None => 0,
    };
    keys.get(next).map(String::as_str)
}
