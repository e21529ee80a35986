//! Toolbar dock at the bottom of the window.
//!
//! The dock is a single horizontal strip with:
//! - Play/Pause toggle and the current date
//! - Speed multipliers
//! - Zoom in/out, grid and trail toggles
//! - Pitch slider
//! - Point-of-view and scenario pickers
//! - Shortcuts window toggle
//!
//! Every control goes through `ScenarioState` methods; nothing here touches
//! bodies or the projector directly.

use bevy::prelude::*;
use bevy_egui::{EguiContexts, egui};

use super::icons;
use crate::camera::ZOOM_SPEED;
use crate::input::SHORTCUTS;
use crate::scenarios::{PRESETS, PendingScenario, ScenarioRequest, ScenarioState};

/// Colors for the dock UI.
mod colors {
    use bevy_egui::egui::Color32;

    pub const DOCK_BG: Color32 = Color32::from_rgba_premultiplied(18, 20, 32, 235);
    pub const ACTIVE: Color32 = Color32::from_rgb(85, 221, 136);
    pub const INACTIVE: Color32 = Color32::from_rgb(120, 120, 130);
    pub const PLAY_ICON: Color32 = Color32::from_rgb(85, 221, 136);
    pub const PAUSE_ICON: Color32 = Color32::from_rgb(221, 170, 85);
    pub const TEXT: Color32 = Color32::from_rgb(220, 220, 230);
    pub const BORDER: Color32 = Color32::from_rgb(60, 60, 80);
}

/// Speed multipliers offered as buttons.
pub const SPEEDS: [f64; 4] = [1.0, 10.0, 100.0, 1000.0];

/// Whether the keyboard shortcuts window is open.
#[derive(Resource, Default)]
pub struct ShortcutsOverlay {
    pub open: bool,
}

/// System that renders the dock.
pub fn dock_system(
    mut contexts: EguiContexts,
    mut scenario: ResMut<ScenarioState>,
    mut pending: ResMut<PendingScenario>,
    mut overlay: ResMut<ShortcutsOverlay>,
) {
    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };

    egui::TopBottomPanel::bottom("dock")
        .exact_height(56.0)
        .frame(
            egui::Frame::new()
                .fill(colors::DOCK_BG)
                .inner_margin(egui::Margin::symmetric(20, 10)),
        )
        .show(ctx, |ui| {
            ui.horizontal_centered(|ui| {
                ui.spacing_mut().item_spacing.x = 12.0;

                render_play_pause(ui, &mut scenario);
                ui.label(
                    egui::RichText::new(scenario.calendar_date().to_display_string())
                        .monospace()
                        .size(14.0)
                        .color(colors::TEXT),
                );
                ui.separator();

                render_speed_buttons(ui, &mut scenario);
                ui.separator();

                render_view_toggles(ui, &mut scenario);
                ui.separator();

                render_pitch_slider(ui, &mut scenario);
                ui.separator();

                render_pov_picker(ui, &mut scenario);
                render_scenario_picker(ui, &scenario, &mut pending);

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    render_help_button(ui, &mut overlay);
                });
            });
        });

    if overlay.open {
        render_shortcuts_overlay(ctx, &mut overlay);
    }
}

fn render_play_pause(ui: &mut egui::Ui, scenario: &mut ScenarioState) {
    let (icon, color, tooltip) = if scenario.is_paused() {
        (icons::PLAY, colors::PLAY_ICON, "Play (Space)")
    } else {
        (icons::PAUSE, colors::PAUSE_ICON, "Pause (Space)")
    };

    let button = egui::Button::new(egui::RichText::new(icon).size(22.0).color(color))
        .min_size(egui::vec2(40.0, 36.0));

    if ui.add(button).on_hover_text(tooltip).clicked() {
        scenario.toggle_paused();
    }
}

fn render_speed_buttons(ui: &mut egui::Ui, scenario: &mut ScenarioState) {
    let current = speed_index(scenario.speed());

    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 4.0;
        for (i, &speed) in SPEEDS.iter().enumerate() {
            let is_active = current == Some(i);
            let color = if is_active { colors::ACTIVE } else { colors::INACTIVE };
            let mut text = egui::RichText::new(format!("{}x", speed as i32))
                .size(14.0)
                .color(color);
            if is_active {
                text = text.strong();
            }

            if ui
                .add(egui::Button::new(text).frame(is_active).min_size(egui::vec2(40.0, 28.0)))
                .on_hover_text("Speed multiplier ([ / ] to halve or double)")
                .clicked()
            {
                scenario.set_speed(speed);
            }
        }
    });
}

/// Index of `speed` in [`SPEEDS`], if it is one of them.
pub fn speed_index(speed: f64) -> Option<usize> {
    SPEEDS.iter().position(|&s| (speed - s).abs() < 1e-9)
}

fn render_view_toggles(ui: &mut egui::Ui, scenario: &mut ScenarioState) {
    let zoom_step = ZOOM_SPEED * scenario.projector().zoom();
    if ui.button(icons::ZOOM_OUT).on_hover_text("Zoom out (-)").clicked() {
        scenario.set_zoom(-zoom_step);
    }
    if ui.button(icons::ZOOM_IN).on_hover_text("Zoom in (+)").clicked() {
        scenario.set_zoom(zoom_step);
    }

    let toggle = |active: bool, icon: &str| {
        let color = if active { colors::ACTIVE } else { colors::INACTIVE };
        egui::Button::new(egui::RichText::new(icon).size(16.0).color(color))
    };
    if ui.add(toggle(scenario.show_grid(), icons::GRID)).on_hover_text("Grid (G)").clicked() {
        scenario.toggle_grid();
    }
    if ui
        .add(toggle(scenario.show_trails(), icons::TRAILS))
        .on_hover_text("Trails (T)")
        .clicked()
    {
        scenario.toggle_trails();
    }
}

fn render_pitch_slider(ui: &mut egui::Ui, scenario: &mut ScenarioState) {
    let mut degrees = scenario.projector().pitch().to_degrees();
    ui.label(egui::RichText::new("Pitch").color(colors::TEXT));
    if ui
        .add(egui::Slider::new(&mut degrees, 0.0..=90.0).suffix("°").fixed_decimals(0))
        .on_hover_text("Tilt the view (or right-drag)")
        .changed()
    {
        scenario.set_pitch_angle(degrees.to_radians());
    }
}

fn render_pov_picker(ui: &mut egui::Ui, scenario: &mut ScenarioState) {
    let mut choice = None;
    let selected = scenario
        .pov()
        .and_then(|key| scenario.body(key))
        .map(|body| body.name.clone())
        .unwrap_or_else(|| "Free".to_string());

    egui::ComboBox::from_id_salt("pov_picker")
        .selected_text(format!("{} {}", icons::POV, selected))
        .show_ui(ui, |ui| {
            for key in scenario.body_keys() {
                let Some(body) = scenario.body(key) else {
                    continue;
                };
                let label = format!("{} {}", icons::body_icon(body.kind), body.name);
                let is_current = scenario.pov() == Some(key.as_str());
                let mut response = ui.selectable_label(is_current, label);
                if !body.description.is_empty() {
                    response = response.on_hover_text(body.description.as_str());
                }
                if response.clicked() {
                    choice = Some(key.clone());
                }
            }
        });

    if let Some(key) = choice {
        scenario.set_pov(&key);
    }
}

fn render_scenario_picker(
    ui: &mut egui::Ui,
    scenario: &ScenarioState,
    pending: &mut PendingScenario,
) {
    egui::ComboBox::from_id_salt("scenario_picker")
        .selected_text(format!("{} {}", icons::SCENARIO, scenario.name()))
        .show_ui(ui, |ui| {
            for preset in PRESETS {
                let is_current = scenario.name() == preset.name;
                if ui.selectable_label(is_current, preset.name).clicked() && !is_current {
                    pending.0 = Some(ScenarioRequest::Preset(preset.id));
                }
            }
        });
}

fn render_help_button(ui: &mut egui::Ui, overlay: &mut ShortcutsOverlay) {
    let color = if overlay.open { colors::ACTIVE } else { colors::TEXT };
    let button = egui::Button::new(egui::RichText::new(icons::HELP).size(18.0).color(color))
        .min_size(egui::vec2(32.0, 32.0));
    if ui.add(button).on_hover_text("Keyboard shortcuts").clicked() {
        overlay.open = !overlay.open;
    }
}

fn render_shortcuts_overlay(ctx: &egui::Context, overlay: &mut ShortcutsOverlay) {
    egui::Window::new("Shortcuts")
        .open(&mut overlay.open)
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::RIGHT_BOTTOM, egui::vec2(-16.0, -72.0))
        .frame(
            egui::Frame::new()
                .fill(colors::DOCK_BG)
                .inner_margin(egui::Margin::same(14))
                .stroke(egui::Stroke::new(1.0, colors::BORDER)),
        )
        .show(ctx, |ui| {
            egui::Grid::new("shortcut_rows").num_columns(2).striped(true).show(ui, |ui| {
                for (keys, action) in SHORTCUTS {
                    ui.label(egui::RichText::new(*keys).monospace().color(colors::ACTIVE));
                    ui.label(egui::RichText::new(*action).color(colors::TEXT));
                    ui.end_row();
                }
            });
        });
}
