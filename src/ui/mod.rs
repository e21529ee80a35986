//! egui toolbar for driving the scenario.

mod dock;
pub mod icons;

use bevy::prelude::*;
use bevy_egui::EguiPrimaryContextPass;

pub use dock::{ShortcutsOverlay, SPEEDS, speed_index};

/// Plugin that adds all UI systems.
pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ShortcutsOverlay>()
            .init_resource::<icons::FontsInitialized>()
            .add_systems(EguiPrimaryContextPass, icons::setup_ui_style)
            .add_systems(
                EguiPrimaryContextPass,
                dock::dock_system
                    .after(icons::setup_ui_style)
                    .run_if(|init: Res<icons::FontsInitialized>| init.0),
            );
    }
}
