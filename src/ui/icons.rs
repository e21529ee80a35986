//! Icon glyphs and one-time egui style setup.
//!
//! Icons come from the Phosphor font, which has to be registered with egui
//! before the first dock pass; `setup_ui_style` does that once.

use bevy::prelude::*;
use bevy_egui::{EguiContexts, egui};

use crate::body::BodyKind;

/// Set once the icon font and visuals are installed.
#[derive(Resource, Default)]
pub struct FontsInitialized(pub bool);

/// Install the Phosphor glyphs and the dark dock visuals.
pub fn setup_ui_style(mut contexts: EguiContexts, mut initialized: ResMut<FontsInitialized>) {
    if initialized.0 {
        return;
    }
    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };

    let mut fonts = egui::FontDefinitions::default();
    egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
    ctx.set_fonts(fonts);

    let mut visuals = egui::Visuals::dark();
    visuals.window_corner_radius = egui::CornerRadius::same(6);
    ctx.set_visuals(visuals);

    initialized.0 = true;
    debug!("UI fonts and visuals installed");
}

pub const PLAY: &str = egui_phosphor::regular::PLAY;
pub const PAUSE: &str = egui_phosphor::regular::PAUSE;
pub const ZOOM_IN: &str = egui_phosphor::regular::MAGNIFYING_GLASS_PLUS;
pub const ZOOM_OUT: &str = egui_phosphor::regular::MAGNIFYING_GLASS_MINUS;
pub const GRID: &str = egui_phosphor::regular::GRID_FOUR;
pub const TRAILS: &str = egui_phosphor::regular::DOTS_THREE_OUTLINE;
pub const HELP: &str = egui_phosphor::regular::QUESTION;
pub const SCENARIO: &str = egui_phosphor::regular::PLANET;
pub const POV: &str = egui_phosphor::regular::CROSSHAIR;

/// Glyph shown next to a body in pickers.
pub fn body_icon(kind: BodyKind) -> &'static str {
    match kind {
        BodyKind::Star => egui_phosphor::regular::SUN,
        BodyKind::Planet => egui_phosphor::regular::GLOBE_HEMISPHERE_WEST,
        BodyKind::Moon => egui_phosphor::regular::MOON,
    }
}
