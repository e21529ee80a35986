//! Rendering of the scenario's current frame.
//!
//! The scenario computes everything in canvas pixels (origin top-left, y
//! down). These systems only translate that into bevy's 2D world, whose
//! origin is the window centre with y up, and draw it.

pub mod bodies;
mod grid;
mod trails;

use bevy::math::DVec2;
use bevy::prelude::*;

use self::bodies::{BodySpritePlugin, draw_star_glow};
use self::grid::draw_grid;
use self::trails::draw_trails;
use crate::time::TickSet;

/// Plugin aggregating all rendering functionality.
pub struct RenderPlugin;

impl Plugin for RenderPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(ClearColor(Color::srgb(0.02, 0.02, 0.05)))
            .add_plugins(BodySpritePlugin)
            .add_systems(
                Update,
                (draw_grid, draw_trails, draw_star_glow).after(TickSet),
            );
    }
}

/// Z-layer constants for rendering order.
pub mod z_layers {
    /// First body; later bodies in draw order stack above.
    pub const BODIES: f32 = 1.0;
    /// Offset between consecutive bodies.
    pub const BODY_STEP: f32 = 0.01;
}

/// Convert canvas pixels to 2D world coordinates for a canvas of `size`.
pub fn canvas_to_world(point: DVec2, size: DVec2) -> Vec2 {
    Vec2::new(
        (point.x - size.x / 2.0) as f32,
        (size.y / 2.0 - point.y) as f32,
    )
}
