//! Ecliptic grid overlay.

use bevy::prelude::*;

use super::canvas_to_world;
use crate::scenarios::ScenarioState;

pub fn draw_grid(mut gizmos: Gizmos, scenario: Res<ScenarioState>) {
    let size = scenario.projector().canvas_size();
    let color = Color::srgba(0.4, 0.5, 0.7, 0.25);
    for (start, end) in &scenario.frame().grid {
        gizmos.line_2d(canvas_to_world(*start, size), canvas_to_world(*end, size), color);
    }
}
