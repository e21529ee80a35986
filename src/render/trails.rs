//! Trail dots, fading from newest to oldest.

use bevy::prelude::*;

use super::canvas_to_world;
use crate::scenarios::ScenarioState;

const DOT_RADIUS: f32 = 1.0;

pub fn draw_trails(mut gizmos: Gizmos, scenario: Res<ScenarioState>) {
    if !scenario.show_trails() {
        return;
    }
    let size = scenario.projector().canvas_size();
    for body in &scenario.frame().bodies {
        let count = body.trail_points.len();
        for (i, point) in body.trail_points.iter().enumerate() {
            let alpha = (i + 1) as f32 / count as f32;
            let position = canvas_to_world(*point, size);
            gizmos.circle_2d(
                Isometry2d::from_translation(position),
                DOT_RADIUS,
                body.color.with_alpha(0.8 * alpha),
            );
        }
    }
}
