//! Animation driver for the scenario clock.
//!
//! Each app update is one animation tick: the scenario redraws and advances
//! its clock by a fixed simulated amount, independent of wall-clock time.

use bevy::prelude::*;

use crate::scenarios::ScenarioState;

/// Plugin providing time advancement functionality.
pub struct TimePlugin;

impl Plugin for TimePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, advance_scenario.in_set(TickSet));
    }
}

/// System set containing the scenario tick; renderers run after it.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct TickSet;

/// Run one tick. A paused scenario makes this a no-op.
fn advance_scenario(mut scenario: ResMut<ScenarioState>) {
    if let Err(err) = scenario.tick() {
        error!("Scenario tick failed: {}", err);
        scenario.set_paused(true);
    }
}
