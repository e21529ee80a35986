//! Common test utilities for integration tests.

#![allow(dead_code)]

use orrery::scenarios::{DEFAULT_CANVAS_SIZE, ScenarioDefinition, ScenarioState};

/// One star fixed at the origin and an Earth-like planet on JPL elements.
pub const STAR_AND_PLANET: &str = r#"{
    "config": { "trails_frame_gap": 1 },
    "objects": {
        "sun": { "type": "star", "vars": { "r": 696000, "m": 1.989e30 } },
        "earth": {
            "type": "planet", "orbiting": "sun",
            "vars": {
                "a": 1.0, "e": 0.0167, "I": 0.0, "L": 100.46,
                "long_peri": 102.94, "long_node": 0.0, "r": 6371, "m": 5.972e24
            }
        }
    }
}"#;

/// Sun, planet and a moon on a period-parameterised orbit around the planet.
pub const THREE_LEVELS: &str = r#"{
    "config": { "trails_frame_gap": 2, "trail_capacity": 5 },
    "objects": {
        "moon": {
            "type": "moon", "orbiting": "planet",
            "vars": { "a": 0.05, "e": 0.1, "p": 30, "r": 1700 }
        },
        "planet": {
            "type": "planet", "orbiting": "sun",
            "vars": {
                "a": [1.5, 0.0], "e": [0.09, 0.0], "I": [1.85, 0.0], "L": [-4.55, 19140.3],
                "long_peri": [-23.94, 0.0], "long_node": [49.56, 0.0], "r": 3390, "m": 6.4e23
            }
        },
        "sun": { "type": "star", "vars": { "r": 696000, "m": 1.989e30 } }
    }
}"#;

pub fn definition(json: &str) -> ScenarioDefinition {
    ScenarioDefinition::from_json_str(json).expect("test scenario parses")
}

pub fn state(json: &str) -> ScenarioState {
    ScenarioState::from_definition(&definition(json), DEFAULT_CANVAS_SIZE.x, DEFAULT_CANVAS_SIZE.y)
        .expect("test scenario loads")
}
