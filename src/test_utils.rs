//! Test utilities for orbit and scenario tests.
//!
//! Provides element-set fixtures and small scenario documents that unit
//! tests across the crate build on.

/// Fixtures for element sets and scenario documents.
pub mod fixtures {
    use crate::orbit::{ElementRate, OrbitalElements, Perturbations};
    use crate::scenarios::definition::ScenarioDefinition;

    /// Earth's J2000 elements with their per-century rates (JPL 1800-2050 fit).
    pub fn earth_elements() -> OrbitalElements {
        OrbitalElements {
            semi_major_axis: ElementRate::new(1.00000261, 0.00000562),
            eccentricity: ElementRate::new(0.01671123, -0.00004392),
            inclination: ElementRate::new(-0.00001531, -0.01294668),
            mean_longitude: ElementRate::new(100.46457166, 35999.37244981),
            longitude_of_perihelion: ElementRate::new(102.93768193, 0.32327364),
            longitude_of_ascending_node: ElementRate::new(0.0, 0.0),
            perturbations: Perturbations::default(),
        }
    }

    /// An orbit in the reference plane with perihelion on +x, completing
    /// roughly one revolution per year.
    pub fn planar_elements(semi_major_axis: f64, eccentricity: f64) -> OrbitalElements {
        OrbitalElements {
            semi_major_axis: ElementRate::fixed(semi_major_axis),
            eccentricity: ElementRate::fixed(eccentricity),
            inclination: ElementRate::fixed(0.0),
            mean_longitude: ElementRate::new(0.0, 35999.37244981),
            longitude_of_perihelion: ElementRate::fixed(0.0),
            longitude_of_ascending_node: ElementRate::fixed(0.0),
            perturbations: Perturbations::default(),
        }
    }

    /// JSON for a Sun, an Earth on JPL elements and a Moon on a periodic orbit.
    pub const SUN_EARTH_MOON_JSON: &str = r##"{
        "config": { "name": "Test system", "trails_frame_gap": 1, "trail_capacity": 8 },
        "objects": {
            "sun": {
                "name": "Sun", "type": "star",
                "graphic": { "color": "#ffdd44" },
                "vars": { "r": 696000, "m": 1.989e30 }
            },
            "earth": {
                "name": "Earth", "type": "planet", "orbiting": "sun",
                "graphic": { "color": "#2f6fdf" },
                "vars": {
                    "a": [1.00000261, 0.00000562], "e": [0.01671123, -0.00004392],
                    "I": [-0.00001531, -0.01294668], "L": [100.46457166, 35999.37244981],
                    "long_peri": [102.93768193, 0.32327364], "long_node": [0, 0],
                    "r": 6371, "m": 5.972e24
                }
            },
            "moon": {
                "name": "Moon", "type": "moon", "orbiting": "earth",
                "vars": { "a": 0.00257, "e": 0.0549, "p": 27.321661, "r": 1737.4, "m": 7.342e22 }
            }
        }
    }"##;

    pub fn sun_earth_moon() -> ScenarioDefinition {
        ScenarioDefinition::from_json_str(SUN_EARTH_MOON_JSON).expect("fixture parses")
    }
}
