//! Preset scenario definitions.
//!
//! Presets are ordinary scenario documents compiled into the binary, so they
//! go through exactly the same parsing and validation as files on disk.

use crate::error::{Result, ScenarioError};

use super::definition::ScenarioDefinition;

/// A scenario document shipped with the application.
#[derive(Clone, Copy, Debug)]
pub struct Preset {
    /// Identifier used on the command line and in the preset picker.
    pub id: &'static str,
    /// Display name.
    pub name: &'static str,
    pub json: &'static str,
}

/// All available preset scenarios. The first one is the default.
pub static PRESETS: &[Preset] = &[SOLAR_SYSTEM, EARTH_MOON];

/// The Sun, the eight planets on JPL elements (1800-2050 fit) and the Moon.
pub const SOLAR_SYSTEM: Preset = Preset {
    id: "solar-system",
    name: "Solar System",
    json: include_str!("../../assets/scenarios/solar_system.json"),
};

/// Earth-centred view of the Moon's orbit.
pub const EARTH_MOON: Preset = Preset {
    id: "earth-moon",
    name: "Earth and Moon",
    json: include_str!("../../assets/scenarios/earth_moon.json"),
};

impl Preset {
    pub fn definition(&self) -> Result<ScenarioDefinition> {
        ScenarioDefinition::from_json_str(self.json)
    }
}

/// Look a preset up by id.
pub fn get_preset(id: &str) -> Result<ScenarioDefinition> {
    PRESETS
        .iter()
        .find(|p| p.id == id)
        .ok_or_else(|| ScenarioError::UnknownPreset(id.to_string()))?
        .definition()
}
