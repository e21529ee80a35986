//! Scenario documents: the JSON shape a scenario is loaded from.
//!
//! ```json
//! {
//!   "config": { "pov": "earth", "speed": 2 },
//!   "objects": {
//!     "sun":   { "type": "star", "vars": { "r": 696000, "m": 1.989e30 } },
//!     "earth": { "type": "planet", "orbiting": "sun",
//!                "vars": { "a": [1.00000261, 0.00000562], "e": 0.0167, ... } }
//!   }
//! }
//! ```

use bevy::color::Srgba;
use bevy::math::DVec3;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

use crate::body::BodyKind;
use crate::error::{Result, ScenarioError};
use crate::orbit::{
    CalendarInstant, ElementRate, OrbitModel, OrbitalElements, Orientation, PeriodicOrbit,
    Perturbations,
};
use crate::projection::{MAX_GRID_LINES, ProjectorConfig, RadiusBands};
use crate::types::days_to_centuries;

/// A complete scenario: view configuration plus the bodies in it.
#[derive(Clone, Debug, Deserialize)]
pub struct ScenarioDefinition {
    #[serde(default)]
    pub config: ScenarioConfig,
    pub objects: BTreeMap<String, ObjectDefinition>,
}

impl ScenarioDefinition {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a scenario file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ScenarioError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }
}

/// Largest trail a body may keep, in points.
pub const MAX_TRAIL_CAPACITY: usize = 10_000;

/// Scenario-level settings. Every field has a default.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct ScenarioConfig {
    pub name: Option<String>,
    /// Key of the body the view is anchored on.
    pub pov: Option<String>,
    /// Calendar instant the clock starts at (J2000.0 when absent).
    pub start_date: Option<CalendarInstant>,
    pub speed: f64,
    /// Simulated days added per animation tick at speed 1.
    pub base_increment_days: f64,
    pub paused: bool,
    pub zoom: f64,
    pub min_zoom: f64,
    pub orbit_scale: f64,
    pub pitch: f64,
    pub yaw: f64,
    pub show_trails: bool,
    pub show_grid: bool,
    pub trail_capacity: usize,
    pub trails_frame_gap: u32,
    pub radius_bands: RadiusBands,
    pub grid_spacing_au: f64,
    pub grid_extent_au: f64,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        let view = ProjectorConfig::default();
        Self {
            name: None,
            pov: None,
            start_date: None,
            speed: 1.0,
            base_increment_days: 1.0,
            paused: false,
            zoom: view.zoom,
            min_zoom: view.min_zoom,
            orbit_scale: view.orbit_scale,
            pitch: view.pitch,
            yaw: view.yaw,
            show_trails: true,
            show_grid: false,
            trail_capacity: 60,
            trails_frame_gap: 4,
            radius_bands: view.bands,
            grid_spacing_au: 1.0,
            grid_extent_au: 10.0,
        }
    }
}

impl ScenarioConfig {
    /// Reject settings that would leave the view or clock unusable.
    pub fn validate(&self) -> Result<()> {
        let invalid =
            |field: &'static str, reason: String| ScenarioError::InvalidConfig { field, reason };
        let positive = |field: &'static str, value: f64| {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(invalid(field, format!("must be positive, got {value}")))
            }
        };

        positive("orbit_scale", self.orbit_scale)?;
        positive("min_zoom", self.min_zoom)?;
        positive("zoom", self.zoom)?;
        positive("base_increment_days", self.base_increment_days)?;
        positive("grid_spacing_au", self.grid_spacing_au)?;
        positive("grid_extent_au", self.grid_extent_au)?;

        if self.zoom < self.min_zoom {
            return Err(invalid(
                "zoom",
                format!("{} is below min_zoom {}", self.zoom, self.min_zoom),
            ));
        }
        if !(self.speed.is_finite() && self.speed >= 0.0) {
            return Err(invalid("speed", format!("must be non-negative, got {}", self.speed)));
        }
        for (field, angle) in [("pitch", self.pitch), ("yaw", self.yaw)] {
            if !angle.is_finite() {
                return Err(invalid(field, format!("must be finite, got {angle}")));
            }
        }
        if self.trail_capacity > MAX_TRAIL_CAPACITY {
            return Err(invalid(
                "trail_capacity",
                format!("{} exceeds {MAX_TRAIL_CAPACITY}", self.trail_capacity),
            ));
        }
        let lines = self.grid_extent_au / self.grid_spacing_au;
        if lines > MAX_GRID_LINES as f64 {
            return Err(invalid(
                "grid_spacing_au",
                format!("{lines:.0} lines per side exceeds {MAX_GRID_LINES}"),
            ));
        }
        Ok(())
    }

    pub fn projector_config(&self) -> ProjectorConfig {
        ProjectorConfig {
            orbit_scale: self.orbit_scale,
            zoom: self.zoom,
            min_zoom: self.min_zoom,
            yaw: self.yaw,
            pitch: self.pitch,
            bands: self.radius_bands.clone(),
        }
    }

    /// Clock value at load, in Julian centuries since J2000.
    pub fn start_time(&self) -> f64 {
        self.start_date
            .map(|date| date.centuries_since_epoch())
            .unwrap_or(0.0)
    }

    /// Clock increment per tick at speed 1, in Julian centuries.
    pub fn base_increment(&self) -> f64 {
        days_to_centuries(self.base_increment_days)
    }
}

/// One body in the `objects` map.
#[derive(Clone, Debug, Deserialize)]
pub struct ObjectDefinition {
    pub name: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type", default)]
    pub kind: BodyKind,
    #[serde(default)]
    pub graphic: GraphicDefinition,
    #[serde(default)]
    pub vars: VarsDefinition,
    pub orbiting: Option<String>,
    /// Fixed position in AU (relative to the parent when orbiting without elements).
    pub initial_position: Option<[f64; 3]>,
}

impl ObjectDefinition {
    pub fn initial_position(&self) -> DVec3 {
        self.initial_position.map(DVec3::from_array).unwrap_or(DVec3::ZERO)
    }

    /// Parse the display colour; stars default to yellow, everything else to white.
    pub fn color(&self, key: &str) -> Result<Srgba> {
        let Some(color) = self.graphic.color.as_deref() else {
            return Ok(match self.kind {
                BodyKind::Star => Srgba::rgb_u8(255, 221, 68),
                _ => Srgba::WHITE,
            });
        };
        parse_color(color).ok_or_else(|| ScenarioError::InvalidGraphic {
            body: key.to_string(),
            color: color.to_string(),
        })
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct GraphicDefinition {
    pub color: Option<String>,
}

/// Physical and orbital variables of a body.
///
/// Angles in degrees, `a` in AU, `r` in km, `m` in kg, `p` in days.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct VarsDefinition {
    pub a: Option<ElementRate>,
    pub e: Option<ElementRate>,
    #[serde(rename = "I")]
    pub inclination: Option<ElementRate>,
    #[serde(rename = "L")]
    pub mean_longitude: Option<ElementRate>,
    pub long_peri: Option<ElementRate>,
    pub long_node: Option<ElementRate>,
    pub b: Option<f64>,
    pub c: Option<f64>,
    pub s: Option<f64>,
    pub f: Option<f64>,
    pub p: Option<f64>,
    pub r: Option<f64>,
    pub m: Option<f64>,
}

impl VarsDefinition {
    /// Pick the solver from whichever variables are populated.
    ///
    /// A full element set selects the JPL solver; a semi-major axis alone
    /// selects the periodic solver; anything else is a fixed body.
    pub fn orbit_model(&self) -> OrbitModel {
        if let (Some(a), Some(e), Some(i), Some(l), Some(peri), Some(node)) = (
            self.a,
            self.e,
            self.inclination,
            self.mean_longitude,
            self.long_peri,
            self.long_node,
        ) {
            return OrbitModel::Elements(OrbitalElements {
                semi_major_axis: a,
                eccentricity: e,
                inclination: i,
                mean_longitude: l,
                longitude_of_perihelion: peri,
                longitude_of_ascending_node: node,
                perturbations: Perturbations {
                    b: self.b.unwrap_or(0.0),
                    c: self.c.unwrap_or(0.0),
                    s: self.s.unwrap_or(0.0),
                    f: self.f.unwrap_or(0.0),
                },
            });
        }

        match self.a {
            Some(a) => OrbitModel::Periodic(PeriodicOrbit {
                semi_major_axis: a.value,
                eccentricity: self.e.map(|e| e.value).unwrap_or(0.0),
                period: self.p.map(days_to_centuries),
                orientation: self.orientation(),
            }),
            None => OrbitModel::Fixed,
        }
    }

    /// Plane orientation from whichever of `I`, `long_node` and `long_peri`
    /// are given (missing angles are zero). `None` when all three are absent.
    fn orientation(&self) -> Option<Orientation> {
        if self.inclination.is_none() && self.long_node.is_none() && self.long_peri.is_none() {
            return None;
        }
        let value = |angle: Option<ElementRate>| angle.map(|a| a.value).unwrap_or(0.0);
        let node = value(self.long_node);
        Some(Orientation {
            inclination: value(self.inclination),
            longitude_of_ascending_node: node,
            argument_of_periapsis: value(self.long_peri) - node,
        })
    }
}

/// Parse `#rrggbb`/`#rrggbbaa`/`#rgb` hex or one of a few colour names.
pub fn parse_color(color: &str) -> Option<Srgba> {
    let named = match color.to_ascii_lowercase().as_str() {
        "white" => Some(Srgba::rgb_u8(255, 255, 255)),
        "yellow" => Some(Srgba::rgb_u8(255, 255, 0)),
        "gold" => Some(Srgba::rgb_u8(255, 215, 0)),
        "orange" => Some(Srgba::rgb_u8(255, 165, 0)),
        "red" => Some(Srgba::rgb_u8(255, 0, 0)),
        "brown" => Some(Srgba::rgb_u8(165, 42, 42)),
        "tan" => Some(Srgba::rgb_u8(210, 180, 140)),
        "green" => Some(Srgba::rgb_u8(0, 128, 0)),
        "blue" => Some(Srgba::rgb_u8(0, 0, 255)),
        "lightblue" => Some(Srgba::rgb_u8(173, 216, 230)),
        "cyan" => Some(Srgba::rgb_u8(0, 255, 255)),
        "purple" => Some(Srgba::rgb_u8(128, 0, 128)),
        "gray" | "grey" => Some(Srgba::rgb_u8(128, 128, 128)),
        _ => None,
    };
    named.or_else(|| Srgba::hex(color).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_minimal_document() {
        let def = ScenarioDefinition::from_json_str(r#"{ "objects": {} }"#).unwrap();
        assert!(def.objects.is_empty());
        assert_eq!(def.config.trail_capacity, 60);
        assert_eq!(def.config.start_time(), 0.0);
    }

    #[test]
    fn test_full_element_set_selects_jpl_solver() {
        let json = r#"{
            "type": "planet",
            "orbiting": "sun",
            "vars": {
                "a": [1.00000261, 0.00000562], "e": [0.01671123, -0.00004392],
                "I": [-0.00001531, -0.01294668], "L": [100.46457166, 35999.37244981],
                "long_peri": [102.93768193, 0.32327364], "long_node": [0, 0],
                "r": 6371, "m": 5.972e24
            }
        }"#;
        let object: ObjectDefinition = serde_json::from_str(json).unwrap();
        let OrbitModel::Elements(el) = object.vars.orbit_model() else {
            panic!("expected element orbit");
        };
        assert_eq!(el.semi_major_axis, ElementRate::new(1.00000261, 0.00000562));
        assert_eq!(el.perturbations, Perturbations::default());
        assert_eq!(object.vars.r, Some(6371.0));
    }

    #[test]
    fn test_partial_elements_select_periodic_solver() {
        let vars: VarsDefinition =
            serde_json::from_str(r#"{ "a": 0.00257, "e": 0.0549, "p": 27.321661 }"#).unwrap();
        let OrbitModel::Periodic(orbit) = vars.orbit_model() else {
            panic!("expected periodic orbit");
        };
        assert_eq!(orbit.semi_major_axis, 0.00257);
        assert_relative_eq!(orbit.period.unwrap(), 27.321661 / 36525.0);
        assert!(orbit.orientation.is_none());
    }

    #[test]
    fn test_partial_angles_orient_periodic_orbit() {
        let vars: VarsDefinition = serde_json::from_str(
            r#"{ "a": 0.00257, "e": 0.0549, "p": 27.321661, "I": 5.145, "long_node": 125.08, "long_peri": 443.23 }"#,
        )
        .unwrap();
        let OrbitModel::Periodic(orbit) = vars.orbit_model() else {
            panic!("expected periodic orbit");
        };
        let orientation = orbit.orientation.unwrap();
        assert_eq!(orientation.inclination, 5.145);
        assert_eq!(orientation.longitude_of_ascending_node, 125.08);
        assert_relative_eq!(orientation.argument_of_periapsis, 318.15, epsilon = 1e-9);
    }

    #[test]
    fn test_period_and_radius_only_is_fixed() {
        let vars: VarsDefinition = serde_json::from_str(r#"{ "p": 365.25, "r": 6371 }"#).unwrap();
        assert_eq!(vars.orbit_model(), OrbitModel::Fixed);
        assert_eq!(VarsDefinition::default().orbit_model(), OrbitModel::Fixed);
    }

    #[test]
    fn test_start_date_defaults() {
        let config: ScenarioConfig =
            serde_json::from_str(r#"{ "start_date": { "year": 2000, "hours": 12 } }"#).unwrap();
        assert_eq!(config.start_time(), 0.0);
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(ScenarioConfig::default().validate().is_ok());
    }

    #[test]
    fn test_config_rejects_out_of_range_values() {
        let cases = [
            (r#"{ "trail_capacity": 1000000000000000000 }"#, "trail_capacity"),
            (r#"{ "grid_spacing_au": 1e-9 }"#, "grid_spacing_au"),
            (r#"{ "grid_spacing_au": 0 }"#, "grid_spacing_au"),
            (r#"{ "orbit_scale": -40000 }"#, "orbit_scale"),
            (r#"{ "min_zoom": 0 }"#, "min_zoom"),
            (r#"{ "zoom": 0.5, "min_zoom": 1 }"#, "zoom"),
            (r#"{ "speed": -5 }"#, "speed"),
            (r#"{ "base_increment_days": 0 }"#, "base_increment_days"),
        ];
        for (json, expected) in cases {
            let config: ScenarioConfig = serde_json::from_str(json).unwrap();
            let err = config.validate().unwrap_err();
            assert!(
                matches!(err, ScenarioError::InvalidConfig { field, .. } if field == expected),
                "{json}: {err}"
            );
        }
    }

    #[test]
    fn test_config_accepts_paused_clock_and_max_trail() {
        let config: ScenarioConfig =
            serde_json::from_str(r#"{ "speed": 0, "trail_capacity": 10000 }"#).unwrap();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_colors() {
        assert_eq!(parse_color("#ff0000"), Some(Srgba::rgb_u8(255, 0, 0)));
        assert_eq!(parse_color("Yellow"), Some(Srgba::rgb_u8(255, 255, 0)));
        assert!(parse_color("not-a-colour").is_none());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = ScenarioDefinition::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, ScenarioError::Io { .. }));
    }

    #[test]
    fn test_malformed_document_is_parse_error() {
        let err = ScenarioDefinition::from_json_str("{ \"objects\": [").unwrap_err();
        assert!(matches!(err, ScenarioError::Parse(_)));
    }
}
