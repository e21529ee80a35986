//! Orbital element sets (JPL "approximate positions" style).
//!
//! Source: E.M. Standish, *Keplerian Elements for Approximate Positions of the
//! Major Planets*, JPL. Every element is a value at J2000 plus a linear rate
//! per Julian century.

use bevy::math::DVec3;
use serde::Deserialize;

use crate::types::DEG_TO_RAD;

/// An orbital element and its rate of change per Julian century.
///
/// Deserializes from either a `[value, rate]` pair or a bare number
/// (rate 0).
#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize)]
#[serde(from = "ElementRateRepr")]
pub struct ElementRate {
    pub value: f64,
    pub rate: f64,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ElementRateRepr {
    Pair([f64; 2]),
    Scalar(f64),
}

impl From<ElementRateRepr> for ElementRate {
    fn from(repr: ElementRateRepr) -> Self {
        match repr {
            ElementRateRepr::Pair([value, rate]) => Self { value, rate },
            ElementRateRepr::Scalar(value) => Self::fixed(value),
        }
    }
}

impl ElementRate {
    pub const fn new(value: f64, rate: f64) -> Self {
        Self { value, rate }
    }

    pub const fn fixed(value: f64) -> Self {
        Self { value, rate: 0.0 }
    }

    /// Linear extrapolation to `centuries` past J2000.
    #[inline]
    pub fn at(&self, centuries: f64) -> f64 {
        self.value + self.rate * centuries
    }

    fn is_finite(&self) -> bool {
        self.value.is_finite() && self.rate.is_finite()
    }
}

/// Extra mean-anomaly terms used by the outer planets (Jupiter–Neptune)
/// for the 3000 BC – 3000 AD fit.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Perturbations {
    pub b: f64,
    pub c: f64,
    pub s: f64,
    pub f: f64,
}

impl Perturbations {
    /// `b·T² + c·cos(f·T) + s·sin(f·T)` in degrees.
    pub fn mean_anomaly_correction(&self, centuries: f64) -> f64 {
        let ft = (self.f * centuries) * DEG_TO_RAD;
        self.b * centuries * centuries + self.c * ft.cos() + self.s * ft.sin()
    }
}

/// Full Keplerian element set.
///
/// Distances in AU, angles in degrees.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrbitalElements {
    pub semi_major_axis: ElementRate,
    pub eccentricity: ElementRate,
    pub inclination: ElementRate,
    pub mean_longitude: ElementRate,
    pub longitude_of_perihelion: ElementRate,
    pub longitude_of_ascending_node: ElementRate,
    pub perturbations: Perturbations,
}

/// Element values extrapolated to one instant.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ElementsAt {
    pub semi_major_axis: f64,
    pub eccentricity: f64,
    pub inclination: f64,
    pub mean_longitude: f64,
    pub longitude_of_perihelion: f64,
    pub longitude_of_ascending_node: f64,
}

impl OrbitalElements {
    /// Extrapolate every element to `centuries` past J2000.
    pub fn at(&self, centuries: f64) -> ElementsAt {
        ElementsAt {
            semi_major_axis: self.semi_major_axis.at(centuries),
            eccentricity: self.eccentricity.at(centuries),
            inclination: self.inclination.at(centuries),
            mean_longitude: self.mean_longitude.at(centuries),
            longitude_of_perihelion: self.longitude_of_perihelion.at(centuries),
            longitude_of_ascending_node: self.longitude_of_ascending_node.at(centuries),
        }
    }

    /// Check the J2000 values describe a bound ellipse.
    pub fn validate(&self) -> Result<(), String> {
        let all = [
            self.semi_major_axis,
            self.eccentricity,
            self.inclination,
            self.mean_longitude,
            self.longitude_of_perihelion,
            self.longitude_of_ascending_node,
        ];
        if !all.iter().all(ElementRate::is_finite) {
            return Err("orbital elements must be finite".to_string());
        }
        let p = &self.perturbations;
        if ![p.b, p.c, p.s, p.f].iter().all(|v| v.is_finite()) {
            return Err("perturbation terms must be finite".to_string());
        }
        validate_shape(self.semi_major_axis.value, self.eccentricity.value)
    }
}

/// Orientation of an orbital plane, angles in degrees.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Orientation {
    pub inclination: f64,
    pub longitude_of_ascending_node: f64,
    /// ω, measured from the ascending node.
    pub argument_of_periapsis: f64,
}

impl Orientation {
    /// Rotate orbital-plane coordinates (x toward periapsis) into the
    /// reference frame: `Rz(Ω)·Rx(I)·Rz(ω)`.
    pub fn to_reference_frame(&self, xp: f64, yp: f64) -> DVec3 {
        let (sin_w, cos_w) = (self.argument_of_periapsis * DEG_TO_RAD).sin_cos();
        let (sin_n, cos_n) = (self.longitude_of_ascending_node * DEG_TO_RAD).sin_cos();
        let (sin_i, cos_i) = (self.inclination * DEG_TO_RAD).sin_cos();

        let x = (cos_w * cos_n - sin_w * sin_n * cos_i) * xp
            + (-sin_w * cos_n - cos_w * sin_n * cos_i) * yp;
        let y = (cos_w * sin_n + sin_w * cos_n * cos_i) * xp
            + (-sin_w * sin_n + cos_w * cos_n * cos_i) * yp;
        let z = (sin_w * sin_i) * xp + (cos_w * sin_i) * yp;
        DVec3::new(x, y, z)
    }

    fn is_finite(&self) -> bool {
        self.inclination.is_finite()
            && self.longitude_of_ascending_node.is_finite()
            && self.argument_of_periapsis.is_finite()
    }
}

/// Orbit described by size, shape and period only.
///
/// `period` is in Julian centuries; when absent it is derived from the
/// parent's mass with Kepler's third law. Without an `orientation` the orbit
/// lies in the reference plane with periapsis on +x.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PeriodicOrbit {
    pub semi_major_axis: f64,
    pub eccentricity: f64,
    pub period: Option<f64>,
    pub orientation: Option<Orientation>,
}

impl PeriodicOrbit {
    pub fn validate(&self) -> Result<(), String> {
        if let Some(period) = self.period
            && !(period.is_finite() && period > 0.0)
        {
            return Err(format!("period must be positive, got {period}"));
        }
        if let Some(orientation) = &self.orientation
            && !orientation.is_finite()
        {
            return Err("orientation angles must be finite".to_string());
        }
        validate_shape(self.semi_major_axis, self.eccentricity)
    }
}

fn validate_shape(a: f64, e: f64) -> Result<(), String> {
    if !(a.is_finite() && a > 0.0) {
        return Err(format!("semi-major axis must be positive, got {a}"));
    }
    if !(0.0..1.0).contains(&e) {
        return Err(format!("eccentricity must be in [0, 1), got {e}"));
    }
    Ok(())
}

/// Which solver a body's position comes from.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum OrbitModel {
    /// Full element set, solved with [`super::kepler::solve_kepler_position`].
    Elements(OrbitalElements),
    /// Period-parameterised orbit, solved with [`super::kepler::solve_kepler_simple`].
    Periodic(PeriodicOrbit),
    /// No orbit: the body stays at its initial position.
    Fixed,
}

impl OrbitModel {
    pub fn semi_major_axis(&self) -> Option<f64> {
        match self {
            OrbitModel::Elements(el) => Some(el.semi_major_axis.value),
            OrbitModel::Periodic(orbit) => Some(orbit.semi_major_axis),
            OrbitModel::Fixed => None,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        match self {
            OrbitModel::Elements(el) => el.validate(),
            OrbitModel::Periodic(orbit) => orbit.validate(),
            OrbitModel::Fixed => Ok(()),
        }
    }
}
