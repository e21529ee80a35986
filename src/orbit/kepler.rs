//! Kepler equation solvers.
//!
//! Two strategies are provided:
//! - [`solve_kepler_position`]: the JPL low-precision planetary formula, driven
//!   by a full [`OrbitalElements`] set and time in Julian centuries.
//! - [`solve_kepler_simple`]: a period-parameterised solver for bodies that only
//!   know their semi-major axis, eccentricity and period.
//!
//! Neither solver fails on non-convergence: the last iterate is returned and
//! [`KeplerSolution::converged`] is cleared so callers can count it.

use bevy::math::DVec3;
use std::f64::consts::FRAC_PI_2;

use super::elements::{OrbitalElements, Orientation};
use crate::types::{DEG_TO_RAD, RAD_TO_DEG};

/// Convergence threshold on the eccentric-anomaly step, in degrees.
pub const KEPLER_TOLERANCE_DEG: f64 = 1e-4;

/// Hard iteration cap for both solvers.
pub const MAX_KEPLER_ITERATIONS: usize = 1000;

/// Scale from `t / period` to mean anomaly (radians) in the periodic solver.
pub const PERIODIC_MEAN_ANOMALY_SCALE: f64 = FRAC_PI_2;

/// Result of a Kepler solve.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KeplerSolution {
    /// Position relative to the focus, in AU.
    pub position: DVec3,
    /// Distance from the focus, in AU.
    pub radius: f64,
    /// Iterations used by the eccentric-anomaly solve.
    pub iterations: usize,
    /// Whether the iteration met its tolerance before the cap.
    pub converged: bool,
}

/// Reduce an angle in degrees into `[-180, 180)`.
pub fn normalize_degrees(angle: f64) -> f64 {
    (angle + 180.0).rem_euclid(360.0) - 180.0
}

/// Solve `M = E - e*·sin(E)` for the eccentric anomaly, all angles in degrees.
///
/// `e*` is the eccentricity expressed in degrees (`e · 180/π`), per the JPL
/// prescription. Returns `(E, iterations, converged)`.
pub fn solve_eccentric_anomaly_deg(mean_anomaly: f64, eccentricity: f64) -> (f64, usize, bool) {
    let e_star = eccentricity * RAD_TO_DEG;
    let mut ecc = mean_anomaly + e_star * (mean_anomaly * DEG_TO_RAD).sin();

    for i in 1..=MAX_KEPLER_ITERATIONS {
        let ecc_rad = ecc * DEG_TO_RAD;
        let delta_m = mean_anomaly - (ecc - e_star * ecc_rad.sin());
        let delta_e = delta_m / (1.0 - eccentricity * ecc_rad.cos());
        ecc += delta_e;

        if delta_e.abs() < KEPLER_TOLERANCE_DEG {
            return (ecc, i, true);
        }
    }

    (ecc, MAX_KEPLER_ITERATIONS, false)
}

/// Heliocentric ecliptic position from a JPL element set.
///
/// `centuries` is Julian centuries since J2000.0. Returns `None` when no
/// element set is given; callers treat that as "no orbit".
pub fn solve_kepler_position(
    elements: Option<&OrbitalElements>,
    centuries: f64,
) -> Option<KeplerSolution> {
    let elements = elements?;
    let el = elements.at(centuries);
    let a = el.semi_major_axis;
    let e = el.eccentricity;

    let arg_perihelion = el.longitude_of_perihelion - el.longitude_of_ascending_node;
    let mean_anomaly = normalize_degrees(
        el.mean_longitude - el.longitude_of_perihelion
            + elements.perturbations.mean_anomaly_correction(centuries),
    );

    let (ecc_deg, iterations, converged) = solve_eccentric_anomaly_deg(mean_anomaly, e);
    let ecc = ecc_deg * DEG_TO_RAD;

    // Orbital-plane coordinates, x toward perihelion.
    let xp = a * (ecc.cos() - e);
    let yp = a * (1.0 - e * e).sqrt() * ecc.sin();

    let orientation = Orientation {
        inclination: el.inclination,
        longitude_of_ascending_node: el.longitude_of_ascending_node,
        argument_of_periapsis: arg_perihelion,
    };
    let position = orientation.to_reference_frame(xp, yp);
    Some(KeplerSolution {
        position,
        radius: position.length(),
        iterations,
        converged,
    })
}

/// Position on a period-parameterised orbit.
///
/// `time` and `period` must share a unit. Mean anomaly is
/// `time / period · π/2`; the eccentric anomaly is found by fixed-point
/// iteration `E ← M + e·sin(E)` until the step drops below one ulp of `E`
/// (zero included). Without an `orientation` the orbit lies in the
/// reference plane (z = 0) with perihelion on +x.
pub fn solve_kepler_simple(
    semi_major_axis: f64,
    eccentricity: f64,
    period: f64,
    time: f64,
    orientation: Option<&Orientation>,
) -> KeplerSolution {
    let e = eccentricity;
    let mean_anomaly = time / period * PERIODIC_MEAN_ANOMALY_SCALE;

    let mut ecc = mean_anomaly;
    let mut iterations = MAX_KEPLER_ITERATIONS;
    let mut converged = false;
    for i in 1..=MAX_KEPLER_ITERATIONS {
        let next = mean_anomaly + e * ecc.sin();
        let step = next - ecc;
        ecc = next;
        if step.abs() <= f64::EPSILON * next.abs() {
            iterations = i;
            converged = true;
            break;
        }
    }

    let half = ecc / 2.0;
    let true_anomaly =
        2.0 * ((1.0 + e).sqrt() * half.sin()).atan2((1.0 - e).sqrt() * half.cos());
    let radius = semi_major_axis * (1.0 - e * e) / (1.0 + e * true_anomaly.cos());

    let (xp, yp) = (radius * true_anomaly.cos(), radius * true_anomaly.sin());
    let position = match orientation {
        Some(orientation) => orientation.to_reference_frame(xp, yp),
        None => DVec3::new(xp, yp, 0.0),
    };

    KeplerSolution {
        position,
        radius,
        iterations,
        converged,
    }
}
