//! Property-based tests for the orbit solvers using proptest.
//!
//! These tests verify that orbital computations maintain expected properties
//! across a wide range of inputs.

use proptest::prelude::*;

use super::elements::ElementRate;
use super::kepler::{solve_eccentric_anomaly_deg, solve_kepler_position, solve_kepler_simple};
use crate::test_utils::fixtures::planar_elements;
use crate::types::{DEG_TO_RAD, RAD_TO_DEG};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Circular orbits keep a constant distance `a` from the focus.
    #[test]
    fn prop_circular_orbit_radius(
        a in 0.1f64..40.0,
        t in -10.0f64..10.0,
        mean_longitude in -360.0f64..360.0,
        perihelion in -180.0f64..180.0,
    ) {
        let mut elements = planar_elements(a, 0.0);
        elements.mean_longitude = ElementRate::new(mean_longitude, 35999.37);
        elements.longitude_of_perihelion = ElementRate::fixed(perihelion);

        let solution = solve_kepler_position(Some(&elements), t).unwrap();
        let r = solution.position.truncate().length();
        prop_assert!((r - a).abs() < 1e-9 * a.max(1.0), "r={} a={}", r, a);
    }

    /// The JPL iteration converges for e in [0, 0.9) and satisfies Kepler's equation.
    #[test]
    fn prop_kepler_solver_convergence(
        mean_anomaly in -180.0f64..180.0,
        eccentricity in 0.0f64..0.9,
    ) {
        let (e_anom, iterations, converged) =
            solve_eccentric_anomaly_deg(mean_anomaly, eccentricity);
        prop_assert!(converged, "no convergence after {} iterations", iterations);

        let m_check = e_anom - eccentricity * RAD_TO_DEG * (e_anom * DEG_TO_RAD).sin();
        prop_assert!(
            (m_check - mean_anomaly).abs() < 1e-3,
            "M={} e={} E={} M_check={}",
            mean_anomaly, eccentricity, e_anom, m_check
        );
    }

    /// Solving twice at the same instant yields bit-identical results.
    #[test]
    fn prop_solver_is_deterministic(
        a in 0.3f64..30.0,
        e in 0.0f64..0.9,
        t in -5.0f64..5.0,
    ) {
        let elements = planar_elements(a, e);
        let first = solve_kepler_position(Some(&elements), t);
        let second = solve_kepler_position(Some(&elements), t);
        prop_assert_eq!(first, second);

        let first = solve_kepler_simple(a, e, 0.75, t, None);
        let second = solve_kepler_simple(a, e, 0.75, t, None);
        prop_assert_eq!(first, second);
    }

    /// Elliptical orbits stay between perihelion and aphelion distance.
    #[test]
    fn prop_radius_within_apsides(
        a in 0.3f64..30.0,
        e in 0.0f64..0.9,
        t in -5.0f64..5.0,
    ) {
        let elements = planar_elements(a, e);
        let solution = solve_kepler_position(Some(&elements), t).unwrap();
        prop_assert!(solution.radius >= a * (1.0 - e) - 1e-6);
        prop_assert!(solution.radius <= a * (1.0 + e) + 1e-6);
    }
}
