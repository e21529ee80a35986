//! Orbital mechanics core: calendar epochs, element sets and Kepler solvers.
//!
//! Coordinate frame:
//! - Heliocentric (or parent-centric) J2000 ecliptic, distances in AU.

pub mod calendar;
pub mod elements;
pub mod kepler;

#[cfg(test)]
mod proptest_orbit;

pub use calendar::{CalendarInstant, centuries_since_epoch};
pub use elements::{
    ElementRate, OrbitModel, OrbitalElements, Orientation, PeriodicOrbit, Perturbations,
};
pub use kepler::{
    KeplerSolution, MAX_KEPLER_ITERATIONS, solve_kepler_position, solve_kepler_simple,
};
