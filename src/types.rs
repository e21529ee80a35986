//! Physical and astronomical constants shared by the solver and the scene.

/// Gravitational constant (m³·kg⁻¹·s⁻²)
pub const G: f64 = 6.67430e-11;

/// Astronomical unit in meters
pub const AU_TO_METERS: f64 = 1.495978707e11;

/// Degrees to radians conversion factor
pub const DEG_TO_RAD: f64 = std::f64::consts::PI / 180.0;

/// Radians to degrees conversion factor
pub const RAD_TO_DEG: f64 = 180.0 / std::f64::consts::PI;

/// Seconds per day
pub const SECONDS_PER_DAY: f64 = 86400.0;

/// Days in a Julian century
pub const DAYS_PER_CENTURY: f64 = 36525.0;

/// Julian Date of the J2000.0 epoch (2000-01-01 12:00 UT)
pub const J2000_JD: f64 = 2451545.0;

/// Convert a duration in days to Julian centuries.
pub fn days_to_centuries(days: f64) -> f64 {
    days / DAYS_PER_CENTURY
}

/// Convert a duration in seconds to Julian centuries.
pub fn seconds_to_centuries(seconds: f64) -> f64 {
    seconds / (SECONDS_PER_DAY * DAYS_PER_CENTURY)
}
