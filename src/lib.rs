//! Orrery - Keplerian solar system animation
//!
//! A library crate providing the orbit solvers, scene graph and projection
//! behind the application, plus the bevy plugins that drive and draw it.

pub mod body;
pub mod camera;
pub mod error;
pub mod input;
pub mod orbit;
pub mod projection;
pub mod render;
pub mod scenarios;
pub mod time;
pub mod types;
pub mod ui;

#[cfg(test)]
mod proptest_projection;
#[cfg(test)]
pub mod test_utils;
