//! Celestial bodies and the orbit hierarchy that links them.
//!
//! A body's world position is its own Kepler solution relative to the body it
//! orbits, plus that parent's world position at the same instant. This is
//! what lets moons orbit planets orbiting stars.

use bevy::color::Srgba;
use bevy::math::{DVec2, DVec3};
use serde::Deserialize;
use std::collections::{HashMap, VecDeque};
use std::sync::OnceLock;

use crate::error::{Result, ScenarioError};
use crate::orbit::{KeplerSolution, OrbitModel, solve_kepler_position, solve_kepler_simple};
use crate::types::{AU_TO_METERS, G, seconds_to_centuries};

/// Broad category of a body, used for radius banding and star glow.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BodyKind {
    Star,
    #[default]
    Planet,
    Moon,
}

impl BodyKind {
    pub const ALL: [BodyKind; 3] = [BodyKind::Star, BodyKind::Planet, BodyKind::Moon];

    pub fn name(&self) -> &'static str {
        match self {
            BodyKind::Star => "star",
            BodyKind::Planet => "planet",
            BodyKind::Moon => "moon",
        }
    }
}

/// Bounded FIFO of recent screen positions, sampled every `frame_gap` frames.
#[derive(Clone, Debug)]
pub struct TrailHistory {
    points: VecDeque<DVec2>,
    capacity: usize,
    frame_gap: u32,
    frame_counter: u32,
}

impl TrailHistory {
    pub fn new(capacity: usize, frame_gap: u32) -> Self {
        Self {
            points: VecDeque::new(),
            capacity,
            frame_gap: frame_gap.max(1),
            frame_counter: 0,
        }
    }

    /// Count one resolved frame and sample `point` if this frame is due.
    ///
    /// The counter advances even when `point` is `None` (body off-screen), so
    /// sampling cadence is unaffected by visibility. Returns whether a point
    /// was pushed.
    pub fn record(&mut self, point: Option<DVec2>) -> bool {
        self.frame_counter = (self.frame_counter + 1) % self.frame_gap;
        if self.frame_counter != 0 {
            return false;
        }
        match point {
            Some(p) => {
                self.push(p);
                true
            }
            None => false,
        }
    }

    /// Append a point, evicting the oldest once capacity is reached.
    pub fn push(&mut self, point: DVec2) {
        if self.capacity == 0 {
            return;
        }
        while self.points.len() >= self.capacity {
            self.points.pop_front();
        }
        self.points.push_back(point);
    }

    /// Drop all points and restart the sampling counter.
    pub fn flush(&mut self) {
        self.points.clear();
        self.frame_counter = 0;
    }

    /// Points from oldest to newest.
    pub fn points(&self) -> impl ExactSizeIterator<Item = DVec2> + '_ {
        self.points.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

/// An orbiting (or fixed) entity in a scenario.
#[derive(Debug)]
pub struct CelestialBody {
    /// Key under which the scenario stores this body.
    pub key: String,
    pub name: String,
    pub description: String,
    pub kind: BodyKind,
    /// Physical radius in kilometers.
    pub radius: f64,
    /// Mass in kilograms (0 when unknown).
    pub mass: f64,
    pub color: Srgba,
    pub orbit: OrbitModel,
    /// Key of the body this one orbits. Non-owning; the graph owns all bodies.
    pub orbiting: Option<String>,
    /// Position used when the body has no orbit, in AU.
    pub initial_position: DVec3,
    period: OnceLock<f64>,
    last_position: DVec3,
    trail: TrailHistory,
}

impl CelestialBody {
    pub fn new(key: impl Into<String>, kind: BodyKind, orbit: OrbitModel, trail: TrailHistory) -> Self {
        let key = key.into();
        Self {
            name: key.clone(),
            key,
            description: String::new(),
            kind,
            radius: 0.0,
            mass: 0.0,
            color: Srgba::WHITE,
            orbit,
            orbiting: None,
            initial_position: DVec3::ZERO,
            period: OnceLock::new(),
            last_position: DVec3::ZERO,
            trail,
        }
    }

    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }

    pub fn with_mass(mut self, mass: f64) -> Self {
        self.mass = mass;
        self
    }

    pub fn with_color(mut self, color: Srgba) -> Self {
        self.color = color;
        self
    }

    pub fn with_initial_position(mut self, position: DVec3) -> Self {
        self.initial_position = position;
        self.last_position = position;
        self
    }

    pub fn orbiting(mut self, parent: impl Into<String>) -> Self {
        self.orbiting = Some(parent.into());
        self
    }

    pub fn is_star(&self) -> bool {
        self.kind == BodyKind::Star
    }

    /// Orbital period in Julian centuries, computed once and cached.
    ///
    /// An explicit period from the definition wins; otherwise Kepler's third
    /// law is applied with the parent's mass. Returns `None` for fixed bodies.
    pub fn period(&self, parent_mass: f64) -> Option<f64> {
        if let OrbitModel::Periodic(orbit) = &self.orbit
            && let Some(period) = orbit.period
        {
            return Some(period);
        }
        let a = self.orbit.semi_major_axis()?;
        Some(*self.period.get_or_init(|| {
            let a_m = a * AU_TO_METERS;
            let seconds = std::f64::consts::TAU * (a_m.powi(3) / (G * parent_mass)).sqrt();
            seconds_to_centuries(seconds)
        }))
    }

    /// Cached period, if it has been computed.
    pub fn cached_period(&self) -> Option<f64> {
        self.period.get().copied()
    }

    /// Position relative to the parent at `time` (Julian centuries since J2000).
    ///
    /// Returns `None` for bodies without an orbit model.
    pub fn relative_position(&self, time: f64, parent_mass: f64) -> Option<KeplerSolution> {
        let period = self.period(parent_mass);
        match &self.orbit {
            OrbitModel::Elements(elements) => solve_kepler_position(Some(elements), time),
            OrbitModel::Periodic(orbit) => Some(solve_kepler_simple(
                orbit.semi_major_axis,
                orbit.eccentricity,
                period?,
                time,
                orbit.orientation.as_ref(),
            )),
            OrbitModel::Fixed => None,
        }
    }

    /// Last world position resolved by the scene.
    pub fn last_position(&self) -> DVec3 {
        self.last_position
    }

    pub fn set_last_position(&mut self, position: DVec3) {
        self.last_position = position;
    }

    pub fn trail(&self) -> &TrailHistory {
        &self.trail
    }

    pub fn trail_mut(&mut self) -> &mut TrailHistory {
        &mut self.trail
    }

    /// Clear the trail; called whenever the projection changes.
    pub fn flush_trail_points(&mut self) {
        self.trail.flush();
    }
}

/// A resolved world position and whether every solve along the chain converged.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResolvedPosition {
    pub world: DVec3,
    pub converged: bool,
}

/// Owner of every body in a scenario and of the parent links between them.
#[derive(Debug, Default)]
pub struct BodyGraph {
    bodies: HashMap<String, CelestialBody>,
}

impl BodyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, body: CelestialBody) {
        self.bodies.insert(body.key.clone(), body);
    }

    pub fn get(&self, key: &str) -> Option<&CelestialBody> {
        self.bodies.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut CelestialBody> {
        self.bodies.get_mut(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.bodies.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CelestialBody> {
        self.bodies.values()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut CelestialBody> {
        self.bodies.values_mut()
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Keys ordered stars → planets → moons, then alphabetically.
    pub fn draw_order(&self) -> Vec<String> {
        let mut keys: Vec<_> = self.bodies.values().map(|b| (b.kind, b.key.clone())).collect();
        keys.sort_by(|a, b| {
            let rank = |k: BodyKind| BodyKind::ALL.iter().position(|x| *x == k);
            rank(a.0).cmp(&rank(b.0)).then_with(|| a.1.cmp(&b.1))
        });
        keys.into_iter().map(|(_, key)| key).collect()
    }

    /// Drop `orbiting` references that do not name a body; those bodies become roots.
    ///
    /// Returns the keys that were detached.
    pub fn detach_unresolved(&mut self) -> Vec<String> {
        let known: Vec<String> = self.bodies.keys().cloned().collect();
        let mut detached = Vec::new();
        for body in self.bodies.values_mut() {
            if let Some(parent) = &body.orbiting
                && !known.contains(parent)
            {
                bevy::log::warn!(
                    "'{}' orbits unknown body '{}', treating it as a root",
                    body.key,
                    parent
                );
                body.orbiting = None;
                detached.push(body.key.clone());
            }
        }
        detached.sort();
        detached
    }

    /// Fail if any parent chain loops back on itself.
    pub fn validate_acyclic(&self) -> Result<()> {
        for start in self.bodies.keys() {
            let mut current = start.as_str();
            let mut steps = 0;
            while let Some(parent) = self.bodies.get(current).and_then(|b| b.orbiting.as_deref()) {
                steps += 1;
                if parent == start || steps > self.bodies.len() {
                    return Err(ScenarioError::CyclicOrbit(start.clone()));
                }
                current = parent;
            }
        }
        Ok(())
    }

    /// World position of `key` at `time`, composed through its parent chain.
    pub fn world_position(&self, key: &str, time: f64) -> Result<ResolvedPosition> {
        self.resolve(key, time, 0)
    }

    fn resolve(&self, key: &str, time: f64, depth: usize) -> Result<ResolvedPosition> {
        if depth > self.bodies.len() {
            return Err(ScenarioError::CyclicOrbit(key.to_string()));
        }
        let body = self
            .bodies
            .get(key)
            .ok_or_else(|| ScenarioError::UnknownBody(key.to_string()))?;

        let Some(parent_key) = body.orbiting.as_deref() else {
            return Ok(ResolvedPosition {
                world: body.initial_position,
                converged: true,
            });
        };
        let parent = self
            .bodies
            .get(parent_key)
            .ok_or_else(|| ScenarioError::UnknownBody(parent_key.to_string()))?;

        let parent_pos = self.resolve(parent_key, time, depth + 1)?;
        match body.relative_position(time, parent.mass) {
            Some(solution) => Ok(ResolvedPosition {
                world: solution.position + parent_pos.world,
                converged: solution.converged && parent_pos.converged,
            }),
            // No orbit model: keep the configured offset from the parent.
            None => Ok(ResolvedPosition {
                world: body.initial_position + parent_pos.world,
                converged: parent_pos.converged,
            }),
        }
    }

    pub fn flush_trails(&mut self) {
        for body in self.bodies.values_mut() {
            body.flush_trail_points();
        }
    }
}
