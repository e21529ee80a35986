//! World → screen projection and display-radius banding.
//!
//! World coordinates are AU in the J2000 ecliptic frame. Screen coordinates
//! are canvas pixels, origin top-left, y growing downward.

use bevy::math::{DVec2, DVec3};
use serde::Deserialize;

use crate::body::BodyKind;

/// Smallest radius, in pixels, any body is drawn with.
pub const MIN_PIXEL_RADIUS: f64 = 2.0;

/// Most grid lines drawn on each side of the POV, per axis.
pub const MAX_GRID_LINES: usize = 500;

/// Pixel radii per body kind, smallest band first.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct RadiusBands {
    pub star: Vec<f64>,
    pub planet: Vec<f64>,
    pub moon: Vec<f64>,
}

impl Default for RadiusBands {
    fn default() -> Self {
        Self {
            star: vec![25.0, 30.0, 32.0, 35.0],
            planet: vec![10.0, 12.0, 14.0, 16.0],
            moon: vec![4.0, 5.0, 6.0, 7.0],
        }
    }
}

impl RadiusBands {
    pub fn for_kind(&self, kind: BodyKind) -> &[f64] {
        match kind {
            BodyKind::Star => &self.star,
            BodyKind::Planet => &self.planet,
            BodyKind::Moon => &self.moon,
        }
    }
}

/// Initial view parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct ProjectorConfig {
    /// Pixels² per AU², combined with zoom as `sqrt(orbit_scale * zoom)`.
    pub orbit_scale: f64,
    pub zoom: f64,
    pub min_zoom: f64,
    pub yaw: f64,
    pub pitch: f64,
    pub bands: RadiusBands,
}

impl Default for ProjectorConfig {
    fn default() -> Self {
        Self {
            orbit_scale: 40_000.0,
            zoom: 1.0,
            min_zoom: 0.1,
            yaw: 0.0,
            pitch: 0.0,
            bands: RadiusBands::default(),
        }
    }
}

/// Camera transform from world space to canvas pixels.
#[derive(Clone, Debug)]
pub struct ViewportProjector {
    width: f64,
    height: f64,
    zoom: f64,
    min_zoom: f64,
    orbit_scale: f64,
    center: DVec2,
    yaw: f64,
    pitch: f64,
    pov: DVec3,
    bands: RadiusBands,
    /// Band width per kind, indexed like `BodyKind::ALL`.
    radius_steps: [f64; 3],
}

impl ViewportProjector {
    pub fn new(config: &ProjectorConfig, width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            zoom: config.zoom.max(config.min_zoom),
            min_zoom: config.min_zoom,
            orbit_scale: config.orbit_scale,
            center: DVec2::new(width / 2.0, height / 2.0),
            yaw: config.yaw,
            pitch: config.pitch,
            pov: DVec3::ZERO,
            bands: config.bands.clone(),
            radius_steps: [0.0; 3],
        }
    }

    /// Unclipped screen position of a world point.
    pub fn project(&self, world: DVec3) -> DVec2 {
        let p = (world - self.pov) * self.pixels_per_au();

        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let x = p.x * cos_yaw - p.y * sin_yaw;
        let y = p.x * sin_yaw + p.y * cos_yaw;

        // Pitch tilts the view about the screen x axis; depth is discarded.
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        let y = y * cos_pitch - p.z * sin_pitch;

        DVec2::new(self.center.x + x, self.center.y - y)
    }

    /// Screen position of a world point, or `None` when it falls off the canvas.
    pub fn get_coordinates(&self, world: DVec3) -> Option<DVec2> {
        let screen = self.project(world);
        let on_canvas = (0.0..=self.width).contains(&screen.x)
            && (0.0..=self.height).contains(&screen.y);
        on_canvas.then_some(screen)
    }

    /// Derive the band width for `kind` from every physical radius of that kind.
    pub fn set_radii_list(&mut self, kind: BodyKind, radii: &[f64]) {
        let band_count = self.bands.for_kind(kind).len();
        let step = match (
            radii.iter().copied().reduce(f64::min),
            radii.iter().copied().reduce(f64::max),
        ) {
            (Some(min), Some(max)) if band_count > 0 => (max - min) / band_count as f64,
            _ => 0.0,
        };
        self.radius_steps[kind_index(kind)] = step;
    }

    /// Display radius in pixels for a physical radius, never below [`MIN_PIXEL_RADIUS`].
    pub fn get_radius(&self, physical_radius: f64, kind: BodyKind) -> f64 {
        let bands = self.bands.for_kind(kind);
        let Some(last) = bands.len().checked_sub(1) else {
            return MIN_PIXEL_RADIUS;
        };
        let step = self.radius_steps[kind_index(kind)];
        let index = if step > 0.0 && step.is_finite() {
            ((physical_radius.max(0.0) / step).floor() as usize).min(last)
        } else {
            last
        };
        bands[index].max(MIN_PIXEL_RADIUS)
    }

    /// Add `delta` to the zoom, clamped at the minimum. Returns whether it changed.
    pub fn set_zoom(&mut self, delta: f64) -> bool {
        let zoom = (self.zoom + delta).max(self.min_zoom);
        let changed = zoom != self.zoom;
        self.zoom = zoom;
        changed
    }

    pub fn set_center_point(&mut self, center: DVec2) -> bool {
        let changed = center != self.center;
        self.center = center;
        changed
    }

    /// Set pitch (radians). Returns `false` and does nothing if unchanged.
    pub fn set_pitch_angle(&mut self, pitch: f64) -> bool {
        if pitch == self.pitch {
            return false;
        }
        self.pitch = pitch;
        true
    }

    /// Set yaw (radians). Returns `false` and does nothing if unchanged.
    pub fn set_yaw_angle(&mut self, yaw: f64) -> bool {
        if yaw == self.yaw {
            return false;
        }
        self.yaw = yaw;
        true
    }

    pub fn set_pov(&mut self, pov: DVec3) {
        self.pov = pov;
    }

    /// Resize the canvas. A centre point still at the old canvas centre follows it.
    pub fn set_canvas_size(&mut self, width: f64, height: f64) {
        if self.center == DVec2::new(self.width / 2.0, self.height / 2.0) {
            self.center = DVec2::new(width / 2.0, height / 2.0);
        }
        self.width = width;
        self.height = height;
    }

    /// Line segments of a square grid in the ecliptic plane around the POV.
    ///
    /// Lines are `spacing` AU apart and span `±extent` AU, capped at
    /// [`MAX_GRID_LINES`] per side.
    pub fn grid_segments(&self, spacing: f64, extent: f64) -> Vec<(DVec2, DVec2)> {
        if !(spacing > 0.0 && extent > 0.0) {
            return Vec::new();
        }
        let n = (extent / spacing).floor().min(MAX_GRID_LINES as f64) as i64;
        let mut segments = Vec::with_capacity(2 * (2 * n as usize + 1));
        for i in -n..=n {
            let offset = i as f64 * spacing;
            let origin = DVec3::new(self.pov.x, self.pov.y, 0.0);
            segments.push((
                self.project(origin + DVec3::new(offset, -extent, 0.0)),
                self.project(origin + DVec3::new(offset, extent, 0.0)),
            ));
            segments.push((
                self.project(origin + DVec3::new(-extent, offset, 0.0)),
                self.project(origin + DVec3::new(extent, offset, 0.0)),
            ));
        }
        segments
    }

    pub fn pixels_per_au(&self) -> f64 {
        (self.orbit_scale * self.zoom).sqrt()
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn center_point(&self) -> DVec2 {
        self.center
    }

    pub fn pitch(&self) -> f64 {
        self.pitch
    }

    pub fn yaw(&self) -> f64 {
        self.yaw
    }

    pub fn pov(&self) -> DVec3 {
        self.pov
    }

    pub fn canvas_size(&self) -> DVec2 {
        DVec2::new(self.width, self.height)
    }
}

fn kind_index(kind: BodyKind) -> usize {
    match kind {
        BodyKind::Star => 0,
        BodyKind::Planet => 1,
        BodyKind::Moon => 2,
    }
}
