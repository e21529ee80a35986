//! Property-based tests for the viewport projector and trail history.

use bevy::math::{DVec2, DVec3};
use proptest::prelude::*;

use crate::body::{BodyKind, TrailHistory};
use crate::projection::{MIN_PIXEL_RADIUS, ProjectorConfig, RadiusBands, ViewportProjector};

fn kind() -> impl Strategy<Value = BodyKind> {
    prop_oneof![Just(BodyKind::Star), Just(BodyKind::Planet), Just(BodyKind::Moon)]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Display radii never drop below the floor, whatever the bands hold.
    #[test]
    fn prop_radius_floor(
        bands in prop::collection::vec(0.0f64..50.0, 1..6),
        radii in prop::collection::vec(0.0f64..1e6, 0..10),
        radius in 0.0f64..2e6,
        kind in kind(),
    ) {
        let config = ProjectorConfig {
            bands: RadiusBands { star: bands.clone(), planet: bands.clone(), moon: bands },
            ..Default::default()
        };
        let mut projector = ViewportProjector::new(&config, 800.0, 600.0);
        projector.set_radii_list(kind, &radii);
        prop_assert!(projector.get_radius(radius, kind) >= MIN_PIXEL_RADIUS);
    }

    /// `get_coordinates` is `Some` exactly when the projection lands on the canvas.
    #[test]
    fn prop_coordinates_match_bounds(
        x in -50.0f64..50.0,
        y in -50.0f64..50.0,
        z in -5.0f64..5.0,
        pitch in 0.0f64..1.5,
        yaw in -3.2f64..3.2,
        zoom in 0.0f64..5.0,
    ) {
        let mut projector = ViewportProjector::new(&ProjectorConfig::default(), 640.0, 480.0);
        projector.set_pitch_angle(pitch);
        projector.set_yaw_angle(yaw);
        projector.set_zoom(zoom);

        let world = DVec3::new(x, y, z);
        let screen = projector.project(world);
        let inside = (0.0..=640.0).contains(&screen.x) && (0.0..=480.0).contains(&screen.y);
        prop_assert_eq!(projector.get_coordinates(world).is_some(), inside);
    }

    /// Trails hold at most `capacity` points and keep the newest ones in order.
    #[test]
    fn prop_trail_bounded_fifo(capacity in 1usize..20, pushes in 0usize..60) {
        let mut trail = TrailHistory::new(capacity, 1);
        for i in 0..pushes {
            trail.push(DVec2::splat(i as f64));
        }
        prop_assert!(trail.len() <= capacity);
        let expected: Vec<DVec2> = (pushes.saturating_sub(capacity)..pushes)
            .map(|i| DVec2::splat(i as f64))
            .collect();
        prop_assert_eq!(trail.points().collect::<Vec<_>>(), expected);

        trail.flush();
        prop_assert_eq!(trail.points().count(), 0);
        prop_assert_eq!(trail.points().count(), 0);
    }
}
