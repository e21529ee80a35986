//! Body rendering.
//!
//! Each body in the frame is a filled circle mesh, rebuilt whenever the set of
//! bodies changes (a scenario load) and repositioned every frame. Stars also
//! get a gizmo glow.

use bevy::color::Srgba;
use bevy::prelude::*;

use super::{canvas_to_world, z_layers};
use crate::scenarios::ScenarioState;
use crate::time::TickSet;

/// Component linking a sprite entity to a scenario body.
#[derive(Component)]
pub struct BodySprite {
    pub key: String,
}

/// Keys and colours the current sprites were built for.
#[derive(Resource, Default)]
pub struct SpawnedBodies {
    bodies: Vec<(String, Srgba)>,
}

/// Shared unit circle scaled per body.
#[derive(Resource)]
struct CircleMesh(Handle<Mesh>);

/// Plugin providing body sprite spawning and syncing.
pub struct BodySpritePlugin;

impl Plugin for BodySpritePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SpawnedBodies>()
            .add_systems(Startup, setup_circle_mesh)
            .add_systems(
                Update,
                (respawn_body_sprites, sync_body_sprites).chain().after(TickSet),
            );
    }
}

fn setup_circle_mesh(mut commands: Commands, mut meshes: ResMut<Assets<Mesh>>) {
    commands.insert_resource(CircleMesh(meshes.add(Circle::new(1.0))));
}

/// Rebuild sprites when the scenario's bodies differ from the spawned ones.
fn respawn_body_sprites(
    mut commands: Commands,
    scenario: Res<ScenarioState>,
    mut spawned: ResMut<SpawnedBodies>,
    circle: Res<CircleMesh>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    sprites: Query<Entity, With<BodySprite>>,
) {
    let wanted: Vec<(String, Srgba)> = scenario
        .frame()
        .bodies
        .iter()
        .map(|b| (b.key.clone(), b.color))
        .collect();
    if wanted.is_empty() || wanted == spawned.bodies {
        return;
    }

    for entity in sprites.iter() {
        commands.entity(entity).despawn();
    }
    for (index, (key, color)) in wanted.iter().enumerate() {
        let z = z_layers::BODIES + index as f32 * z_layers::BODY_STEP;
        commands.spawn((
            Mesh2d(circle.0.clone()),
            MeshMaterial2d(materials.add(ColorMaterial::from_color(*color))),
            Transform::from_xyz(0.0, 0.0, z),
            Visibility::Hidden,
            BodySprite { key: key.clone() },
        ));
    }
    info!("Spawned {} body sprites", wanted.len());
    spawned.bodies = wanted;
}

/// Move and size sprites from the current frame; hide off-canvas bodies.
fn sync_body_sprites(
    scenario: Res<ScenarioState>,
    mut sprites: Query<(&BodySprite, &mut Transform, &mut Visibility)>,
) {
    let frame = scenario.frame();
    let size = scenario.projector().canvas_size();
    for (sprite, mut transform, mut visibility) in sprites.iter_mut() {
        let Some(body) = frame.body(&sprite.key) else {
            *visibility = Visibility::Hidden;
            continue;
        };
        let Some(screen) = body.screen_position else {
            *visibility = Visibility::Hidden;
            continue;
        };
        let world = canvas_to_world(screen, size);
        transform.translation.x = world.x;
        transform.translation.y = world.y;
        transform.scale = Vec3::splat(body.pixel_radius as f32);
        *visibility = Visibility::Visible;
    }
}

/// Soft halo of fading rings around every visible star.
pub fn draw_star_glow(mut gizmos: Gizmos, scenario: Res<ScenarioState>) {
    const RINGS: usize = 6;
    let size = scenario.projector().canvas_size();
    for body in scenario.frame().bodies.iter().filter(|b| b.is_star) {
        let Some(screen) = body.screen_position else {
            continue;
        };
        let center = canvas_to_world(screen, size);
        let radius = body.pixel_radius as f32;
        for ring in 1..=RINGS {
            let t = ring as f32 / RINGS as f32;
            let color = body.color.with_alpha(0.35 * (1.0 - t));
            gizmos.circle_2d(Isometry2d::from_translation(center), radius * (1.0 + 0.5 * t), color);
        }
    }
}
