//! Materials for level visuals and hit-flash tinting.

use bevy::prelude::*;

use crate::combat::HitFlash;
use crate::enemies::Turret;

/// Flat material for simple primitive visuals.
pub fn flat_material(materials: &mut Assets<StandardMaterial>, color: Color) -> Handle<StandardMaterial> {
    materials.add(StandardMaterial {
        base_color: color,
        perceptual_roughness: 0.9,
        ..default()
    })
}

/// Copy the current flash colour onto each actor's own material.
pub fn sync_flash_tint(
    flashes: Query<(&HitFlash, &MeshMaterial3d<StandardMaterial>), Changed<HitFlash>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    for (flash, material) in flashes.iter() {
        if let Some(material) = materials.get_mut(&material.0) {
            material.base_color = flash.color();
        }
    }
}

/// Give newly resolved turrets a barrel mesh.
pub fn dress_turrets(
    mut commands: Commands,
    turrets: Query<&Turret, Added<Turret>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    for turret in turrets.iter() {
        let Some(visual) = turret.visual else {
            continue;
        };
        commands.entity(visual).insert((
            Mesh3d(meshes.add(Cuboid::new(0.8, 0.2, 0.2))),
            MeshMaterial3d(flat_material(&mut materials, Color::srgb(0.3, 0.3, 0.3))),
        ));
    }
}
