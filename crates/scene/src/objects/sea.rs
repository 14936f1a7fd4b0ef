use crate::geometry::Geometry;
use crate::graph::{MeshNode, NodeId, SceneGraph};
use crate::material::PhongMaterial;
use crate::palette;
use aviator_common::{Axis, Transform};
use glam::{Mat4, Vec3};

/// A large translucent cylinder lying on its side below the camera; turning
/// it about Z reads as waves passing underneath.
#[derive(Debug, Clone, Copy)]
pub struct Sea {
    node: NodeId,
}

impl Sea {
    pub fn create(scene: &mut SceneGraph, parent: NodeId) -> Option<Self> {
        if !scene.contains(parent) {
            tracing::error!(?parent, "create_sea: no root node");
            return None;
        }
        let mut geometry = Geometry::cylinder(600.0, 600.0, 800.0, 40, 10);
        geometry.apply_matrix(Mat4::from_rotation_x(-std::f32::consts::FRAC_PI_2));
        let geometry = scene.add_geometry(geometry);

        let node = scene.add_mesh(
            parent,
            "sea",
            Transform::from_position(Vec3::new(0.0, -600.0, 0.0)),
            MeshNode {
                geometry,
                material: PhongMaterial::flat(palette::BLUE).with_opacity(0.6),
                cast_shadow: false,
                receive_shadow: true,
            },
        )?;
        Some(Self { node })
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn rotate(&self, scene: &mut SceneGraph, delta: f32) {
        scene.rotate(self.node, Axis::Z, delta);
    }

    pub fn rotation(&self, scene: &SceneGraph) -> f32 {
        scene.transform(self.node).map_or(0.0, |t| t.rotation.z)
    }
}
