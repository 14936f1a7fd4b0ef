use crate::geometry::Geometry;
use crate::graph::{MeshNode, NodeId, SceneGraph};
use crate::material::PhongMaterial;
use crate::palette;
use aviator_common::{Axis, Color, Transform, normalize};
use glam::{Vec2, Vec3};

/// Propeller spin added on every update, in radians. Not scaled by frame time.
pub const PROPELLER_STEP: f32 = 0.9;

const X_RANGE: (f32, f32) = (-100.0, 100.0);
const Y_RANGE: (f32, f32) = (25.0, 175.0);

/// Box airplane that follows the pointer.
#[derive(Debug, Clone, Copy)]
pub struct Airplane {
    node: NodeId,
    propeller: NodeId,
    propeller_step: f32,
}

fn part(scene: &mut SceneGraph, size: [f32; 3], color: Color) -> MeshNode {
    MeshNode {
        geometry: scene.add_geometry(Geometry::cuboid(size[0], size[1], size[2])),
        material: PhongMaterial::flat(color),
        cast_shadow: true,
        receive_shadow: true,
    }
}

impl Airplane {
    pub fn create(scene: &mut SceneGraph, parent: NodeId) -> Option<Self> {
        if !scene.contains(parent) {
            tracing::error!(?parent, "create_plane: no root node");
            return None;
        }
        let node = scene.add_group(
            parent,
            "airplane",
            Transform {
                position: Vec3::new(0.0, 100.0, 0.0),
                scale: Vec3::splat(0.25),
                ..Transform::default()
            },
        )?;

        let at = Transform::from_position;
        let cockpit = part(scene, [60.0, 50.0, 50.0], palette::RED);
        scene.add_mesh(node, "cockpit", Transform::default(), cockpit)?;
        let engine = part(scene, [100.0, 50.0, 50.0], palette::WHITE);
        scene.add_mesh(node, "engine", at(Vec3::new(40.0, 0.0, 0.0)), engine)?;
        let tail = part(scene, [15.0, 20.0, 5.0], palette::RED);
        scene.add_mesh(node, "tail", at(Vec3::new(-35.0, 25.0, 0.0)), tail)?;
        let wing = part(scene, [40.0, 8.0, 150.0], palette::RED);
        scene.add_mesh(node, "wing", Transform::default(), wing)?;

        let hub = part(scene, [20.0, 10.0, 10.0], palette::BROWN);
        let propeller = scene.add_mesh(node, "propeller", at(Vec3::new(100.0, 0.0, 0.0)), hub)?;
        let blade = part(scene, [1.0, 100.0, 20.0], palette::BROWN_DARK);
        scene.add_mesh(propeller, "blade", at(Vec3::new(8.0, 0.0, 0.0)), blade)?;

        Some(Self {
            node,
            propeller,
            propeller_step: PROPELLER_STEP,
        })
    }

    pub fn with_propeller_step(mut self, step: f32) -> Self {
        self.propeller_step = step;
        self
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    /// Place the airplane under the pointer and spin the propeller one step.
    ///
    /// `pointer` is in normalized device units; anything outside `[-1, 1]`
    /// is clamped.
    pub fn update(&self, scene: &mut SceneGraph, pointer: Vec2) {
        let x = normalize(pointer.x, -1.0, 1.0, X_RANGE.0, X_RANGE.1);
        let y = normalize(pointer.y, -1.0, 1.0, Y_RANGE.0, Y_RANGE.1);
        if let Some(t) = scene.transform_mut(self.node) {
            t.position.x = x;
            t.position.y = y;
        }
        scene.rotate(self.propeller, Axis::X, self.propeller_step);
    }

    pub fn position(&self, scene: &SceneGraph) -> Vec3 {
        scene.transform(self.node).map_or(Vec3::ZERO, |t| t.position)
    }

    pub fn propeller_rotation(&self, scene: &SceneGraph) -> f32 {
        scene.transform(self.propeller).map_or(0.0, |t| t.rotation.x)
    }
}
