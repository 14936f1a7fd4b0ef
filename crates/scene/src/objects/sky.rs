use crate::geometry::Geometry;
use crate::graph::{MeshNode, NodeId, SceneGraph};
use crate::material::PhongMaterial;
use crate::palette;
use aviator_common::{Axis, SplitMix64, Transform};
use glam::Vec3;
use std::f32::consts::{FRAC_PI_2, TAU};

pub const CLOUD_COUNT: usize = 20;

/// A ring of blocky clouds around the Z axis. Spinning the ring twice as fast
/// as the sea gives the parallax of flying forward.
#[derive(Debug, Clone, Copy)]
pub struct Sky {
    node: NodeId,
}

impl Sky {
    pub fn create(scene: &mut SceneGraph, parent: NodeId, seed: u64) -> Option<Self> {
        if !scene.contains(parent) {
            tracing::error!(?parent, "create_sky: no root node");
            return None;
        }
        let mut rng = SplitMix64::new(seed);
        let block = scene.add_geometry(Geometry::cuboid(20.0, 20.0, 20.0));
        let block_mesh = MeshNode {
            geometry: block,
            material: PhongMaterial::flat(palette::WHITE),
            cast_shadow: true,
            receive_shadow: true,
        };

        let node = scene.add_group(
            parent,
            "sky",
            Transform::from_position(Vec3::new(0.0, -600.0, 0.0)),
        )?;

        let step = TAU / CLOUD_COUNT as f32;
        for i in 0..CLOUD_COUNT {
            let angle = step * i as f32;
            let distance = 750.0 + rng.next_f32() * 200.0;
            let cloud = scene.add_group(
                node,
                format!("cloud_{i}"),
                Transform {
                    position: Vec3::new(
                        angle.cos() * distance,
                        angle.sin() * distance,
                        -400.0 - rng.next_f32() * 400.0,
                    ),
                    rotation: Vec3::new(0.0, 0.0, angle + FRAC_PI_2),
                    scale: Vec3::splat(1.0 + rng.next_f32() * 2.0),
                },
            )?;

            let blocks = 3 + rng.below(3);
            for b in 0..blocks {
                let transform = Transform {
                    position: Vec3::new(
                        b as f32 * 15.0,
                        rng.next_f32() * 10.0,
                        rng.next_f32() * 10.0,
                    ),
                    rotation: Vec3::new(0.0, rng.next_f32() * TAU, rng.next_f32() * TAU),
                    scale: Vec3::splat(0.1 + rng.next_f32() * 0.9),
                };
                scene.add_mesh(cloud, format!("cloud_{i}_block_{b}"), transform, block_mesh)?;
            }
        }

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

#[cfg(test)]
mod tests {
    use super::*;

    fn build(seed: u64) -> (SceneGraph, Sky) {
        let mut scene = SceneGraph::new();
        let root = scene.root();
        let sky = Sky::create(&mut scene, root, seed).unwrap();
        (scene, sky)
    }

    #[test]
    fn sky_has_twenty_clouds_of_three_to_five_blocks() {
        let (scene, sky) = build(1);
        let clouds = scene.node(sky.node()).unwrap().children();
        assert_eq!(clouds.len(), CLOUD_COUNT);
        for cloud in clouds {
            let blocks = scene.node(*cloud).unwrap().children().len();
            assert!((3..=5).contains(&blocks), "cloud has {blocks} blocks");
        }
    }

    #[test]
    fn clouds_ring_at_expected_distance() {
        let (scene, sky) = build(2);
        for cloud in scene.node(sky.node()).unwrap().children() {
            let p = scene.transform(*cloud).unwrap().position;
            let r = p.truncate().length();
            assert!((749.9..=950.1).contains(&r));
            assert!((-800.0..=-400.0).contains(&p.z));
        }
    }

    #[test]
    fn same_seed_same_sky() {
        let (a, sky_a) = build(99);
        let (b, sky_b) = build(99);
        let positions = |scene: &SceneGraph, sky: Sky| -> Vec<Vec3> {
            scene
                .node(sky.node())
                .unwrap()
                .children()
                .iter()
                .map(|c| scene.transform(*c).unwrap().position)
                .collect()
        };
        assert_eq!(positions(&a, sky_a), positions(&b, sky_b));
    }

    #[test]
    fn blocks_share_one_geometry() {
        let (scene, _) = build(3);
        assert_eq!(scene.geometries().count(), 1);
    }
}
