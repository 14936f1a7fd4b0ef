//! One-time construction of the scene and its three animated objects.

mod airplane;
mod sea;
mod sky;

pub use airplane::{Airplane, PROPELLER_STEP};
pub use sea::Sea;
pub use sky::{CLOUD_COUNT, Sky};

use crate::graph::{Fog, NodeId, SceneGraph};
use crate::light::Lighting;
use crate::palette;

/// An empty scene with the fog the whole look depends on.
pub fn create_scene() -> SceneGraph {
    let mut scene = SceneGraph::new();
    scene.fog = Some(Fog {
        color: palette::FOG,
        near: 100.0,
        far: 950.0,
    });
    scene
}

/// Install the hemisphere and shadow-casting directional lights.
pub fn create_lights(scene: &mut SceneGraph) -> &mut Lighting {
    scene.lighting.insert(Lighting::default())
}

/// Handles to everything the loop animates.
#[derive(Debug, Clone, Copy)]
pub struct SceneObjects {
    pub airplane: Airplane,
    pub sea: Sea,
    pub sky: Sky,
}

/// Lights plus airplane, sea and sky under `parent`.
///
/// Returns `None` (after logging) when `parent` is not in the graph.
pub fn populate(scene: &mut SceneGraph, parent: NodeId, sky_seed: u64) -> Option<SceneObjects> {
    if !scene.contains(parent) {
        tracing::error!(?parent, "create_lights: no root node");
        return None;
    }
    create_lights(scene);
    let airplane = Airplane::create(scene, parent)?;
    let sea = Sea::create(scene, parent)?;
    let sky = Sky::create(scene, parent, sky_seed)?;
    tracing::info!(
        nodes = scene.node_count(),
        geometries = scene.geometries().count(),
        "scene populated"
    );
    Some(SceneObjects { airplane, sea, sky })
}
