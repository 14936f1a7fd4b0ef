//! Scene description for the aviator: a small node graph plus the one-time
//! factories that populate it.
//!
//! # Invariants
//! - Nodes are created at startup and never removed; `NodeId`s stay valid.
//! - Geometry is immutable once registered; renderers may cache it by id.
//! - A `Lighting` changes only through `Lighting::apply`, one `LightCommand`
//!   at a time.

pub mod camera;
pub mod geometry;
pub mod graph;
pub mod light;
pub mod material;
pub mod objects;
pub mod palette;

pub use camera::{PerspectiveCamera, Viewport};
pub use geometry::{Geometry, GeometryId};
pub use graph::{Fog, MeshInstance, MeshNode, Node, NodeId, NodeKind, SceneGraph};
pub use light::{
    DirectionalLight, HemisphereLight, LightCommand, Lighting, SHADOW_LIGHT_RANGE, ShadowCamera,
};
pub use material::PhongMaterial;
pub use objects::{
    Airplane, CLOUD_COUNT, PROPELLER_STEP, SceneObjects, Sea, Sky, create_lights, create_scene,
    populate,
};
