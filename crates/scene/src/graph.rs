use crate::geometry::{Geometry, GeometryId};
use crate::light::Lighting;
use crate::material::PhongMaterial;
use aviator_common::{Axis, Color, Transform, wrap_angle};
use glam::Mat4;

/// Handle to a node in a `SceneGraph`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

/// Drawable payload of a mesh node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshNode {
    pub geometry: GeometryId,
    pub material: PhongMaterial,
    pub cast_shadow: bool,
    pub receive_shadow: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Group,
    Mesh(MeshNode),
}

#[derive(Debug, Clone)]
pub struct Node {
    pub name: String,
    pub transform: Transform,
    pub kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Node {
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn mesh(&self) -> Option<&MeshNode> {
        match &self.kind {
            NodeKind::Mesh(m) => Some(m),
            NodeKind::Group => None,
        }
    }
}

/// Distance fog, faded in by view depth between `near` and `far`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fog {
    pub color: Color,
    pub near: f32,
    pub far: f32,
}

/// A mesh node resolved to world space, ready to draw.
#[derive(Debug, Clone, Copy)]
pub struct MeshInstance<'a> {
    pub node: NodeId,
    pub world: Mat4,
    pub mesh: &'a MeshNode,
}

/// Arena-backed scene graph with a single root.
///
/// Nodes are only ever appended, so ids handed out stay valid for the life
/// of the graph.
#[derive(Debug, Clone)]
pub struct SceneGraph {
    nodes: Vec<Node>,
    geometries: Vec<Geometry>,
    pub fog: Option<Fog>,
    pub lighting: Option<Lighting>,
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneGraph {
    /// An empty graph holding only the root group.
    pub fn new() -> Self {
        Self {
            nodes: vec![Node {
                name: "scene".into(),
                transform: Transform::default(),
                kind: NodeKind::Group,
                parent: None,
                children: Vec::new(),
            }],
            geometries: Vec::new(),
            fog: None,
            lighting: None,
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        (id.0 as usize) < self.nodes.len()
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0 as usize)
    }

    pub fn transform(&self, id: NodeId) -> Option<&Transform> {
        self.node(id).map(|n| &n.transform)
    }

    pub fn transform_mut(&mut self, id: NodeId) -> Option<&mut Transform> {
        self.nodes.get_mut(id.0 as usize).map(|n| &mut n.transform)
    }

    /// Add `delta` radians to one rotation axis, wrapped into `[0, 2π)`.
    pub fn rotate(&mut self, id: NodeId, axis: Axis, delta: f32) -> bool {
        let Some(t) = self.transform_mut(id) else {
            return false;
        };
        let next = wrap_angle(axis.get(t.rotation) + delta);
        axis.set(&mut t.rotation, next);
        true
    }

    pub fn add_geometry(&mut self, geometry: Geometry) -> GeometryId {
        self.geometries.push(geometry);
        GeometryId(self.geometries.len() as u32 - 1)
    }

    pub fn geometry(&self, id: GeometryId) -> Option<&Geometry> {
        self.geometries.get(id.0 as usize)
    }

    pub fn geometries(&self) -> impl Iterator<Item = (GeometryId, &Geometry)> {
        self.geometries
            .iter()
            .enumerate()
            .map(|(i, g)| (GeometryId(i as u32), g))
    }

    /// Attach a new node under `parent`. Returns `None` if `parent` is unknown.
    pub fn add_node(
        &mut self,
        parent: NodeId,
        name: impl Into<String>,
        transform: Transform,
        kind: NodeKind,
    ) -> Option<NodeId> {
        if !self.contains(parent) {
            return None;
        }
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node {
            name: name.into(),
            transform,
            kind,
            parent: Some(parent),
            children: Vec::new(),
        });
        self.nodes[parent.0 as usize].children.push(id);
        Some(id)
    }

    pub fn add_group(
        &mut self,
        parent: NodeId,
        name: impl Into<String>,
        transform: Transform,
    ) -> Option<NodeId> {
        self.add_node(parent, name, transform, NodeKind::Group)
    }

    pub fn add_mesh(
        &mut self,
        parent: NodeId,
        name: impl Into<String>,
        transform: Transform,
        mesh: MeshNode,
    ) -> Option<NodeId> {
        self.add_node(parent, name, transform, NodeKind::Mesh(mesh))
    }

    /// World matrix of a node: product of every ancestor's local matrix.
    pub fn world_matrix(&self, id: NodeId) -> Option<Mat4> {
        let mut node = self.node(id)?;
        let mut m = node.transform.matrix();
        while let Some(parent) = node.parent {
            node = &self.nodes[parent.0 as usize];
            m = node.transform.matrix() * m;
        }
        Some(m)
    }

    /// Depth-first walk from the root, yielding `(id, depth)` in draw order.
    pub fn walk(&self) -> Vec<(NodeId, usize)> {
        let mut out = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![(self.root(), 0usize)];
        while let Some((id, depth)) = stack.pop() {
            out.push((id, depth));
            let node = &self.nodes[id.0 as usize];
            for child in node.children.iter().rev() {
                stack.push((*child, depth + 1));
            }
        }
        out
    }

    /// Every mesh node with its resolved world matrix.
    pub fn mesh_instances(&self) -> Vec<MeshInstance<'_>> {
        let mut out = Vec::new();
        let mut stack = vec![(self.root(), Mat4::IDENTITY)];
        while let Some((id, parent_world)) = stack.pop() {
            let node = &self.nodes[id.0 as usize];
            let world = parent_world * node.transform.matrix();
            if let NodeKind::Mesh(mesh) = &node.kind {
                out.push(MeshInstance {
                    node: id,
                    world,
                    mesh,
                });
            }
            for child in node.children.iter().rev() {
                stack.push((*child, world));
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    fn unit_mesh(graph: &mut SceneGraph) -> MeshNode {
        let geometry = graph.add_geometry(Geometry::cuboid(1.0, 1.0, 1.0));
        MeshNode {
            geometry,
            material: PhongMaterial::flat(Color::WHITE),
            cast_shadow: true,
            receive_shadow: true,
        }
    }

    #[test]
    fn new_graph_has_root() {
        let g = SceneGraph::new();
        assert_eq!(g.node_count(), 1);
        assert!(g.contains(g.root()));
        assert!(g.node(g.root()).unwrap().children().is_empty());
    }

    #[test]
    fn add_node_rejects_unknown_parent() {
        let mut g = SceneGraph::new();
        assert!(g.add_group(NodeId(99), "orphan", Transform::default()).is_none());
        assert_eq!(g.node_count(), 1);
    }

    #[test]
    fn world_matrix_composes_parents() {
        let mut g = SceneGraph::new();
        let root = g.root();
        let parent = g
            .add_group(
                root,
                "parent",
                Transform {
                    position: Vec3::new(0.0, 100.0, 0.0),
                    scale: Vec3::splat(0.25),
                    ..Transform::default()
                },
            )
            .unwrap();
        let child = g
            .add_group(parent, "child", Transform::from_position(Vec3::new(100.0, 0.0, 0.0)))
            .unwrap();
        let p = g.world_matrix(child).unwrap().transform_point3(Vec3::ZERO);
        assert!((p - Vec3::new(25.0, 100.0, 0.0)).length() < 1e-4);
    }

    #[test]
    fn mesh_instances_skip_groups() {
        let mut g = SceneGraph::new();
        let root = g.root();
        let mesh = unit_mesh(&mut g);
        let group = g.add_group(root, "group", Transform::default()).unwrap();
        let a = g.add_mesh(group, "a", Transform::default(), mesh).unwrap();
        let b = g.add_mesh(root, "b", Transform::default(), mesh).unwrap();
        let ids: Vec<NodeId> = g.mesh_instances().iter().map(|i| i.node).collect();
        assert_eq!(ids, vec![a, b]);
    }

    #[test]
    fn walk_reports_depth() {
        let mut g = SceneGraph::new();
        let root = g.root();
        let group = g.add_group(root, "group", Transform::default()).unwrap();
        let leaf = g.add_group(group, "leaf", Transform::default()).unwrap();
        assert_eq!(g.walk(), vec![(root, 0), (group, 1), (leaf, 2)]);
    }

    #[test]
    fn rotate_wraps() {
        let mut g = SceneGraph::new();
        let root = g.root();
        assert!(g.rotate(root, Axis::Z, std::f32::consts::TAU + 0.25));
        assert!((g.transform(root).unwrap().rotation.z - 0.25).abs() < 1e-5);
        assert!(!g.rotate(NodeId(5), Axis::Z, 1.0));
    }
}
