use aviator_scene::{NodeKind, PerspectiveCamera, SceneGraph};
use std::fmt::Write;

/// Renderer-agnostic interface. All renderers implement this trait.
///
/// A renderer reads the scene and camera, then produces output. It never
/// mutates either; animation belongs to the game loop.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Draw one frame of `scene` as seen from `camera`.
    fn render(&mut self, scene: &SceneGraph, camera: &PerspectiveCamera) -> Self::Output;

    /// The drawable area changed size.
    fn resize(&mut self, _width: u32, _height: u32) {}
}

/// Text renderer for headless runs.
///
/// Produces a human-readable dump of the scene graph, one line per node.
#[derive(Debug, Default)]
pub struct DebugTextRenderer {
    frames: u64,
    size: (u32, u32),
}

impl DebugTextRenderer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            frames: 0,
            size: (width, height),
        }
    }

}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&mut self, scene: &SceneGraph, camera: &PerspectiveCamera) -> String {
        self.frames += 1;
        let mut out = String::new();
        let _ = writeln!(
            out,
            "=== Frame {} ({}x{}) ===",
            self.frames, self.size.0, self.size.1
        );
        let c = camera.position;
        let _ = writeln!(
            out,
            "Camera: pos=({:.1}, {:.1}, {:.1}) fov={:.0} aspect={:.3}",
            c.x, c.y, c.z, camera.fov_degrees, camera.aspect
        );
        if let Some(fog) = &scene.fog {
            let _ = writeln!(out, "Fog: {} {:.0}..{:.0}", fog.color, fog.near, fog.far);
        }
        if let Some(lighting) = &scene.lighting {
            let h = lighting.hemisphere();
            let s = lighting.shadow();
            let p = s.position();
            let _ = writeln!(
                out,
                "Lights: hemisphere {}/{} x{:.2}, shadow {} x{:.2} at ({:.0}, {:.0}, {:.0})",
                h.sky,
                h.ground,
                h.intensity,
                s.color(),
                s.intensity,
                p.x,
                p.y,
                p.z
            );
        }

        for (id, depth) in scene.walk() {
            let Some(node) = scene.node(id) else {
                continue;
            };
            let t = &node.transform;
            let kind = match &node.kind {
                NodeKind::Group => "group".to_string(),
                NodeKind::Mesh(m) => format!("mesh {}", m.material.color),
            };
            let tris = node
                .mesh()
                .and_then(|m| scene.geometry(m.geometry))
                .map(|g| format!(" tris={}", g.triangle_count()))
                .unwrap_or_default();
            let _ = writeln!(
                out,
                "{:indent$}{} [{}]{} pos=({:.2}, {:.2}, {:.2}) rot=({:.3}, {:.3}, {:.3})",
                "",
                node.name,
                kind,
                tris,
                t.position.x,
                t.position.y,
                t.position.z,
                t.rotation.x,
                t.rotation.y,
                t.rotation.z,
                indent = depth * 2
            );
        }
        tracing::trace!(frame = self.frames, bytes = out.len(), "text frame");
        out
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.size = (width, height);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aviator_common::Transform;
    use aviator_scene::Viewport;
    use glam::Vec3;

    fn camera() -> PerspectiveCamera {
        PerspectiveCamera::for_viewport(Viewport::new(800, 600))
    }

    #[test]
    fn debug_renderer_empty_scene() {
        let scene = SceneGraph::new();
        let mut renderer = DebugTextRenderer::new(800, 600);
        let output = renderer.render(&scene, &camera());

        assert!(output.contains("Frame 1 (800x600)"));
        assert!(output.contains("scene [group]"));
        assert!(renderer.render(&scene, &camera()).contains("Frame 2 (800x600)"));
    }

    #[test]
    fn debug_renderer_indents_children() {
        let mut scene = SceneGraph::new();
        let root = scene.root();
        scene
            .add_group(root, "child", Transform::from_position(Vec3::new(1.0, 2.0, 3.0)))
            .unwrap();

        let mut renderer = DebugTextRenderer::new(800, 600);
        let output = renderer.render(&scene, &camera());
        assert!(output.contains("  child [group] pos=(1.00, 2.00, 3.00)"));
    }

    #[test]
    fn debug_renderer_reports_fog_and_lights() {
        let mut scene = aviator_scene::create_scene();
        aviator_scene::create_lights(&mut scene);
        let mut renderer = DebugTextRenderer::new(800, 600);
        let output = renderer.render(&scene, &camera());
        assert!(output.contains("Fog: #f7d9aa 100..950"));
        assert!(output.contains("hemisphere #aaaaaa/#000000"));
    }

    #[test]
    fn mesh_lines_carry_triangle_counts() {
        let mut scene = SceneGraph::new();
        let root = scene.root();
        let geometry = scene.add_geometry(aviator_scene::Geometry::cuboid(1.0, 1.0, 1.0));
        scene
            .add_mesh(
                root,
                "box",
                Transform::default(),
                aviator_scene::MeshNode {
                    geometry,
                    material: aviator_scene::PhongMaterial::flat(aviator_common::Color::WHITE),
                    cast_shadow: false,
                    receive_shadow: false,
                },
            )
            .unwrap();

        let output = DebugTextRenderer::new(800, 600).render(&scene, &camera());
        assert!(output.contains("  box [mesh #ffffff] tris=12 pos="));
        assert!(output.contains("scene [group] pos="));
    }

    #[test]
    fn resize_updates_header() {
        let scene = SceneGraph::new();
        let mut renderer = DebugTextRenderer::new(800, 600);
        renderer.resize(1024, 768);
        assert!(renderer.render(&scene, &camera()).contains("(1024x768)"));
    }
}
