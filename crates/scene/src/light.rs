use aviator_common::{Axis, Color};
use glam::{Mat4, Vec3};

/// Bound applied to every shadow-light position component.
pub const SHADOW_LIGHT_RANGE: f32 = 400.0;

/// Gradient light: `sky` from above, `ground` from below.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HemisphereLight {
    pub sky: Color,
    pub ground: Color,
    pub intensity: f32,
}

/// Orthographic volume the shadow map is rendered from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShadowCamera {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
    pub near: f32,
    pub far: f32,
    pub map_size: u32,
}

impl Default for ShadowCamera {
    fn default() -> Self {
        Self {
            left: -400.0,
            right: 400.0,
            top: 400.0,
            bottom: -400.0,
            near: 1.0,
            far: 1000.0,
            map_size: 2048,
        }
    }
}

/// Parallel light shining from `position` towards `target`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalLight {
    color: Color,
    pub intensity: f32,
    position: Vec3,
    pub target: Vec3,
    pub cast_shadow: bool,
    pub shadow: ShadowCamera,
}

impl DirectionalLight {
    pub fn new(color: Color, intensity: f32) -> Self {
        Self {
            color,
            intensity,
            position: Vec3::new(0.0, 1.0, 0.0),
            target: Vec3::ZERO,
            cast_shadow: false,
            shadow: ShadowCamera::default(),
        }
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Unit vector from the target towards the light.
    pub fn direction(&self) -> Vec3 {
        (self.position - self.target).try_normalize().unwrap_or(Vec3::Y)
    }

    /// Light-space view-projection used to render and sample the shadow map.
    pub fn shadow_view_projection(&self) -> Mat4 {
        let up = if self.direction().abs().dot(Vec3::Y) > 0.999 {
            Vec3::Z
        } else {
            Vec3::Y
        };
        let view = Mat4::look_at_rh(self.position, self.target, up);
        let s = &self.shadow;
        let proj = Mat4::orthographic_rh(s.left, s.right, s.bottom, s.top, s.near, s.far);
        proj * view
    }
}

/// Edits the debug panel (or anything else) may make to the lights.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LightCommand {
    SetShadowPosition(Axis, f32),
    SetShadowColor(Color),
    SetHemisphereColor(Color),
    /// Shadow map resolution in texels per side; at least 1.
    SetShadowMapSize(u32),
}

/// The scene's two lights.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lighting {
    hemisphere: HemisphereLight,
    shadow: DirectionalLight,
}

impl Default for Lighting {
    fn default() -> Self {
        let mut shadow = DirectionalLight::new(Color::WHITE, 0.9);
        shadow.position = Vec3::new(150.0, 350.0, 350.0);
        shadow.cast_shadow = true;
        Self {
            hemisphere: HemisphereLight {
                sky: Color::from_hex(0xaaaaaa),
                ground: Color::BLACK,
                intensity: 0.9,
            },
            shadow,
        }
    }
}

impl Lighting {
    pub fn hemisphere(&self) -> &HemisphereLight {
        &self.hemisphere
    }

    pub fn shadow(&self) -> &DirectionalLight {
        &self.shadow
    }

    /// Apply one edit. Positions are clamped to `±SHADOW_LIGHT_RANGE`.
    pub fn apply(&mut self, command: LightCommand) {
        match command {
            LightCommand::SetShadowPosition(axis, value) => {
                let v = value.clamp(-SHADOW_LIGHT_RANGE, SHADOW_LIGHT_RANGE);
                axis.set(&mut self.shadow.position, v);
                tracing::debug!(axis = axis.label(), value = v, "shadow light moved");
            }
            LightCommand::SetShadowColor(color) => {
                self.shadow.color = color;
                tracing::debug!(%color, "shadow light recolored");
            }
            LightCommand::SetHemisphereColor(color) => {
                self.hemisphere.sky = color;
                tracing::debug!(%color, "hemisphere light recolored");
            }
            LightCommand::SetShadowMapSize(size) => {
                self.shadow.shadow.map_size = size.max(1);
                tracing::debug!(size, "shadow map resized");
            }
        }
    }
}
