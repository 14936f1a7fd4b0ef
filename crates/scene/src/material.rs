use aviator_common::Color;

/// Lambert/Phong-style surface description. Everything in the scene is flat
/// shaded; `flat_shading` is kept so a renderer can tell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhongMaterial {
    pub color: Color,
    pub opacity: f32,
    pub transparent: bool,
    pub flat_shading: bool,
}

impl PhongMaterial {
    pub fn flat(color: Color) -> Self {
        Self {
            color,
            opacity: 1.0,
            transparent: false,
            flat_shading: true,
        }
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity.clamp(0.0, 1.0);
        self.transparent = self.opacity < 1.0;
        self
    }

    /// Opacity the renderer should actually use.
    pub fn effective_opacity(&self) -> f32 {
        if self.transparent { self.opacity } else { 1.0 }
    }
}
