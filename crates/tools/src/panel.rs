use aviator_common::{Axis, Color};
use aviator_scene::{LightCommand, Lighting, SHADOW_LIGHT_RANGE};
use std::fmt::Write;

/// How a control is presented.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Widget {
    Slider { min: f32, max: f32 },
    Color,
}

/// Which light field a control reads and writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Binding {
    ShadowPosition(Axis),
    ShadowColor,
    HemisphereColor,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControlValue {
    Number(f32),
    Color(Color),
}

impl std::fmt::Display for ControlValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ControlValue::Number(n) => write!(f, "{n:.1}"),
            ControlValue::Color(c) => write!(f, "{c}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Control {
    pub label: String,
    pub widget: Widget,
    pub binding: Binding,
}

impl Control {
    /// Current value of the bound field.
    pub fn read(&self, lighting: &Lighting) -> ControlValue {
        match self.binding {
            Binding::ShadowPosition(axis) => {
                ControlValue::Number(axis.get(lighting.shadow().position()))
            }
            Binding::ShadowColor => ControlValue::Color(lighting.shadow().color()),
            Binding::HemisphereColor => ControlValue::Color(lighting.hemisphere().sky),
        }
    }

    /// Turn an edited value into a light command.
    ///
    /// Returns `None` when the value kind does not fit the binding.
    pub fn command(&self, value: ControlValue) -> Option<LightCommand> {
        match (self.binding, value) {
            (Binding::ShadowPosition(axis), ControlValue::Number(v)) => {
                let v = match self.widget {
                    Widget::Slider { min, max } => v.clamp(min, max),
                    Widget::Color => v,
                };
                Some(LightCommand::SetShadowPosition(axis, v))
            }
            (Binding::ShadowColor, ControlValue::Color(c)) => {
                Some(LightCommand::SetShadowColor(c))
            }
            (Binding::HemisphereColor, ControlValue::Color(c)) => {
                Some(LightCommand::SetHemisphereColor(c))
            }
            _ => {
                tracing::warn!(label = %self.label, ?value, "control value rejected");
                None
            }
        }
    }
}

/// A collapsible group of controls.
#[derive(Debug, Clone, PartialEq)]
pub struct Folder {
    pub name: String,
    pub controls: Vec<Control>,
    pub folders: Vec<Folder>,
}

impl Folder {
    fn new(name: &str) -> Self {
        Self {
            name: name.into(),
            controls: Vec::new(),
            folders: Vec::new(),
        }
    }

    fn describe(&self, lighting: &Lighting, depth: usize, out: &mut String) {
        let _ = writeln!(out, "{:indent$}[{}]", "", self.name, indent = depth * 2);
        for c in &self.controls {
            let range = match c.widget {
                Widget::Slider { min, max } => format!(" ({min}..{max})"),
                Widget::Color => String::new(),
            };
            let _ = writeln!(
                out,
                "{:indent$}{} = {}{}",
                "",
                c.label,
                c.read(lighting),
                range,
                indent = (depth + 1) * 2
            );
        }
        for f in &self.folders {
            f.describe(lighting, depth + 1, out);
        }
    }
}

/// Debug panel: a tree of folders.
#[derive(Debug, Clone, PartialEq)]
pub struct ControlPanel {
    pub folders: Vec<Folder>,
}

impl ControlPanel {
    /// "Lights" folder with "Shadow Light" (x/y/z sliders, color) and
    /// "Hemisphere Light" (color).
    pub fn lights() -> Self {
        let mut shadow = Folder::new("Shadow Light");
        for axis in Axis::ALL {
            shadow.controls.push(Control {
                label: axis.label().into(),
                widget: Widget::Slider {
                    min: -SHADOW_LIGHT_RANGE,
                    max: SHADOW_LIGHT_RANGE,
                },
                binding: Binding::ShadowPosition(axis),
            });
        }
        shadow.controls.push(Control {
            label: "color".into(),
            widget: Widget::Color,
            binding: Binding::ShadowColor,
        });

        let mut hemisphere = Folder::new("Hemisphere Light");
        hemisphere.controls.push(Control {
            label: "color".into(),
            widget: Widget::Color,
            binding: Binding::HemisphereColor,
        });

        let mut lights = Folder::new("Lights");
        lights.folders = vec![shadow, hemisphere];
        Self {
            folders: vec![lights],
        }
    }

    /// Number of controls across all folders.
    pub fn control_count(&self) -> usize {
        fn count(f: &Folder) -> usize {
            f.controls.len() + f.folders.iter().map(count).sum::<usize>()
        }
        self.folders.iter().map(count).sum()
    }

    /// Plain-text view of the panel with current values.
    pub fn describe(&self, lighting: &Lighting) -> String {
        let mut out = String::new();
        for f in &self.folders {
            f.describe(lighting, 0, &mut out);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHADOW: [&str; 2] = ["Lights", "Shadow Light"];
    const HEMI: [&str; 2] = ["Lights", "Hemisphere Light"];

    trait Find {
        fn find(&self, path: &[&str], label: &str) -> Option<&Control>;
    }

    impl Find for ControlPanel {
        fn find(&self, path: &[&str], label: &str) -> Option<&Control> {
            let (first, rest) = path.split_first()?;
            let mut folder = self.folders.iter().find(|f| f.name == *first)?;
            for name in rest {
                folder = folder.folders.iter().find(|f| f.name == *name)?;
            }
            folder.controls.iter().find(|c| c.label == label)
        }
    }

    #[test]
    fn panel_layout() {
        let panel = ControlPanel::lights();
        assert_eq!(panel.control_count(), 5);
        for axis in ["x", "y", "z", "color"] {
            assert!(panel.find(&SHADOW, axis).is_some(), "missing {axis}");
        }
        assert!(panel.find(&HEMI, "color").is_some());
        assert!(panel.find(&HEMI, "x").is_none());
        assert!(panel.find(&["Nope"], "x").is_none());
    }

    #[test]
    fn sliders_span_plus_minus_400() {
        let panel = ControlPanel::lights();
        let x = panel.find(&SHADOW, "x").unwrap();
        assert_eq!(
            x.widget,
            Widget::Slider {
                min: -400.0,
                max: 400.0
            }
        );
    }

    #[test]
    fn read_reflects_lighting() {
        let panel = ControlPanel::lights();
        let lighting = Lighting::default();
        let y = panel.find(&SHADOW, "y").unwrap();
        assert_eq!(y.read(&lighting), ControlValue::Number(350.0));
        let c = panel.find(&HEMI, "color").unwrap();
        assert_eq!(c.read(&lighting), ControlValue::Color(Color(0xaaaaaa)));
    }

    #[test]
    fn edits_go_through_light_setters() {
        let panel = ControlPanel::lights();
        let mut lighting = Lighting::default();
        let z = panel.find(&SHADOW, "z").unwrap();
        lighting.apply(z.command(ControlValue::Number(-120.0)).unwrap());
        assert_eq!(lighting.shadow().position().z, -120.0);
        assert_eq!(z.read(&lighting), ControlValue::Number(-120.0));

        let color = panel.find(&SHADOW, "color").unwrap();
        lighting.apply(color.command(ControlValue::Color(Color(0x123456))).unwrap());
        assert_eq!(lighting.shadow().color(), Color(0x123456));
    }

    #[test]
    fn slider_clamps_before_command() {
        let panel = ControlPanel::lights();
        let x = panel.find(&SHADOW, "x").unwrap();
        assert_eq!(
            x.command(ControlValue::Number(1e6)),
            Some(LightCommand::SetShadowPosition(Axis::X, 400.0))
        );
    }

    #[test]
    fn mismatched_value_is_rejected() {
        let panel = ControlPanel::lights();
        let c = panel.find(&HEMI, "color").unwrap();
        assert_eq!(c.command(ControlValue::Number(1.0)), None);
        let x = panel.find(&SHADOW, "x").unwrap();
        assert_eq!(x.command(ControlValue::Color(Color::WHITE)), None);
    }

    #[test]
    fn describe_lists_values() {
        let text = ControlPanel::lights().describe(&Lighting::default());
        assert!(text.contains("[Lights]"));
        assert!(text.contains("  [Shadow Light]"));
        assert!(text.contains("x = 150.0 (-400..400)"));
        assert!(text.contains("color = #ffffff"));
    }
}
