use aviator_common::Color;
use aviator_kernel::Game;
use aviator_scene::{LightCommand, Lighting};
use aviator_tools::{Control, ControlPanel, ControlValue, Folder, Widget};

/// Draw the light panel and push any edits through the game's light setters.
pub fn show(ctx: &egui::Context, panel: &ControlPanel, game: &mut Game) {
    let Some(lighting) = game.lighting().copied() else {
        return;
    };

    let mut commands = Vec::new();
    egui::Window::new("Controls")
        .default_pos([12.0, 12.0])
        .resizable(false)
        .show(ctx, |ui| {
            for folder in &panel.folders {
                folder_ui(ui, folder, &lighting, &mut commands);
            }
            ui.separator();
            ui.small(format!("Frame {} | F1: toggle panel", game.frames()));
        });

    for command in commands {
        game.apply_light(command);
    }
}

fn folder_ui(
    ui: &mut egui::Ui,
    folder: &Folder,
    lighting: &Lighting,
    commands: &mut Vec<LightCommand>,
) {
    egui::CollapsingHeader::new(&folder.name)
        .default_open(true)
        .show(ui, |ui| {
            for control in &folder.controls {
                if let Some(command) = control_ui(ui, control, lighting)
                    .and_then(|value| control.command(value))
                {
                    commands.push(command);
                }
            }
            for child in &folder.folders {
                folder_ui(ui, child, lighting, commands);
            }
        });
}

/// Returns the new value when the user changed it this frame.
fn control_ui(ui: &mut egui::Ui, control: &Control, lighting: &Lighting) -> Option<ControlValue> {
    match (control.widget, control.read(lighting)) {
        (Widget::Slider { min, max }, ControlValue::Number(mut v)) => ui
            .add(egui::Slider::new(&mut v, min..=max).text(&control.label))
            .changed()
            .then_some(ControlValue::Number(v)),
        (Widget::Color, ControlValue::Color(c)) => {
            let mut rgb = c.to_rgb8();
            let changed = ui
                .horizontal(|ui| {
                    let response = ui.color_edit_button_srgb(&mut rgb);
                    ui.label(&control.label);
                    response.changed()
                })
                .inner;
            changed.then(|| ControlValue::Color(Color::from_rgb8(rgb)))
        }
        _ => None,
    }
}
