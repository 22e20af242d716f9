//! Crosshair control panel: sliders, color, outline, style and image

use eframe::egui;
use std::path::PathBuf;
use tracing::info;

use crate::color::Rgba;
use crate::constants::crosshair;
use crate::controller::SettingsControls;
use crate::crosshair::CrosshairStyle;
use crate::gui::constants::*;

/// Renders the crosshair controls and returns true if any value changed
pub fn ui(ui: &mut egui::Ui, controls: &mut SettingsControls) -> bool {
    let mut changed = false;

    ui.group(|ui| {
        ui.label(egui::RichText::new("Crosshair").strong());
        ui.add_space(ITEM_SPACING);

        ui.label("Crosshair Size");
        changed |= ui
            .add(egui::Slider::new(&mut controls.size, crosshair::SIZE_MIN..=crosshair::SIZE_MAX).suffix(" px"))
            .changed();

        ui.label("Crosshair Width");
        changed |= ui
            .add(egui::Slider::new(&mut controls.width, crosshair::WIDTH_MIN..=crosshair::WIDTH_MAX))
            .changed();

        ui.label("Cross Length");
        changed |= ui
            .add(egui::Slider::new(&mut controls.cross_length, crosshair::ARM_MIN..=crosshair::ARM_MAX))
            .changed();

        ui.label("X Length");
        changed |= ui
            .add(egui::Slider::new(&mut controls.x_length, crosshair::ARM_MIN..=crosshair::ARM_MAX))
            .changed();

        ui.add_space(ITEM_SPACING);

        ui.horizontal(|ui| {
            ui.label("Color:");
            let mut rgb = [controls.color.r, controls.color.g, controls.color.b];
            if ui.color_edit_button_srgb(&mut rgb).changed() {
                controls.color = Rgba::opaque(rgb[0], rgb[1], rgb[2]);
                changed = true;
            }
            ui.weak(controls.color.to_hex());
        });

        changed |= ui.checkbox(&mut controls.show_outline, "Show Outline").changed();
    });

    ui.add_space(SECTION_SPACING);

    ui.group(|ui| {
        ui.label(egui::RichText::new("Crosshair Style").strong());
        ui.add_space(ITEM_SPACING);

        egui::ComboBox::from_id_salt("crosshair_style")
            .selected_text(controls.style.label())
            .width(200.0)
            .show_ui(ui, |ui| {
                for style in CrosshairStyle::ALL {
                    changed |= ui
                        .selectable_value(&mut controls.style, style, style.label())
                        .changed();
                }
            });

        let image_enabled = controls.style == CrosshairStyle::CustomImage;
        ui.add_enabled_ui(image_enabled, |ui| {
            ui.horizontal(|ui| {
                if ui.button("Choose Image").clicked() {
                    if let Some(path) = pick_image() {
                        info!(path = %path.display(), "Custom image chosen");
                        controls.custom_image = Some(path);
                        changed = true;
                    }
                }
                if ui
                    .add_enabled(controls.custom_image.is_some(), egui::Button::new("Clear"))
                    .clicked()
                {
                    controls.custom_image = None;
                    changed = true;
                }
            });

            match &controls.custom_image {
                Some(path) => ui.weak(path.display().to_string()),
                None => ui.weak("No image selected"),
            };
        });
    });

    changed
}

fn pick_image() -> Option<PathBuf> {
    rfd::FileDialog::new()
        .set_title("Choose Custom Crosshair Image")
        .add_filter("Images", &["png", "jpg", "jpeg"])
        .pick_file()
}
