//! Scene carousel: one thumbnail button per scene plus scroll arrows.

use eframe::egui::{self, Ui};

/// Horizontal scroll step of the arrow buttons (one thumbnail stride)
pub const SCROLL_STEP: f32 = 220.0;

/// Thumbnail size in points
const THUMB_SIZE: egui::Vec2 = egui::vec2(160.0, 90.0);

/// One carousel entry (texture is None when the thumbnail failed to load)
pub struct ThumbEntry {
    pub texture: Option<egui::TextureHandle>,
    pub label: String,
}

/// Render the carousel. Returns the index of a newly activated scene.
///
/// The strip is arrow-driven: `scroll_offset` is owned by the caller,
/// stepped by the arrow buttons and clamped by the scroll area. The active
/// thumbnail carries the selected marker; activating another one clears it
/// implicitly since there is a single active index.
pub fn scene_carousel(
    ui: &mut Ui,
    thumbs: &[ThumbEntry],
    active: Option<usize>,
    scroll_offset: &mut f32,
) -> Option<usize> {
    if thumbs.is_empty() {
        return None;
    }

    let mut selected = None;

    ui.horizontal(|ui| {
        if ui.button("\u{25C0}").clicked() {
            *scroll_offset = (*scroll_offset - SCROLL_STEP).max(0.0);
        }

        // Reserve room for the right arrow before the area eats the row
        let area_width = (ui.available_width() - 40.0).max(0.0);
        let output = egui::ScrollArea::horizontal()
            .id_salt("scene_carousel")
            .max_width(area_width)
            .scroll_offset(egui::vec2(*scroll_offset, 0.0))
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    for (idx, thumb) in thumbs.iter().enumerate() {
                        let is_active = active == Some(idx);
                        ui.vertical(|ui| {
                            let clicked = match &thumb.texture {
                                Some(tex) => {
                                    let image = egui::Image::new(egui::load::SizedTexture::new(
                                        tex.id(),
                                        THUMB_SIZE,
                                    ));
                                    ui.add(egui::ImageButton::new(image).selected(is_active))
                                        .clicked()
                                }
                                // No thumbnail asset: plain labeled button
                                None => ui
                                    .add(egui::Button::new(&thumb.label).selected(is_active))
                                    .clicked(),
                            };
                            ui.label(&thumb.label);
                            if clicked {
                                selected = Some(idx);
                            }
                        });
                    }
                });
            });

        // Clamped by the area against its content width
        *scroll_offset = output.state.offset.x;

        if ui.button("\u{25B6}").clicked() {
            *scroll_offset += SCROLL_STEP;
        }
    });

    selected
}
