//! Compare canvas: draws the RGB segment left of the divider and the
//! selected channel segment right of it, from one uploaded frame texture.
//!
//! Both panes sample the same intra-segment offset, so the split reads as a
//! single continuous image with a wipe between channels. Divider input and
//! smoothing live here; the spring itself is in `crate::spring`.

use eframe::egui::{self, Align2, Color32, FontId, Pos2, Rect, Sense, Ui};
use log::debug;

use crate::split::SplitGeometry;
use crate::state::ViewerState;

// Handle styling
const HANDLE_WIDTH: f32 = 3.0;
const HANDLE_GRIP_RADIUS: f32 = 14.0;
const HANDLE_COLOR: Color32 = Color32::from_rgba_premultiplied(240, 240, 240, 220);

/// Result of rendering the compare canvas
pub struct CompareResponse {
    pub hovered: bool,
    pub double_clicked: bool,
}

/// Render the compare canvas.
///
/// `texture` is the current concatenated frame (may lag the playhead while
/// loaders catch up - the last good frame keeps showing, no black flash).
/// Skips silently when there is nothing to draw.
pub fn compare_view(
    ui: &mut Ui,
    texture: Option<&egui::TextureHandle>,
    state: &mut ViewerState,
    before_label: &str,
    after_label: &str,
) -> CompareResponse {
    let mut hovered = false;
    let mut double_clicked = false;

    let Some(texture) = texture else {
        ui.centered_and_justified(|ui| {
            ui.label("No frames decoded yet.");
        });
        return CompareResponse {
            hovered,
            double_clicked,
        };
    };

    let tex_size = texture.size_vec2();
    let width = ui.available_width();
    if width < 1.0 || tex_size.x < 1.0 || tex_size.y < 1.0 {
        // Zero-sized canvas: skip the tick entirely
        return CompareResponse {
            hovered,
            double_clicked,
        };
    }

    let geo = SplitGeometry::new(tex_size.x, tex_size.y, width);
    let height = width / geo.pane_aspect();
    let (rect, response) =
        ui.allocate_exact_size(egui::vec2(width, height), Sense::click_and_drag());
    hovered = response.hovered();
    double_clicked = response.double_clicked();

    sync_divider_to_width(state, width);
    handle_drag(ui, &response, rect, state);

    // Fixed-timestep smoothing, independent of drag state
    let dt = ui.input(|i| i.stable_dt).min(0.25);
    state.divider.advance(dt, width);
    let divider = state.divider.current.clamp(0.0, width);

    if ui.is_rect_visible(rect) {
        let painter = ui.painter();

        // Left pane: RGB segment up to the divider
        let (u0, u1) = geo.to_uv(geo.left_span(divider));
        if divider >= 1.0 {
            let dest = Rect::from_min_max(rect.min, Pos2::new(rect.min.x + divider, rect.max.y));
            let uv = Rect::from_min_max(Pos2::new(u0, 0.0), Pos2::new(u1, 1.0));
            painter.image(texture.id(), dest, uv, Color32::WHITE);
        }

        // Right pane: selected channel segment from the divider on
        let (u0, u1) = geo.to_uv(geo.right_span(divider, state.display_level));
        if width - divider >= 1.0 {
            let dest = Rect::from_min_max(Pos2::new(rect.min.x + divider, rect.min.y), rect.max);
            let uv = Rect::from_min_max(Pos2::new(u0, 0.0), Pos2::new(u1, 1.0));
            painter.image(texture.id(), dest, uv, Color32::WHITE);
        }

        draw_handle(painter, rect, divider);
        draw_pane_label(painter, rect, before_label, true);
        draw_pane_label(painter, rect, after_label, false);
    }

    if state.divider.is_animating() || state.divider.dragging() {
        ui.ctx().request_repaint();
    }

    CompareResponse {
        hovered,
        double_clicked,
    }
}

/// First layout pins the divider to the middle; later resizes keep its
/// relative position so the wipe does not jump.
fn sync_divider_to_width(state: &mut ViewerState, width: f32) {
    let last = state.last_canvas_width;
    if last <= 0.0 {
        state.divider.reset_to(width * 0.5);
        debug!("Compare canvas sized: {}px, divider centered", width);
    } else if (last - width).abs() > 0.5 {
        let scale = width / last;
        state.divider.reset_to(state.divider.current * scale);
    }
    state.last_canvas_width = width;
}

/// Divider drag input. The press itself sets the first target (a hold
/// without movement already eases the divider toward the press point); the
/// moving pointer then feeds the target of every dragging divider, and a
/// release anywhere ends every drag at once (the original page wired
/// move/up listeners at the document level; behavior preserved).
fn handle_drag(ui: &Ui, response: &egui::Response, rect: Rect, state: &mut ViewerState) {
    if !state.divider.dragging() && response.is_pointer_button_down_on() {
        if let Some(pos) = response.interact_pointer_pos() {
            state.divider.begin_drag(pos.x - rect.min.x);
        }
    }

    if state.divider.dragging() {
        if let Some(pos) = ui.input(|i| i.pointer.latest_pos()) {
            state.divider.drag_to(pos.x - rect.min.x);
        }
    }

    if ui.input(|i| i.pointer.any_released()) {
        state.divider.end_drag();
    }
}

fn draw_handle(painter: &egui::Painter, rect: Rect, divider: f32) {
    let x = rect.min.x + divider;
    painter.line_segment(
        [Pos2::new(x, rect.min.y), Pos2::new(x, rect.max.y)],
        (HANDLE_WIDTH, HANDLE_COLOR),
    );

    let center = Pos2::new(x, rect.center().y);
    painter.circle_filled(center, HANDLE_GRIP_RADIUS, Color32::from_black_alpha(140));
    painter.circle_stroke(center, HANDLE_GRIP_RADIUS, (1.5, HANDLE_COLOR));
    painter.text(
        center,
        Align2::CENTER_CENTER,
        "\u{2194}",
        FontId::proportional(14.0),
        Color32::WHITE,
    );
}

/// Pane label with a readability background (left = before, right = after)
fn draw_pane_label(painter: &egui::Painter, rect: Rect, label: &str, left: bool) {
    if label.is_empty() {
        return;
    }
    let (pos, align) = if left {
        (rect.min + egui::vec2(8.0, 8.0), Align2::LEFT_TOP)
    } else {
        (Pos2::new(rect.max.x - 8.0, rect.min.y + 8.0), Align2::RIGHT_TOP)
    };

    let galley = painter.layout_no_wrap(
        label.to_string(),
        FontId::proportional(13.0),
        Color32::WHITE,
    );
    let text_rect = align.anchor_size(pos, galley.size());
    painter.rect_filled(text_rect.expand(4.0), 3.0, Color32::from_black_alpha(150));
    painter.galley(text_rect.min, galley, Color32::WHITE);
}
