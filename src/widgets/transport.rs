//! Transport controls: play/pause and fullscreen.

use eframe::egui::Ui;

use crate::player::Player;

/// Action requested by the transport row
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TransportAction {
    TogglePlay,
    ToggleFullscreen,
}

/// Render the transport row. Returns a requested action; the caller applies
/// it (and turns it into a no-op when there is no active scene).
pub fn transport_controls(ui: &mut Ui, player: &Player) -> Option<TransportAction> {
    let mut action = None;

    ui.horizontal(|ui| {
        if ui.button(player.icon_text()).clicked() {
            action = Some(TransportAction::TogglePlay);
        }
        if ui.button("\u{26F6} Fullscreen").clicked() {
            action = Some(TransportAction::ToggleFullscreen);
        }
    });

    action
}
