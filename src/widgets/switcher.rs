//! Channel switcher: radio group selecting the right-pane channel.

use eframe::egui::Ui;
use log::debug;

use crate::manifest::ChannelDecl;

/// Render the radio group. Exactly one option is active; selecting option
/// k sets `display_level` to k. Returns true when the selection changed.
pub fn channel_switcher(
    ui: &mut Ui,
    title: &str,
    channels: &[ChannelDecl],
    display_level: &mut usize,
) -> bool {
    let before = *display_level;

    ui.horizontal(|ui| {
        ui.label(format!("{}:", title));
        for (idx, channel) in channels.iter().enumerate() {
            ui.radio_value(display_level, idx, &channel.label);
        }
    });

    let changed = *display_level != before;
    if changed {
        debug!("Display level: {} -> {}", before, *display_level);
    }
    changed
}
