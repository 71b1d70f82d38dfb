//! Keyboard mapping onto engine actions.

use eframe::egui;
use election_core::UserAction;

pub fn keyboard_actions(ctx: &egui::Context) -> Vec<UserAction> {
    let mut actions = Vec::new();
    if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        actions.push(UserAction::Escape);
    }
    actions
}
