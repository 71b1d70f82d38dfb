use std::time::{Duration, Instant};

use crossbeam_channel::Receiver;
use eframe::egui;
use election_core::{
    modal::{ModalView, VoteAffordance},
    slots::SlotView,
    visibility::{Transition, HIDE_TRANSITION_DELAY},
    ElectionUi, HostTransport, RenderInstruction, RetainedSurface, UserAction,
};

use crate::controller::{events::HostEvent, input::keyboard_actions};
use crate::ui::{portraits::PortraitCache, theme};

const SLOT_PORTRAIT_SIZE: egui::Vec2 = egui::vec2(150.0, 190.0);
const MODAL_PORTRAIT_SIZE: egui::Vec2 = egui::vec2(120.0, 152.0);
const FADE_DURATION: Duration = HIDE_TRANSITION_DELAY;

pub struct ElectionGuiApp {
    engine: ElectionUi<Box<dyn HostTransport>>,
    surface: RetainedSurface,
    host_rx: Receiver<HostEvent>,
    portraits: PortraitCache,
    fade: Option<(Transition, Instant)>,
    host_connected: bool,
}

impl ElectionGuiApp {
    pub fn new(
        engine: ElectionUi<Box<dyn HostTransport>>,
        surface: RetainedSurface,
        host_rx: Receiver<HostEvent>,
        portraits: PortraitCache,
    ) -> Self {
        Self {
            engine,
            surface,
            host_rx,
            portraits,
            fade: None,
            host_connected: true,
        }
    }

    fn process_host_events(&mut self) {
        let now = Instant::now();
        while let Ok(event) = self.host_rx.try_recv() {
            match event {
                HostEvent::Message(raw) => self.engine.handle_raw(&raw, now, &mut self.surface),
                HostEvent::Disconnected => {
                    if self.host_connected {
                        tracing::info!("host message stream closed");
                    }
                    self.host_connected = false;
                }
            }
        }
        self.engine.tick(now, &mut self.surface);
    }

    fn track_transitions(&mut self) {
        for instruction in self.surface.drain_history() {
            if let RenderInstruction::Root(effect) = instruction {
                if let Some(transition) = effect.transition() {
                    self.fade = Some((transition, Instant::now()));
                }
            }
        }
    }

    fn opacity(&self) -> f32 {
        let Some((transition, started)) = self.fade else {
            return 1.0;
        };
        let progress =
            (started.elapsed().as_secs_f32() / FADE_DURATION.as_secs_f32()).clamp(0.0, 1.0);
        match transition {
            Transition::FadeIn => progress,
            Transition::FadeOut => 1.0 - progress,
        }
    }

    fn is_animating(&self) -> bool {
        self.fade
            .is_some_and(|(_, started)| started.elapsed() < FADE_DURATION)
    }

    fn show_election(&mut self, ctx: &egui::Context) -> Vec<UserAction> {
        let mut actions = Vec::new();
        let opacity = self.opacity();
        let Self {
            surface, portraits, ..
        } = self;

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE.fill(theme::BACKDROP))
            .show(ctx, |ui| {
                if !surface.displayed {
                    return;
                }
                ui.set_opacity(opacity);
                ui.add_space(16.0);
                show_header(ui, surface, &mut actions);
                ui.add_space(20.0);
                ui.columns(surface.slots.len(), |columns| {
                    for (column, slot) in columns.iter_mut().zip(surface.slots.iter()) {
                        if let Some(slot) = slot {
                            show_slot(column, slot, portraits, &mut actions);
                        }
                    }
                });
            });

        if surface.displayed {
            if let Some(modal) = &surface.modal {
                show_modal(ctx, modal, portraits, &mut actions);
            }
        }
        actions
    }
}

fn show_header(ui: &mut egui::Ui, surface: &RetainedSurface, actions: &mut Vec<UserAction>) {
    ui.horizontal(|ui| {
        ui.vertical(|ui| {
            let title = surface.region_title.as_deref().unwrap_or("Election");
            ui.label(
                egui::RichText::new(title)
                    .heading()
                    .strong()
                    .color(theme::TITLE),
            );
            if let Some(phase) = &surface.phase_label {
                ui.label(egui::RichText::new(format!("Phase: {phase}")).color(theme::MUTED));
            }
        });
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Min), |ui| {
            if ui.button("✕").on_hover_text("Close").clicked() {
                actions.push(UserAction::CloseUi);
            }
        });
    });
}

fn show_slot(
    ui: &mut egui::Ui,
    slot: &SlotView,
    portraits: &mut PortraitCache,
    actions: &mut Vec<UserAction>,
) {
    egui::Frame::new()
        .fill(theme::PANEL)
        .stroke(egui::Stroke::new(1.0, theme::PANEL_STROKE))
        .corner_radius(egui::CornerRadius::same(6))
        .inner_margin(egui::Margin::symmetric(10, 12))
        .show(ui, |ui| {
            ui.vertical_centered(|ui| {
                let portrait = show_portrait(ui, portraits, &slot.portrait, SLOT_PORTRAIT_SIZE);
                if portrait.clicked() {
                    actions.push(UserAction::SlotPortrait(slot.index));
                }

                let name_color = if slot.is_bound() {
                    theme::TITLE
                } else {
                    theme::MUTED
                };
                ui.label(egui::RichText::new(&slot.name).strong().color(name_color));
                ui.add_space(6.0);

                let button = egui::Button::new(slot.button.label);
                if ui.add_enabled(slot.button.enabled, button).clicked() {
                    actions.push(UserAction::SlotButton(slot.index));
                }
            });
        });
}

fn show_modal(
    ctx: &egui::Context,
    modal: &ModalView,
    portraits: &mut PortraitCache,
    actions: &mut Vec<UserAction>,
) {
    let frame = egui::Frame::new()
        .fill(theme::PANEL)
        .stroke(egui::Stroke::new(1.0, theme::PANEL_STROKE))
        .corner_radius(egui::CornerRadius::same(8))
        .inner_margin(egui::Margin::symmetric(16, 14));

    egui::Window::new("candidate_modal")
        .title_bar(false)
        .frame(frame)
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
        .show(ctx, |ui| {
            ui.set_max_width(420.0);
            ui.horizontal(|ui| {
                ui.label(
                    egui::RichText::new(&modal.name)
                        .heading()
                        .color(theme::TITLE),
                );
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Min), |ui| {
                    if ui.small_button("✕").clicked() {
                        actions.push(UserAction::CloseModal);
                    }
                });
            });
            ui.separator();

            ui.horizontal(|ui| {
                show_portrait(ui, portraits, &modal.portrait, MODAL_PORTRAIT_SIZE);
                ui.vertical(|ui| {
                    ui.label(egui::RichText::new(format!("Region: {}", modal.region)).color(theme::MUTED));
                    ui.label(egui::RichText::new(format!("Status: {}", modal.status)).color(theme::MUTED));
                    ui.add_space(6.0);
                    ui.label(&modal.bio);
                });
            });
            ui.add_space(10.0);

            if let VoteAffordance::Shown { enabled, .. } = modal.affordance {
                if ui.add_enabled(enabled, egui::Button::new("Vote")).clicked() {
                    actions.push(UserAction::CastVote);
                }
            }
            if let Some(message) = &modal.message {
                ui.label(egui::RichText::new(message).color(theme::NOTICE));
            }
        });
}

fn show_portrait(
    ui: &mut egui::Ui,
    portraits: &mut PortraitCache,
    portrait: &str,
    size: egui::Vec2,
) -> egui::Response {
    let ctx = ui.ctx().clone();
    match portraits.texture(&ctx, portrait) {
        Some(texture) => ui.add(
            egui::Image::new(texture)
                .fit_to_exact_size(size)
                .sense(egui::Sense::click()),
        ),
        None => {
            let (rect, response) = ui.allocate_exact_size(size, egui::Sense::click());
            ui.painter()
                .rect_filled(rect, egui::CornerRadius::same(4), theme::VACANT);
            response
        }
    }
}

impl eframe::App for ElectionGuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_host_events();

        let mut actions = keyboard_actions(ctx);
        actions.extend(self.show_election(ctx));
        for action in actions {
            self.engine.handle_action(action, &mut self.surface);
        }
        self.track_transitions();

        if self.is_animating() || self.engine.next_deadline().is_some() {
            ctx.request_repaint_after(Duration::from_millis(16));
        } else {
            ctx.request_repaint_after(Duration::from_millis(100));
        }
    }
}
