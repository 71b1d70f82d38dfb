//! Rendering-surface capability the engine writes to.

use std::collections::HashSet;

use tracing::trace;

use crate::{
    modal::{ModalView, VoteFeedback},
    slots::{SlotView, SLOT_COUNT},
    visibility::{RootEffect, Transition},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SurfaceTarget {
    Root,
    RegionTitle,
    PhaseLabel,
    Slot(usize),
    Modal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderInstruction {
    Root(RootEffect),
    RegionTitle(String),
    PhaseLabel(String),
    Slot(SlotView),
    ModalOpened(ModalView),
    ModalClosed,
    VoteFeedback(VoteFeedback),
}

impl RenderInstruction {
    pub fn target(&self) -> SurfaceTarget {
        match self {
            RenderInstruction::Root(_) => SurfaceTarget::Root,
            RenderInstruction::RegionTitle(_) => SurfaceTarget::RegionTitle,
            RenderInstruction::PhaseLabel(_) => SurfaceTarget::PhaseLabel,
            RenderInstruction::Slot(slot) => SurfaceTarget::Slot(slot.index),
            RenderInstruction::ModalOpened(_)
            | RenderInstruction::ModalClosed
            | RenderInstruction::VoteFeedback(_) => SurfaceTarget::Modal,
        }
    }
}

pub trait RenderSurface {
    fn has_target(&self, target: SurfaceTarget) -> bool;
    fn apply(&mut self, instruction: RenderInstruction);
}

/// Applies `instruction` if the surface has its target. Returns whether it was applied.
pub fn emit(surface: &mut dyn RenderSurface, instruction: RenderInstruction) -> bool {
    let target = instruction.target();
    if !surface.has_target(target) {
        trace!(?target, "render target missing; skipping instruction");
        return false;
    }
    surface.apply(instruction);
    true
}

/// In-memory surface that keeps the latest rendered state plus a history of every
/// instruction it accepted.
#[derive(Debug, Clone)]
pub struct RetainedSurface {
    missing: HashSet<SurfaceTarget>,
    history: Vec<RenderInstruction>,
    pub displayed: bool,
    pub transition: Option<Transition>,
    pub region_title: Option<String>,
    pub phase_label: Option<String>,
    pub slots: [Option<SlotView>; SLOT_COUNT],
    pub modal: Option<ModalView>,
}

impl Default for RetainedSurface {
    fn default() -> Self {
        Self {
            missing: HashSet::new(),
            history: Vec::new(),
            displayed: false,
            transition: None,
            region_title: None,
            phase_label: None,
            slots: std::array::from_fn(|_| None),
            modal: None,
        }
    }
}

impl RetainedSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn without_targets(targets: impl IntoIterator<Item = SurfaceTarget>) -> Self {
        Self {
            missing: targets.into_iter().collect(),
            ..Self::default()
        }
    }

    pub fn history(&self) -> &[RenderInstruction] {
        &self.history
    }

    pub fn drain_history(&mut self) -> Vec<RenderInstruction> {
        std::mem::take(&mut self.history)
    }
}

impl RenderSurface for RetainedSurface {
    fn has_target(&self, target: SurfaceTarget) -> bool {
        match target {
            SurfaceTarget::Slot(index) if index >= SLOT_COUNT => false,
            target => !self.missing.contains(&target),
        }
    }

    fn apply(&mut self, instruction: RenderInstruction) {
        match &instruction {
            RenderInstruction::Root(effect) => {
                match effect {
                    RootEffect::Show => self.displayed = true,
                    RootEffect::Remove => self.displayed = false,
                    RootEffect::FadeOut => {}
                }
                if let Some(transition) = effect.transition() {
                    self.transition = Some(transition);
                }
            }
            RenderInstruction::RegionTitle(title) => self.region_title = Some(title.clone()),
            RenderInstruction::PhaseLabel(label) => self.phase_label = Some(label.clone()),
            RenderInstruction::Slot(slot) => self.slots[slot.index] = Some(slot.clone()),
            RenderInstruction::ModalOpened(view) => self.modal = Some(view.clone()),
            RenderInstruction::ModalClosed => self.modal = None,
            RenderInstruction::VoteFeedback(feedback) => {
                if let Some(modal) = self.modal.as_mut() {
                    modal.affordance = feedback.affordance;
                    modal.message = Some(feedback.message.clone());
                }
            }
        }
        self.history.push(instruction);
    }
}
