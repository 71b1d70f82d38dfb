//! The election UI session: owns the view model and routes user actions.

use std::time::{Duration, Instant};

use shared::domain::CandidateId;
use tracing::debug;

use crate::{
    assets::AssetResolver,
    config::Settings,
    dispatcher::{IntentDispatcher, VoteOutcome},
    modal::ModalController,
    slots::{reconcile_slots, SLOT_COUNT},
    standalone::RuntimeMode,
    surface::{emit, RenderInstruction, RenderSurface, SurfaceTarget},
    transport::HostTransport,
    view_model::ViewModel,
    visibility::VisibilityController,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserAction {
    /// The "View"/"View & Vote" button of a slot.
    SlotButton(usize),
    SlotPortrait(usize),
    CastVote,
    CloseModal,
    /// The whole-UI close control.
    CloseUi,
    /// Closes the modal when open, otherwise the whole UI.
    Escape,
}

pub struct ElectionUi<T> {
    view_model: ViewModel,
    modal: ModalController,
    visibility: VisibilityController,
    dispatcher: IntentDispatcher<T>,
    assets: AssetResolver,
    standalone_show_delay: Duration,
    slot_bindings: [Option<CandidateId>; SLOT_COUNT],
}

impl<T: HostTransport> ElectionUi<T> {
    pub fn new(settings: &Settings, mode: RuntimeMode, transport: T) -> Self {
        Self {
            view_model: ViewModel::new(),
            modal: ModalController::new(),
            visibility: VisibilityController::new(
                settings.hide_delay(),
                settings.cancel_hide_on_show,
            ),
            dispatcher: IntentDispatcher::new(transport, mode),
            assets: settings.assets(),
            standalone_show_delay: settings.standalone_show_delay(),
            slot_bindings: [None; SLOT_COUNT],
        }
    }

    pub fn view_model(&self) -> &ViewModel {
        &self.view_model
    }

    pub fn modal(&self) -> &ModalController {
        &self.modal
    }

    pub fn visibility(&self) -> &VisibilityController {
        &self.visibility
    }

    pub fn transport(&self) -> &T {
        self.dispatcher.transport()
    }

    pub fn mode(&self) -> RuntimeMode {
        self.dispatcher.mode()
    }

    pub fn slot_binding(&self, index: usize) -> Option<CandidateId> {
        self.slot_bindings.get(index).copied().flatten()
    }

    pub fn handle_action(&mut self, action: UserAction, surface: &mut dyn RenderSurface) {
        debug!(?action, "user action");
        match action {
            UserAction::SlotButton(index) | UserAction::SlotPortrait(index) => {
                self.open_slot(index, surface);
            }
            UserAction::CastVote => self.cast_vote(surface),
            UserAction::CloseModal => self.close_modal(surface),
            UserAction::CloseUi => self.dispatcher.close_ui(),
            UserAction::Escape => {
                if self.modal.is_open() {
                    self.close_modal(surface);
                } else {
                    self.dispatcher.close_ui();
                }
            }
        }
    }

    /// Opens the detail modal for `candidate_id`. Returns whether it opened.
    pub fn open_candidate(
        &mut self,
        candidate_id: CandidateId,
        surface: &mut dyn RenderSurface,
    ) -> bool {
        if !surface.has_target(SurfaceTarget::Modal) {
            debug!("modal target missing; not opening");
            return false;
        }
        match self.modal.open(candidate_id, &self.view_model, &self.assets) {
            Some(view) => emit(surface, RenderInstruction::ModalOpened(view)),
            None => {
                debug!(%candidate_id, "unknown candidate id; modal stays closed");
                false
            }
        }
    }

    /// Fires due visibility transitions. Without a root target nothing fires and
    /// the visibility state is left as is.
    pub fn tick(&mut self, now: Instant, surface: &mut dyn RenderSurface) {
        if !surface.has_target(SurfaceTarget::Root) {
            return;
        }
        for effect in self.visibility.tick(now) {
            emit(surface, RenderInstruction::Root(effect));
        }
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.visibility.next_deadline()
    }

    pub(crate) fn show_root(&mut self, surface: &mut dyn RenderSurface) {
        if !surface.has_target(SurfaceTarget::Root) {
            return;
        }
        let effect = self.visibility.show();
        emit(surface, RenderInstruction::Root(effect));
    }

    pub(crate) fn hide_root(&mut self, now: Instant, surface: &mut dyn RenderSurface) {
        if !surface.has_target(SurfaceTarget::Root) {
            return;
        }
        let effect = self.visibility.hide(now);
        emit(surface, RenderInstruction::Root(effect));
    }

    pub(crate) fn schedule_show(&mut self, at: Instant) {
        self.visibility.schedule_show(at);
    }

    pub(crate) fn standalone_show_delay(&self) -> Duration {
        self.standalone_show_delay
    }

    pub(crate) fn view_model_mut(&mut self) -> &mut ViewModel {
        &mut self.view_model
    }

    pub(crate) fn render_slots(&mut self, surface: &mut dyn RenderSurface) {
        let slots = reconcile_slots(
            self.view_model.candidates(),
            self.view_model.phase(),
            &self.assets,
        );
        for slot in slots {
            let index = slot.index;
            let candidate_id = slot.candidate_id;
            let rendered = emit(surface, RenderInstruction::Slot(slot));
            self.slot_bindings[index] = if rendered { candidate_id } else { None };
        }
    }

    fn open_slot(&mut self, index: usize, surface: &mut dyn RenderSurface) {
        let Some(candidate_id) = self.slot_binding(index) else {
            debug!(slot = index, "vacant slot clicked");
            return;
        };
        self.open_candidate(candidate_id, surface);
    }

    fn close_modal(&mut self, surface: &mut dyn RenderSurface) {
        if !surface.has_target(SurfaceTarget::Modal) {
            return;
        }
        self.modal.close();
        emit(surface, RenderInstruction::ModalClosed);
    }

    fn cast_vote(&mut self, surface: &mut dyn RenderSurface) {
        let outcome = self
            .dispatcher
            .cast_vote(&mut self.view_model, &mut self.modal);
        if let VoteOutcome::Cast { feedback, .. } = outcome {
            emit(surface, RenderInstruction::VoteFeedback(feedback));
        }
    }
}

#[cfg(test)]
#[path = "tests/engine_tests.rs"]
mod tests;
