//! Outbound user intents with optimistic local state.

use shared::{
    domain::CandidateId,
    protocol::{HostRequest, StateUpdate},
};
use tracing::{debug, info};

use crate::{
    modal::{ModalController, VoteFeedback},
    standalone::RuntimeMode,
    transport::HostTransport,
    view_model::ViewModel,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VoteOutcome {
    Cast {
        candidate_id: CandidateId,
        feedback: VoteFeedback,
    },
    AlreadyVoted,
    NothingBound,
}

pub struct IntentDispatcher<T> {
    transport: T,
    mode: RuntimeMode,
}

impl<T: HostTransport> IntentDispatcher<T> {
    pub fn new(transport: T, mode: RuntimeMode) -> Self {
        Self { transport, mode }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn mode(&self) -> RuntimeMode {
        self.mode
    }

    /// Sends the vote for the candidate bound to the live vote button, then marks the
    /// session as voted without waiting for the host.
    pub fn cast_vote(&self, view_model: &mut ViewModel, modal: &mut ModalController) -> VoteOutcome {
        let Some(candidate_id) = modal.affordance().bound_candidate() else {
            debug!("vote clicked with no candidate bound");
            return VoteOutcome::NothingBound;
        };
        if view_model.has_voted() {
            debug!(%candidate_id, "duplicate vote suppressed");
            return VoteOutcome::AlreadyVoted;
        }

        self.send(HostRequest::vote(candidate_id));
        view_model.apply_update(StateUpdate {
            has_voted: Some(true),
            ..StateUpdate::default()
        });
        let feedback = modal.record_vote_cast();
        info!(%candidate_id, "vote cast");

        VoteOutcome::Cast {
            candidate_id,
            feedback,
        }
    }

    pub fn close_ui(&self) {
        info!("requesting election ui close");
        self.send(HostRequest::close());
    }

    fn send(&self, request: HostRequest) {
        if self.mode == RuntimeMode::Standalone {
            debug!(
                endpoint = request.endpoint(),
                "standalone mode; request not sent"
            );
            return;
        }
        self.transport.send(request);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{assets::AssetResolver, transport::RecordingTransport};
    use shared::domain::Candidate;

    fn voting_model() -> ViewModel {
        let mut vm = ViewModel::new();
        vm.apply_update(StateUpdate {
            phase: Some("Voting".into()),
            candidates: Some(vec![Candidate::new(4, "Django")]),
            ..StateUpdate::default()
        });
        vm
    }

    #[test]
    fn cast_requires_a_bound_candidate() {
        let dispatcher = IntentDispatcher::new(RecordingTransport::new(), RuntimeMode::Hosted);
        let mut vm = voting_model();
        let mut modal = ModalController::new();

        assert_eq!(
            dispatcher.cast_vote(&mut vm, &mut modal),
            VoteOutcome::NothingBound
        );
        assert!(dispatcher.transport().sent().is_empty());
    }

    #[test]
    fn standalone_mode_marks_voted_without_sending() {
        let dispatcher =
            IntentDispatcher::new(RecordingTransport::new(), RuntimeMode::Standalone);
        let mut vm = voting_model();
        let mut modal = ModalController::new();
        modal.open(CandidateId(4), &vm, &AssetResolver::default());

        let outcome = dispatcher.cast_vote(&mut vm, &mut modal);
        assert!(matches!(
            outcome,
            VoteOutcome::Cast { candidate_id: CandidateId(4), .. }
        ));
        assert!(vm.has_voted());
        assert!(dispatcher.transport().sent().is_empty());

        dispatcher.close_ui();
        assert!(dispatcher.transport().sent().is_empty());
    }
}
