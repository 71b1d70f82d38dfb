//! Candidate detail modal and its vote affordance.

use shared::domain::{Candidate, CandidateId};

use crate::{assets::AssetResolver, slots::display_name, view_model::ViewModel};

pub const BIO_FALLBACK: &str = "—";
pub const REGION_FALLBACK: &str = "unknown";
pub const STATUS_FALLBACK: &str = "approved";

pub const VOTING_INACTIVE_MESSAGE: &str =
    "Voting is not active. You can only view candidate details.";
pub const ALREADY_VOTED_MESSAGE: &str = "You have already voted in this election.";
pub const VOTE_CAST_MESSAGE: &str = "Your vote has been cast.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalState {
    Closed,
    Open(CandidateId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteAffordance {
    Hidden,
    Shown {
        candidate_id: CandidateId,
        enabled: bool,
    },
}

impl VoteAffordance {
    pub fn is_shown(&self) -> bool {
        matches!(self, VoteAffordance::Shown { .. })
    }

    /// Candidate a click on the vote button would vote for, if the button is live.
    pub fn bound_candidate(&self) -> Option<CandidateId> {
        match self {
            VoteAffordance::Shown {
                candidate_id,
                enabled: true,
            } => Some(*candidate_id),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalView {
    pub candidate_id: CandidateId,
    pub portrait: String,
    pub name: String,
    pub bio: String,
    pub region: String,
    pub status: String,
    pub affordance: VoteAffordance,
    /// `None` clears the message line.
    pub message: Option<String>,
}

/// Vote-button state and message shown after a vote is cast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoteFeedback {
    pub affordance: VoteAffordance,
    pub message: String,
}

pub fn vote_gate(view_model: &ViewModel, candidate_id: CandidateId) -> (VoteAffordance, Option<String>) {
    if !view_model.is_voting_active() {
        (
            VoteAffordance::Hidden,
            Some(VOTING_INACTIVE_MESSAGE.to_string()),
        )
    } else if view_model.has_voted() {
        (VoteAffordance::Hidden, Some(ALREADY_VOTED_MESSAGE.to_string()))
    } else {
        (
            VoteAffordance::Shown {
                candidate_id,
                enabled: true,
            },
            None,
        )
    }
}

#[derive(Debug)]
pub struct ModalController {
    state: ModalState,
    affordance: VoteAffordance,
}

impl Default for ModalController {
    fn default() -> Self {
        Self {
            state: ModalState::Closed,
            affordance: VoteAffordance::Hidden,
        }
    }
}

impl ModalController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ModalState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, ModalState::Open(_))
    }

    pub fn affordance(&self) -> VoteAffordance {
        self.affordance
    }

    /// Opens the modal for `candidate_id`. Unknown ids leave the modal untouched.
    pub fn open(
        &mut self,
        candidate_id: CandidateId,
        view_model: &ViewModel,
        assets: &AssetResolver,
    ) -> Option<ModalView> {
        let candidate = view_model.find_candidate(candidate_id)?;
        let (affordance, message) = vote_gate(view_model, candidate.id);

        self.state = ModalState::Open(candidate.id);
        self.affordance = affordance;
        Some(modal_view(candidate, affordance, message, assets))
    }

    /// Returns whether the modal was open.
    pub fn close(&mut self) -> bool {
        let was_open = self.is_open();
        self.state = ModalState::Closed;
        self.affordance = VoteAffordance::Hidden;
        was_open
    }

    pub(crate) fn record_vote_cast(&mut self) -> VoteFeedback {
        self.affordance = VoteAffordance::Hidden;
        VoteFeedback {
            affordance: self.affordance,
            message: VOTE_CAST_MESSAGE.to_string(),
        }
    }
}

fn modal_view(
    candidate: &Candidate,
    affordance: VoteAffordance,
    message: Option<String>,
    assets: &AssetResolver,
) -> ModalView {
    ModalView {
        candidate_id: candidate.id,
        portrait: assets.resolve(candidate.portrait.as_deref()),
        name: display_name(candidate).to_string(),
        bio: non_empty_or(candidate.bio.as_deref(), BIO_FALLBACK),
        region: non_empty_or(candidate.region_alias.as_deref(), REGION_FALLBACK),
        status: non_empty_or(candidate.status.as_deref(), STATUS_FALLBACK),
        affordance,
        message,
    }
}

fn non_empty_or(value: Option<&str>, fallback: &str) -> String {
    value
        .filter(|value| !value.is_empty())
        .unwrap_or(fallback)
        .to_string()
}

#[cfg(test)]
#[path = "tests/modal_tests.rs"]
mod tests;
