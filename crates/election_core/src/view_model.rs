//! Authoritative client-side election state.

use shared::{
    domain::{Candidate, CandidateId, Phase},
    protocol::StateUpdate,
};
use tracing::debug;

/// Which fields of a [`StateUpdate`] were merged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AppliedFields {
    pub region_title: bool,
    pub phase: bool,
    pub has_voted: bool,
    pub candidates: bool,
}

impl AppliedFields {
    pub fn any(&self) -> bool {
        self.region_title || self.phase || self.has_voted || self.candidates
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewModel {
    candidates: Vec<Candidate>,
    phase: Phase,
    has_voted: bool,
    region_title: Option<String>,
}

impl ViewModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merges the present fields of `update` and leaves every absent field untouched.
    ///
    /// This is the only mutation path; the optimistic "has voted" flip after a vote
    /// goes through here as well.
    pub fn apply_update(&mut self, update: StateUpdate) -> AppliedFields {
        let mut applied = AppliedFields::default();

        if let Some(region_title) = update.region_title {
            self.region_title = Some(region_title);
            applied.region_title = true;
        }
        if let Some(phase) = update.phase {
            self.phase = Phase::new(phase);
            applied.phase = true;
        }
        if let Some(has_voted) = update.has_voted {
            self.has_voted = has_voted;
            applied.has_voted = true;
        }
        if let Some(candidates) = update.candidates {
            self.candidates = candidates;
            applied.candidates = true;
        }

        debug!(
            region_title = applied.region_title,
            phase = applied.phase,
            has_voted = applied.has_voted,
            candidates = applied.candidates,
            "merged election state update"
        );
        applied
    }

    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn has_voted(&self) -> bool {
        self.has_voted
    }

    pub fn region_title(&self) -> Option<&str> {
        self.region_title.as_deref()
    }

    pub fn is_voting_active(&self) -> bool {
        self.phase.is_voting_active()
    }

    pub fn find_candidate(&self, id: CandidateId) -> Option<&Candidate> {
        self.candidates.iter().find(|candidate| candidate.id == id)
    }
}
