//! Fixed three-slot layout reconciliation.

use shared::domain::{Candidate, CandidateId, Phase};

use crate::assets::AssetResolver;

pub const SLOT_COUNT: usize = 3;

pub const VIEW_AND_VOTE_LABEL: &str = "View & Vote";
pub const VIEW_LABEL: &str = "View";
pub const AWAITING_APPROVAL_LABEL: &str = "Awaiting Approval";
pub const VACANT_SLOT_NAME: &str = "VACANT SLOT";
pub const CANDIDATE_NAME_FALLBACK: &str = "Candidate";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotButton {
    pub label: &'static str,
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotView {
    pub index: usize,
    /// `None` for a vacant slot.
    pub candidate_id: Option<CandidateId>,
    pub portrait: String,
    pub name: String,
    pub button: SlotButton,
}

impl SlotView {
    pub fn is_bound(&self) -> bool {
        self.candidate_id.is_some()
    }

    fn vacant(index: usize, assets: &AssetResolver) -> Self {
        Self {
            index,
            candidate_id: None,
            portrait: assets.default_portrait().to_string(),
            name: VACANT_SLOT_NAME.to_string(),
            button: SlotButton {
                label: AWAITING_APPROVAL_LABEL,
                enabled: false,
            },
        }
    }

    fn bound(index: usize, candidate: &Candidate, voting_active: bool, assets: &AssetResolver) -> Self {
        let label = if voting_active {
            VIEW_AND_VOTE_LABEL
        } else {
            VIEW_LABEL
        };
        Self {
            index,
            candidate_id: Some(candidate.id),
            portrait: assets.resolve(candidate.portrait.as_deref()),
            name: display_name(candidate).to_string(),
            // Details stay viewable in every phase.
            button: SlotButton {
                label,
                enabled: true,
            },
        }
    }
}

pub(crate) fn display_name(candidate: &Candidate) -> &str {
    candidate
        .name
        .as_deref()
        .filter(|name| !name.is_empty())
        .unwrap_or(CANDIDATE_NAME_FALLBACK)
}

/// Maps the first [`SLOT_COUNT`] candidates onto slots in list order.
pub fn reconcile_slots(
    candidates: &[Candidate],
    phase: &Phase,
    assets: &AssetResolver,
) -> [SlotView; SLOT_COUNT] {
    let voting_active = phase.is_voting_active();
    std::array::from_fn(|index| match candidates.get(index) {
        Some(candidate) => SlotView::bound(index, candidate, voting_active, assets),
        None => SlotView::vacant(index, assets),
    })
}

#[cfg(test)]
#[path = "tests/slots_tests.rs"]
mod tests;
