use std::time::Instant;

use election_core::{
    modal::{VoteAffordance, VOTE_CAST_MESSAGE},
    ElectionUi, RecordingTransport, RetainedSurface, RuntimeMode, Settings, UserAction,
};
use serde_json::json;
use shared::{domain::CandidateId, protocol::HostRequest};

#[test]
fn vote_flow_from_host_update_to_outbound_request() {
    let mut ui = ElectionUi::new(
        &Settings::default(),
        RuntimeMode::Hosted,
        RecordingTransport::new(),
    );
    let mut surface = RetainedSurface::new();
    let now = Instant::now();

    let update = json!({
        "type": "election:update",
        "phase": "Voting",
        "candidates": [
            { "id": 101, "name": "Sundance Kid", "region_alias": "new_hanover" },
            { "id": 102, "name": "Billy the Kid", "region_alias": "new_hanover" },
        ],
    });
    ui.handle_raw(&update.to_string(), now, &mut surface);

    ui.handle_action(UserAction::SlotButton(0), &mut surface);
    let modal = surface.modal.clone().expect("modal opened");
    assert_eq!(modal.candidate_id, CandidateId(101));
    assert_eq!(modal.name, "Sundance Kid");
    assert_eq!(
        modal.affordance,
        VoteAffordance::Shown {
            candidate_id: CandidateId(101),
            enabled: true
        }
    );

    ui.handle_action(UserAction::CastVote, &mut surface);
    assert_eq!(
        ui.transport().sent(),
        vec![HostRequest::vote(CandidateId(101))]
    );
    assert!(ui.view_model().has_voted());
    let modal = surface.modal.clone().expect("modal still open");
    assert!(!modal.affordance.is_shown());
    assert_eq!(modal.message.as_deref(), Some(VOTE_CAST_MESSAGE));

    let second = json!({
        "type": "election:update",
        "phase": "Voting",
        "candidates": [{ "id": 101, "name": "Sundance Kid" }],
    });
    ui.handle_raw(&second.to_string(), now, &mut surface);
    assert!(ui.view_model().has_voted());
    assert_eq!(ui.transport().sent().len(), 1);
}

#[test]
fn partial_updates_never_reset_other_fields() {
    let mut ui = ElectionUi::new(
        &Settings::default(),
        RuntimeMode::Hosted,
        RecordingTransport::new(),
    );
    let mut surface = RetainedSurface::new();
    let now = Instant::now();

    let messages = [
        json!({ "type": "election:update", "regionTitle": "Lemoyne" }),
        json!({ "type": "election:update", "phase": "Voting" }),
        json!({ "type": "election:update", "hasVoted": true }),
        json!({ "type": "election:update", "candidates": [{ "id": 1 }, { "id": 2 }] }),
        json!({ "type": "election:update", "phase": 3, "hasVoted": "no", "candidates": "none" }),
        json!({ "type": "election:update", "regionTitle": "New Austin" }),
    ];
    for message in &messages {
        ui.handle_value(message, now, &mut surface);
    }

    let vm = ui.view_model();
    assert_eq!(vm.region_title(), Some("New Austin"));
    assert_eq!(vm.phase().label(), "Voting");
    assert!(vm.has_voted());
    assert_eq!(
        vm.candidates().iter().map(|c| c.id).collect::<Vec<_>>(),
        vec![CandidateId(1), CandidateId(2)]
    );
}
