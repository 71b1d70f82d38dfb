use super::*;
use serde_json::json;

#[test]
fn decodes_toggle_display_flag() {
    let decoded = InboundMessage::decode(&json!({ "type": "election:toggle", "display": true }))
        .expect("decode");
    assert_eq!(decoded.message, InboundMessage::Toggle { display: true });
    assert!(decoded.rejected_fields.is_empty());
}

#[test]
fn toggle_without_boolean_display_hides() {
    let decoded = InboundMessage::decode(&json!({ "type": "election:toggle", "display": "yes" }))
        .expect("decode");
    assert_eq!(decoded.message, InboundMessage::Toggle { display: false });
    assert_eq!(decoded.rejected_fields, vec!["display"]);

    let decoded =
        InboundMessage::decode(&json!({ "type": "election:toggle" })).expect("decode missing");
    assert_eq!(decoded.message, InboundMessage::Toggle { display: false });
}

#[test]
fn update_drops_only_malformed_fields() {
    let decoded = InboundMessage::decode(&json!({
        "type": "election:update",
        "regionTitle": "New Hanover",
        "phase": 7,
        "hasVoted": "true",
        "candidates": [{ "id": 4, "name": "Django" }],
    }))
    .expect("decode");

    let InboundMessage::Update(update) = decoded.message else {
        panic!("expected update");
    };
    assert_eq!(update.region_title.as_deref(), Some("New Hanover"));
    assert_eq!(update.phase, None);
    assert_eq!(update.has_voted, None);
    let candidates = update.candidates.expect("candidates kept");
    assert_eq!(candidates[0].id, CandidateId(4));
    assert_eq!(candidates[0].name.as_deref(), Some("Django"));
    assert_eq!(decoded.rejected_fields, vec!["phase", "hasVoted"]);
}

#[test]
fn non_array_candidates_are_rejected() {
    let decoded = InboundMessage::decode(&json!({
        "type": "election:update",
        "candidates": { "id": 1 },
        "hasVoted": true,
    }))
    .expect("decode");

    let InboundMessage::Update(update) = decoded.message else {
        panic!("expected update");
    };
    assert_eq!(update.candidates, None);
    assert_eq!(update.has_voted, Some(true));
    assert_eq!(decoded.rejected_fields, vec!["candidates"]);
}

#[test]
fn candidate_without_integral_id_is_skipped_alone() {
    let decoded = InboundMessage::decode(&json!({
        "type": "election:update",
        "candidates": [{ "id": 1 }, { "id": "two" }, { "id": 2.5 }, "Django", { "id": 3 }],
    }))
    .expect("decode");

    let InboundMessage::Update(update) = decoded.message else {
        panic!("expected update");
    };
    let ids: Vec<_> = update
        .candidates
        .expect("candidates kept")
        .iter()
        .map(|c| c.id)
        .collect();
    assert_eq!(ids, vec![CandidateId(1), CandidateId(3)]);
    assert_eq!(decoded.dropped_candidates, 3);
    assert!(decoded.rejected_fields.is_empty());
}

#[test]
fn candidate_entries_decode_leniently() {
    let decoded = InboundMessage::decode(&json!({
        "type": "election:update",
        "candidates": [
            { "id": 1, "name": "Django" },
            { "id": 2.0, "name": "Billy the Kid", "status": 5, "portrait": false, "bio": null },
        ],
    }))
    .expect("decode");

    let InboundMessage::Update(update) = decoded.message else {
        panic!("expected update");
    };
    let candidates = update.candidates.expect("candidates kept");
    assert_eq!(candidates.len(), 2);
    assert_eq!(candidates[1].id, CandidateId(2));
    assert_eq!(candidates[1].name.as_deref(), Some("Billy the Kid"));
    assert_eq!(candidates[1].status, None);
    assert_eq!(candidates[1].portrait, None);
    assert_eq!(candidates[1].bio, None);
    assert_eq!(decoded.dropped_candidates, 0);
}

#[test]
fn unknown_kind_is_unrecognized_not_an_error() {
    let decoded = InboundMessage::decode(&json!({ "type": "election:results", "display": true }))
        .expect("decode");
    assert_eq!(
        decoded.message,
        InboundMessage::Unrecognized {
            kind: "election:results".to_string()
        }
    );
}

#[test]
fn payload_without_type_or_object_shape_fails() {
    assert!(matches!(
        InboundMessage::decode(&json!({ "display": true })),
        Err(ProtocolError::MissingType)
    ));
    assert!(matches!(
        InboundMessage::decode(&json!([1, 2, 3])),
        Err(ProtocolError::NotAnObject)
    ));
    assert!(matches!(
        InboundMessage::parse("{not json"),
        Err(ProtocolError::InvalidJson(_))
    ));
}

#[test]
fn outbound_bodies_match_host_contract() {
    let vote = HostRequest::vote(CandidateId(2));
    assert_eq!(vote.endpoint(), "electionVote");
    let body: serde_json::Value = serde_json::from_slice(&vote.body().expect("vote body"))
        .expect("vote json");
    assert_eq!(body, json!({ "candidateId": 2 }));

    let close = HostRequest::close();
    assert_eq!(close.endpoint(), "electionClose");
    assert_eq!(close.body().expect("close body"), b"{}".to_vec());
}

#[test]
fn serialized_update_message_carries_type_tag() {
    let message = InboundMessage::Update(StateUpdate {
        phase: Some("Voting".to_string()),
        ..StateUpdate::default()
    });
    let value = serde_json::to_value(&message).expect("serialize");
    assert_eq!(value, json!({ "type": "election:update", "phase": "Voting" }));

    let decoded = InboundMessage::decode(&value).expect("decode");
    assert_eq!(decoded.message, message);
}
