use std::time::Duration;

use serde_json::json;
use viewtrack_canonical::{DealerId, OfferId, PublicationId, StoreId, Tokenizer};
use viewtrack_core::{verify_view_token, Event, VerificationVerdict};

fn tokenizer() -> Tokenizer {
    Tokenizer::new("myhash").unwrap()
}

#[test]
fn freshly_built_events_verify() {
    let t = tokenizer();
    let events = [
        Event::paged_publication_opened(&PublicationId::new("pub1"), None, &t),
        Event::paged_publication_page_opened(&PublicationId::new("pub1"), 42, None, &t),
        Event::offer_opened(&OfferId::new("offer_123"), None, &t),
        Event::searched("øl og æg", Some("DA"), None, &t),
        Event::potential_local_business_visit(
            &StoreId::new("e3dclwL"),
            &DealerId::new("d7fazg"),
            5,
            10,
            Some(Duration::from_secs(60)),
            None,
            &t,
        ),
    ];
    for event in &events {
        assert_eq!(verify_view_token(event, &t), VerificationVerdict::Ok);
    }
}

#[test]
fn untokenized_types_pass() {
    let t = tokenizer();
    for event in [
        Event::dummy(None),
        Event::client_session_opened(None),
        Event::offer_opened_after_search(&OfferId::new("abc"), "q", None, None),
    ] {
        let verdict = verify_view_token(&event, &t);
        assert_eq!(verdict, VerificationVerdict::NotTokenized);
        assert!(verdict.is_ok());
    }
}

#[test]
fn other_salt_yields_mismatch() {
    let event = Event::offer_opened(&OfferId::new("offer_123"), None, &Tokenizer::new("salty").unwrap());
    assert_eq!(
        verify_view_token(&event, &tokenizer()),
        VerificationVerdict::Mismatch {
            expected: "sqZM+5O0Vg4=".into(),
            actual: "YNcV9px8d8U=".into(),
        }
    );
}

#[test]
fn detects_missing_unexpected_and_invalid_tokens() {
    let t = tokenizer();
    let missing = Event::from_json(&json!({
        "id": "a", "type": 3, "timestamp": 1, "version": 2,
        "payload": {"of.id": "offer_123"}
    }))
    .unwrap();
    assert_eq!(verify_view_token(&missing, &t), VerificationVerdict::Missing);

    let unexpected = Event::from_json(&json!({
        "id": "b", "type": 7, "timestamp": 1, "version": 2,
        "payload": {"of.id": "offer_123", "sea.q": "", "vt": "YNcV9px8d8U="}
    }))
    .unwrap();
    assert_eq!(verify_view_token(&unexpected, &t), VerificationVerdict::Unexpected);

    let invalid = Event::from_json(&json!({
        "id": "c", "type": 2, "timestamp": 1, "version": 2,
        "payload": {"pp.id": "pub1", "ppp.n": "one", "vt": "GKtJxfAxRZI="}
    }))
    .unwrap();
    assert!(matches!(
        verify_view_token(&invalid, &t),
        VerificationVerdict::Invalid(_)
    ));
}
