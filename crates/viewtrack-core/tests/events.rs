use std::time::Duration;

use serde_json::json;
use viewtrack_canonical::{
    DealerId, EventTimestamp, OfferId, PublicationId, StoreId, Tokenizer,
};
use viewtrack_core::{keys, Event, EventType, EventValue, Payload, SCHEMA_VERSION};

const TEST_TIME: EventTimestamp = EventTimestamp::from_secs(12345);

fn salty() -> Tokenizer {
    Tokenizer::new("salty").unwrap()
}

fn myhash() -> Tokenizer {
    Tokenizer::new("myhash").unwrap()
}

fn s(value: &str) -> EventValue {
    EventValue::from(value)
}

fn assert_envelope(event: &Event, event_type: EventType) {
    assert!(!event.id().as_str().is_empty());
    assert_eq!(event.event_type(), event_type);
    assert_eq!(event.timestamp(), TEST_TIME);
    assert_eq!(event.version(), SCHEMA_VERSION);
    assert_eq!(event.version(), 2);
}

fn assert_recent(event: &Event) {
    let now = EventTimestamp::now().as_secs();
    assert!((event.timestamp().as_secs() - now).abs() <= 2);
}

#[test]
fn dummy() {
    let event = Event::dummy(Some(TEST_TIME));
    assert_envelope(&event, EventType::Dummy);
    assert_eq!(event.event_type().code(), 0);
    assert_eq!(event.payload(), &Payload::new());

    assert_recent(&Event::dummy(None));
}

#[test]
fn paged_publication_opened() {
    let event =
        Event::paged_publication_opened(&PublicationId::new("pub1"), Some(TEST_TIME), &salty());
    assert_envelope(&event, EventType::PagedPublicationOpened);
    assert_eq!(
        event.payload(),
        &Payload::from([(keys::PUBLICATION_ID, s("pub1")), (keys::VIEW_TOKEN, s("HUdC076YIL8="))])
    );

    let default_event = Event::paged_publication_opened(&PublicationId::new("😁"), None, &myhash());
    assert_recent(&default_event);
    assert_eq!(
        default_event.payload(),
        &Payload::from([(keys::PUBLICATION_ID, s("😁")), (keys::VIEW_TOKEN, s("POcLWv7/N4Q="))])
    );
}

#[test]
fn paged_publication_page_opened() {
    let event = Event::paged_publication_page_opened(
        &PublicationId::new("pub1"),
        1,
        Some(TEST_TIME),
        &salty(),
    );
    assert_envelope(&event, EventType::PagedPublicationPageOpened);
    assert_eq!(
        event.payload(),
        &Payload::from([
            (keys::PUBLICATION_ID, s("pub1")),
            (keys::PAGE_NUMBER, EventValue::Int(1)),
            (keys::VIEW_TOKEN, s("xX+BAiu1Nmo=")),
        ])
    );

    let default_event = Event::paged_publication_page_opened(
        &PublicationId::new("ølØl5Banana"),
        9999,
        None,
        &myhash(),
    );
    assert_recent(&default_event);
    assert_eq!(
        default_event.payload(),
        &Payload::from([
            (keys::PUBLICATION_ID, s("ølØl5Banana")),
            (keys::PAGE_NUMBER, EventValue::Int(9999)),
            (keys::VIEW_TOKEN, s("JR8kZFk7M+Y=")),
        ])
    );

    let pub1 = PublicationId::new("pub1");
    assert_eq!(
        Event::paged_publication_page_opened(&pub1, 1, None, &myhash())
            .payload()
            .get_str(keys::VIEW_TOKEN),
        Some("GKtJxfAxRZI=")
    );
    assert_eq!(
        Event::paged_publication_page_opened(&pub1, 9999, None, &myhash())
            .payload()
            .get_str(keys::VIEW_TOKEN),
        Some("VwMOrDD8zMk=")
    );
}

#[test]
fn potential_local_business_visit() {
    let event = Event::potential_local_business_visit(
        &StoreId::new("e3dclwL"),
        &DealerId::new("d7fazg"),
        93,
        85,
        Some(Duration::from_secs(3600)),
        Some(TEST_TIME),
        &myhash(),
    );
    assert_envelope(&event, EventType::PotentialLocalBusinessVisit);
    assert_eq!(event.event_type().code(), 10);
    assert_eq!(
        event.payload(),
        &Payload::from([
            (keys::STORE_ID, s("e3dclwL")),
            (keys::DEALER_ID, s("d7fazg")),
            (keys::HORIZONTAL_ACCURACY, EventValue::Int(93)),
            (keys::DISTANCE_TO_STORE, EventValue::Int(85)),
            (keys::RECENT_INTERACTION, EventValue::Bool(true)),
            (keys::RECENT_INTERACTION_INT, EventValue::Int(1)),
            (keys::VIEW_TOKEN, s("JGwLh2htW9c=")),
        ])
    );
}

#[test]
fn stale_or_unknown_interaction_is_not_recent() {
    for elapsed in [Some(Duration::from_secs(3601)), None] {
        let event = Event::potential_local_business_visit(
            &StoreId::new("e3dclwL"),
            &DealerId::new("d7fazg"),
            10,
            20,
            elapsed,
            Some(TEST_TIME),
            &myhash(),
        );
        assert_eq!(
            event.payload().get(keys::RECENT_INTERACTION),
            Some(&EventValue::Bool(false))
        );
        assert_eq!(event.payload().get_int(keys::RECENT_INTERACTION_INT), Some(0));
    }
}

#[test]
fn offer_opened() {
    let event = Event::offer_opened(&OfferId::new("offer_123"), Some(TEST_TIME), &salty());
    assert_envelope(&event, EventType::OfferOpened);
    assert_eq!(
        event.payload(),
        &Payload::from([(keys::OFFER_ID, s("offer_123")), (keys::VIEW_TOKEN, s("YNcV9px8d8U="))])
    );

    let default_event = Event::offer_opened(&OfferId::new("øffer_321"), None, &myhash());
    assert_recent(&default_event);
    assert_eq!(
        default_event.payload(),
        &Payload::from([(keys::OFFER_ID, s("øffer_321")), (keys::VIEW_TOKEN, s("ryYm+eb1bUU="))])
    );
}

#[test]
fn client_session_opened() {
    let event = Event::client_session_opened(Some(TEST_TIME));
    assert_envelope(&event, EventType::ClientSessionOpened);
    assert!(event.payload().is_empty());

    assert_recent(&Event::client_session_opened(None));
}

#[test]
fn searched() {
    let query = "Søme Very Long Séarch string 🌈";
    let event = Event::searched(query, Some("DA"), Some(TEST_TIME), &salty());
    assert_envelope(&event, EventType::Searched);
    assert_eq!(
        event.payload(),
        &Payload::from([
            (keys::SEARCH_QUERY, s(query)),
            (keys::SEARCH_LANGUAGE, s("DA")),
            (keys::VIEW_TOKEN, s("erHTNwqSrLY=")),
        ])
    );

    let default_event = Event::searched("", None, None, &myhash());
    assert_recent(&default_event);
    assert_eq!(
        default_event.payload(),
        &Payload::from([(keys::SEARCH_QUERY, s("")), (keys::VIEW_TOKEN, s("2oEIMMzybMM="))])
    );
    assert!(!default_event.payload().contains_key(keys::SEARCH_LANGUAGE));

    assert_eq!(
        Event::searched("my search string", Some("a"), None, &myhash()).payload(),
        &Payload::from([
            (keys::SEARCH_QUERY, s("my search string")),
            (keys::SEARCH_LANGUAGE, s("a")),
            (keys::VIEW_TOKEN, s("bNOIlf+nAAU=")),
        ])
    );
    assert_eq!(
        Event::searched("my search string 😁", None, None, &myhash()).payload(),
        &Payload::from([
            (keys::SEARCH_QUERY, s("my search string 😁")),
            (keys::VIEW_TOKEN, s("+OJqwh68nIk=")),
        ])
    );
    assert_eq!(
        Event::searched("øl og æg", None, None, &myhash()).payload(),
        &Payload::from([(keys::SEARCH_QUERY, s("øl og æg")), (keys::VIEW_TOKEN, s("NTgj68OWnbc="))])
    );
}

#[test]
fn search_language_is_not_tokenized() {
    let tokenizer = myhash();
    let with_language = Event::searched("q", Some("DA"), None, &tokenizer);
    let without_language = Event::searched("q", None, None, &tokenizer);
    assert_eq!(
        with_language.payload().get(keys::VIEW_TOKEN),
        without_language.payload().get(keys::VIEW_TOKEN)
    );
}

#[test]
fn offer_opened_after_search() {
    let query = "Søme Very Long Séarch string 🌈";
    let event =
        Event::offer_opened_after_search(&OfferId::new("offer_123"), query, Some("DA"), Some(TEST_TIME));
    assert_envelope(&event, EventType::OfferOpenedAfterSearch);
    assert_eq!(event.event_type().code(), 7);
    assert_eq!(
        event.payload(),
        &Payload::from([
            (keys::SEARCH_QUERY, s(query)),
            (keys::SEARCH_LANGUAGE, s("DA")),
            (keys::OFFER_ID, s("offer_123")),
        ])
    );
    assert!(!event.payload().contains_key(keys::VIEW_TOKEN));

    let default_event = Event::offer_opened_after_search(&OfferId::new("abc123"), "", None, None);
    assert_recent(&default_event);
    assert_eq!(
        default_event.payload(),
        &Payload::from([(keys::SEARCH_QUERY, s("")), (keys::OFFER_ID, s("abc123"))])
    );
}

#[test]
fn every_construction_gets_a_fresh_id() {
    let tokenizer = salty();
    let id = PublicationId::new("pub1");
    let a = Event::paged_publication_opened(&id, Some(TEST_TIME), &tokenizer);
    let b = Event::paged_publication_opened(&id, Some(TEST_TIME), &tokenizer);
    assert_ne!(a.id(), b.id());
    assert_eq!(a.payload(), b.payload());
}

#[test]
fn serializes_as_flat_wire_map() {
    let event = Event::offer_opened(&OfferId::new("offer_123"), Some(TEST_TIME), &salty());
    let value = event.to_json().unwrap();
    assert_eq!(
        value,
        json!({
            "id": event.id().as_str(),
            "type": 3,
            "timestamp": 12345,
            "version": 2,
            "payload": {"of.id": "offer_123", "vt": "YNcV9px8d8U="}
        })
    );
    assert_eq!(Event::from_json(&value).unwrap(), event);
}

#[test]
fn parses_reserved_type_codes() {
    let value = json!({
        "id": "0b7c1e5e-1a52-4a35-9c8e-6f0c0a9a2b11",
        "type": 6,
        "timestamp": 1,
        "version": 2,
        "payload": {}
    });
    let event = Event::from_json(&value).unwrap();
    assert_eq!(event.event_type(), EventType::Other(6));
    assert_eq!(event.to_json().unwrap()["type"], 6);
}

#[test]
fn rejects_malformed_events() {
    let empty_id = json!({"id": "", "type": 0, "timestamp": 1, "version": 2, "payload": {}});
    assert!(Event::from_json(&empty_id).is_err());

    let nested = json!({"id": "x", "type": 0, "timestamp": 1, "version": 2, "payload": {"a": {}}});
    assert!(Event::from_json(&nested).is_err());

    let missing_payload = json!({"id": "x", "type": 0, "timestamp": 1, "version": 2});
    assert!(Event::from_json(&missing_payload).is_err());
}
