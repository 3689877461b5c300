use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use viewtrack_canonical::{
    AppId, DealerId, EventId, EventTimestamp, OfferId, PublicationId, StoreId, Tokenizer,
};

use crate::errors::CoreError;
use crate::payload::{keys, EventValue, Payload};

/// Payload schema version carried by every event built by this crate.
///
/// Bump only when a payload shape changes incompatibly.
pub const SCHEMA_VERSION: u32 = 2;

/// Interactions at most this long ago count as recent.
pub const RECENT_INTERACTION_THRESHOLD: Duration = Duration::from_secs(60 * 60);

/// Numeric event type code.
///
/// Codes are part of the wire contract. Gaps (6, 8, 9, ...) belong to event
/// kinds built elsewhere and round-trip through [`EventType::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "u16", into = "u16")]
pub enum EventType {
    /// Generic/diagnostic event (0).
    Dummy,
    /// A paged publication was opened (1).
    PagedPublicationOpened,
    /// A page of a paged publication was opened (2).
    PagedPublicationPageOpened,
    /// An offer was opened (3).
    OfferOpened,
    /// A client session was opened (4).
    ClientSessionOpened,
    /// A search was performed (5).
    Searched,
    /// An offer was opened from search results (7).
    OfferOpenedAfterSearch,
    /// The device was possibly inside a store (10).
    PotentialLocalBusinessVisit,
    /// Any code outside this crate's scope.
    Other(u16),
}

impl EventType {
    /// Returns the wire code.
    pub const fn code(self) -> u16 {
        match self {
            EventType::Dummy => 0,
            EventType::PagedPublicationOpened => 1,
            EventType::PagedPublicationPageOpened => 2,
            EventType::OfferOpened => 3,
            EventType::ClientSessionOpened => 4,
            EventType::Searched => 5,
            EventType::OfferOpenedAfterSearch => 7,
            EventType::PotentialLocalBusinessVisit => 10,
            EventType::Other(code) => code,
        }
    }

    /// Maps a wire code to its event type.
    pub const fn from_code(code: u16) -> Self {
        match code {
            0 => EventType::Dummy,
            1 => EventType::PagedPublicationOpened,
            2 => EventType::PagedPublicationPageOpened,
            3 => EventType::OfferOpened,
            4 => EventType::ClientSessionOpened,
            5 => EventType::Searched,
            7 => EventType::OfferOpenedAfterSearch,
            10 => EventType::PotentialLocalBusinessVisit,
            other => EventType::Other(other),
        }
    }
}

impl From<u16> for EventType {
    fn from(code: u16) -> Self {
        EventType::from_code(code)
    }
}

impl From<EventType> for u16 {
    fn from(event_type: EventType) -> Self {
        event_type.code()
    }
}

/// Immutable analytics event record.
///
/// Serializes as the flat map `{"id", "type", "timestamp", "version", "payload"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    id: EventId,
    #[serde(rename = "type")]
    event_type: EventType,
    timestamp: EventTimestamp,
    version: u32,
    payload: Payload,
}

impl Event {
    /// Builds an event of any type with a fresh id and the current schema version.
    ///
    /// When `timestamp` is `None` the wall clock is read once.
    pub fn new(
        event_type: EventType,
        timestamp: Option<EventTimestamp>,
        payload: Payload,
    ) -> Self {
        Self {
            id: EventId::generate(),
            event_type,
            timestamp: timestamp.unwrap_or_else(EventTimestamp::now),
            version: SCHEMA_VERSION,
            payload,
        }
    }

    /// Diagnostic event with an empty payload.
    pub fn dummy(timestamp: Option<EventTimestamp>) -> Self {
        Self::new(EventType::Dummy, timestamp, Payload::new())
    }

    /// A paged publication was opened.
    ///
    /// The view token covers the publication id.
    pub fn paged_publication_opened(
        publication_id: &PublicationId,
        timestamp: Option<EventTimestamp>,
        tokenizer: &Tokenizer,
    ) -> Self {
        let mut payload = Payload::new();
        payload.insert(keys::PUBLICATION_ID, publication_id.as_str());
        payload.insert(
            keys::VIEW_TOKEN,
            tokenizer.tokenize(publication_id.as_str()),
        );
        Self::new(EventType::PagedPublicationOpened, timestamp, payload)
    }

    /// A page of a paged publication was opened.
    ///
    /// The view token covers the publication id followed by the page number
    /// as a 4-byte big-endian integer; see [`page_view_token_input`].
    pub fn paged_publication_page_opened(
        publication_id: &PublicationId,
        page_number: i32,
        timestamp: Option<EventTimestamp>,
        tokenizer: &Tokenizer,
    ) -> Self {
        let mut payload = Payload::new();
        payload.insert(keys::PUBLICATION_ID, publication_id.as_str());
        payload.insert(keys::PAGE_NUMBER, page_number);
        payload.insert(
            keys::VIEW_TOKEN,
            tokenizer.tokenize_bytes(&page_view_token_input(publication_id, page_number)),
        );
        Self::new(EventType::PagedPublicationPageOpened, timestamp, payload)
    }

    /// An offer was opened.
    pub fn offer_opened(
        offer_id: &OfferId,
        timestamp: Option<EventTimestamp>,
        tokenizer: &Tokenizer,
    ) -> Self {
        let mut payload = Payload::new();
        payload.insert(keys::OFFER_ID, offer_id.as_str());
        payload.insert(keys::VIEW_TOKEN, tokenizer.tokenize(offer_id.as_str()));
        Self::new(EventType::OfferOpened, timestamp, payload)
    }

    /// A client session was opened.
    pub fn client_session_opened(timestamp: Option<EventTimestamp>) -> Self {
        Self::new(EventType::ClientSessionOpened, timestamp, Payload::new())
    }

    /// A search was performed.
    ///
    /// The query is always present, even when empty. The language code is
    /// omitted when absent and never contributes to the view token.
    pub fn searched(
        query: &str,
        language_code: Option<&str>,
        timestamp: Option<EventTimestamp>,
        tokenizer: &Tokenizer,
    ) -> Self {
        let mut payload = Payload::new();
        payload.insert(keys::SEARCH_QUERY, query);
        payload.insert_opt(keys::SEARCH_LANGUAGE, language_code);
        payload.insert(keys::VIEW_TOKEN, tokenizer.tokenize(query));
        Self::new(EventType::Searched, timestamp, payload)
    }

    /// An offer was opened from search results.
    ///
    /// This event carries its identifiers in the clear and has no view token.
    pub fn offer_opened_after_search(
        offer_id: &OfferId,
        query: &str,
        language_code: Option<&str>,
        timestamp: Option<EventTimestamp>,
    ) -> Self {
        let mut payload = Payload::new();
        payload.insert(keys::SEARCH_QUERY, query);
        payload.insert_opt(keys::SEARCH_LANGUAGE, language_code);
        payload.insert(keys::OFFER_ID, offer_id.as_str());
        Self::new(EventType::OfferOpenedAfterSearch, timestamp, payload)
    }

    /// The device was possibly inside a store.
    ///
    /// `time_since_last_interaction` of `None` means no known interaction,
    /// which is never recent. The view token covers the store id.
    pub fn potential_local_business_visit(
        store_id: &StoreId,
        dealer_id: &DealerId,
        horizontal_accuracy: i64,
        distance_to_store: i64,
        time_since_last_interaction: Option<Duration>,
        timestamp: Option<EventTimestamp>,
        tokenizer: &Tokenizer,
    ) -> Self {
        let recent = time_since_last_interaction
            .is_some_and(|elapsed| elapsed <= RECENT_INTERACTION_THRESHOLD);

        let mut payload = Payload::new();
        payload.insert(keys::STORE_ID, store_id.as_str());
        payload.insert(keys::DEALER_ID, dealer_id.as_str());
        payload.insert(keys::HORIZONTAL_ACCURACY, horizontal_accuracy);
        payload.insert(keys::DISTANCE_TO_STORE, distance_to_store);
        payload.insert(keys::RECENT_INTERACTION, recent);
        payload.insert(keys::RECENT_INTERACTION_INT, i64::from(recent));
        payload.insert(keys::VIEW_TOKEN, tokenizer.tokenize(store_id.as_str()));
        Self::new(EventType::PotentialLocalBusinessVisit, timestamp, payload)
    }

    /// Returns a copy of this event with the application id stamped into the payload.
    ///
    /// The id, type, timestamp and version are kept.
    pub fn with_app_id(&self, app_id: &AppId) -> Self {
        let mut stamped = self.clone();
        stamped
            .payload
            .insert(keys::APP_ID, EventValue::from(app_id.as_str()));
        stamped
    }

    /// Occurrence identifier.
    pub fn id(&self) -> &EventId {
        &self.id
    }

    /// Event type.
    pub fn event_type(&self) -> EventType {
        self.event_type
    }

    /// Time of occurrence.
    pub fn timestamp(&self) -> EventTimestamp {
        self.timestamp
    }

    /// Payload schema version.
    pub fn version(&self) -> u32 {
        self.version
    }

    /// Event payload.
    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    /// Serializes the event to its flat JSON map.
    pub fn to_json(&self) -> Result<Value, CoreError> {
        Ok(serde_json::to_value(self)?)
    }

    /// Parses an event from its flat JSON map.
    pub fn from_json(value: &Value) -> Result<Self, CoreError> {
        Ok(Self::deserialize(value)?)
    }
}

/// Builds the tokenizer input for a page view: the UTF-8 publication id
/// followed by the page number as a big-endian `i32`.
pub fn page_view_token_input(publication_id: &PublicationId, page_number: i32) -> Vec<u8> {
    let id = publication_id.as_str().as_bytes();
    let mut input = Vec::with_capacity(id.len() + 4);
    input.extend_from_slice(id);
    input.extend_from_slice(&page_number.to_be_bytes());
    input
}
