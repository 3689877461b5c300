//! Configured events tracker.

use std::time::Duration;

use tracing::{info, trace};
use viewtrack_canonical::{
    AppId, DealerId, EventTimestamp, OfferId, PublicationId, StoreId, Tokenizer,
};
use viewtrack_core::Event;

use crate::config::TrackerSettings;
use crate::error::TrackerError;
use crate::salt::load_or_create_salt;
use crate::sink::EventSink;
use crate::traits::SaltStore;

/// Tracker bound to one application and one install salt.
///
/// Building a tracker is the single initialization step for tokenization:
/// it loads (or creates) the install salt and fails rather than track with
/// an unusable one. Once built it is immutable and can be shared freely.
///
/// # Example
///
/// ```rust
/// use viewtrack_canonical::OfferId;
/// use viewtrack_tracker::{EventsTracker, MemorySaltStore, MemorySink, TrackerSettings};
///
/// let store = MemorySaltStore::new();
/// let tracker = EventsTracker::configure(TrackerSettings::new("appId_123")?, &store)?;
///
/// let sink = MemorySink::new();
/// tracker.track(tracker.offer_opened(&OfferId::new("offer_123"), None), &sink)?;
/// assert_eq!(sink.drain().len(), 1);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct EventsTracker {
    settings: TrackerSettings,
    tokenizer: Tokenizer,
}

impl EventsTracker {
    /// Builds a tracker from validated settings and the host's salt store.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError`] if the salt cannot be loaded or created, or if
    /// the stored salt cannot key a tokenizer.
    pub fn configure(
        settings: TrackerSettings,
        store: &dyn SaltStore,
    ) -> Result<Self, TrackerError> {
        let salt = load_or_create_salt(store)?;
        let tokenizer = Tokenizer::new(salt)?;
        info!(app_id = %settings.app_id, "events tracker configured");
        Ok(Self {
            settings,
            tokenizer,
        })
    }

    /// Validates `app_id` and builds a tracker. See [`EventsTracker::configure`].
    pub fn with_app_id(app_id: &str, store: &dyn SaltStore) -> Result<Self, TrackerError> {
        Self::configure(TrackerSettings::new(app_id)?, store)
    }

    /// Application identifier stamped on tracked events.
    pub fn app_id(&self) -> &AppId {
        &self.settings.app_id
    }

    /// Tokenizer keyed by the install salt.
    pub fn tokenizer(&self) -> &Tokenizer {
        &self.tokenizer
    }

    /// Returns `event` stamped with this tracker's application id.
    pub fn prepare(&self, event: &Event) -> Event {
        event.with_app_id(&self.settings.app_id)
    }

    /// Prepares `event` and hands it to `sink`.
    pub fn track(&self, event: Event, sink: &dyn EventSink) -> Result<(), TrackerError> {
        let prepared = self.prepare(&event);
        trace!(
            event_id = %prepared.id(),
            event_type = prepared.event_type().code(),
            "handing event to sink"
        );
        sink.accept(prepared)?;
        Ok(())
    }

    /// [`Event::paged_publication_opened`] with this tracker's tokenizer.
    pub fn paged_publication_opened(
        &self,
        publication_id: &PublicationId,
        timestamp: Option<EventTimestamp>,
    ) -> Event {
        Event::paged_publication_opened(publication_id, timestamp, &self.tokenizer)
    }

    /// [`Event::paged_publication_page_opened`] with this tracker's tokenizer.
    pub fn paged_publication_page_opened(
        &self,
        publication_id: &PublicationId,
        page_number: i32,
        timestamp: Option<EventTimestamp>,
    ) -> Event {
        Event::paged_publication_page_opened(
            publication_id,
            page_number,
            timestamp,
            &self.tokenizer,
        )
    }

    /// [`Event::offer_opened`] with this tracker's tokenizer.
    pub fn offer_opened(&self, offer_id: &OfferId, timestamp: Option<EventTimestamp>) -> Event {
        Event::offer_opened(offer_id, timestamp, &self.tokenizer)
    }

    /// [`Event::searched`] with this tracker's tokenizer.
    pub fn searched(
        &self,
        query: &str,
        language_code: Option<&str>,
        timestamp: Option<EventTimestamp>,
    ) -> Event {
        Event::searched(query, language_code, timestamp, &self.tokenizer)
    }

    /// [`Event::potential_local_business_visit`] with this tracker's tokenizer.
    pub fn potential_local_business_visit(
        &self,
        store_id: &StoreId,
        dealer_id: &DealerId,
        horizontal_accuracy: i64,
        distance_to_store: i64,
        time_since_last_interaction: Option<Duration>,
        timestamp: Option<EventTimestamp>,
    ) -> Event {
        Event::potential_local_business_visit(
            store_id,
            dealer_id,
            horizontal_accuracy,
            distance_to_store,
            time_since_last_interaction,
            timestamp,
            &self.tokenizer,
        )
    }
}
