//! Event command implementation.

use std::time::Duration;

use clap::Subcommand;
use viewtrack_canonical::{DealerId, EventTimestamp, OfferId, PublicationId, StoreId};
use viewtrack_core::Event;
use viewtrack_tracker::TrackerSettings;

use super::SaltSource;
use crate::output::format_json;

/// Tracked actions that can be built from the command line.
#[derive(Subcommand, Debug)]
pub enum EventKind {
    /// Diagnostic event (type 0)
    Dummy,
    /// Paged publication opened (type 1)
    PublicationOpened {
        /// Publication id
        publication_id: String,
    },
    /// Paged publication page opened (type 2)
    PageOpened {
        /// Publication id
        publication_id: String,
        /// Page number
        page: i32,
    },
    /// Offer opened (type 3)
    OfferOpened {
        /// Offer id
        offer_id: String,
    },
    /// Client session opened (type 4)
    SessionOpened,
    /// Search performed (type 5)
    Searched {
        /// Search query (may be empty)
        query: String,
        /// Search language code
        #[arg(long)]
        language: Option<String>,
    },
    /// Offer opened from search results (type 7)
    OfferOpenedAfterSearch {
        /// Offer id
        offer_id: String,
        /// Search query (may be empty)
        query: String,
        /// Search language code
        #[arg(long)]
        language: Option<String>,
    },
    /// Potential store visit (type 10)
    PotentialVisit {
        /// Store id
        store_id: String,
        /// Dealer id
        dealer_id: String,
        /// Horizontal accuracy in meters
        #[arg(long)]
        accuracy: i64,
        /// Distance to the store in meters
        #[arg(long)]
        distance: i64,
        /// Seconds since the user last interacted with the app
        #[arg(long)]
        since_interaction: Option<u64>,
    },
}

pub fn run(
    kind: EventKind,
    timestamp: Option<i64>,
    app_id: Option<String>,
    source: &SaltSource,
) -> Result<(), Box<dyn std::error::Error>> {
    let settings = app_id.as_deref().map(TrackerSettings::new).transpose()?;
    let timestamp = timestamp.map(EventTimestamp::from_secs);

    let event = match kind {
        EventKind::Dummy => Event::dummy(timestamp),
        EventKind::SessionOpened => Event::client_session_opened(timestamp),
        EventKind::OfferOpenedAfterSearch {
            offer_id,
            query,
            language,
        } => Event::offer_opened_after_search(
            &OfferId::new(offer_id),
            &query,
            language.as_deref(),
            timestamp,
        ),
        EventKind::PublicationOpened { publication_id } => Event::paged_publication_opened(
            &PublicationId::new(publication_id),
            timestamp,
            &source.tokenizer()?,
        ),
        EventKind::PageOpened {
            publication_id,
            page,
        } => Event::paged_publication_page_opened(
            &PublicationId::new(publication_id),
            page,
            timestamp,
            &source.tokenizer()?,
        ),
        EventKind::OfferOpened { offer_id } => {
            Event::offer_opened(&OfferId::new(offer_id), timestamp, &source.tokenizer()?)
        }
        EventKind::Searched { query, language } => Event::searched(
            &query,
            language.as_deref(),
            timestamp,
            &source.tokenizer()?,
        ),
        EventKind::PotentialVisit {
            store_id,
            dealer_id,
            accuracy,
            distance,
            since_interaction,
        } => Event::potential_local_business_visit(
            &StoreId::new(store_id),
            &DealerId::new(dealer_id),
            accuracy,
            distance,
            since_interaction.map(Duration::from_secs),
            timestamp,
            &source.tokenizer()?,
        ),
    };

    let event = match settings {
        Some(settings) => event.with_app_id(&settings.app_id),
        None => event,
    };

    println!("{}", format_json(&event.to_json()?));
    Ok(())
}
