use serde::Serialize;
use std::sync::Arc;
use tickethub_catalog::{CatalogError, EventCatalog, PricingCalculator, Quote, SeatMap, SeatMapGenerator};
use tickethub_shared::{Event, Notice, Seat, Show};
use uuid::Uuid;

use crate::checkout::{Checkout, CheckoutContext};
use crate::hold::{HoldState, HoldTimer, TickOutcome};
use crate::ledger::{SelectOutcome, SelectionError, SelectionLedger};

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// No event/show is open; callers send the user back to the catalog
    #[error("No event or show selected")]
    MissingBookingContext,

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Selection(#[from] SelectionError),

    #[error("Seat {0} does not exist in this show")]
    UnknownSeat(String),

    #[error("Please select at least one seat")]
    EmptySelection,

    #[error("Checkout already in progress")]
    CheckoutInProgress,
}

/// Everything a session needs from the outside world
#[derive(Clone)]
pub struct SessionDeps {
    pub catalog: Arc<EventCatalog>,
    pub seat_maps: Arc<SeatMapGenerator>,
    pub pricing: Arc<PricingCalculator>,
    pub max_seats: usize,
    pub hold_seconds: u32,
}

/// Read-only view of a session for rendering
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub id: Uuid,
    pub event: Option<Event>,
    pub show: Option<Show>,
    pub selection: Vec<Seat>,
    pub max_seats: usize,
    pub hold_state: HoldState,
    pub remaining_secs: u32,
    pub checkout_in_progress: bool,
}

/// One browsing session's booking state: the open show, its seat map, the
/// selection ledger and the hold timer.
///
/// Every mutation of ledger and timer happens inside a single method call so
/// the two never disagree between renders.
pub struct BookingSession {
    id: Uuid,
    deps: SessionDeps,
    event: Option<Event>,
    show: Option<Show>,
    seat_map: Option<SeatMap>,
    ledger: SelectionLedger,
    hold: HoldTimer,
    checkout_in_progress: bool,
}

impl BookingSession {
    pub fn new(deps: SessionDeps) -> Self {
        Self {
            id: Uuid::new_v4(),
            ledger: SelectionLedger::new(deps.max_seats),
            hold: HoldTimer::new(deps.hold_seconds),
            deps,
            event: None,
            show: None,
            seat_map: None,
            checkout_in_progress: false,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Enter seat selection for a show. Draws a fresh seat map and drops any
    /// previous selection and hold.
    pub fn open_show(&mut self, event_id: &str, show_id: &str) -> Result<&SeatMap, SessionError> {
        if self.checkout_in_progress {
            return Err(SessionError::CheckoutInProgress);
        }
        let (event, show) = self.deps.catalog.resolve(event_id, show_id)?;
        let (event, show) = (event.clone(), show.clone());

        self.ledger.clear();
        self.hold.reset();
        let seat_map = self.deps.seat_maps.generate(&show.id);

        tracing::info!(session_id = %self.id, event_id = %event.id, show_id = %show.id, "Opened show");
        self.event = Some(event);
        self.show = Some(show);
        Ok(self.seat_map.insert(seat_map))
    }

    pub fn event(&self) -> Option<&Event> {
        self.event.as_ref()
    }

    pub fn show(&self) -> Option<&Show> {
        self.show.as_ref()
    }

    pub fn seat_map(&self) -> Option<&SeatMap> {
        self.seat_map.as_ref()
    }

    pub fn selection(&self) -> &[Seat] {
        self.ledger.seats()
    }

    pub fn is_selected(&self, seat_id: &str) -> bool {
        self.ledger.is_selected(seat_id)
    }

    pub fn hold_state(&self) -> HoldState {
        self.hold.state()
    }

    pub fn remaining_secs(&self) -> u32 {
        self.hold.remaining_secs()
    }

    pub fn checkout_in_progress(&self) -> bool {
        self.checkout_in_progress
    }

    pub fn select(&mut self, seat_id: &str) -> Result<Notice, SessionError> {
        if self.checkout_in_progress {
            return Err(SessionError::CheckoutInProgress);
        }
        let seat_map = self.seat_map.as_ref().ok_or(SessionError::MissingBookingContext)?;
        let seat = seat_map
            .get(seat_id)
            .ok_or_else(|| SessionError::UnknownSeat(seat_id.to_string()))?;

        match self.ledger.select(seat) {
            Ok(SelectOutcome::Added) | Ok(SelectOutcome::AlreadySelected) => {
                self.hold.on_selection_changed(self.ledger.len());
                tracing::debug!(session_id = %self.id, seat_id, selected = self.ledger.len(), "Seat selected");
                Ok(Notice::seat_selected(seat_id))
            }
            Err(e) => {
                tracing::warn!(session_id = %self.id, seat_id, error = %e, "Seat selection rejected");
                Err(e.into())
            }
        }
    }

    /// Deselecting a seat that is not held is a no-op
    pub fn deselect(&mut self, seat_id: &str) -> Result<Option<Notice>, SessionError> {
        if self.checkout_in_progress {
            return Err(SessionError::CheckoutInProgress);
        }
        let removed = self.ledger.deselect(seat_id);
        self.hold.on_selection_changed(self.ledger.len());
        Ok(removed.then(|| Notice::seat_deselected(seat_id)))
    }

    pub fn clear(&mut self) -> Result<(), SessionError> {
        if self.checkout_in_progress {
            return Err(SessionError::CheckoutInProgress);
        }
        self.ledger.clear();
        self.hold.on_selection_changed(0);
        Ok(())
    }

    /// Advance the hold by one second. On expiry the selection is dropped and
    /// the expiry notice is returned.
    pub fn tick(&mut self) -> Option<Notice> {
        match self.hold.tick() {
            TickOutcome::Expired => {
                let released = self.ledger.len();
                self.ledger.clear();
                self.hold.reset();
                tracing::info!(session_id = %self.id, released, "Seat hold expired");
                Some(Notice::hold_expired())
            }
            TickOutcome::Remaining(_) | TickOutcome::NotRunning => None,
        }
    }

    pub fn quote(&self, promo: Option<&str>) -> Quote {
        self.deps.pricing.quote(self.ledger.seats(), promo)
    }

    /// Leave seat selection for payment: stop the hold and freeze what is
    /// being bought. Selection edits are refused until the checkout is
    /// completed or abandoned.
    pub fn begin_checkout(&mut self, promo: Option<&str>) -> Result<Checkout, SessionError> {
        if self.checkout_in_progress {
            return Err(SessionError::CheckoutInProgress);
        }
        let (event, show) = match (&self.event, &self.show) {
            (Some(event), Some(show)) => (event.clone(), show.clone()),
            _ => return Err(SessionError::MissingBookingContext),
        };
        if self.ledger.is_empty() {
            return Err(SessionError::EmptySelection);
        }

        let quote = self.quote(promo);
        let checkout = Checkout::new(CheckoutContext {
            event,
            show,
            seats: self.ledger.seats().to_vec(),
            quote,
        });

        self.hold.stop();
        self.checkout_in_progress = true;
        tracing::info!(session_id = %self.id, checkout_id = %checkout.id(), "Checkout started");
        Ok(checkout)
    }

    /// Payment went through: the selection has been bought
    pub fn complete_checkout(&mut self) {
        self.checkout_in_progress = false;
        self.ledger.clear();
        self.hold.reset();
    }

    /// Payment failed or was abandoned: keep the selection and resume the hold
    pub fn abandon_checkout(&mut self) {
        self.checkout_in_progress = false;
        self.hold.on_selection_changed(self.ledger.len());
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            id: self.id,
            event: self.event.clone(),
            show: self.show.clone(),
            selection: self.ledger.seats().to_vec(),
            max_seats: self.ledger.max_seats(),
            hold_state: self.hold.state(),
            remaining_secs: self.hold.remaining_secs(),
            checkout_in_progress: self.checkout_in_progress,
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use tickethub_catalog::SeatLayout;
    use tickethub_shared::SeatStatus;

    pub(crate) fn deps() -> SessionDeps {
        SessionDeps {
            catalog: Arc::new(EventCatalog::builtin()),
            seat_maps: Arc::new(SeatMapGenerator::new(SeatLayout {
                booked_probability: 0.0,
                ..SeatLayout::default()
            })),
            pricing: Arc::new(PricingCalculator::default()),
            max_seats: 10,
            hold_seconds: 300,
        }
    }

    #[test]
    fn test_open_show_requires_context() {
        let mut session = BookingSession::new(deps());
        assert!(matches!(
            session.open_show("1", "missing"),
            Err(SessionError::Catalog(CatalogError::ShowNotFound(_)))
        ));
        assert!(matches!(session.select("A1"), Err(SessionError::MissingBookingContext)));
        assert!(matches!(session.begin_checkout(None), Err(SessionError::MissingBookingContext)));
    }

    #[test]
    fn test_select_starts_hold() {
        let mut session = BookingSession::new(deps());
        session.open_show("1", "s1").unwrap();
        assert_eq!(session.hold_state(), HoldState::Idle);

        session.select("A1").unwrap();
        assert_eq!(session.hold_state(), HoldState::Running);
        assert_eq!(session.remaining_secs(), 300);
        assert!(session.is_selected("A1"));

        // The seat map keeps its own status
        assert_eq!(session.seat_map().unwrap().get("A1").unwrap().status, SeatStatus::Available);
    }

    #[test]
    fn test_unknown_and_booked_seats() {
        let mut session = BookingSession::new(SessionDeps {
            seat_maps: Arc::new(SeatMapGenerator::new(SeatLayout {
                booked_probability: 1.0,
                ..SeatLayout::default()
            })),
            ..deps()
        });
        session.open_show("1", "s1").unwrap();

        assert!(matches!(session.select("Z1"), Err(SessionError::UnknownSeat(_))));
        assert!(matches!(
            session.select("A1"),
            Err(SessionError::Selection(SelectionError::UnavailableSeat(_)))
        ));
        assert!(session.selection().is_empty());
        assert_eq!(session.hold_state(), HoldState::Idle);
    }

    #[test]
    fn test_hold_expiry_after_300_ticks() {
        let mut session = BookingSession::new(deps());
        session.open_show("1", "s1").unwrap();
        session.select("A1").unwrap();
        session.select("B2").unwrap();

        for _ in 0..299 {
            assert!(session.tick().is_none());
        }
        let notice = session.tick().expect("expiry notice");
        assert_eq!(notice.kind, tickethub_shared::NoticeKind::HoldExpired);

        assert!(session.selection().is_empty());
        assert_eq!(session.hold_state(), HoldState::Idle);
        assert_eq!(session.remaining_secs(), 300);

        session.select("C3").unwrap();
        assert_eq!(session.remaining_secs(), 300);
    }

    #[test]
    fn test_deselect_to_empty_stops_hold() {
        let mut session = BookingSession::new(deps());
        session.open_show("1", "s1").unwrap();
        session.select("A1").unwrap();
        session.tick();

        assert!(session.deselect("H12").unwrap().is_none());
        assert!(session.deselect("A1").unwrap().is_some());
        assert_eq!(session.hold_state(), HoldState::Idle);
        assert!(session.tick().is_none());
    }

    #[test]
    fn test_show_change_resets_selection_and_timer_together() {
        let mut session = BookingSession::new(deps());
        session.open_show("1", "s1").unwrap();
        session.select("A1").unwrap();
        for _ in 0..120 {
            session.tick();
        }

        session.open_show("1", "s2").unwrap();
        assert!(session.selection().is_empty());
        assert_eq!(session.hold_state(), HoldState::Idle);
        assert_eq!(session.remaining_secs(), 300);
        assert_eq!(session.show().unwrap().id, "s2");
    }

    #[test]
    fn test_quote_tracks_selection() {
        let mut session = BookingSession::new(deps());
        session.open_show("1", "s1").unwrap();
        session.select("A1").unwrap();
        session.select("D1").unwrap();
        session.select("F1").unwrap();
        assert_eq!(session.quote(Some("FIRST")).total, 1045);

        session.deselect("A1").unwrap();
        assert_eq!(session.quote(None).subtotal, 600);
    }

    #[test]
    fn test_checkout_locks_selection() {
        let mut session = BookingSession::new(deps());
        session.open_show("1", "s1").unwrap();
        assert!(matches!(session.begin_checkout(None), Err(SessionError::EmptySelection)));

        session.select("A1").unwrap();
        let checkout = session.begin_checkout(Some("FIRST")).unwrap();
        assert_eq!(checkout.context().quote.total, 475);
        assert_eq!(session.hold_state(), HoldState::Idle);

        assert!(matches!(session.select("A2"), Err(SessionError::CheckoutInProgress)));
        assert!(matches!(session.deselect("A1"), Err(SessionError::CheckoutInProgress)));
        assert!(matches!(session.begin_checkout(None), Err(SessionError::CheckoutInProgress)));

        session.abandon_checkout();
        assert_eq!(session.hold_state(), HoldState::Running);
        assert_eq!(session.selection().len(), 1);

        session.begin_checkout(None).unwrap();
        session.complete_checkout();
        assert!(session.selection().is_empty());
        assert!(!session.checkout_in_progress());
    }
}
