use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tickethub_catalog::{EventCatalog, PricingCalculator, PricingConfig, SeatLayout, SeatMapGenerator};
use tickethub_core::BookingRepository;
use tickethub_order::{BookingRecorder, BookingSession, HoldTicker, SessionDeps, SimulatedPayment};
use tickethub_shared::Notice;
use tickethub_store::app_config::BookingRules;
use tickethub_store::{BookingStore, KeyValueStore};
use tokio::sync::{broadcast, Mutex, RwLock};
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use uuid::Uuid;

const TICK_PERIOD: Duration = Duration::from_secs(1);
const NOTICE_BUFFER: usize = 64;
const MAX_SWEEP_PERIOD: Duration = Duration::from_secs(60);

/// A live browsing session plus the things that run on its behalf
pub struct SessionHandle {
    pub session: Arc<Mutex<BookingSession>>,
    pub notices: broadcast::Sender<Notice>,
    ticker: HoldTicker,
    last_seen: std::sync::Mutex<Instant>,
}

impl SessionHandle {
    fn start(session: BookingSession) -> Self {
        let session = Arc::new(Mutex::new(session));
        let (notices, _) = broadcast::channel(NOTICE_BUFFER);

        let ticking = session.clone();
        let tx = notices.clone();
        let ticker = HoldTicker::start(TICK_PERIOD, move || {
            let session = ticking.clone();
            let tx = tx.clone();
            async move {
                if let Some(notice) = session.lock().await.tick() {
                    // Nobody listening is fine
                    let _ = tx.send(notice);
                }
                true
            }
        });

        Self {
            session,
            notices,
            ticker,
            last_seen: std::sync::Mutex::new(Instant::now()),
        }
    }

    fn touch(&self) {
        if let Ok(mut last_seen) = self.last_seen.lock() {
            *last_seen = Instant::now();
        }
    }

    fn idle_for(&self, now: Instant) -> Duration {
        self.last_seen
            .lock()
            .map(|last_seen| now.saturating_duration_since(*last_seen))
            .unwrap_or_default()
    }

    /// Whether a request is using the session right now (or it is paying)
    fn is_busy(&self) -> bool {
        self.session
            .try_lock()
            .map(|session| session.checkout_in_progress())
            .unwrap_or(true)
    }

    /// Send a notice to whoever is streaming this session
    pub fn notify(&self, notice: Notice) {
        let _ = self.notices.send(notice);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Notice> {
        self.notices.subscribe()
    }
}

/// Open sessions by id
#[derive(Default)]
pub struct SessionRegistry {
    sessions: RwLock<HashMap<Uuid, Arc<SessionHandle>>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn create(&self, deps: SessionDeps) -> Arc<SessionHandle> {
        let session = BookingSession::new(deps);
        let id = session.id();
        let handle = Arc::new(SessionHandle::start(session));
        self.sessions.write().await.insert(id, handle.clone());
        tracing::info!(session_id = %id, "Session created");
        handle
    }

    /// Look a session up and mark it active
    pub async fn get(&self, id: Uuid) -> Option<Arc<SessionHandle>> {
        let handle = self.sessions.read().await.get(&id).cloned();
        if let Some(handle) = &handle {
            handle.touch();
        }
        handle
    }

    /// Drop a session; its hold ticker stops with it
    pub async fn remove(&self, id: Uuid) -> bool {
        let removed = self.sessions.write().await.remove(&id);
        if let Some(handle) = &removed {
            handle.ticker.stop();
            tracing::info!(session_id = %id, "Session closed");
        }
        removed.is_some()
    }

    /// Close every session nobody has touched for `max_idle`, stopping its
    /// hold ticker. Sessions in use or mid-checkout are left alone.
    pub async fn reap_idle(&self, max_idle: Duration) -> usize {
        let now = Instant::now();
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();

        sessions.retain(|id, handle| {
            if handle.idle_for(now) < max_idle || handle.is_busy() {
                return true;
            }
            handle.ticker.stop();
            tracing::info!(session_id = %id, "Idle session reaped");
            false
        });

        before - sessions.len()
    }

    /// Periodic sweep calling `reap_idle`; runs until the handle is aborted
    pub fn spawn_reaper(self: &Arc<Self>, max_idle: Duration) -> JoinHandle<()> {
        let registry = self.clone();
        let period = (max_idle / 2).clamp(Duration::from_secs(1), MAX_SWEEP_PERIOD);

        tokio::spawn(async move {
            let mut interval = tokio::time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                let reaped = registry.reap_idle(max_idle).await;
                if reaped > 0 {
                    tracing::debug!(reaped, "Swept idle sessions");
                }
            }
        })
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}

#[derive(Clone)]
pub struct AppState {
    pub deps: SessionDeps,
    pub sessions: Arc<SessionRegistry>,
    pub bookings: Arc<dyn BookingRepository>,
    pub recorder: Arc<BookingRecorder>,
    pub session_idle: Duration,
}

impl AppState {
    pub fn new(rules: &BookingRules, kv: Arc<dyn KeyValueStore>) -> Self {
        let deps = SessionDeps {
            catalog: Arc::new(EventCatalog::builtin()),
            seat_maps: Arc::new(SeatMapGenerator::new(SeatLayout {
                booked_probability: rules.booked_probability,
                ..SeatLayout::default()
            })),
            pricing: Arc::new(PricingCalculator::new(PricingConfig {
                convenience_fee_percent: rules.convenience_fee_percent,
                promo_codes: rules.promo_codes.clone(),
            })),
            max_seats: rules.max_seats,
            hold_seconds: rules.hold_seconds,
        };

        let bookings: Arc<dyn BookingRepository> = Arc::new(BookingStore::new(kv));
        let payments = Arc::new(SimulatedPayment::new(Duration::from_millis(rules.payment_delay_ms)));
        let recorder = Arc::new(BookingRecorder::new(bookings.clone(), payments, rules.currency.clone()));

        Self {
            deps,
            sessions: Arc::new(SessionRegistry::new()),
            bookings,
            recorder,
            session_idle: Duration::from_secs(rules.session_idle_seconds),
        }
    }

    pub fn spawn_reaper(&self) -> JoinHandle<()> {
        self.sessions.spawn_reaper(self.session_idle)
    }
}
