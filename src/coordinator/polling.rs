//! Timer-driven fetch cycles for one monitored target.
//!
//! A cycle resolves the target id (once, then cached), fetches live data and
//! normalizes it, falling back to mock data on any acquisition failure. The
//! result is published as one immutable value through a `watch` channel, so
//! readers never see a half-updated snapshot and never block the cycle.

use crate::coordinator::acquisition::AcquisitionClient;
use crate::coordinator::error::AcquisitionError;
use crate::fetch::http_fetcher::Fetch;
use crate::types::error::ConfigurationError;
use crate::types::monitor_target::MonitorTarget;
use crate::types::snapshot::{SnapshotData, TargetSnapshot};
use log::{debug, info, warn};
use std::sync::atomic::{AtomicBool, AtomicU32, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::MissedTickBehavior;

pub const DEFAULT_UPDATE_INTERVAL: Duration = Duration::from_secs(60);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordinatorState {
    /// No cycle has run yet.
    Idle,
    Fetching,
    /// The last cycle published live data.
    Ready,
    /// The last cycle published mock data after a provider failure.
    Degraded,
    /// Torn down; no further cycles run.
    Stopped,
}

/// What a call to [`PollingCoordinator::refresh`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// Live data was published.
    Live,
    /// Mock data was published because acquisition failed.
    Fallback,
    /// Another cycle was in flight, or the coordinator is stopped.
    Skipped,
    /// The coordinator was stopped while the cycle ran; its result was dropped.
    Discarded,
}

/// The consumer-facing read model.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Published {
    /// `None` until the first cycle completes.
    pub snapshot: Option<Arc<TargetSnapshot>>,
    /// Whether the last cycle produced data for consumers. Mock fallbacks count as success.
    pub last_update_success: bool,
}

pub type Listener = Arc<dyn Fn(&Published) + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

struct InFlight<'a>(&'a AtomicBool);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

struct Inner<F: Fetch> {
    target: MonitorTarget,
    client: AcquisitionClient<F>,
    state: Mutex<CoordinatorState>,
    resolved_id: Mutex<Option<String>>,
    in_flight: AtomicBool,
    stopped: AtomicBool,
    provider_failed: AtomicBool,
    consecutive_failures: AtomicU32,
    published: watch::Sender<Published>,
    listeners: Mutex<Vec<(ListenerId, Listener)>>,
    next_listener: AtomicU64,
}

impl<F: Fetch> Inner<F> {
    fn cached_id(&self) -> Option<String> {
        lock(&self.resolved_id).clone()
    }

    async fn acquire(&self) -> Result<SnapshotData, AcquisitionError> {
        let id = match self.cached_id() {
            Some(id) => id,
            None => {
                let id = self.client.resolve_target_id(&self.target).await?;
                *lock(&self.resolved_id) = Some(id.clone());
                id
            }
        };
        self.client.fetch_live(&self.target, &id).await
    }

    async fn run_cycle(&self) -> CycleOutcome {
        if self.stopped.load(Ordering::Acquire) {
            return CycleOutcome::Skipped;
        }
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            debug!("Cycle for {} already in flight", self.target);
            return CycleOutcome::Skipped;
        }
        let _in_flight = InFlight(&self.in_flight);
        self.set_state(CoordinatorState::Fetching);

        let result = self.acquire().await;

        let (snapshot, outcome, state) = match result {
            Ok(data) => {
                self.provider_failed.store(false, Ordering::Release);
                self.consecutive_failures.store(0, Ordering::Release);
                (TargetSnapshot::live(data), CycleOutcome::Live, CoordinatorState::Ready)
            }
            Err(e) => {
                warn!("Live data for {} unavailable, using mock data: {}", self.target, e);
                self.provider_failed.store(true, Ordering::Release);
                self.consecutive_failures.fetch_add(1, Ordering::AcqRel);
                let resolved = self.cached_id();
                let data = self.client.fallback(&self.target, resolved.as_deref());
                (TargetSnapshot::mock(data), CycleOutcome::Fallback, CoordinatorState::Degraded)
            }
        };

        let published = Published {
            snapshot: Some(Arc::new(snapshot)),
            last_update_success: true,
        };
        {
            let mut current = lock(&self.state);
            if self.stopped.load(Ordering::Acquire) || *current == CoordinatorState::Stopped {
                debug!("Discarding cycle result for stopped target {}", self.target);
                return CycleOutcome::Discarded;
            }
            *current = state;
            self.published.send_replace(published.clone());
        }
        self.notify(&published);
        outcome
    }

    fn set_state(&self, state: CoordinatorState) {
        let mut current = lock(&self.state);
        if *current != CoordinatorState::Stopped {
            *current = state;
        }
    }

    fn notify(&self, published: &Published) {
        let listeners: Vec<Listener> = lock(&self.listeners)
            .iter()
            .map(|(_, listener)| listener.clone())
            .collect();
        for listener in listeners {
            listener(published);
        }
    }
}

/// Drives fetch cycles for one [`MonitorTarget`] and holds its latest snapshot.
///
/// Cycles never overlap. Stopping cancels the timer; a cycle already in
/// flight completes but its result is not applied.
pub struct PollingCoordinator<F: Fetch> {
    inner: Arc<Inner<F>>,
    interval: Duration,
    stop_tx: watch::Sender<bool>,
    started: AtomicBool,
}

impl<F: Fetch> PollingCoordinator<F> {
    pub fn new(
        target: MonitorTarget,
        client: AcquisitionClient<F>,
        interval: Duration,
    ) -> Result<Self, ConfigurationError> {
        if interval.is_zero() {
            return Err(ConfigurationError::InvalidUpdateInterval);
        }
        let (published, _) = watch::channel(Published::default());
        let (stop_tx, _) = watch::channel(false);
        Ok(Self {
            inner: Arc::new(Inner {
                target,
                client,
                state: Mutex::new(CoordinatorState::Idle),
                resolved_id: Mutex::new(None),
                in_flight: AtomicBool::new(false),
                stopped: AtomicBool::new(false),
                provider_failed: AtomicBool::new(false),
                consecutive_failures: AtomicU32::new(0),
                published,
                listeners: Mutex::new(Vec::new()),
                next_listener: AtomicU64::new(0),
            }),
            interval,
            stop_tx,
            started: AtomicBool::new(false),
        })
    }

    pub fn target(&self) -> &MonitorTarget {
        &self.inner.target
    }

    pub fn update_interval(&self) -> Duration {
        self.interval
    }

    /// Spawns the timer task. The first cycle runs immediately. Calling
    /// `start` again, or after [`stop`](Self::stop), does nothing.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(&self) {
        if self.inner.stopped.load(Ordering::Acquire) || self.started.swap(true, Ordering::AcqRel) {
            return;
        }
        info!(
            "Starting coordinator for {} every {:?}",
            self.inner.target, self.interval
        );

        let inner = self.inner.clone();
        let period = self.interval;
        let mut stop_rx = self.stop_tx.subscribe();
        tokio::spawn(async move {
            let mut timer = tokio::time::interval(period);
            timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    _ = timer.tick() => {
                        inner.run_cycle().await;
                    }
                    changed = stop_rx.changed() => {
                        if changed.is_err() || *stop_rx.borrow() {
                            break;
                        }
                    }
                }
            }
            debug!("Coordinator task for {} finished", inner.target);
        });
    }

    /// Tears the coordinator down. Idempotent.
    pub fn stop(&self) {
        {
            let mut state = lock(&self.inner.state);
            if self.inner.stopped.swap(true, Ordering::AcqRel) {
                return;
            }
            *state = CoordinatorState::Stopped;
        }
        self.stop_tx.send_replace(true);
        info!("Stopped coordinator for {}", self.inner.target);
    }

    /// Runs one cycle now, unless one is already in flight.
    pub async fn refresh(&self) -> CycleOutcome {
        self.inner.run_cycle().await
    }

    /// The latest published snapshot and success flag. Never blocks on a cycle.
    pub fn current_snapshot(&self) -> Published {
        self.inner.published.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Published> {
        self.inner.published.subscribe()
    }

    /// Registers a callback invoked after every published cycle.
    pub fn on_update<C>(&self, callback: C) -> ListenerId
    where
        C: Fn(&Published) + Send + Sync + 'static,
    {
        let id = ListenerId(self.inner.next_listener.fetch_add(1, Ordering::Relaxed));
        lock(&self.inner.listeners).push((id, Arc::new(callback)));
        id
    }

    pub fn remove_listener(&self, id: ListenerId) -> bool {
        let mut listeners = lock(&self.inner.listeners);
        let before = listeners.len();
        listeners.retain(|(listener_id, _)| *listener_id != id);
        listeners.len() != before
    }

    pub fn state(&self) -> CoordinatorState {
        *lock(&self.inner.state)
    }

    /// True when the last cycle fell back to mock data.
    pub fn provider_failed(&self) -> bool {
        self.inner.provider_failed.load(Ordering::Acquire)
    }

    pub fn consecutive_failures(&self) -> u32 {
        self.inner.consecutive_failures.load(Ordering::Acquire)
    }

    /// The provider id in use once resolution has succeeded.
    pub fn resolved_id(&self) -> Option<String> {
        self.inner.cached_id()
    }
}

impl<F: Fetch> Drop for PollingCoordinator<F> {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::endpoints::Endpoints;
    use crate::fetch::stub::{StubFetcher, StubResponse};
    use crate::mock::generator::CONDITION_PHRASES_EN;
    use crate::normalize::normalizer::Normalizer;
    use crate::sections::directory::{SectionDirectory, DEFAULT_METADATA_MAX_AGE};
    use crate::types::language::Language;
    use crate::types::monitor_target::MonitorKind;
    use crate::types::snapshot::SnapshotOrigin;
    use chrono::TimeDelta;
    use serde_json::json;
    use std::sync::atomic::AtomicUsize;

    fn coordinator(
        fetcher: Arc<StubFetcher>,
        kind: MonitorKind,
        id: &str,
        language: Language,
    ) -> PollingCoordinator<StubFetcher> {
        let endpoints = Endpoints::default();
        let directory = Arc::new(SectionDirectory::new(
            fetcher.clone(),
            endpoints.clone(),
            None,
            DEFAULT_METADATA_MAX_AGE,
        ));
        let client = AcquisitionClient::new(fetcher, endpoints, directory, Normalizer::default());
        let target = MonitorTarget::new(kind, id, language).unwrap();
        PollingCoordinator::new(target, client, DEFAULT_UPDATE_INTERVAL).unwrap()
    }

    fn section_metadata() -> serde_json::Value {
        json!({"features": [
            {"properties": {"id": "00003_201_00000_1_0", "description": "Tie 3 Kantatie Hämeenlinna"}},
            {"properties": {"id": "00003_250_00000_1_0", "description": "Valtatie 3 3.250"}}
        ]})
    }

    fn section_forecasts(id: &str) -> serde_json::Value {
        json!({"forecastSections": [{
            "id": id,
            "description": "Valtatie 3 3.250",
            "forecasts": [
                {"type": "OBSERVATION", "time": "2024-01-10T08:00:00Z", "overallRoadCondition": "POOR_CONDITION"},
                {"type": "FORECAST", "time": "2024-01-10T10:00:00Z", "overallRoadCondition": "NORMAL_CONDITION"}
            ]
        }]})
    }

    #[tokio::test]
    async fn tms_timeout_publishes_mock_and_flags_failure() {
        let fetcher = Arc::new(StubFetcher::new());
        let coordinator = coordinator(fetcher, MonitorKind::Tms, "23001", Language::Fi);
        assert!(!coordinator.current_snapshot().last_update_success);

        assert_eq!(coordinator.refresh().await, CycleOutcome::Fallback);

        let published = coordinator.current_snapshot();
        assert!(published.last_update_success);
        let snapshot = published.snapshot.unwrap();
        assert_eq!(snapshot.origin, SnapshotOrigin::Mock);
        assert!(!snapshot.station().unwrap().is_empty());
        assert!(coordinator.provider_failed());
        assert_eq!(coordinator.state(), CoordinatorState::Degraded);
    }

    #[tokio::test]
    async fn conditions_without_network_use_english_mock() {
        let fetcher = Arc::new(StubFetcher::new());
        let coordinator = coordinator(fetcher, MonitorKind::Conditions, "E18_0_50", Language::En);

        assert_eq!(coordinator.refresh().await, CycleOutcome::Fallback);

        let snapshot = coordinator.current_snapshot().snapshot.unwrap();
        let report = snapshot.conditions().unwrap();
        assert!(CONDITION_PHRASES_EN.contains(&report.current.condition_text.as_str()));
        assert_eq!(report.current.location_label, "Tietokatu");
        assert_eq!(report.forecast.len(), 12);
        for pair in report.forecast.windows(2) {
            assert_eq!(pair[1].time - pair[0].time, TimeDelta::hours(2));
        }
        assert_eq!(coordinator.resolved_id(), None);
    }

    #[tokio::test]
    async fn resolves_once_and_publishes_live_conditions() {
        let endpoints = Endpoints::default();
        let fetcher = Arc::new(StubFetcher::new());
        fetcher.json(endpoints.forecast_sections(), section_metadata());
        fetcher.json(
            endpoints.section_forecasts("00003_250_00000_1_0"),
            section_forecasts("00003_250_00000_1_0"),
        );
        let coordinator =
            coordinator(fetcher.clone(), MonitorKind::Conditions, "Valtatie 3", Language::En);

        assert_eq!(coordinator.refresh().await, CycleOutcome::Live);
        assert_eq!(coordinator.refresh().await, CycleOutcome::Live);

        assert_eq!(coordinator.resolved_id().as_deref(), Some("00003_250_00000_1_0"));
        assert_eq!(fetcher.call_count(&endpoints.forecast_sections()), 1);
        let snapshot = coordinator.current_snapshot().snapshot.unwrap();
        assert_eq!(snapshot.origin, SnapshotOrigin::Live);
        let report = snapshot.conditions().unwrap();
        assert_eq!(report.current.condition_text, "Poor driving conditions");
        assert_eq!(report.forecast.len(), 1);
        assert_eq!(coordinator.state(), CoordinatorState::Ready);
    }

    #[tokio::test]
    async fn success_clears_the_failure_flag() {
        let endpoints = Endpoints::default();
        let fetcher = Arc::new(StubFetcher::new());
        let coordinator = coordinator(fetcher.clone(), MonitorKind::Weather, "1013", Language::Fi);

        coordinator.refresh().await;
        coordinator.refresh().await;
        assert_eq!(coordinator.consecutive_failures(), 2);

        fetcher.json(
            endpoints.weather_station_data("1013"),
            json!({"id": 1013, "sensorValues": [{"name": "ILMA", "value": -3.4, "unit": "°C"}]}),
        );
        assert_eq!(coordinator.refresh().await, CycleOutcome::Live);
        assert!(!coordinator.provider_failed());
        assert_eq!(coordinator.consecutive_failures(), 0);
        let snapshot = coordinator.current_snapshot().snapshot.unwrap();
        assert_eq!(snapshot.station().unwrap().measurements.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn overlapping_refreshes_are_single_flight() {
        let fetcher = Arc::new(StubFetcher::with_delay(Duration::from_secs(5)));
        let coordinator = coordinator(fetcher.clone(), MonitorKind::Weather, "1013", Language::Fi);

        let (first, second) = tokio::join!(coordinator.refresh(), coordinator.refresh());
        assert_eq!(first, CycleOutcome::Fallback);
        assert_eq!(second, CycleOutcome::Skipped);
        assert_eq!(fetcher.calls().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn results_after_stop_are_discarded() {
        let fetcher = Arc::new(StubFetcher::with_delay(Duration::from_secs(5)));
        let coordinator = coordinator(fetcher, MonitorKind::Weather, "1013", Language::Fi);

        let (outcome, _) = tokio::join!(coordinator.refresh(), async {
            tokio::time::sleep(Duration::from_secs(1)).await;
            coordinator.stop();
        });
        assert_eq!(outcome, CycleOutcome::Discarded);
        assert_eq!(coordinator.current_snapshot(), Published::default());
        assert_eq!(coordinator.state(), CoordinatorState::Stopped);
        assert_eq!(coordinator.refresh().await, CycleOutcome::Skipped);
    }

    #[tokio::test(start_paused = true)]
    async fn stop_flag_alone_discards_a_finishing_cycle() {
        let fetcher = Arc::new(StubFetcher::with_delay(Duration::from_secs(5)));
        let coordinator = coordinator(fetcher, MonitorKind::Weather, "1013", Language::Fi);

        let (outcome, _) = tokio::join!(coordinator.refresh(), async {
            tokio::time::sleep(Duration::from_secs(1)).await;
            coordinator.inner.stopped.store(true, Ordering::Release);
        });
        assert_eq!(outcome, CycleOutcome::Discarded);
        assert_eq!(coordinator.current_snapshot(), Published::default());
    }

    #[tokio::test]
    async fn malformed_payloads_fall_back_like_timeouts() {
        let endpoints = Endpoints::default();
        let fetcher = Arc::new(StubFetcher::new());
        fetcher.json(
            endpoints.weather_station_data("1013"),
            json!({"sensorValues": "oops"}),
        );
        let weather = coordinator(fetcher.clone(), MonitorKind::Weather, "1013", Language::En);

        assert_eq!(weather.refresh().await, CycleOutcome::Fallback);
        assert!(weather.provider_failed());
        let snapshot = weather.current_snapshot().snapshot.unwrap();
        assert_eq!(snapshot.origin, SnapshotOrigin::Mock);
        assert!(snapshot.station().unwrap().measurements.contains_key("ILMA"));

        fetcher.respond(endpoints.tms_station("23001"), StubResponse::Timeout);
        fetcher.json(
            endpoints.tms_sensor_constants("23001"),
            json!({"sensorConstantValues": []}),
        );
        fetcher.json(endpoints.tms_data("23001"), json!([1, 2, 3]));
        let tms = coordinator(fetcher, MonitorKind::Tms, "23001", Language::En);
        assert_eq!(tms.refresh().await, CycleOutcome::Fallback);
        assert_eq!(tms.state(), CoordinatorState::Degraded);
        assert!(!tms.current_snapshot().snapshot.unwrap().station().unwrap().is_empty());
    }

    #[tokio::test]
    async fn listeners_are_notified_until_removed() {
        let fetcher = Arc::new(StubFetcher::new());
        let coordinator = coordinator(fetcher, MonitorKind::Weather, "1013", Language::Fi);
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let id = coordinator.on_update(move |published| {
            assert!(published.snapshot.is_some());
            counter.fetch_add(1, Ordering::SeqCst);
        });
        let updates = coordinator.subscribe();

        coordinator.refresh().await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(updates.has_changed().unwrap());

        assert!(coordinator.remove_listener(id));
        assert!(!coordinator.remove_listener(id));
        coordinator.refresh().await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn timer_runs_a_cycle_per_interval_until_stopped() {
        let endpoints = Endpoints::default();
        let fetcher = Arc::new(StubFetcher::new());
        let coordinator = coordinator(fetcher.clone(), MonitorKind::Weather, "1013", Language::Fi);
        let url = endpoints.weather_station_data("1013");

        coordinator.start();
        coordinator.start();
        tokio::time::sleep(Duration::from_secs(125)).await;
        assert_eq!(fetcher.call_count(&url), 3);

        coordinator.stop();
        tokio::time::sleep(Duration::from_secs(300)).await;
        assert_eq!(fetcher.call_count(&url), 3);
        assert_eq!(coordinator.state(), CoordinatorState::Stopped);
    }

    #[test]
    fn zero_interval_is_rejected() {
        let fetcher = Arc::new(StubFetcher::new());
        let endpoints = Endpoints::default();
        let directory = Arc::new(SectionDirectory::new(
            fetcher.clone(),
            endpoints.clone(),
            None,
            DEFAULT_METADATA_MAX_AGE,
        ));
        let client = AcquisitionClient::new(fetcher, endpoints, directory, Normalizer::default());
        let target = MonitorTarget::new(MonitorKind::Tms, "23001", Language::Fi).unwrap();
        let Err(error) = PollingCoordinator::new(target, client, Duration::ZERO) else {
            panic!("zero interval accepted");
        };
        assert_eq!(error, ConfigurationError::InvalidUpdateInterval);
        assert_eq!(error.to_string(), "Update interval must be greater than zero");
    }
}
