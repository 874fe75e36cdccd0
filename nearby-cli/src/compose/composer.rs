//! Per-screen composer of static and live results
//!
//! The current view lives in a `watch` channel. Every live fetch is tagged
//! with the screen and a generation number; a fetch only publishes if its
//! tag still matches the view when the result arrives, checked under the
//! channel lock. Radius changes, route changes and teardown all bump the
//! generation, so late results for an old query are dropped.
//!
//! Methods that start a fetch spawn onto the current tokio runtime and must
//! be called from within one.

use futures::FutureExt;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use uuid::Uuid;

use super::view::{ComposerState, LiveSection, ResultsView, ScreenId};
use crate::api::{ProviderRecord, SearchBackend, SearchError, SearchQuery};
use crate::catalog;
use crate::config::SearchConfig;
use crate::geo::{Coordinate, RadiusPreset, UnlocatedPolicy, filter_within_radius};
use crate::location::{LocationError, LocationProvider};
use crate::services::classification::Classification;

/// Owns the results view of one screen visit
pub struct ResultsComposer {
    screen: ScreenId,
    backend: Arc<dyn SearchBackend>,
    unlocated: UnlocatedPolicy,
    view: Arc<watch::Sender<ResultsView>>,
    in_flight: Option<JoinHandle<()>>,
}

impl ResultsComposer {
    /// Create a composer in `AwaitingLocation` with the static slot filled
    pub fn new(
        route: Classification,
        static_entries: Arc<[ProviderRecord]>,
        backend: Arc<dyn SearchBackend>,
        radius: RadiusPreset,
        config: &SearchConfig,
    ) -> Self {
        let screen = Uuid::new_v4();
        let (view, _initial) =
            watch::channel(ResultsView::new(screen, route, static_entries, radius));

        log::debug!("Screen {} opened", screen);

        Self {
            screen,
            backend,
            unlocated: config.unlocated,
            view: Arc::new(view),
            in_flight: None,
        }
    }

    /// Create a composer using the compiled-in catalog and the configured default radius
    pub fn for_route(
        route: Classification,
        backend: Arc<dyn SearchBackend>,
        config: &SearchConfig,
    ) -> Self {
        let static_entries = catalog::static_for(&route);
        Self::new(route, static_entries, backend, config.default_radius, config)
    }

    pub fn screen(&self) -> ScreenId {
        self.screen
    }

    /// Snapshot of the current view
    pub fn view(&self) -> ResultsView {
        self.view.borrow().clone()
    }

    pub fn state(&self) -> ComposerState {
        self.view.borrow().state
    }

    /// Receiver notified on every published view
    pub fn subscribe(&self) -> watch::Receiver<ResultsView> {
        self.view.subscribe()
    }

    /// Acquire the user's coordinate and move on from `AwaitingLocation`
    pub async fn start(&mut self, location: &dyn LocationProvider) {
        let result = location.current_location().await;
        self.set_location(result);
    }

    /// Apply the outcome of a location request
    pub fn set_location(&mut self, result: Result<Coordinate, LocationError>) {
        match result {
            Ok(origin) => {
                self.view.send_modify(|view| {
                    view.origin = Some(origin);
                    view.banner = None;
                });
                self.restart_fetch();
            }
            Err(err) => {
                log::warn!("Screen {}: {}", self.screen, err);
                self.cancel_in_flight();
                self.view.send_modify(|view| {
                    view.generation += 1;
                    view.origin = None;
                    view.state = ComposerState::LocationDenied;
                    view.live = LiveSection::Idle;
                    view.banner = Some(err.banner().to_string());
                });
            }
        }
    }

    /// Select another radius, discarding current live results
    pub fn set_radius(&mut self, radius: RadiusPreset) {
        let changed = self.view.send_if_modified(|view| {
            if view.radius == radius {
                return false;
            }
            view.radius = radius;
            true
        });

        if changed {
            log::debug!("Screen {}: radius changed to {}", self.screen, radius);
            self.restart_fetch();
        }
    }

    /// Switch to another route, swapping the static slot and discarding live results
    pub fn set_route(&mut self, route: Classification, static_entries: Arc<[ProviderRecord]>) {
        log::debug!("Screen {}: route changed to {}", self.screen, route.route_path());
        self.view.send_modify(|view| {
            view.route = route;
            view.static_entries = static_entries;
        });
        self.restart_fetch();
    }

    /// Run the live search again after a failure
    pub fn retry(&mut self) {
        if self.state() == ComposerState::LiveFailed {
            self.restart_fetch();
        }
    }

    /// Tear the screen down, dropping any in-flight result
    pub fn teardown(self) {
        drop(self);
    }

    fn cancel_in_flight(&mut self) {
        if let Some(handle) = self.in_flight.take() {
            handle.abort();
        }
    }

    /// Start a fresh live fetch if a coordinate is known
    ///
    /// Without a coordinate only the live slot is reset; the fetch starts
    /// once `set_location` succeeds.
    fn restart_fetch(&mut self) {
        self.cancel_in_flight();

        let mut pending = None;
        self.view.send_modify(|view| {
            view.generation += 1;
            match view.origin {
                Some(origin) => {
                    view.state = ComposerState::FetchingLive;
                    view.live = LiveSection::Loading;
                    pending = Some((
                        view.generation,
                        SearchQuery {
                            origin,
                            radius: view.radius,
                            domain: view.route.domain,
                            route_slug: view.route.route_slug.clone(),
                        },
                    ));
                }
                None => view.live = LiveSection::Idle,
            }
        });

        let Some((generation, query)) = pending else {
            return;
        };

        let screen = self.screen;
        let backend = Arc::clone(&self.backend);
        let sender = Arc::clone(&self.view);
        let policy = self.unlocated;

        log::debug!(
            "Screen {} generation {}: fetching '{}' within {}",
            screen,
            generation,
            query.route_slug,
            query.radius
        );

        self.in_flight = Some(tokio::spawn(async move {
            let outcome = AssertUnwindSafe(backend.search(&query))
                .catch_unwind()
                .await
                .unwrap_or_else(|payload| {
                    Err(SearchError::Panicked(panic_message(payload.as_ref())))
                })
                .map(|records| {
                    filter_within_radius(query.origin, records, query.radius.km(), policy)
                });

            let applied = sender.send_if_modified(|view| {
                if view.screen != screen || view.generation != generation {
                    return false;
                }
                match outcome {
                    Ok(entries) => {
                        log::debug!(
                            "Screen {} generation {}: {} live results",
                            screen,
                            generation,
                            entries.len()
                        );
                        view.state = ComposerState::LiveReady;
                        view.live = LiveSection::Ready(entries);
                    }
                    Err(err) => {
                        log::warn!("Screen {}: live search failed: {}", screen, err);
                        view.state = ComposerState::LiveFailed;
                        view.live = LiveSection::Failed(err.to_string());
                    }
                }
                true
            });

            if !applied {
                log::debug!(
                    "Screen {} generation {}: discarding stale live results",
                    screen,
                    generation
                );
            }
        }));
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}

impl Drop for ResultsComposer {
    fn drop(&mut self) {
        self.cancel_in_flight();
        // Invalidate anything that slipped past the abort
        self.view.send_modify(|view| view.generation += 1);
        log::debug!("Screen {} closed", self.screen);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::{DeniedLocation, FixedLocation};
    use crate::services::classification::classify;
    use crate::taxonomy::Domain;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    type Reply = (Duration, Result<Vec<ProviderRecord>, SearchError>);
    type Responder = Box<dyn Fn(&SearchQuery, usize) -> Reply + Send + Sync>;

    /// Backend answering from a closure after a per-call delay
    struct ScriptedBackend {
        calls: AtomicUsize,
        queries: Mutex<Vec<SearchQuery>>,
        respond: Responder,
    }

    impl ScriptedBackend {
        fn new(respond: Responder) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                queries: Mutex::new(Vec::new()),
                respond,
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl SearchBackend for ScriptedBackend {
        async fn search(&self, query: &SearchQuery) -> Result<Vec<ProviderRecord>, SearchError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            self.queries.lock().unwrap().push(query.clone());
            let (delay, result) = (self.respond)(query, call);
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            result
        }
    }

    fn origin() -> Coordinate {
        Coordinate::new(17.3850, 78.4867).unwrap()
    }

    fn record(name: &str, at: Option<(f64, f64)>) -> ProviderRecord {
        ProviderRecord {
            id: Some(name.to_string()),
            name: Some(name.to_string()),
            latitude: at.map(|(lat, _)| lat),
            longitude: at.map(|(_, lon)| lon),
            ..Default::default()
        }
    }

    fn statics() -> Arc<[ProviderRecord]> {
        Arc::from(vec![record("static-a", None), record("static-b", None)])
    }

    /// ~1.1 km, ~12.8 km and unlocated, in that order
    fn mixed_records() -> Vec<ProviderRecord> {
        vec![
            record("far", Some((17.5000, 78.4867))),
            record("near", Some((17.3950, 78.4867))),
            record("nowhere", None),
        ]
    }

    fn composer(backend: Arc<ScriptedBackend>, radius: RadiusPreset) -> ResultsComposer {
        ResultsComposer::new(
            classify("Biryani"),
            statics(),
            backend,
            radius,
            &SearchConfig::default(),
        )
    }

    async fn settled(rx: &mut watch::Receiver<ResultsView>) -> ResultsView {
        let view = tokio::time::timeout(
            Duration::from_secs(2),
            rx.wait_for(|view| view.state.is_terminal()),
        )
        .await
        .expect("composer did not settle")
        .expect("composer dropped");
        view.clone()
    }

    fn live_names(view: &ResultsView) -> Vec<String> {
        view.live_entries()
            .iter()
            .map(|e| e.item.display_name().to_string())
            .collect()
    }

    #[tokio::test]
    async fn test_initial_view_shows_static_only() {
        let backend = ScriptedBackend::new(Box::new(|_, _| (Duration::ZERO, Ok(Vec::new()))));
        let composer = composer(backend.clone(), RadiusPreset::Km5);

        let view = composer.view();
        assert_eq!(view.state, ComposerState::AwaitingLocation);
        assert_eq!(view.static_entries.len(), 2);
        assert_eq!(view.live, LiveSection::Idle);
        assert_eq!(view.screen, composer.screen());
        assert_eq!(backend.calls(), 0);
    }

    #[tokio::test]
    async fn test_location_denied_keeps_static_section() {
        let backend = ScriptedBackend::new(Box::new(|_, _| (Duration::ZERO, Ok(mixed_records()))));
        let mut composer = composer(backend.clone(), RadiusPreset::Km5);

        composer
            .start(&DeniedLocation(LocationError::PermissionDenied))
            .await;

        let view = composer.view();
        assert_eq!(view.state, ComposerState::LocationDenied);
        assert_eq!(view.static_entries.len(), 2);
        assert!(view.banner.is_some());
        assert!(view.live_entries().is_empty());
        assert_eq!(backend.calls(), 0);

        // Radius changes without a location do not fetch
        composer.set_radius(RadiusPreset::Km10);
        assert_eq!(composer.state(), ComposerState::LocationDenied);
        assert_eq!(backend.calls(), 0);
    }

    #[tokio::test]
    async fn test_live_results_filtered_by_radius_in_backend_order() {
        let backend = ScriptedBackend::new(Box::new(|_, _| (Duration::ZERO, Ok(mixed_records()))));
        let mut composer = composer(backend.clone(), RadiusPreset::Km5);
        let mut rx = composer.subscribe();

        composer.start(&FixedLocation(origin())).await;
        assert_eq!(composer.state(), ComposerState::FetchingLive);
        assert!(composer.view().is_loading());

        let view = settled(&mut rx).await;
        assert_eq!(view.state, ComposerState::LiveReady);
        assert_eq!(live_names(&view), vec!["near"]);
        assert_eq!(view.live_entries()[0].distance_text().as_deref(), Some("1.1 km"));

        let query = backend.queries.lock().unwrap()[0].clone();
        assert_eq!(query.radius, RadiusPreset::Km5);
        assert_eq!(query.domain, Domain::Food);
        assert_eq!(query.route_slug.as_str(), "biryani");
    }

    #[tokio::test]
    async fn test_wider_radius_keeps_backend_order() {
        let backend = ScriptedBackend::new(Box::new(|_, _| (Duration::ZERO, Ok(mixed_records()))));
        let mut composer = composer(backend, RadiusPreset::Km25);
        let mut rx = composer.subscribe();

        composer.start(&FixedLocation(origin())).await;
        let view = settled(&mut rx).await;

        // Not re-sorted by distance
        assert_eq!(live_names(&view), vec!["far", "near"]);
    }

    #[tokio::test]
    async fn test_unlocated_policy_from_config() {
        let backend = ScriptedBackend::new(Box::new(|_, _| (Duration::ZERO, Ok(mixed_records()))));
        let config = SearchConfig::builder()
            .unlocated(UnlocatedPolicy::AppendUnranked)
            .build();
        let mut composer = ResultsComposer::new(
            classify("Biryani"),
            statics(),
            backend,
            RadiusPreset::Km5,
            &config,
        );
        let mut rx = composer.subscribe();

        composer.start(&FixedLocation(origin())).await;
        let view = settled(&mut rx).await;
        assert_eq!(live_names(&view), vec!["near", "nowhere"]);
    }

    #[tokio::test]
    async fn test_static_always_rendered_before_live() {
        let backend = ScriptedBackend::new(Box::new(|_, _| (Duration::ZERO, Ok(mixed_records()))));
        let mut composer = composer(backend, RadiusPreset::Km25);
        let mut rx = composer.subscribe();

        // Before the fetch resolves
        let rendered_names = |view: &ResultsView| -> Vec<(String, bool)> {
            view.rendered()
                .iter()
                .map(|r| (r.record().display_name().to_string(), r.is_live()))
                .collect()
        };
        assert_eq!(
            rendered_names(&composer.view()),
            vec![("static-a".to_string(), false), ("static-b".to_string(), false)]
        );

        composer.start(&FixedLocation(origin())).await;
        let view = settled(&mut rx).await;
        let rendered = rendered_names(&view);
        assert_eq!(rendered.len(), 4);
        let first_live = rendered.iter().position(|(_, live)| *live).unwrap();
        assert_eq!(first_live, 2);
        assert!(rendered[first_live..].iter().all(|(_, live)| *live));
    }

    #[tokio::test]
    async fn test_fetch_failure_is_section_local_and_retryable() {
        let backend = ScriptedBackend::new(Box::new(|_, call| {
            if call == 0 {
                (Duration::ZERO, Err(SearchError::Status(502)))
            } else {
                (Duration::ZERO, Ok(mixed_records()))
            }
        }));
        let mut composer = composer(backend.clone(), RadiusPreset::Km5);
        let mut rx = composer.subscribe();

        composer.start(&FixedLocation(origin())).await;
        let view = settled(&mut rx).await;
        assert_eq!(view.state, ComposerState::LiveFailed);
        assert_eq!(view.error(), Some("Search backend returned HTTP 502"));
        assert_eq!(view.static_entries.len(), 2);
        assert!(view.banner.is_none());

        composer.retry();
        assert_eq!(composer.state(), ComposerState::FetchingLive);
        let view = settled(&mut rx).await;
        assert_eq!(view.state, ComposerState::LiveReady);
        assert_eq!(live_names(&view), vec!["near"]);
        assert_eq!(backend.calls(), 2);
    }

    #[tokio::test]
    async fn test_retry_only_after_failure() {
        let backend = ScriptedBackend::new(Box::new(|_, _| (Duration::ZERO, Ok(Vec::new()))));
        let mut composer = composer(backend.clone(), RadiusPreset::Km5);
        composer.retry();
        assert_eq!(composer.state(), ComposerState::AwaitingLocation);
        assert_eq!(backend.calls(), 0);
    }

    #[tokio::test]
    async fn test_radius_change_rejects_stale_fetch() {
        // The 5 km search is slow, the 10 km one fast
        let backend = ScriptedBackend::new(Box::new(|query, _| {
            if query.radius == RadiusPreset::Km5 {
                (
                    Duration::from_millis(150),
                    Ok(vec![record("five", Some((17.3860, 78.4867)))]),
                )
            } else {
                (
                    Duration::from_millis(10),
                    Ok(vec![record("ten", Some((17.3870, 78.4867)))]),
                )
            }
        }));
        let mut composer = composer(backend.clone(), RadiusPreset::Km5);
        let mut rx = composer.subscribe();

        composer.start(&FixedLocation(origin())).await;
        tokio::task::yield_now().await;
        composer.set_radius(RadiusPreset::Km10);

        let view = settled(&mut rx).await;
        assert_eq!(view.radius, RadiusPreset::Km10);
        assert_eq!(live_names(&view), vec!["ten"]);

        // Give the old request time to have arrived
        tokio::time::sleep(Duration::from_millis(250)).await;
        let view = composer.view();
        assert_eq!(view.radius, RadiusPreset::Km10);
        assert_eq!(live_names(&view), vec!["ten"]);
    }

    #[tokio::test]
    async fn test_same_radius_does_not_refetch() {
        let backend = ScriptedBackend::new(Box::new(|_, _| (Duration::ZERO, Ok(mixed_records()))));
        let mut composer = composer(backend.clone(), RadiusPreset::Km5);
        let mut rx = composer.subscribe();

        composer.start(&FixedLocation(origin())).await;
        settled(&mut rx).await;
        composer.set_radius(RadiusPreset::Km5);
        assert_eq!(composer.state(), ComposerState::LiveReady);
        assert_eq!(backend.calls(), 1);
    }

    #[tokio::test]
    async fn test_route_change_rejects_stale_fetch() {
        // The first route's search is slow, the second one fast
        let backend = ScriptedBackend::new(Box::new(|query, _| {
            let name = format!("live-{}", query.route_slug);
            let delay = if query.route_slug.as_str() == "biryani" {
                Duration::from_millis(150)
            } else {
                Duration::from_millis(10)
            };
            (delay, Ok(vec![record(&name, Some((17.3860, 78.4867)))]))
        }));
        let mut composer = composer(backend.clone(), RadiusPreset::Km5);
        let mut rx = composer.subscribe();

        composer.start(&FixedLocation(origin())).await;
        tokio::task::yield_now().await;
        composer.set_route(classify("Salon"), Arc::from(vec![record("static-salon", None)]));

        let mut seen = Vec::new();
        let view = tokio::time::timeout(Duration::from_secs(2), async {
            loop {
                let view = rx.borrow_and_update().clone();
                seen.extend(live_names(&view));
                if view.state.is_terminal() {
                    return view;
                }
                rx.changed().await.expect("composer dropped");
            }
        })
        .await
        .expect("composer did not settle");
        assert_eq!(view.route.domain, Domain::Beauty);
        assert_eq!(live_names(&view), vec!["live-salon"]);

        // Give the old request time to have arrived
        tokio::time::sleep(Duration::from_millis(250)).await;
        let view = composer.view();
        assert_eq!(live_names(&view), vec!["live-salon"]);
        assert_eq!(view.static_entries[0].display_name(), "static-salon");
        assert!(seen.iter().all(|name| name == "live-salon"), "saw {:?}", seen);
        assert_eq!(backend.calls(), 2);
    }

    #[tokio::test]
    async fn test_backend_panic_fails_live_section_only() {
        let backend = ScriptedBackend::new(Box::new(|_, call| {
            if call == 0 {
                panic!("backend exploded");
            }
            (Duration::ZERO, Ok(mixed_records()))
        }));
        let mut composer = composer(backend.clone(), RadiusPreset::Km5);
        let mut rx = composer.subscribe();

        composer.start(&FixedLocation(origin())).await;
        let view = settled(&mut rx).await;
        assert_eq!(view.state, ComposerState::LiveFailed);
        assert!(view.error().unwrap().contains("backend exploded"));
        assert_eq!(view.static_entries.len(), 2);

        composer.retry();
        let view = settled(&mut rx).await;
        assert_eq!(view.state, ComposerState::LiveReady);
        assert_eq!(live_names(&view), vec!["near"]);
    }

    #[tokio::test]
    async fn test_route_change_discards_live_and_swaps_static() {
        let backend = ScriptedBackend::new(Box::new(|query, _| {
            let name = format!("live-{}", query.route_slug);
            (Duration::ZERO, Ok(vec![record(&name, Some((17.3860, 78.4867)))]))
        }));
        let mut composer = composer(backend.clone(), RadiusPreset::Km5);
        let mut rx = composer.subscribe();

        composer.start(&FixedLocation(origin())).await;
        let view = settled(&mut rx).await;
        assert_eq!(live_names(&view), vec!["live-biryani"]);

        let route = classify("Salon");
        composer.set_route(route, Arc::from(vec![record("static-salon", None)]));
        let view = composer.view();
        assert_eq!(view.state, ComposerState::FetchingLive);
        assert!(view.live_entries().is_empty());
        assert_eq!(view.static_entries[0].display_name(), "static-salon");

        let view = settled(&mut rx).await;
        assert_eq!(view.route.domain, Domain::Beauty);
        assert_eq!(live_names(&view), vec!["live-salon"]);
        assert_eq!(backend.calls(), 2);
    }

    #[tokio::test]
    async fn test_teardown_discards_in_flight_results() {
        let backend = ScriptedBackend::new(Box::new(|_, _| {
            (Duration::from_millis(50), Ok(mixed_records()))
        }));
        let mut composer = composer(backend.clone(), RadiusPreset::Km5);
        let mut rx = composer.subscribe();

        composer.start(&FixedLocation(origin())).await;
        tokio::task::yield_now().await;
        composer.teardown();

        // Channel closes without ever publishing the live results
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_ne!(rx.borrow().state, ComposerState::LiveReady);
        let drained = tokio::time::timeout(Duration::from_secs(2), async {
            while rx.changed().await.is_ok() {
                assert_ne!(rx.borrow_and_update().state, ComposerState::LiveReady);
            }
        })
        .await;
        assert!(drained.is_ok(), "channel never closed");
    }

    #[tokio::test]
    async fn test_location_update_after_denial_fetches() {
        let backend = ScriptedBackend::new(Box::new(|_, _| (Duration::ZERO, Ok(mixed_records()))));
        let mut composer = composer(backend.clone(), RadiusPreset::Km5);
        let mut rx = composer.subscribe();

        composer.set_location(Err(LocationError::Unavailable("no fix".to_string())));
        assert_eq!(composer.state(), ComposerState::LocationDenied);

        composer.set_location(Ok(origin()));
        let view = settled(&mut rx).await;
        assert_eq!(view.state, ComposerState::LiveReady);
        assert!(view.banner.is_none());
        assert_eq!(backend.calls(), 1);
    }

    #[tokio::test]
    async fn test_for_route_uses_catalog_and_default_radius() {
        let backend = ScriptedBackend::new(Box::new(|_, _| (Duration::ZERO, Ok(Vec::new()))));
        let config = SearchConfig::builder()
            .default_radius(RadiusPreset::Km10)
            .build();
        let composer = ResultsComposer::for_route(classify("Biryani"), backend, &config);
        let view = composer.view();
        assert_eq!(view.radius, RadiusPreset::Km10);
        assert_eq!(
            view.static_entries.len(),
            catalog::static_catalog(Domain::Food).len()
        );
    }
}
