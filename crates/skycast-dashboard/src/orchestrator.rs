//! Location data orchestrator.
//!
//! One call to [`Orchestrator::handle_new_location`] fans out to every
//! provider for the selected city:
//!
//! - weather and forecast run concurrently and are joined; either failing
//!   fails the whole load
//! - air quality and news are detached tasks whose outcome only touches
//!   their own region
//!
//! Each call takes a new generation number. Results that arrive after a newer
//! location was selected are dropped instead of overwriting fresher data.
//! In-flight requests are never cancelled; they run to completion (or their
//! timeout) and are then discarded.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio_util::task::TaskTracker;
use tracing::Instrument;

use skycast_weather::geocode::SUGGESTION_LIMIT;
use skycast_weather::{Coordinates, Location, ProviderError};

use crate::providers::Providers;
use crate::render::{ForecastView, NewsView, RenderSink, Severity};
use crate::session::{SavedLocation, Session};

/// Shortest query sent to the geocoder.
pub const MIN_QUERY_LEN: usize = 3;

pub const LOADED_MESSAGE: &str = "Weather data loaded";

/// How a location change ended.
#[derive(Debug, Clone, PartialEq)]
pub enum LocationOutcome {
    Loaded(Location),
    Failed(ProviderError),
    /// A newer location was selected before this one finished.
    Superseded,
}

impl LocationOutcome {
    pub fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded(_))
    }

    /// A superseded flow becomes [`ProviderError::Cancelled`].
    pub fn into_result(self) -> Result<Location, ProviderError> {
        match self {
            Self::Loaded(location) => Ok(location),
            Self::Failed(e) => Err(e),
            Self::Superseded => Err(ProviderError::Cancelled),
        }
    }
}

/// Result of a city search.
#[derive(Debug, Clone, PartialEq)]
pub enum Suggestions {
    TooShort,
    Matches(Vec<Location>),
    NoMatches,
    Failed(ProviderError),
}

pub struct Orchestrator {
    providers: Providers,
    sink: Arc<dyn RenderSink>,
    session: Session,
    generation: Arc<AtomicU64>,
    tasks: TaskTracker,
}

impl Orchestrator {
    pub fn new(providers: Providers, sink: Arc<dyn RenderSink>, session: Session) -> Self {
        Self {
            providers,
            sink,
            session,
            generation: Arc::new(AtomicU64::new(0)),
            tasks: TaskTracker::new(),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Load everything for `location` and push it to the sink.
    pub async fn handle_new_location(&self, location: Location) -> LocationOutcome {
        let generation = self.next_generation();
        let span = tracing::info_span!("location", name = %location.display_name, generation);

        let outcome = {
            let _loading = LoadingGuard::start(self.sink.clone(), self.generation.clone(), generation);
            self.load(&location, generation).instrument(span.clone()).await
        };

        let _entered = span.enter();
        match &outcome {
            LocationOutcome::Loaded(_) => {
                tracing::info!("Location loaded");
                self.sink.notify(LOADED_MESSAGE, Severity::Success);
            }
            LocationOutcome::Failed(e) => {
                self.sink.notify(e.user_message(), Severity::Error);
            }
            LocationOutcome::Superseded => {
                tracing::debug!("Location superseded, results discarded");
            }
        }
        outcome
    }

    async fn load(&self, location: &Location, generation: u64) -> LocationOutcome {
        // Everything up to the first await runs before any request is sent
        self.sink.show_air_quality(None);
        self.sink.show_forecast(&ForecastView::default());
        self.sink.show_news(&NewsView::Loading {
            city: location.primary_name().to_string(),
        });

        let coords = location.coordinates();
        self.spawn_air_quality(coords, generation);

        let weather = &self.providers.weather;
        let (snapshot, forecast) = tokio::join!(
            weather.fetch_current_weather(&coords),
            weather.fetch_forecast(&coords)
        );

        if !self.is_current(generation) {
            return LocationOutcome::Superseded;
        }

        let (snapshot, forecast) = match snapshot.and_then(|s| forecast.map(|f| (s, f))) {
            Ok(pair) => pair,
            Err(e) => {
                tracing::warn!("Failed to fetch weather data: {}", e);
                self.report_failure(&e);
                return LocationOutcome::Failed(e);
            }
        };

        self.sink.show_weather(&snapshot, &location.display_name);
        self.sink.show_forecast(&ForecastView::from_series(&forecast));
        self.spawn_news(location.primary_name().to_string(), generation);
        self.update_globe(location);

        if let Err(e) = self.session.save(location) {
            tracing::warn!("Failed to persist session: {}", e);
        }

        LocationOutcome::Loaded(location.clone())
    }

    /// Resolve a typed city name through the current-weather endpoint, then
    /// load it like any other location.
    ///
    /// The lookup takes its own generation, so a newer selection (including a
    /// failed one) wins over a slower, older lookup.
    pub async fn handle_city_name(&self, name: &str) -> LocationOutcome {
        let name = name.trim();
        let generation = self.next_generation();
        let loading = LoadingGuard::start(self.sink.clone(), self.generation.clone(), generation);

        let resolved = self.resolve_name(name).await;

        if !self.is_current(generation) {
            tracing::debug!("Name lookup for {:?} superseded", name);
            return LocationOutcome::Superseded;
        }

        match resolved {
            Ok(location) => {
                // Loading stays on through the hand-off; the new flow owns it from here
                let outcome = self.handle_new_location(location).await;
                drop(loading);
                outcome
            }
            Err(e) => {
                tracing::warn!("Could not resolve {:?}: {}", name, e);
                self.report_failure(&e);
                drop(loading);
                self.sink.notify(e.user_message(), Severity::Error);
                LocationOutcome::Failed(e)
            }
        }
    }

    async fn resolve_name(&self, name: &str) -> Result<Location, ProviderError> {
        if name.is_empty() {
            return Err(ProviderError::NotFound);
        }

        let snapshot = self
            .providers
            .weather
            .fetch_current_weather_by_name(name)
            .await?;
        let display_name = snapshot.place_name.unwrap_or_else(|| name.to_string());
        Location::validated(display_name, snapshot.latitude, snapshot.longitude)
            .map_err(|e| ProviderError::Malformed(e.to_string()))
    }

    /// City suggestions for the search box.
    pub async fn suggest(&self, query: &str) -> Suggestions {
        let query = query.trim();
        if query.chars().count() < MIN_QUERY_LEN {
            return Suggestions::TooShort;
        }

        match self.providers.geocoding.search(query, SUGGESTION_LIMIT).await {
            Ok(matches) if matches.is_empty() => Suggestions::NoMatches,
            Ok(matches) => Suggestions::Matches(matches),
            Err(e) => {
                tracing::error!("Suggestion fetch error: {}", e);
                Suggestions::Failed(e)
            }
        }
    }

    /// Reload whatever the previous run saved. `None` when nothing was saved.
    pub async fn restore_session(&self) -> Option<LocationOutcome> {
        let outcome = match self.session.load()? {
            SavedLocation::Resolved(location) => {
                tracing::info!("Restoring last location: {}", location.display_name);
                self.handle_new_location(location).await
            }
            SavedLocation::NameOnly(name) => {
                tracing::info!("Restoring last city by name: {}", name);
                self.handle_city_name(&name).await
            }
        };
        Some(outcome)
    }

    /// Wait for every detached air-quality and news task spawned so far.
    pub async fn wait_idle(&self) {
        self.tasks.close();
        self.tasks.wait().await;
        self.tasks.reopen();
    }

    fn next_generation(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn is_current(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == generation
    }

    /// Weather fields back to placeholders, the message in the location
    /// field, and the news region back to idle since no news fetch follows.
    fn report_failure(&self, error: &ProviderError) {
        self.sink.reset_weather_fields();
        self.sink.show_location_message(error.user_message());
        self.sink.show_news(&NewsView::Idle);
    }

    fn update_globe(&self, location: &Location) {
        match location.check_coordinates() {
            Ok(()) => self.sink.show_globe_marker(location),
            Err(e) => {
                tracing::warn!("Error updating globe: {}", e);
                self.sink.hide_globe_marker();
            }
        }
    }

    fn spawn_air_quality(&self, coords: Coordinates, generation: u64) {
        let client = self.providers.air_quality.clone();
        let sink = self.sink.clone();
        let current = self.generation.clone();

        self.tasks.spawn(
            async move {
                let result = client.fetch_air_quality(&coords).await;
                if current.load(Ordering::SeqCst) != generation {
                    tracing::debug!("Discarding stale air quality result");
                    return;
                }
                match result {
                    Ok(sample) => sink.show_air_quality(Some(&sample)),
                    Err(e) => {
                        tracing::warn!("AQI fetch error: {}", e);
                        sink.show_air_quality(None);
                    }
                }
            }
            .in_current_span(),
        );
    }

    fn spawn_news(&self, city: String, generation: u64) {
        let client = self.providers.news.clone();
        let sink = self.sink.clone();
        let current = self.generation.clone();

        self.tasks.spawn(
            async move {
                let result = client.fetch_news(&city).await;
                if current.load(Ordering::SeqCst) != generation {
                    tracing::debug!("Discarding stale news for {}", city);
                    return;
                }
                let view = match result {
                    Ok(articles) if articles.is_empty() => NewsView::Empty { city },
                    Ok(articles) => NewsView::Articles(articles),
                    Err(e) => {
                        tracing::warn!("News fetch error: {}", e);
                        NewsView::Unavailable
                    }
                };
                sink.show_news(&view);
            }
            .in_current_span(),
        );
    }
}

/// Sets the loading flag on creation and clears it on drop, unless a newer
/// location has taken over the flag in the meantime.
struct LoadingGuard {
    sink: Arc<dyn RenderSink>,
    current: Arc<AtomicU64>,
    generation: u64,
}

impl LoadingGuard {
    fn start(sink: Arc<dyn RenderSink>, current: Arc<AtomicU64>, generation: u64) -> Self {
        sink.set_loading(true);
        Self {
            sink,
            current,
            generation,
        }
    }
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        if self.current.load(Ordering::SeqCst) == self.generation {
            self.sink.set_loading(false);
        }
    }
}
