//! SkyCast dashboard
//!
//! Ties the provider clients, the persisted session and a presentation
//! [`RenderSink`] together. The [`Orchestrator`] is the only place that
//! decides what gets fetched when the user picks a city.

pub mod orchestrator;
pub mod providers;
pub mod render;
pub mod session;

pub use orchestrator::{LocationOutcome, Orchestrator, Suggestions};
pub use providers::Providers;
pub use render::{ForecastView, LogSink, NewsView, RenderSink, Severity};
pub use session::{SavedLocation, Session};
