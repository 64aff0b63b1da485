//! Core library for the `weather` CLI.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The validated OpenWeatherMap fetch ([`WeatherProvider`])
//! - Search display state with a single in-flight guard ([`SearchSession`])
//! - Shared domain models (readings, outcomes)
//!
//! It is used by `weather-cli`, but can also be reused by other binaries or services.

pub mod config;
pub mod error;
pub mod model;
pub mod provider;
pub mod search;

pub use config::{Config, OpenWeatherConfig};
pub use error::{FailureKind, FetchError, TransportError};
pub use model::{Condition, SearchOutcome, WeatherReading, Wind};
pub use provider::{WeatherProvider, openweather::OpenWeatherProvider, provider_from_config};
pub use search::{SearchError, SearchPhase, SearchSession, SearchView};
