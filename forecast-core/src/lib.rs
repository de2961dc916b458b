//! Core library for the `forecast` CLI.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The decoded WeatherAPI.com forecast model
//! - Pure display derivations (dates, hours, moon-phase assets, icon URLs)
//! - The forecast client and the state it publishes
//!
//! It is used by `forecast-cli`, but any presentation layer can drive it.

pub mod client;
pub mod config;
pub mod display;
pub mod error;
pub mod location;
pub mod model;
pub mod state;
pub mod transport;

pub use client::{ForecastClient, ForecastRequest};
pub use config::{ClientConfig, Config};
pub use display::{
    DisplayLocale, HourlyDisplayForecast, MoonPhase, format_display_date, resolve_icon_url,
    resolve_moon_phase_asset, split_timestamp,
};
pub use error::{FetchError, FetchErrorKind};
pub use location::{CoordinateProvider, FixedCoordinate};
pub use model::{
    Astro, Condition, Coordinate, DailyForecast, Forecast, ForecastDay, HourlyForecast, Location,
    WeatherInfo,
};
pub use state::{ForecastStore, PublishPolicy, PublishedForecast, RequestTicket};
pub use transport::{HttpTransport, Transport};
