use tracing::{debug, info, warn};

use crate::{
    config::ClientConfig,
    error::FetchError,
    location::CoordinateProvider,
    model::{Coordinate, Forecast, Location, WeatherInfo},
    state::{ForecastStore, PublishPolicy, PublishedForecast},
    transport::{HttpTransport, Transport},
};

/// Parameters of one `forecast.json` call. The API key is not part of it so
/// requests can be logged freely.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastRequest {
    pub coordinate: Coordinate,
    pub days: u8,
    pub language: String,
}

impl ForecastRequest {
    /// Request for `coordinate` using the horizon and language from `config`.
    pub fn new(coordinate: Coordinate, config: &ClientConfig) -> Self {
        Self { coordinate, days: config.days, language: config.language.clone() }
    }

    pub fn days(mut self, days: u8) -> Self {
        self.days = days;
        self
    }

    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Query pairs in wire order: `key`, `q`, `days`, `lang`.
    pub fn query(&self, api_key: &str) -> Vec<(&'static str, String)> {
        vec![
            ("key", api_key.to_string()),
            ("q", self.coordinate.to_string()),
            ("days", self.days.to_string()),
            ("lang", self.language.clone()),
        ]
    }
}

/// Runs request/decode cycles and owns the published forecast.
///
/// Concurrent calls are not deduplicated or cancelled. Which completion ends
/// up published is decided by the store's [`PublishPolicy`]. Failures leave
/// the published state untouched. There are no retries, no cache and no
/// local timeout beyond the transport's defaults.
#[derive(Debug)]
pub struct ForecastClient {
    config: ClientConfig,
    transport: Box<dyn Transport>,
    store: ForecastStore,
}

impl ForecastClient {
    pub fn new(config: ClientConfig) -> Self {
        Self::with_transport(config, HttpTransport::new())
    }

    pub fn with_transport(config: ClientConfig, transport: impl Transport + 'static) -> Self {
        Self { config, transport: Box::new(transport), store: ForecastStore::default() }
    }

    /// Swap the publish policy. Resets the published state.
    pub fn with_policy(mut self, policy: PublishPolicy) -> Self {
        self.store = ForecastStore::new(policy);
        self
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn store(&self) -> &ForecastStore {
        &self.store
    }

    pub fn endpoint(&self) -> String {
        format!("{}/forecast.json", self.config.base_url.trim_end_matches('/'))
    }

    pub fn request(&self, coordinate: Coordinate) -> ForecastRequest {
        ForecastRequest::new(coordinate, &self.config)
    }

    /// Fetch the configured horizon for a coordinate. Latitude and longitude
    /// are passed through unvalidated; the API decides what is valid.
    pub async fn fetch_forecast(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<WeatherInfo, FetchError> {
        self.fetch(&self.request(Coordinate::new(latitude, longitude))).await
    }

    /// Fetch for wherever `provider` says we are.
    pub async fn fetch_for(&self, provider: &dyn CoordinateProvider) -> anyhow::Result<WeatherInfo> {
        let coordinate = provider.current_coordinate().await?;
        Ok(self.fetch(&self.request(coordinate)).await?)
    }

    pub async fn fetch(&self, request: &ForecastRequest) -> Result<WeatherInfo, FetchError> {
        let ticket = self.store.issue_ticket();
        let url = self.endpoint();

        info!(
            seq = ticket.sequence(),
            q = %request.coordinate,
            days = request.days,
            lang = %request.language,
            "requesting forecast"
        );

        let body = self
            .transport
            .get(&url, &request.query(&self.config.api_key))
            .await
            .inspect_err(|err| warn!(seq = ticket.sequence(), error = %err, "forecast request failed"))?;

        let info = WeatherInfo::from_json(&body).map_err(|err| {
            warn!(seq = ticket.sequence(), error = %err, "forecast payload did not decode");
            FetchError::Decode(err)
        })?;

        if self.store.publish(ticket, &info) {
            debug!(
                seq = ticket.sequence(),
                location = %info.location.name,
                days = info.forecast.forecasts_day.len(),
                "published forecast"
            );
        } else {
            debug!(seq = ticket.sequence(), "discarded stale forecast");
        }

        Ok(info)
    }

    pub fn current(&self) -> Option<PublishedForecast> {
        self.store.current()
    }

    pub fn current_forecast(&self) -> Option<Forecast> {
        self.store.current_forecast()
    }

    pub fn current_location(&self) -> Option<Location> {
        self.store.current_location()
    }
}
