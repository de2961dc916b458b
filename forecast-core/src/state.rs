//! The single published `(Location, Forecast)` pair.
//!
//! Writes go through one `watch` sender; readers borrow or subscribe. Every
//! fetch takes a [`RequestTicket`] at dispatch so completions can be ordered
//! by when they were issued rather than when they finished.

use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::watch;

use crate::model::{Forecast, Location, WeatherInfo};

/// How overlapping fetches settle the published state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PublishPolicy {
    /// A completion is applied only if it was dispatched after the one
    /// currently published. Late answers to older requests are dropped.
    #[default]
    LatestRequest,
    /// Whichever completion arrives last is applied, regardless of dispatch order.
    LastCompleted,
}

/// Dispatch order of one fetch. Strictly increasing per store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestTicket(u64);

impl RequestTicket {
    pub fn sequence(&self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PublishedForecast {
    pub ticket: RequestTicket,
    pub location: Location,
    pub forecast: Forecast,
}

#[derive(Debug)]
pub struct ForecastStore {
    policy: PublishPolicy,
    next_sequence: AtomicU64,
    tx: watch::Sender<Option<PublishedForecast>>,
}

impl Default for ForecastStore {
    fn default() -> Self {
        Self::new(PublishPolicy::default())
    }
}

impl ForecastStore {
    pub fn new(policy: PublishPolicy) -> Self {
        let (tx, _rx) = watch::channel(None);
        Self { policy, next_sequence: AtomicU64::new(1), tx }
    }

    pub fn policy(&self) -> PublishPolicy {
        self.policy
    }

    /// Reserve the next dispatch slot.
    pub fn issue_ticket(&self) -> RequestTicket {
        RequestTicket(self.next_sequence.fetch_add(1, Ordering::Relaxed))
    }

    /// Replace the published pair wholesale with `info`, subject to the
    /// store's [`PublishPolicy`]. Returns whether the state changed.
    pub fn publish(&self, ticket: RequestTicket, info: &WeatherInfo) -> bool {
        let policy = self.policy;

        self.tx.send_if_modified(|current| {
            let stale = match (policy, current.as_ref()) {
                (PublishPolicy::LatestRequest, Some(published)) => ticket < published.ticket,
                _ => false,
            };
            if stale {
                return false;
            }

            *current = Some(PublishedForecast {
                ticket,
                location: info.location.clone(),
                forecast: info.forecast.clone(),
            });
            true
        })
    }

    /// Snapshot of what is published now; `None` before the first success.
    pub fn current(&self) -> Option<PublishedForecast> {
        self.tx.borrow().clone()
    }

    pub fn current_forecast(&self) -> Option<Forecast> {
        self.tx.borrow().as_ref().map(|p| p.forecast.clone())
    }

    pub fn current_location(&self) -> Option<Location> {
        self.tx.borrow().as_ref().map(|p| p.location.clone())
    }

    /// Receiver notified on every applied publish.
    pub fn subscribe(&self) -> watch::Receiver<Option<PublishedForecast>> {
        self.tx.subscribe()
    }
}
