//! Prices sub-client: current price, outlook, cheapest hour, run window.

use super::schedule::{self, RunWindowAdvice};
use super::wire::{self, PriceBody};
use super::{PriceEntry, SpotPrice};
use crate::client::SpotPriceClient;
use crate::error::SpotError;

use chrono::{DateTime, Utc};

/// Sub-client for price operations.
pub struct Prices<'a> {
    pub(crate) client: &'a SpotPriceClient,
}

impl<'a> Prices<'a> {
    async fn fetch_body(&self) -> Result<PriceBody, SpotError> {
        let body = self.client.http.get_prices(&self.client.region).await?;
        wire::parse_body(&body, &self.client.schema)
    }

    /// Price of the hour covering `now`.
    pub async fn current_at(&self, now: DateTime<Utc>) -> Result<SpotPrice, SpotError> {
        match self.fetch_body().await? {
            PriceBody::Single(price) => Ok(price),
            PriceBody::Hourly(entries) => schedule::current_index(&entries, now)
                .map(|i| entries[i].price)
                .ok_or_else(|| SpotError::data("no current price entry")),
        }
    }

    /// Price of the current hour.
    pub async fn current(&self) -> Result<SpotPrice, SpotError> {
        self.current_at(Utc::now()).await
    }

    /// All usable hourly entries, sorted by start time.
    pub async fn entries(&self) -> Result<Vec<PriceEntry>, SpotError> {
        match self.fetch_body().await? {
            PriceBody::Hourly(entries) => Ok(entries),
            PriceBody::Single(_) => Err(SpotError::data(
                "response carries a single price, not hourly entries",
            )),
        }
    }

    /// Up to `hours` entries starting at the hour covering `now`.
    pub async fn upcoming_at(
        &self,
        now: DateTime<Utc>,
        hours: usize,
    ) -> Result<Vec<PriceEntry>, SpotError> {
        let entries = self.entries().await?;
        let next = schedule::upcoming(&entries, now, hours);
        if next.is_empty() {
            return Err(SpotError::data("no upcoming price entries"));
        }
        Ok(next.to_vec())
    }

    pub async fn upcoming(&self, hours: usize) -> Result<Vec<PriceEntry>, SpotError> {
        self.upcoming_at(Utc::now(), hours).await
    }

    /// Cheapest remaining hour today; `None` once the local day has no slots left.
    pub async fn cheapest_today_at(
        &self,
        now: DateTime<Utc>,
    ) -> Result<Option<PriceEntry>, SpotError> {
        let entries = self.entries().await?;
        Ok(schedule::cheapest_remaining_today(&entries, now).cloned())
    }

    pub async fn cheapest_today(&self) -> Result<Option<PriceEntry>, SpotError> {
        self.cheapest_today_at(Utc::now()).await
    }

    /// When to run a three-hour cycle, using the client's threshold.
    pub async fn run_window_at(&self, now: DateTime<Utc>) -> Result<RunWindowAdvice, SpotError> {
        let entries = self.entries().await?;
        Ok(schedule::run_window(
            &entries,
            now,
            self.client.run_threshold_cents,
        ))
    }

    pub async fn run_window(&self) -> Result<RunWindowAdvice, SpotError> {
        self.run_window_at(Utc::now()).await
    }
}
