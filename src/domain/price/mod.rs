//! Price domain: spot price values, hourly entries, upstream schema.

pub mod client;
pub mod schedule;
pub mod wire;

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

pub use schedule::RunWindowAdvice;

/// Electricity spot price in cents per kilowatt-hour.
///
/// Spot markets do go negative; no bounds are enforced here.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpotPrice(f64);

impl SpotPrice {
    pub fn new(cents_per_kwh: f64) -> Self {
        Self(cents_per_kwh)
    }

    pub fn cents_per_kwh(self) -> f64 {
        self.0
    }
}

impl From<f64> for SpotPrice {
    fn from(v: f64) -> Self {
        Self(v)
    }
}

/// One published hourly slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceEntry {
    /// Slot start, in the offset the upstream published it with.
    pub starts_at: DateTime<FixedOffset>,
    pub price: SpotPrice,
}

/// Unit the upstream publishes prices in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PriceUnit {
    #[default]
    EurPerKwh,
    CentsPerKwh,
}

impl PriceUnit {
    /// Convert a raw upstream number into cents per kWh.
    pub fn to_cents(self, raw: f64) -> SpotPrice {
        match self {
            PriceUnit::EurPerKwh => SpotPrice(raw * 100.0),
            PriceUnit::CentsPerKwh => SpotPrice(raw),
        }
    }
}

/// Field names and unit of the upstream JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpstreamSchema {
    pub price_field: String,
    pub timestamp_field: String,
    pub unit: PriceUnit,
}

impl Default for UpstreamSchema {
    fn default() -> Self {
        Self {
            price_field: "PriceWithTax".to_string(),
            timestamp_field: "DateTime".to_string(),
            unit: PriceUnit::EurPerKwh,
        }
    }
}

impl UpstreamSchema {
    /// Schema with explicit field names.
    pub fn new(price_field: impl Into<String>, timestamp_field: impl Into<String>) -> Self {
        Self {
            price_field: price_field.into(),
            timestamp_field: timestamp_field.into(),
            ..Default::default()
        }
    }

    pub fn with_unit(mut self, unit: PriceUnit) -> Self {
        self.unit = unit;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eur_converted_to_cents() {
        let price = PriceUnit::EurPerKwh.to_cents(0.05);
        assert!((price.cents_per_kwh() - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_cents_pass_through_unchanged() {
        let price = PriceUnit::CentsPerKwh.to_cents(5.237);
        assert_eq!(price.cents_per_kwh(), 5.237);
    }

    #[test]
    fn test_default_schema_matches_spot_hinta() {
        let schema = UpstreamSchema::default();
        assert_eq!(schema.price_field, "PriceWithTax");
        assert_eq!(schema.timestamp_field, "DateTime");
        assert_eq!(schema.unit, PriceUnit::EurPerKwh);
    }

    #[test]
    fn test_spot_price_serializes_transparently() {
        let json = serde_json::to_string(&SpotPrice::new(-1.5)).unwrap();
        assert_eq!(json, "-1.5");
    }
}
