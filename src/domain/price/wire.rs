//! Wire parsing for pricing API bodies.
//!
//! The upstream answers either with a single object carrying the price field,
//! or with an array of hourly entries. Field names come from [`UpstreamSchema`].

use super::{PriceEntry, SpotPrice, UpstreamSchema};
use crate::error::SpotError;

use chrono::DateTime;
use serde_json::{Map, Value};

/// A parsed pricing response.
#[derive(Debug, Clone, PartialEq)]
pub enum PriceBody {
    /// Object body: the price of the current window only.
    Single(SpotPrice),
    /// Array body: usable hourly entries, sorted by start time.
    Hourly(Vec<PriceEntry>),
}

/// Parse a raw response body.
pub fn parse_body(body: &str, schema: &UpstreamSchema) -> Result<PriceBody, SpotError> {
    let value: Value = serde_json::from_str(body)
        .map_err(|e| SpotError::data(format!("body is not valid JSON: {}", e)))?;

    match value {
        Value::Object(map) => price_field(&map, schema).map(PriceBody::Single),
        Value::Array(items) => parse_entries(&items, schema).map(PriceBody::Hourly),
        other => Err(SpotError::data(format!(
            "expected a JSON object or array, got {}",
            json_type(&other)
        ))),
    }
}

fn parse_entries(items: &[Value], schema: &UpstreamSchema) -> Result<Vec<PriceEntry>, SpotError> {
    if items.is_empty() {
        return Err(SpotError::data("price list is empty"));
    }

    let mut entries: Vec<PriceEntry> = items
        .iter()
        .filter_map(|item| {
            let entry = parse_entry(item, schema);
            if entry.is_none() {
                tracing::debug!(%item, "Skipping unusable price entry");
            }
            entry
        })
        .collect();

    if entries.is_empty() {
        return Err(SpotError::data(format!(
            "no entry carries both `{}` and `{}`",
            schema.timestamp_field, schema.price_field
        )));
    }

    entries.sort_by_key(|e| e.starts_at);
    Ok(entries)
}

fn parse_entry(item: &Value, schema: &UpstreamSchema) -> Option<PriceEntry> {
    let map = item.as_object()?;
    let starts_at = map
        .get(&schema.timestamp_field)
        .and_then(Value::as_str)
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())?;
    let price = price_field(map, schema).ok()?;
    Some(PriceEntry { starts_at, price })
}

fn price_field(map: &Map<String, Value>, schema: &UpstreamSchema) -> Result<SpotPrice, SpotError> {
    match map.get(&schema.price_field) {
        Some(Value::Number(n)) => n
            .as_f64()
            .map(|raw| schema.unit.to_cents(raw))
            .ok_or_else(|| SpotError::data(format!("`{}` is out of range", schema.price_field))),
        Some(other) => Err(SpotError::data(format!(
            "`{}` is not a number (got {})",
            schema.price_field,
            json_type(other)
        ))),
        None => Err(SpotError::data(format!(
            "missing field `{}`",
            schema.price_field
        ))),
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
