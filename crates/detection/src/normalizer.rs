//! Raw feed record normalization
//!
//! Feed records arrive as loosely typed JSON objects whose field names depend
//! on the provider. Normalization never fails: missing or malformed fields
//! fall back to zero (or the `N/A` symbol) so that a degraded record still
//! reaches the classifier.

use log::{debug, warn};
use pumpwatch_core::{MetricSnapshot, Symbol};
use serde_json::{Map, Value};

const SYMBOL_KEYS: &[&str] = &["stockSymbol", "symbol", "ticker"];
const PRICE_KEYS: &[&str] = &["closingPrice", "lastTradedPrice", "ltp", "price", "close"];
const CHANGE_KEYS: &[&str] = &[
    "percentChange",
    "percentageChange",
    "changePercent",
    "change_percent",
];
const VOLUME_KEYS: &[&str] = &["volume", "totalTradedQuantity", "shareTraded"];
const HIGH_KEYS: &[&str] = &["highPrice", "high"];
const LOW_KEYS: &[&str] = &["lowPrice", "low"];

/// Outcome of looking up one numeric field
#[derive(Debug, Clone, Copy, PartialEq)]
enum Field {
    Missing,
    Invalid,
    Number(f64),
}

/// Normalize one raw feed record into a snapshot
pub fn normalize(raw: &Value) -> MetricSnapshot {
    let Some(obj) = raw.as_object() else {
        warn!("feed record is not an object, emitting empty snapshot");
        return MetricSnapshot::new(Symbol::unknown(), 0.0, 0.0, 0);
    };

    let symbol = read_symbol(obj);

    let price = non_negative(&symbol, "price", read_number(obj, PRICE_KEYS));
    let change_percent = match read_number(obj, CHANGE_KEYS) {
        Field::Number(v) if v.is_finite() => v,
        field => {
            soft_default(&symbol, "percent change", field);
            0.0
        }
    };
    // Fractional volumes truncate; `as` saturates at u64::MAX
    let volume = non_negative(&symbol, "volume", read_number(obj, VOLUME_KEYS)) as u64;

    MetricSnapshot {
        symbol,
        price,
        change_percent,
        volume,
        high: optional_bound(obj, HIGH_KEYS),
        low: optional_bound(obj, LOW_KEYS),
    }
}

/// Normalize a batch, preserving feed order
pub fn normalize_all(raw: &[Value]) -> Vec<MetricSnapshot> {
    raw.iter().map(normalize).collect()
}

fn read_symbol(obj: &Map<String, Value>) -> Symbol {
    let value = SYMBOL_KEYS.iter().find_map(|key| match obj.get(*key) {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    });

    match value {
        Some(s) => Symbol::new(s),
        None => {
            debug!("feed record has no symbol, using {}", Symbol::UNKNOWN);
            Symbol::unknown()
        }
    }
}

/// First present key wins; numeric strings such as `"1,234.5"` are accepted
fn read_number(obj: &Map<String, Value>, keys: &[&str]) -> Field {
    let Some(value) = keys
        .iter()
        .find_map(|key| obj.get(*key).filter(|v| !v.is_null()))
    else {
        return Field::Missing;
    };

    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().replace(',', "").parse::<f64>().ok(),
        _ => None,
    };

    match parsed {
        Some(v) if v.is_finite() => Field::Number(v),
        _ => Field::Invalid,
    }
}

fn non_negative(symbol: &Symbol, name: &str, field: Field) -> f64 {
    match field {
        Field::Number(v) if v >= 0.0 => v,
        Field::Number(v) => {
            warn!("{}: negative {} {} clamped to 0", symbol, name, v);
            0.0
        }
        other => {
            soft_default(symbol, name, other);
            0.0
        }
    }
}

fn optional_bound(obj: &Map<String, Value>, keys: &[&str]) -> Option<f64> {
    match read_number(obj, keys) {
        Field::Number(v) if v >= 0.0 => Some(v),
        _ => None,
    }
}

fn soft_default(symbol: &Symbol, name: &str, field: Field) {
    match field {
        Field::Invalid => warn!("{}: malformed {} defaulted to 0", symbol, name),
        _ => debug!("{}: missing {} defaulted to 0", symbol, name),
    }
}
