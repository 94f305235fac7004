//! Pure mappings from raw upstream payloads to the stable tool output schemas.
//!
//! Nothing in here performs I/O or fails: malformed upstream values degrade to
//! defaults instead of errors.

pub mod balance;
pub mod market;
pub mod orderbook;
pub mod position;
pub mod trade;

use serde_json::Value;

pub use balance::{FormattedBalance, format_balance};
pub use market::{FormattedMarket, MarketToken, format_market};
pub use orderbook::{FormattedOrderBook, PriceLevel, format_order_book};
pub use position::{FormattedPosition, format_position};
pub use trade::{FormattedTrade, format_trade};

/// Normalizes a field that may be an array or a JSON-encoded array string.
///
/// Anything that is not (or does not decode to) an array yields no elements.
#[must_use]
pub fn ensure_array(value: &Value) -> Vec<Value> {
    match value {
        Value::Array(items) => items.clone(),
        Value::String(raw) => match serde_json::from_str::<Value>(raw) {
            Ok(Value::Array(items)) => items,
            _ => Vec::new(),
        },
        _ => Vec::new(),
    }
}

/// Renders a scalar JSON value as text; strings are taken verbatim.
pub(crate) fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
