//! Tool handlers and the envelope every tool call is answered with.
//!
//! Handlers return [`crate::Result`]`<`[`ToolResult`]`>`; [`call`] is the only
//! place errors are turned into an error envelope, so nothing escapes to the
//! host.

pub mod account;
pub mod args;
pub mod markets;
pub mod news;
pub mod trading;

use std::time::Instant;

use serde::Serialize;
use serde_json::{Value, json};
use tracing::{debug, warn};

use crate::Result;
use crate::error::Error;
use crate::registry;
use crate::venue::Venue;

pub const GET_MARKETS: &str = "polymarket_get_markets";
pub const GET_MARKET: &str = "polymarket_get_market";
pub const GET_ORDERBOOK: &str = "polymarket_get_orderbook";
pub const GET_BALANCE: &str = "polymarket_get_balance";
pub const GET_POSITIONS: &str = "polymarket_get_positions";
pub const UPDATE_ALLOWANCE: &str = "polymarket_update_allowance";
pub const GET_TRADES: &str = "polymarket_get_trades";
pub const PLACE_ORDER: &str = "polymarket_place_order";
pub const PLACE_MARKET_ORDER: &str = "polymarket_place_market_order";
pub const CANCEL_ORDER: &str = "polymarket_cancel_order";
pub const GET_NEWS: &str = "polymarket_get_news";

/// Outcome of a single tool invocation.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolResult {
    /// Structured success, rendered as pretty-printed JSON text.
    Json(Value),
    /// Plain-text success, e.g. a "not found" answer.
    Text(String),
    /// Failure envelope carrying the error message.
    Error(String),
}

impl ToolResult {
    pub fn json<T: Serialize>(value: &T) -> Result<Self> {
        Ok(Self::Json(serde_json::to_value(value)?))
    }

    /// Error envelope for a failed call. The kind prefix is dropped so the
    /// host sees the underlying message.
    #[must_use]
    pub fn from_error(error: &Error) -> Self {
        let message = error
            .inner()
            .map_or_else(|| error.to_string(), ToString::to_string);
        Self::Error(format!("Error: {message}"))
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    #[must_use]
    pub fn text(&self) -> String {
        match self {
            Self::Json(value) => {
                serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
            }
            Self::Text(text) | Self::Error(text) => text.clone(),
        }
    }

    /// The MCP `tools/call` result object.
    #[must_use]
    pub fn into_content(self) -> Value {
        json!({
            "content": [{ "type": "text", "text": self.text() }],
            "isError": self.is_error(),
        })
    }
}

/// Runs the named tool. Unregistered names, validation failures and upstream
/// errors all come back as [`ToolResult::Error`].
#[tracing::instrument(level = "debug", skip(venue, arguments))]
pub async fn call(venue: &Venue, name: &str, arguments: Value) -> ToolResult {
    if !registry::is_registered(venue.config(), name) {
        warn!(tool = name, "call to unknown tool");
        return ToolResult::Error(format!("Unknown tool: {name}"));
    }

    let started = Instant::now();
    let result = dispatch(venue, name, arguments).await;
    let elapsed = started.elapsed();

    match result {
        Ok(result) => {
            debug!(
                tool = name,
                elapsed = ?elapsed,
                is_error = result.is_error(),
                "tool call finished"
            );
            result
        }
        Err(e) => {
            warn!(tool = name, elapsed = ?elapsed, error = %e, "tool call failed");
            ToolResult::from_error(&e)
        }
    }
}

async fn dispatch(venue: &Venue, name: &str, arguments: Value) -> Result<ToolResult> {
    match name {
        GET_MARKETS => markets::get_markets(venue, args::parse(arguments)?).await,
        GET_MARKET => markets::get_market(venue, args::parse(arguments)?).await,
        GET_ORDERBOOK => markets::get_orderbook(venue, args::parse(arguments)?).await,
        GET_BALANCE => account::get_balance(venue).await,
        GET_POSITIONS => account::get_positions(venue, args::parse(arguments)?).await,
        UPDATE_ALLOWANCE => account::update_allowance(venue).await,
        GET_TRADES => account::get_trades(venue, args::parse(arguments)?).await,
        PLACE_ORDER => trading::place_order(venue, args::parse(arguments)?).await,
        PLACE_MARKET_ORDER => trading::place_market_order(venue, args::parse(arguments)?).await,
        CANCEL_ORDER => trading::cancel_order(venue, args::parse(arguments)?).await,
        GET_NEWS => news::get_news(venue, args::parse(arguments)?).await,
        _ => Ok(ToolResult::Error(format!("Unknown tool: {name}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_result_should_render_pretty_text() {
        let result = ToolResult::Json(json!({ "a": 1 }));
        let content = result.into_content();

        assert_eq!(content["isError"], json!(false));
        assert_eq!(content["content"][0]["type"], json!("text"));
        assert_eq!(content["content"][0]["text"], json!("{\n  \"a\": 1\n}"));
    }

    #[test]
    fn error_result_should_set_is_error() {
        let content = ToolResult::Error("Error: boom".to_owned()).into_content();

        assert_eq!(content["isError"], json!(true));
        assert_eq!(content["content"][0]["text"], json!("Error: boom"));
    }

    #[test]
    fn from_error_should_use_underlying_message() {
        let result = ToolResult::from_error(&Error::validation("limit must be between 1 and 100"));
        assert_eq!(
            result,
            ToolResult::Error("Error: invalid: limit must be between 1 and 100".to_owned())
        );
    }

    #[test]
    fn text_result_should_not_be_an_error() {
        let result = ToolResult::Text("Market not found: x".to_owned());
        assert!(!result.is_error(), "not found is not an error");
        assert_eq!(result.text(), "Market not found: x");
    }
}
