//! The tool catalogue advertised to the host.
//!
//! Registration is a pure function of the configuration: read tools are always
//! present, the three order-flow tools only outside readonly mode.

use serde::Serialize;
use serde_json::{Value, json};

use crate::config::Config;
use crate::tools::{
    CANCEL_ORDER, GET_BALANCE, GET_MARKET, GET_MARKETS, GET_NEWS, GET_ORDERBOOK, GET_POSITIONS,
    GET_TRADES, PLACE_MARKET_ORDER, PLACE_ORDER, UPDATE_ALLOWANCE,
};

/// One entry of a `tools/list` response.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDescriptor {
    pub name: &'static str,
    pub description: &'static str,
    pub input_schema: Value,
    /// Mutating tools are hidden in readonly mode.
    #[serde(skip)]
    pub mutating: bool,
}

impl ToolDescriptor {
    fn read(name: &'static str, description: &'static str, input_schema: Value) -> Self {
        Self {
            name,
            description,
            input_schema,
            mutating: false,
        }
    }

    fn write(name: &'static str, description: &'static str, input_schema: Value) -> Self {
        Self {
            name,
            description,
            input_schema,
            mutating: true,
        }
    }
}

/// The tools available under `config`, in a stable order.
#[must_use]
pub fn tools(config: &Config) -> Vec<ToolDescriptor> {
    catalogue()
        .into_iter()
        .filter(|tool| !(tool.mutating && config.readonly))
        .collect()
}

#[must_use]
pub fn is_registered(config: &Config, name: &str) -> bool {
    catalogue()
        .iter()
        .any(|tool| tool.name == name && !(tool.mutating && config.readonly))
}

fn catalogue() -> Vec<ToolDescriptor> {
    vec![
        ToolDescriptor::read(
            GET_MARKETS,
            "List active prediction markets sorted by trading volume. Optionally filter by a \
             slug substring.",
            object_schema(
                &json!({
                    "limit": integer("Number of markets to return", 1, 100, 10),
                    "offset": { "type": "integer", "minimum": 0, "default": 0,
                                "description": "Pagination offset" },
                    "search": string("Case-insensitive substring to match against market slugs"),
                }),
                &[],
            ),
        ),
        ToolDescriptor::read(
            GET_MARKET,
            "Get one market by condition id, slug or polymarket.com event URL, including its \
             outcome tokens and prices.",
            object_schema(
                &json!({
                    "condition_id": string("Market condition id (0x-prefixed)"),
                    "slug": string("Market slug"),
                    "url": string("Event URL, e.g. https://polymarket.com/event/<slug>"),
                }),
                &[],
            ),
        ),
        ToolDescriptor::read(
            GET_ORDERBOOK,
            "Get the current bids and asks for one outcome token.",
            object_schema(
                &json!({ "token_id": string("Outcome token id") }),
                &["token_id"],
            ),
        ),
        ToolDescriptor::read(
            GET_BALANCE,
            "Get the USDC collateral balance and exchange allowances of the trading account.",
            object_schema(&json!({}), &[]),
        ),
        ToolDescriptor::read(
            GET_POSITIONS,
            "List positions held by the trading account with size, average price and P&L.",
            object_schema(
                &json!({
                    "redeemable": { "type": "boolean",
                                    "description": "Only positions that can be redeemed" },
                    "market": string("Restrict to one market condition id"),
                    "limit": integer("Number of positions to return", 1, 500, 100),
                }),
                &[],
            ),
        ),
        ToolDescriptor::read(
            UPDATE_ALLOWANCE,
            "Ask the exchange to re-read on-chain USDC balance and allowance, then return the \
             refreshed balance.",
            object_schema(&json!({}), &[]),
        ),
        ToolDescriptor::read(
            GET_TRADES,
            "List recent fills of the trading account.",
            object_schema(
                &json!({ "limit": integer("Number of trades to return", 1, 100, 20) }),
                &[],
            ),
        ),
        ToolDescriptor::write(
            PLACE_ORDER,
            "Place a good-til-cancelled limit order on an outcome token.",
            object_schema(
                &json!({
                    "token_id": string("Outcome token id"),
                    "side": side_schema(),
                    "size": string("Number of shares, a positive decimal"),
                    "price": string("Limit price per share, strictly between 0 and 1"),
                }),
                &["token_id", "side", "size", "price"],
            ),
        ),
        ToolDescriptor::write(
            PLACE_MARKET_ORDER,
            "Place a market order. For BUY the amount is USDC to spend, for SELL it is shares \
             to sell.",
            object_schema(
                &json!({
                    "token_id": string("Outcome token id"),
                    "side": side_schema(),
                    "amount": string("USDC to spend (BUY) or shares to sell (SELL)"),
                    "order_type": { "type": "string", "enum": ["FOK", "FAK"], "default": "FOK",
                                    "description": "Fill-or-kill or fill-and-kill" },
                }),
                &["token_id", "side", "amount"],
            ),
        ),
        ToolDescriptor::write(
            CANCEL_ORDER,
            "Cancel an open order.",
            object_schema(
                &json!({ "order_id": string("Id of the order to cancel") }),
                &["order_id"],
            ),
        ),
        ToolDescriptor::read(
            GET_NEWS,
            "Search recent news headlines, e.g. to research the subject of a market.",
            object_schema(
                &json!({
                    "query": string("Search terms"),
                    "limit": integer("Number of articles to return", 1, 10, 5),
                }),
                &["query"],
            ),
        ),
    ]
}

fn object_schema(properties: &Value, required: &[&str]) -> Value {
    json!({
        "type": "object",
        "properties": properties,
        "required": required,
    })
}

fn string(description: &str) -> Value {
    json!({ "type": "string", "description": description })
}

fn integer(description: &str, minimum: i64, maximum: i64, default: i64) -> Value {
    json!({
        "type": "integer",
        "description": description,
        "minimum": minimum,
        "maximum": maximum,
        "default": default,
    })
}

fn side_schema() -> Value {
    json!({ "type": "string", "enum": ["BUY", "SELL"], "description": "Order side" })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigOptions;

    // publicly known private key
    const PRIVATE_KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

    fn config(readonly: bool) -> Config {
        let options = ConfigOptions::builder()
            .private_key(PRIVATE_KEY.to_owned())
            .readonly(readonly)
            .build();
        Config::from_options(options).expect("config")
    }

    fn names(config: &Config) -> Vec<&'static str> {
        tools(config).iter().map(|tool| tool.name).collect()
    }

    #[test]
    fn write_mode_should_register_every_tool() {
        let names = names(&config(false));

        assert_eq!(names.len(), 11);
        assert!(names.contains(&PLACE_ORDER), "{names:?}");
        assert!(names.contains(&PLACE_MARKET_ORDER), "{names:?}");
        assert!(names.contains(&CANCEL_ORDER), "{names:?}");
    }

    #[test]
    fn readonly_mode_should_hide_order_flow_tools() {
        let config = config(true);
        let names = names(&config);

        assert_eq!(names.len(), 8);
        for hidden in [PLACE_ORDER, PLACE_MARKET_ORDER, CANCEL_ORDER] {
            assert!(!names.contains(&hidden), "{hidden} should be hidden");
            assert!(!is_registered(&config, hidden), "{hidden} should not resolve");
        }
        for visible in [GET_TRADES, UPDATE_ALLOWANCE, GET_NEWS] {
            assert!(names.contains(&visible), "{visible} should stay visible");
        }
    }

    #[test]
    fn descriptors_should_serialize_with_input_schema() {
        let tool = tools(&config(false))
            .into_iter()
            .find(|tool| tool.name == GET_ORDERBOOK)
            .expect("orderbook tool");
        let value = serde_json::to_value(&tool).expect("json");

        assert_eq!(value["name"], json!(GET_ORDERBOOK));
        assert_eq!(value["inputSchema"]["type"], json!("object"));
        assert_eq!(value["inputSchema"]["required"], json!(["token_id"]));
        assert!(value.get("mutating").is_none(), "internal flag is not advertised");
    }

    #[test]
    fn unknown_names_should_not_resolve() {
        assert!(!is_registered(&config(false), "polymarket_launch_rocket"));
    }
}
