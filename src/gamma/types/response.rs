#![allow(
    clippy::module_name_repetitions,
    reason = "Response suffix is intentional for clarity"
)]

use serde::Deserialize;
use serde_json::Value;
use serde_with::{DefaultOnNull, serde_as};

use crate::serde_helpers::StringFromAny;

/// A Gamma market record.
///
/// `outcomes`, `outcome_prices` and `clob_token_ids` are left as raw JSON: the
/// upstream sends them either as arrays or as JSON-encoded strings of arrays.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
#[non_exhaustive]
pub struct Market {
    #[serde_as(as = "Option<StringFromAny>")]
    #[serde(default)]
    pub id: Option<String>,
    pub condition_id: Option<String>,
    pub question: Option<String>,
    pub slug: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub outcomes: Value,
    #[serde(default)]
    pub outcome_prices: Value,
    #[serde(default)]
    pub clob_token_ids: Value,
    #[serde_as(as = "Option<StringFromAny>")]
    #[serde(default)]
    pub volume: Option<String>,
    #[serde_as(as = "Option<StringFromAny>")]
    #[serde(default)]
    pub liquidity: Option<String>,
    pub end_date: Option<String>,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub active: bool,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub closed: bool,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub accepting_orders: bool,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn market_should_tolerate_string_encoded_arrays_and_numeric_volume() {
        let market: Market = serde_json::from_value(json!({
            "id": "12",
            "conditionId": "0xabc",
            "question": "Will it rain?",
            "slug": "will-it-rain",
            "outcomes": "[\"Yes\",\"No\"]",
            "outcomePrices": "[\"0.6\",\"0.4\"]",
            "clobTokenIds": "[\"1\",\"2\"]",
            "volume": 1234.5,
            "liquidity": "99",
            "active": true,
            "closed": null,
            "somethingNew": {"nested": 1}
        }))
        .expect("market");

        assert_eq!(market.condition_id.as_deref(), Some("0xabc"));
        assert_eq!(market.outcomes, json!("[\"Yes\",\"No\"]"));
        assert_eq!(market.volume.as_deref(), Some("1234.5"));
        assert_eq!(market.liquidity.as_deref(), Some("99"));
        assert!(market.active, "active");
        assert!(!market.closed, "null closed defaults to false");
        assert!(!market.accepting_orders, "missing acceptingOrders is false");
    }

    #[test]
    fn market_should_accept_an_empty_object() {
        let market: Market = serde_json::from_value(json!({})).expect("market");

        assert_eq!(market, Market::default());
        assert!(market.outcomes.is_null(), "missing outcomes stay null");
    }
}
