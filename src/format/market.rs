use std::str::FromStr as _;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{ensure_array, scalar_text};
use crate::gamma::types::response::Market;
use crate::types::Decimal;

const DESCRIPTION_LIMIT: usize = 500;
const EVENT_URL: &str = "https://polymarket.com/event/";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketToken {
    pub token_id: String,
    pub outcome: String,
    /// Implied probability; absent when the upstream price is missing or outside `[0, 1]`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormattedMarket {
    pub condition_id: String,
    pub question: String,
    pub slug: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub description: String,
    pub tokens: Vec<MarketToken>,
    pub volume: String,
    pub liquidity: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    pub active: bool,
    pub closed: bool,
    pub accepting_orders: bool,
}

#[must_use]
pub fn format_market(market: &Market) -> FormattedMarket {
    let mut outcomes: Vec<String> = ensure_array(&market.outcomes)
        .iter()
        .filter_map(scalar_text)
        .collect();
    if outcomes.is_empty() {
        outcomes = vec!["Yes".to_owned(), "No".to_owned()];
    }

    let prices = ensure_array(&market.outcome_prices);
    let token_ids = ensure_array(&market.clob_token_ids);

    let tokens = outcomes
        .into_iter()
        .enumerate()
        .map(|(index, outcome)| MarketToken {
            token_id: token_ids
                .get(index)
                .and_then(scalar_text)
                .unwrap_or_default(),
            outcome,
            price: prices.get(index).and_then(probability),
        })
        .collect();

    let slug = market.slug.clone().unwrap_or_default();

    FormattedMarket {
        condition_id: market.condition_id.clone().unwrap_or_default(),
        question: market.question.clone().unwrap_or_default(),
        url: (!slug.is_empty()).then(|| format!("{EVENT_URL}{slug}")),
        slug,
        description: market
            .description
            .as_deref()
            .unwrap_or_default()
            .chars()
            .take(DESCRIPTION_LIMIT)
            .collect(),
        tokens,
        volume: market.volume.clone().unwrap_or_else(|| "0".to_owned()),
        liquidity: market.liquidity.clone().unwrap_or_else(|| "0".to_owned()),
        end_date: market.end_date.clone(),
        active: market.active,
        closed: market.closed,
        accepting_orders: market.accepting_orders,
    }
}

fn probability(value: &Value) -> Option<Decimal> {
    let text = scalar_text(value)?;
    let price = Decimal::from_str(text.trim())
        .or_else(|_| Decimal::from_scientific(text.trim()))
        .ok()?;

    (Decimal::ZERO..=Decimal::ONE).contains(&price).then_some(price)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::types::dec;

    fn market(value: Value) -> Market {
        serde_json::from_value(value).expect("market")
    }

    #[test]
    fn format_market_should_decode_string_encoded_fields() {
        let formatted = format_market(&market(json!({
            "conditionId": "0xabc",
            "question": "Will it rain?",
            "slug": "will-it-rain",
            "outcomes": "[\"Yes\",\"No\"]",
            "outcomePrices": "[\"0.65\",\"0.35\"]",
            "clobTokenIds": "[\"111\",\"222\"]",
            "volume": "1000.5",
            "liquidity": 250,
            "endDate": "2026-12-31T00:00:00Z",
            "active": true,
            "closed": false,
            "acceptingOrders": true
        })));

        assert_eq!(formatted.condition_id, "0xabc");
        assert_eq!(
            formatted.url.as_deref(),
            Some("https://polymarket.com/event/will-it-rain")
        );
        assert_eq!(
            formatted.tokens,
            vec![
                MarketToken {
                    token_id: "111".to_owned(),
                    outcome: "Yes".to_owned(),
                    price: Some(dec!(0.65)),
                },
                MarketToken {
                    token_id: "222".to_owned(),
                    outcome: "No".to_owned(),
                    price: Some(dec!(0.35)),
                },
            ]
        );
        assert_eq!(formatted.volume, "1000.5");
        assert_eq!(formatted.liquidity, "250");
        assert!(formatted.accepting_orders, "accepting orders");
    }

    #[test]
    fn format_market_should_match_for_encoded_and_plain_arrays() {
        let encoded = market(json!({
            "slug": "s",
            "outcomes": "[\"Up\",\"Down\"]",
            "outcomePrices": "[\"0.5\",\"0.5\"]",
            "clobTokenIds": "[\"1\",\"2\"]"
        }));
        let plain = market(json!({
            "slug": "s",
            "outcomes": ["Up", "Down"],
            "outcomePrices": ["0.5", "0.5"],
            "clobTokenIds": ["1", "2"]
        }));

        assert_eq!(format_market(&encoded), format_market(&plain));
    }

    #[test]
    fn format_market_should_default_to_yes_no() {
        let formatted = format_market(&market(json!({ "question": "?" })));

        let outcomes: Vec<_> = formatted.tokens.iter().map(|t| t.outcome.as_str()).collect();
        assert_eq!(outcomes, ["Yes", "No"]);
        assert!(
            formatted.tokens.iter().all(|t| t.token_id.is_empty() && t.price.is_none()),
            "no ids or prices without upstream data"
        );
        assert_eq!(formatted.url, None);
        assert_eq!(formatted.volume, "0");
    }

    #[test]
    fn format_market_should_drop_out_of_range_and_unparsable_prices() {
        let formatted = format_market(&market(json!({
            "outcomes": ["A", "B", "C"],
            "outcomePrices": ["1.5", "abc", 0.2],
            "clobTokenIds": ["1"]
        })));

        assert_eq!(formatted.tokens.len(), 3);
        assert_eq!(formatted.tokens[0].price, None);
        assert_eq!(formatted.tokens[1].price, None);
        assert_eq!(formatted.tokens[2].price, Some(dec!(0.2)));
        assert_eq!(formatted.tokens[1].token_id, "");
    }

    #[test]
    fn format_market_should_truncate_description() {
        let formatted = format_market(&market(json!({ "description": "é".repeat(600) })));

        assert_eq!(formatted.description.chars().count(), 500);
    }
}
