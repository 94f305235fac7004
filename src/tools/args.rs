//! Typed tool arguments and the validation every handler runs before it
//! touches an upstream service.

use std::str::FromStr as _;
use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use serde_with::serde_as;

use crate::Result;
use crate::clob::types::{MarketOrderType, Side};
use crate::error::Error;
use crate::serde_helpers::StringFromAny;
use crate::types::{Decimal, U256};

#[expect(clippy::unwrap_used, reason = "Pattern is a compile-time constant")]
static EVENT_SLUG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"/event/([^/?#]+)").unwrap());

/// Deserializes tool arguments; a missing argument object is treated as `{}`.
pub fn parse<T: DeserializeOwned>(arguments: Value) -> Result<T> {
    let arguments = if arguments.is_null() {
        Value::Object(serde_json::Map::new())
    } else {
        arguments
    };

    serde_json::from_value(arguments).map_err(|e| Error::validation(e.to_string()))
}

/// Applies `default` when absent and rejects values outside `min..=max`.
pub fn bounded(
    value: Option<i64>,
    default: i64,
    min: i64,
    max: i64,
    param_name: &'static str,
) -> Result<i64> {
    let value = value.unwrap_or(default);
    if (min..=max).contains(&value) {
        Ok(value)
    } else {
        Err(Error::validation(format!(
            "{param_name} must be between {min} and {max}, got {value}"
        )))
    }
}

/// A string argument, trimmed; blank counts as absent.
#[must_use]
pub fn optional(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// A required, non-blank string argument, trimmed.
pub fn required<'a>(value: Option<&'a str>, param_name: &'static str) -> Result<&'a str> {
    optional(value).ok_or_else(|| Error::validation(format!("{param_name} is required")))
}

pub fn token_id(value: Option<&str>) -> Result<U256> {
    let raw = required(value, "token_id")?;
    U256::from_str(raw)
        .map_err(|e| Error::validation(format!("token_id must be a decimal token id: {e}")))
}

pub fn positive_decimal(value: Option<&str>, param_name: &'static str) -> Result<Decimal> {
    let raw = required(value, param_name)?;
    let parsed = Decimal::from_str(raw)
        .map_err(|e| Error::validation(format!("{param_name} must be a decimal number: {e}")))?;

    if parsed <= Decimal::ZERO {
        return Err(Error::validation(format!("{param_name} must be positive, got {raw}")));
    }
    Ok(parsed)
}

/// A price strictly between 0 and 1.
pub fn probability(value: Option<&str>) -> Result<Decimal> {
    let price = positive_decimal(value, "price")?;
    if price >= Decimal::ONE {
        return Err(Error::validation(format!(
            "price must be greater than 0 and less than 1, got {price}"
        )));
    }
    Ok(price)
}

pub fn side(value: Option<Side>) -> Result<Side> {
    value.ok_or_else(|| Error::validation("side is required and must be BUY or SELL"))
}

/// Extracts a market slug from an event URL, or takes the input as a slug.
#[must_use]
pub fn slug_from_input(input: &str) -> String {
    match EVENT_SLUG.captures(input).and_then(|c| c.get(1)) {
        Some(slug) => slug.as_str().to_owned(),
        None => input.trim().trim_start_matches('/').to_owned(),
    }
}

#[non_exhaustive]
#[derive(Debug, Default, Deserialize)]
pub struct GetMarketsArgs {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    pub search: Option<String>,
}

#[non_exhaustive]
#[derive(Debug, Default, Deserialize)]
pub struct GetMarketArgs {
    pub condition_id: Option<String>,
    pub slug: Option<String>,
    pub url: Option<String>,
}

#[non_exhaustive]
#[serde_as]
#[derive(Debug, Default, Deserialize)]
pub struct GetOrderBookArgs {
    #[serde_as(as = "Option<StringFromAny>")]
    #[serde(default)]
    pub token_id: Option<String>,
}

#[non_exhaustive]
#[derive(Debug, Default, Deserialize)]
pub struct GetPositionsArgs {
    pub redeemable: Option<bool>,
    pub market: Option<String>,
    pub limit: Option<i64>,
}

#[non_exhaustive]
#[derive(Debug, Default, Deserialize)]
pub struct GetTradesArgs {
    pub limit: Option<i64>,
}

#[non_exhaustive]
#[serde_as]
#[derive(Debug, Default, Deserialize)]
pub struct PlaceOrderArgs {
    #[serde_as(as = "Option<StringFromAny>")]
    #[serde(default)]
    pub token_id: Option<String>,
    pub side: Option<Side>,
    #[serde_as(as = "Option<StringFromAny>")]
    #[serde(default)]
    pub size: Option<String>,
    #[serde_as(as = "Option<StringFromAny>")]
    #[serde(default)]
    pub price: Option<String>,
}

#[non_exhaustive]
#[serde_as]
#[derive(Debug, Default, Deserialize)]
pub struct PlaceMarketOrderArgs {
    #[serde_as(as = "Option<StringFromAny>")]
    #[serde(default)]
    pub token_id: Option<String>,
    pub side: Option<Side>,
    #[serde_as(as = "Option<StringFromAny>")]
    #[serde(default)]
    pub amount: Option<String>,
    #[serde(default)]
    pub order_type: MarketOrderType,
}

#[non_exhaustive]
#[derive(Debug, Default, Deserialize)]
pub struct CancelOrderArgs {
    pub order_id: Option<String>,
}

#[non_exhaustive]
#[derive(Debug, Default, Deserialize)]
pub struct GetNewsArgs {
    pub query: Option<String>,
    pub limit: Option<i64>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::error::Kind;
    use crate::types::dec;

    #[test]
    fn slug_from_input_should_extract_event_slug() {
        assert_eq!(
            slug_from_input("https://polymarket.com/event/btc-updown-15m-1770647400?x=1"),
            "btc-updown-15m-1770647400"
        );
        assert_eq!(
            slug_from_input("https://polymarket.com/event/some-event/some-market#top"),
            "some-event"
        );
    }

    #[test]
    fn slug_from_input_should_keep_bare_slugs() {
        assert_eq!(slug_from_input("will-it-rain"), "will-it-rain");
        assert_eq!(slug_from_input("//will-it-rain"), "will-it-rain");
    }

    #[test]
    fn optional_should_treat_blank_as_absent() {
        assert_eq!(optional(Some("  slug ")), Some("slug"));
        assert_eq!(optional(Some("   ")), None);
        assert_eq!(optional(None), None);
    }

    #[test]
    fn bounded_should_default_and_check_range() {
        assert_eq!(bounded(None, 10, 1, 100, "limit").expect("default"), 10);
        assert_eq!(bounded(Some(100), 10, 1, 100, "limit").expect("max"), 100);

        let err = bounded(Some(-1), 10, 1, 100, "limit").unwrap_err();
        assert_eq!(err.kind(), Kind::Validation);
        assert!(err.to_string().contains("limit"), "{err}");
        assert!(bounded(Some(101), 10, 1, 100, "limit").is_err(), "above max");
    }

    #[test]
    fn probability_should_be_strictly_between_zero_and_one() {
        assert_eq!(probability(Some("0.55")).expect("price"), dec!(0.55));
        for bad in ["0", "1", "1.2", "-0.1", "abc", ""] {
            assert!(probability(Some(bad)).is_err(), "{bad} should be rejected");
        }
        assert!(probability(None).is_err(), "missing price");
    }

    #[test]
    fn token_id_should_reject_blank_and_garbage() {
        assert!(token_id(Some("  ")).is_err(), "blank");
        assert!(token_id(Some("not-a-number")).is_err(), "garbage");
        assert_eq!(token_id(Some("123")).expect("id"), U256::from(123_u64));
    }

    #[test]
    fn parse_should_accept_missing_arguments() {
        let args: GetMarketsArgs = parse(Value::Null).expect("args");
        assert!(args.limit.is_none(), "no limit");
    }

    #[test]
    fn parse_should_accept_numeric_order_fields() {
        let args: PlaceOrderArgs = parse(json!({
            "token_id": 123,
            "side": "buy",
            "size": 10,
            "price": 0.5
        }))
        .expect("args");

        assert_eq!(args.token_id.as_deref(), Some("123"));
        assert_eq!(args.side, Some(Side::Buy));
        assert_eq!(args.size.as_deref(), Some("10"));
        assert_eq!(args.price.as_deref(), Some("0.5"));
    }

    #[test]
    fn parse_should_report_bad_types_as_validation() {
        let err = parse::<GetMarketsArgs>(json!({ "limit": "ten" })).unwrap_err();
        assert_eq!(err.kind(), Kind::Validation);
    }
}
