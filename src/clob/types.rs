//! CLOB domain types shared by the public client, the [`super::Exchange`]
//! trait and the response formatters.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_with::{DefaultOnNull, serde_as};

use crate::serde_helpers::StringFromAny;
use crate::types::{Decimal, U256, dec};

/// Tick size assumed when the venue cannot be asked for the real one.
pub const DEFAULT_TICK_SIZE: Decimal = dec!(0.01);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, strum_macros::Display)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum Side {
    #[serde(alias = "buy", alias = "Buy")]
    Buy,
    #[serde(alias = "sell", alias = "Sell")]
    Sell,
}

/// Execution policy for market orders.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, strum_macros::Display,
)]
pub enum MarketOrderType {
    /// Fill or Kill; the whole amount fills immediately or nothing does.
    #[default]
    #[serde(alias = "fok")]
    FOK,
    /// Fill and Kill; fill what is possible immediately, cancel the rest.
    #[serde(alias = "fak")]
    FAK,
}

/// Per-token trading parameters the signer needs, as far as the venue
/// reported them. A `None` field is signed with its default for that one order.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MarketParameters {
    pub tick_size: Option<Decimal>,
    pub neg_risk: Option<bool>,
}

impl MarketParameters {
    #[must_use]
    pub fn new(tick_size: Option<Decimal>, neg_risk: Option<bool>) -> Self {
        Self {
            tick_size,
            neg_risk,
        }
    }

    #[must_use]
    pub fn tick_size_or_default(&self) -> Decimal {
        self.tick_size.unwrap_or(DEFAULT_TICK_SIZE)
    }

    #[must_use]
    pub fn neg_risk_or_default(&self) -> bool {
        self.neg_risk.unwrap_or_default()
    }

    /// Whether both values came from the venue.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.tick_size.is_some() && self.neg_risk.is_some()
    }
}

#[non_exhaustive]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LimitOrder {
    pub token_id: U256,
    pub side: Side,
    pub price: Decimal,
    pub size: Decimal,
    pub parameters: MarketParameters,
}

impl LimitOrder {
    #[must_use]
    pub fn new(
        token_id: U256,
        side: Side,
        price: Decimal,
        size: Decimal,
        parameters: MarketParameters,
    ) -> Self {
        Self {
            token_id,
            side,
            price,
            size,
            parameters,
        }
    }
}

/// `amount` is USDC to spend for a buy and shares to sell for a sell.
#[non_exhaustive]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MarketOrder {
    pub token_id: U256,
    pub side: Side,
    pub amount: Decimal,
    pub order_type: MarketOrderType,
}

impl MarketOrder {
    #[must_use]
    pub fn new(token_id: U256, side: Side, amount: Decimal, order_type: MarketOrderType) -> Self {
        Self {
            token_id,
            side,
            amount,
            order_type,
        }
    }
}

/// Venue acknowledgement of a submitted order.
#[non_exhaustive]
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OrderAck {
    pub order_id: String,
    pub status: String,
    pub success: bool,
    pub error_msg: Option<String>,
}

impl OrderAck {
    #[must_use]
    pub fn new(order_id: String, status: String, success: bool, error_msg: Option<String>) -> Self {
        Self {
            order_id,
            status,
            success,
            error_msg,
        }
    }
}

/// Venue acknowledgement of a cancellation, passed through verbatim.
#[non_exhaustive]
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CancelAck {
    pub canceled: Vec<String>,
    pub not_canceled: BTreeMap<String, String>,
}

impl CancelAck {
    #[must_use]
    pub fn new(canceled: Vec<String>, not_canceled: BTreeMap<String, String>) -> Self {
        Self {
            canceled,
            not_canceled,
        }
    }
}

/// Collateral balance and per-spender allowances in raw base units.
#[non_exhaustive]
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BalanceAllowance {
    pub balance: Decimal,
    pub allowances: BTreeMap<String, String>,
}

impl BalanceAllowance {
    #[must_use]
    pub fn new(balance: Decimal, allowances: BTreeMap<String, String>) -> Self {
        Self {
            balance,
            allowances,
        }
    }
}

/// An executed fill as the account's trade history reports it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Trade {
    pub id: String,
    pub token_id: String,
    pub side: String,
    pub price: String,
    pub size: String,
    pub status: String,
    pub match_time: Option<String>,
    pub last_update: Option<String>,
}

#[non_exhaustive]
#[serde_as]
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct OrderSummary {
    #[serde_as(as = "StringFromAny")]
    pub price: String,
    #[serde_as(as = "StringFromAny")]
    pub size: String,
}

/// Raw `/book` payload. Only the ladders are read; the rest is ignored.
#[non_exhaustive]
#[serde_as]
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct OrderBook {
    #[serde(default)]
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub bids: Vec<OrderSummary>,
    #[serde(default)]
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub asks: Vec<OrderSummary>,
}
