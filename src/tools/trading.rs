//! Mutating tools. Each one passes the write-access gate before it validates
//! or sends anything.

use serde::Serialize;
use serde_json::json;
use tracing::{info, warn};

use super::ToolResult;
use super::args::{self, CancelOrderArgs, PlaceMarketOrderArgs, PlaceOrderArgs};
use crate::Result;
use crate::clob::Exchange;
use crate::clob::types::{LimitOrder, MarketOrder, MarketParameters, OrderAck};
use crate::types::{Decimal, U256};
use crate::venue::Venue;

#[derive(Debug, Serialize)]
struct OrderResult {
    order_id: String,
    status: String,
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tick_size: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    neg_risk: Option<bool>,
}

impl From<OrderAck> for OrderResult {
    fn from(ack: OrderAck) -> Self {
        Self {
            order_id: ack.order_id,
            status: ack.status,
            success: ack.success,
            message: ack.error_msg,
            tick_size: None,
            neg_risk: None,
        }
    }
}

/// Places a GTC limit order.
pub async fn place_order(venue: &Venue, args: PlaceOrderArgs) -> Result<ToolResult> {
    venue.ensure_write_access()?;

    let token_id = args::token_id(args.token_id.as_deref())?;
    let side = args::side(args.side)?;
    let size = args::positive_decimal(args.size.as_deref(), "size")?;
    let price = args::probability(args.price.as_deref())?;

    let exchange = venue.client()?;
    let parameters = market_parameters(exchange, token_id).await;

    let ack = exchange
        .post_limit_order(&LimitOrder::new(token_id, side, price, size, parameters))
        .await?;
    info!(
        order_id = %ack.order_id,
        status = %ack.status,
        %side,
        %price,
        %size,
        "limit order submitted"
    );

    ToolResult::json(&OrderResult {
        tick_size: Some(parameters.tick_size_or_default()),
        neg_risk: Some(parameters.neg_risk_or_default()),
        ..OrderResult::from(ack)
    })
}

/// Places a market order: `amount` is USDC for a buy and shares for a sell.
pub async fn place_market_order(venue: &Venue, args: PlaceMarketOrderArgs) -> Result<ToolResult> {
    venue.ensure_write_access()?;

    let token_id = args::token_id(args.token_id.as_deref())?;
    let side = args::side(args.side)?;
    let amount = args::positive_decimal(args.amount.as_deref(), "amount")?;

    let ack = venue
        .client()?
        .post_market_order(&MarketOrder::new(token_id, side, amount, args.order_type))
        .await?;
    info!(
        order_id = %ack.order_id,
        status = %ack.status,
        %side,
        %amount,
        order_type = %args.order_type,
        "market order submitted"
    );

    ToolResult::json(&OrderResult::from(ack))
}

pub async fn cancel_order(venue: &Venue, args: CancelOrderArgs) -> Result<ToolResult> {
    venue.ensure_write_access()?;

    let order_id = args::required(args.order_id.as_deref(), "order_id")?;
    let ack = venue.client()?.cancel_order(order_id).await?;

    if let Some(reason) = ack.not_canceled.get(order_id) {
        warn!(order_id, reason = %reason, "venue reported order as not cancelled");
    } else {
        info!(order_id, "order cancelled");
    }

    ToolResult::json(&json!({
        "order_id": order_id,
        "status": "cancelled",
        "response": ack,
    }))
}

/// Tick size and neg-risk flag, looked up independently. A failed lookup
/// leaves its field empty so the order is signed with the default; the venue
/// rejects an order with wrong parameters itself.
async fn market_parameters(exchange: &dyn Exchange, token_id: U256) -> MarketParameters {
    let tick_size = exchange
        .tick_size(token_id)
        .await
        .inspect_err(|e| warn!(%token_id, error = %e, "tick size lookup failed, using default"))
        .ok();
    let neg_risk = exchange
        .neg_risk(token_id)
        .await
        .inspect_err(|e| warn!(%token_id, error = %e, "neg risk lookup failed, using default"))
        .ok();

    MarketParameters::new(tick_size, neg_risk)
}
