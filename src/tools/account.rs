//! Account state: collateral, positions and fill history.

use serde_json::json;
use tracing::info;

use super::ToolResult;
use super::args::{self, GetPositionsArgs, GetTradesArgs};
use crate::Result;
use crate::data::types::request::PositionsRequest;
use crate::format::{
    FormattedPosition, FormattedTrade, format_balance, format_position, format_trade,
};
use crate::venue::Venue;

pub async fn get_balance(venue: &Venue) -> Result<ToolResult> {
    let raw = venue.client()?.balance_allowance().await?;
    ToolResult::json(&format_balance(&raw, venue.funder_address()))
}

/// Positions held by the funding address, from the Data API.
pub async fn get_positions(venue: &Venue, args: GetPositionsArgs) -> Result<ToolResult> {
    let limit = args::bounded(args.limit, 100, 1, 500, "limit")?;
    let market = args
        .market
        .as_deref()
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(str::to_owned);

    let request = PositionsRequest::builder()
        .user(venue.funder_address())
        .maybe_redeemable(args.redeemable)
        .maybe_market(market)
        .limit(u32::try_from(limit).unwrap_or(500))
        .build();

    let positions: Vec<FormattedPosition> = venue
        .data()
        .positions(&request)
        .await?
        .iter()
        .map(format_position)
        .collect();

    ToolResult::json(&json!({
        "count": positions.len(),
        "positions": positions,
    }))
}

/// Has the venue re-read on-chain balance and allowance, then reports the
/// refreshed balance.
pub async fn update_allowance(venue: &Venue) -> Result<ToolResult> {
    let client = venue.client()?;
    client.update_allowance().await?;
    info!(funder = %venue.funder_address(), "collateral allowance refreshed");

    let raw = client.balance_allowance().await?;
    ToolResult::json(&json!({
        "status": "updated",
        "balance": format_balance(&raw, venue.funder_address()),
    }))
}

/// Most recent fills, in the order the venue returns them.
pub async fn get_trades(venue: &Venue, args: GetTradesArgs) -> Result<ToolResult> {
    let limit = args::bounded(args.limit, 20, 1, 100, "limit")?;
    let take = usize::try_from(limit).unwrap_or(100);

    let trades: Vec<FormattedTrade> = venue
        .client()?
        .trades()
        .await?
        .iter()
        .take(take)
        .map(format_trade)
        .collect();

    ToolResult::json(&json!({
        "count": trades.len(),
        "trades": trades,
    }))
}
