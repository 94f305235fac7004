//! Market discovery and order book tools. All of them are public reads.

use serde_json::json;
use tracing::debug;

use super::ToolResult;
use super::args::{self, GetMarketArgs, GetMarketsArgs, GetOrderBookArgs};
use crate::Result;
use crate::clob::client::OrderBookRequest;
use crate::error::Error;
use crate::format::{FormattedMarket, format_market, format_order_book};
use crate::gamma::types::request::{MarketBySlugRequest, MarketsRequest};
use crate::venue::Venue;

/// Lists open markets, highest volume first.
pub async fn get_markets(venue: &Venue, args: GetMarketsArgs) -> Result<ToolResult> {
    let limit = args::bounded(args.limit, 10, 1, 100, "limit")?;
    let offset = args::bounded(args.offset, 0, 0, i64::from(u32::MAX), "offset")?;
    let search = args::optional(args.search.as_deref()).map(str::to_lowercase);

    let request = MarketsRequest::top_by_volume(to_u32(limit)?, to_u32(offset)?);
    let markets: Vec<FormattedMarket> = venue
        .gamma()
        .markets(&request)
        .await?
        .iter()
        .filter(|market| {
            search.as_deref().is_none_or(|needle| {
                market
                    .slug
                    .as_deref()
                    .is_some_and(|slug| slug.to_lowercase().contains(needle))
            })
        })
        .map(format_market)
        .collect();

    ToolResult::json(&json!({
        "count": markets.len(),
        "offset": offset,
        "markets": markets,
    }))
}

/// Looks up one market by condition id, slug or event URL, in that order of
/// precedence.
pub async fn get_market(venue: &Venue, args: GetMarketArgs) -> Result<ToolResult> {
    let condition_id = args::optional(args.condition_id.as_deref());

    let (identifier, lookup) = if let Some(condition_id) = condition_id {
        debug!(condition_id, "looking up market by condition id");
        (
            condition_id.to_owned(),
            venue.gamma().market_by_condition_id(condition_id).await,
        )
    } else {
        let input = args::optional(args.slug.as_deref())
            .or_else(|| args::optional(args.url.as_deref()))
            .ok_or_else(|| Error::validation("one of condition_id, slug or url is required"))?;
        let slug = args::slug_from_input(input);
        if slug.is_empty() {
            return Err(Error::validation(format!("no market slug found in {input}")));
        }

        debug!(slug = %slug, "looking up market by slug");
        let request = MarketBySlugRequest::builder().slug(slug.clone()).build();
        (slug, venue.gamma().market_by_slug(&request).await)
    };

    match lookup {
        Ok(market) => ToolResult::json(&format_market(&market)),
        Err(e) if e.is_not_found() => {
            Ok(ToolResult::Text(format!("Market not found: {identifier}")))
        }
        Err(e) => Err(e),
    }
}

pub async fn get_orderbook(venue: &Venue, args: GetOrderBookArgs) -> Result<ToolResult> {
    let token_id = args::required(args.token_id.as_deref(), "token_id")?;

    let request = OrderBookRequest::builder().token_id(token_id).build();
    let book = venue.clob().order_book(&request).await?;

    ToolResult::json(&format_order_book(token_id, &book))
}

fn to_u32(value: i64) -> Result<u32> {
    u32::try_from(value).map_err(|e| Error::validation(e.to_string()))
}
