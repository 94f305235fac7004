use bon::Builder;
use serde::Serialize;
use serde_with::skip_serializing_none;

use crate::types::Address;

/// Request parameters for the `/positions` endpoint.
///
/// Fetches current positions for a user, optionally narrowed to redeemable
/// holdings or a single market.
///
/// # Example
///
/// ```
/// use polymarket_mcp::data::types::request::PositionsRequest;
/// use polymarket_mcp::types::address;
///
/// let request = PositionsRequest::builder()
///     .user(address!("56687bf447db6ffa42ffe2204a05edaa20f55839"))
///     .redeemable(true)
///     .limit(50)
///     .build();
/// ```
#[skip_serializing_none]
#[derive(Debug, Clone, Builder, Serialize)]
#[non_exhaustive]
pub struct PositionsRequest {
    /// User address (required).
    #[builder(into)]
    pub user: Address,
    /// Only return positions that can be redeemed.
    pub redeemable: Option<bool>,
    /// Restrict to a single market condition id.
    #[builder(into)]
    pub market: Option<String>,
    /// Maximum number of positions to return (1-500).
    pub limit: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ToQueryParams as _;
    use crate::types::address;

    #[test]
    fn positions_request_should_serialize_only_set_fields() {
        let request = PositionsRequest::builder()
            .user(address!("56687bf447db6ffa42ffe2204a05edaa20f55839"))
            .limit(100)
            .build();

        assert_eq!(
            request.query_params().to_lowercase(),
            "?user=0x56687bf447db6ffa42ffe2204a05edaa20f55839&limit=100"
        );
    }

    #[test]
    fn positions_request_should_carry_filters() {
        let request = PositionsRequest::builder()
            .user(address!("56687bf447db6ffa42ffe2204a05edaa20f55839"))
            .redeemable(true)
            .market("0xabc")
            .build();

        let query = request.query_params();
        assert!(query.contains("redeemable=true"), "{query}");
        assert!(query.contains("market=0xabc"), "{query}");
    }
}
