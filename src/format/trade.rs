use serde::{Deserialize, Serialize};

use crate::clob::types::Trade;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormattedTrade {
    pub id: String,
    pub token_id: String,
    pub side: String,
    pub price: String,
    pub size: String,
    pub timestamp: String,
    pub status: String,
}

/// The match time is preferred; the last update time stands in when it is missing.
#[must_use]
pub fn format_trade(trade: &Trade) -> FormattedTrade {
    FormattedTrade {
        id: trade.id.clone(),
        token_id: trade.token_id.clone(),
        side: trade.side.clone(),
        price: trade.price.clone(),
        size: trade.size.clone(),
        timestamp: trade
            .match_time
            .clone()
            .or_else(|| trade.last_update.clone())
            .unwrap_or_default(),
        status: trade.status.clone(),
    }
}
