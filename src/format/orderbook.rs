use serde::{Deserialize, Serialize};

use crate::clob::types::{OrderBook, OrderSummary};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceLevel {
    pub price: String,
    pub size: String,
}

/// Bid and ask ladders in upstream order. Empty sides are kept as empty lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormattedOrderBook {
    pub token_id: String,
    pub bids: Vec<PriceLevel>,
    pub asks: Vec<PriceLevel>,
}

#[must_use]
pub fn format_order_book(token_id: &str, book: &OrderBook) -> FormattedOrderBook {
    let levels = |side: &[OrderSummary]| {
        side.iter()
            .map(|level| PriceLevel {
                price: level.price.clone(),
                size: level.size.clone(),
            })
            .collect()
    };

    FormattedOrderBook {
        token_id: token_id.to_owned(),
        bids: levels(&book.bids),
        asks: levels(&book.asks),
    }
}
