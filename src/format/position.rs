use serde::{Deserialize, Serialize};

use crate::data::types::response::Position;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormattedPosition {
    pub token_id: String,
    pub condition_id: String,
    pub outcome: String,
    pub size: String,
    pub avg_price: String,
    pub current_price: String,
    pub cash_pnl: String,
    pub percent_pnl: String,
    pub redeemable: bool,
    pub mergeable: bool,
    pub title: String,
    pub slug: String,
    pub end_date: String,
}

#[must_use]
pub fn format_position(position: &Position) -> FormattedPosition {
    let number = |value: &Option<String>| value.clone().unwrap_or_else(|| "0".to_owned());
    let label = |value: &Option<String>| value.clone().unwrap_or_else(|| "Unknown".to_owned());

    FormattedPosition {
        token_id: position.asset.clone().unwrap_or_default(),
        condition_id: position.condition_id.clone().unwrap_or_default(),
        outcome: label(&position.outcome),
        size: number(&position.size),
        avg_price: number(&position.avg_price),
        current_price: number(&position.cur_price),
        cash_pnl: number(&position.cash_pnl),
        percent_pnl: number(&position.percent_pnl),
        redeemable: position.redeemable,
        mergeable: position.mergeable,
        title: label(&position.title),
        slug: position.slug.clone().unwrap_or_default(),
        end_date: position.end_date.clone().unwrap_or_default(),
    }
}
