use serde::Deserialize;
use serde_with::{DefaultOnNull, serde_as};

use crate::serde_helpers::StringFromAny;

/// A user's current position in one outcome token, as reported by `/positions`.
///
/// Numeric fields are kept as the upstream's decimal text so that no precision
/// is lost on the way to the caller.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
#[non_exhaustive]
pub struct Position {
    /// The outcome token asset identifier.
    #[serde_as(as = "Option<StringFromAny>")]
    #[serde(default)]
    pub asset: Option<String>,
    pub condition_id: Option<String>,
    #[serde_as(as = "Option<StringFromAny>")]
    #[serde(default)]
    pub size: Option<String>,
    #[serde_as(as = "Option<StringFromAny>")]
    #[serde(default)]
    pub avg_price: Option<String>,
    #[serde_as(as = "Option<StringFromAny>")]
    #[serde(default)]
    pub cur_price: Option<String>,
    #[serde_as(as = "Option<StringFromAny>")]
    #[serde(default)]
    pub cash_pnl: Option<String>,
    #[serde_as(as = "Option<StringFromAny>")]
    #[serde(default)]
    pub percent_pnl: Option<String>,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub redeemable: bool,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub mergeable: bool,
    pub title: Option<String>,
    pub slug: Option<String>,
    pub outcome: Option<String>,
    pub end_date: Option<String>,
}
