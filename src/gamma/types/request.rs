#![allow(
    clippy::module_name_repetitions,
    reason = "Request suffix is intentional for clarity"
)]

use bon::Builder;
use serde::Serialize;
use serde_with::skip_serializing_none;

#[skip_serializing_none]
#[derive(Debug, Clone, Builder, Default, Serialize)]
#[non_exhaustive]
pub struct MarketsRequest {
    pub limit: Option<u32>,
    pub offset: Option<u32>,
    #[builder(into)]
    pub order: Option<String>,
    pub ascending: Option<bool>,
    pub active: Option<bool>,
    pub closed: Option<bool>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    #[builder(default)]
    pub condition_ids: Vec<String>,
}

impl MarketsRequest {
    /// Open markets ordered by volume, largest first.
    #[must_use]
    pub fn top_by_volume(limit: u32, offset: u32) -> Self {
        Self::builder()
            .limit(limit)
            .offset(offset)
            .order("volumeNum")
            .ascending(false)
            .active(true)
            .closed(false)
            .build()
    }
}

#[derive(Debug, Clone, Builder, Serialize)]
#[non_exhaustive]
pub struct MarketBySlugRequest {
    #[serde(skip_serializing)]
    #[builder(into)]
    pub slug: String,
}
