use serde_json::json;

use super::ToolResult;
use super::args::{self, GetNewsArgs};
use crate::Result;
use crate::venue::Venue;

/// Recent headlines for a free-text query.
pub async fn get_news(venue: &Venue, args: GetNewsArgs) -> Result<ToolResult> {
    let query = args::required(args.query.as_deref(), "query")?;
    let limit = args::bounded(args.limit, 5, 1, 10, "limit")?;

    let articles = venue
        .news()
        .search(query, usize::try_from(limit).unwrap_or(10))
        .await?;

    ToolResult::json(&json!({
        "query": query,
        "count": articles.len(),
        "articles": articles,
    }))
}
