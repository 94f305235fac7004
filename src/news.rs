//! Headline search over a public RSS news feed.
//!
//! The feed is plain RSS 2.0. Items are pulled out with simple tag scanning;
//! the feed's markup is regular enough that a full XML parser buys nothing.

use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;
use reqwest::{Client as ReqwestClient, Method};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::Result;
use crate::error::Error;

/// Upper bound for a feed fetch; the tool fails rather than hanging.
pub const NEWS_TIMEOUT: Duration = Duration::from_secs(10);

#[expect(clippy::unwrap_used, reason = "Pattern is a compile-time constant")]
static ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<item\b[^>]*>(.*?)</item>").unwrap());

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub title: String,
    pub source: String,
    pub published: String,
    pub link: String,
}

/// HTTP client for the news feed.
#[derive(Clone, Debug)]
pub struct Client {
    host: Url,
    client: ReqwestClient,
}

impl Client {
    pub fn new(host: &str) -> Result<Client> {
        Ok(Self {
            host: Url::parse(host)?,
            client: crate::http_client(Some(NEWS_TIMEOUT))?,
        })
    }

    /// Searches the feed and returns at most `limit` articles in feed order.
    ///
    /// # Errors
    ///
    /// Returns an error on a non-2xx status, a transport failure or a timeout.
    #[tracing::instrument(level = "debug", skip(self))]
    pub async fn search(&self, query: &str, limit: usize) -> Result<Vec<Article>> {
        let mut url = self.host.join("rss/search")?;
        url.query_pairs_mut()
            .append_pair("q", query)
            .append_pair("hl", "en-US")
            .append_pair("gl", "US")
            .append_pair("ceid", "US:en");

        let request = self.client.request(Method::GET, url).build()?;
        let path = request.url().path().to_owned();
        let response = self.client.execute(request).await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            tracing::warn!(status = %status, "news feed request failed");
            return Err(Error::status(status, Method::GET, path, body));
        }

        Ok(parse_feed(&body).into_iter().take(limit).collect())
    }
}

/// Extracts every `<item>` of an RSS document.
#[must_use]
pub fn parse_feed(xml: &str) -> Vec<Article> {
    ITEM.captures_iter(xml)
        .filter_map(|captures| captures.get(1))
        .map(|item| {
            let item = item.as_str();
            let field = |tag: &str| tag_text(item, tag).unwrap_or_default();
            Article {
                title: field("title"),
                source: field("source"),
                published: field("pubDate"),
                link: field("link"),
            }
        })
        .collect()
}

fn tag_text(item: &str, tag: &str) -> Option<String> {
    let open = format!("<{tag}");
    let close = format!("</{tag}>");

    let start = item.find(&open)?;
    let rest = item.get(start + open.len()..)?;
    // `<source url="...">` carries attributes; skip to the end of the open tag.
    let body_start = rest.find('>')? + 1;
    let rest = rest.get(body_start..)?;
    let end = rest.find(&close)?;

    Some(decode_entities(strip_cdata(rest.get(..end)?.trim())))
}

fn strip_cdata(text: &str) -> &str {
    text.strip_prefix("<![CDATA[")
        .and_then(|inner| inner.strip_suffix("]]>"))
        .unwrap_or(text)
}

/// Decodes the XML entities the feed actually emits. `&amp;` goes last so that
/// an escaped entity such as `&amp;lt;` decodes to the literal `&lt;`.
#[must_use]
pub fn decode_entities(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}
