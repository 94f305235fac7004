//! Client for the Polymarket Gamma API.

use reqwest::{Client as ReqwestClient, Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

use super::types::request::{MarketBySlugRequest, MarketsRequest};
use super::types::response::Market;
use crate::error::Error;
use crate::{Result, ToQueryParams as _};

/// HTTP client for the Polymarket Gamma API.
///
/// The default API endpoint is `https://gamma-api.polymarket.com`.
#[derive(Clone, Debug)]
pub struct Client {
    host: Url,
    client: ReqwestClient,
}

impl Client {
    /// Creates a new Gamma API client with a custom host URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid or the HTTP client cannot be created.
    pub fn new(host: &str) -> Result<Client> {
        Ok(Self {
            host: Url::parse(host)?,
            client: crate::http_client(None)?,
        })
    }

    /// Returns the base URL of the API.
    #[must_use]
    pub fn host(&self) -> &Url {
        &self.host
    }

    /// The host URL with `segments` appended, each one percent-encoded.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.host.clone();
        url.path_segments_mut()
            .map_err(|()| Error::validation(format!("{} cannot be a base URL", self.host)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get<Req, Res>(&self, segments: &[&str], req: &Req) -> Result<Res>
    where
        Req: Serialize,
        Res: DeserializeOwned,
    {
        let url = format!("{}{}", self.endpoint(segments)?, req.query_params());
        let request = self.client.request(Method::GET, url).build()?;
        crate::request(&self.client, request, None).await
    }

    /// Lists markets matching the request filters, in upstream order.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the payload is not a list of markets.
    pub async fn markets(&self, request: &MarketsRequest) -> Result<Vec<Market>> {
        self.get(&["markets"], request).await
    }

    /// Retrieves a single market by its URL slug.
    ///
    /// A missing market surfaces as a [`crate::error::Kind::Status`] 404.
    pub async fn market_by_slug(&self, request: &MarketBySlugRequest) -> Result<Market> {
        self.get(&["markets", "slug", request.slug.as_str()], request).await
    }

    /// Retrieves a single market by condition id.
    ///
    /// Gamma answers this lookup with a (possibly empty) list; an empty list is
    /// reported as a 404 so callers treat both lookups the same way.
    pub async fn market_by_condition_id(&self, condition_id: &str) -> Result<Market> {
        let request = MarketsRequest::builder()
            .condition_ids(vec![condition_id.to_owned()])
            .build();

        self.markets(&request).await?.into_iter().next().ok_or_else(|| {
            Error::status(
                StatusCode::NOT_FOUND,
                Method::GET,
                "/markets".to_owned(),
                format!("no market with condition id {condition_id}"),
            )
        })
    }
}
