//! Unauthenticated CLOB reads.

use bon::Builder;
use reqwest::{Client as ReqwestClient, Method};
use serde::Serialize;
use url::Url;

use super::types::OrderBook;
use crate::{Result, ToQueryParams as _};

#[derive(Debug, Clone, Builder, Serialize)]
#[non_exhaustive]
pub struct OrderBookRequest {
    #[builder(into)]
    pub token_id: String,
}

/// HTTP client for the public CLOB endpoints.
#[derive(Clone, Debug)]
pub struct Client {
    host: Url,
    client: ReqwestClient,
}

impl Client {
    pub fn new(host: &str) -> Result<Client> {
        Ok(Self {
            host: Url::parse(host)?,
            client: crate::http_client(None)?,
        })
    }

    #[must_use]
    pub fn host(&self) -> &Url {
        &self.host
    }

    /// Retrieves the live bid/ask ladder for one outcome token.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the token has no book.
    pub async fn order_book(&self, request: &OrderBookRequest) -> Result<OrderBook> {
        let params = request.query_params();
        let request = self
            .client
            .request(Method::GET, format!("{}book{params}", self.host))
            .build()?;

        crate::request(&self.client, request, None).await
    }
}
