//! Client for the Polymarket Data API.

use reqwest::{Client as ReqwestClient, Method};
use url::Url;

use super::types::request::PositionsRequest;
use super::types::response::Position;
use crate::{Result, ToQueryParams as _};

/// HTTP client for the Polymarket Data API.
#[derive(Clone, Debug)]
pub struct Client {
    host: Url,
    client: ReqwestClient,
}

impl Client {
    /// Creates a new Data API client with a custom host URL.
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

    /// Retrieves current positions for a user.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the payload is not a list of positions.
    pub async fn positions(&self, request: &PositionsRequest) -> Result<Vec<Position>> {
        let query = request.query_params();
        let request = self
            .client
            .request(Method::GET, format!("{}positions{query}", self.host))
            .build()?;

        crate::request(&self.client, request, None).await
    }
}
