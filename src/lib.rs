//! Model Context Protocol server for the Polymarket prediction-market venue.
//!
//! Exposes market discovery, order books, account state and (outside readonly
//! mode) order placement as tools an agent host can call over stdio.

pub mod clob;
pub mod config;
pub mod data;
pub mod error;
pub mod format;
pub mod gamma;
pub mod news;
pub mod registry;
pub(crate) mod serde_helpers;
pub mod server;
pub mod tools;
pub mod types;
pub mod venue;

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Request, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Market metadata service.
pub const GAMMA_HOST: &str = "https://gamma-api.polymarket.com";

/// Order book and order submission service.
pub const CLOB_HOST: &str = "https://clob.polymarket.com";

/// Positions and analytics service.
pub const DATA_HOST: &str = "https://data-api.polymarket.com";

/// Trait for converting request types to URL query parameters.
///
/// This trait is automatically implemented for all types that implement [`Serialize`].
/// It uses [`serde_html_form`] to serialize the struct fields into a query string.
pub trait ToQueryParams: Serialize {
    /// Converts the request to a URL query string.
    ///
    /// Returns an empty string if no parameters are set, otherwise returns
    /// a string starting with `?` followed by URL-encoded key-value pairs.
    fn query_params(&self) -> String {
        let params = serde_html_form::to_string(self)
            .inspect_err(|e| tracing::error!("Unable to convert to URL-encoded string {e:?}"))
            .unwrap_or_default();

        if params.is_empty() {
            String::new()
        } else {
            format!("?{params}")
        }
    }
}

impl<T: Serialize> ToQueryParams for T {}

/// Shared HTTP client setup for every upstream service.
pub(crate) fn http_client(timeout: Option<Duration>) -> Result<reqwest::Client> {
    let mut headers = HeaderMap::new();

    headers.insert(
        "User-Agent",
        HeaderValue::from_static(concat!("polymarket-mcp/", env!("CARGO_PKG_VERSION"))),
    );
    headers.insert("Accept", HeaderValue::from_static("*/*"));
    headers.insert("Connection", HeaderValue::from_static("keep-alive"));

    let mut builder = reqwest::Client::builder().default_headers(headers);
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }

    Ok(builder.build()?)
}

#[tracing::instrument(
    level = "debug",
    skip(client, request, headers),
    fields(
        method = %request.method(),
        path = request.url().path(),
        status_code
    )
)]
async fn request<Response: DeserializeOwned>(
    client: &reqwest::Client,
    mut request: Request,
    headers: Option<HeaderMap>,
) -> Result<Response> {
    let method = request.method().clone();
    let path = request.url().path().to_owned();

    if let Some(h) = headers {
        *request.headers_mut() = h;
    }

    let response = client.execute(request).await?;
    let status_code = response.status();

    tracing::Span::current().record("status_code", status_code.as_u16());

    if !status_code.is_success() {
        let message = response.text().await.unwrap_or_default();

        tracing::warn!(
            status = %status_code,
            method = %method,
            path = %path,
            message = %message,
            "API request failed"
        );

        return Err(Error::status(status_code, method, path, message));
    }

    let json_value = response.json::<serde_json::Value>().await?;
    let response_data: Option<Response> = serde_helpers::deserialize_with_path(json_value)?;

    if let Some(response) = response_data {
        Ok(response)
    } else {
        tracing::warn!(method = %method, path = %path, "API resource not found");
        Err(Error::status(
            StatusCode::NOT_FOUND,
            method,
            path,
            "Unable to find requested resource",
        ))
    }
}
