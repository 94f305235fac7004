//! The venue handle shared by every tool.
//!
//! A [`Venue`] owns the upstream HTTP clients and, once [`Venue::initialize`]
//! has run, the authenticated [`Exchange`]. It is built once at startup and
//! passed by reference to every handler.

use std::sync::Arc;

use tokio::sync::OnceCell;
use url::Url;

use crate::Result;
use crate::clob::{self, Exchange, SdkExchange};
use crate::config::Config;
use crate::error::Error;
use crate::types::Address;
use crate::{data, gamma, news};

pub struct Venue {
    config: Config,
    exchange: OnceCell<Arc<dyn Exchange>>,
    gamma: gamma::Client,
    data: data::Client,
    clob: clob::Client,
    news: news::Client,
}

impl std::fmt::Debug for Venue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Venue")
            .field("funder_address", &self.config.funder_address)
            .field("readonly", &self.config.readonly)
            .field("initialized", &self.exchange.initialized())
            .finish_non_exhaustive()
    }
}

impl Venue {
    /// Builds the HTTP clients. No network traffic happens until a tool runs
    /// or [`Self::initialize`] is called.
    pub fn new(config: Config) -> Result<Self> {
        Ok(Self {
            gamma: gamma::Client::new(config.hosts.gamma.as_str())?,
            data: data::Client::new(config.hosts.data.as_str())?,
            clob: clob::Client::new(config.hosts.clob.as_str())?,
            news: news::Client::new(config.hosts.news.as_str())?,
            exchange: OnceCell::new(),
            config,
        })
    }

    /// Builds a venue around an already-connected exchange.
    pub fn with_exchange(config: Config, exchange: Arc<dyn Exchange>) -> Result<Self> {
        let venue = Self::new(config)?;
        venue
            .exchange
            .set(exchange)
            .map_err(|_e| Error::internal("exchange already set"))?;
        Ok(venue)
    }

    /// Connects the authenticated exchange client. Calling it again after a
    /// successful connection does nothing.
    pub async fn initialize(&self) -> Result<()> {
        self.exchange
            .get_or_try_init(|| async {
                let exchange = SdkExchange::connect(&self.config).await?;
                Ok::<_, Error>(Arc::new(exchange) as Arc<dyn Exchange>)
            })
            .await?;
        Ok(())
    }

    /// The exchange client; fails until [`Self::initialize`] has completed.
    pub fn client(&self) -> Result<&dyn Exchange> {
        self.exchange
            .get()
            .map(AsRef::as_ref)
            .ok_or_else(Error::not_initialized)
    }

    /// Gate for every mutating operation. Must run before any side effect.
    pub fn ensure_write_access(&self) -> Result<()> {
        if self.config.readonly {
            tracing::warn!("rejected write operation in readonly mode");
            return Err(Error::readonly());
        }
        Ok(())
    }

    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    #[must_use]
    pub fn is_readonly(&self) -> bool {
        self.config.readonly
    }

    #[must_use]
    pub fn funder_address(&self) -> Address {
        self.config.funder_address
    }

    #[must_use]
    pub fn gamma_host(&self) -> &Url {
        self.gamma.host()
    }

    #[must_use]
    pub fn clob_host(&self) -> &Url {
        self.clob.host()
    }

    #[must_use]
    pub fn data_host(&self) -> &Url {
        self.data.host()
    }

    #[must_use]
    pub fn gamma(&self) -> &gamma::Client {
        &self.gamma
    }

    #[must_use]
    pub fn data(&self) -> &data::Client {
        &self.data
    }

    #[must_use]
    pub fn clob(&self) -> &clob::Client {
        &self.clob
    }

    #[must_use]
    pub fn news(&self) -> &news::Client {
        &self.news
    }
}
