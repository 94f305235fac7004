//! Process configuration resolved from the environment.
//!
//! The environment is read once; [`Config::global`] memoizes the first
//! successful resolution for the lifetime of the process. Embedders that do not
//! want to touch the environment build a [`Config`] from [`ConfigOptions`]
//! directly.

use std::str::FromStr as _;
use std::sync::OnceLock;

use alloy::signers::Signer as _;
use alloy::signers::local::PrivateKeySigner;
use bon::Builder;
use polymarket_client_sdk::POLYGON;
use secrecy::{ExposeSecret as _, SecretString};
use url::Url;
use uuid::Uuid;

use crate::error::Error;
use crate::types::{Address, ChainId};
use crate::{CLOB_HOST, DATA_HOST, GAMMA_HOST, Result};

pub const PRIVATE_KEY_VAR: &str = "POLYMARKET_PRIVATE_KEY";
pub const FUNDER_ADDRESS_VAR: &str = "POLYMARKET_FUNDER_ADDRESS";
pub const CHAIN_ID_VAR: &str = "POLYMARKET_CHAIN_ID";
pub const READONLY_VAR: &str = "POLYMARKET_READONLY";
pub const API_KEY_VAR: &str = "POLYMARKET_API_KEY";
pub const API_SECRET_VAR: &str = "POLYMARKET_API_SECRET";
pub const API_PASSPHRASE_VAR: &str = "POLYMARKET_API_PASSPHRASE";

/// Public news search feed.
pub const NEWS_HOST: &str = "https://news.google.com";

static GLOBAL: OnceLock<Config> = OnceLock::new();

/// Pre-issued CLOB API credentials.
#[non_exhaustive]
#[derive(Debug, Clone)]
pub struct ApiCredentials {
    pub key: Uuid,
    pub secret: SecretString,
    pub passphrase: SecretString,
}

/// Base URLs of every upstream service the tools talk to.
#[non_exhaustive]
#[derive(Debug, Clone)]
pub struct Hosts {
    pub gamma: Url,
    pub clob: Url,
    pub data: Url,
    pub news: Url,
}

impl Hosts {
    fn resolve(options: &ConfigOptions) -> Result<Self> {
        let parse = |value: Option<&String>, default: &str| -> Result<Url> {
            Ok(Url::parse(value.map_or(default, String::as_str))?)
        };

        Ok(Self {
            gamma: parse(options.gamma_host.as_ref(), GAMMA_HOST)?,
            clob: parse(options.clob_host.as_ref(), CLOB_HOST)?,
            data: parse(options.data_host.as_ref(), DATA_HOST)?,
            news: parse(options.news_host.as_ref(), NEWS_HOST)?,
        })
    }
}

/// Raw, unvalidated configuration input.
///
/// Every field is optional so that a missing private key surfaces as
/// [`crate::error::Kind::Config`] rather than a type error.
#[non_exhaustive]
#[derive(Debug, Default, Clone, Builder)]
#[builder(on(String, into))]
pub struct ConfigOptions {
    pub private_key: Option<String>,
    pub funder_address: Option<String>,
    pub chain_id: Option<ChainId>,
    #[builder(default)]
    pub readonly: bool,
    pub api_key: Option<String>,
    pub api_secret: Option<String>,
    pub api_passphrase: Option<String>,
    pub gamma_host: Option<String>,
    pub clob_host: Option<String>,
    pub data_host: Option<String>,
    pub news_host: Option<String>,
}

impl ConfigOptions {
    /// Collects options from a variable lookup, typically [`std::env::var`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let chain_id = get(CHAIN_ID_VAR)
            .map(|raw| {
                raw.trim()
                    .parse::<ChainId>()
                    .map_err(|e| Error::invalid_config(CHAIN_ID_VAR, e.to_string()))
            })
            .transpose()?;

        Ok(Self {
            private_key: get(PRIVATE_KEY_VAR),
            funder_address: get(FUNDER_ADDRESS_VAR),
            chain_id,
            readonly: get(READONLY_VAR).is_some_and(|raw| is_truthy(&raw)),
            api_key: get(API_KEY_VAR),
            api_secret: get(API_SECRET_VAR),
            api_passphrase: get(API_PASSPHRASE_VAR),
            ..Self::default()
        })
    }
}

/// Readonly is only switched on by the literal string `true`, in any case.
fn is_truthy(raw: &str) -> bool {
    raw.eq_ignore_ascii_case("true")
}

/// Validated, immutable process configuration.
#[non_exhaustive]
#[derive(Debug, Clone)]
pub struct Config {
    pub private_key: SecretString,
    pub signer_address: Address,
    pub funder_address: Address,
    pub chain_id: ChainId,
    pub readonly: bool,
    pub credentials: Option<ApiCredentials>,
    pub hosts: Hosts,
}

impl Config {
    /// Resolves configuration from the process environment once and caches it.
    ///
    /// A failed resolution is not cached; the binary treats it as fatal.
    pub fn global() -> Result<&'static Config> {
        if let Some(config) = GLOBAL.get() {
            return Ok(config);
        }

        let config = Self::from_env()?;
        Ok(GLOBAL.get_or_init(|| config))
    }

    /// Resolves configuration from the process environment without caching.
    pub fn from_env() -> Result<Self> {
        Self::from_options(ConfigOptions::from_lookup(|name| std::env::var(name).ok())?)
    }

    /// Builds configuration from explicit options, applying the same defaults
    /// as the environment path.
    pub fn from_options(options: ConfigOptions) -> Result<Self> {
        let hosts = Hosts::resolve(&options)?;

        let private_key = options
            .private_key
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| Error::missing_credential(PRIVATE_KEY_VAR))?;
        let signer = parse_signer(&private_key)?;
        let signer_address = signer.address();

        let funder_address = match options.funder_address {
            Some(raw) => Address::from_str(raw.trim())
                .map_err(|e| Error::invalid_config(FUNDER_ADDRESS_VAR, e.to_string()))?,
            None => signer_address,
        };

        let credentials = match (options.api_key, options.api_secret, options.api_passphrase) {
            (Some(key), Some(secret), Some(passphrase)) => Some(ApiCredentials {
                key: Uuid::parse_str(key.trim())
                    .map_err(|e| Error::invalid_config(API_KEY_VAR, e.to_string()))?,
                secret: SecretString::from(secret),
                passphrase: SecretString::from(passphrase),
            }),
            (None, None, None) => None,
            _ => {
                return Err(Error::invalid_config(
                    API_KEY_VAR,
                    format!(
                        "{API_KEY_VAR}, {API_SECRET_VAR} and {API_PASSPHRASE_VAR} must be set together"
                    ),
                ));
            }
        };

        Ok(Self {
            private_key: SecretString::from(private_key),
            signer_address,
            funder_address,
            chain_id: options.chain_id.unwrap_or(POLYGON),
            readonly: options.readonly,
            credentials,
            hosts,
        })
    }

    /// The local signer for the configured key, bound to the configured chain.
    pub fn signer(&self) -> Result<PrivateKeySigner> {
        Ok(parse_signer(self.private_key.expose_secret())?.with_chain_id(Some(self.chain_id)))
    }

    /// `true` when orders are signed by the funding address itself.
    #[must_use]
    pub fn is_eoa(&self) -> bool {
        self.funder_address == self.signer_address
    }
}

fn parse_signer(private_key: &str) -> Result<PrivateKeySigner> {
    PrivateKeySigner::from_str(private_key.trim())
        .map_err(|e| Error::invalid_config(PRIVATE_KEY_VAR, e.to_string()))
}
