//! The signing and order-submission seam.
//!
//! Tool handlers only see the [`Exchange`] trait. [`SdkExchange`] implements it
//! on top of `polymarket-client-sdk`, which owns key handling, L1/L2 request
//! signing and EIP-712 order signatures.

use std::collections::BTreeMap;

use alloy::signers::local::PrivateKeySigner;
use async_trait::async_trait;
use chrono::SecondsFormat;
use polymarket_client_sdk::auth::state::{Authenticated, Unauthenticated};
use polymarket_client_sdk::auth::{Credentials, Normal};
use polymarket_client_sdk::clob::types::request::{BalanceAllowanceRequest, TradesRequest};
use polymarket_client_sdk::clob::types::response::{PostOrderResponse, TradeResponse};
use polymarket_client_sdk::clob::types::{
    Amount, AssetType, OrderType, Side as SdkSide, SignatureType, TickSize,
};
use polymarket_client_sdk::clob::{Client as SdkClient, Config as SdkConfig};
use rust_decimal::Decimal;
use secrecy::ExposeSecret as _;
use tracing::{debug, info, instrument, warn};

use super::types::{
    BalanceAllowance, CancelAck, LimitOrder, MarketOrder, MarketOrderType, OrderAck, Side, Trade,
};
use crate::Result;
use crate::config::Config;
use crate::error::{Error, Internal, Kind};
use crate::types::U256;

type AuthenticatedClient = SdkClient<Authenticated<Normal>>;
type PublicClient = SdkClient<Unauthenticated>;

/// Account-level venue operations.
#[async_trait]
pub trait Exchange: Send + Sync {
    /// Collateral balance and allowances, in raw base units.
    async fn balance_allowance(&self) -> Result<BalanceAllowance>;

    /// Asks the venue to re-read on-chain balance and allowance.
    async fn update_allowance(&self) -> Result<()>;

    /// Recent fills for the account, newest first as the venue returns them.
    async fn trades(&self) -> Result<Vec<Trade>>;

    /// Minimum price increment for one token.
    async fn tick_size(&self, token_id: U256) -> Result<Decimal>;

    /// Whether the token settles through the negative-risk exchange.
    async fn neg_risk(&self, token_id: U256) -> Result<bool>;

    /// Builds, signs and posts a GTC limit order.
    async fn post_limit_order(&self, order: &LimitOrder) -> Result<OrderAck>;

    /// Builds, signs and posts a market order.
    async fn post_market_order(&self, order: &MarketOrder) -> Result<OrderAck>;

    async fn cancel_order(&self, order_id: &str) -> Result<CancelAck>;
}

enum Session {
    Authenticated(Box<AuthenticatedClient>),
    Public(PublicClient),
}

/// [`Exchange`] backed by the published CLOB SDK.
pub struct SdkExchange {
    session: Session,
    signer: PrivateKeySigner,
}

impl std::fmt::Debug for SdkExchange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SdkExchange")
            .field("address", &self.signer.address())
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}

impl SdkExchange {
    /// Authenticates against the CLOB.
    ///
    /// Configured API credentials are used as-is; otherwise the SDK creates or
    /// derives them from the signing key. If authentication fails the exchange
    /// stays usable for public lookups and reports every account call as
    /// unauthenticated.
    #[instrument(level = "debug", skip(config), fields(chain_id = config.chain_id))]
    pub async fn connect(config: &Config) -> Result<Self> {
        let signer = config.signer()?;
        let host = config.hosts.clob.as_str();

        let mut builder =
            SdkClient::new(host, SdkConfig::default())?.authentication_builder(&signer);
        if let Some(credentials) = &config.credentials {
            builder = builder.credentials(Credentials::new(
                credentials.key,
                credentials.secret.expose_secret().to_owned(),
                credentials.passphrase.expose_secret().to_owned(),
            ));
        }
        builder = if config.is_eoa() {
            builder.signature_type(SignatureType::Eoa)
        } else {
            builder
                .funder(config.funder_address)
                .signature_type(SignatureType::Proxy)
        };

        let session = match builder.authenticate().await {
            Ok(client) => {
                info!(
                    address = %signer.address(),
                    funder = %config.funder_address,
                    "CLOB client authenticated"
                );
                Session::Authenticated(Box::new(client))
            }
            Err(e) => {
                warn!(error = %e, "CLOB authentication failed, continuing unauthenticated");
                Session::Public(SdkClient::new(host, SdkConfig::default())?)
            }
        };

        Ok(Self { session, signer })
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        matches!(self.session, Session::Authenticated(_))
    }

    fn authenticated(&self) -> Result<&AuthenticatedClient> {
        match &self.session {
            Session::Authenticated(client) => Ok(&**client),
            Session::Public(_) => Err(Error::with_source(
                Kind::Status,
                Internal {
                    message: "CLOB client is not authenticated; API credentials could not be \
                              derived or were rejected"
                        .to_owned(),
                },
            )),
        }
    }
}

#[async_trait]
impl Exchange for SdkExchange {
    async fn balance_allowance(&self) -> Result<BalanceAllowance> {
        let client = self.authenticated()?;
        let request = BalanceAllowanceRequest::builder()
            .asset_type(AssetType::Collateral)
            .build();
        let response = client.balance_allowance(request).await?;

        let allowances = response
            .allowances
            .into_iter()
            .map(|(spender, amount)| (spender.to_string(), amount))
            .collect();

        Ok(BalanceAllowance::new(response.balance, allowances))
    }

    async fn update_allowance(&self) -> Result<()> {
        let client = self.authenticated()?;
        let request = BalanceAllowanceRequest::builder()
            .asset_type(AssetType::Collateral)
            .build();

        Ok(client.update_balance_allowance(request).await?)
    }

    async fn trades(&self) -> Result<Vec<Trade>> {
        let client = self.authenticated()?;
        let page = client.trades(&TradesRequest::default(), None).await?;

        Ok(page.data.into_iter().map(trade_from_sdk).collect())
    }

    async fn tick_size(&self, token_id: U256) -> Result<Decimal> {
        let response = match &self.session {
            Session::Authenticated(client) => client.tick_size(token_id).await?,
            Session::Public(client) => client.tick_size(token_id).await?,
        };

        Ok(Decimal::from(response.minimum_tick_size))
    }

    async fn neg_risk(&self, token_id: U256) -> Result<bool> {
        let response = match &self.session {
            Session::Authenticated(client) => client.neg_risk(token_id).await?,
            Session::Public(client) => client.neg_risk(token_id).await?,
        };

        Ok(response.neg_risk)
    }

    async fn post_limit_order(&self, order: &LimitOrder) -> Result<OrderAck> {
        let client = self.authenticated()?;
        let parameters = order.parameters;

        // The SDK reads both values from its per-token cache while building and
        // signing. Defaults may only live there for this one order.
        if parameters.tick_size.is_none() {
            let tick_size = TickSize::try_from(parameters.tick_size_or_default())?;
            client.set_tick_size(order.token_id, tick_size);
        }
        if parameters.neg_risk.is_none() {
            client.set_neg_risk(order.token_id, parameters.neg_risk_or_default());
        }

        let signed: polymarket_client_sdk::Result<_> = async {
            let signable = client
                .limit_order()
                .token_id(order.token_id)
                .side(sdk_side(order.side))
                .price(order.price)
                .size(order.size)
                .order_type(OrderType::GTC)
                .build()
                .await?;
            client.sign(&self.signer, signable).await
        }
        .await;

        if !parameters.is_complete() {
            debug!(token_id = %order.token_id, "dropping fallback market parameters from cache");
            client.invalidate_internal_caches();
        }

        Ok(ack_from_sdk(client.post_order(signed?).await?))
    }

    async fn post_market_order(&self, order: &MarketOrder) -> Result<OrderAck> {
        let client = self.authenticated()?;

        let amount = match order.side {
            Side::Buy => Amount::usdc(order.amount)?,
            Side::Sell => Amount::shares(order.amount)?,
        };
        let order_type = match order.order_type {
            MarketOrderType::FOK => OrderType::FOK,
            MarketOrderType::FAK => OrderType::FAK,
        };

        let signable = client
            .market_order()
            .token_id(order.token_id)
            .side(sdk_side(order.side))
            .amount(amount)
            .order_type(order_type)
            .build()
            .await?;
        let signed = client.sign(&self.signer, signable).await?;

        Ok(ack_from_sdk(client.post_order(signed).await?))
    }

    async fn cancel_order(&self, order_id: &str) -> Result<CancelAck> {
        let client = self.authenticated()?;
        let response = client.cancel_order(order_id).await?;

        Ok(CancelAck::new(
            response.canceled,
            response.not_canceled.into_iter().collect::<BTreeMap<_, _>>(),
        ))
    }
}

fn sdk_side(side: Side) -> SdkSide {
    match side {
        Side::Buy => SdkSide::Buy,
        Side::Sell => SdkSide::Sell,
    }
}

fn ack_from_sdk(response: PostOrderResponse) -> OrderAck {
    OrderAck::new(
        response.order_id,
        response.status.to_string(),
        response.success,
        response.error_msg.filter(|message| !message.is_empty()),
    )
}

fn trade_from_sdk(trade: TradeResponse) -> Trade {
    Trade {
        id: trade.id,
        token_id: trade.asset_id.to_string(),
        side: trade.side.to_string(),
        price: trade.price.to_string(),
        size: trade.size.to_string(),
        status: trade.status.to_string(),
        match_time: Some(trade.match_time.to_rfc3339_opts(SecondsFormat::Secs, true)),
        last_update: Some(trade.last_update.to_rfc3339_opts(SecondsFormat::Secs, true)),
    }
}
