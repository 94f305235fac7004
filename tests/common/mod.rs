#![allow(
    clippy::unwrap_used,
    clippy::missing_panics_doc,
    reason = "Do not need additional syntax for setting up tests"
)]
#![allow(
    unused,
    reason = "Each test binary uses a different subset of these helpers"
)]

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use httpmock::MockServer;
use polymarket_mcp::Result;
use polymarket_mcp::clob::Exchange;
use polymarket_mcp::clob::types::{
    BalanceAllowance, CancelAck, LimitOrder, MarketOrder, OrderAck, Trade,
};
use polymarket_mcp::config::{Config, ConfigOptions};
use polymarket_mcp::error::{Error, Method, StatusCode};
use polymarket_mcp::types::{Decimal, U256, dec};
use polymarket_mcp::venue::Venue;

// publicly known private key
pub const PRIVATE_KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
pub const ADDRESS: &str = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266";

pub const TOKEN_ID: &str =
    "15871154585880608648532107628464183779895785213830018178010423617714102767076";

/// 2^256 - 1, the allowance an unlimited approval reports.
pub const MAX_ALLOWANCE: &str =
    "115792089237316195423570985008687907853269984665640564039457584007913129639935";

/// Configuration with every upstream host pointed at `server`.
pub fn config(server: &MockServer, readonly: bool) -> Config {
    let options = ConfigOptions::builder()
        .private_key(PRIVATE_KEY.to_owned())
        .readonly(readonly)
        .gamma_host(server.base_url())
        .clob_host(server.base_url())
        .data_host(server.base_url())
        .news_host(server.base_url())
        .build();

    Config::from_options(options).unwrap()
}

/// A venue whose exchange was never initialized. Enough for the public tools.
pub fn venue(server: &MockServer, readonly: bool) -> Venue {
    Venue::new(config(server, readonly)).unwrap()
}

pub fn venue_with(server: &MockServer, readonly: bool, exchange: Arc<FakeExchange>) -> Venue {
    Venue::with_exchange(config(server, readonly), exchange).unwrap()
}

/// In-memory [`Exchange`] that records what it was asked to do.
#[derive(Debug, Default)]
pub struct FakeExchange {
    pub calls: AtomicUsize,
    pub allowance_updates: AtomicUsize,
    pub fail_tick_size: bool,
    pub fail_neg_risk: bool,
    pub trades: Vec<Trade>,
    pub not_canceled: BTreeMap<String, String>,
    pub limit_orders: Mutex<Vec<LimitOrder>>,
    pub market_orders: Mutex<Vec<MarketOrder>>,
    pub cancelled: Mutex<Vec<String>>,
}

impl FakeExchange {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn record(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl Exchange for FakeExchange {
    async fn balance_allowance(&self) -> Result<BalanceAllowance> {
        self.record();
        Ok(BalanceAllowance::new(
            dec!(12_500_000),
            BTreeMap::from([
                ("0xexchange".to_owned(), MAX_ALLOWANCE.to_owned()),
                ("0xnegrisk".to_owned(), "5000000".to_owned()),
            ]),
        ))
    }

    async fn update_allowance(&self) -> Result<()> {
        self.record();
        self.allowance_updates.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn trades(&self) -> Result<Vec<Trade>> {
        self.record();
        Ok(self.trades.clone())
    }

    async fn tick_size(&self, _token_id: U256) -> Result<Decimal> {
        self.record();
        if self.fail_tick_size {
            return Err(lookup_failure("/tick-size"));
        }
        Ok(dec!(0.001))
    }

    async fn neg_risk(&self, _token_id: U256) -> Result<bool> {
        self.record();
        if self.fail_neg_risk {
            return Err(lookup_failure("/neg-risk"));
        }
        Ok(true)
    }

    async fn post_limit_order(&self, order: &LimitOrder) -> Result<OrderAck> {
        self.record();
        self.limit_orders.lock().unwrap().push(order.clone());
        Ok(OrderAck::new("0xlimit".to_owned(), "live".to_owned(), true, None))
    }

    async fn post_market_order(&self, order: &MarketOrder) -> Result<OrderAck> {
        self.record();
        self.market_orders.lock().unwrap().push(order.clone());
        Ok(OrderAck::new("0xmarket".to_owned(), "matched".to_owned(), true, None))
    }

    async fn cancel_order(&self, order_id: &str) -> Result<CancelAck> {
        self.record();
        self.cancelled.lock().unwrap().push(order_id.to_owned());

        let canceled = if self.not_canceled.contains_key(order_id) {
            Vec::new()
        } else {
            vec![order_id.to_owned()]
        };
        Ok(CancelAck::new(canceled, self.not_canceled.clone()))
    }
}

fn lookup_failure(path: &str) -> Error {
    Error::status(
        StatusCode::INTERNAL_SERVER_ERROR,
        Method::GET,
        path.to_owned(),
        "boom",
    )
}

pub fn trade(id: &str, match_time: Option<&str>, last_update: Option<&str>) -> Trade {
    Trade {
        id: id.to_owned(),
        token_id: TOKEN_ID.to_owned(),
        side: "BUY".to_owned(),
        price: "0.55".to_owned(),
        size: "10".to_owned(),
        status: "MATCHED".to_owned(),
        match_time: match_time.map(str::to_owned),
        last_update: last_update.map(str::to_owned),
    }
}

pub fn decimal(value: &str) -> Decimal {
    value.parse().unwrap()
}
