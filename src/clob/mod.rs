//! Polymarket CLOB access.
//!
//! Public order-book reads go through a thin HTTP [`Client`]. Everything that
//! needs the account (balances, trades, signing and submitting orders,
//! cancellation) goes through the [`Exchange`] trait, whose production
//! implementation [`SdkExchange`] wraps the published CLOB SDK.
//!
//! The default API endpoint is `https://clob.polymarket.com`.

pub mod client;
pub mod exchange;
pub mod types;

pub use client::Client;
pub use exchange::{Exchange, SdkExchange};
