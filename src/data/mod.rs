//! Polymarket Data API client and types.
//!
//! The Data API is a read-only HTTP API that reports per-user holdings and
//! profit/loss. It is separate from the CLOB API which handles trading.
//!
//! ## Endpoints used
//!
//! | Endpoint | Description |
//! |----------|-------------|
//! | `/positions` | Get current positions for a user |

pub mod client;
pub mod types;

pub use client::Client;
