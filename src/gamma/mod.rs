//! Polymarket Gamma API client and types.
//!
//! Gamma serves market metadata: questions, outcomes, token ids, volume and
//! liquidity. It is separate from the CLOB, which handles trading.
//!
//! ## Endpoints used
//!
//! | Endpoint | Description |
//! |----------|-------------|
//! | `/markets` | List markets, filter by condition id |
//! | `/markets/slug/{slug}` | Get market by slug |

pub mod client;
pub mod types;

pub use client::Client;
