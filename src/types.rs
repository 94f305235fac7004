//! Re-exported types from external crates for convenience.

/// Ethereum address type and the [`address!`] macro for address literals.
/// [`ChainId`] is a type alias for `u64` representing EVM chain IDs.
pub use alloy::primitives::{Address, ChainId, U256, address};
/// Arbitrary precision decimal type for prices, sizes, and amounts.
pub use rust_decimal::Decimal;
/// Macro for creating [`Decimal`] literals at compile time.
pub use rust_decimal_macros::dec;
