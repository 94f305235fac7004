//! Types for the Polymarket Gamma API.
//!
//! - **Request types**: builder-pattern structs serialized into query strings.
//! - **Response types**: tolerant mirrors of the upstream JSON; array-valued
//!   fields are kept as raw JSON because Gamma sometimes encodes them as strings.

pub mod request;
pub mod response;
