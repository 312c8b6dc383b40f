//! `router` holds the http client used to fetch an out-of-band invitation from a
//! router endpoint
mod client;
pub use client::RouterClient;
