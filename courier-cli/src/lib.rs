//! `prople-courier-cli` is the `courier` command line client
//!
//! It validates a courier configuration file and talks to a router endpoint to fetch
//! a fresh out-of-band invitation
pub mod commands;
pub mod logging;
pub mod types;
