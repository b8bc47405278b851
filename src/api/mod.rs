//! Remote API boundary.
//!
//! The backend does all scraping and link resolution; this module only
//! builds request URLs ([`client`]) and turns response bodies into domain
//! values ([`wire`]). Requests themselves are issued by the plugin shim
//! through Zellij's `web_request`, so nothing here performs I/O.

pub mod client;
pub mod wire;

pub use client::{ApiClient, DEFAULT_BASE_URL};
pub use wire::{decode_resolve, decode_search, Endpoint, FetchError, SearchOutcome};
