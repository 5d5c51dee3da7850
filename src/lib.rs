//! # dnscli
//!
//! Manage DNS A/AAAA records under a fixed base domain on Alibaba Cloud
//! DNS (Alidns). Adds are idempotent, deletes prefer the record whose
//! value matches the given IP, and cleanup keeps going when individual
//! prefixes fail.
//!
//! The provider layer speaks the Aliyun OpenAPI RPC protocol directly
//! (ACS3-HMAC-SHA256 signed requests with an empty body); the client
//! layer implements the record workflows on top of the [`DnsProvider`]
//! trait so they can be tested without the network.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use dnscli::{Config, DnsClient};
//!
//! # async fn example() -> dnscli::Result<()> {
//! let client = DnsClient::new(Config {
//!     access_key_id: "your-access-key-id".to_string(),
//!     access_key_secret: "your-access-key-secret".to_string(),
//!     base_domain: String::new(), // defaults to alaudatech.net
//!     endpoint: String::new(),    // defaults to the public endpoint
//! });
//!
//! client.add_record("web", "1.2.3.4").await?;
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod client;
pub mod error;
pub mod provider;
pub mod types;

pub use client::{Config, DEFAULT_BASE_DOMAIN, DnsClient, tool_domains};
pub use error::{Error, Result};
pub use provider::{AlidnsProvider, DEFAULT_ENDPOINT, DnsProvider, ProviderError};
pub use types::{
    CleanupFailure, CleanupReport, DomainRecord, NewRecord, RecordPage, RecordQuery, RecordType,
};
