//! NY DOS entity crawler
//!
//! Brute-force enumeration of the New York Department of State public inquiry API.
//! Random three-letter tokens drive name-contains searches; every entity found is
//! fetched by identifier and each raw response is logged to disk under a name
//! derived from the token or identifier.
//!
//! # Example
//!
//! ```no_run
//! use nydos_crawler::{Config, Crawler, RegistryClient, Store};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::default();
//!     let store = Store::new(&config.output_dir);
//!     store.ensure_root().await?;
//!
//!     let crawler = Crawler::new(RegistryClient::new(&config)?, store);
//!     let summary = crawler.scan(10).await;
//!     println!("{} identifiers seen", summary.identifiers);
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod crawler;
pub mod error;
pub mod extract;
pub mod models;
pub mod store;
pub mod token;

pub use client::{RegistryApi, RegistryClient};
pub use config::Config;
pub use crawler::{Crawler, CycleReport, ScanSummary};
pub use error::{ClientError, CrawlError, StoreError, TokenError};
pub use store::{OutputFile, Store, WriteOutcome};
pub use token::{SearchToken, generate_token};
