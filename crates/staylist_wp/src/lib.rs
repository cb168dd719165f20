//! WordPress REST listing store for Staylist
//!
//! This crate implements [`staylist_common::ListingStore`] against the WordPress REST API
//! of a site exposing a `listing` post type (core REST route or the Pods REST route).
//!
//! # Features
//!
//! - Basic authentication with a WordPress application password
//! - Paged listing reads following `X-WP-TotalPages`
//! - Fallback to a secondary route when the primary one is missing, reported as
//!   [`staylist_common::DataSource::Fallback`]
//! - Fail-soft decoding of the blocklist fields (string, array, `null` or `false`)
//!
//! # Example
//!
//! ```rust,no_run
//! use staylist_common::{ListingId, ListingStore};
//! use staylist_config::WordPressConfig;
//! use staylist_wp::WordPressClient;
//!
//! async fn show_listing() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = WordPressClient::new(WordPressConfig::default())?;
//!     let listing = client.fetch_listing(ListingId(42)).await?;
//!     println!("{} blocks {}", listing.title, listing.admin_blocked_days_raw);
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod wire;

pub use client::{WordPressClient, WordPressError};
