//! Film Fusion — Rust client SDK
//!
//! Typed client for the Film Fusion media-library sync server: cloud storage
//! accounts, cloud paths, media entries, scan tasks, 302 redirect rules,
//! pickcode cache, STRM generation, and the 115 QR authorization flow
//! (`auth::QrLoginEngine`).
//!
//! # Quick Start
//!
//! ```no_run
//! use film_fusion::prelude::*;
//!
//! # async fn example() -> film_fusion::error::Result<()> {
//! let client = FusionClient::new(FusionConfig::from_env());
//! let storages = client.list_cloud_storage(&Default::default()).await?;
//! println!("{} cloud storage accounts", storages.total);
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod prelude;

#[cfg(feature = "mock-server")]
pub mod mock;
