//! Typed async client for the CalcTree GraphQL API.
//!
//! The service exposes pages (document nodes in a navigable tree),
//! calculations (revisioned statement groups attached to a page), and
//! statements (one formula each, evaluated by a named engine). This crate
//! wraps the raw `{query, variables}` POST protocol in typed operations
//! ([`ops`]) and encodes the creation order the service requires
//! ([`services::publish_page`]): create page, attach to tree, write
//! statements, append.
//!
//! ```no_run
//! use calctree_client::{Client, Config, Engine, services};
//! use calctree_client::services::{PublishPageRequest, StatementDraft};
//!
//! # async fn run() -> calctree_client::Result<()> {
//! let config = Config::load()?;
//! let client = Client::new(&config)?;
//!
//! let page = services::publish_page(&client, PublishPageRequest {
//!     title: "Beam check".to_string(),
//!     statements: vec![StatementDraft::new("span", Engine::Mathjs, "span = 10 m")],
//!     ..Default::default()
//! }).await?;
//! println!("{}", page.url);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod ids;
pub mod models;
pub mod ops;
pub mod services;
pub mod utils;
pub mod validation;

pub use client::Client;
pub use config::Config;
pub use error::{Error, Result};
pub use models::{Engine, Revision, SENTINEL_REVISION};

/// Load configuration from environment variables
pub fn load_config() -> Result<Config> {
    Ok(Config::load()?)
}
