//! HTTP persistence gateway for the casedeck task board.
//!
//! [`RemoteGateway`] implements [`casedeck_board::TaskGateway`] against the
//! task API, so a board built on [`casedeck_board::TaskBoard`] can persist
//! to a real backend instead of the in-memory gateway. Connection settings
//! live in [`RemoteConfig`].
//!
//! ```rust,no_run
//! use casedeck_board::TaskBoard;
//! use casedeck_remote::{RemoteConfig, RemoteGateway};
//! use std::sync::Arc;
//!
//! # async fn run() -> casedeck_board::Result<()> {
//! let config = RemoteConfig::new("https://boards.example.com").with_auth_token("t0ken");
//! let board = TaskBoard::new(Arc::new(RemoteGateway::new(config)?));
//! board.load().await?;
//! # Ok(())
//! # }
//! ```

mod client;
mod config;

pub use client::RemoteGateway;
pub use config::RemoteConfig;
