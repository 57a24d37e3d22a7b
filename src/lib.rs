//! Async Rust client library for the Rundeck REST/XML API.
//!
//! Wraps a handful of Rundeck endpoints in typed methods: each call builds
//! one HTTP request, attaches the static API token, checks the `<result>`
//! envelope, and deserializes the XML payload into plain records.
//!
//! # Modules
//!
//! - [`archive`] — Project archive import.
//! - [`auth`] — Static API token and its header.
//! - [`client`] — `RundeckClient`, the authenticated HTTP wrapper.
//! - [`config`] — Connection settings (`ClientConfig`, `Protocol`).
//! - [`error`] — Typed error hierarchy (`RundeckError`).
//! - [`jobs`] — Job listing and job definition import.
//! - [`projects`] — Project listing.
//!
//! # Quick Start
//!
//! ```no_run
//! use rundeck_client::client::RundeckClient;
//! use rundeck_client::config::{ClientConfig, Protocol};
//! use rundeck_client::jobs::{DupeOption, ImportJobOptions};
//!
//! # async fn demo() -> rundeck_client::error::Result<()> {
//! let config = ClientConfig::new("rundeck.example.com", "api-token")
//!     .with_port(443)
//!     .with_protocol(Protocol::Https);
//! let client = RundeckClient::new(config)?;
//!
//! for project in client.list_projects().await? {
//!     println!("{}", project.name);
//! }
//!
//! let options = ImportJobOptions::default()
//!     .with_dupe_option(DupeOption::Update)
//!     .with_project("ops");
//! let result = client.import_job("<joblist>...</joblist>", &options).await?;
//! println!("imported {} jobs", result.succeeded.len());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

pub mod archive;
pub mod auth;
pub mod client;
pub mod config;
mod envelope;
pub mod error;
pub mod jobs;
pub mod projects;

pub use client::RundeckClient;
pub use config::{ClientConfig, Protocol};
pub use error::{Result, RundeckError};
