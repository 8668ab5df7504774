//! Mule - bulk inventory trading and auto-favorite automation for a live
//! game session.
//!
//! The crate automates two things against a running session:
//!
//! - **Trade runs** - walk a point-in-time inventory snapshot and offer each
//!   eligible item to a counterpart player, bounded by per-rarity quotas,
//!   with unbounded per-item retries and cooperative cancellation.
//! - **Curation** - a periodic sweep that auto-favorites items at or above a
//!   rarity threshold (never below Mythic), de-duplicated across cycles.
//!
//! Both feed aggregates to an outbound webhook report.
//!
//! # Modules
//!
//! - [`config`] - TOML configuration with quota-table parsing
//! - [`domain`] - session-agnostic types: rarities, quotas, records, reports
//! - [`catalog`] - the item classifier built from a registry dump
//! - [`error`] - error types for the crate
//! - [`session`] - port definitions the live session must provide
//! - [`adapter`] - HTTP session-bridge client and webhook sink
//! - [`service`] - the trader, the curator, and operator notices
//! - [`report`] - report documents and best-effort emission
//! - [`app`] - wiring and shared activation state
//!
//! # Example
//!
//! ```
//! use mule::domain::{Quota, QuotaTable, Rarity};
//!
//! let mut table = QuotaTable::new();
//! table.set(Rarity::Common, Quota::parse("2"));
//! table.set(Rarity::Mythic, Quota::parse("ALL"));
//! assert_eq!(table.get(Rarity::Mythic), Quota::Unlimited);
//! ```

pub mod adapter;
pub mod app;
pub mod catalog;
pub mod config;
pub mod domain;
pub mod error;
pub mod report;
pub mod service;
pub mod session;
