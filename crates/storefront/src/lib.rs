//! # Storefront Architecture
//!
//! Storefront is a **UI-agnostic catalog library**: product browsing, filtering
//! and an admin mutation layer over a local key-value store. The `storefront`
//! binary is one client of it; a web or desktop front end would be another.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI (crates/storefront-cli)                                │
//! │  - Parses arguments, renders output, handles exit codes     │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Owns the catalog store, clock and config                 │
//! │  - Gates mutations behind the admin session                 │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs) + Query Engine (query.rs)    │
//! │  - create / update / delete: load → transform → save        │
//! │  - list / view / order: load → derive                       │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - CatalogStore over a StorageBackend (files or memory)     │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## No I/O Assumptions in Core
//!
//! From `api.rs` inward, code takes Rust values and returns `Result<CmdResult>`.
//! It never prints and never exits. Diagnostics go through `tracing`; whether
//! they are shown is up to the binary.
//!
//! ## Consistency
//!
//! The catalog is one JSON array in one slot. Every mutation rewrites all of
//! it. There is no locking: two processes mutating at once can lose a write
//! (last save wins). That is acceptable for a single admin and is covered by
//! tests rather than hidden.
//!
//! ## Module Overview
//!
//! - [`api`]: the facade, entry point for all operations
//! - [`commands`]: one module per operation
//! - [`query`]: filter/sort/limit over the catalog
//! - [`schema`]: draft validation and form parsing
//! - [`model`]: `Product`, `Category`, `ProductDraft`
//! - [`store`]: storage backends and the catalog store
//! - [`session`]: admin login gate and login/logout notifications
//! - [`upload`]: image hosting collaborator
//! - [`config`]: `config.json` handling
//! - [`clock`]: creation timestamps
//! - [`error`]: error types

pub mod api;
pub mod clock;
pub mod commands;
pub mod config;
pub mod error;
pub mod model;
pub mod query;
pub mod schema;
pub mod session;
pub mod store;
pub mod upload;

#[cfg(test)]
pub mod test_utils;
