//! # Formz Architecture
//!
//! Formz is a **UI-agnostic form builder library**: build forms out of
//! questions, fill them in, and keep every submitted response. The binary is
//! one client of it.
//!
//! ## The Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, routes paths to views, renders output  │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands and views                      │
//! │  - Normalizes inputs (positions, id prefixes → form ids)    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌───────────────────────────────┬─────────────────────────────┐
//! │  Commands (commands/*.rs)     │  Views (builder, fill)      │
//! │  - Store mutations, listings  │  - Draft editing, answering │
//! │  - Return `CmdResult`         │  - Validate before saving   │
//! └───────────────────────────────┴─────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - `FormStore` over a `StoreBackend`                        │
//! │  - FileBackend (production), InMemoryBackend (testing)      │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! From `api.rs` inward, code takes regular Rust arguments, returns regular
//! Rust types, and never writes to stdout/stderr or exits the process. The
//! store is passed explicitly; there is no global state.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`commands`]: Store-backed operations and their results
//! - [`store`]: The form store, its persistence trait and backends
//! - [`model`]: Core data types (`Form`, `FormField`, `FormResponse`, `Answer`)
//! - [`builder`]: Creating and editing a form draft
//! - [`fill`]: Answering a form and producing a response
//! - [`router`]: Paths and the views they select
//! - [`config`]: Configuration management
//! - [`error`]: Error types
//! - `cli`: Argument parsing, routing, prompting and printing for the binary (not part of the lib API)

pub mod api;
pub mod builder;
pub mod commands;
pub mod config;
pub mod error;
pub mod fill;
pub mod model;
pub mod router;
pub mod store;
