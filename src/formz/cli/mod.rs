//! # CLI Layer
//!
//! This module is **one possible UI client** for formz, not the application
//! itself. It plays two roles the library leaves open: it renders views to
//! the terminal, and it is the routing mechanism that turns a command (or a
//! path given to `formz go`) into a [`formz::router::Route`] and follows
//! redirects between views.
//!
//! It is the only place that:
//! - Knows about terminal I/O (stdout, stderr, stdin prompts)
//! - Installs the log subscriber
//! - Handles argument parsing
//! - Formats output for human consumption
//!
//! ## Structure
//!
//! - `setup.rs`: clap definitions and grouped help
//! - `commands.rs`: context wiring, route dispatch, per-view handlers
//! - `input.rs`: field specs, `N=VALUE` arguments, answer matching
//! - `prompt.rs`: interactive question-by-question filling
//! - `print.rs`: rendering lists, forms and responses

mod commands;
mod input;
mod print;
mod prompt;
mod setup;
mod styles;

pub use commands::run;
