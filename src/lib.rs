//! Language resolution and translation metadata for a multilingual catalog
//! read API.
//!
//! - [`i18n`] decides which language a request asks for.
//! - [`translation`] attaches per-language maps and cross-language summaries
//!   to catalog items.
//! - [`catalog`] defines the collaborators both read from, plus an in-memory
//!   implementation.
//! - [`api`] wires them into an HTTP read surface.

pub mod api;
pub mod catalog;
pub mod config;
pub mod error;
pub mod i18n;
pub mod translation;

pub use error::LookupError;
