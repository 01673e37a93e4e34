//! # coverstat common library
//!
//! Shared code for the coverstat crates:
//! - Error type (`Error`, `Result`)
//! - Bootstrap TOML configuration and config file discovery

pub mod config;
pub mod error;

pub use error::{Error, Result};
