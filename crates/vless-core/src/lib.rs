//! Core constants for vless-rs.
//!
//! This crate holds the link literals, artifact paths, fallback values,
//! and timeouts shared by the store, bridge, and CLI crates.

pub mod defaults;
