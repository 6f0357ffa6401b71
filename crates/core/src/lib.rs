//! Local Shop Core - Shared types library.
//!
//! This crate provides the domain primitives used by the storefront:
//! - string-backed entity IDs
//! - decimal prices and the cart totals arithmetic
//! - email addresses, payment methods and order statuses
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP
//! clients. Anything that talks to the shop backend lives in the
//! `storefront` crate.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
