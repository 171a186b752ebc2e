//! amps-monitor crate
//!
//! This crate is an implementation detail of the `amps-monitor` tool. This crate's API is fluid and may change without warning
//! and in a semver-incompatible way.

/// Result type alias using [`error::MonitorError`] as the default error type.
pub type Result<T, E = error::MonitorError> = core::result::Result<T, E>;

#[doc(hidden)]
pub mod config;

#[doc(hidden)]
pub mod credentials;

#[doc(hidden)]
pub mod error;

#[doc(hidden)]
pub mod extract;

#[doc(hidden)]
pub mod filter;

#[doc(hidden)]
pub mod monitor;

#[doc(hidden)]
pub mod publish;

#[doc(hidden)]
pub mod status;
