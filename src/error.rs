//! Per-stage errors for one poll cycle.
//!
//! Each stage of a cycle (configuration, credentials, fetch, extraction)
//! fails with its own variant so callers can tell an unreachable server
//! apart from a broken config file. The binary collapses all of them into a
//! single task-failed outcome at its boundary.

use camino::Utf8PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MonitorError {
    /// The configuration file could not be read.
    #[error("could not read configuration from '{path}'")]
    ConfigRead {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file was read but did not parse.
    #[error("could not parse configuration from '{path}': {message}")]
    ConfigParse { path: Utf8PathBuf, message: String },

    /// The configuration parsed but is unusable.
    #[error("invalid configuration: {0}")]
    ConfigInvalid(String),

    /// An obfuscated password was supplied without the key needed to decode it.
    #[error("obfuscated password supplied without an encryption key")]
    MissingEncryptionKey,

    /// The obfuscated password could not be decoded with the configured key.
    #[error("could not decode obfuscated password: {0}")]
    CredentialDecode(String),

    /// The HTTP request to the status endpoint failed outright.
    #[error("request to '{url}' failed")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The status endpoint answered with a non-success status code.
    #[error("status endpoint '{url}' returned HTTP {status}")]
    FetchStatus { url: String, status: reqwest::StatusCode },

    /// The status endpoint answered with an empty body.
    #[error("status endpoint '{url}' returned an empty body")]
    EmptyBody { url: String },

    /// A well-formed status document had malformed structure where a metric
    /// group was expected.
    #[error("malformed status document: {0}")]
    Extract(String),

    /// A surviving metric could not be handed to the sink.
    #[error("could not report metric '{name}'")]
    Report {
        name: String,
        #[source]
        source: std::io::Error,
    },
}
