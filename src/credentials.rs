//! Password resolution for the AMPS admin endpoint.
//!
//! Configs may carry the password either as plaintext or in an obfuscated
//! form: the password bytes XORed with the cycled key bytes, then base64
//! encoded. The plaintext form wins when both are present. This is
//! obfuscation to keep credentials out of casual view of a config file, not
//! encryption.

use crate::Result;
use crate::config::Config;
use crate::error::MonitorError;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

/// Resolve the password to use for basic auth, if any.
///
/// Returns `Ok(None)` when the config carries no credentials at all.
///
/// # Errors
///
/// Returns [`MonitorError::MissingEncryptionKey`] when an obfuscated
/// password is configured without a key, and
/// [`MonitorError::CredentialDecode`] when the obfuscated value cannot be
/// decoded with the configured key.
pub fn resolve_password(config: &Config) -> Result<Option<String>> {
    if !config.password.is_empty() {
        return Ok(Some(config.password.clone()));
    }

    if config.password_obfuscated.is_empty() {
        return Ok(None);
    }

    if config.encryption_key.is_empty() {
        return Err(MonitorError::MissingEncryptionKey);
    }

    let bytes = STANDARD
        .decode(&config.password_obfuscated)
        .map_err(|e| MonitorError::CredentialDecode(e.to_string()))?;

    let plain: Vec<u8> = bytes
        .iter()
        .zip(config.encryption_key.as_bytes().iter().cycle())
        .map(|(byte, key)| byte ^ key)
        .collect();

    String::from_utf8(plain)
        .map(Some)
        .map_err(|_| MonitorError::CredentialDecode("decoded password is not valid UTF-8".to_string()))
}

/// Produce the obfuscated form of `password` under `key`, suitable for the
/// `password_obfuscated` config field.
///
/// # Errors
///
/// Returns [`MonitorError::MissingEncryptionKey`] when `key` is empty.
pub fn obfuscate(password: &str, key: &str) -> Result<String> {
    if key.is_empty() {
        return Err(MonitorError::MissingEncryptionKey);
    }

    let bytes: Vec<u8> = password
        .as_bytes()
        .iter()
        .zip(key.as_bytes().iter().cycle())
        .map(|(byte, key)| byte ^ key)
        .collect();

    Ok(STANDARD.encode(bytes))
}
