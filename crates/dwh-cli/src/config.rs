//! CLI configuration — thin wrapper around `dwh_config` shared types.
//!
//! Re-exports the shared types and adds CLI-specific resolution that
//! respects `GlobalOpts` flag overrides (--url, --api-key, etc.).

use std::time::Duration;

use secrecy::SecretString;

use dwh_api::{TlsMode, TransportConfig};
use dwh_config::{Config, ConnectionConfig, Profile};

use crate::cli::GlobalOpts;
use crate::error::CliError;

// ── Re-exports from shared crate ────────────────────────────────────

pub use dwh_config::{config_path, load_config_or_default};

// ── CLI-specific helpers ────────────────────────────────────────────

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// Build a [`ConnectionConfig`] from the config file, profile, and CLI
/// overrides. Flag values take priority over profile values.
pub fn resolve_connection(global: &GlobalOpts) -> Result<ConnectionConfig, CliError> {
    let cfg = load_config_or_default();
    let profile_name = active_profile_name(global, &cfg);

    if let Some(profile) = cfg.profiles.get(&profile_name) {
        return resolve_profile(profile, &profile_name, global);
    }

    // No profile found -- try to build from CLI flags / env vars alone.
    let url_str = global.url.as_deref().ok_or_else(|| CliError::NoConfig {
        path: config_path().display().to_string(),
    })?;
    let url = parse_url(url_str)?;

    let api_key = global
        .api_key
        .clone()
        .map(SecretString::from)
        .ok_or(CliError::NoCredentials {
            profile: profile_name,
        })?;

    Ok(ConnectionConfig {
        url,
        api_key,
        transport: transport_from_flags(global, None),
    })
}

fn resolve_profile(
    profile: &Profile,
    profile_name: &str,
    global: &GlobalOpts,
) -> Result<ConnectionConfig, CliError> {
    let url_str = global.url.as_deref().unwrap_or(&profile.url);
    let url = parse_url(url_str)?;

    let api_key = match global.api_key {
        Some(ref key) => SecretString::from(key.clone()),
        None => dwh_config::resolve_api_key(profile, profile_name)?,
    };

    Ok(ConnectionConfig {
        url,
        api_key,
        transport: transport_from_flags(global, Some(profile)),
    })
}

fn parse_url(url_str: &str) -> Result<url::Url, CliError> {
    url_str.parse().map_err(|_| CliError::Validation {
        field: "--url".into(),
        reason: format!("invalid URL: {url_str}"),
    })
}

fn transport_from_flags(global: &GlobalOpts, profile: Option<&Profile>) -> TransportConfig {
    let insecure = global.insecure || profile.and_then(|p| p.insecure).unwrap_or(false);

    let tls = if insecure {
        TlsMode::DangerAcceptInvalid
    } else if let Some(ca_path) = profile.and_then(|p| p.ca_cert.clone()) {
        TlsMode::CustomCa(ca_path)
    } else {
        TlsMode::System
    };

    TransportConfig {
        tls,
        timeout: Duration::from_secs(global.timeout),
    }
}
