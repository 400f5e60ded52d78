//! CLI error types with miette diagnostics.
//!
//! Maps `dwh_api::Error` and `dwh_config::ConfigError` variants into
//! user-facing errors with actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use dwh_api::Error as ApiError;
use dwh_config::ConfigError;

/// Exit codes for process termination.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────

    #[error("Could not connect to the warehouse at {url}")]
    #[diagnostic(
        code(dwh::connection_failed),
        help(
            "Check that the Data Warehouse is reachable.\n\
             URL: {url}"
        )
    )]
    ConnectionFailed {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Request timed out after {seconds}s")]
    #[diagnostic(
        code(dwh::timeout),
        help("Increase timeout with --timeout or narrow the date range.")
    )]
    Timeout { seconds: u64 },

    // ── Authentication ───────────────────────────────────────────────

    #[error("The warehouse rejected the API key")]
    #[diagnostic(
        code(dwh::auth_failed),
        help(
            "Verify the API key for profile '{profile}'.\n\
             Or set the DWH_API_KEY environment variable."
        )
    )]
    AuthFailed { profile: String },

    #[error("No API key configured for profile '{profile}'")]
    #[diagnostic(
        code(dwh::no_credentials),
        help(
            "Add an api_key (or api_key_env) entry to the profile,\n\
             or set the DWH_API_KEY environment variable."
        )
    )]
    NoCredentials { profile: String },

    // ── Resources ────────────────────────────────────────────────────

    #[error("The queried resource was not found")]
    #[diagnostic(
        code(dwh::not_found),
        help("Check the identifiers and the warehouse base URL.")
    )]
    NotFound,

    #[error("The warehouse returned no data: {condition}")]
    #[diagnostic(
        code(dwh::no_data),
        help("Widen the date range or check the identifiers.")
    )]
    NoData { condition: String },

    // ── API ──────────────────────────────────────────────────────────

    #[error("Warehouse API error: {message}")]
    #[diagnostic(code(dwh::api_error))]
    Api { message: String },

    // ── Validation ───────────────────────────────────────────────────

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(dwh::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────

    #[error("No warehouse URL configured")]
    #[diagnostic(
        code(dwh::no_config),
        help(
            "Pass --url / set DWH_API_URL, or create a profile.\n\
             Expected config at: {path}"
        )
    )]
    NoConfig { path: String },

    #[error("Configuration error: {message}")]
    #[diagnostic(code(dwh::config))]
    Config { message: String },

    // ── Serialization ────────────────────────────────────────────────

    #[error("failed to render config: {0}")]
    #[diagnostic(code(dwh::toml))]
    Toml(#[from] toml::ser::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::Timeout { .. } => exit_code::TIMEOUT,
            Self::AuthFailed { .. } | Self::NoCredentials { .. } => exit_code::AUTH,
            Self::NotFound => exit_code::NOT_FOUND,
            Self::Validation { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── ApiError → CliError mapping ──────────────────────────────────────

/// Translate an API error into a CLI error, attaching request context.
pub fn from_api(err: ApiError, url: &str, timeout_secs: u64, profile: &str) -> CliError {
    match err {
        ApiError::NoDateRange => CliError::Validation {
            field: "--from/--to".into(),
            reason: "a date range is required".into(),
        },
        ApiError::NoIds { category } => CliError::Validation {
            field: "ids".into(),
            reason: format!("at least one {category} value is required"),
        },
        ApiError::Unauthorized | ApiError::Authentication { .. } => CliError::AuthFailed {
            profile: profile.to_owned(),
        },
        ApiError::NotFound => CliError::NotFound,
        e @ (ApiError::NoContent | ApiError::EmptyData) => CliError::NoData {
            condition: e.to_string(),
        },
        ApiError::Transport(e) if e.is_timeout() => CliError::Timeout {
            seconds: timeout_secs,
        },
        ApiError::Transport(e) => CliError::ConnectionFailed {
            url: url.to_owned(),
            source: e.into(),
        },
        ApiError::Tls(message) => CliError::ConnectionFailed {
            url: url.to_owned(),
            source: message.into(),
        },
        ApiError::InvalidUrl(e) => CliError::Validation {
            field: "--url".into(),
            reason: e.to_string(),
        },
        other => CliError::Api {
            message: other.to_string(),
        },
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::NoCredentials { profile } => CliError::NoCredentials { profile },
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
            other => CliError::Config {
                message: other.to_string(),
            },
        }
    }
}
