//! Request and response types for the relays-total endpoints.
//!
//! Raw warehouse rows keep every field optional — the upstream schema
//! allows partial rows. The `From` projections resolve each field to a
//! concrete default, so no `Option` ever crosses the crate's public
//! result types.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

// ── Identifier newtypes ─────────────────────────────────────────────

/// Portal application identifier, an opaque string from the Portal DB.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PortalAppId(String);

impl PortalAppId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PortalAppId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PortalAppId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.to_owned()))
    }
}

impl From<String> for PortalAppId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for PortalAppId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

/// Account identifier, an opaque string from the Portal DB.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(String);

impl AccountId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for AccountId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.to_owned()))
    }
}

impl From<String> for AccountId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for AccountId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

// ── Category ────────────────────────────────────────────────────────

/// Identifier dimension a relays-total query filters on.
///
/// Selected by the public operation invoked; callers never pass it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    ApplicationId,
    AccountId,
}

impl Category {
    /// Wire name, used both as path segment and in error messages.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ApplicationId => "application_id",
            Self::AccountId => "account_id",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Query parameters ────────────────────────────────────────────────

/// Parameters for a portal-app relays-total query.
///
/// An unset `from` or `to` is rejected before any network call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PortalAppRelaysParams {
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
    pub portal_app_ids: Vec<PortalAppId>,
}

/// Parameters for an account relays-total query.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AccountRelaysParams {
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
    pub account_ids: Vec<AccountId>,
}

// ── Raw wire record ─────────────────────────────────────────────────

/// One relays-total row as received from the warehouse.
///
/// Every field is optional; dates come as `YYYY-MM-DD` strings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsRelaysTotal {
    #[serde(default)]
    pub category_value: Option<String>,
    #[serde(default)]
    pub count_total: Option<i64>,
    #[serde(default)]
    pub avg_latency: Option<f64>,
    #[serde(default)]
    pub rate_error: Option<f64>,
    #[serde(default)]
    pub rate_success: Option<f64>,
    #[serde(default)]
    pub from: Option<NaiveDate>,
    #[serde(default)]
    pub to: Option<NaiveDate>,
}

// ── Projected result records ────────────────────────────────────────

/// Total relays for one portal application over the queried period.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortalAppRelaysTotal {
    pub portal_app_id: PortalAppId,
    pub count: i64,
    pub average_latency: f64,
    pub rate_error: f64,
    pub rate_success: f64,
    pub from: NaiveDate,
    pub to: NaiveDate,
}

/// Total relays for one account over the queried period.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountRelaysTotal {
    pub account_id: AccountId,
    pub count: i64,
    pub average_latency: f64,
    pub rate_error: f64,
    pub rate_success: f64,
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl From<AnalyticsRelaysTotal> for PortalAppRelaysTotal {
    fn from(raw: AnalyticsRelaysTotal) -> Self {
        Self {
            portal_app_id: PortalAppId::from(raw.category_value.unwrap_or_default()),
            count: raw.count_total.unwrap_or_default(),
            average_latency: raw.avg_latency.unwrap_or_default(),
            rate_error: raw.rate_error.unwrap_or_default(),
            rate_success: raw.rate_success.unwrap_or_default(),
            from: raw.from.unwrap_or_default(),
            to: raw.to.unwrap_or_default(),
        }
    }
}

impl From<AnalyticsRelaysTotal> for AccountRelaysTotal {
    fn from(raw: AnalyticsRelaysTotal) -> Self {
        Self {
            account_id: AccountId::from(raw.category_value.unwrap_or_default()),
            count: raw.count_total.unwrap_or_default(),
            average_latency: raw.avg_latency.unwrap_or_default(),
            rate_error: raw.rate_error.unwrap_or_default(),
            rate_success: raw.rate_success.unwrap_or_default(),
            from: raw.from.unwrap_or_default(),
            to: raw.to.unwrap_or_default(),
        }
    }
}
