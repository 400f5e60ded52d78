// Hand-crafted async HTTP client for the Data Warehouse analytics API.
//
// Endpoint: GET {base}/analytics/relays/total/{category}
// Auth: Portal-DWH-Service-Api-Key header on every request.

use chrono::{DateTime, Utc};
use reqwest::StatusCode;
use reqwest::header::{HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use serde::Deserialize;
use tracing::debug;
use url::Url;

use super::types::{
    AccountRelaysParams, AccountRelaysTotal, AnalyticsRelaysTotal, Category,
    PortalAppRelaysParams, PortalAppRelaysTotal,
};
use crate::Error;
use crate::transport::TransportConfig;

const API_KEY_HEADER: &str = "Portal-DWH-Service-Api-Key";

// ── Response shapes ──────────────────────────────────────────────────

/// Success envelope. `data` may be null even on HTTP 200.
#[derive(Deserialize)]
struct AnalyticsResponse {
    #[serde(default)]
    data: Option<Vec<serde_json::Value>>,
}

/// Generic error body the warehouse returns on failures.
#[derive(Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    message: Option<String>,
}

// ── Client ───────────────────────────────────────────────────────────

/// Async client for the Data Warehouse analytics API.
///
/// Stateless after construction; one request per operation, no retries,
/// no caching. Safe to share across tasks — cancellation is dropping
/// the returned future, and the only client-imposed deadline is
/// [`TransportConfig::timeout`].
pub struct DwhClient {
    http: reqwest::Client,
    base_url: Url,
}

impl DwhClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build from an API key and transport config.
    ///
    /// Injects `Portal-DWH-Service-Api-Key` as a sensitive default
    /// header on every request. No network I/O happens here.
    pub fn from_api_key(
        base_url: &str,
        api_key: &secrecy::SecretString,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let mut headers = HeaderMap::new();
        let mut key_value =
            HeaderValue::from_str(api_key.expose_secret()).map_err(|e| Error::Authentication {
                message: format!("invalid API key header value: {e}"),
            })?;
        key_value.set_sensitive(true);
        headers.insert(API_KEY_HEADER, key_value);

        let http = transport.build_client(headers)?;
        let base_url = Self::normalize_base_url(base_url)?;

        Ok(Self { http, base_url })
    }

    /// Wrap an existing `reqwest::Client` (caller manages auth headers).
    pub fn from_reqwest(base_url: &str, http: reqwest::Client) -> Result<Self, Error> {
        let base_url = Self::normalize_base_url(base_url)?;
        Ok(Self { http, base_url })
    }

    /// Parse the base URL and guarantee a trailing slash so joining
    /// relative paths keeps the full base path.
    fn normalize_base_url(raw: &str) -> Result<Url, Error> {
        let mut url = Url::parse(raw)?;
        let path = url.path().trim_end_matches('/').to_owned();
        url.set_path(&format!("{path}/"));
        Ok(url)
    }

    /// Join a relative path onto the base URL.
    fn url(&self, path: &str) -> Url {
        // base_url always ends with `/`, so joining `analytics/…` works.
        self.base_url
            .join(path)
            .expect("path should be valid relative URL")
    }

    // ── Public API ───────────────────────────────────────────────────

    /// Total relays for the given portal application IDs.
    ///
    /// Records come back in the order the API returned them.
    pub async fn total_relays_for_portal_app_ids(
        &self,
        params: PortalAppRelaysParams,
    ) -> Result<Vec<PortalAppRelaysTotal>, Error> {
        let ids = params
            .portal_app_ids
            .iter()
            .map(|id| id.as_str().to_owned())
            .collect();

        let rows = self
            .total_relays(params.from, params.to, ids, Category::ApplicationId)
            .await?;

        Ok(rows.into_iter().map(PortalAppRelaysTotal::from).collect())
    }

    /// Total relays for the given account IDs.
    pub async fn total_relays_for_account_ids(
        &self,
        params: AccountRelaysParams,
    ) -> Result<Vec<AccountRelaysTotal>, Error> {
        let ids = params
            .account_ids
            .iter()
            .map(|id| id.as_str().to_owned())
            .collect();

        let rows = self
            .total_relays(params.from, params.to, ids, Category::AccountId)
            .await?;

        Ok(rows.into_iter().map(AccountRelaysTotal::from).collect())
    }

    // ── Shared query path ────────────────────────────────────────────

    /// Validate, issue the single GET, and decode the raw rows.
    ///
    /// Both public operations funnel through here; only the category
    /// tag and the caller's projection differ.
    async fn total_relays(
        &self,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
        ids: Vec<String>,
        category: Category,
    ) -> Result<Vec<AnalyticsRelaysTotal>, Error> {
        let (Some(from), Some(to)) = (from, to) else {
            return Err(Error::NoDateRange);
        };
        if ids.is_empty() {
            return Err(Error::NoIds { category });
        }

        let url = self.url(&format!("analytics/relays/total/{category}"));

        // The endpoint takes calendar dates, not full timestamps.
        let mut query: Vec<(&str, String)> = vec![
            ("from", from.date_naive().to_string()),
            ("to", to.date_naive().to_string()),
        ];
        query.extend(ids.into_iter().map(|id| ("category_value", id)));

        debug!("GET {url} category={category}");

        let resp = self.http.get(url).query(&query).send().await?;
        self.decode_rows(resp).await
    }

    /// Split a response into decoded rows or a classified failure.
    async fn decode_rows(
        &self,
        resp: reqwest::Response,
    ) -> Result<Vec<AnalyticsRelaysTotal>, Error> {
        let status = resp.status();
        let body = resp.text().await?;

        if status == StatusCode::OK && !body.is_empty() {
            let envelope: AnalyticsResponse = serde_json::from_str(&body).map_err(|e| {
                let preview = &body[..body.len().min(200)];
                Error::Deserialization {
                    message: format!("{e} (body preview: {preview:?})"),
                    body: body.clone(),
                }
            })?;

            if let Some(rows) = envelope.data {
                // A single malformed row aborts the whole batch.
                return rows.into_iter().map(|row| decode_row(row, &body)).collect();
            }
        }

        Err(classify_failure(Some(status), Some(&body)))
    }
}

// ── Row decoding ─────────────────────────────────────────────────────

fn decode_row(row: serde_json::Value, body: &str) -> Result<AnalyticsRelaysTotal, Error> {
    serde_json::from_value(row).map_err(|e| Error::Deserialization {
        message: format!("invalid relays-total row: {e}"),
        body: body.to_owned(),
    })
}

// ── Failure classification ───────────────────────────────────────────

/// Map a response without a usable success payload onto the error
/// taxonomy. Checks run in a fixed priority order; first match wins.
///
/// `status` is `None` when no HTTP response was produced at all — a
/// shape reqwest cannot yield after a completed send, modeled so the
/// priority table stays total.
fn classify_failure(status: Option<StatusCode>, body: Option<&str>) -> Error {
    if status == Some(StatusCode::NO_CONTENT) {
        return Error::NoContent;
    }
    if status == Some(StatusCode::UNAUTHORIZED) {
        return Error::Unauthorized;
    }
    if status == Some(StatusCode::NOT_FOUND) {
        return Error::NotFound;
    }
    let Some(body) = body.filter(|b| !b.is_empty()) else {
        return Error::EmptyBody;
    };
    let Some(status) = status else {
        return Error::EmptyHttpResponse;
    };
    if status == StatusCode::OK {
        if let Ok(envelope) = serde_json::from_str::<AnalyticsResponse>(body) {
            if envelope.data.is_none() {
                return Error::EmptyData;
            }
        }
    }
    if let Ok(err) = serde_json::from_str::<ErrorResponse>(body) {
        return Error::Unknown {
            status: status.as_u16(),
            message: err.message.unwrap_or_else(|| status.to_string()),
        };
    }
    Error::Unclassified {
        status: status.as_u16(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_content_outranks_every_other_shape() {
        // A 204 with an error-shaped body still classifies as NoContent.
        let err = classify_failure(
            Some(StatusCode::NO_CONTENT),
            Some(r#"{"message":"unauthorized"}"#),
        );
        assert!(matches!(err, Error::NoContent));
    }

    #[test]
    fn unauthorized_outranks_not_found_checks() {
        let err = classify_failure(Some(StatusCode::UNAUTHORIZED), Some(""));
        assert!(matches!(err, Error::Unauthorized));
    }

    #[test]
    fn not_found_outranks_empty_body() {
        let err = classify_failure(Some(StatusCode::NOT_FOUND), None);
        assert!(matches!(err, Error::NotFound));
    }

    #[test]
    fn empty_body_outranks_missing_response() {
        let err = classify_failure(None, None);
        assert!(matches!(err, Error::EmptyBody));
    }

    #[test]
    fn missing_response_with_body_classifies_as_empty_http_response() {
        let err = classify_failure(None, Some("anything"));
        assert!(matches!(err, Error::EmptyHttpResponse));
    }

    #[test]
    fn ok_with_null_data_classifies_as_empty_data() {
        let err = classify_failure(Some(StatusCode::OK), Some(r#"{"data":null}"#));
        assert!(matches!(err, Error::EmptyData));
    }

    #[test]
    fn error_shape_classifies_as_unknown_with_message() {
        let err = classify_failure(
            Some(StatusCode::INTERNAL_SERVER_ERROR),
            Some(r#"{"message":"query failed"}"#),
        );
        match err {
            Error::Unknown { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "query failed");
            }
            other => panic!("expected Unknown, got: {other:?}"),
        }
    }

    #[test]
    fn non_json_failure_body_falls_through_to_unclassified() {
        let err = classify_failure(Some(StatusCode::BAD_GATEWAY), Some("upstream exploded"));
        assert!(matches!(err, Error::Unclassified { status: 502 }));
    }

    #[test]
    fn base_url_keeps_existing_path_segments() {
        let client =
            DwhClient::from_reqwest("https://dwh.example.com/api/v1", reqwest::Client::new())
                .expect("valid base url");

        let url = client.url("analytics/relays/total/application_id");
        assert_eq!(
            url.as_str(),
            "https://dwh.example.com/api/v1/analytics/relays/total/application_id"
        );
    }
}
