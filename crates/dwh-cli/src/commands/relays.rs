//! Relay totals command handlers.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use owo_colors::OwoColorize;
use tabled::Tabled;

use dwh_api::DwhClient;
use dwh_api::types::{
    AccountRelaysParams, AccountRelaysTotal, PortalAppRelaysParams, PortalAppRelaysTotal,
};
use dwh_config::ConnectionConfig;

use crate::cli::{GlobalOpts, OutputFormat, RelaysArgs, RelaysCommand, RelaysQuery};
use crate::error::{self, CliError};
use crate::output;

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Tabled)]
struct RelayRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "RELAYS")]
    count: i64,
    #[tabled(rename = "AVG LATENCY")]
    avg_latency: String,
    #[tabled(rename = "ERROR RATE")]
    rate_error: String,
    #[tabled(rename = "SUCCESS RATE")]
    rate_success: String,
    #[tabled(rename = "FROM")]
    from: NaiveDate,
    #[tabled(rename = "TO")]
    to: NaiveDate,
}

fn portal_app_row(total: &PortalAppRelaysTotal) -> RelayRow {
    RelayRow {
        id: total.portal_app_id.to_string(),
        count: total.count,
        avg_latency: format!("{:.2}", total.average_latency),
        rate_error: format!("{:.4}", total.rate_error),
        rate_success: format!("{:.4}", total.rate_success),
        from: total.from,
        to: total.to,
    }
}

fn account_row(total: &AccountRelaysTotal) -> RelayRow {
    RelayRow {
        id: total.account_id.to_string(),
        count: total.count,
        avg_latency: format!("{:.2}", total.average_latency),
        rate_error: format!("{:.4}", total.rate_error),
        rate_success: format!("{:.4}", total.rate_success),
        from: total.from,
        to: total.to,
    }
}

// ── Date parsing ────────────────────────────────────────────────────

fn parse_date(value: &str, field: &'static str) -> Result<DateTime<Utc>, CliError> {
    if let Ok(date) = value.parse::<NaiveDate>() {
        return Ok(date.and_time(NaiveTime::MIN).and_utc());
    }
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| CliError::Validation {
            field: field.into(),
            reason: format!("invalid date '{value}' (use YYYY-MM-DD or RFC 3339)"),
        })
}

/// Parse the optional range flags. Absent flags stay `None` so the
/// client's own validation reports the missing range.
fn parse_range(
    query: &RelaysQuery,
) -> Result<(Option<DateTime<Utc>>, Option<DateTime<Utc>>), CliError> {
    let from = query
        .from
        .as_deref()
        .map(|s| parse_date(s, "--from"))
        .transpose()?;
    let to = query
        .to
        .as_deref()
        .map(|s| parse_date(s, "--to"))
        .transpose()?;

    if let (Some(f), Some(t)) = (from, to) {
        if f > t {
            return Err(CliError::Validation {
                field: "--from".into(),
                reason: "--from must be <= --to".into(),
            });
        }
    }

    Ok((from, to))
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(args: RelaysArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let cfg = crate::config::load_config_or_default();
    let profile = crate::config::active_profile_name(global, &cfg);
    let conn = crate::config::resolve_connection(global)?;

    let client = DwhClient::from_api_key(conn.url.as_str(), &conn.api_key, &conn.transport)
        .map_err(|e| map_err(e, &conn, global, &profile))?;

    match args.command {
        RelaysCommand::PortalApps(query) => {
            let (from, to) = parse_range(&query)?;
            let params = PortalAppRelaysParams {
                from,
                to,
                portal_app_ids: query.ids.iter().map(|id| id.as_str().into()).collect(),
            };

            let totals = client
                .total_relays_for_portal_app_ids(params)
                .await
                .map_err(|e| map_err(e, &conn, global, &profile))?;

            render(&totals, portal_app_row, |t| t.portal_app_id.to_string(), global);
            Ok(())
        }
        RelaysCommand::Accounts(query) => {
            let (from, to) = parse_range(&query)?;
            let params = AccountRelaysParams {
                from,
                to,
                account_ids: query.ids.iter().map(|id| id.as_str().into()).collect(),
            };

            let totals = client
                .total_relays_for_account_ids(params)
                .await
                .map_err(|e| map_err(e, &conn, global, &profile))?;

            render(&totals, account_row, |t| t.account_id.to_string(), global);
            Ok(())
        }
    }
}

fn map_err(
    err: dwh_api::Error,
    conn: &ConnectionConfig,
    global: &GlobalOpts,
    profile: &str,
) -> CliError {
    error::from_api(err, conn.url.as_str(), global.timeout, profile)
}

fn render<T: serde::Serialize>(
    totals: &[T],
    to_row: impl Fn(&T) -> RelayRow,
    id_fn: impl Fn(&T) -> String,
    global: &GlobalOpts,
) {
    if totals.is_empty() && matches!(global.output, OutputFormat::Table) {
        let notice = if output::should_color(&global.color) {
            "No records returned.".dimmed().to_string()
        } else {
            "No records returned.".to_owned()
        };
        output::print_output(&notice, global.quiet);
        return;
    }

    let rendered = output::render_list(&global.output, totals, to_row, id_fn);
    output::print_output(&rendered, global.quiet);
}
