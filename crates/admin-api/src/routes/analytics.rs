//! Analytics dashboard routes.

use axum::extract::{Query, State};
use axum::Json;
use chrono::{Days, Utc};
use serde::{Deserialize, Serialize};

use database::analytics::{DailyCount, HourlyCount, WidgetMetrics, WidgetOverviewRow};

use crate::error::{ApiError, Result};
use crate::state::AppState;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsQuery {
    pub widget_id: String,
    #[serde(default)]
    pub period: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverviewQuery {
    pub organization_id: String,
    #[serde(default)]
    pub period: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    pub from: String,
    pub to: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsResponse {
    pub range: DateRange,
    #[serde(flatten)]
    pub metrics: WidgetMetrics,
    pub per_day: Vec<DailyCount>,
    pub per_hour: Vec<HourlyCount>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverviewResponse {
    pub range: DateRange,
    pub widgets: Vec<WidgetOverviewRow>,
}

/// Resolve a period slug or explicit date pair into an inclusive range.
/// Defaults to the last 7 days.
fn resolve_range(
    period: Option<&str>,
    start_date: Option<&str>,
    end_date: Option<&str>,
) -> Result<DateRange> {
    if let (Some(from), Some(to)) = (start_date, end_date) {
        return Ok(DateRange {
            from: from.to_string(),
            to: to.to_string(),
        });
    }

    let days = match period.unwrap_or("7d") {
        "7d" => 6,
        "30d" => 29,
        "90d" => 89,
        other => {
            return Err(ApiError::BadRequest(format!("unknown period: {other}")));
        }
    };

    let today = Utc::now().date_naive();
    let from = today
        .checked_sub_days(Days::new(days))
        .unwrap_or(today)
        .format("%Y-%m-%d")
        .to_string();

    Ok(DateRange {
        from,
        to: today.format("%Y-%m-%d").to_string(),
    })
}

/// Conversation metrics for one widget over a period.
pub async fn metrics(
    State(state): State<AppState>,
    Query(query): Query<MetricsQuery>,
) -> Result<Json<MetricsResponse>> {
    let pool = state.db.pool();
    let range = resolve_range(
        query.period.as_deref(),
        query.start_date.as_deref(),
        query.end_date.as_deref(),
    )?;

    // 404 on unknown widgets; zeroes are reserved for quiet ones.
    database::widget::get_widget(pool, &query.widget_id).await?;

    let metrics =
        database::analytics::widget_metrics(pool, &query.widget_id, &range.from, &range.to)
            .await?;
    let per_day =
        database::analytics::conversations_per_day(pool, &query.widget_id, &range.from, &range.to)
            .await?;
    let per_hour =
        database::analytics::conversations_per_hour(pool, &query.widget_id, &range.from, &range.to)
            .await?;

    Ok(Json(MetricsResponse {
        range,
        metrics,
        per_day,
        per_hour,
    }))
}

/// Cross-widget totals for an organization over a period.
pub async fn overview(
    State(state): State<AppState>,
    Query(query): Query<OverviewQuery>,
) -> Result<Json<OverviewResponse>> {
    let pool = state.db.pool();
    let range = resolve_range(
        query.period.as_deref(),
        query.start_date.as_deref(),
        query.end_date.as_deref(),
    )?;

    let widgets = database::analytics::organization_overview(
        pool,
        &query.organization_id,
        &range.from,
        &range.to,
    )
    .await?;

    Ok(Json(OverviewResponse { range, widgets }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_dates_win_over_period() {
        let range =
            resolve_range(Some("30d"), Some("2026-01-01"), Some("2026-01-31")).unwrap();
        assert_eq!(range.from, "2026-01-01");
        assert_eq!(range.to, "2026-01-31");
    }

    #[test]
    fn test_default_period_is_seven_days() {
        let range = resolve_range(None, None, None).unwrap();
        assert!(range.from <= range.to);
        assert_eq!(range.from.len(), 10);
    }

    #[test]
    fn test_unknown_period_is_rejected() {
        assert!(resolve_range(Some("1y"), None, None).is_err());
    }
}
