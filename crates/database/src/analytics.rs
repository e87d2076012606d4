//! Aggregate queries behind the analytics dashboards.
//!
//! All aggregation happens in SQL; callers only pick the widget and the
//! date range. Ranges are inclusive `YYYY-MM-DD` date strings compared
//! against `date(started_at)` / `date(created_at)`.

use serde::Serialize;
use sqlx::SqlitePool;

use crate::Result;

/// Headline numbers for one widget over a range.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetMetrics {
    pub widget_id: String,
    pub conversation_count: i64,
    pub message_count: i64,
    pub user_message_count: i64,
    /// Messages per conversation; 0.0 when there are no conversations.
    pub avg_messages_per_conversation: f64,
}

/// Conversations started on one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct DailyCount {
    /// `YYYY-MM-DD`.
    pub day: String,
    pub conversations: i64,
}

/// Conversations started in one hour-of-day bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct HourlyCount {
    /// `00` through `23`.
    pub hour: String,
    pub conversations: i64,
}

/// One row in the cross-widget overview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct WidgetOverviewRow {
    pub widget_id: String,
    pub widget_name: String,
    pub conversations: i64,
    pub messages: i64,
}

/// Headline metrics for one widget over an inclusive date range.
pub async fn widget_metrics(
    pool: &SqlitePool,
    widget_id: &str,
    from: &str,
    to: &str,
) -> Result<WidgetMetrics> {
    let conversations: (i64,) = sqlx::query_as(
        r#"
        SELECT COUNT(*)
        FROM conversations
        WHERE widget_id = ? AND date(started_at) BETWEEN ? AND ?
        "#,
    )
    .bind(widget_id)
    .bind(from)
    .bind(to)
    .fetch_one(pool)
    .await?;

    let messages: (i64, i64) = sqlx::query_as(
        r#"
        SELECT COUNT(*),
               COALESCE(SUM(CASE WHEN m.sender = 'user' THEN 1 ELSE 0 END), 0)
        FROM messages m
        JOIN conversations c ON c.id = m.conversation_id
        WHERE c.widget_id = ? AND date(m.created_at) BETWEEN ? AND ?
        "#,
    )
    .bind(widget_id)
    .bind(from)
    .bind(to)
    .fetch_one(pool)
    .await?;

    let avg = if conversations.0 == 0 {
        0.0
    } else {
        messages.0 as f64 / conversations.0 as f64
    };

    Ok(WidgetMetrics {
        widget_id: widget_id.to_string(),
        conversation_count: conversations.0,
        message_count: messages.0,
        user_message_count: messages.1,
        avg_messages_per_conversation: avg,
    })
}

/// Conversations per calendar day for the line chart. Days with no
/// conversations are absent; the caller fills gaps if it needs a dense
/// series.
pub async fn conversations_per_day(
    pool: &SqlitePool,
    widget_id: &str,
    from: &str,
    to: &str,
) -> Result<Vec<DailyCount>> {
    let rows = sqlx::query_as::<_, DailyCount>(
        r#"
        SELECT date(started_at) AS day, COUNT(*) AS conversations
        FROM conversations
        WHERE widget_id = ? AND date(started_at) BETWEEN ? AND ?
        GROUP BY day
        ORDER BY day
        "#,
    )
    .bind(widget_id)
    .bind(from)
    .bind(to)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Conversations per hour of day for the busy-hours chart.
pub async fn conversations_per_hour(
    pool: &SqlitePool,
    widget_id: &str,
    from: &str,
    to: &str,
) -> Result<Vec<HourlyCount>> {
    let rows = sqlx::query_as::<_, HourlyCount>(
        r#"
        SELECT strftime('%H', started_at) AS hour, COUNT(*) AS conversations
        FROM conversations
        WHERE widget_id = ? AND date(started_at) BETWEEN ? AND ?
        GROUP BY hour
        ORDER BY hour
        "#,
    )
    .bind(widget_id)
    .bind(from)
    .bind(to)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Per-widget totals across an organization, busiest first.
pub async fn organization_overview(
    pool: &SqlitePool,
    organization_id: &str,
    from: &str,
    to: &str,
) -> Result<Vec<WidgetOverviewRow>> {
    let rows = sqlx::query_as::<_, WidgetOverviewRow>(
        r#"
        SELECT w.id AS widget_id,
               w.name AS widget_name,
               COUNT(DISTINCT c.id) AS conversations,
               COUNT(m.id) AS messages
        FROM widgets w
        LEFT JOIN conversations c
            ON c.widget_id = w.id AND date(c.started_at) BETWEEN ? AND ?
        LEFT JOIN messages m
            ON m.conversation_id = c.id
        WHERE w.organization_id = ?
        GROUP BY w.id, w.name
        ORDER BY conversations DESC, w.name
        "#,
    )
    .bind(from)
    .bind(to)
    .bind(organization_id)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
