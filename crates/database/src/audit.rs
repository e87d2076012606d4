//! GDPR audit trail: append-only log with paginated retrieval.

use serde::Serialize;
use sqlx::SqlitePool;

use crate::models::AuditLogEntry;
use crate::Result;

/// Pagination envelope returned alongside a page of log entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub page: i64,
    pub total: i64,
    pub pages: i64,
}

/// One page of audit entries plus the distinct action list for filtering.
#[derive(Debug, Clone, Serialize)]
pub struct AuditPage {
    pub logs: Vec<AuditLogEntry>,
    pub pagination: Pagination,
    pub actions: Vec<String>,
}

/// Append one audit entry.
pub async fn record(
    pool: &SqlitePool,
    actor: &str,
    action: &str,
    entity_type: &str,
    entity_id: &str,
    details: &str,
) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO audit_logs (actor, action, entity_type, entity_id, details)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(actor)
    .bind(action)
    .bind(entity_type)
    .bind(entity_id)
    .bind(details)
    .execute(pool)
    .await?;

    Ok(())
}

/// Fetch one page of the trail, newest first, optionally filtered by action.
///
/// `page` is 1-based; out-of-range pages yield an empty list, not an error.
pub async fn list_audit_logs(
    pool: &SqlitePool,
    page: i64,
    limit: i64,
    action: Option<&str>,
) -> Result<AuditPage> {
    let page = page.max(1);
    let limit = limit.clamp(1, 200);
    let offset = (page - 1) * limit;

    let (logs, total) = match action {
        Some(action) => {
            let logs = sqlx::query_as::<_, AuditLogEntry>(
                r#"
                SELECT id, actor, action, entity_type, entity_id, details, created_at
                FROM audit_logs
                WHERE action = ?
                ORDER BY id DESC
                LIMIT ? OFFSET ?
                "#,
            )
            .bind(action)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await?;

            let total: (i64,) =
                sqlx::query_as("SELECT COUNT(*) FROM audit_logs WHERE action = ?")
                    .bind(action)
                    .fetch_one(pool)
                    .await?;
            (logs, total.0)
        }
        None => {
            let logs = sqlx::query_as::<_, AuditLogEntry>(
                r#"
                SELECT id, actor, action, entity_type, entity_id, details, created_at
                FROM audit_logs
                ORDER BY id DESC
                LIMIT ? OFFSET ?
                "#,
            )
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await?;

            let total: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM audit_logs")
                .fetch_one(pool)
                .await?;
            (logs, total.0)
        }
    };

    let actions = list_actions(pool).await?;
    let pages = if total == 0 { 0 } else { (total + limit - 1) / limit };

    Ok(AuditPage {
        logs,
        pagination: Pagination { page, total, pages },
        actions,
    })
}

/// Distinct action slugs present in the trail, for the filter dropdown.
pub async fn list_actions(pool: &SqlitePool) -> Result<Vec<String>> {
    let rows: Vec<(String,)> =
        sqlx::query_as("SELECT DISTINCT action FROM audit_logs ORDER BY action")
            .fetch_all(pool)
            .await?;

    Ok(rows.into_iter().map(|(action,)| action).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_db;

    async fn seed_entries(db: &crate::Database, count: usize, action: &str) {
        for i in 0..count {
            record(db.pool(), "u-1", action, "widget", &format!("w-{i}"), "")
                .await
                .unwrap();
        }
    }

    #[tokio::test]
    async fn test_pagination_math() {
        let db = test_db().await;
        seed_entries(&db, 25, "widget.update").await;

        let page = list_audit_logs(db.pool(), 1, 10, None).await.unwrap();
        assert_eq!(page.logs.len(), 10);
        assert_eq!(page.pagination.total, 25);
        assert_eq!(page.pagination.pages, 3);

        let last = list_audit_logs(db.pool(), 3, 10, None).await.unwrap();
        assert_eq!(last.logs.len(), 5);

        // Out-of-range pages are empty, not errors.
        let beyond = list_audit_logs(db.pool(), 9, 10, None).await.unwrap();
        assert!(beyond.logs.is_empty());
    }

    #[tokio::test]
    async fn test_newest_first() {
        let db = test_db().await;
        record(db.pool(), "u-1", "widget.create", "widget", "w-old", "").await.unwrap();
        record(db.pool(), "u-1", "widget.delete", "widget", "w-new", "").await.unwrap();

        let page = list_audit_logs(db.pool(), 1, 10, None).await.unwrap();
        assert_eq!(page.logs[0].entity_id, "w-new");
        assert_eq!(page.logs[1].entity_id, "w-old");
    }

    #[tokio::test]
    async fn test_action_filter_and_distinct_actions() {
        let db = test_db().await;
        seed_entries(&db, 3, "widget.update").await;
        seed_entries(&db, 2, "widget.delete").await;

        let filtered = list_audit_logs(db.pool(), 1, 10, Some("widget.delete"))
            .await
            .unwrap();
        assert_eq!(filtered.logs.len(), 2);
        assert_eq!(filtered.pagination.total, 2);
        assert_eq!(
            filtered.actions,
            vec!["widget.delete".to_string(), "widget.update".to_string()]
        );
    }
}
