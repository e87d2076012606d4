//! Widget storage: metadata columns plus the whole configuration document.
//!
//! The configuration is stored as one JSON column and always replaced in
//! full; there is no partial-field update at this boundary. Last write wins.

use sqlx::SqlitePool;

use crate::error::DatabaseError;
use crate::models::WidgetRecord;
use crate::Result;

/// Create a widget.
pub async fn create_widget(pool: &SqlitePool, widget: &WidgetRecord) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO widgets (
            id, organization_id, name, description, status,
            is_demo, demo_expires_at, demo_usage_limit, demo_usage_count, config
        )
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&widget.id)
    .bind(&widget.organization_id)
    .bind(&widget.name)
    .bind(&widget.description)
    .bind(&widget.status)
    .bind(widget.is_demo)
    .bind(&widget.demo_expires_at)
    .bind(widget.demo_usage_limit)
    .bind(widget.demo_usage_count)
    .bind(&widget.config)
    .execute(pool)
    .await?;

    Ok(())
}

/// Get a widget by id.
pub async fn get_widget(pool: &SqlitePool, id: &str) -> Result<WidgetRecord> {
    let record = sqlx::query_as::<_, WidgetRecord>(
        r#"
        SELECT id, organization_id, name, description, status,
               is_demo, demo_expires_at, demo_usage_limit, demo_usage_count,
               config, created_at, updated_at
        FROM widgets
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    record.ok_or_else(|| DatabaseError::NotFound {
        entity: "widget",
        id: id.to_string(),
    })
}

/// List widgets for an organization, newest first.
pub async fn list_widgets(pool: &SqlitePool, organization_id: &str) -> Result<Vec<WidgetRecord>> {
    let records = sqlx::query_as::<_, WidgetRecord>(
        r#"
        SELECT id, organization_id, name, description, status,
               is_demo, demo_expires_at, demo_usage_limit, demo_usage_count,
               config, created_at, updated_at
        FROM widgets
        WHERE organization_id = ?
        ORDER BY created_at DESC, id DESC
        "#,
    )
    .bind(organization_id)
    .fetch_all(pool)
    .await?;

    Ok(records)
}

/// Count widgets for an organization (quota checks).
pub async fn count_widgets(pool: &SqlitePool, organization_id: &str) -> Result<i64> {
    let count: (i64,) = sqlx::query_as(
        r#"
        SELECT COUNT(*) FROM widgets WHERE organization_id = ?
        "#,
    )
    .bind(organization_id)
    .fetch_one(pool)
    .await?;

    Ok(count.0)
}

/// Replace a widget's configuration document and listing metadata in full.
pub async fn update_widget(
    pool: &SqlitePool,
    id: &str,
    name: &str,
    description: &str,
    status: &str,
    config: &str,
) -> Result<()> {
    let result = sqlx::query(
        r#"
        UPDATE widgets
        SET name = ?, description = ?, status = ?, config = ?,
            updated_at = datetime('now')
        WHERE id = ?
        "#,
    )
    .bind(name)
    .bind(description)
    .bind(status)
    .bind(config)
    .bind(id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DatabaseError::NotFound {
            entity: "widget",
            id: id.to_string(),
        });
    }

    Ok(())
}

/// Delete a widget. Returns an error if it does not exist.
pub async fn delete_widget(pool: &SqlitePool, id: &str) -> Result<()> {
    let result = sqlx::query(
        r#"
        DELETE FROM widgets
        WHERE id = ?
        "#,
    )
    .bind(id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DatabaseError::NotFound {
            entity: "widget",
            id: id.to_string(),
        });
    }

    Ok(())
}

/// Consume one demo respond call. Returns the new usage count.
pub async fn increment_demo_usage(pool: &SqlitePool, id: &str) -> Result<i64> {
    let result = sqlx::query(
        r#"
        UPDATE widgets
        SET demo_usage_count = demo_usage_count + 1
        WHERE id = ?
        "#,
    )
    .bind(id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DatabaseError::NotFound {
            entity: "widget",
            id: id.to_string(),
        });
    }

    let count: (i64,) = sqlx::query_as(
        r#"
        SELECT demo_usage_count FROM widgets WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_one(pool)
    .await?;

    Ok(count.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{seed_org, seed_widget, test_db};

    #[tokio::test]
    async fn test_widget_crud() {
        let db = test_db().await;
        seed_org(&db).await;
        let widget = seed_widget(&db, "w-1").await;
        assert_eq!(widget.name, "Support");
        assert!(!widget.created_at.is_empty());

        // Whole-document replacement.
        update_widget(
            db.pool(),
            "w-1",
            "Salg",
            "Salgswidget",
            "inactive",
            r#"{"name":"Salg"}"#,
        )
        .await
        .unwrap();

        let fetched = get_widget(db.pool(), "w-1").await.unwrap();
        assert_eq!(fetched.name, "Salg");
        assert_eq!(fetched.status, "inactive");
        assert_eq!(fetched.config, r#"{"name":"Salg"}"#);

        let widgets = list_widgets(db.pool(), "org-1").await.unwrap();
        assert_eq!(widgets.len(), 1);
        assert_eq!(count_widgets(db.pool(), "org-1").await.unwrap(), 1);

        delete_widget(db.pool(), "w-1").await.unwrap();
        assert!(matches!(
            get_widget(db.pool(), "w-1").await,
            Err(crate::DatabaseError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_update_missing_widget_is_not_found() {
        let db = test_db().await;
        seed_org(&db).await;

        let result = update_widget(db.pool(), "nope", "x", "", "active", "{}").await;
        assert!(matches!(
            result,
            Err(crate::DatabaseError::NotFound { entity: "widget", .. })
        ));
    }

    #[tokio::test]
    async fn test_increment_demo_usage() {
        let db = test_db().await;
        seed_org(&db).await;
        seed_widget(&db, "w-1").await;

        assert_eq!(increment_demo_usage(db.pool(), "w-1").await.unwrap(), 1);
        assert_eq!(increment_demo_usage(db.pool(), "w-1").await.unwrap(), 2);
    }
}
