//! Console preference storage (sidebar state, dismissed banners, consent).

use sqlx::SqlitePool;

use crate::models::Preference;
use crate::Result;

/// Set a preference, replacing any previous value.
pub async fn set_preference(
    pool: &SqlitePool,
    user_id: &str,
    key: &str,
    value: &str,
) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO admin_preferences (user_id, key, value)
        VALUES (?, ?, ?)
        ON CONFLICT(user_id, key) DO UPDATE SET
            value = excluded.value,
            updated_at = datetime('now')
        "#,
    )
    .bind(user_id)
    .bind(key)
    .bind(value)
    .execute(pool)
    .await?;

    Ok(())
}

/// Get one preference value, or None if never set.
pub async fn get_preference(
    pool: &SqlitePool,
    user_id: &str,
    key: &str,
) -> Result<Option<String>> {
    let row: Option<(String,)> = sqlx::query_as(
        r#"
        SELECT value FROM admin_preferences
        WHERE user_id = ? AND key = ?
        "#,
    )
    .bind(user_id)
    .bind(key)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|(value,)| value))
}

/// All preferences for one user, ordered by key.
pub async fn list_preferences(pool: &SqlitePool, user_id: &str) -> Result<Vec<Preference>> {
    let records = sqlx::query_as::<_, Preference>(
        r#"
        SELECT user_id, key, value, updated_at
        FROM admin_preferences
        WHERE user_id = ?
        ORDER BY key
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(records)
}

/// Remove a preference. Removing an absent key is a no-op.
pub async fn delete_preference(pool: &SqlitePool, user_id: &str, key: &str) -> Result<()> {
    sqlx::query(
        r#"
        DELETE FROM admin_preferences
        WHERE user_id = ? AND key = ?
        "#,
    )
    .bind(user_id)
    .bind(key)
    .execute(pool)
    .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_db;

    #[tokio::test]
    async fn test_preference_upsert() {
        let db = test_db().await;

        set_preference(db.pool(), "u-1", "sidebar", "collapsed").await.unwrap();
        assert_eq!(
            get_preference(db.pool(), "u-1", "sidebar").await.unwrap(),
            Some("collapsed".to_string())
        );

        // Replacement, not duplication.
        set_preference(db.pool(), "u-1", "sidebar", "expanded").await.unwrap();
        assert_eq!(
            get_preference(db.pool(), "u-1", "sidebar").await.unwrap(),
            Some("expanded".to_string())
        );
        assert_eq!(list_preferences(db.pool(), "u-1").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_missing_and_delete() {
        let db = test_db().await;

        assert_eq!(get_preference(db.pool(), "u-1", "theme").await.unwrap(), None);

        set_preference(db.pool(), "u-1", "theme", "dark").await.unwrap();
        delete_preference(db.pool(), "u-1", "theme").await.unwrap();
        assert_eq!(get_preference(db.pool(), "u-1", "theme").await.unwrap(), None);

        // Deleting again is fine.
        delete_preference(db.pool(), "u-1", "theme").await.unwrap();
    }

    #[tokio::test]
    async fn test_preferences_scoped_per_user() {
        let db = test_db().await;

        set_preference(db.pool(), "u-1", "sidebar", "collapsed").await.unwrap();
        set_preference(db.pool(), "u-2", "sidebar", "expanded").await.unwrap();

        assert_eq!(
            get_preference(db.pool(), "u-1", "sidebar").await.unwrap(),
            Some("collapsed".to_string())
        );
        assert_eq!(
            get_preference(db.pool(), "u-2", "sidebar").await.unwrap(),
            Some("expanded".to_string())
        );
    }
}
