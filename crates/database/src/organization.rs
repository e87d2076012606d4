//! Organization (tenant) storage and the active-organization switch.

use sqlx::SqlitePool;

use crate::error::DatabaseError;
use crate::models::Organization;
use crate::Result;

/// Create an organization.
pub async fn create_organization(pool: &SqlitePool, org: &Organization) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO organizations (id, name, plan, widget_limit)
        VALUES (?, ?, ?, ?)
        "#,
    )
    .bind(&org.id)
    .bind(&org.name)
    .bind(&org.plan)
    .bind(org.widget_limit)
    .execute(pool)
    .await?;

    Ok(())
}

/// Get an organization by id.
pub async fn get_organization(pool: &SqlitePool, id: &str) -> Result<Organization> {
    let record = sqlx::query_as::<_, Organization>(
        r#"
        SELECT id, name, plan, widget_limit, created_at
        FROM organizations
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    record.ok_or_else(|| DatabaseError::NotFound {
        entity: "organization",
        id: id.to_string(),
    })
}

/// List all organizations, alphabetically.
pub async fn list_organizations(pool: &SqlitePool) -> Result<Vec<Organization>> {
    let records = sqlx::query_as::<_, Organization>(
        r#"
        SELECT id, name, plan, widget_limit, created_at
        FROM organizations
        ORDER BY name
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(records)
}

/// Update an organization's name and plan.
pub async fn update_organization(
    pool: &SqlitePool,
    id: &str,
    name: &str,
    plan: &str,
    widget_limit: i64,
) -> Result<()> {
    let result = sqlx::query(
        r#"
        UPDATE organizations
        SET name = ?, plan = ?, widget_limit = ?
        WHERE id = ?
        "#,
    )
    .bind(name)
    .bind(plan)
    .bind(widget_limit)
    .bind(id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DatabaseError::NotFound {
            entity: "organization",
            id: id.to_string(),
        });
    }

    Ok(())
}

/// Switch a user's active organization for the console session.
pub async fn switch_active_organization(
    pool: &SqlitePool,
    user_id: &str,
    organization_id: &str,
) -> Result<()> {
    // The target must exist; a dangling reference would break every
    // subsequent scoped query.
    get_organization(pool, organization_id).await?;

    let result = sqlx::query(
        r#"
        UPDATE users
        SET active_organization_id = ?
        WHERE id = ?
        "#,
    )
    .bind(organization_id)
    .bind(user_id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DatabaseError::NotFound {
            entity: "user",
            id: user_id.to_string(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::User;
    use crate::test_support::{seed_org, test_db};
    use crate::user;

    #[tokio::test]
    async fn test_organization_crud() {
        let db = test_db().await;
        let org = seed_org(&db).await;
        assert_eq!(org.plan, "starter");
        assert!(!org.created_at.is_empty());

        update_organization(db.pool(), "org-1", "Eksempel A/S", "business", 10)
            .await
            .unwrap();
        let fetched = get_organization(db.pool(), "org-1").await.unwrap();
        assert_eq!(fetched.plan, "business");
        assert_eq!(fetched.widget_limit, 10);

        let all = list_organizations(db.pool()).await.unwrap();
        assert_eq!(all.len(), 1);
    }

    #[tokio::test]
    async fn test_switch_active_organization() {
        let db = test_db().await;
        seed_org(&db).await;
        create_organization(
            db.pool(),
            &Organization {
                id: "org-2".to_string(),
                name: "Anden ApS".to_string(),
                plan: "starter".to_string(),
                widget_limit: 3,
                created_at: String::new(),
            },
        )
        .await
        .unwrap();

        user::create_user(
            db.pool(),
            &User {
                id: "u-1".to_string(),
                email: "alice@example.dk".to_string(),
                name: "Alice".to_string(),
                role: "admin".to_string(),
                organization_id: "org-1".to_string(),
                active_organization_id: None,
                created_at: String::new(),
            },
        )
        .await
        .unwrap();

        switch_active_organization(db.pool(), "u-1", "org-2").await.unwrap();
        let fetched = user::get_user(db.pool(), "u-1").await.unwrap();
        assert_eq!(fetched.active_organization_id.as_deref(), Some("org-2"));

        // Switching to a missing organization fails cleanly.
        let result = switch_active_organization(db.pool(), "u-1", "org-404").await;
        assert!(matches!(
            result,
            Err(crate::DatabaseError::NotFound { entity: "organization", .. })
        ));
    }
}
