//! Console user storage.

use sqlx::SqlitePool;

use crate::error::DatabaseError;
use crate::models::User;
use crate::Result;

/// Create a user.
pub async fn create_user(pool: &SqlitePool, user: &User) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO users (id, email, name, role, organization_id, active_organization_id)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&user.id)
    .bind(&user.email)
    .bind(&user.name)
    .bind(&user.role)
    .bind(&user.organization_id)
    .bind(&user.active_organization_id)
    .execute(pool)
    .await?;

    Ok(())
}

/// Get a user by id.
pub async fn get_user(pool: &SqlitePool, id: &str) -> Result<User> {
    let record = sqlx::query_as::<_, User>(
        r#"
        SELECT id, email, name, role, organization_id, active_organization_id, created_at
        FROM users
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    record.ok_or_else(|| DatabaseError::NotFound {
        entity: "user",
        id: id.to_string(),
    })
}

/// List users belonging to an organization.
pub async fn list_users(pool: &SqlitePool, organization_id: &str) -> Result<Vec<User>> {
    let records = sqlx::query_as::<_, User>(
        r#"
        SELECT id, email, name, role, organization_id, active_organization_id, created_at
        FROM users
        WHERE organization_id = ?
        ORDER BY name
        "#,
    )
    .bind(organization_id)
    .fetch_all(pool)
    .await?;

    Ok(records)
}

/// Delete a user.
pub async fn delete_user(pool: &SqlitePool, id: &str) -> Result<()> {
    let result = sqlx::query(
        r#"
        DELETE FROM users
        WHERE id = ?
        "#,
    )
    .bind(id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DatabaseError::NotFound {
            entity: "user",
            id: id.to_string(),
        });
    }

    Ok(())
}
