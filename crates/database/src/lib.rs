//! SQLite persistence layer for the widget admin platform.
//!
//! This crate provides async database operations for organizations, users,
//! widgets (whole-document configuration storage), the audit trail, ticket
//! workflows, conversations, and console preferences using SQLx with SQLite.
//!
//! # Example
//!
//! ```no_run
//! use database::{Database, models::Organization, organization};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Connect and run migrations
//!     let db = Database::connect("sqlite:admin.db?mode=rwc").await?;
//!     db.migrate().await?;
//!
//!     let org = Organization {
//!         id: "org-1".to_string(),
//!         name: "Eksempel ApS".to_string(),
//!         plan: "starter".to_string(),
//!         widget_limit: 3,
//!         created_at: String::new(),
//!     };
//!     organization::create_organization(db.pool(), &org).await?;
//!
//!     Ok(())
//! }
//! ```

pub mod analytics;
pub mod audit;
pub mod conversation;
pub mod error;
pub mod models;
pub mod organization;
pub mod preference;
pub mod ticket;
pub mod user;
pub mod widget;

pub use error::{DatabaseError, Result};
pub use models::{
    AuditLogEntry, Conversation, Message, Organization, Preference, Ticket, User, WidgetRecord,
};
pub use ticket::{TicketKind, TicketStatus};

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;

/// Database connection wrapper.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Default pool size for database connections.
    const DEFAULT_POOL_SIZE: u32 = 20;

    /// Connect to a SQLite database.
    ///
    /// The URL should be in the format `sqlite:path/to/db.sqlite?mode=rwc`.
    /// Use `?mode=rwc` to create the database file if it doesn't exist, or
    /// `sqlite::memory:` for tests.
    pub async fn connect(url: &str) -> Result<Self> {
        Self::connect_with_pool_size(url, Self::DEFAULT_POOL_SIZE).await
    }

    /// Connect to a SQLite database with a custom pool size.
    pub async fn connect_with_pool_size(url: &str, pool_size: u32) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(pool_size)
            .acquire_timeout(std::time::Duration::from_secs(30))
            .connect_with(options)
            .await?;

        tracing::info!(
            "Connected to database: {} (pool size: {})",
            url,
            pool_size
        );

        Ok(Self { pool })
    }

    /// Run database migrations.
    ///
    /// This should be called once after connecting to ensure the schema is up to date.
    pub async fn migrate(&self) -> Result<()> {
        tracing::info!("Running database migrations...");

        sqlx::migrate!("./migrations").run(&self.pool).await?;

        tracing::info!("Migrations complete");
        Ok(())
    }

    /// Get a reference to the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Close the database connection pool.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::models::{Organization, WidgetRecord};

    pub async fn test_db() -> Database {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        db.migrate().await.unwrap();
        db
    }

    pub async fn seed_org(db: &Database) -> Organization {
        let org = Organization {
            id: "org-1".to_string(),
            name: "Eksempel ApS".to_string(),
            plan: "starter".to_string(),
            widget_limit: 3,
            created_at: String::new(),
        };
        crate::organization::create_organization(db.pool(), &org).await.unwrap();
        crate::organization::get_organization(db.pool(), &org.id)
            .await
            .unwrap()
    }

    pub async fn seed_widget(db: &Database, id: &str) -> WidgetRecord {
        let widget = WidgetRecord {
            id: id.to_string(),
            organization_id: "org-1".to_string(),
            name: "Support".to_string(),
            description: String::new(),
            status: "active".to_string(),
            is_demo: false,
            demo_expires_at: None,
            demo_usage_limit: None,
            demo_usage_count: 0,
            config: "{}".to_string(),
            created_at: String::new(),
            updated_at: String::new(),
        };
        crate::widget::create_widget(db.pool(), &widget).await.unwrap();
        crate::widget::get_widget(db.pool(), id).await.unwrap()
    }
}
