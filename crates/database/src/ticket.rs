//! Support request and manual review workflows.
//!
//! Both ticket kinds share the same columns and the same status machine;
//! they differ only in which table they live in and how the console
//! presents them.

use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::error::DatabaseError;
use crate::models::Ticket;
use crate::Result;

/// Which ticket table an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TicketKind {
    SupportRequest,
    ManualReview,
}

impl TicketKind {
    fn table(self) -> &'static str {
        match self {
            TicketKind::SupportRequest => "support_requests",
            TicketKind::ManualReview => "manual_reviews",
        }
    }
}

/// Ticket workflow status.
///
/// Allowed transitions:
/// - pending -> in_review | rejected
/// - in_review -> completed | rejected
/// - completed | rejected -> pending (reopen)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketStatus {
    Pending,
    InReview,
    Completed,
    Rejected,
}

impl TicketStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            TicketStatus::Pending => "pending",
            TicketStatus::InReview => "in_review",
            TicketStatus::Completed => "completed",
            TicketStatus::Rejected => "rejected",
        }
    }

    /// Parse a stored status string.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(TicketStatus::Pending),
            "in_review" => Some(TicketStatus::InReview),
            "completed" => Some(TicketStatus::Completed),
            "rejected" => Some(TicketStatus::Rejected),
            _ => None,
        }
    }

    /// Whether the workflow allows moving from `self` to `to`.
    pub fn can_transition(self, to: TicketStatus) -> bool {
        use TicketStatus::*;
        matches!(
            (self, to),
            (Pending, InReview)
                | (Pending, Rejected)
                | (InReview, Completed)
                | (InReview, Rejected)
                | (Completed, Pending)
                | (Rejected, Pending)
        )
    }
}

/// Create a ticket. New tickets always start as `pending`.
pub async fn create_ticket(pool: &SqlitePool, kind: TicketKind, ticket: &Ticket) -> Result<()> {
    let sql = format!(
        r#"
        INSERT INTO {} (id, widget_id, conversation_id, subject, user_message, contact_email, notes)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
        kind.table()
    );

    sqlx::query(&sql)
        .bind(&ticket.id)
        .bind(&ticket.widget_id)
        .bind(&ticket.conversation_id)
        .bind(&ticket.subject)
        .bind(&ticket.user_message)
        .bind(&ticket.contact_email)
        .bind(&ticket.notes)
        .execute(pool)
        .await?;

    Ok(())
}

/// Get a ticket by id.
pub async fn get_ticket(pool: &SqlitePool, kind: TicketKind, id: &str) -> Result<Ticket> {
    let sql = format!(
        r#"
        SELECT id, widget_id, conversation_id, subject, user_message, contact_email,
               status, notes, created_at, updated_at
        FROM {}
        WHERE id = ?
        "#,
        kind.table()
    );

    let record = sqlx::query_as::<_, Ticket>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;

    record.ok_or_else(|| DatabaseError::NotFound {
        entity: "ticket",
        id: id.to_string(),
    })
}

/// List tickets, newest first, optionally filtered by status.
pub async fn list_tickets(
    pool: &SqlitePool,
    kind: TicketKind,
    status: Option<TicketStatus>,
) -> Result<Vec<Ticket>> {
    let records = match status {
        Some(status) => {
            let sql = format!(
                r#"
                SELECT id, widget_id, conversation_id, subject, user_message, contact_email,
                       status, notes, created_at, updated_at
                FROM {}
                WHERE status = ?
                ORDER BY created_at DESC, id DESC
                "#,
                kind.table()
            );
            sqlx::query_as::<_, Ticket>(&sql)
                .bind(status.as_str())
                .fetch_all(pool)
                .await?
        }
        None => {
            let sql = format!(
                r#"
                SELECT id, widget_id, conversation_id, subject, user_message, contact_email,
                       status, notes, created_at, updated_at
                FROM {}
                ORDER BY created_at DESC, id DESC
                "#,
                kind.table()
            );
            sqlx::query_as::<_, Ticket>(&sql).fetch_all(pool).await?
        }
    };

    Ok(records)
}

/// Move a ticket to a new workflow status.
///
/// Rejects moves the workflow does not allow with `InvalidTransition`;
/// re-applying the current status is a no-op success.
pub async fn transition_ticket(
    pool: &SqlitePool,
    kind: TicketKind,
    id: &str,
    to: TicketStatus,
) -> Result<Ticket> {
    let ticket = get_ticket(pool, kind, id).await?;

    let from = TicketStatus::parse(&ticket.status).ok_or_else(|| {
        DatabaseError::InvalidTransition {
            from: ticket.status.clone(),
            to: to.as_str().to_string(),
        }
    })?;

    if from == to {
        return Ok(ticket);
    }

    if !from.can_transition(to) {
        return Err(DatabaseError::InvalidTransition {
            from: from.as_str().to_string(),
            to: to.as_str().to_string(),
        });
    }

    let sql = format!(
        r#"
        UPDATE {}
        SET status = ?, updated_at = datetime('now')
        WHERE id = ?
        "#,
        kind.table()
    );
    sqlx::query(&sql).bind(to.as_str()).bind(id).execute(pool).await?;

    get_ticket(pool, kind, id).await
}

/// Replace a ticket's operator notes.
pub async fn update_notes(
    pool: &SqlitePool,
    kind: TicketKind,
    id: &str,
    notes: &str,
) -> Result<()> {
    let sql = format!(
        r#"
        UPDATE {}
        SET notes = ?, updated_at = datetime('now')
        WHERE id = ?
        "#,
        kind.table()
    );

    let result = sqlx::query(&sql).bind(notes).bind(id).execute(pool).await?;

    if result.rows_affected() == 0 {
        return Err(DatabaseError::NotFound {
            entity: "ticket",
            id: id.to_string(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{seed_org, seed_widget, test_db};

    fn sample_ticket(id: &str) -> Ticket {
        Ticket {
            id: id.to_string(),
            widget_id: "w-1".to_string(),
            conversation_id: None,
            subject: "Kan ikke logge ind".to_string(),
            user_message: "Jeg kan ikke logge ind på min konto".to_string(),
            contact_email: "kunde@example.dk".to_string(),
            status: String::new(),
            notes: String::new(),
            created_at: String::new(),
            updated_at: String::new(),
        }
    }

    #[test]
    fn test_transition_rules() {
        use TicketStatus::*;
        assert!(Pending.can_transition(InReview));
        assert!(Pending.can_transition(Rejected));
        assert!(!Pending.can_transition(Completed));
        assert!(InReview.can_transition(Completed));
        assert!(InReview.can_transition(Rejected));
        assert!(!InReview.can_transition(Pending));
        assert!(Completed.can_transition(Pending));
        assert!(Rejected.can_transition(Pending));
        assert!(!Completed.can_transition(InReview));
        assert!(!Rejected.can_transition(Completed));
    }

    #[tokio::test]
    async fn test_ticket_lifecycle() {
        let db = test_db().await;
        seed_org(&db).await;
        seed_widget(&db, "w-1").await;

        create_ticket(db.pool(), TicketKind::SupportRequest, &sample_ticket("t-1"))
            .await
            .unwrap();

        let ticket = get_ticket(db.pool(), TicketKind::SupportRequest, "t-1")
            .await
            .unwrap();
        assert_eq!(ticket.status, "pending");

        let ticket = transition_ticket(
            db.pool(),
            TicketKind::SupportRequest,
            "t-1",
            TicketStatus::InReview,
        )
        .await
        .unwrap();
        assert_eq!(ticket.status, "in_review");

        let ticket = transition_ticket(
            db.pool(),
            TicketKind::SupportRequest,
            "t-1",
            TicketStatus::Completed,
        )
        .await
        .unwrap();
        assert_eq!(ticket.status, "completed");

        // Reopen.
        let ticket = transition_ticket(
            db.pool(),
            TicketKind::SupportRequest,
            "t-1",
            TicketStatus::Pending,
        )
        .await
        .unwrap();
        assert_eq!(ticket.status, "pending");
    }

    #[tokio::test]
    async fn test_illegal_transition_rejected() {
        let db = test_db().await;
        seed_org(&db).await;
        seed_widget(&db, "w-1").await;

        create_ticket(db.pool(), TicketKind::ManualReview, &sample_ticket("t-1"))
            .await
            .unwrap();

        let result = transition_ticket(
            db.pool(),
            TicketKind::ManualReview,
            "t-1",
            TicketStatus::Completed,
        )
        .await;
        assert!(matches!(
            result,
            Err(DatabaseError::InvalidTransition { .. })
        ));

        // The stored status is untouched.
        let ticket = get_ticket(db.pool(), TicketKind::ManualReview, "t-1")
            .await
            .unwrap();
        assert_eq!(ticket.status, "pending");
    }

    #[tokio::test]
    async fn test_same_status_is_noop() {
        let db = test_db().await;
        seed_org(&db).await;
        seed_widget(&db, "w-1").await;

        create_ticket(db.pool(), TicketKind::SupportRequest, &sample_ticket("t-1"))
            .await
            .unwrap();

        let ticket = transition_ticket(
            db.pool(),
            TicketKind::SupportRequest,
            "t-1",
            TicketStatus::Pending,
        )
        .await
        .unwrap();
        assert_eq!(ticket.status, "pending");
    }

    #[tokio::test]
    async fn test_list_filter_and_kind_isolation() {
        let db = test_db().await;
        seed_org(&db).await;
        seed_widget(&db, "w-1").await;

        create_ticket(db.pool(), TicketKind::SupportRequest, &sample_ticket("t-1"))
            .await
            .unwrap();
        create_ticket(db.pool(), TicketKind::ManualReview, &sample_ticket("t-2"))
            .await
            .unwrap();

        let support = list_tickets(db.pool(), TicketKind::SupportRequest, None)
            .await
            .unwrap();
        assert_eq!(support.len(), 1);
        assert_eq!(support[0].id, "t-1");

        let reviews = list_tickets(
            db.pool(),
            TicketKind::ManualReview,
            Some(TicketStatus::Pending),
        )
        .await
        .unwrap();
        assert_eq!(reviews.len(), 1);
        assert_eq!(reviews[0].id, "t-2");

        let none = list_tickets(
            db.pool(),
            TicketKind::ManualReview,
            Some(TicketStatus::Completed),
        )
        .await
        .unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn test_update_notes() {
        let db = test_db().await;
        seed_org(&db).await;
        seed_widget(&db, "w-1").await;

        create_ticket(db.pool(), TicketKind::SupportRequest, &sample_ticket("t-1"))
            .await
            .unwrap();
        update_notes(db.pool(), TicketKind::SupportRequest, "t-1", "Ringet til kunden")
            .await
            .unwrap();

        let ticket = get_ticket(db.pool(), TicketKind::SupportRequest, "t-1")
            .await
            .unwrap();
        assert_eq!(ticket.notes, "Ringet til kunden");
    }
}
